//! Gateway REST do backend da clínica
//!
//! Uma função por operação, agrupadas por recurso. Nenhuma delas devolve
//! erro: falhas de rede, de parse e respostas não-2xx viram um
//! [`ApiResult`] com `success == false` e uma mensagem exibível.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::PortalError;
use crate::models::NO_FILTER;

pub mod admin;
pub mod appointment;
pub mod doctor;
pub mod patient;

/// Resultado normalizado de uma chamada ao backend
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResult<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResult<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResult<U> {
        ApiResult {
            success: self.success,
            message: self.message,
            data: self.data.map(f),
        }
    }
}

/// Mensagens padrão de uma operação
#[derive(Debug, Clone, Copy)]
pub(crate) struct Messages {
    /// Mensagem de sucesso quando o corpo não traz `message`
    pub success: &'static str,
    /// Falha de rede, parse ou status sem mensagem do servidor
    pub failure: &'static str,
}

/// Cliente HTTP do portal
#[derive(Debug, Clone)]
pub struct ApiGateway {
    base_url: Url,
    client: Client,
}

impl ApiGateway {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, PortalError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| PortalError::Config(format!("URL base inválida {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(PortalError::Config(format!(
                "URL base não hierárquica: {}",
                base_url
            )));
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Monta a URL segmento a segmento; cada segmento é percent-encoded
    ///
    /// `.` e `..` (mesmo como `%2E`) são normalizados pelo parser de URL e
    /// sumiriam do caminho, deslocando os segmentos seguintes. Eles vão como
    /// o sentinela [`NO_FILTER`] para manter a aridade.
    pub(crate) fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(segments.iter().map(|segment| path_segment(segment)));
        }
        url
    }

    pub(crate) fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.client.request(method, self.url(segments))
    }

    /// Envia e devolve o corpo JSON (ou `Value::Null` para corpo vazio)
    pub(crate) async fn call(&self, builder: RequestBuilder, messages: Messages) -> ApiResult<Value> {
        match self.send(builder).await {
            Ok(body) => {
                let message = body_message(&body).unwrap_or_else(|| messages.success.to_string());
                ApiResult::ok(message, body)
            }
            Err(PortalError::Http { status, message }) => {
                warn!("Backend respondeu {}: {}", status, message);
                let message = if message.is_empty() {
                    messages.failure.to_string()
                } else {
                    message
                };
                ApiResult::failure(message)
            }
            Err(e) => {
                warn!("Falha na chamada ao backend: {}", e);
                ApiResult::failure(messages.failure)
            }
        }
    }

    /// Como [`call`](Self::call), decodificando `data` para o tipo pedido
    pub(crate) async fn call_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        messages: Messages,
        extract: impl FnOnce(Value) -> Value,
    ) -> ApiResult<T> {
        let result = self.call(builder, messages).await;
        if !result.success {
            return ApiResult::failure(result.message);
        }

        let body = result.data.unwrap_or(Value::Null);
        match serde_json::from_value::<T>(extract(body)) {
            Ok(data) => ApiResult::ok(result.message, data),
            Err(e) => {
                warn!("Resposta do backend fora do formato esperado: {}", e);
                ApiResult::failure(messages.failure)
            }
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Value, PortalError> {
        let request = builder.build()?;
        debug!("{} {}", request.method(), request.url().path());

        let response = self.client.execute(request).await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(PortalError::Http {
                status: status.as_u16(),
                message: server_message(&text),
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

fn path_segment(segment: &str) -> &str {
    if matches!(segment, "." | "..") {
        warn!("Segmento de caminho {:?} enviado como {}", segment, NO_FILTER);
        NO_FILTER
    } else {
        segment
    }
}

/// Corpo com JSON: `message` e depois `error`
fn body_message(body: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

/// Mensagem do servidor em uma resposta de erro; vazia quando não há
fn server_message(text: &str) -> String {
    match serde_json::from_str::<Value>(text) {
        Ok(body @ Value::Object(_)) => body_message(&body).unwrap_or_default(),
        Ok(Value::String(message)) => message,
        Ok(_) => String::new(),
        Err(_) => text.trim().to_string(),
    }
}

/// Pega `body[key]`, ou `Value::Null` quando ausente
pub(crate) fn field(key: &'static str) -> impl FnOnce(Value) -> Value {
    move |mut body| body.get_mut(key).map(Value::take).unwrap_or(Value::Null)
}

/// Pega `body[key]` ou, se ausente, uma lista vazia
pub(crate) fn list_field(key: &'static str) -> impl FnOnce(Value) -> Value {
    move |mut body| match body.get_mut(key).map(Value::take) {
        Some(Value::Null) | None => Value::Array(Vec::new()),
        Some(list) => list,
    }
}
