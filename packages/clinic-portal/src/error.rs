//! Definições de erro para a biblioteca clinic-portal
//!
//! Este módulo define os tipos de erro usados internamente pelo portal.
//! Nenhum destes erros chega à interface: o gateway os converte em
//! `ApiResult` com falha e os controladores em notificações.

use thiserror::Error;

use crate::session::Role;

/// Erros específicos das operações do portal
#[derive(Error, Debug)]
pub enum PortalError {
    #[error("Erro de rede: {0}")]
    Network(String),

    #[error("Resposta inválida do servidor: {0}")]
    Decode(String),

    #[error("Servidor respondeu {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Erro de armazenamento da sessão: {0}")]
    Storage(String),

    #[error("Sessão inválida para o papel {role}: token ausente")]
    SessionInvalid { role: Role },

    #[error("Dados de formulário inválidos: {0}")]
    Validation(String),

    #[error("Configuração inválida: {0}")]
    Config(String),
}

/// Conversão de erros do reqwest para nossos tipos de erro
impl From<reqwest::Error> for PortalError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            return PortalError::Decode(error.to_string());
        }
        if let Some(status) = error.status() {
            return PortalError::Http {
                status: status.as_u16(),
                message: error.to_string(),
            };
        }
        PortalError::Network(error.to_string())
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(error: serde_json::Error) -> Self {
        PortalError::Decode(error.to_string())
    }
}

impl From<std::io::Error> for PortalError {
    fn from(error: std::io::Error) -> Self {
        PortalError::Storage(error.to_string())
    }
}

impl From<validator::ValidationErrors> for PortalError {
    fn from(errors: validator::ValidationErrors) -> Self {
        PortalError::Validation(errors.to_string())
    }
}
