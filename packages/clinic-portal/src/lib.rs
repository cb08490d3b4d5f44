//! Clinic Portal - Biblioteca do portal web da clínica
//!
//! Esta biblioteca fornece:
//! - Sessão do cliente (papel e token) com invariante validado a cada página
//! - Gateway REST tipado para médicos, pacientes, administradores e consultas
//! - Controlador de listagem/filtro que descarta respostas antigas
//! - Renderização pura de cartões e linhas por papel
//! - Cabeçalho por papel, ligações declarativas de eventos e páginas

use std::path::PathBuf;
use std::time::Duration;

use tracing::info;

pub mod actions;
pub mod api;
pub mod bindings;
pub mod booking;
pub mod chrome;
pub mod dom;
pub mod error;
pub mod listing;
pub mod models;
pub mod pages;
pub mod render;
pub mod session;
pub mod ui;

use api::ApiGateway;
use error::PortalError;
use session::{FileStorage, Session, Storage};
use ui::Routes;

/// Configuração do portal
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// URL base do backend REST (inclui o prefixo da API, se houver)
    pub api_base_url: String,
    /// Timeout de cada requisição, em segundos
    pub request_timeout_secs: u64,
    /// Arquivo onde a sessão persiste entre execuções
    pub session_file: PathBuf,
    /// Caminhos das páginas
    pub routes: Routes,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            request_timeout_secs: 10,
            session_file: PathBuf::from("data/session.json"),
            routes: Routes::default(),
        }
    }
}

impl PortalConfig {
    /// Sobrepõe os padrões com `CLINIC_API_BASE_URL`, `CLINIC_REQUEST_TIMEOUT_SECS`
    /// e `CLINIC_SESSION_FILE`
    pub fn from_env() -> Result<Self, PortalError> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("CLINIC_API_BASE_URL") {
            config.api_base_url = url;
        }
        if let Ok(raw) = std::env::var("CLINIC_REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs = raw.parse().map_err(|_| {
                PortalError::Config(format!("CLINIC_REQUEST_TIMEOUT_SECS inválido: {}", raw))
            })?;
        }
        if let Ok(path) = std::env::var("CLINIC_SESSION_FILE") {
            config.session_file = PathBuf::from(path);
        }

        Ok(config)
    }
}

/// Contexto compartilhado pelas páginas: configuração, gateway e sessão
pub struct Portal {
    pub config: PortalConfig,
    pub api: ApiGateway,
    pub session: Session,
}

impl Portal {
    pub fn new(config: PortalConfig, storage: impl Storage + 'static) -> Result<Self, PortalError> {
        let api = ApiGateway::new(
            &config.api_base_url,
            Duration::from_secs(config.request_timeout_secs),
        )?;

        info!("Portal inicializado com backend {}", config.api_base_url);
        Ok(Self {
            config,
            api,
            session: Session::new(storage),
        })
    }
}

/// Inicializa o portal com a sessão persistida em `config.session_file`
pub fn init_portal(config: PortalConfig) -> Result<Portal, PortalError> {
    let storage = FileStorage::open(&config.session_file)?;
    Portal::new(config, storage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use session::{MemoryStorage, Role};
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = PortalConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.routes.entry, "/");
    }

    #[test]
    fn test_portal_rejects_bad_url() {
        let config = PortalConfig {
            api_base_url: "::".to_string(),
            ..PortalConfig::default()
        };
        assert!(matches!(
            Portal::new(config, MemoryStorage::new()),
            Err(PortalError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_init_portal_with_file_session() -> Result<(), PortalError> {
        let temp_dir = tempdir()?;
        let config = PortalConfig {
            session_file: temp_dir.path().join("session.json"),
            ..PortalConfig::default()
        };

        let portal = init_portal(config.clone())?;
        portal.session.login(Role::Admin, "tok")?;

        let again = init_portal(config)?;
        assert_eq!(again.session.role(), Role::Admin);
        Ok(())
    }
}
