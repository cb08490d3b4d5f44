//! Sessão do portal: papel e token persistidos
//!
//! Toda leitura e escrita de `userRole`, `token` e do cookie espelhado passa
//! por [`Session`]. Os fluxos de login e logout são os únicos escritores.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::PortalError;

/// Chave do papel no armazenamento
pub const ROLE_KEY: &str = "userRole";
/// Chave do token no armazenamento e nome do cookie espelhado
pub const TOKEN_KEY: &str = "token";
/// Validade do cookie de token, em segundos
pub const TOKEN_COOKIE_MAX_AGE: u32 = 3600;

/// Papel atual da sessão
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    /// Visitante que nunca escolheu papel (chave ausente)
    #[default]
    Anonymous,
    /// Paciente sem login
    Patient,
    /// Paciente autenticado
    LoggedPatient,
    Doctor,
    Admin,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Anonymous,
        Role::Patient,
        Role::LoggedPatient,
        Role::Doctor,
        Role::Admin,
    ];

    /// Valor gravado em `userRole`; `None` para o visitante anônimo
    pub fn storage_value(self) -> Option<&'static str> {
        match self {
            Role::Anonymous => None,
            Role::Patient => Some("patient"),
            Role::LoggedPatient => Some("loggedPatient"),
            Role::Doctor => Some("doctor"),
            Role::Admin => Some("admin"),
        }
    }

    /// Lê o valor armazenado; valores desconhecidos viram `Anonymous`
    pub fn from_storage(value: Option<&str>) -> Self {
        match value {
            None => Role::Anonymous,
            Some("patient") => Role::Patient,
            Some("loggedPatient") => Role::LoggedPatient,
            Some("doctor") => Role::Doctor,
            Some("admin") => Role::Admin,
            Some(other) => {
                warn!("Papel desconhecido no armazenamento: {}", other);
                Role::Anonymous
            }
        }
    }

    /// Papéis que só existem com token
    pub fn requires_token(self) -> bool {
        matches!(self, Role::LoggedPatient | Role::Doctor | Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.storage_value().unwrap_or("anonymous"))
    }
}

/// Retrato da sessão em um instante
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub role: Role,
    pub token: Option<String>,
}

impl SessionState {
    /// `true` quando o papel exige token e ele está presente (ou não exige)
    pub fn is_consistent(&self) -> bool {
        !self.role.requires_token() || self.token.is_some()
    }
}

/// Cookie como o navegador o recebe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub max_age: u32,
}

impl Cookie {
    pub fn token(value: &str) -> Self {
        Self {
            name: TOKEN_KEY.to_string(),
            value: value.to_string(),
            max_age: TOKEN_COOKIE_MAX_AGE,
        }
    }

    /// Cookie que expira o token imediatamente
    pub fn expired_token() -> Self {
        Self {
            name: TOKEN_KEY.to_string(),
            value: String::new(),
            max_age: 0,
        }
    }

    /// Forma `document.cookie` / `Set-Cookie`
    pub fn header_value(&self) -> String {
        format!(
            "{}={}; path=/; secure; SameSite=Lax; max-age={}",
            self.name, self.value, self.max_age
        )
    }
}

/// Armazenamento chave-valor persistente (equivalente ao localStorage)
pub trait Storage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), PortalError>;
    fn remove_item(&self, key: &str) -> Result<(), PortalError>;
    /// Grava um cookie; `max_age == 0` remove
    fn set_cookie(&self, cookie: &Cookie) -> Result<(), PortalError>;
    fn cookie(&self, name: &str) -> Option<Cookie>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredState {
    #[serde(default)]
    items: HashMap<String, String>,
    #[serde(default)]
    cookies: HashMap<String, Cookie>,
}

impl StoredState {
    fn apply_cookie(&mut self, cookie: &Cookie) {
        if cookie.max_age == 0 {
            self.cookies.remove(&cookie.name);
        } else {
            self.cookies.insert(cookie.name.clone(), cookie.clone());
        }
    }
}

/// Armazenamento em memória, para testes e hosts embutidos
#[derive(Debug, Default)]
pub struct MemoryStorage {
    state: RefCell<StoredState>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.state.borrow().items.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), PortalError> {
        self.state
            .borrow_mut()
            .items
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), PortalError> {
        self.state.borrow_mut().items.remove(key);
        Ok(())
    }

    fn set_cookie(&self, cookie: &Cookie) -> Result<(), PortalError> {
        self.state.borrow_mut().apply_cookie(cookie);
        Ok(())
    }

    fn cookie(&self, name: &str) -> Option<Cookie> {
        self.state.borrow().cookies.get(name).cloned()
    }
}

/// Armazenamento em arquivo JSON, persistente entre execuções
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    state: RefCell<StoredState>,
}

impl FileStorage {
    /// Abre (ou cria na primeira escrita) o arquivo de sessão
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PortalError> {
        let path = path.as_ref().to_path_buf();
        let state = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                StoredState::default()
            } else {
                serde_json::from_str(&raw).unwrap_or_else(|e| {
                    warn!(
                        "Arquivo de sessão {} corrompido, recomeçando anônimo: {}",
                        path.display(),
                        e
                    );
                    StoredState::default()
                })
            }
        } else {
            StoredState::default()
        };

        debug!("Sessão carregada de {}", path.display());
        Ok(Self {
            path,
            state: RefCell::new(state),
        })
    }

    fn flush(&self) -> Result<(), PortalError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(&*self.state.borrow())?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.state.borrow().items.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), PortalError> {
        self.state
            .borrow_mut()
            .items
            .insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove_item(&self, key: &str) -> Result<(), PortalError> {
        self.state.borrow_mut().items.remove(key);
        self.flush()
    }

    fn set_cookie(&self, cookie: &Cookie) -> Result<(), PortalError> {
        self.state.borrow_mut().apply_cookie(cookie);
        self.flush()
    }

    fn cookie(&self, name: &str) -> Option<Cookie> {
        self.state.borrow().cookies.get(name).cloned()
    }
}

/// Contexto de sessão compartilhado por todos os componentes
pub struct Session {
    storage: Box<dyn Storage>,
}

impl Session {
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self {
            storage: Box::new(storage),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    /// Leitura crua, sem validar o invariante
    pub fn get(&self) -> SessionState {
        SessionState {
            role: Role::from_storage(self.storage.get_item(ROLE_KEY).as_deref()),
            token: self
                .storage
                .get_item(TOKEN_KEY)
                .filter(|token| !token.is_empty()),
        }
    }

    pub fn role(&self) -> Role {
        self.get().role
    }

    pub fn token(&self) -> Option<String> {
        self.get().token
    }

    /// Leitura das páginas protegidas: papel com exigência de token e sem token
    /// é falha de autenticação
    pub fn validate(&self) -> Result<SessionState, PortalError> {
        let state = self.get();
        if state.is_consistent() {
            Ok(state)
        } else {
            Err(PortalError::SessionInvalid { role: state.role })
        }
    }

    pub fn set_role(&self, role: Role) -> Result<(), PortalError> {
        match role.storage_value() {
            Some(value) => self.storage.set_item(ROLE_KEY, value),
            None => self.storage.remove_item(ROLE_KEY),
        }
    }

    pub fn set_token(&self, token: &str) -> Result<(), PortalError> {
        self.storage.set_item(TOKEN_KEY, token)
    }

    /// Remove papel, token e cookie; o chamador deve navegar para a entrada
    pub fn clear(&self) -> Result<(), PortalError> {
        self.storage.remove_item(TOKEN_KEY)?;
        self.storage.set_cookie(&Cookie::expired_token())?;
        self.storage.remove_item(ROLE_KEY)?;
        debug!("Sessão limpa");
        Ok(())
    }

    /// Login bem-sucedido: token, cookie espelhado e papel
    pub fn login(&self, role: Role, token: &str) -> Result<(), PortalError> {
        self.set_token(token)?;
        self.storage.set_cookie(&Cookie::token(token))?;
        self.set_role(role)?;
        info!("Sessão iniciada como {}", role);
        Ok(())
    }

    /// Logout de administrador e médico
    pub fn logout(&self) -> Result<(), PortalError> {
        self.clear()?;
        info!("Logout concluído");
        Ok(())
    }

    /// Logout do paciente: perde o token mas continua no contexto de paciente
    pub fn logout_patient(&self) -> Result<(), PortalError> {
        self.storage.remove_item(TOKEN_KEY)?;
        self.storage.set_cookie(&Cookie::expired_token())?;
        self.set_role(Role::Patient)?;
        info!("Logout do paciente concluído");
        Ok(())
    }

    /// A página de entrada sempre começa de uma sessão anônima
    pub fn reset(&self) -> Result<(), PortalError> {
        self.storage.remove_item(ROLE_KEY)?;
        self.storage.remove_item(TOKEN_KEY)
    }

    /// Cookie de token atual, se houver
    pub fn token_cookie(&self) -> Option<Cookie> {
        self.storage.cookie(TOKEN_KEY)
    }
}
