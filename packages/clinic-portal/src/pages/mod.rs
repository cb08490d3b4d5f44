//! Páginas do portal
//!
//! Os painéis do administrador e do paciente compartilham a mesma lista de
//! médicos ([`DoctorDirectory`]); o que muda entre eles é o cabeçalho e as
//! ações que cada papel recebe nos cartões.

pub mod admin;
pub mod doctor;
pub mod login;
pub mod patient;
pub mod profile;

use tracing::debug;

use crate::actions::{run_card_action, ActionOutcome};
use crate::listing::{ListController, ListOutcome};
use crate::models::{Doctor, DoctorFilter};
use crate::session::SessionState;
use crate::ui::Ui;
use crate::Portal;

/// Lista de médicos com filtro por nome, horário e especialidade
#[derive(Default)]
pub struct DoctorDirectory {
    pub list: ListController<Doctor>,
}

impl DoctorDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Carga inicial: lista completa
    pub async fn load(&self, portal: &Portal, session: &SessionState, ui: &dyn Ui) -> ListOutcome {
        self.list
            .refresh(portal.api.get_doctors(), session, ui)
            .await
    }

    /// Nova busca com o filtro atual; filtro vazio é a lista completa
    pub async fn filter(
        &self,
        portal: &Portal,
        filter: &DoctorFilter,
        session: &SessionState,
        ui: &dyn Ui,
    ) -> ListOutcome {
        if filter.is_empty() {
            debug!("Filtro vazio, buscando todos os médicos");
            return self.load(portal, session, ui).await;
        }
        self.list
            .refresh(portal.api.filter_doctors(filter), session, ui)
            .await
    }

    /// Clique no botão do cartão `key`; `None` se o cartão não tem ação
    pub async fn card_clicked(&self, portal: &Portal, key: &str, ui: &dyn Ui) -> Option<ActionOutcome> {
        let action = self.list.action_for(key)?;
        Some(run_card_action(&action, &self.list, &portal.session, &portal.api, ui).await)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::portal;
    use super::*;
    use crate::listing::ListView;
    use crate::session::Role;
    use crate::ui::MockUi;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_empty_filter_is_the_unfiltered_call() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/doctor"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "doctors": [{"id": 1, "name": "Ana"}]
            })))
            .expect(2)
            .mount(&server)
            .await;

        let portal = portal(&server.uri());
        let directory = DoctorDirectory::new();
        let session = SessionState {
            role: Role::Patient,
            token: None,
        };
        let ui = MockUi::new();

        let loaded = directory.load(&portal, &session, &ui).await;
        let keys_after_load = directory.list.keys();
        let filtered = directory
            .filter(&portal, &DoctorFilter::from_inputs(" ", "", ""), &session, &ui)
            .await;

        assert_eq!(loaded, filtered);
        assert_eq!(filtered, ListOutcome::Rendered(ListView::Populated(1)));
        assert_eq!(directory.list.keys(), keys_after_load);
    }

    #[tokio::test]
    async fn test_card_without_action_does_nothing() {
        let server = MockServer::start().await;
        let portal = portal(&server.uri());
        let directory = DoctorDirectory::new();
        let ui = MockUi::new();
        assert!(directory.card_clicked(&portal, "doctor-1", &ui).await.is_none());
    }
}
