//! Painel do administrador: lista de médicos, cadastro e exclusão

use tracing::{info, warn};
use validator::Validate;

use super::DoctorDirectory;
use crate::actions::ActionOutcome;
use crate::bindings::{doctor_filter_bindings, Binding, Event, Handler};
use crate::chrome::{bootstrap, require_token, PageLoad};
use crate::listing::ListOutcome;
use crate::models::{DoctorFilter, NewDoctor};
use crate::ui::{Page, Ui};
use crate::Portal;

pub const UNAUTHORIZED: &str = "Unauthorized. Please log in as admin.";

#[derive(Default)]
pub struct AdminDashboard {
    pub directory: DoctorDirectory,
}

impl AdminDashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bindings(load: &PageLoad) -> Vec<Binding> {
        let mut bindings = load.bindings.clone();
        bindings.extend(doctor_filter_bindings());
        bindings.push(Binding::new(
            Event::Click,
            "#saveDoctorBtn",
            Handler::SubmitAddDoctor,
        ));
        bindings
    }

    /// Carga da página: valida a sessão e busca a lista completa
    pub async fn load(&self, portal: &Portal, ui: &dyn Ui) -> Option<(PageLoad, ListOutcome)> {
        let load = bootstrap(Page::AdminDashboard, &portal.session, ui)?;
        let outcome = self.directory.load(portal, &load.session, ui).await;
        Some((load, outcome))
    }

    pub async fn filter(&self, portal: &Portal, filter: &DoctorFilter, ui: &dyn Ui) -> ListOutcome {
        let state = portal.session.get();
        self.directory.filter(portal, filter, &state, ui).await
    }

    pub async fn card_clicked(&self, portal: &Portal, key: &str, ui: &dyn Ui) -> Option<ActionOutcome> {
        self.directory.card_clicked(portal, key, ui).await
    }

    /// Cadastra um médico a partir do formulário do modal
    pub async fn add_doctor(&self, portal: &Portal, form: &NewDoctor, ui: &dyn Ui) -> bool {
        if let Err(e) = form.validate() {
            warn!("Formulário de médico inválido: {}", e);
            ui.alert(&format!("Error: {}", e));
            return false;
        }

        let Some(token) = require_token(&portal.session, ui, UNAUTHORIZED) else {
            return false;
        };

        let result = portal.api.save_doctor(form, &token).await;
        if result.success {
            info!("Médico {} cadastrado", form.email);
            ui.alert("Doctor added successfully!");
            ui.close_modal();
            ui.reload();
            true
        } else {
            ui.alert(&format!("Error: {}", result.message));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::ListView;
    use crate::pages::test_support::portal;
    use crate::session::Role;
    use crate::ui::MockUi;
    use mockall::predicate::eq;
    use serde_json::json;
    use wiremock::matchers::{any, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn form() -> NewDoctor {
        NewDoctor {
            name: "Dr. Ana".to_string(),
            email: "ana@clinic.com".to_string(),
            phone: "1234567890".to_string(),
            password: "secret1".to_string(),
            specialty: "Cardiology".to_string(),
            available_times: vec!["09:00-10:00".to_string()],
        }
    }

    #[tokio::test]
    async fn test_load_renders_delete_cards() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/doctor"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "doctors": [{"id": 1, "name": "Ana"}, {"id": 2, "name": "Bruno"}]
            })))
            .mount(&server)
            .await;

        let portal = portal(&server.uri());
        portal.session.login(Role::Admin, "tok").unwrap();
        let page = AdminDashboard::new();
        let ui = MockUi::new();

        let (load, outcome) = page.load(&portal, &ui).await.unwrap();
        assert_eq!(outcome, ListOutcome::Rendered(ListView::Populated(2)));
        assert!(load.header.find_by_id("addDocBtn").is_some());
        assert!(page.directory.list.to_html().contains("Delete"));
        assert!(AdminDashboard::bindings(&load)
            .iter()
            .any(|b| b.handler == Handler::SubmitAddDoctor));
    }

    #[tokio::test]
    async fn test_load_without_token_fetches_nothing() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let portal = portal(&server.uri());
        portal.session.set_role(Role::Admin).unwrap();
        let mut ui = MockUi::new();
        ui.expect_alert().times(1).return_const(());
        ui.expect_navigate()
            .with(eq(Page::Entry))
            .times(1)
            .return_const(());

        assert!(AdminDashboard::new().load(&portal, &ui).await.is_none());
    }

    #[tokio::test]
    async fn test_add_doctor_success_closes_and_reloads() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/doctor/save/tok"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "message": "Doctor added to db"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let portal = portal(&server.uri());
        portal.session.login(Role::Admin, "tok").unwrap();
        let mut ui = MockUi::new();
        ui.expect_alert()
            .with(eq("Doctor added successfully!"))
            .times(1)
            .return_const(());
        ui.expect_close_modal().times(1).return_const(());
        ui.expect_reload().times(1).return_const(());

        assert!(AdminDashboard::new().add_doctor(&portal, &form(), &ui).await);
    }

    #[tokio::test]
    async fn test_add_doctor_conflict_alerts_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "message": "Doctor already exists"
            })))
            .mount(&server)
            .await;

        let portal = portal(&server.uri());
        portal.session.login(Role::Admin, "tok").unwrap();
        let mut ui = MockUi::new();
        ui.expect_alert()
            .with(eq("Error: Doctor already exists"))
            .times(1)
            .return_const(());
        ui.expect_reload().times(0);

        assert!(!AdminDashboard::new().add_doctor(&portal, &form(), &ui).await);
    }

    #[tokio::test]
    async fn test_add_doctor_invalid_form_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let portal = portal(&server.uri());
        portal.session.login(Role::Admin, "tok").unwrap();
        let mut ui = MockUi::new();
        ui.expect_alert()
            .withf(|message: &str| message.starts_with("Error: "))
            .times(1)
            .return_const(());

        let mut bad = form();
        bad.phone = "123".to_string();
        assert!(!AdminDashboard::new().add_doctor(&portal, &bad, &ui).await);
    }
}
