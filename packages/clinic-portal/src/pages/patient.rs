//! Painéis do paciente: público, autenticado e lista de consultas

use chrono::NaiveDate;
use tracing::{info, warn};
use validator::Validate;

use super::login::finish_login;
use super::DoctorDirectory;
use crate::actions::{submit_booking, ActionOutcome, SESSION_EXPIRED_ACTION};
use crate::bindings::{doctor_filter_bindings, Binding, Event, Handler};
use crate::booking::BookingOverlay;
use crate::chrome::{bootstrap, require_token, PageLoad};
use crate::listing::{ListController, ListOutcome};
use crate::models::{Appointment, AppointmentStatus, Credentials, DoctorFilter, NewPatient};
use crate::session::Role;
use crate::ui::{Page, Ui};
use crate::Portal;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials!";

/// Lista de médicos vista pelo paciente, com ou sem login
pub struct PatientDashboard {
    page: Page,
    pub directory: DoctorDirectory,
}

impl PatientDashboard {
    /// Painel público (papel `patient`)
    pub fn public() -> Self {
        Self {
            page: Page::PatientDashboard,
            directory: DoctorDirectory::new(),
        }
    }

    /// Painel do paciente autenticado (papel `loggedPatient`)
    pub fn logged() -> Self {
        Self {
            page: Page::LoggedPatientDashboard,
            directory: DoctorDirectory::new(),
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn bindings(load: &PageLoad) -> Vec<Binding> {
        let mut bindings = load.bindings.clone();
        bindings.extend(doctor_filter_bindings());
        match load.session.role {
            Role::LoggedPatient => bindings.push(Binding::new(
                Event::Click,
                ".confirm-booking",
                Handler::ConfirmBooking,
            )),
            _ => bindings.extend([
                Binding::new(Event::Click, "#patientLoginSubmit", Handler::SubmitPatientLogin),
                Binding::new(Event::Click, "#patientSignupSubmit", Handler::SubmitPatientSignup),
            ]),
        }
        bindings
    }

    pub async fn load(&self, portal: &Portal, ui: &dyn Ui) -> Option<(PageLoad, ListOutcome)> {
        let load = bootstrap(self.page, &portal.session, ui)?;
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

    pub async fn confirm_booking(
        &self,
        portal: &Portal,
        overlay: &BookingOverlay,
        date: NaiveDate,
        slot: &str,
        ui: &dyn Ui,
    ) -> ActionOutcome {
        submit_booking(overlay, date, slot, &portal.session, &portal.api, ui).await
    }

    /// Cadastro; a mensagem do servidor é sempre mostrada
    pub async fn signup(&self, portal: &Portal, form: &NewPatient, ui: &dyn Ui) -> bool {
        if let Err(e) = form.validate() {
            warn!("Formulário de cadastro inválido: {}", e);
            ui.alert(&e.to_string());
            return false;
        }

        let result = portal.api.patient_signup(form).await;
        ui.alert(&result.message);
        if result.success {
            info!("Paciente {} cadastrado", form.email);
            ui.close_modal();
            ui.reload();
        }
        result.success
    }

    pub async fn login(&self, portal: &Portal, email: &str, password: &str, ui: &dyn Ui) -> bool {
        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        let result = portal.api.patient_login(&credentials).await;
        finish_login(
            &portal.session,
            Role::LoggedPatient,
            result,
            INVALID_CREDENTIALS,
            ui,
        )
    }
}

pub const NO_PATIENT_APPOINTMENTS: &str = "No appointments found.";

/// Consultas do paciente autenticado
pub struct PatientAppointments {
    pub list: ListController<Appointment>,
}

impl Default for PatientAppointments {
    fn default() -> Self {
        Self::new()
    }
}

impl PatientAppointments {
    pub fn new() -> Self {
        Self {
            list: ListController::with_empty_text(NO_PATIENT_APPOINTMENTS),
        }
    }

    /// Busca o paciente pelo token e depois as consultas dele
    pub async fn load(&self, portal: &Portal, ui: &dyn Ui) -> Option<(PageLoad, ListOutcome)> {
        let load = bootstrap(Page::PatientAppointments, &portal.session, ui)?;
        let token = require_token(&portal.session, ui, SESSION_EXPIRED_ACTION)?;

        let fetched = portal.api.get_patient(&token).await;
        let Some(patient) = fetched.data.filter(|_| fetched.success) else {
            warn!("Paciente não encontrado para o token: {}", fetched.message);
            ui.alert(&fetched.message);
            return None;
        };

        let outcome = self
            .list
            .refresh(
                portal
                    .api
                    .patient_appointments(patient.id, Role::LoggedPatient, &token),
                &load.session,
                ui,
            )
            .await;
        Some((load, outcome))
    }

    /// Filtra por situação (`future`/`past`) e nome do médico
    pub async fn filter(
        &self,
        portal: &Portal,
        status: Option<AppointmentStatus>,
        doctor_name: &str,
        ui: &dyn Ui,
    ) -> Option<ListOutcome> {
        let token = require_token(&portal.session, ui, SESSION_EXPIRED_ACTION)?;
        let state = portal.session.get();
        let outcome = self
            .list
            .refresh(
                portal
                    .api
                    .filter_patient_appointments(status, Some(doctor_name), &token),
                &state,
                ui,
            )
            .await;
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::ListView;
    use crate::pages::test_support::portal;
    use crate::ui::MockUi;
    use mockall::predicate::eq;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_public_dashboard_prompts_login_on_cards() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/doctor"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "doctors": [{"id": 4, "name": "Carla"}]
            })))
            .mount(&server)
            .await;

        let portal = portal(&server.uri());
        portal.session.set_role(Role::Patient).unwrap();
        let page = PatientDashboard::public();
        let mut ui = MockUi::new();
        ui.expect_alert().times(1).return_const(());

        let (load, outcome) = page.load(&portal, &ui).await.unwrap();
        assert_eq!(outcome, ListOutcome::Rendered(ListView::Populated(1)));
        assert!(PatientDashboard::bindings(&load)
            .iter()
            .any(|b| b.handler == Handler::SubmitPatientLogin));
        assert_eq!(
            page.card_clicked(&portal, "doctor-4", &ui).await,
            Some(ActionOutcome::LoginPrompted)
        );
    }

    #[tokio::test]
    async fn test_login_switches_to_logged_patient() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/patient/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "p-tok"})))
            .mount(&server)
            .await;

        let portal = portal(&server.uri());
        portal.session.set_role(Role::Patient).unwrap();
        let mut ui = MockUi::new();
        ui.expect_navigate()
            .with(eq(Page::LoggedPatientDashboard))
            .times(1)
            .return_const(());

        assert!(PatientDashboard::public()
            .login(&portal, "jo@mail.com", "secret", &ui)
            .await);
        assert_eq!(portal.session.role(), Role::LoggedPatient);
        assert_eq!(portal.session.token().as_deref(), Some("p-tok"));
    }

    #[tokio::test]
    async fn test_login_failure_alerts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let portal = portal(&server.uri());
        let mut ui = MockUi::new();
        ui.expect_alert()
            .with(eq(INVALID_CREDENTIALS))
            .times(1)
            .return_const(());

        assert!(!PatientDashboard::public()
            .login(&portal, "jo@mail.com", "bad", &ui)
            .await);
    }

    #[tokio::test]
    async fn test_signup_shows_server_message_and_reloads() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/patient"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "message": "Signup successful"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let portal = portal(&server.uri());
        let mut ui = MockUi::new();
        ui.expect_alert()
            .with(eq("Signup successful"))
            .times(1)
            .return_const(());
        ui.expect_close_modal().times(1).return_const(());
        ui.expect_reload().times(1).return_const(());

        let form = NewPatient {
            name: "Joana".to_string(),
            email: "jo@mail.com".to_string(),
            password: "secret1".to_string(),
            phone: "1234567890".to_string(),
            address: "Rua A, 10".to_string(),
        };
        assert!(PatientDashboard::public().signup(&portal, &form, &ui).await);
    }

    #[tokio::test]
    async fn test_appointments_load_by_patient_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/patient/p-tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "patient": {"id": 7, "name": "Joana"}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/patient/7/patient/p-tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "appointments": [{
                    "patientId": 7, "patientName": "Joana", "doctorId": 2,
                    "date": "2026-10-20", "status": 0
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let portal = portal(&server.uri());
        portal.session.login(Role::LoggedPatient, "p-tok").unwrap();
        let page = PatientAppointments::new();
        let ui = MockUi::new();

        let (_, outcome) = page.load(&portal, &ui).await.unwrap();
        assert_eq!(outcome, ListOutcome::Rendered(ListView::Populated(1)));
        assert!(page.list.to_html().contains("pending"));
    }

    #[tokio::test]
    async fn test_appointments_filter_by_condition_uses_own_empty_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/patient/filter/past/null/p-tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"appointments": []})))
            .expect(1)
            .mount(&server)
            .await;

        let portal = portal(&server.uri());
        portal.session.login(Role::LoggedPatient, "p-tok").unwrap();
        let ui = MockUi::new();

        let page = PatientAppointments::new();
        let outcome = page
            .filter(&portal, Some(AppointmentStatus::Completed), "  ", &ui)
            .await;
        assert_eq!(outcome, Some(ListOutcome::Rendered(ListView::Empty)));

        let html = page.list.to_html();
        assert!(html.contains(NO_PATIENT_APPOINTMENTS));
        assert!(!html.contains("for today"));
    }
}
