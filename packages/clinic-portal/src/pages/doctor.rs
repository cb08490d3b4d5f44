//! Painel do médico: tabela de consultas do dia

use std::cell::RefCell;

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::actions::SESSION_EXPIRED_ACTION;
use crate::bindings::{Binding, Event, Handler};
use crate::chrome::{bootstrap, require_token, PageLoad};
use crate::listing::{ListController, ListOutcome};
use crate::models::{Appointment, AppointmentFilter};
use crate::ui::{Page, Ui};
use crate::Portal;

pub struct DoctorDashboard {
    filter: RefCell<AppointmentFilter>,
    pub list: ListController<Appointment>,
}

impl Default for DoctorDashboard {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}

impl DoctorDashboard {
    /// Painel aberto em `today`, sem filtro de nome
    pub fn new(today: NaiveDate) -> Self {
        Self {
            filter: RefCell::new(AppointmentFilter::new(today, "")),
            list: ListController::new(),
        }
    }

    pub fn filter(&self) -> AppointmentFilter {
        self.filter.borrow().clone()
    }

    pub fn bindings(load: &PageLoad) -> Vec<Binding> {
        let mut bindings = load.bindings.clone();
        bindings.extend([
            Binding::new(Event::Input, "#searchBar", Handler::SearchPatient),
            Binding::new(Event::Click, "#todayBtn", Handler::Today),
            Binding::new(Event::Change, "#datePicker", Handler::PickDate),
        ]);
        bindings
    }

    pub async fn load(&self, portal: &Portal, ui: &dyn Ui) -> Option<(PageLoad, ListOutcome)> {
        let load = bootstrap(Page::DoctorDashboard, &portal.session, ui)?;
        let outcome = self.reload(portal, ui).await?;
        Some((load, outcome))
    }

    /// Campo de busca por nome do paciente
    pub async fn on_search(&self, portal: &Portal, input: &str, ui: &dyn Ui) -> Option<ListOutcome> {
        let date = self.filter.borrow().date;
        *self.filter.borrow_mut() = AppointmentFilter::new(date, input);
        self.reload(portal, ui).await
    }

    /// Botão "hoje"
    pub async fn on_today(&self, portal: &Portal, today: NaiveDate, ui: &dyn Ui) -> Option<ListOutcome> {
        self.on_date(portal, today, ui).await
    }

    /// Seletor de data
    pub async fn on_date(&self, portal: &Portal, date: NaiveDate, ui: &dyn Ui) -> Option<ListOutcome> {
        self.filter.borrow_mut().date = date;
        self.reload(portal, ui).await
    }

    async fn reload(&self, portal: &Portal, ui: &dyn Ui) -> Option<ListOutcome> {
        let token = require_token(&portal.session, ui, SESSION_EXPIRED_ACTION)?;
        let filter = self.filter();
        debug!("Consultas de {} (paciente: {:?})", filter.date, filter.patient_name);

        let state = portal.session.get();
        let outcome = self
            .list
            .refresh(portal.api.list_appointments(&filter, &token), &state, ui)
            .await;
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::ListView;
    use crate::pages::test_support::portal;
    use crate::session::Role;
    use crate::ui::MockUi;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[tokio::test]
    async fn test_load_uses_today_and_no_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/appointments/2026-10-19/null/d-tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"appointments": []})))
            .expect(1)
            .mount(&server)
            .await;

        let portal = portal(&server.uri());
        portal.session.login(Role::Doctor, "d-tok").unwrap();
        let page = DoctorDashboard::new(day(19));
        let ui = MockUi::new();

        let (load, outcome) = page.load(&portal, &ui).await.unwrap();
        assert_eq!(outcome, ListOutcome::Rendered(ListView::Empty));
        assert!(page.list.to_html().contains("No Appointments found for today."));
        assert!(DoctorDashboard::bindings(&load)
            .iter()
            .any(|b| b.handler == Handler::Today));
    }

    #[tokio::test]
    async fn test_search_and_date_update_state() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/appointments/2026-10-19/Joana/d-tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "appointments": [{
                    "patientId": 7, "patientName": "Joana", "doctorId": 2,
                    "date": "2026-10-19", "status": 1
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/appointments/2026-10-21/Joana/d-tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"appointments": []})))
            .expect(1)
            .mount(&server)
            .await;

        let portal = portal(&server.uri());
        portal.session.login(Role::Doctor, "d-tok").unwrap();
        let page = DoctorDashboard::new(day(19));
        let ui = MockUi::new();

        let outcome = page.on_search(&portal, " Joana ", &ui).await;
        assert_eq!(outcome, Some(ListOutcome::Rendered(ListView::Populated(1))));
        assert!(page.list.to_html().contains("consulted"));

        let outcome = page.on_date(&portal, day(21), &ui).await;
        assert_eq!(outcome, Some(ListOutcome::Rendered(ListView::Empty)));
        assert_eq!(page.filter(), AppointmentFilter::new(day(21), "Joana"));
    }

    #[tokio::test]
    async fn test_backend_error_shows_error_row() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let portal = portal(&server.uri());
        portal.session.login(Role::Doctor, "d-tok").unwrap();
        let page = DoctorDashboard::new(day(19));
        let mut ui = MockUi::new();
        ui.expect_alert().times(1).return_const(());

        let outcome = page.on_today(&portal, day(19), &ui).await;
        assert_eq!(outcome, Some(ListOutcome::Rendered(ListView::Failed)));
        assert!(page
            .list
            .to_html()
            .contains("Error loading appointments. Try again later."));
    }
}
