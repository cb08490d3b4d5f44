//! Ligações declarativas de eventos
//!
//! Cada página monta sua lista `(evento, seletor, handler)` uma vez; o host
//! registra os ouvintes a partir dela e os testes a enumeram sem DOM.

use crate::ui::{Modal, Page};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    Click,
    Input,
    Change,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    /// Recalcula o filtro de médicos e busca de novo
    FilterDoctors,
    /// Busca por nome de paciente na tabela do médico
    SearchPatient,
    PickDate,
    Today,
    OpenModal(Modal),
    /// Entrada como paciente anônimo
    SelectPatient,
    /// Botão de ação de um cartão (delete / book)
    CardAction,
    SubmitAdminLogin,
    SubmitDoctorLogin,
    SubmitPatientLogin,
    SubmitPatientSignup,
    SubmitAddDoctor,
    SubmitProfile,
    ConfirmBooking,
    Logout,
    LogoutPatient,
    Profile,
    Navigate(Page),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub event: Event,
    pub selector: &'static str,
    pub handler: Handler,
}

impl Binding {
    pub const fn new(event: Event, selector: &'static str, handler: Handler) -> Self {
        Self {
            event,
            selector,
            handler,
        }
    }
}

/// Handler ligado a `(event, selector)`, se houver
pub fn resolve(bindings: &[Binding], event: Event, selector: &str) -> Option<Handler> {
    bindings
        .iter()
        .find(|b| b.event == event && b.selector == selector)
        .map(|b| b.handler)
}

/// Filtros da lista de médicos (painéis do administrador e do paciente)
pub fn doctor_filter_bindings() -> Vec<Binding> {
    vec![
        Binding::new(Event::Input, "#searchBar", Handler::FilterDoctors),
        Binding::new(Event::Change, "#filterTime", Handler::FilterDoctors),
        Binding::new(Event::Change, "#filterSpecialty", Handler::FilterDoctors),
        Binding::new(Event::Click, ".doctor-card button", Handler::CardAction),
    ]
}
