//! Cartão de médico

use super::Card;
use crate::dom::Element;
use crate::models::Doctor;
use crate::session::{Role, SessionState};

/// Ação oferecida pelo botão do cartão
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAction {
    /// Administrador: confirmar e excluir o médico
    Delete { doctor_id: i64, doctor_name: String },
    /// Paciente sem login: só pede para entrar
    PromptLogin,
    /// Paciente autenticado: abre o overlay de agendamento
    Book { doctor: Doctor },
}

impl CardAction {
    pub fn label(&self) -> &'static str {
        match self {
            CardAction::Delete { .. } => "Delete",
            CardAction::PromptLogin | CardAction::Book { .. } => "Book Now",
        }
    }

    fn button_class(&self) -> &'static str {
        match self {
            CardAction::Delete { .. } => "adminBtn",
            CardAction::PromptLogin | CardAction::Book { .. } => "button",
        }
    }
}

/// Chave do cartão de um médico no contêiner
pub fn doctor_key(doctor_id: i64) -> String {
    format!("doctor-{}", doctor_id)
}

/// Monta o cartão de um médico para a sessão atual
pub fn doctor_card(doctor: &Doctor, session: &SessionState) -> Card {
    let action = match session.role {
        Role::Admin => Some(CardAction::Delete {
            doctor_id: doctor.id,
            doctor_name: doctor.name.clone(),
        }),
        Role::Patient => Some(CardAction::PromptLogin),
        Role::LoggedPatient => Some(CardAction::Book {
            doctor: doctor.clone(),
        }),
        Role::Doctor | Role::Anonymous => None,
    };

    let availability = if doctor.available_times.is_empty() {
        "Not listed".to_string()
    } else {
        doctor.available_times.join(", ")
    };

    let info = Element::new("div")
        .class("doctor-info")
        .child(Element::new("h3").text(doctor.name.as_str()))
        .child(Element::new("p").text(format!("Specialty: {}", doctor.specialty)))
        .child(Element::new("p").text(format!("Email: {}", doctor.email)))
        .child(Element::new("p").text(format!("Available: {}", availability)));

    let mut actions = Element::new("div").class("card-actions");
    if let Some(action) = &action {
        actions = actions.child(
            Element::new("button")
                .class(action.button_class())
                .attr("data-doctor-id", doctor.id.to_string())
                .text(action.label()),
        );
    }

    let key = doctor_key(doctor.id);
    Card {
        node: Element::new("div")
            .class("doctor-card")
            .attr("data-key", key.as_str())
            .child(info)
            .child(actions),
        key,
        action,
    }
}
