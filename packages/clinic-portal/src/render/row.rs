//! Linha da tabela de consultas do médico

use super::Card;
use crate::dom::Element;
use crate::models::{Appointment, AppointmentStatus};

/// Número de colunas da tabela (id, nome, telefone, email)
pub const APPOINTMENT_COLUMNS: usize = 4;

/// Monta a linha de uma consulta; linhas não têm ação
pub fn appointment_row(appointment: &Appointment) -> Card {
    let status_class = match appointment.status {
        AppointmentStatus::Scheduled => "patient-row pending",
        AppointmentStatus::Completed => "patient-row consulted",
    };

    let key = format!("appointment-{}-{}", appointment.patient_id, appointment.date);
    let node = Element::new("tr")
        .class(status_class)
        .attr("data-key", key.as_str())
        .child(
            Element::new("td")
                .class("patient-id")
                .text(appointment.patient_id.to_string()),
        )
        .child(Element::new("td").text(appointment.patient_name.as_str()))
        .child(Element::new("td").text(appointment.patient_phone.as_str()))
        .child(Element::new("td").text(appointment.patient_email.as_str()));

    Card {
        key,
        node,
        action: None,
    }
}

/// Linha única de aviso ocupando toda a largura da tabela
pub fn message_row(text: &str) -> Element {
    Element::new("tr").child(
        Element::new("td")
            .attr("colspan", APPOINTMENT_COLUMNS.to_string())
            .text(text),
    )
}
