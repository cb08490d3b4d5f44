//! Overlay de agendamento do paciente autenticado

use chrono::NaiveDate;

use crate::dom::Element;
use crate::error::PortalError;
use crate::models::{AppointmentRequest, AppointmentStatus, Doctor, EntityRef, Patient};

/// Overlay aberto pelo botão "Book Now", semeado com médico e paciente
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingOverlay {
    pub doctor: Doctor,
    pub patient: Patient,
}

impl BookingOverlay {
    pub fn new(doctor: Doctor, patient: Patient) -> Self {
        Self { doctor, patient }
    }

    /// Monta o pedido para `date` no horário `slot` (ex.: `09:00-10:00`)
    pub fn request(&self, date: NaiveDate, slot: &str) -> Result<AppointmentRequest, PortalError> {
        if !self.doctor.available_times.iter().any(|t| t == slot) {
            return Err(PortalError::Validation(format!(
                "Horário {} indisponível para {}",
                slot, self.doctor.name
            )));
        }

        let start = slot.split('-').next().unwrap_or(slot).trim();
        Ok(AppointmentRequest {
            doctor: EntityRef { id: self.doctor.id },
            patient: EntityRef { id: self.patient.id },
            appointment_time: format!("{}T{}:00", date.format("%Y-%m-%d"), start),
            status: AppointmentStatus::Scheduled,
        })
    }

    pub fn render(&self) -> Element {
        let slots = self.doctor.available_times.iter().map(|slot| {
            Element::new("option")
                .attr("value", slot.as_str())
                .text(slot.as_str())
        });

        Element::new("div")
            .class("modalApp")
            .id("bookingOverlay")
            .child(Element::new("h2").text("Book Appointment"))
            .child(
                Element::new("input")
                    .class("input-field")
                    .attr("value", self.patient.name.as_str())
                    .attr("disabled", "true"),
            )
            .child(
                Element::new("input")
                    .class("input-field")
                    .attr("value", self.doctor.name.as_str())
                    .attr("disabled", "true"),
            )
            .child(
                Element::new("input")
                    .class("input-field")
                    .attr("value", self.doctor.specialty.as_str())
                    .attr("disabled", "true"),
            )
            .child(Element::new("input").attr("type", "date").id("appointment-date"))
            .child(Element::new("select").id("appointment-time").children(slots))
            .child(Element::new("button").class("confirm-booking").text("Confirm Booking"))
    }
}
