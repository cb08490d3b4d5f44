//! Execução das ações dos cartões e do overlay de agendamento

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::api::ApiGateway;
use crate::booking::BookingOverlay;
use crate::chrome::require_token;
use crate::listing::ListController;
use crate::models::Doctor;
use crate::render::card::doctor_key;
use crate::render::CardAction;
use crate::session::Session;
use crate::ui::Ui;

pub const LOGIN_TO_BOOK: &str = "Please log in to book an appointment.";
pub const SESSION_EXPIRED_ACTION: &str = "Session expired. Please log in again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Usuário não confirmou
    Cancelled,
    Deleted,
    DeleteFailed,
    LoginPrompted,
    BookingOpened,
    BookingFailed,
    Booked,
    /// Token ausente: sessão limpa e usuário levado à entrada
    SessionExpired,
}

/// Executa a ação do botão de um cartão de médico
pub async fn run_card_action(
    action: &CardAction,
    list: &ListController<Doctor>,
    session: &Session,
    api: &ApiGateway,
    ui: &dyn Ui,
) -> ActionOutcome {
    match action {
        CardAction::Delete {
            doctor_id,
            doctor_name,
        } => delete_doctor(*doctor_id, doctor_name, list, session, api, ui).await,
        CardAction::PromptLogin => {
            ui.alert(LOGIN_TO_BOOK);
            ActionOutcome::LoginPrompted
        }
        CardAction::Book { doctor } => open_booking(doctor, session, api, ui).await,
    }
}

async fn delete_doctor(
    doctor_id: i64,
    doctor_name: &str,
    list: &ListController<Doctor>,
    session: &Session,
    api: &ApiGateway,
    ui: &dyn Ui,
) -> ActionOutcome {
    if !ui.confirm(&format!("Are you sure you want to delete Dr. {}?", doctor_name)) {
        return ActionOutcome::Cancelled;
    }

    let Some(token) = require_token(session, ui, SESSION_EXPIRED_ACTION) else {
        return ActionOutcome::SessionExpired;
    };

    let result = api.delete_doctor(doctor_id, &token).await;
    if result.success {
        list.remove(&doctor_key(doctor_id));
        ui.alert("Doctor deleted successfully.");
        ActionOutcome::Deleted
    } else {
        warn!("Exclusão do médico {} falhou: {}", doctor_id, result.message);
        ui.alert(&format!("Failed to delete doctor: {}", result.message));
        ActionOutcome::DeleteFailed
    }
}

async fn open_booking(
    doctor: &Doctor,
    session: &Session,
    api: &ApiGateway,
    ui: &dyn Ui,
) -> ActionOutcome {
    let Some(token) = require_token(session, ui, SESSION_EXPIRED_ACTION) else {
        return ActionOutcome::SessionExpired;
    };

    let result = api.get_patient(&token).await;
    match result.data {
        Some(patient) if result.success => {
            ui.open_booking(BookingOverlay::new(doctor.clone(), patient));
            ActionOutcome::BookingOpened
        }
        _ => {
            warn!("Dados do paciente indisponíveis: {}", result.message);
            ui.alert("Unable to book appointment. Please try again.");
            ActionOutcome::BookingFailed
        }
    }
}

/// Confirma o agendamento escolhido no overlay
pub async fn submit_booking(
    overlay: &BookingOverlay,
    date: NaiveDate,
    slot: &str,
    session: &Session,
    api: &ApiGateway,
    ui: &dyn Ui,
) -> ActionOutcome {
    let Some(token) = require_token(session, ui, SESSION_EXPIRED_ACTION) else {
        return ActionOutcome::SessionExpired;
    };

    let request = match overlay.request(date, slot) {
        Ok(request) => request,
        Err(e) => {
            warn!("Pedido de agendamento inválido: {}", e);
            ui.alert("Please choose one of the available time slots.");
            return ActionOutcome::BookingFailed;
        }
    };

    let result = api.book_appointment(&request, &token).await;
    ui.alert(&result.message);
    if result.success {
        info!("Paciente {} agendou com {}", overlay.patient.id, overlay.doctor.id);
        ui.close_modal();
        ActionOutcome::Booked
    } else {
        ActionOutcome::BookingFailed
    }
}
