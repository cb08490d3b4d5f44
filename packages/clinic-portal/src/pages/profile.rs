//! Perfil do médico

use tracing::{info, warn};

use crate::bindings::{Binding, Event, Handler};
use crate::chrome::{bootstrap, PageLoad};
use crate::models::Doctor;
use crate::ui::{Page, Ui};
use crate::Portal;

pub const NO_TOKEN: &str = "No authentication token found.";
pub const PROFILE_UPDATED: &str = "The profile has been updated.";

pub fn load(portal: &Portal, ui: &dyn Ui) -> Option<PageLoad> {
    let mut load = bootstrap(Page::Profile, &portal.session, ui)?;
    load.bindings.push(Binding::new(
        Event::Click,
        "#profile-submit-btn",
        Handler::SubmitProfile,
    ));
    Some(load)
}

/// Envia o perfil editado; em caso de sucesso volta ao painel
pub async fn update_profile(portal: &Portal, doctor: &Doctor, ui: &dyn Ui) -> bool {
    let Some(token) = portal.session.token() else {
        ui.alert(NO_TOKEN);
        return false;
    };

    let result = portal.api.update_doctor(doctor, &token).await;
    if !result.success {
        warn!("Atualização do perfil {} falhou: {}", doctor.id, result.message);
        ui.alert(&result.message);
        return false;
    }

    info!("Perfil do médico {} atualizado", doctor.id);
    ui.alert(PROFILE_UPDATED);
    ui.navigate(Page::DoctorDashboard);
    true
}
