//! Página de entrada: escolha de papel e login de administrador e médico

use tracing::{error, info, warn};

use crate::api::ApiResult;
use crate::bindings::{Binding, Event, Handler};
use crate::models::{AdminCredentials, Credentials};
use crate::session::{Role, Session};
use crate::ui::{Modal, Page, Ui};
use crate::Portal;

pub const INVALID_ADMIN: &str = "Invalid admin credentials. Please try again.";
pub const INVALID_DOCTOR: &str = "Invalid doctor credentials. Please try again.";
pub const LOGIN_ERROR: &str = "Something went wrong. Please try again later.";

pub fn entry_bindings() -> Vec<Binding> {
    vec![
        Binding::new(Event::Click, "#adminLogin", Handler::OpenModal(Modal::AdminLogin)),
        Binding::new(Event::Click, "#doctorLogin", Handler::OpenModal(Modal::DoctorLogin)),
        Binding::new(Event::Click, "#patientRole", Handler::SelectPatient),
        Binding::new(Event::Click, "#adminLoginSubmit", Handler::SubmitAdminLogin),
        Binding::new(Event::Click, "#doctorLoginSubmit", Handler::SubmitDoctorLogin),
    ]
}

/// Painel de destino de cada papel após o login
pub fn dashboard_for(role: Role) -> Page {
    match role {
        Role::Admin => Page::AdminDashboard,
        Role::Doctor => Page::DoctorDashboard,
        Role::LoggedPatient => Page::LoggedPatientDashboard,
        Role::Patient | Role::Anonymous => Page::PatientDashboard,
    }
}

/// Entra como paciente sem login (painel público)
pub fn select_patient(session: &Session, ui: &dyn Ui) {
    if let Err(e) = session.set_role(Role::Patient) {
        error!("Falha ao gravar o papel de paciente: {}", e);
    }
    ui.navigate(Page::PatientDashboard);
}

pub async fn admin_login(portal: &Portal, username: &str, password: &str, ui: &dyn Ui) -> bool {
    let credentials = AdminCredentials {
        username: username.to_string(),
        password: password.to_string(),
    };
    let result = portal.api.admin_login(&credentials).await;
    finish_login(&portal.session, Role::Admin, result, INVALID_ADMIN, ui)
}

pub async fn doctor_login(portal: &Portal, email: &str, password: &str, ui: &dyn Ui) -> bool {
    let credentials = Credentials {
        email: email.to_string(),
        password: password.to_string(),
    };
    let result = portal.api.doctor_login(&credentials).await;
    finish_login(&portal.session, Role::Doctor, result, INVALID_DOCTOR, ui)
}

/// Grava token e papel e segue para o painel; falhas só alertam
pub(crate) fn finish_login(
    session: &Session,
    role: Role,
    result: ApiResult<String>,
    invalid: &str,
    ui: &dyn Ui,
) -> bool {
    let token = match result {
        ApiResult {
            success: true,
            data: Some(token),
            ..
        } => token,
        ApiResult { message, .. } => {
            warn!("Login de {} recusado: {}", role, message);
            ui.alert(invalid);
            return false;
        }
    };

    if let Err(e) = session.login(role, &token) {
        error!("Falha ao gravar a sessão de {}: {}", role, e);
        ui.alert(LOGIN_ERROR);
        return false;
    }

    info!("Login de {} concluído", role);
    ui.navigate(dashboard_for(role));
    true
}
