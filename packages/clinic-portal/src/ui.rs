//! Fronteira com o host (navegador, terminal)
//!
//! O portal nunca manipula a janela diretamente: alertas, confirmações,
//! navegação e overlays passam por [`Ui`].

use serde::{Deserialize, Serialize};

use crate::booking::BookingOverlay;

/// Páginas navegáveis do portal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    /// Página de entrada (escolha de papel e login de admin/médico)
    Entry,
    AdminDashboard,
    DoctorDashboard,
    Profile,
    PatientDashboard,
    LoggedPatientDashboard,
    PatientAppointments,
}

impl Page {
    /// Páginas que exigem sessão consistente antes de renderizar
    pub fn is_protected(self) -> bool {
        !matches!(self, Page::Entry)
    }
}

/// Caminhos de cada página
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routes {
    pub entry: String,
    pub admin_dashboard: String,
    pub doctor_dashboard: String,
    pub profile: String,
    pub patient_dashboard: String,
    pub logged_patient_dashboard: String,
    pub patient_appointments: String,
}

impl Default for Routes {
    fn default() -> Self {
        Self {
            entry: "/".to_string(),
            admin_dashboard: "/adminDashboard".to_string(),
            doctor_dashboard: "/doctorDashboard".to_string(),
            profile: "/profile".to_string(),
            patient_dashboard: "/pages/patientDashboard.html".to_string(),
            logged_patient_dashboard: "/pages/loggedPatientDashboard.html".to_string(),
            patient_appointments: "/pages/patientAppointments.html".to_string(),
        }
    }
}

impl Routes {
    pub fn path(&self, page: Page) -> &str {
        match page {
            Page::Entry => &self.entry,
            Page::AdminDashboard => &self.admin_dashboard,
            Page::DoctorDashboard => &self.doctor_dashboard,
            Page::Profile => &self.profile,
            Page::PatientDashboard => &self.patient_dashboard,
            Page::LoggedPatientDashboard => &self.logged_patient_dashboard,
            Page::PatientAppointments => &self.patient_appointments,
        }
    }
}

/// Modais abertos pelas ligações de eventos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modal {
    AdminLogin,
    DoctorLogin,
    AddDoctor,
    PatientLogin,
    PatientSignup,
}

/// Interação com o usuário
#[cfg_attr(test, mockall::automock)]
pub trait Ui {
    /// Alerta bloqueante
    fn alert(&self, message: &str);
    /// Confirmação sim/não
    fn confirm(&self, message: &str) -> bool;
    fn navigate(&self, page: Page);
    fn reload(&self);
    fn open_modal(&self, modal: Modal);
    fn close_modal(&self);
    fn open_booking(&self, overlay: BookingOverlay);
}
