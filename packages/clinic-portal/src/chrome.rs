//! Cabeçalho e rodapé por papel, carga de página e ações de sessão

use tracing::{error, warn};

use crate::bindings::{Binding, Event, Handler};
use crate::dom::Element;
use crate::session::{Role, Session, SessionState};
use crate::ui::{Modal, Page, Ui};

pub const SESSION_EXPIRED: &str = "Session expired or invalid login. Please log in again.";

/// Resultado de uma carga de página bem-sucedida
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLoad {
    pub session: SessionState,
    pub header: Element,
    pub bindings: Vec<Binding>,
}

/// Roda em toda carga de página, antes de qualquer renderização por papel
///
/// A página de entrada zera a sessão. As demais validam o invariante; se ele
/// estiver violado a sessão é limpa, o usuário é levado à entrada e nada é
/// renderizado.
pub fn bootstrap(page: Page, session: &Session, ui: &dyn Ui) -> Option<PageLoad> {
    if !page.is_protected() {
        if let Err(e) = session.reset() {
            error!("Falha ao zerar a sessão na entrada: {}", e);
        }
        return Some(PageLoad {
            session: SessionState::default(),
            header: render_header(Role::Anonymous),
            bindings: Vec::new(),
        });
    }

    match session.validate() {
        Ok(state) => Some(PageLoad {
            header: render_header(state.role),
            bindings: header_bindings(state.role),
            session: state,
        }),
        Err(e) => {
            warn!("Carga de {:?} com sessão inválida: {}", page, e);
            ui.alert(SESSION_EXPIRED);
            force_entry(session, ui);
            None
        }
    }
}

/// Token da sessão ou, se ausente, alerta com `message` e volta à entrada
pub fn require_token(session: &Session, ui: &dyn Ui, message: &str) -> Option<String> {
    match session.validate().ok().and_then(|state| state.token) {
        Some(token) => Some(token),
        None => {
            ui.alert(message);
            force_entry(session, ui);
            None
        }
    }
}

/// Limpa a sessão e volta para a entrada (falha de autenticação)
pub fn force_entry(session: &Session, ui: &dyn Ui) {
    if let Err(e) = session.clear() {
        error!("Falha ao limpar a sessão: {}", e);
    }
    ui.navigate(Page::Entry);
}

fn logo() -> Element {
    Element::new("div")
        .class("logo-section")
        .child(
            Element::new("img")
                .attr("src", "../assets/images/logo/logo.png")
                .attr("alt", "Hospital CRM Logo")
                .class("logo-img"),
        )
        .child(Element::new("span").class("logo-title").text("Hospital CMS"))
}

fn button(id: &str, label: &str) -> Element {
    Element::new("button").id(id).class("adminBtn").text(label)
}

fn link(id: &str, label: &str) -> Element {
    Element::new("a").attr("href", "#").id(id).text(label)
}

pub fn render_header(role: Role) -> Element {
    let header = Element::new("header").class("header").child(logo());

    let nav = match role {
        Role::Anonymous => return header,
        Role::Admin => vec![button("addDocBtn", "Add Doctor"), link("logoutBtn", "Logout")],
        Role::Doctor => vec![
            button("doctorHome", "Home"),
            link("profileBtn", "Profile"),
            link("logoutBtn", "Logout"),
        ],
        Role::Patient => vec![
            button("patientLogin", "Login"),
            button("patientSignup", "Sign Up"),
        ],
        Role::LoggedPatient => vec![
            button("home", "Home"),
            button("patientAppointments", "Appointments"),
            link("logoutPatientBtn", "Logout"),
        ],
    };

    header.child(Element::new("nav").children(nav))
}

/// Ligações do cabeçalho para o papel
pub fn header_bindings(role: Role) -> Vec<Binding> {
    match role {
        Role::Anonymous => Vec::new(),
        Role::Admin => vec![
            Binding::new(Event::Click, "#addDocBtn", Handler::OpenModal(Modal::AddDoctor)),
            Binding::new(Event::Click, "#logoutBtn", Handler::Logout),
        ],
        Role::Doctor => vec![
            Binding::new(
                Event::Click,
                "#doctorHome",
                Handler::Navigate(Page::DoctorDashboard),
            ),
            Binding::new(Event::Click, "#profileBtn", Handler::Profile),
            Binding::new(Event::Click, "#logoutBtn", Handler::Logout),
        ],
        Role::Patient => vec![
            Binding::new(
                Event::Click,
                "#patientLogin",
                Handler::OpenModal(Modal::PatientLogin),
            ),
            Binding::new(
                Event::Click,
                "#patientSignup",
                Handler::OpenModal(Modal::PatientSignup),
            ),
        ],
        Role::LoggedPatient => vec![
            Binding::new(
                Event::Click,
                "#home",
                Handler::Navigate(Page::LoggedPatientDashboard),
            ),
            Binding::new(
                Event::Click,
                "#patientAppointments",
                Handler::Navigate(Page::PatientAppointments),
            ),
            Binding::new(Event::Click, "#logoutPatientBtn", Handler::LogoutPatient),
        ],
    }
}

pub fn render_footer(year: i32) -> Element {
    let column = |title: &str, links: &[(&str, &str)]| {
        Element::new("div")
            .class("footer-column")
            .child(Element::new("h4").text(title))
            .children(
                links
                    .iter()
                    .map(|(href, label)| Element::new("a").attr("href", *href).text(*label)),
            )
    };

    Element::new("footer").class("footer").child(
        Element::new("div")
            .class("footer-content")
            .child(
                Element::new("div")
                    .class("footer-logo")
                    .child(
                        Element::new("img")
                            .attr("src", "/assets/images/logo/logo.png")
                            .attr("alt", "Clinic Logo"),
                    )
                    .child(
                        Element::new("p")
                            .text(format!("© {} MediClinic. All rights reserved.", year)),
                    ),
            )
            .child(
                Element::new("div")
                    .class("footer-links")
                    .child(column(
                        "Company",
                        &[
                            ("/about.html", "About"),
                            ("/careers.html", "Careers"),
                            ("/press.html", "Press"),
                        ],
                    ))
                    .child(column(
                        "Support",
                        &[
                            ("/account.html", "Account"),
                            ("/help.html", "Help Center"),
                            ("/contact.html", "Contact"),
                        ],
                    ))
                    .child(column(
                        "Legal",
                        &[
                            ("/terms.html", "Terms"),
                            ("/privacy.html", "Privacy Policy"),
                            ("/licensing.html", "Licensing"),
                        ],
                    )),
            ),
    )
}

/// Logout de administrador e médico
pub fn logout(session: &Session, ui: &dyn Ui) {
    if let Err(e) = session.logout() {
        error!("Falha no logout: {}", e);
    }
    ui.navigate(Page::Entry);
}

/// Logout do paciente: volta ao painel público mantendo o papel de paciente
pub fn logout_patient(session: &Session, ui: &dyn Ui) {
    if let Err(e) = session.logout_patient() {
        error!("Falha no logout do paciente: {}", e);
    }
    ui.navigate(Page::PatientDashboard);
}

pub fn profile(ui: &dyn Ui) {
    ui.navigate(Page::Profile);
}

/// Despacha os handlers do cabeçalho; devolve `false` se não for um deles
pub fn handle(handler: Handler, session: &Session, ui: &dyn Ui) -> bool {
    match handler {
        Handler::Logout => logout(session, ui),
        Handler::LogoutPatient => logout_patient(session, ui),
        Handler::Profile => profile(ui),
        Handler::Navigate(page) => ui.navigate(page),
        Handler::OpenModal(modal) => ui.open_modal(modal),
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryStorage;
    use crate::ui::MockUi;
    use mockall::predicate::eq;

    #[test]
    fn test_violated_invariant_redirects_to_entry() {
        for role in [Role::Admin, Role::Doctor, Role::LoggedPatient] {
            let session = Session::new(MemoryStorage::new());
            session.set_role(role).unwrap();

            let mut ui = MockUi::new();
            ui.expect_alert()
                .with(eq(SESSION_EXPIRED))
                .times(1)
                .return_const(());
            ui.expect_navigate()
                .with(eq(Page::Entry))
                .times(1)
                .return_const(());

            assert!(bootstrap(Page::AdminDashboard, &session, &ui).is_none());
            assert_eq!(session.role(), Role::Anonymous);
        }
    }

    #[test]
    fn test_valid_session_renders_role_header() {
        let session = Session::in_memory();
        session.login(Role::Admin, "tok").unwrap();
        let ui = MockUi::new();

        let load = bootstrap(Page::AdminDashboard, &session, &ui).unwrap();
        assert_eq!(load.session.role, Role::Admin);
        assert!(load.header.find_by_id("addDocBtn").is_some());
        assert!(load.header.find_by_id("logoutBtn").is_some());
        assert_eq!(load.bindings, header_bindings(Role::Admin));
    }

    #[test]
    fn test_entry_page_resets_session() {
        let session = Session::in_memory();
        session.login(Role::Doctor, "tok").unwrap();
        let ui = MockUi::new();

        let load = bootstrap(Page::Entry, &session, &ui).unwrap();
        assert_eq!(load.session, SessionState::default());
        assert_eq!(session.get(), SessionState::default());
        assert!(load.header.find_by_id("logoutBtn").is_none());
    }

    #[test]
    fn test_header_buttons_match_bindings() {
        for role in Role::ALL {
            let header = render_header(role);
            for binding in header_bindings(role) {
                let id = binding.selector.trim_start_matches('#');
                assert!(
                    header.find_by_id(id).is_some(),
                    "{} sem elemento {}",
                    role,
                    id
                );
            }
        }
    }

    #[test]
    fn test_logout_clears_and_redirects() {
        let session = Session::in_memory();
        session.login(Role::Doctor, "tok").unwrap();
        let mut ui = MockUi::new();
        ui.expect_navigate()
            .with(eq(Page::Entry))
            .times(1)
            .return_const(());

        assert!(handle(Handler::Logout, &session, &ui));
        assert_eq!(session.get(), SessionState::default());
    }

    #[test]
    fn test_logout_patient_keeps_patient_context() {
        let session = Session::in_memory();
        session.login(Role::LoggedPatient, "tok").unwrap();
        let mut ui = MockUi::new();
        ui.expect_navigate()
            .with(eq(Page::PatientDashboard))
            .times(1)
            .return_const(());

        logout_patient(&session, &ui);
        assert_eq!(session.role(), Role::Patient);
        assert_eq!(session.token(), None);
        assert!(session.token_cookie().is_none());
    }

    #[test]
    fn test_profile_does_not_touch_session() {
        let session = Session::in_memory();
        session.login(Role::Doctor, "tok").unwrap();
        let mut ui = MockUi::new();
        ui.expect_navigate()
            .with(eq(Page::Profile))
            .times(1)
            .return_const(());

        assert!(handle(Handler::Profile, &session, &ui));
        assert_eq!(session.role(), Role::Doctor);
        assert_eq!(session.token().as_deref(), Some("tok"));
    }

    #[test]
    fn test_footer_year() {
        assert!(render_footer(2026)
            .text_content()
            .contains("© 2026 MediClinic. All rights reserved."));
    }
}
