//! Console do portal da clínica
//!
//! Cada subcomando corresponde a uma página ou ação do portal web. A sessão
//! persiste em `CLINIC_SESSION_FILE` entre execuções.

mod terminal;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use clinic_portal::actions::ActionOutcome;
use clinic_portal::chrome::{self, bootstrap};
use clinic_portal::models::{AppointmentStatus, Doctor, DoctorFilter, NewDoctor, NewPatient};
use clinic_portal::pages::admin::AdminDashboard;
use clinic_portal::pages::doctor::DoctorDashboard;
use clinic_portal::pages::patient::{PatientAppointments, PatientDashboard};
use clinic_portal::pages::{login, profile};
use clinic_portal::render::card::doctor_key;
use clinic_portal::session::Role;
use clinic_portal::ui::Page;
use clinic_portal::{init_portal, Portal, PortalConfig};

use terminal::TerminalUi;

#[derive(Parser)]
#[command(name = "clinic-console")]
#[command(about = "Portal da clínica pelo terminal")]
struct Cli {
    /// Logs em JSON
    #[arg(long, global = true)]
    json_logs: bool,

    /// Responde "sim" a todas as confirmações
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Login de administrador, médico ou paciente
    Login {
        #[arg(value_enum)]
        role: LoginRole,
        /// Usuário (admin) ou email
        #[arg(short, long)]
        user: String,
        #[arg(short, long)]
        password: String,
    },
    /// Encerra a sessão atual
    Logout,
    /// Entra como paciente sem login
    Browse,
    /// Cadastro de paciente
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        phone: String,
        #[arg(long, default_value = "")]
        address: String,
    },
    /// Lista de médicos, com filtros opcionais
    Doctors {
        #[arg(long, default_value = "")]
        name: String,
        /// AM ou PM
        #[arg(long, default_value = "")]
        time: String,
        #[arg(long, default_value = "")]
        specialty: String,
    },
    /// Cadastra um médico (administrador)
    AddDoctor {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        specialty: String,
        /// Horários, ex.: 09:00-10:00
        #[arg(long = "slot")]
        slots: Vec<String>,
    },
    /// Exclui um médico (administrador)
    Delete {
        #[arg(long)]
        id: i64,
    },
    /// Consultas do dia (médico)
    Appointments {
        /// Data no formato AAAA-MM-DD; padrão é hoje
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, default_value = "")]
        patient: String,
    },
    /// Atualiza o perfil do médico
    Profile {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        specialty: String,
        #[arg(long = "slot")]
        slots: Vec<String>,
    },
    /// Horários livres de um médico em uma data
    Availability {
        #[arg(long)]
        doctor_id: i64,
        #[arg(long)]
        date: NaiveDate,
    },
    /// Agenda uma consulta (paciente autenticado)
    Book {
        #[arg(long)]
        doctor_id: i64,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        slot: String,
    },
    /// Consultas do paciente autenticado
    MyAppointments {
        #[arg(long, value_enum)]
        condition: Option<Condition>,
        #[arg(long, default_value = "")]
        doctor: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LoginRole {
    Admin,
    Doctor,
    Patient,
}

#[derive(Clone, Copy, ValueEnum)]
enum Condition {
    Future,
    Past,
}

impl From<Condition> for AppointmentStatus {
    fn from(condition: Condition) -> Self {
        match condition {
            Condition::Future => AppointmentStatus::Scheduled,
            Condition::Past => AppointmentStatus::Completed,
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config = PortalConfig::from_env().context("Configuração inválida")?;
    let portal = init_portal(config).context("Falha ao inicializar o portal")?;
    let ui = TerminalUi::stdio(portal.config.routes.clone(), cli.yes);

    run(cli.command, &portal, &ui).await
}

async fn run(command: Commands, portal: &Portal, ui: &TerminalUi) -> Result<()> {
    match command {
        Commands::Login {
            role,
            user,
            password,
        } => {
            let ok = match role {
                LoginRole::Admin => login::admin_login(portal, &user, &password, ui).await,
                LoginRole::Doctor => login::doctor_login(portal, &user, &password, ui).await,
                LoginRole::Patient => {
                    PatientDashboard::public()
                        .login(portal, &user, &password, ui)
                        .await
                }
            };
            if !ok {
                bail!("Login recusado");
            }
        }
        Commands::Logout => match portal.session.role() {
            Role::LoggedPatient => chrome::logout_patient(&portal.session, ui),
            _ => chrome::logout(&portal.session, ui),
        },
        Commands::Browse => login::select_patient(&portal.session, ui),
        Commands::Signup {
            name,
            email,
            password,
            phone,
            address,
        } => {
            let form = NewPatient {
                name,
                email,
                password,
                phone,
                address,
            };
            if !PatientDashboard::public().signup(portal, &form, ui).await {
                bail!("Cadastro recusado");
            }
        }
        Commands::Doctors {
            name,
            time,
            specialty,
        } => {
            let filter = DoctorFilter::from_inputs(&name, &time, &specialty);
            let html = match portal.session.role() {
                Role::Admin => {
                    let page = AdminDashboard::new();
                    page.load(portal, ui).await.context("Sessão inválida")?;
                    if !filter.is_empty() {
                        page.filter(portal, &filter, ui).await;
                    }
                    page.directory.list.to_html()
                }
                role => {
                    let page = patient_page(role);
                    page.load(portal, ui).await.context("Sessão inválida")?;
                    if !filter.is_empty() {
                        page.filter(portal, &filter, ui).await;
                    }
                    page.directory.list.to_html()
                }
            };
            println!("{}", html);
        }
        Commands::AddDoctor {
            name,
            email,
            phone,
            password,
            specialty,
            slots,
        } => {
            let form = NewDoctor {
                name,
                email,
                phone,
                password,
                specialty,
                available_times: slots,
            };
            let page = AdminDashboard::new();
            bootstrap(Page::AdminDashboard, &portal.session, ui).context("Sessão inválida")?;
            if !page.add_doctor(portal, &form, ui).await {
                bail!("Cadastro do médico falhou");
            }
        }
        Commands::Delete { id } => {
            let page = AdminDashboard::new();
            page.load(portal, ui).await.context("Sessão inválida")?;
            let outcome = page
                .card_clicked(portal, &doctor_key(id), ui)
                .await
                .ok_or_else(|| anyhow!("Médico {} não está na lista", id))?;
            expect_outcome(outcome, ActionOutcome::Deleted)?;
            println!("{}", page.directory.list.to_html());
        }
        Commands::Appointments { date, patient } => {
            let page = DoctorDashboard::new(date.unwrap_or_else(|| Local::now().date_naive()));
            page.load(portal, ui).await.context("Sessão inválida")?;
            if !patient.trim().is_empty() {
                page.on_search(portal, &patient, ui).await;
            }
            println!("{}", page.list.to_html());
        }
        Commands::Profile {
            id,
            name,
            email,
            phone,
            specialty,
            slots,
        } => {
            profile::load(portal, ui).context("Sessão inválida")?;
            let doctor = Doctor {
                id,
                name,
                email,
                phone,
                specialty,
                available_times: slots,
            };
            if !profile::update_profile(portal, &doctor, ui).await {
                bail!("Atualização do perfil falhou");
            }
        }
        Commands::Availability { doctor_id, date } => {
            let state = portal.session.validate()?;
            let token = state.token.unwrap_or_default();
            let result = portal
                .api
                .doctor_availability(state.role, doctor_id, date, &token)
                .await;
            match result.data {
                Some(slots) if result.success => {
                    for slot in slots {
                        println!("{}", slot);
                    }
                }
                _ => bail!("{}", result.message),
            }
        }
        Commands::Book {
            doctor_id,
            date,
            slot,
        } => {
            let page = PatientDashboard::logged();
            page.load(portal, ui).await.context("Sessão inválida")?;
            let outcome = page
                .card_clicked(portal, &doctor_key(doctor_id), ui)
                .await
                .ok_or_else(|| anyhow!("Médico {} não está na lista", doctor_id))?;
            expect_outcome(outcome, ActionOutcome::BookingOpened)?;

            let overlay = ui
                .take_booking()
                .ok_or_else(|| anyhow!("Overlay de agendamento não foi aberto"))?;
            let outcome = page.confirm_booking(portal, &overlay, date, &slot, ui).await;
            expect_outcome(outcome, ActionOutcome::Booked)?;
            info!("Consulta com {} em {} {}", overlay.doctor.name, date, slot);
        }
        Commands::MyAppointments { condition, doctor } => {
            let page = PatientAppointments::new();
            page.load(portal, ui).await.context("Sessão inválida")?;
            if condition.is_some() || !doctor.trim().is_empty() {
                let outcome = page
                    .filter(portal, condition.map(Into::into), &doctor, ui)
                    .await;
                if outcome.is_none() {
                    bail!("Sessão expirada");
                }
            }
            println!("{}", page.list.to_html());
        }
    }

    Ok(())
}

fn patient_page(role: Role) -> PatientDashboard {
    match role {
        Role::LoggedPatient => PatientDashboard::logged(),
        _ => PatientDashboard::public(),
    }
}

fn expect_outcome(outcome: ActionOutcome, expected: ActionOutcome) -> Result<()> {
    if outcome != expected {
        bail!("Ação terminou em {:?}", outcome);
    }
    Ok(())
}
