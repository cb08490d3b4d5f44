//! Modelos de dados trocados com o backend da clínica
//!
//! Os campos seguem o formato JSON do backend (camelCase). O portal trata
//! médicos e consultas como dados imutáveis de exibição.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use validator::Validate;

/// Literal reservado que representa "sem filtro" nos caminhos de aridade fixa
pub const NO_FILTER: &str = "null";

/// Médico como devolvido pelo backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    /// Identificador usado para exclusão e agendamento
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub specialty: String,
    /// Horários disponíveis, na ordem devolvida pelo backend
    #[serde(default)]
    pub available_times: Vec<String>,
}

/// Formulário de cadastro de médico (painel do administrador)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewDoctor {
    #[validate(length(min = 1, message = "nome obrigatório"))]
    pub name: String,
    #[validate(email(message = "email inválido"))]
    pub email: String,
    #[validate(length(equal = 10, message = "telefone deve ter 10 dígitos"))]
    pub phone: String,
    #[validate(length(min = 6, message = "senha muito curta"))]
    pub password: String,
    #[validate(length(min = 1, message = "especialidade obrigatória"))]
    pub specialty: String,
    pub available_times: Vec<String>,
}

/// Paciente como devolvido por `GET /patient/{token}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

/// Formulário de cadastro de paciente
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    #[validate(length(min = 1, message = "nome obrigatório"))]
    pub name: String,
    #[validate(email(message = "email inválido"))]
    pub email: String,
    #[validate(length(min = 6, message = "senha muito curta"))]
    pub password: String,
    #[validate(length(equal = 10, message = "telefone deve ter 10 dígitos"))]
    pub phone: String,
    pub address: String,
}

/// Credenciais do administrador
#[derive(Debug, Clone, Serialize)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

/// Credenciais de médico e paciente
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Status possíveis de uma consulta
///
/// O backend grava o status como inteiro (0 agendada, 1 concluída).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentStatus {
    /// Agendada, aguardando atendimento
    Scheduled,
    /// Consulta realizada
    Completed,
}

impl AppointmentStatus {
    pub fn code(self) -> i32 {
        match self {
            AppointmentStatus::Scheduled => 0,
            AppointmentStatus::Completed => 1,
        }
    }

    /// Valor de `condition` aceito por `/patient/filter`
    pub fn condition(self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "future",
            AppointmentStatus::Completed => "past",
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "pending"),
            AppointmentStatus::Completed => write!(f, "consulted"),
        }
    }
}

impl Serialize for AppointmentStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.code())
    }
}

impl<'de> Deserialize<'de> for AppointmentStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Code(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Code(0) => Ok(AppointmentStatus::Scheduled),
            Raw::Code(1) => Ok(AppointmentStatus::Completed),
            Raw::Text(text) => match text.as_str() {
                "0" | "pending" | "scheduled" => Ok(AppointmentStatus::Scheduled),
                "1" | "consulted" | "completed" => Ok(AppointmentStatus::Completed),
                other => Err(serde::de::Error::custom(format!(
                    "Valor de status inválido: {}",
                    other
                ))),
            },
            Raw::Code(other) => Err(serde::de::Error::custom(format!(
                "Valor de status inválido: {}",
                other
            ))),
        }
    }
}

/// Consulta como exibida nas tabelas do médico e do paciente
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub patient_id: i64,
    pub patient_name: String,
    #[serde(default)]
    pub patient_phone: String,
    #[serde(default)]
    pub patient_email: String,
    pub doctor_id: i64,
    /// Data (ou data e hora) da consulta, como enviada pelo backend
    pub date: String,
    pub status: AppointmentStatus,
}

/// Referência por id usada no corpo do agendamento
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRef {
    pub id: i64,
}

/// Corpo de `POST /appointments/{token}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRequest {
    pub doctor: EntityRef,
    pub patient: EntityRef,
    /// `YYYY-MM-DDTHH:MM:00`
    pub appointment_time: String,
    pub status: AppointmentStatus,
}

/// Critérios de filtro da lista de médicos
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorFilter {
    pub name: Option<String>,
    pub time: Option<String>,
    pub specialty: Option<String>,
}

impl DoctorFilter {
    /// Monta o filtro a partir dos valores crus dos campos do formulário
    pub fn from_inputs(name: &str, time: &str, specialty: &str) -> Self {
        Self {
            name: non_blank(name),
            time: non_blank(time),
            specialty: non_blank(specialty),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.time.is_none() && self.specialty.is_none()
    }

    /// Segmentos `{name}/{time}/{specialty}`, com o sentinela nos ausentes
    pub fn path_segments(&self) -> [&str; 3] {
        [
            self.name.as_deref().unwrap_or(NO_FILTER),
            self.time.as_deref().unwrap_or(NO_FILTER),
            self.specialty.as_deref().unwrap_or(NO_FILTER),
        ]
    }
}

/// Critérios de filtro da tabela de consultas do médico
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentFilter {
    pub date: NaiveDate,
    pub patient_name: Option<String>,
}

impl AppointmentFilter {
    pub fn new(date: NaiveDate, patient_name: &str) -> Self {
        Self {
            date,
            patient_name: non_blank(patient_name),
        }
    }
}

/// Campo vazio ou só com espaços equivale a ausente
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
