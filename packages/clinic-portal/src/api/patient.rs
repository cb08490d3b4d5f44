//! Operações do recurso `/patient`

use reqwest::Method;

use super::{field, list_field, ApiGateway, ApiResult, Messages};
use crate::models::{Appointment, AppointmentStatus, Credentials, NewPatient, Patient, NO_FILTER};
use crate::session::Role;

const PATIENT: &str = "patient";

impl ApiGateway {
    /// `POST /patient`
    pub async fn patient_signup(&self, patient: &NewPatient) -> ApiResult<()> {
        self.call(
            self.request(Method::POST, &[PATIENT]).json(patient),
            Messages {
                success: "Sign up successful",
                failure: "An error occurred while signing up.",
            },
        )
        .await
        .map(drop)
    }

    /// `POST /patient/login`; `data` é o token
    pub async fn patient_login(&self, credentials: &Credentials) -> ApiResult<String> {
        self.call_json(
            self.request(Method::POST, &[PATIENT, "login"]).json(credentials),
            Messages {
                success: "Login successful.",
                failure: "Invalid credentials!",
            },
            field("token"),
        )
        .await
    }

    /// `GET /patient/{token}`
    pub async fn get_patient(&self, token: &str) -> ApiResult<Patient> {
        self.call_json(
            self.request(Method::GET, &[PATIENT, token]),
            Messages {
                success: "Patient loaded.",
                failure: "Error fetching patient details.",
            },
            field("patient"),
        )
        .await
    }

    /// `GET /patient/{id}/{user}/{token}`, compartilhado por paciente e médico
    pub async fn patient_appointments(
        &self,
        patient_id: i64,
        user: Role,
        token: &str,
    ) -> ApiResult<Vec<Appointment>> {
        let id = patient_id.to_string();
        let user = match user {
            Role::Doctor => "doctor",
            _ => "patient",
        };
        self.call_json(
            self.request(Method::GET, &[PATIENT, &id, user, token]),
            Messages {
                success: "Appointments loaded.",
                failure: "Error fetching appointments.",
            },
            list_field("appointments"),
        )
        .await
    }

    /// `GET /patient/filter/{condition}/{name}/{token}`, com `"null"` nos ausentes
    pub async fn filter_patient_appointments(
        &self,
        condition: Option<AppointmentStatus>,
        doctor_name: Option<&str>,
        token: &str,
    ) -> ApiResult<Vec<Appointment>> {
        let condition = condition.map_or(NO_FILTER, AppointmentStatus::condition);
        let name = doctor_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(NO_FILTER);
        self.call_json(
            self.request(Method::GET, &[PATIENT, "filter", condition, name, token]),
            Messages {
                success: "Appointments filtered.",
                failure: "Something went wrong!",
            },
            list_field("appointments"),
        )
        .await
    }
}
