//! Operações do recurso `/appointments`

use reqwest::Method;
use tracing::info;

use super::{list_field, ApiGateway, ApiResult, Messages};
use crate::models::{Appointment, AppointmentFilter, AppointmentRequest, NO_FILTER};

const APPOINTMENTS: &str = "appointments";

impl ApiGateway {
    /// `GET /appointments/{date}/{patientName}/{token}`
    pub async fn list_appointments(
        &self,
        filter: &AppointmentFilter,
        token: &str,
    ) -> ApiResult<Vec<Appointment>> {
        let date = filter.date.format("%Y-%m-%d").to_string();
        let name = filter.patient_name.as_deref().unwrap_or(NO_FILTER);
        self.call_json(
            self.request(Method::GET, &[APPOINTMENTS, &date, name, token]),
            Messages {
                success: "Appointments loaded.",
                failure: "Error loading appointments. Try again later.",
            },
            list_field("appointments"),
        )
        .await
    }

    /// `POST /appointments/{token}`
    pub async fn book_appointment(&self, request: &AppointmentRequest, token: &str) -> ApiResult<()> {
        let result = self
            .call(
                self.request(Method::POST, &[APPOINTMENTS, token]).json(request),
                Messages {
                    success: "The appointment has been booked.",
                    failure: "There was an issue saving the appointment",
                },
            )
            .await;
        if result.success {
            info!(
                "Consulta agendada: médico {} em {}",
                request.doctor.id, request.appointment_time
            );
        }
        result.map(drop)
    }
}
