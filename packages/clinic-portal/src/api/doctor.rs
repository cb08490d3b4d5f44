//! Operações do recurso `/doctor`

use chrono::NaiveDate;
use reqwest::Method;
use serde_json::Value;
use tracing::info;

use super::{field, list_field, ApiGateway, ApiResult, Messages};
use crate::models::{Credentials, Doctor, DoctorFilter, NewDoctor};
use crate::session::Role;

const DOCTOR: &str = "doctor";

impl ApiGateway {
    /// `GET /doctor`
    pub async fn get_doctors(&self) -> ApiResult<Vec<Doctor>> {
        self.call_json(
            self.request(Method::GET, &[DOCTOR]),
            Messages {
                success: "Doctors loaded.",
                failure: "Failed to fetch doctors.",
            },
            list_field("doctors"),
        )
        .await
    }

    /// `GET /doctor/filter/{name}/{time}/{specialty}`, com `"null"` nos ausentes
    pub async fn filter_doctors(&self, filter: &DoctorFilter) -> ApiResult<Vec<Doctor>> {
        let [name, time, specialty] = filter.path_segments();
        self.call_json(
            self.request(Method::GET, &[DOCTOR, "filter", name, time, specialty]),
            Messages {
                success: "Doctors filtered.",
                failure: "Could not retrieve filtered doctor list.",
            },
            list_field("doctors"),
        )
        .await
    }

    /// `POST /doctor/save/{token}`
    pub async fn save_doctor(&self, doctor: &NewDoctor, token: &str) -> ApiResult<()> {
        let result = self
            .call(
                self.request(Method::POST, &[DOCTOR, "save", token]).json(doctor),
                Messages {
                    success: "Doctor saved.",
                    failure: "Failed to save doctor.",
                },
            )
            .await;
        if result.success {
            info!("Médico {} cadastrado", doctor.email);
        }
        result.map(drop)
    }

    /// `DELETE /doctor/delete/{doctorId}/{token}`
    pub async fn delete_doctor(&self, doctor_id: i64, token: &str) -> ApiResult<()> {
        let id = doctor_id.to_string();
        let result = self
            .call(
                self.request(Method::DELETE, &[DOCTOR, "delete", &id, token]),
                Messages {
                    success: "Doctor deleted.",
                    failure: "Unable to delete doctor due to an error.",
                },
            )
            .await;
        if result.success {
            info!("Médico {} excluído", doctor_id);
        }
        result.map(drop)
    }

    /// `PUT /doctor/{token}`; devolve o médico atualizado quando o corpo o traz
    pub async fn update_doctor(&self, doctor: &Doctor, token: &str) -> ApiResult<Option<Doctor>> {
        self.call(
            self.request(Method::PUT, &[DOCTOR, token]).json(doctor),
            Messages {
                success: "The profile has been updated.",
                failure: "Failed to update profile.",
            },
        )
        .await
        .map(updated_doctor)
    }

    /// `POST /doctor/login`; `data` é o token
    pub async fn doctor_login(&self, credentials: &Credentials) -> ApiResult<String> {
        self.call_json(
            self.request(Method::POST, &[DOCTOR, "login"]).json(credentials),
            Messages {
                success: "Login successful.",
                failure: "Invalid doctor credentials. Please try again.",
            },
            field("token"),
        )
        .await
    }

    /// `GET /doctor/availability/{user}/{doctorId}/{date}/{token}`
    pub async fn doctor_availability(
        &self,
        user: Role,
        doctor_id: i64,
        date: NaiveDate,
        token: &str,
    ) -> ApiResult<Vec<String>> {
        let id = doctor_id.to_string();
        let date = date.format("%Y-%m-%d").to_string();
        let user = match user {
            Role::Doctor => "doctor",
            Role::Admin => "admin",
            _ => "patient",
        };
        self.call_json(
            self.request(Method::GET, &[DOCTOR, "availability", user, &id, &date, token]),
            Messages {
                success: "Availability loaded.",
                failure: "Could not load doctor availability.",
            },
            |body| body,
        )
        .await
    }
}

fn updated_doctor(body: Value) -> Option<Doctor> {
    let candidate = match body.get("doctor") {
        Some(doctor) => doctor.clone(),
        None => body,
    };
    serde_json::from_value(candidate).ok()
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::gateway;
    use crate::models::{Credentials, Doctor, DoctorFilter, NewDoctor};
    use crate::session::Role;
    use chrono::NaiveDate;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn doctor_json(id: i64, name: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "email": format!("{}@clinica.med.br", id),
            "phone": "1199998888",
            "specialty": "Cardiology",
            "availableTimes": ["09:00-10:00"]
        })
    }

    #[tokio::test]
    async fn test_get_doctors_keeps_backend_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/doctor"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "doctors": [doctor_json(3, "C"), doctor_json(1, "A"), doctor_json(2, "B")]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = gateway(&server.uri()).get_doctors().await;
        assert!(result.success);
        let ids: Vec<i64> = result.data.unwrap().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn test_missing_doctors_key_is_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/doctor"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let result = gateway(&server.uri()).get_doctors().await;
        assert!(result.success);
        assert_eq!(result.data, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_filter_uses_sentinel_for_absent_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/doctor/filter/null/null/Cardiology"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"doctors": []})))
            .expect(1)
            .mount(&server)
            .await;

        let filter = DoctorFilter::from_inputs("", "", "Cardiology");
        let result = gateway(&server.uri()).filter_doctors(&filter).await;
        assert!(result.success);
        assert_eq!(result.data, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_filter_percent_encodes_free_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/doctor/filter/Ana%20Souza/AM/null"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "doctors": [doctor_json(1, "Ana Souza")]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let filter = DoctorFilter::from_inputs("Ana Souza", "AM", "");
        let result = gateway(&server.uri()).filter_doctors(&filter).await;
        assert_eq!(result.data.map(|d| d.len()), Some(1));
    }

    #[tokio::test]
    async fn test_delete_reports_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/doctor/delete/7/tok"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"message": "doctor not found"})),
            )
            .mount(&server)
            .await;

        let result = gateway(&server.uri()).delete_doctor(7, "tok").await;
        assert!(!result.success);
        assert_eq!(result.message, "doctor not found");
    }

    #[tokio::test]
    async fn test_save_doctor_posts_available_times() {
        let server = MockServer::start().await;
        let form = NewDoctor {
            name: "Ana".to_string(),
            email: "ana@clinica.med.br".to_string(),
            phone: "1199998888".to_string(),
            password: "segredo1".to_string(),
            specialty: "Cardiology".to_string(),
            available_times: vec!["09:00-10:00".to_string()],
        };
        Mock::given(method("POST"))
            .and(path("/doctor/save/tok"))
            .and(body_json(json!({
                "name": "Ana",
                "email": "ana@clinica.med.br",
                "phone": "1199998888",
                "password": "segredo1",
                "specialty": "Cardiology",
                "availableTimes": ["09:00-10:00"]
            })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({"message": "doctor has been saved"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = gateway(&server.uri()).save_doctor(&form, "tok").await;
        assert!(result.success);
        assert_eq!(result.message, "doctor has been saved");
    }

    #[tokio::test]
    async fn test_update_doctor_reads_updated_record() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/doctor/tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(doctor_json(4, "Novo Nome")))
            .mount(&server)
            .await;

        let doctor: Doctor = serde_json::from_value(doctor_json(4, "Antigo")).unwrap();
        let result = gateway(&server.uri()).update_doctor(&doctor, "tok").await;
        assert!(result.success);
        assert_eq!(result.data.flatten().map(|d| d.name), Some("Novo Nome".to_string()));
    }

    #[tokio::test]
    async fn test_doctor_login_returns_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/doctor/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "jwt-doc"})))
            .mount(&server)
            .await;

        let credentials = Credentials {
            email: "ana@clinica.med.br".to_string(),
            password: "segredo1".to_string(),
        };
        let result = gateway(&server.uri()).doctor_login(&credentials).await;
        assert_eq!(result.data.as_deref(), Some("jwt-doc"));
    }

    #[tokio::test]
    async fn test_doctor_login_without_token_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/doctor/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let credentials = Credentials {
            email: "x@y.z".to_string(),
            password: "p".to_string(),
        };
        let result = gateway(&server.uri()).doctor_login(&credentials).await;
        assert!(!result.success);
    }

    #[tokio::test]
    async fn test_availability_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/doctor/availability/patient/5/2026-10-19/tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(["09:00-10:00"])))
            .expect(1)
            .mount(&server)
            .await;

        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let result = gateway(&server.uri())
            .doctor_availability(Role::LoggedPatient, 5, date, "tok")
            .await;
        assert_eq!(result.data, Some(vec!["09:00-10:00".to_string()]));
    }
}
