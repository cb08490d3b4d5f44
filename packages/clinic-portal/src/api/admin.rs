//! Operações do recurso `/admin`

use reqwest::Method;

use super::{field, ApiGateway, ApiResult, Messages};
use crate::models::AdminCredentials;

impl ApiGateway {
    /// `POST /admin/login`; `data` é o token
    pub async fn admin_login(&self, credentials: &AdminCredentials) -> ApiResult<String> {
        self.call_json(
            self.request(Method::POST, &["admin", "login"]).json(credentials),
            Messages {
                success: "Login successful.",
                failure: "Invalid admin credentials. Please try again.",
            },
            field("token"),
        )
        .await
    }
}
