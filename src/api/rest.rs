//! Production [`HospitalApi`] implementation over HTTP.
//!
//! Authentication follows the server's token scheme: `login/` or
//! `users/register/` returns `{token, user}`, and every subsequent request
//! carries `Authorization: Token <key>`.

use std::sync::RwLock;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use super::{ApiError, HospitalApi};
use crate::config;
use crate::models::{
    Appointment, AppointmentStatus, Bed, Bill, Doctor, EmergencyCase, InventoryItem,
    MedicalRecord, Medicine, NewAppointment, NewBill, NewMedicalRecord, NewPatientProfile,
    NewPrescription, NewUser, Patient, Prescription, User,
};
use crate::session::Session;

/// HTTP client for the hospital management server.
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    timeout_secs: u64,
    token: RwLock<Option<String>>,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct AuthResponse {
    token: String,
    user: User,
}

impl RestClient {
    /// Create a new client pointing at the given API base (".../api").
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
            token: RwLock::new(None),
        }
    }

    /// Default local server with the standard interactive timeout.
    pub fn default_local() -> Self {
        Self::new(config::DEFAULT_API_BASE, config::DEFAULT_TIMEOUT_SECS)
    }

    /// Exchange credentials for a token and install it on this client.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ApiError> {
        let auth: AuthResponse = self
            .post_json("login/", &LoginRequest { username, password })
            .await?;
        self.install_token(&auth.token);
        debug!(user = %auth.user.username, "logged in");
        Ok(Session {
            token: auth.token,
            user: auth.user,
        })
    }

    /// Register a new account. The server logs the account in and returns
    /// a token alongside the created user.
    pub async fn register(&self, user: &NewUser) -> Result<Session, ApiError> {
        let auth: AuthResponse = self.post_json("users/register/", user).await?;
        self.install_token(&auth.token);
        Ok(Session {
            token: auth.token,
            user: auth.user,
        })
    }

    /// Resume a previously persisted session.
    pub fn authenticate(&self, session: &Session) {
        self.install_token(&session.token);
    }

    /// Drop the auth token (logout).
    pub fn clear_auth(&self) {
        if let Ok(mut token) = self.token.write() {
            *token = None;
        }
    }

    fn install_token(&self, token: &str) {
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token.to_string());
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token.read() {
            Ok(guard) => match guard.as_deref() {
                Some(token) => req.header("Authorization", format!("Token {token}")),
                None => req,
            },
            Err(_) => req,
        }
    }

    fn map_send_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_connect() {
            ApiError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            ApiError::Timeout(self.timeout_secs)
        } else {
            ApiError::Transport(e.to_string())
        }
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.as_u16() == 401 {
            return Err(ApiError::Unauthenticated);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        response
            .json()
            .await
            .map_err(|e| ApiError::ResponseParsing(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .authorize(self.http.get(self.url(path)))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        Self::decode(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .authorize(self.http.post(self.url(path)))
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        Self::decode(response).await
    }

    async fn patch_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .authorize(self.http.patch(self.url(path)))
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        Self::decode(response).await
    }
}

impl HospitalApi for RestClient {
    async fn list_doctors(&self) -> Result<Vec<Doctor>, ApiError> {
        self.get_json("doctors/").await
    }

    async fn list_patients(&self) -> Result<Vec<Patient>, ApiError> {
        self.get_json("patients/").await
    }

    async fn list_beds(&self) -> Result<Vec<Bed>, ApiError> {
        self.get_json("beds/").await
    }

    async fn list_appointments(&self) -> Result<Vec<Appointment>, ApiError> {
        self.get_json("appointments/").await
    }

    async fn list_bills(&self) -> Result<Vec<Bill>, ApiError> {
        self.get_json("billings/").await
    }

    async fn list_medical_records(&self) -> Result<Vec<MedicalRecord>, ApiError> {
        self.get_json("medical-records/").await
    }

    async fn list_medicines(&self) -> Result<Vec<Medicine>, ApiError> {
        self.get_json("medicines/").await
    }

    async fn list_inventory(&self) -> Result<Vec<InventoryItem>, ApiError> {
        self.get_json("inventory/").await
    }

    async fn list_emergencies(&self) -> Result<Vec<EmergencyCase>, ApiError> {
        self.get_json("emergencies/").await
    }

    async fn get_appointment(&self, id: i64) -> Result<Appointment, ApiError> {
        self.get_json(&format!("appointments/{id}/")).await
    }

    async fn create_user(&self, user: &NewUser) -> Result<User, ApiError> {
        self.post_json("users/", user).await
    }

    async fn create_patient(&self, profile: &NewPatientProfile) -> Result<Patient, ApiError> {
        self.post_json("patients/", profile).await
    }

    async fn create_appointment(&self, appt: &NewAppointment) -> Result<Appointment, ApiError> {
        self.post_json("appointments/", appt).await
    }

    async fn create_bill(&self, bill: &NewBill) -> Result<Bill, ApiError> {
        self.post_json("billings/", bill).await
    }

    async fn create_medical_record(
        &self,
        record: &NewMedicalRecord,
    ) -> Result<MedicalRecord, ApiError> {
        self.post_json("medical-records/", record).await
    }

    async fn create_prescription(
        &self,
        prescription: &NewPrescription,
    ) -> Result<Prescription, ApiError> {
        self.post_json("prescriptions/", prescription).await
    }

    async fn set_appointment_status(
        &self,
        id: i64,
        status: AppointmentStatus,
    ) -> Result<Appointment, ApiError> {
        self.patch_json(
            &format!("appointments/{id}/"),
            &json!({ "status": status.as_str() }),
        )
        .await
    }

    async fn set_appointment_notes(&self, id: i64, notes: &str) -> Result<Appointment, ApiError> {
        self.patch_json(&format!("appointments/{id}/"), &json!({ "notes": notes }))
            .await
    }

    async fn assign_bed(&self, bed_id: i64, patient_id: i64) -> Result<Bed, ApiError> {
        self.post_json(
            &format!("beds/{bed_id}/assign_patient/"),
            &json!({ "patient_id": patient_id }),
        )
        .await
    }

    async fn release_bed(&self, bed_id: i64) -> Result<Bed, ApiError> {
        self.post_json(&format!("beds/{bed_id}/release_bed/"), &json!({}))
            .await
    }

    async fn mark_bill_paid(&self, bill_id: i64) -> Result<Bill, ApiError> {
        self.post_json(&format!("billings/{bill_id}/mark_paid/"), &json!({}))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slash() {
        let client = RestClient::new("http://localhost:8000/api/", 30);
        assert_eq!(client.url("doctors/"), "http://localhost:8000/api/doctors/");
    }

    #[test]
    fn token_install_and_clear() {
        let client = RestClient::default_local();
        assert!(client.token.read().unwrap().is_none());
        client.install_token("abc123");
        assert_eq!(client.token.read().unwrap().as_deref(), Some("abc123"));
        client.clear_auth();
        assert!(client.token.read().unwrap().is_none());
    }

    // Compile-time check that RestClient satisfies the workflow seam.
    fn _assert_implements_api<T: HospitalApi>() {}
    #[allow(dead_code)]
    fn _rest_client_is_hospital_api() {
        _assert_implements_api::<RestClient>();
    }
}
