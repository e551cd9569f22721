//! HTTP client for the membership backend.
//!
//! The backend owns authentication, member records, attendance and payment
//! orders; this client only maps its JSON routes onto typed calls.

use std::fmt;

use serde::de::DeserializeOwned;

pub mod types;

pub use types::{Credentials, LoginResponse, NewMember, PaymentOrder, ProfileUpdate, Registration};

use crate::auth::session::Identity;
use crate::models::member::{AttendanceEntry, Member, MemberUpdate};
use types::{AttendanceHistory, AttendanceStatus, ErrorBody, OrderRequest, ProfileResponse};

#[derive(Debug)]
pub enum ApiError {
    /// Non-2xx answer; `message` is the backend's explanation when it sent one.
    Server { status: u16, message: String },
    Network(reqwest::Error),
    Decode(String),
    Unavailable(String),
    /// The configured base URL cannot carry path segments.
    BadUrl(String),
}

impl ApiError {
    /// Text safe to show next to a form.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Server { message, .. } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, ApiError::Server { status, .. } if (400..500).contains(status))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Server { status, message } => write!(f, "HTTP {status}: {message}"),
            ApiError::Network(e) => write!(f, "network: {e}"),
            ApiError::Decode(e) => write!(f, "decode: {e}"),
            ApiError::Unavailable(e) => write!(f, "unavailable: {e}"),
            ApiError::BadUrl(e) => write!(f, "bad url: {e}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Network(e)
    }
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `path` followed by `param` as one escaped path segment.
    pub(crate) fn url_with(&self, path: &str, param: &str) -> Result<reqwest::Url, ApiError> {
        let raw = self.url(path);
        let mut url = reqwest::Url::parse(&raw).map_err(|e| ApiError::BadUrl(format!("{raw}: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::BadUrl(raw.clone()))?
            .pop_if_empty()
            .push(param);
        Ok(url)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let resp = self
            .http
            .post(self.url("auth/login"))
            .json(&Credentials { email, password })
            .send()
            .await?;
        parse(resp).await
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<(), ApiError> {
        let resp = self
            .http
            .post(self.url("auth/register"))
            .json(&Registration { name, email, password })
            .send()
            .await?;
        expect_success(resp).await
    }

    /// Create a member account on the admin's behalf.
    pub async fn create_member(&self, member: &NewMember<'_>) -> Result<(), ApiError> {
        let resp = self
            .http
            .post(self.url("auth/register"))
            .json(member)
            .send()
            .await?;
        expect_success(resp).await
    }

    pub async fn list_members(&self) -> Result<Vec<Member>, ApiError> {
        let resp = self.http.get(self.url("users")).send().await?;
        parse(resp).await
    }

    pub async fn update_member(&self, id: &str, update: &MemberUpdate) -> Result<Member, ApiError> {
        let resp = self
            .http
            .put(self.url_with("users", id)?)
            .json(update)
            .send()
            .await?;
        parse(resp).await
    }

    pub async fn delete_member(&self, id: &str) -> Result<(), ApiError> {
        let resp = self
            .http
            .delete(self.url_with("users", id)?)
            .send()
            .await?;
        expect_success(resp).await
    }

    /// Update the signed-in member's own profile; returns the stored identity.
    pub async fn update_profile(
        &self,
        current_email: &str,
        update: &ProfileUpdate<'_>,
    ) -> Result<Identity, ApiError> {
        let resp = self
            .http
            .put(self.url_with("users/update", current_email)?)
            .json(update)
            .send()
            .await?;
        let body: ProfileResponse = parse(resp).await?;
        Ok(body.user)
    }

    pub async fn member_attendance(&self, email: &str) -> Result<Vec<AttendanceEntry>, ApiError> {
        let resp = self
            .http
            .get(self.url_with("users/attendance", email)?)
            .send()
            .await?;
        let body: AttendanceHistory = parse(resp).await?;
        Ok(body.attendance)
    }

    /// Whether attendance is already marked today.
    pub async fn attendance_status(&self, email: &str) -> Result<bool, ApiError> {
        let resp = self
            .http
            .get(self.url_with("attendance/status", email)?)
            .send()
            .await?;
        let body: AttendanceStatus = parse(resp).await?;
        Ok(body.marked)
    }

    /// Mark today's attendance; the backend re-checks the password.
    pub async fn mark_attendance(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let resp = self
            .http
            .post(self.url("attendance/mark"))
            .json(&Credentials { email, password })
            .send()
            .await?;
        expect_success(resp).await
    }

    pub async fn create_payment_order(&self, amount: u32) -> Result<PaymentOrder, ApiError> {
        let resp = self
            .http
            .post(self.url("payment/create-order"))
            .json(&OrderRequest { amount })
            .send()
            .await?;
        parse(resp).await
    }
}

async fn parse<R: DeserializeOwned>(resp: reqwest::Response) -> Result<R, ApiError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(server_error(status, resp).await);
    }
    resp.json::<R>()
        .await
        .map_err(|e| ApiError::Decode(format!("response body: {e}")))
}

async fn expect_success(resp: reqwest::Response) -> Result<(), ApiError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(server_error(status, resp).await);
    }
    Ok(())
}

async fn server_error(status: reqwest::StatusCode, resp: reqwest::Response) -> ApiError {
    let body = resp.text().await.unwrap_or_default();
    ApiError::Server {
        status: status.as_u16(),
        message: error_message(&body),
    }
}

/// Pull `message` out of a JSON error body, else use the raw text.
pub(crate) fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { message: Some(message) }) => message,
        Ok(ErrorBody { message: None }) => String::new(),
        Err(_) => body.trim().to_string(),
    }
}
