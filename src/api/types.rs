use serde::{Deserialize, Serialize};

use crate::auth::session::{Identity, Role};
use crate::models::member::AttendanceEntry;

#[derive(Debug, Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Successful `POST /api/auth/login` body.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub role: Role,
    pub name: String,
    pub email: String,
}

impl LoginResponse {
    pub fn identity(&self) -> Identity {
        Identity { name: self.name.clone(), email: self.email.clone() }
    }
}

#[derive(Debug, Serialize)]
pub struct Registration<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Member account created by an admin. Goes through the same registration
/// route as self sign-up, with the extra directory fields.
#[derive(Debug, Serialize)]
pub struct NewMember<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub phone: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub plan: &'a str,
    #[serde(rename = "feesPaid")]
    pub fees_paid: bool,
}

/// Profile edit; a missing password leaves it unchanged.
#[derive(Debug, Serialize)]
pub struct ProfileUpdate<'a> {
    pub name: &'a str,
    pub email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProfileResponse {
    pub user: Identity,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AttendanceHistory {
    #[serde(default)]
    pub attendance: Vec<AttendanceEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AttendanceStatus {
    #[serde(default)]
    pub marked: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct OrderRequest {
    pub amount: u32,
}

/// Order created with the payment gateway, as relayed by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentOrder {
    pub id: String,
    pub amount: u64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "INR".to_string()
}

/// Error body the backend sends with non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
}
