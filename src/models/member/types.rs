use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::models::attendance::AttendanceLog;

/// One attendance entry as the backend returns it. `date` may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    #[serde(default)]
    pub date: Option<String>,
}

/// Member record from `GET /api/users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub plan: String,
    #[serde(default)]
    pub attendance: Vec<AttendanceEntry>,
    /// Either an amount or a paid flag depending on the backend version.
    #[serde(default, rename = "feesPaid")]
    pub fees_paid: Option<serde_json::Value>,
    #[serde(default, rename = "attendanceCount")]
    pub attendance_count: Option<u64>,
}

impl Member {
    pub fn attendance_log(&self, offset: FixedOffset) -> AttendanceLog {
        AttendanceLog::parse(
            self.attendance.iter().map(|a| a.date.as_deref().unwrap_or("")),
            offset,
        )
    }

    /// Fees as a number; `true` without an amount counts as unknown (zero).
    pub fn fees_amount(&self) -> f64 {
        match &self.fees_paid {
            Some(serde_json::Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    pub fn fees_settled(&self) -> bool {
        match &self.fees_paid {
            Some(serde_json::Value::Bool(paid)) => *paid,
            Some(_) => self.fees_amount() > 0.0,
            None => false,
        }
    }

    pub fn plan_label(&self) -> &str {
        if self.plan.is_empty() { "-" } else { &self.plan }
    }
}

/// Fields the admin may change through `PUT /api/users/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberUpdate {
    pub name: String,
    pub email: String,
    pub role: String,
    pub plan: String,
}

/// One bar of the activity/revenue overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberStat {
    pub name: String,
    pub attendance: u64,
    pub fees: f64,
}

/// One page of the filtered member directory.
#[derive(Debug, Clone)]
pub struct MemberPage<'a> {
    pub members: Vec<&'a Member>,
    pub page: usize,
    pub total_pages: usize,
    pub total_count: usize,
}
