//! Shared fixtures for the integration tests.
//!
//! - Calendar helpers (`date`, `utc`)
//! - Member builders and a small roster for directory tests
//! - Identities for session tests

#![allow(dead_code)]

use chrono::{FixedOffset, NaiveDate};

use gympro::auth::session::Identity;
use gympro::models::member::{AttendanceEntry, Member};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const ADMIN_NAME: &str = "Asha Admin";
pub const ADMIN_EMAIL: &str = "admin@gympro.test";
pub const MEMBER_NAME: &str = "Ravi Kumar";
pub const MEMBER_EMAIL: &str = "ravi@gympro.test";

// ============================================================================
// CALENDAR
// ============================================================================

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

pub fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).expect("zero offset")
}

// ============================================================================
// MEMBERS
// ============================================================================

pub fn admin_identity() -> Identity {
    Identity { name: ADMIN_NAME.to_string(), email: ADMIN_EMAIL.to_string() }
}

pub fn member_identity() -> Identity {
    Identity { name: MEMBER_NAME.to_string(), email: MEMBER_EMAIL.to_string() }
}

/// A member with no attendance and unpaid fees.
pub fn member(id: &str, name: &str, role: &str, plan: &str) -> Member {
    Member {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@gympro.test", name.to_lowercase().replace(' ', ".")),
        role: role.to_string(),
        plan: plan.to_string(),
        attendance: vec![],
        fees_paid: None,
        attendance_count: None,
    }
}

pub fn with_attendance(mut m: Member, dates: &[&str]) -> Member {
    m.attendance = dates
        .iter()
        .map(|d| AttendanceEntry { date: Some(d.to_string()) })
        .collect();
    m
}

/// Ten members: two admins, eight users spread over the three plans.
pub fn roster() -> Vec<Member> {
    vec![
        member("1", "Asha Admin", "admin", ""),
        member("2", "Ravi Kumar", "user", "Basic"),
        member("3", "Priya Sharma", "user", "Standard"),
        member("4", "Arjun Mehta", "user", "Premium"),
        member("5", "Kavya Rao", "user", "Standard"),
        member("6", "Rohan Das", "user", "Basic"),
        member("7", "Meera Iyer", "user", "Standard"),
        member("8", "Vikram Singh", "admin", ""),
        member("9", "Ananya Ghosh", "user", "Premium"),
        member("10", "Karan Patel", "user", "Basic"),
    ]
}
