//! Member directory: filtering, pagination, search, stats and plans.

mod common;

use gympro::models::member::{
    ITEMS_PER_PAGE, Member, MemberQuery, filter_and_paginate, plan_options, search_by_name, select,
    stats,
};
use gympro::models::plan;
use common::*;

fn query(q: &str, role: &str, plan: &str, page: usize) -> MemberQuery {
    MemberQuery { q: q.to_string(), role: role.to_string(), plan: plan.to_string(), page }
}

fn names(members: &[&Member]) -> Vec<String> {
    members.iter().map(|m| m.name.clone()).collect()
}

#[test]
fn test_unfiltered_first_page() {
    let roster = roster();
    let page = filter_and_paginate(&roster, &MemberQuery::default());
    assert_eq!(page.total_count, 10);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.page, 1);
    assert_eq!(page.members.len(), ITEMS_PER_PAGE);
    assert_eq!(page.members[0].id, "1");
}

#[test]
fn test_last_page_is_partial() {
    let roster = roster();
    let page = filter_and_paginate(&roster, &query("", "all", "all", 3));
    assert_eq!(page.members.len(), 2);
    assert_eq!(names(&page.members), vec!["Ananya Ghosh", "Karan Patel"]);
}

#[test]
fn test_page_is_clamped() {
    let roster = roster();
    assert_eq!(filter_and_paginate(&roster, &query("", "all", "all", 99)).page, 3);
    assert_eq!(filter_and_paginate(&roster, &query("", "all", "all", 0)).page, 1);
}

#[test]
fn test_filters_combine() {
    let roster = roster();
    let page = filter_and_paginate(&roster, &query("", "user", "Standard", 1));
    assert_eq!(names(&page.members), vec!["Priya Sharma", "Kavya Rao", "Meera Iyer"]);
    assert_eq!(page.total_pages, 1);

    let admins = filter_and_paginate(&roster, &query("", "admin", "all", 1));
    assert_eq!(admins.total_count, 2);
}

#[test]
fn test_search_is_case_insensitive() {
    let roster = roster();
    let page = filter_and_paginate(&roster, &query("  KA", "all", "all", 1));
    assert_eq!(names(&page.members), vec!["Kavya Rao", "Karan Patel"]);
    assert!(query("ra", "all", "all", 1).is_filtered());
    assert!(!MemberQuery::default().is_filtered());
}

#[test]
fn test_no_matches_reports_empty_page() {
    let roster = roster();
    let page = filter_and_paginate(&roster, &query("zzz", "all", "all", 4));
    assert!(page.members.is_empty());
    assert_eq!(page.total_count, 0);
    assert_eq!(page.total_pages, 0);
    assert_eq!(page.page, 1);
}

#[test]
fn test_calendar_search_and_selection() {
    let roster = roster();
    assert!(search_by_name(&roster, "   ").is_empty());
    assert_eq!(names(&search_by_name(&roster, "an")), vec!["Rohan Das", "Ananya Ghosh", "Karan Patel"]);

    assert_eq!(select(&roster, Some("4")).map(|m| m.name.as_str()), Some("Arjun Mehta"));
    assert_eq!(select(&roster, Some("missing")).map(|m| m.id.as_str()), Some("1"));
    assert_eq!(select(&roster, None).map(|m| m.id.as_str()), Some("1"));
    assert!(select(&[], None).is_none());
}

#[test]
fn test_plan_options_in_first_seen_order() {
    assert_eq!(plan_options(&roster()), vec!["Basic", "Standard", "Premium"]);
}

#[test]
fn test_stats_prefer_backend_count() {
    let mut counted = with_attendance(member("1", "Ravi Kumar", "user", "Basic"), &["2025-01-01"]);
    counted.attendance_count = Some(12);
    counted.fees_paid = Some(serde_json::json!(999));
    let plain = with_attendance(member("2", "Priya Sharma", "user", "Standard"), &["2025-01-01", "x"]);

    let stats = stats(&[counted, plain]);
    assert_eq!(stats[0].attendance, 12);
    assert_eq!(stats[0].fees, 999.0);
    assert_eq!(stats[1].attendance, 2);
    assert_eq!(stats[1].fees, 0.0);
}

#[test]
fn test_fees_settled_variants() {
    let mut m = member("1", "Ravi Kumar", "user", "Basic");
    assert!(!m.fees_settled());
    m.fees_paid = Some(serde_json::json!(true));
    assert!(m.fees_settled());
    m.fees_paid = Some(serde_json::json!("2499"));
    assert!(m.fees_settled());
    assert_eq!(m.fees_amount(), 2499.0);
    m.fees_paid = Some(serde_json::json!(0));
    assert!(!m.fees_settled());
}

#[test]
fn test_member_decodes_backend_shape() {
    let raw = r#"{
        "_id": "64f0",
        "name": "Kavya Rao",
        "email": "kavya@gympro.test",
        "role": "user",
        "attendance": [{"date": "2025-02-01T06:00:00.000Z"}, {}],
        "feesPaid": true
    }"#;
    let m: Member = serde_json::from_str(raw).expect("member decodes");
    assert_eq!(m.id, "64f0");
    assert_eq!(m.plan_label(), "-");
    assert_eq!(m.attendance.len(), 2);
    assert!(m.attendance[1].date.is_none());
    assert_eq!(m.attendance_log(utc()).rejected(), 1);
}

#[test]
fn test_plan_catalogue() {
    assert_eq!(plan::all().len(), 3);
    let standard = plan::find(" standard ").expect("standard plan");
    assert_eq!(standard.price, 2499);
    assert!(standard.popular);
    assert!(plan::find("Gold").is_none());
}
