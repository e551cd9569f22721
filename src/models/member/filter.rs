use super::types::{Member, MemberPage, MemberStat};

pub const ITEMS_PER_PAGE: usize = 4;

/// Value of the role/plan selects that disables the filter.
pub const ALL: &str = "all";

/// Directory search, filters and the requested page (1-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberQuery {
    pub q: String,
    pub role: String,
    pub plan: String,
    pub page: usize,
}

impl Default for MemberQuery {
    fn default() -> Self {
        Self { q: String::new(), role: ALL.to_string(), plan: ALL.to_string(), page: 1 }
    }
}

impl MemberQuery {
    pub fn is_filtered(&self) -> bool {
        !self.q.trim().is_empty() || self.role != ALL || self.plan != ALL
    }

    fn matches(&self, member: &Member) -> bool {
        name_matches(member, &self.q)
            && (self.role == ALL || member.role == self.role)
            && (self.plan == ALL || member.plan == self.plan)
    }
}

fn name_matches(member: &Member, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    term.is_empty() || member.name.to_lowercase().contains(&term)
}

/// Apply search and filters, then cut out the requested page.
///
/// The page number is clamped into `1..=total_pages`; an empty result
/// reports page 1 of 0.
pub fn filter_and_paginate<'a>(members: &'a [Member], query: &MemberQuery) -> MemberPage<'a> {
    let matching: Vec<&Member> = members.iter().filter(|m| query.matches(m)).collect();
    let total_count = matching.len();
    let total_pages = total_count.div_ceil(ITEMS_PER_PAGE);
    let page = query.page.clamp(1, total_pages.max(1));

    let members = matching
        .into_iter()
        .skip((page - 1) * ITEMS_PER_PAGE)
        .take(ITEMS_PER_PAGE)
        .collect();

    MemberPage { members, page, total_pages, total_count }
}

/// Members whose name contains `term`. An empty term offers nobody.
pub fn search_by_name<'a>(members: &'a [Member], term: &str) -> Vec<&'a Member> {
    if term.trim().is_empty() {
        return vec![];
    }
    members.iter().filter(|m| name_matches(m, term)).collect()
}

/// Member picked for the calendar: the requested id, else the first member.
pub fn select<'a>(members: &'a [Member], id: Option<&str>) -> Option<&'a Member> {
    id.and_then(|id| members.iter().find(|m| m.id == id))
        .or_else(|| members.first())
}

/// Distinct plan names in first-seen order, for the plan filter.
pub fn plan_options(members: &[Member]) -> Vec<String> {
    let mut plans: Vec<String> = Vec::new();
    for m in members {
        if !m.plan.is_empty() && !plans.contains(&m.plan) {
            plans.push(m.plan.clone());
        }
    }
    plans
}

pub fn stats(members: &[Member]) -> Vec<MemberStat> {
    members
        .iter()
        .map(|m| MemberStat {
            name: m.name.clone(),
            attendance: m.attendance_count.unwrap_or(m.attendance.len() as u64),
            fees: m.fees_amount(),
        })
        .collect()
}
