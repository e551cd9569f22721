use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::Datelike;
use serde::Deserialize;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::models::attendance::{MONTH_NAMES, today_in};
use crate::models::member::{self, Member, MemberQuery};
use crate::templates_structs::{
    CalendarView, DashboardTemplate, DirectoryView, MemberRow, MonthOption, PageContext, PickerOption,
    YearOption,
};

/// How many past years the calendar's year select offers.
const YEAR_SPAN: i32 = 3;

#[derive(Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub tab: Option<String>,
    #[serde(default)]
    pub q: String,
    pub role: Option<String>,
    pub plan: Option<String>,
    pub page: Option<usize>,
    /// Name typed into the calendar's member search.
    #[serde(default)]
    pub find: String,
    #[serde(default)]
    pub member: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl DashboardQuery {
    fn member_query(&self) -> MemberQuery {
        let defaults = MemberQuery::default();
        MemberQuery {
            q: self.q.clone(),
            role: self.role.clone().unwrap_or(defaults.role),
            plan: self.plan.clone().unwrap_or(defaults.plan),
            page: self.page.unwrap_or(defaults.page),
        }
    }
}

fn directory(members: &[Member], query: &MemberQuery) -> DirectoryView {
    let page = member::filter_and_paginate(members, query);
    DirectoryView {
        rows: page.members.iter().map(|m| MemberRow::from(*m)).collect(),
        query: query.clone(),
        page: page.page,
        total_pages: page.total_pages,
        total_count: page.total_count,
        plan_options: member::plan_options(members),
    }
}

fn calendar(members: &[Member], query: &DashboardQuery, config: &AppConfig) -> CalendarView {
    let today = today_in(config.attendance_offset);
    let month = query.month.filter(|m| *m < 12).unwrap_or(today.month0());
    let year = query.year.unwrap_or(today.year());

    let matches = member::search_by_name(members, &query.find)
        .into_iter()
        .map(|m| PickerOption { id: m.id.clone(), name: m.name.clone() })
        .collect();

    let selected = member::select(members, query.member.as_deref());
    let (summary, skipped) = match selected {
        Some(m) => {
            let history = m.attendance_log(config.attendance_offset);
            (Some(history.month_summary(month, year)), history.rejected())
        }
        None => (None, 0),
    };

    let months = MONTH_NAMES
        .iter()
        .enumerate()
        .map(|(i, &name)| MonthOption { value: i as u32, name, selected: i as u32 == month })
        .collect();
    let mut years: Vec<i32> = (today.year() - YEAR_SPAN..=today.year()).collect();
    if !years.contains(&year) {
        years.push(year);
        years.sort_unstable();
    }
    let years = years
        .into_iter()
        .map(|value| YearOption { value, selected: value == year })
        .collect();

    CalendarView {
        search: query.find.clone(),
        matches,
        selected: selected.map(|m| PickerOption { id: m.id.clone(), name: m.name.clone() }),
        month,
        year,
        months,
        years,
        summary,
        skipped,
    }
}

pub async fn index(
    session: Session,
    query: web::Query<DashboardQuery>,
    api: web::Data<ApiClient>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, "/dashboard");

    let (members, load_error) = match api.list_members().await {
        Ok(members) => (members, None),
        Err(e) => {
            log::error!("Loading members failed: {e}");
            (vec![], Some("Could not load members".to_string()))
        }
    };

    let stats = member::stats(&members);
    let max_attendance = stats.iter().map(|s| s.attendance).max().unwrap_or(0);

    let tmpl = DashboardTemplate {
        ctx,
        tab: query.tab.clone().unwrap_or_else(|| "members".to_string()),
        load_error,
        directory: directory(&members, &query.member_query()),
        calendar: calendar(&members, &query, &config),
        stats,
        max_attendance,
    };
    render(tmpl)
}
