use askama::Template;

use crate::models::attendance::MonthSummary;
use crate::models::member::{Member, MemberQuery, MemberStat};
use super::PageContext;

/// Row of the member table.
pub struct MemberRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub plan: String,
    pub fees_settled: bool,
    pub attendance_total: usize,
}

impl From<&Member> for MemberRow {
    fn from(m: &Member) -> Self {
        Self {
            id: m.id.clone(),
            name: m.name.clone(),
            email: m.email.clone(),
            role: m.role.clone(),
            plan: m.plan_label().to_string(),
            fees_settled: m.fees_settled(),
            attendance_total: m.attendance.len(),
        }
    }
}

/// Members tab: filters plus the current page.
pub struct DirectoryView {
    pub rows: Vec<MemberRow>,
    pub query: MemberQuery,
    pub page: usize,
    pub total_pages: usize,
    pub total_count: usize,
    pub plan_options: Vec<String>,
}

impl DirectoryView {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn prev_page(&self) -> usize {
        self.page.saturating_sub(1).max(1)
    }

    pub fn next_page(&self) -> usize {
        self.page + 1
    }
}

pub struct MonthOption {
    pub value: u32,
    pub name: &'static str,
    pub selected: bool,
}

pub struct YearOption {
    pub value: i32,
    pub selected: bool,
}

pub struct PickerOption {
    pub id: String,
    pub name: String,
}

/// Attendance tab: member picker, month/year selection and the calendar.
pub struct CalendarView {
    pub search: String,
    pub matches: Vec<PickerOption>,
    pub selected: Option<PickerOption>,
    pub month: u32,
    pub year: i32,
    pub months: Vec<MonthOption>,
    pub years: Vec<YearOption>,
    pub summary: Option<MonthSummary>,
    /// Attendance entries that could not be read as dates.
    pub skipped: usize,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub tab: String,
    pub load_error: Option<String>,
    pub directory: DirectoryView,
    pub calendar: CalendarView,
    pub stats: Vec<MemberStat>,
    pub max_attendance: u64,
}

impl DashboardTemplate {
    pub fn on_members_tab(&self) -> bool {
        self.tab != "attendance"
    }

    /// Bar width in percent for the activity chart.
    pub fn bar_width(&self, stat: &MemberStat) -> u64 {
        if self.max_attendance == 0 {
            0
        } else {
            stat.attendance * 100 / self.max_attendance
        }
    }
}
