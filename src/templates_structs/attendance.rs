use askama::Template;

use crate::models::attendance::{WeekGrid, WeekType};
use super::PageContext;

#[derive(Template)]
#[template(path = "attendance.html")]
pub struct AttendanceTemplate {
    pub ctx: PageContext,
    pub marked: bool,
    pub week: WeekGrid,
    pub week_type: WeekType,
    pub week_present: usize,
    /// Shown under the password prompt.
    pub error: Option<String>,
    pub show_password: bool,
    pub today: String,
}

impl AttendanceTemplate {
    pub fn is_this_week(&self) -> bool {
        self.week_type == WeekType::ThisWeek
    }
}
