// Template context structures for Askama templates, organized by page area.

use actix_session::Session;

use crate::auth::csrf;
use crate::auth::session::{Role, UserSession, current_user, take_flash};

pub const APP_NAME: &str = "GymPro";

/// Common context shared by every page.
/// Templates access these as `ctx.user_name`, `ctx.is_admin`, etc.
pub struct PageContext {
    pub app_name: &'static str,
    pub user_name: Option<String>,
    pub user_email: String,
    pub avatar_initial: String,
    pub is_admin: bool,
    pub is_member: bool,
    pub flash: Option<String>,
    pub csrf_token: String,
    pub current_path: String,
}

impl PageContext {
    pub fn build(session: &Session, current_path: &str) -> Self {
        let user = current_user(session);
        let flash = take_flash(session);
        let csrf_token = csrf::get_or_create_token(session);
        Self::from_parts(&user, flash, csrf_token, current_path)
    }

    pub fn from_parts(
        user: &UserSession,
        flash: Option<String>,
        csrf_token: String,
        current_path: &str,
    ) -> Self {
        let identity = user.identity();
        let user_name = identity.map(|i| i.name.clone());
        let user_email = identity.map(|i| i.email.clone()).unwrap_or_default();
        let avatar_initial = user_name
            .as_deref()
            .and_then(|n| n.chars().next())
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default();
        Self {
            app_name: APP_NAME,
            user_name,
            user_email,
            avatar_initial,
            is_admin: user.role() == Some(Role::Admin),
            is_member: user.role() == Some(Role::User),
            flash,
            csrf_token,
            current_path: current_path.to_string(),
        }
    }

    pub fn signed_in(&self) -> bool {
        self.user_name.is_some()
    }

    pub fn is_active(&self, path: &str) -> bool {
        self.current_path == path
    }
}

mod attendance;
mod common;
mod dashboard;
mod member;
mod payment;

pub use self::attendance::AttendanceTemplate;
pub use self::common::{
    ContactForm, ContactTemplate, HomeTemplate, LoginTemplate, MembershipsTemplate, RegisterTemplate,
};
pub use self::dashboard::{
    CalendarView, DashboardTemplate, DirectoryView, MemberRow, MonthOption, PickerOption, YearOption,
};
pub use self::member::{MemberFormTemplate, NewMemberForm, NewMemberTemplate};
pub use self::payment::{CheckoutTemplate, PaymentTemplate};
