use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::api::ApiClient;
use crate::auth::csrf;
use crate::auth::session::{Identity, current_user, set_flash};
use crate::config::AppConfig;
use crate::errors::{AppError, render, see_other};
use crate::models::attendance::{AttendanceLog, WeekType, today_in};
use crate::templates_structs::{AttendanceTemplate, PageContext};

#[derive(Deserialize)]
pub struct WeekQuery {
    #[serde(default)]
    pub week: Option<String>,
}

#[derive(Deserialize)]
pub struct MarkForm {
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub week: Option<String>,
    pub csrf_token: String,
}

fn signed_in_identity(session: &Session) -> Result<Identity, AppError> {
    current_user(session)
        .identity()
        .cloned()
        .ok_or_else(|| AppError::Session("Not logged in".to_string()))
}

fn week_type(raw: Option<&str>) -> WeekType {
    raw.and_then(|w| w.parse().ok()).unwrap_or_default()
}

async fn render_tracker(
    session: &Session,
    api: &ApiClient,
    config: &AppConfig,
    identity: &Identity,
    week_type: WeekType,
    error: Option<String>,
) -> Result<HttpResponse, AppError> {
    // Independent lookups; neither depends on the other's outcome
    let (status, history) = tokio::join!(
        api.attendance_status(&identity.email),
        api.member_attendance(&identity.email),
    );

    let marked = status.unwrap_or_else(|e| {
        log::error!("Attendance status for {} unavailable: {e}", identity.email);
        false
    });
    let history = history.unwrap_or_else(|e| {
        log::error!("Attendance history for {} unavailable: {e}", identity.email);
        vec![]
    });

    let attendance = AttendanceLog::parse(
        history.iter().map(|a| a.date.as_deref().unwrap_or("")),
        config.attendance_offset,
    );
    let today = today_in(config.attendance_offset);
    let week = attendance.week_grid(week_type, today);
    let week_present = week.days.iter().filter(|d| d.present).count();

    let ctx = PageContext::build(session, "/attendance");
    render(AttendanceTemplate {
        ctx,
        marked,
        week,
        week_type,
        week_present,
        show_password: error.is_some(),
        error,
        today: today.format("%A, %d %B %Y").to_string(),
    })
}

pub async fn page(
    session: Session,
    query: web::Query<WeekQuery>,
    api: web::Data<ApiClient>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let identity = signed_in_identity(&session)?;
    let week = week_type(query.week.as_deref());
    render_tracker(&session, &api, &config, &identity, week, None).await
}

pub async fn mark(
    session: Session,
    form: web::Form<MarkForm>,
    api: web::Data<ApiClient>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let identity = signed_in_identity(&session)?;
    let week = week_type(form.week.as_deref());

    if form.password.is_empty() {
        let error = Some("Password is required".to_string());
        return render_tracker(&session, &api, &config, &identity, week, error).await;
    }

    match api.mark_attendance(&identity.email, &form.password).await {
        Ok(()) => {
            log::info!("Attendance marked for {}", identity.email);
            set_flash(&session, "Attendance marked successfully!");
            Ok(see_other(&format!("/attendance?week={week}")))
        }
        Err(e) => {
            if !e.is_client_error() {
                log::error!("Marking attendance for {} failed: {e}", identity.email);
            }
            let error = Some(e.user_message("Something went wrong"));
            render_tracker(&session, &api, &config, &identity, week, error).await
        }
    }
}
