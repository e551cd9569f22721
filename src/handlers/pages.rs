use actix_session::Session;
use actix_web::HttpResponse;

use crate::errors::{AppError, render};
use crate::models::plan;
use crate::templates_structs::{HomeTemplate, MembershipsTemplate, PageContext};

pub async fn home(session: Session) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, "/");
    render(HomeTemplate { ctx, plans: plan::all() })
}

/// Plans page; anonymous visitors are sent to login from the "Get Started" buttons.
pub async fn memberships(session: Session) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, "/memberships");
    render(MembershipsTemplate { ctx, plans: plan::all() })
}

pub async fn not_found() -> HttpResponse {
    let html = include_str!("../../templates/errors/404.html");
    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
