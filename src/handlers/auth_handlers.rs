use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::api::{ApiClient, ApiError};
use crate::auth::rate_limit::LoginThrottle;
use crate::auth::session::{SessionStore, current_user, set_flash};
use crate::auth::{csrf, validate};
use crate::errors::{AppError, render, see_other};
use crate::templates_structs::{LoginTemplate, PageContext, RegisterTemplate};

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

fn login_form(session: &Session, error: Option<String>, email: &str) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(session, "/login");
    render(LoginTemplate { ctx, error, email: email.to_string() })
}

pub async fn login_page(session: Session) -> Result<HttpResponse, AppError> {
    // Already signed in: go to the role's landing page
    if let Some(role) = current_user(&session).role() {
        return Ok(see_other(role.landing_path()));
    }
    login_form(&session, None, "")
}

pub async fn login_submit(
    session: Session,
    form: web::Form<LoginForm>,
    api: web::Data<ApiClient>,
    throttle: web::Data<LoginThrottle>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let email = form.email.trim();
    if let Some(msg) = validate::validate_email(email).or_else(|| validate::validate_password(&form.password)) {
        return login_form(&session, Some(msg), email);
    }

    // Throttle BEFORE calling the identity provider
    if throttle.is_blocked(email) {
        log::warn!("Login throttled for {email}");
        return login_form(
            &session,
            Some("Too many failed login attempts. Please try again later.".to_string()),
            email,
        );
    }

    match api.login(email, &form.password).await {
        Ok(resp) => {
            throttle.clear(email);
            let role = resp.role;
            SessionStore::open(&session).login(role, resp.identity());
            // Drop the anonymous token so the signed-in session gets a fresh one
            session.remove("csrf_token");
            set_flash(&session, "Login successful");
            log::info!("{} signed in as {role}", resp.email);
            Ok(see_other(role.landing_path()))
        }
        Err(e) if e.is_client_error() => {
            throttle.record_failure(email);
            login_form(&session, Some(e.user_message("Login failed")), email)
        }
        Err(e) => {
            log::error!("Login request failed: {e}");
            login_form(&session, Some(e.user_message("Login failed")), email)
        }
    }
}

pub async fn register_page(session: Session) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, "/register");
    render(RegisterTemplate { ctx, errors: vec![], name: String::new(), email: String::new() })
}

pub async fn register_submit(
    session: Session,
    form: web::Form<RegisterForm>,
    api: web::Data<ApiClient>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let mut errors: Vec<String> = vec![];
    errors.extend(validate::validate_name(&form.name));
    errors.extend(validate::validate_email(&form.email));
    errors.extend(validate::validate_password(&form.password));
    errors.extend(validate::validate_password_confirmation(&form.password, &form.confirm_password));

    if errors.is_empty() {
        match api.register(form.name.trim(), form.email.trim(), &form.password).await {
            Ok(()) => {
                set_flash(&session, "Account created successfully!");
                return Ok(see_other("/login"));
            }
            Err(e) => {
                if !matches!(e, ApiError::Server { .. }) {
                    log::error!("Registration request failed: {e}");
                }
                errors.push(e.user_message("Registration failed"));
            }
        }
    }

    let ctx = PageContext::build(&session, "/register");
    render(RegisterTemplate {
        ctx,
        errors,
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
    })
}

pub async fn logout(
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let target = SessionStore::open(&session).logout();
    session.purge();
    Ok(see_other(target.path()))
}
