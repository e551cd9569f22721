use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::api::{ApiClient, NewMember};
use crate::auth::session::{Role, set_flash};
use crate::auth::{csrf, validate};
use crate::errors::{AppError, render, see_other};
use crate::handlers::auth_handlers::CsrfOnly;
use crate::models::member::{Member, MemberUpdate};
use crate::models::plan;
use crate::templates_structs::{MemberFormTemplate, NewMemberForm, NewMemberTemplate, PageContext};

#[derive(Deserialize)]
pub struct MemberForm {
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub plan: String,
    pub csrf_token: String,
}

async fn find_member(api: &ApiClient, id: &str) -> Result<Member, AppError> {
    api.list_members()
        .await?
        .into_iter()
        .find(|m| m.id == id)
        .ok_or(AppError::NotFound)
}

fn plan_names() -> Vec<&'static str> {
    plan::all().iter().map(|p| p.name).collect()
}

fn validate_member_form(form: &MemberForm) -> Vec<String> {
    let mut errors = vec![];
    errors.extend(validate::validate_name(&form.name));
    errors.extend(validate::validate_email(&form.email));
    if form.role.parse::<Role>().is_err() {
        errors.push("Role must be admin or user".to_string());
    }
    errors
}

pub fn validate_new_member(form: &NewMemberForm) -> Vec<String> {
    let mut errors = vec![];
    errors.extend(validate::validate_name(&form.name));
    errors.extend(validate::validate_email(&form.email));
    errors.extend(validate::validate_required(&form.phone, "Phone", 20));
    errors.extend(validate::validate_password(&form.password));
    if !form.plan.trim().is_empty() && plan::find(&form.plan).is_none() {
        errors.push("Unknown plan".to_string());
    }
    errors
}

fn new_member_page(
    session: &Session,
    mut form: NewMemberForm,
    errors: Vec<String>,
) -> Result<HttpResponse, AppError> {
    form.password.clear();
    let ctx = PageContext::build(session, "/dashboard");
    render(NewMemberTemplate { ctx, form, plan_names: plan_names(), errors })
}

pub async fn list() -> HttpResponse {
    see_other("/dashboard?tab=members")
}

pub async fn new_form(session: Session) -> Result<HttpResponse, AppError> {
    new_member_page(&session, NewMemberForm::default(), vec![])
}

pub async fn create(
    session: Session,
    form: web::Form<NewMemberForm>,
    api: web::Data<ApiClient>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let form = form.into_inner();

    let errors = validate_new_member(&form);
    if !errors.is_empty() {
        return new_member_page(&session, form, errors);
    }

    let plan = plan::find(&form.plan).map(|p| p.name).unwrap_or("");
    let member = NewMember {
        name: form.name.trim(),
        email: form.email.trim(),
        password: &form.password,
        phone: form.phone.trim(),
        plan,
        fees_paid: form.paid(),
    };

    match api.create_member(&member).await {
        Ok(()) => {
            log::info!("Member {} created", member.email);
            set_flash(&session, &format!("User \"{}\" added successfully", member.name));
            Ok(see_other("/dashboard?tab=members"))
        }
        Err(e) => {
            if !e.is_client_error() {
                log::error!("Creating member {} failed: {e}", member.email);
            }
            let errors = vec![e.user_message("Failed to create member")];
            new_member_page(&session, form, errors)
        }
    }
}

pub async fn edit_form(
    session: Session,
    path: web::Path<String>,
    api: web::Data<ApiClient>,
) -> Result<HttpResponse, AppError> {
    let member = find_member(&api, &path.into_inner()).await?;
    let ctx = PageContext::build(&session, "/dashboard");
    render(MemberFormTemplate { ctx, member, plan_names: plan_names(), errors: vec![] })
}

pub async fn update(
    session: Session,
    path: web::Path<String>,
    form: web::Form<MemberForm>,
    api: web::Data<ApiClient>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();

    let errors = validate_member_form(&form);
    if !errors.is_empty() {
        let mut member = find_member(&api, &id).await?;
        // Echo what was typed rather than the stored values
        member.name = form.name.clone();
        member.email = form.email.clone();
        member.role = form.role.clone();
        member.plan = form.plan.clone();
        let ctx = PageContext::build(&session, "/dashboard");
        return render(MemberFormTemplate { ctx, member, plan_names: plan_names(), errors });
    }

    let update = MemberUpdate {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        role: form.role.trim().to_string(),
        plan: form.plan.trim().to_string(),
    };

    match api.update_member(&id, &update).await {
        Ok(updated) => {
            log::info!("Member {id} updated");
            set_flash(&session, &format!("User \"{}\" updated successfully", updated.name));
        }
        Err(e) => {
            log::error!("Updating member {id} failed: {e}");
            set_flash(&session, "Failed to update user");
        }
    }
    Ok(see_other("/dashboard"))
}

pub async fn delete(
    session: Session,
    path: web::Path<String>,
    form: web::Form<CsrfOnly>,
    api: web::Data<ApiClient>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();

    match api.delete_member(&id).await {
        Ok(()) => {
            log::info!("Member {id} deleted");
            set_flash(&session, "User deleted successfully");
        }
        Err(e) => {
            log::error!("Deleting member {id} failed: {e}");
            set_flash(&session, "Failed to delete user");
        }
    }
    Ok(see_other("/dashboard"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, phone: &str, password: &str, plan: &str) -> NewMemberForm {
        NewMemberForm {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            phone: phone.to_string(),
            plan: plan.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn complete_new_member_passes() {
        assert!(validate_new_member(&form("Kavya", "kavya@gym.in", "9876543210", "pw", "standard")).is_empty());
        assert!(validate_new_member(&form("Kavya", "kavya@gym.in", "9876543210", "pw", "")).is_empty());
    }

    #[test]
    fn new_member_reports_every_missing_field() {
        let errors = validate_new_member(&form("", "nope", "", "", "Gold"));
        assert_eq!(
            errors,
            vec![
                "Name is required",
                "Invalid email address",
                "Phone is required",
                "Password is required",
                "Unknown plan",
            ]
        );
    }
}
