use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::api::{ApiClient, ProfileUpdate};
use crate::auth::session::{SessionStore, set_flash};
use crate::auth::{csrf, validate};
use crate::errors::{AppError, see_other};

#[derive(Deserialize)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    /// Blank keeps the current password.
    #[serde(default)]
    pub password: String,
    pub csrf_token: String,
}

/// Update the signed-in user's name, email and optionally password.
pub async fn update_profile(
    session: Session,
    form: web::Form<ProfileForm>,
    api: web::Data<ApiClient>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let mut store = SessionStore::open(&session);
    let (role, current_email) = match (store.current().role(), store.current().identity()) {
        (Some(role), Some(identity)) => (role, identity.email.clone()),
        _ => return Err(AppError::Session("Not logged in".to_string())),
    };
    let back = role.landing_path();

    let errors: Vec<String> = validate::validate_name(&form.name)
        .into_iter()
        .chain(validate::validate_email(&form.email))
        .collect();
    if !errors.is_empty() {
        set_flash(&session, &errors.join("; "));
        return Ok(see_other(back));
    }

    let update = ProfileUpdate {
        name: form.name.trim(),
        email: form.email.trim(),
        password: Some(form.password.as_str()).filter(|p| !p.is_empty()),
    };

    match api.update_profile(&current_email, &update).await {
        Ok(identity) => {
            log::info!("Profile of {current_email} updated");
            store.refresh_identity(identity);
            set_flash(&session, "Profile updated successfully!");
        }
        Err(e) => {
            if !e.is_client_error() {
                log::error!("Profile update for {current_email} failed: {e}");
            }
            set_flash(&session, &e.user_message("Failed to update profile"));
        }
    }
    Ok(see_other(back))
}
