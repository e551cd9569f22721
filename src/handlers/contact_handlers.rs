use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::session::set_flash;
use crate::auth::{csrf, validate};
use crate::errors::{AppError, render, see_other};
use crate::mailer::{ContactMailer, ContactMessage};
use crate::templates_structs::{ContactForm, ContactTemplate, PageContext};

pub async fn form(session: Session) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, "/contact");
    render(ContactTemplate {
        ctx,
        form: ContactForm::default(),
        errors: Default::default(),
        send_error: None,
    })
}

pub async fn submit(
    session: Session,
    form: web::Form<ContactForm>,
    mailer: web::Data<ContactMailer>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let form = form.into_inner();

    let errors = validate::validate_contact(&form.name, &form.email, &form.message);
    let mut send_error = None;

    if errors.is_empty() {
        let msg = ContactMessage {
            name: form.name.clone(),
            email: form.email.clone(),
            message: form.message.clone(),
        };
        match mailer.send(&msg).await {
            Ok(()) => {
                set_flash(&session, "Message sent successfully");
                return Ok(see_other("/contact"));
            }
            Err(e) => {
                log::error!("Contact message not delivered: {e}");
                send_error = Some("Failed to send message".to_string());
            }
        }
    }

    let ctx = PageContext::build(&session, "/contact");
    render(ContactTemplate { ctx, form, errors, send_error })
}
