use serde::Serialize;

use crate::api::{ApiError, error_message};
use crate::config::EmailJsConfig;

/// A message submitted through the contact form.
#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

#[derive(Serialize)]
struct TemplateParams<'a> {
    from_name: &'a str,
    from_email: &'a str,
    message: &'a str,
    to_email: &'a str,
}

/// Relays contact-form messages through the EmailJS REST API.
#[derive(Clone)]
pub struct ContactMailer {
    http: reqwest::Client,
    config: EmailJsConfig,
}

impl ContactMailer {
    pub fn new(config: EmailJsConfig) -> Self {
        Self { http: reqwest::Client::new(), config }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    pub async fn send(&self, msg: &ContactMessage) -> Result<(), ApiError> {
        if !self.config.is_configured() {
            return Err(ApiError::Unavailable("email relay is not configured".to_string()));
        }

        let body = SendRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            template_params: TemplateParams {
                from_name: msg.name.trim(),
                from_email: msg.email.trim(),
                message: msg.message.trim(),
                to_email: &self.config.to_email,
            },
        };

        let resp = self.http.post(&self.config.endpoint).json(&body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ApiError::Server { status: status.as_u16(), message: error_message(&text) });
        }
        log::info!("Contact message from {} relayed", msg.email.trim());
        Ok(())
    }
}
