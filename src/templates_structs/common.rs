use askama::Template;
use serde::Deserialize;

use crate::auth::validate::ContactErrors;
use crate::models::plan::Plan;
use super::PageContext;

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub ctx: PageContext,
    pub plans: &'static [Plan],
}

#[derive(Template)]
#[template(path = "memberships.html")]
pub struct MembershipsTemplate {
    pub ctx: PageContext,
    pub plans: &'static [Plan],
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub ctx: PageContext,
    pub error: Option<String>,
    pub email: String,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub ctx: PageContext,
    pub errors: Vec<String>,
    pub name: String,
    pub email: String,
}

/// Contact form fields, echoed back when validation fails.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub csrf_token: String,
}

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub ctx: PageContext,
    pub form: ContactForm,
    pub errors: ContactErrors,
    pub send_error: Option<String>,
}
