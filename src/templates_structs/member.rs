use askama::Template;
use serde::Deserialize;

use crate::models::member::Member;
use super::PageContext;

#[derive(Template)]
#[template(path = "members/form.html")]
pub struct MemberFormTemplate {
    pub ctx: PageContext,
    pub member: Member,
    pub plan_names: Vec<&'static str>,
    pub errors: Vec<String>,
}

/// Add-member form fields, echoed back when validation fails.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewMemberForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub plan: String,
    /// Checkbox: present only when ticked.
    #[serde(default)]
    pub fees_paid: Option<String>,
    #[serde(default)]
    pub csrf_token: String,
}

impl NewMemberForm {
    pub fn paid(&self) -> bool {
        self.fees_paid.is_some()
    }
}

#[derive(Template)]
#[template(path = "members/new.html")]
pub struct NewMemberTemplate {
    pub ctx: PageContext,
    pub form: NewMemberForm,
    pub plan_names: Vec<&'static str>,
    pub errors: Vec<String>,
}
