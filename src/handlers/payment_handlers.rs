use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::api::ApiClient;
use crate::auth::csrf;
use crate::auth::session::set_flash;
use crate::config::AppConfig;
use crate::errors::{AppError, render, see_other};
use crate::models::plan;
use crate::templates_structs::{CheckoutTemplate, PageContext, PaymentTemplate};

#[derive(Deserialize)]
pub struct PlanQuery {
    #[serde(default)]
    pub plan: Option<String>,
}

#[derive(Deserialize)]
pub struct OrderForm {
    pub plan: String,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct CompletionQuery {
    #[serde(default)]
    pub razorpay_payment_id: Option<String>,
}

/// Plan summary before paying. Without a known plan, back to the plans page.
pub async fn page(
    session: Session,
    query: web::Query<PlanQuery>,
) -> Result<HttpResponse, AppError> {
    let Some(plan) = query.plan.as_deref().and_then(plan::find) else {
        return Ok(see_other("/memberships"));
    };
    let ctx = PageContext::build(&session, "/payment");
    render(PaymentTemplate { ctx, plan })
}

pub async fn create_order(
    session: Session,
    form: web::Form<OrderForm>,
    api: web::Data<ApiClient>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let Some(plan) = plan::find(&form.plan) else {
        return Ok(see_other("/memberships"));
    };

    let order = match api.create_payment_order(plan.price).await {
        Ok(order) => order,
        Err(e) => {
            log::error!("Creating order for {} failed: {e}", plan.name);
            set_flash(&session, "Could not start the payment. Please try again.");
            return Ok(see_other(&format!("/payment?plan={}", plan.name)));
        }
    };
    log::info!("Payment order {} created for {} plan", order.id, plan.name);

    let ctx = PageContext::build(&session, "/payment");
    render(CheckoutTemplate {
        ctx,
        plan,
        gateway_key: config.razorpay_key.clone(),
        order_id: order.id,
        amount: order.amount,
        currency: order.currency,
        description: format!("{} Membership", plan.name),
    })
}

/// Gateway success callback lands here.
pub async fn complete(
    session: Session,
    query: web::Query<CompletionQuery>,
) -> HttpResponse {
    if let Some(id) = &query.razorpay_payment_id {
        log::info!("Payment {id} completed");
    }
    set_flash(&session, "Payment successful. Welcome aboard!");
    see_other("/attendance")
}
