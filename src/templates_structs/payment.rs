use askama::Template;

use crate::models::plan::Plan;
use super::PageContext;

#[derive(Template)]
#[template(path = "payment.html")]
pub struct PaymentTemplate {
    pub ctx: PageContext,
    pub plan: &'static Plan,
}

/// Hands the created order to the gateway's checkout widget.
#[derive(Template)]
#[template(path = "checkout.html")]
pub struct CheckoutTemplate {
    pub ctx: PageContext,
    pub plan: &'static Plan,
    pub gateway_key: String,
    pub order_id: String,
    pub amount: u64,
    pub currency: String,
    pub description: String,
}
