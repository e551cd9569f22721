pub mod account_handlers;
pub mod attendance_handlers;
pub mod auth_handlers;
pub mod contact_handlers;
pub mod dashboard;
pub mod member_handlers;
pub mod pages;
pub mod payment_handlers;
