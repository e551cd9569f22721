use actix_session::SessionExt;
use actix_web::{
    Error, HttpResponse,
    body::{EitherBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    http::header,
    middleware::Next,
};

use super::guard::{GuardDecision, RoutePolicy, decide};
use super::session::{Role, current_user};

/// Admin-only views: dashboard and member management.
pub async fn require_admin(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    enforce(req, next, RoutePolicy::only(Role::Admin)).await
}

/// Member-only views: the attendance tracker.
pub async fn require_member(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    enforce(req, next, RoutePolicy::only(Role::User)).await
}

/// Any signed-in role: payment and profile.
pub async fn require_signed_in(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    enforce(req, next, RoutePolicy::signed_in()).await
}

async fn enforce<B: MessageBody + 'static>(
    req: ServiceRequest,
    next: Next<B>,
    policy: RoutePolicy,
) -> Result<ServiceResponse<EitherBody<B>>, Error> {
    let user = current_user(&req.get_session());

    match decide(&user, &policy) {
        GuardDecision::Render => next.call(req).await.map(|res| res.map_into_left_body()),
        GuardDecision::Redirect(target) => {
            log::debug!("Guard redirected {} to {}", req.path(), target.path());
            let response = HttpResponse::SeeOther()
                .insert_header((header::LOCATION, target.path()))
                .finish();
            Ok(req.into_response(response).map_into_right_body())
        }
    }
}
