//! Route guard decisions for every role and policy shape.

use gympro::auth::guard::{GuardDecision, Redirect, RoutePolicy, check, decide};
use gympro::auth::session::{Identity, Role, UserSession};

fn signed_in(role: Role) -> UserSession {
    UserSession::SignedIn {
        role,
        identity: Identity { name: "Test".to_string(), email: "test@gympro.test".to_string() },
    }
}

#[test]
fn test_admin_route_scenarios() {
    let admin_only = RoutePolicy::only(Role::Admin);
    assert_eq!(
        decide(&UserSession::Anonymous, &admin_only),
        GuardDecision::Redirect(Redirect::Login)
    );
    assert_eq!(decide(&signed_in(Role::User), &admin_only), GuardDecision::Redirect(Redirect::Home));
    assert_eq!(decide(&signed_in(Role::Admin), &admin_only), GuardDecision::Render);
}

#[test]
fn test_member_route_sends_admin_home() {
    let members_only = RoutePolicy::only(Role::User);
    assert_eq!(decide(&signed_in(Role::User), &members_only), GuardDecision::Render);
    assert_eq!(decide(&signed_in(Role::Admin), &members_only), GuardDecision::Redirect(Redirect::Home));
}

#[test]
fn test_signed_in_policy_admits_every_role() {
    let policy = RoutePolicy::signed_in();
    assert_eq!(decide(&signed_in(Role::User), &policy), GuardDecision::Render);
    assert_eq!(decide(&signed_in(Role::Admin), &policy), GuardDecision::Render);
    assert_eq!(decide(&UserSession::Anonymous, &policy), GuardDecision::Redirect(Redirect::Login));
}

#[test]
fn test_allowed_roles_set_membership() {
    let both = [Role::Admin, Role::User];
    assert_eq!(check(&signed_in(Role::User), None, Some(&both)), GuardDecision::Render);
    assert_eq!(check(&signed_in(Role::Admin), None, Some(&both)), GuardDecision::Render);
    assert_eq!(
        check(&signed_in(Role::User), None, Some(&[Role::Admin])),
        GuardDecision::Redirect(Redirect::Home)
    );
}

#[test]
fn test_required_and_allowed_intersect() {
    // Required admin but only users allowed: nobody gets in.
    let policy = RoutePolicy::from_parts(Some(Role::Admin), Some(&[Role::User]));
    assert!(!policy.permits(Role::Admin));
    assert!(!policy.permits(Role::User));

    let policy = RoutePolicy::from_parts(Some(Role::Admin), Some(&[Role::Admin, Role::User]));
    assert!(policy.permits(Role::Admin));
    assert!(!policy.permits(Role::User));
}

#[test]
fn test_no_constraints_is_signed_in_only() {
    assert_eq!(RoutePolicy::from_parts(None, None), RoutePolicy::signed_in());
    assert_eq!(check(&UserSession::Anonymous, None, None), GuardDecision::Redirect(Redirect::Login));
    assert_eq!(check(&signed_in(Role::User), None, None), GuardDecision::Render);
}

#[test]
fn test_empty_allowed_list_refuses_signed_in_users() {
    let policy = RoutePolicy::any_of(&[]);
    assert_eq!(decide(&signed_in(Role::Admin), &policy), GuardDecision::Redirect(Redirect::Home));
}

#[test]
fn test_redirect_paths() {
    assert_eq!(Redirect::Login.path(), "/login");
    assert_eq!(Redirect::Home.path(), "/");
}
