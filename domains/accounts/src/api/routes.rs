//! Route definitions for the accounts API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{activation, invites, password, profile, registration, session};
use super::middleware::AccountsState;

/// Registration, session and profile routes
fn account_routes() -> Router<AccountsState> {
    Router::new()
        .route("/v1/user", post(registration::register))
        .route("/v1/user/login", post(session::login))
        .route("/v1/user/logout", post(session::logout))
        .route(
            "/v1/user/me",
            get(profile::get_profile)
                .patch(profile::update_profile)
                .delete(profile::delete_account),
        )
}

/// Routes redeeming or handing out link tokens
fn link_routes() -> Router<AccountsState> {
    Router::new()
        .route("/v1/user/password/forgot", post(password::forgot_password))
        .route(
            "/v1/user/password/reset/{token}",
            post(password::reset_password),
        )
        .route(
            "/v1/user/activate/resend",
            post(activation::resend_activation),
        )
        .route("/v1/user/activate/{token}", get(activation::activate))
        .route(
            "/v1/user/invite",
            get(invites::invite_link).post(invites::send_invite),
        )
        .route("/v1/user/invite/{token}", get(invites::process_invite))
}

/// Create all accounts API routes
pub fn routes() -> Router<AccountsState> {
    Router::new().merge(account_routes()).merge(link_routes())
}
