//! Shared fixtures for HTTP handler tests.

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};

/// Session middleware matching the served cookie policy.
///
/// Uses the same name, path and content security as the real server so the
/// handlers under test see identical session plumbing. The key is generated
/// per call and the `Secure` flag is off because the test client speaks
/// plain HTTP.
pub fn session_middleware_for_tests() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(String::from("session"))
        .cookie_path(String::from("/"))
        .cookie_secure(false)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build()
}
