//! Assembles routes, middleware and state into a runnable Actix server.

mod state_builders;

pub use state_builders::in_memory_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;

use crate::Trace;
use crate::config::{ServerSettings, SessionSettings};
use crate::inbound::http::bookings::{
    cancel_booking, create_booking, get_booking, list_bookings, update_booking,
};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::resources::{
    create_resource, delete_resource, get_resource, list_resources, update_resource,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{
    delete_user, get_user, list_users, login, logout, register_user, update_user,
};

use std::sync::Arc;

/// Everything `build_app` needs to assemble one application instance.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

/// Cookie-session middleware for the `/api/v1` scope.
///
/// Sessions live entirely in an encrypted cookie; there is no server-side
/// session store. Cookies expire two hours after login.
fn session_layer(
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(String::from("session"))
        .cookie_path(String::from("/"))
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build()
}

/// Assemble the Actix application: routes, session middleware and tracing.
///
/// Exposed so integration tests can drive the full HTTP surface through
/// `actix_web::test` without binding a socket.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let api = web::scope("/api/v1")
        .wrap(session_layer(key, cookie_secure, same_site))
        .service(register_user)
        .service(login)
        .service(logout)
        .service(list_users)
        .service(get_user)
        .service(update_user)
        .service(delete_user)
        .service(create_resource)
        .service(list_resources)
        .service(get_resource)
        .service(update_resource)
        .service(delete_resource)
        .service(create_booking)
        .service(list_bookings)
        .service(get_booking)
        .service(update_booking)
        .service(cancel_booking);

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live)
}

/// Construct an Actix HTTP server over fresh in-memory stores.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the listener fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    settings: ServerSettings,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(in_memory_state(Arc::new(DefaultClock)));
    let ServerSettings { bind_addr, session } = settings;
    let SessionSettings {
        key,
        cookie_secure,
        same_site,
    } = session;

    let probes = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: probes.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
