//! Handler dependency bundle.
//!
//! Handlers receive [`HttpState`] through `actix_web::web::Data` and reach
//! the domain only through its ports, so tests can swap in fixtures or
//! mocks without touching any real store.

use std::sync::Arc;

use crate::domain::ports::{
    Authenticator, BookingCommand, BookingQuery, ResourceCommand, ResourceQuery, UserCommand,
    UserQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub authenticator: Arc<dyn Authenticator>,
    pub booking_commands: Arc<dyn BookingCommand>,
    pub booking_queries: Arc<dyn BookingQuery>,
    pub resource_commands: Arc<dyn ResourceCommand>,
    pub resource_queries: Arc<dyn ResourceQuery>,
    pub user_commands: Arc<dyn UserCommand>,
    pub user_queries: Arc<dyn UserQuery>,
}
