//! Middleware that scopes a trace identifier over each request.
//!
//! Every request is assigned a fresh UUID which lives in task-local storage
//! for the duration of the handler call and is echoed back to the client in
//! the `trace-id` response header. Error constructors snapshot the identifier
//! so failure envelopes and log lines can be correlated.
//!
//! Task-local values do not cross `tokio::spawn` boundaries. Wrap spawned
//! futures in [`TraceId::scope`] when a background task must keep reporting
//! under the originating request's identifier.

use std::future::Future;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tokio::task_local;
use tracing::error;
use uuid::Uuid;

/// Response header carrying the request's trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static TRACE_ID: TraceId;
}

/// Request-scoped trace identifier.
///
/// # Examples
/// ```
/// use booking_backend::middleware::trace::TraceId;
///
/// async fn handler() {
///     if let Some(id) = TraceId::current() {
///         tracing::info!(trace_id = %id, "handling request");
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(pub(crate) Uuid);

impl TraceId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the identifier scoped over the current task, if any.
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(|id| *id).ok()
    }

    /// Runs `fut` with `trace_id` in scope.
    ///
    /// # Examples
    /// ```
    /// use booking_backend::middleware::trace::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let id: TraceId = "67e55044-10b1-426f-9247-bb680e5fe0c8"
    ///     .parse()
    ///     .expect("valid UUID");
    /// assert_eq!(TraceId::scope(id, async { TraceId::current() }).await, Some(id));
    /// # });
    /// ```
    pub async fn scope<F: Future>(trace_id: TraceId, fut: F) -> F::Output {
        TRACE_ID.scope(trace_id, fut).await
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Middleware factory wiring [`TraceId`] scoping into the request pipeline.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use booking_backend::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Clone)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = TraceService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceService { inner: service }))
    }
}

/// Service wrapper produced by [`Trace`]. Not used directly.
pub struct TraceService<S> {
    inner: S,
}

fn attach_header<B>(res: &mut ServiceResponse<B>, trace_id: TraceId) {
    match HeaderValue::from_str(&trace_id.to_string()) {
        Ok(value) => {
            res.response_mut()
                .headers_mut()
                .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
        }
        Err(error) => {
            error!(%error, trace_id = %trace_id, "failed to encode trace id header");
        }
    }
}

impl<S, B> Service<ServiceRequest> for TraceService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(inner);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = TraceId::generate();
        let fut = self.inner.call(req);
        Box::pin(TraceId::scope(trace_id, async move {
            let mut res = fut.await?;
            attach_header(&mut res, trace_id);
            Ok(res)
        }))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::web::Bytes;
    use actix_web::{App, HttpResponse, test, web};

    use super::*;

    #[tokio::test]
    async fn generated_ids_are_distinct() {
        assert_ne!(TraceId::generate(), TraceId::generate());
    }

    #[tokio::test]
    async fn current_reflects_scope() {
        let id = TraceId::generate();
        assert_eq!(
            TraceId::scope(id, async move { TraceId::current() }).await,
            Some(id)
        );
    }

    #[tokio::test]
    async fn current_is_none_outside_scope() {
        assert!(TraceId::current().is_none());
    }

    #[tokio::test]
    async fn from_str_round_trips() {
        let id: TraceId = Uuid::nil().to_string().parse().expect("parse uuid");
        assert_eq!(id.to_string(), Uuid::nil().to_string());
    }

    /// Runs `handler` behind [`Trace`] and returns the response status, the
    /// `trace-id` header value and the raw body.
    async fn roundtrip<F, Fut, Res>(handler: F) -> (StatusCode, String, Bytes)
    where
        F: Fn() -> Fut + Clone + 'static,
        Fut: Future<Output = Res> + 'static,
        Res: actix_web::Responder + 'static,
    {
        let app =
            test::init_service(App::new().wrap(Trace).route("/", web::get().to(handler))).await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let status = res.status();
        let header = res
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .expect("ascii trace id header")
            .to_owned();
        (status, header, test::read_body(res).await)
    }

    #[actix_web::test]
    async fn adds_trace_id_header() {
        let (status, header, _) = roundtrip(|| async { HttpResponse::Ok().finish() }).await;
        assert_eq!(status, StatusCode::OK);
        header.parse::<TraceId>().expect("header is a trace id");
    }

    #[actix_web::test]
    async fn handler_sees_scoped_id() {
        let (_, header, body) = roundtrip(|| async {
            let id = TraceId::current().expect("trace id in scope");
            HttpResponse::Ok().body(id.to_string())
        })
        .await;
        assert_eq!(std::str::from_utf8(&body).expect("utf8 body"), header);
    }

    #[actix_web::test]
    async fn error_body_carries_scoped_id() {
        use crate::domain::{ApiResult, Error};

        let (status, header, body) = roundtrip(|| async {
            // Error constructors capture the scoped trace id.
            ApiResult::<HttpResponse>::Err(Error::internal("boom"))
        })
        .await;
        let envelope: Error = serde_json::from_slice(&body).expect("error envelope");
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(envelope.trace_id.as_deref(), Some(header.as_str()));
    }
}
