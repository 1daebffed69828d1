//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, panic guard)
//! - Bind server to listener
//! - Stop on the shutdown broadcast or an OS signal

use axum::{
    body::Body,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::any::Any;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::FacadeConfig;
use crate::employees::{EmployeeError, EmployeeService};
use crate::http::handlers;
use crate::http::request::{make_request_span, propagate_request_id_layer, set_request_id_layer};
use crate::lifecycle::signals;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<EmployeeService>,
}

/// HTTP server for the employee façade.
pub struct HttpServer {
    router: Router,
    config: FacadeConfig,
}

impl HttpServer {
    /// Create a new HTTP server around an already wired service.
    pub fn new(config: FacadeConfig, service: EmployeeService) -> Self {
        let state = AppState {
            service: Arc::new(service),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &FacadeConfig, state: AppState) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(set_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
            .layer(propagate_request_id_layer())
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(TimeoutLayer::new(config.timeouts.request()));

        Router::new()
            .route(
                "/employees",
                get(handlers::get_all_employees).post(handlers::create_employee),
            )
            .route("/employees/search/{search_string}", get(handlers::search_employees))
            .route("/employees/highestSalary", get(handlers::get_highest_salary))
            .route(
                "/employees/topTenHighestEarningEmployeeNames",
                get(handlers::get_top_ten_earner_names),
            )
            .route(
                "/employees/{id}",
                get(handlers::get_employee).delete(handlers::delete_employee),
            )
            .fallback(handlers::not_found)
            .with_state(state)
            .layer(middleware)
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = self.config.api_base_url().unwrap_or("<unset>"),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown.recv() => tracing::info!("Shutdown requested"),
                    _ = signals::wait_for_signal() => {}
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &FacadeConfig {
        &self.config
    }
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    EmployeeError::Unexpected(detail).into_response()
}
