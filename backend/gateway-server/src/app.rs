use std::{future::Future, sync::Arc};

use axum::{extract::Request, http, Router};
use common_utils::consts;
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::oneshot,
};
use tower_http::{request_id::MakeRequestUuid, trace as tower_trace};

use crate::{configs, error::ConfigurationError, http::AppState, logger, utils};

/// # Panics
///
/// Will panic if signal handling fails
pub async fn server_builder(config: configs::Config) -> Result<(), ConfigurationError> {
    let server_config = config.server.clone();

    // Signal handler
    let (tx, rx) = oneshot::channel();

    #[allow(clippy::expect_used)]
    tokio::spawn(async move {
        let mut sig_int =
            signal(SignalKind::interrupt()).expect("Failed to initialize SIGINT signal handler");
        let mut sig_term =
            signal(SignalKind::terminate()).expect("Failed to initialize SIGTERM signal handler");

        tokio::select! {
            _ = sig_int.recv() => {
                logger::info!("Received SIGINT");
            }
            _ = sig_term.recv() => {
                logger::info!("Received SIGTERM");
            }
        }
        if tx.send(()).is_err() {
            logger::warn!("server already stopped before the shutdown signal");
        }
    });

    let shutdown_signal = async {
        if rx.await.is_err() {
            logger::warn!("signal handler dropped without sending");
        }
        logger::info!("Shutdown signal received");
    };

    let state = AppState::new(Arc::new(config.gateway_context()));

    logger::info!(
        host = %server_config.host,
        port = %server_config.port,
        dev_mode = state.context.settings.dev_mode,
        "starting shurjoPay gateway service"
    );

    let listener = server_config.tcp_listener().await?;
    http_server(state, listener, shutdown_signal).await
}

/// Router with the tracing and request id layers applied
pub fn router(state: AppState) -> Router {
    let logging_layer = tower_trace::TraceLayer::new_for_http()
        .make_span_with(|request: &Request<_>| utils::record_fields_from_header(request))
        .on_request(tower_trace::DefaultOnRequest::new().level(tracing::Level::INFO))
        .on_response(
            tower_trace::DefaultOnResponse::new()
                .level(tracing::Level::INFO)
                .latency_unit(tower_http::LatencyUnit::Micros),
        )
        .on_failure(
            tower_trace::DefaultOnFailure::new()
                .latency_unit(tower_http::LatencyUnit::Micros)
                .level(tracing::Level::ERROR),
        );

    let request_id_layer = tower_http::request_id::SetRequestIdLayer::new(
        http::HeaderName::from_static(consts::X_REQUEST_ID),
        MakeRequestUuid,
    );

    let propagate_request_id_layer = tower_http::request_id::PropagateRequestIdLayer::new(
        http::HeaderName::from_static(consts::X_REQUEST_ID),
    );

    // Last added runs first, so the id exists before the span reads it
    crate::http::create_router(state)
        .layer(logging_layer)
        .layer(propagate_request_id_layer)
        .layer(request_id_layer)
}

pub async fn http_server(
    state: AppState,
    listener: tokio::net::TcpListener,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ConfigurationError> {
    axum::serve(listener, router(state).into_make_service())
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    Ok(())
}
