use bytes::Bytes;
use serde_json::json;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use crate::config::Config;
use crate::error::Result;
use crate::spec;
use crate::state::AppState;


pub async fn start_server(state: Arc<AppState>) -> Result<()> {
    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);

    tracing::info!("Starting API server on {}", addr);

    let routes = create_routes(&state.config);

    let addr: std::net::SocketAddr = addr.parse()
        .map_err(|e| crate::error::ForgeError::Config(
            crate::error::ConfigError::Parse(format!("Invalid listen address: {}", e))
        ))?;

    // Start server with graceful shutdown
    let (_, server) = warp::serve(routes)
        .bind_with_graceful_shutdown(addr, async move {
            let _ = state.shutdown_tx.subscribe().recv().await;
        });

    server.await;

    tracing::info!("API server stopped");
    Ok(())
}

pub fn create_routes(
    config: &Config,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let max_body_bytes = config.server.max_body_bytes;

    // POST /analyze takes the raw body verbatim; the pipeline decides whether
    // it contains a usable @plugin block. The size limit is checked against
    // the declared Content-Length when one is sent and against the received
    // bytes either way, so chunked bodies (no header) are still accepted.
    let analyze = warp::path("analyze")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::header::optional::<u64>("content-length"))
        .and(warp::body::bytes())
        .and_then(move |declared_len, body| analyze_text(declared_len, body, max_body_bytes));

    // Simple liveness check
    let liveness = warp::path::end()
        .and(warp::get())
        .map(|| "vstforge API is alive. POST /analyze with plugin HTML.");

    analyze
        .or(liveness)
        .recover(handle_rejection)
        .with(
            warp::cors()
                .allow_any_origin()
                .allow_methods(vec!["GET", "POST"])
                .allow_headers(vec!["Content-Type"]),
        )
}

async fn analyze_text(
    declared_len: Option<u64>,
    body: Bytes,
    max_body_bytes: u64,
) -> std::result::Result<impl Reply, Rejection> {
    if declared_len.map_or(false, |len| len > max_body_bytes)
        || body.len() as u64 > max_body_bytes
    {
        return Ok(error_reply(
            "Request body exceeds the configured size limit",
            StatusCode::PAYLOAD_TOO_LARGE,
        ));
    }

    let text = match std::str::from_utf8(&body) {
        Ok(text) => text,
        Err(_) => {
            return Ok(error_reply(
                "Request body must be UTF-8 text.",
                StatusCode::BAD_REQUEST,
            ));
        }
    };

    if text.trim().is_empty() {
        // Pre-pipeline guard; this reply carries no `ok` flag.
        return Ok(warp::reply::with_status(
            warp::reply::json(&json!({
                "error": "Empty body. Send HTML/JS text for analysis."
            })),
            StatusCode::BAD_REQUEST,
        ));
    }

    match spec::parse_plugin_spec(text) {
        Ok(plugin_spec) => {
            tracing::info!("Analyzed plugin \"{}\"", plugin_spec.name);
            Ok(warp::reply::with_status(
                warp::reply::json(&json!({ "ok": true, "spec": plugin_spec })),
                StatusCode::OK,
            ))
        }
        Err(e) => {
            tracing::debug!("Rejected analyze request: {}", e);
            Ok(error_reply(&e.to_string(), StatusCode::BAD_REQUEST))
        }
    }
}

fn error_reply(message: &str, status: StatusCode) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(
        warp::reply::json(&json!({ "ok": false, "error": message })),
        status,
    )
}

/// Maps warp's built-in rejections onto the same JSON error envelope the
/// analyze handler produces.
async fn handle_rejection(
    err: Rejection,
) -> std::result::Result<impl Reply, std::convert::Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found")
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    } else {
        tracing::error!("Unhandled rejection: {:?}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    };

    Ok(error_reply(message, status))
}
