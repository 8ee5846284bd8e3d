use crate::prelude::{eprintln, *};
use axum::{
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, Sse},
        IntoResponse, Response,
    },
    routing::{get, post},
    Json, Router,
};
use futures::stream::{self, Stream};
use std::convert::Infallible;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

const SSE_PATH: &str = "/sse";
const MESSAGE_PATH: &str = "/message";

pub async fn run_sse(options: super::cli::SseOptions, global: crate::Global) -> Result<()> {
    let addr = format!("{}:{}", options.host, options.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    if global.verbose {
        eprintln!("urltitle MCP server listening on http://{addr}");
        eprintln!("SSE endpoint: http://{addr}{SSE_PATH}");
        eprintln!("Message endpoint: http://{addr}{MESSAGE_PATH}");
    }
    log::info!("mcp sse server listening on {addr}");

    axum::serve(listener, router(global))
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

fn router(global: crate::Global) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(SSE_PATH, get(sse_handler))
        .route(MESSAGE_PATH, post(message_handler))
        .layer(cors)
        .with_state(Arc::new(global))
}

/// Announces where clients should post their messages
async fn sse_handler(
    State(_global): State<Arc<crate::Global>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = stream::once(async { Ok(Event::default().event("endpoint").data(MESSAGE_PATH)) });
    Sse::new(stream)
}

async fn message_handler(
    State(global): State<Arc<crate::Global>>,
    Json(request): Json<serde_json::Value>,
) -> Response {
    let request_str = request.to_string();
    match super::handle_request(&request_str, &global).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}
