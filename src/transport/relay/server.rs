use super::handlers::{handle_health, handle_send};
use super::{HEALTH_PATH, MAX_BODY_SIZE, RelayState, SEND_PATH};
use anyhow::{Context, Result};
use axum::{
    Router,
    extract::Request,
    http::{HeaderValue, Method, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::limit::RequestBodyLimitLayer;

const ALLOW_HEADERS: &str = "Content-Type, Authorization";
const ALLOW_METHODS: &str = "POST, GET, OPTIONS";

/// Bind `host:port` and run the relay until Ctrl-C.
pub async fn run_relay(host: &str, port: u16, state: RelayState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("bind relay socket {host}:{port}"))?;
    run_relay_with_listener(host, listener, state).await
}

/// Run the relay from a pre-bound listener.
pub async fn run_relay_with_listener(
    host: &str,
    listener: tokio::net::TcpListener,
    state: RelayState,
) -> Result<()> {
    let actual_port = listener
        .local_addr()
        .context("get relay listener local address")?
        .port();
    print_relay_banner(&format!("{host}:{actual_port}"), &state);

    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve relay")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("relay shutting down");
}

fn print_relay_banner(display_addr: &str, state: &RelayState) {
    println!("Relay listening on {display_addr}");
    println!("  POST {SEND_PATH}");
    println!("  GET  {HEALTH_PATH}");
    println!("  Wake mode: {}", state.wake_mode);
    println!("  Action: {}", state.action.program());
    if state.token.is_some() {
        println!("  Bearer token required");
    } else {
        println!("  Authentication disabled");
    }
}

pub fn build_app(state: RelayState) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(handle_health))
        .route(SEND_PATH, post(handle_send))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(middleware::from_fn(cors))
}

/// Permissive CORS on every response; preflights never reach routing.
///
/// `tower_http::cors::CorsLayer` answers preflight with `200`; every `OPTIONS`
/// here must get `204`.
async fn cors(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    response
}
