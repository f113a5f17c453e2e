//! HTTP server setup and the proxy handler.
//!
//! # Responsibilities
//! - Create the Axum router with the catch-all proxy handler
//! - Wire up middleware (request tracing)
//! - Forward every request to the single backend
//! - Apply the Location rewrite on the way back
//!
//! There is deliberately no timeout, retry, or body-limit layer: the sidecar
//! has exactly one backend on the same host, and process exit is the only
//! stop mechanism. Headers are forwarded verbatim in both directions —
//! including hop-by-hop headers like `Connection` and `TE`. With a single
//! same-host HTTP/1.1 backend that has caused no trouble, so nothing strips
//! them; don't add a general-purpose filter here without a concrete need.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{
        uri::{Authority, InvalidUri, Scheme},
        Request, StatusCode, Uri,
    },
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::proxy::identity::ProxyIdentity;
use crate::proxy::rewrite::rewrite_location;

/// Application state injected into the proxy handler.
#[derive(Clone)]
struct AppState {
    client: Client<HttpConnector, Body>,
    backend: Authority,
    stale_prefix: Arc<str>,
}

/// HTTP server fronting the legacy service.
pub struct ProxyServer {
    router: Router,
}

impl ProxyServer {
    /// Build the server for the given identity.
    ///
    /// Logs the stale prefix so operators can see what will be stripped.
    pub fn new(identity: &ProxyIdentity) -> Result<Self, InvalidUri> {
        let backend = Authority::from_str(&identity.backend_authority)?;

        tracing::info!(
            backend = %backend,
            stale_prefix = %identity.stale_prefix,
            "will strip stale redirect prefix"
        );

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        let state = AppState {
            client,
            backend,
            stale_prefix: Arc::from(identity.stale_prefix.as_str()),
        };

        let router = Router::new()
            .route("/", any(proxy_handler))
            .route("/{*path}", any(proxy_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http());

        Ok(Self { router })
    }

    /// Run the server on the given listener until the process exits.
    pub async fn serve(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "reverse proxy listening");
        axum::serve(listener, self.router).await
    }
}

/// Forward one request to the backend and rewrite the redirect header.
///
/// Method, headers, and body pass through unchanged; only the request URI's
/// scheme and authority are rewritten to target the backend. A connection
/// failure is scoped to this request and surfaces as 502.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let (mut parts, body) = request.into_parts();

    let mut uri_parts = parts.uri.into_parts();
    uri_parts.scheme = Some(Scheme::HTTP);
    uri_parts.authority = Some(state.backend.clone());
    parts.uri = match Uri::from_parts(uri_parts) {
        Ok(uri) => uri,
        Err(e) => {
            tracing::error!(error = %e, "failed to build backend URI");
            return (StatusCode::BAD_GATEWAY, "Invalid backend URI").into_response();
        }
    };

    let method = parts.method.clone();
    let uri = parts.uri.clone();

    match state.client.request(Request::from_parts(parts, body)).await {
        Ok(response) => {
            let (mut parts, body) = response.into_parts();
            if rewrite_location(&mut parts.headers, &state.stale_prefix) {
                tracing::debug!(
                    method = %method,
                    uri = %uri,
                    "stripped stale prefix from Location"
                );
            }
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) => {
            tracing::error!(method = %method, uri = %uri, error = %e, "backend unreachable");
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}
