//! Per-client rate limiting middleware.

use std::net::{IpAddr, SocketAddr};

use axum::{
    extract::{ConnectInfo, MatchedPath, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::{error::AppError, state::AppState};

/// Client key used when the peer address is unknown.
const FALLBACK_CLIENT: &str = "127.0.0.1";

/// Enforces the rate limit policy before the handler runs.
///
/// # Flow
///
/// 1. Derive the client key (see [`client_key`])
/// 2. Resolve the windows for the matched route (route limits plus global defaults)
/// 3. Make one `check_and_increment` call on the limiter
/// 4. Continue, or short-circuit with `429 Too Many Requests`
///
/// Must be installed with `route_layer` so the matched path is known.
///
/// # Errors
///
/// - [`AppError::RateLimited`] if any window is exhausted
/// - [`AppError::Internal`] if the limiter backend fails
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/sentiment", post(sentiment_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), rate_limit::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let client = client_key(&req, st.behind_proxy);
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let windows = st.rate_limit_policy.windows_for(&path);
    let allowed = st
        .rate_limiter
        .check_and_increment(&client, &windows)
        .await?;

    if !allowed {
        warn!(client = %client, path = %path, "Rate limit exceeded");
        return Err(AppError::RateLimited);
    }

    Ok(next.run(req).await)
}

/// Derives the rate limit key for a request.
///
/// With `behind_proxy`, the first `X-Forwarded-For` entry wins, then
/// `X-Real-IP`. Otherwise (or when neither header parses) the peer socket
/// address is used, falling back to `127.0.0.1` when it is unavailable.
pub fn client_key<B>(req: &axum::http::Request<B>, behind_proxy: bool) -> String {
    if behind_proxy && let Some(ip) = forwarded_ip(req.headers()) {
        return ip.to_string();
    }

    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| FALLBACK_CLIENT.to_string())
}

fn forwarded_ip(headers: &HeaderMap) -> Option<IpAddr> {
    let header_ip = |name: &str, first_only: bool| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| {
                if first_only {
                    v.split(',').next()
                } else {
                    Some(v)
                }
            })
            .and_then(|v| v.trim().parse::<IpAddr>().ok())
    };

    header_ip("x-forwarded-for", true).or_else(|| header_ip("x-real-ip", false))
}
