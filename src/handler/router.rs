//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method validation,
//! route matching, dispatching and access logging.

use crate::config::{AppState, RoutesConfig};
use crate::handler::listing;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
}

/// Main entry point for HTTP request handling
///
/// Generic over the body type: no route reads the request body.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let response = dispatch(&req, &state).await;

    if state.access_log() {
        log_access(&req, &response, &state, remote_addr, started);
    }

    Ok(response)
}

async fn dispatch<B>(req: &Request<B>, state: &AppState) -> Response<Full<Bytes>> {
    let method = req.method();
    let http_config = &state.config.http;

    // 1. Check HTTP method
    match *method {
        Method::GET | Method::HEAD => {}
        Method::OPTIONS => return http::build_options_response(http_config),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            return http::build_405_response(http_config);
        }
    }

    // 2. Check body size
    if let Some(resp) = check_body_size(req, state) {
        return resp;
    }

    // 3. Route
    let ctx = RequestContext {
        path: req.uri().path(),
        query: req.uri().query(),
        is_head: *method == Method::HEAD,
    };
    route_request(&ctx, &state.config.routes, state).await
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size<B>(req: &Request<B>, state: &AppState) -> Option<Response<Full<Bytes>>> {
    let max_body_size = state.config.http.max_body_size;
    let content_length = req.headers().get(hyper::header::CONTENT_LENGTH)?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response(&state.config.http))
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

/// Route request based on path and configuration
async fn route_request(
    ctx: &RequestContext<'_>,
    routes: &RoutesConfig,
    state: &AppState,
) -> Response<Full<Bytes>> {
    // Health check endpoints (always fast, no filesystem access)
    if routes.health.enabled
        && (ctx.path == routes.health.liveness_path || ctx.path == routes.health.readiness_path)
    {
        return http::build_health_response(&state.config.http, ctx.is_head);
    }

    if ctx.path == routes.listing_path {
        return listing::serve_listing(ctx, state).await;
    }

    http::build_404_response(&state.config.http, ctx.is_head)
}

fn log_access<B>(
    req: &Request<B>,
    response: &Response<Full<Bytes>>,
    state: &AppState,
    remote_addr: SocketAddr,
    started: Instant,
) {
    let mut entry = AccessLogEntry::new(
        remote_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = version_label(req.version()).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0);
    entry.user_agent = req
        .headers()
        .get(hyper::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    logger::log_access(&entry, &state.config.logging.access_log_format);
}

const fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
