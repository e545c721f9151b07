//! Directory listing endpoint
//!
//! `GET <listing_path>?path=<relative>` answers with the immediate children
//! of the resolved directory, or a 500 `{"error": ...}` payload. Every
//! failure kind collapses to the same response shape.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use crate::config::AppState;
use crate::handler::router::RequestContext;
use crate::http;
use crate::listing::{ErrorPayload, ListingRequest};
use crate::logger;

pub async fn serve_listing(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    serve_listing_with(ctx, state, logger::log_error_line).await
}

/// Serve a listing, handing one diagnostic line per failure to `diagnostic`
/// before the response is built.
async fn serve_listing_with(
    ctx: &RequestContext<'_>,
    state: &AppState,
    mut diagnostic: impl FnMut(&str),
) -> Response<Full<Bytes>> {
    let request = ListingRequest::from_query(ctx.query);
    let http_config = &state.config.http;

    match state.public_root.list(&request).await {
        Ok(entries) => {
            http::build_json_response(StatusCode::OK, &entries, http_config, ctx.is_head)
        }
        Err(err) => {
            diagnostic(&logger::format_listing_error(&request.path, &err));
            http::build_json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &ErrorPayload::new(err.to_string()),
                http_config,
                ctx.is_head,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn state_for(root: &std::path::Path) -> AppState {
        let mut cfg = Config::for_tests();
        cfg.listing.public_root = root.to_string_lossy().into_owned();
        AppState::new(&cfg)
    }

    async fn serve(state: &AppState, query: Option<&str>) -> (StatusCode, Vec<String>) {
        let ctx = RequestContext {
            path: "/api/files",
            query,
            is_head: false,
        };
        let mut lines = Vec::new();
        let resp = serve_listing_with(&ctx, state, |line| lines.push(line.to_string())).await;
        (resp.status(), lines)
    }

    #[tokio::test]
    async fn test_failure_writes_one_diagnostic_line() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_for(dir.path());

        let (status, lines) = serve(&state, Some("path=missing")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(lines.len(), 1, "{lines:?}");
        assert!(
            lines[0].starts_with(r#"[ERROR] Error reading directory (path="missing"): "#),
            "{}",
            lines[0]
        );
        assert!(lines[0].contains("no such file or directory"));
    }

    #[tokio::test]
    async fn test_success_writes_no_diagnostic_line() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let state = state_for(dir.path());

        let (status, lines) = serve(&state, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(lines.is_empty(), "{lines:?}");

        let (status, lines) = serve(&state, Some("path=sub")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(lines.is_empty(), "{lines:?}");
    }
}
