//! Request classification and the single axum handler.
//!
//! Routing works on the raw request path: the endpoint pair is matched
//! exactly, everything else must start with the configured prefix. Only the
//! remainder after the prefix is percent-decoded and handed to the resolver.

use crate::serve::{responder, stream, LiveEndpoints, SharedState};
use axum::{
    extract::State,
    http::{Method, Uri},
    response::Response,
    Router,
};
use percent_encoding::percent_decode_str;

/// What a request path asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The live-update event stream
    LiveStream,
    /// The live-update client script
    LiveScript,
    /// A resource under the prefix; the path still percent-encoded, with a
    /// leading `/`
    Resource(String),
    /// Outside the prefix
    NotFound,
}

/// Classify a raw request path.
///
/// `prefix` must be normalized (leading and trailing `/`).
pub fn classify(path: &str, endpoints: &LiveEndpoints, prefix: &str) -> Route {
    if path == endpoints.stream_path() {
        return Route::LiveStream;
    }
    if path == endpoints.script_path() {
        return Route::LiveScript;
    }

    match path.strip_prefix(prefix) {
        Some(rest) => Route::Resource(format!("/{}", rest)),
        None => Route::NotFound,
    }
}

/// Build the axum router. Every method and path goes to one handler.
pub fn build_router(state: SharedState) -> Router {
    Router::new().fallback(handle_request).with_state(state)
}

async fn handle_request(
    State(state): State<SharedState>,
    method: Method,
    uri: Uri,
) -> Response {
    tracing::info!("{} {}", method, uri);

    match classify(uri.path(), state.endpoints(), state.prefix()) {
        Route::LiveStream => stream::stream_response(state.notifier()),
        Route::LiveScript => stream::script_response(state.endpoints()),
        Route::Resource(encoded) => serve_resource(&state, &encoded).await,
        Route::NotFound => {
            tracing::debug!(path = uri.path(), prefix = state.prefix(), "outside prefix");
            responder::not_found()
        }
    }
}

async fn serve_resource(state: &SharedState, encoded: &str) -> Response {
    let decoded = match percent_decode_str(encoded).decode_utf8() {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::debug!(path = encoded, error = %e, "undecodable request path");
            return responder::not_found();
        }
    };

    match state.resolver().resolve(&decoded).await {
        Ok(file) => responder::resource_response(&file, state.endpoints()).await,
        Err(e) => {
            tracing::debug!(path = %decoded, error = %e, "not found");
            responder::not_found()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn endpoints() -> LiveEndpoints {
        LiveEndpoints::from_id(Uuid::nil())
    }

    #[test]
    fn test_endpoint_pair_matches_exactly() {
        let endpoints = endpoints();

        assert_eq!(
            classify(endpoints.stream_path(), &endpoints, "/"),
            Route::LiveStream
        );
        assert_eq!(
            classify(endpoints.script_path(), &endpoints, "/"),
            Route::LiveScript
        );

        let trailing = format!("{}/", endpoints.stream_path());
        assert_eq!(
            classify(&trailing, &endpoints, "/"),
            Route::Resource(trailing.clone())
        );
    }

    #[test]
    fn test_endpoints_ignore_prefix() {
        let endpoints = endpoints();
        assert_eq!(
            classify(endpoints.stream_path(), &endpoints, "/docs/"),
            Route::LiveStream
        );
    }

    #[test]
    fn test_default_prefix_keeps_path() {
        let endpoints = endpoints();
        assert_eq!(classify("/", &endpoints, "/"), Route::Resource("/".into()));
        assert_eq!(
            classify("/css/site.css", &endpoints, "/"),
            Route::Resource("/css/site.css".into())
        );
    }

    #[test]
    fn test_prefix_is_stripped() {
        let endpoints = endpoints();
        assert_eq!(
            classify("/docs/a.css", &endpoints, "/docs/"),
            Route::Resource("/a.css".into())
        );
        assert_eq!(
            classify("/docs/", &endpoints, "/docs/"),
            Route::Resource("/".into())
        );
    }

    #[test]
    fn test_outside_prefix_is_not_found() {
        let endpoints = endpoints();
        for path in ["/", "/index.html", "/docs", "/docsx/a.css", "/other/docs/a.css"] {
            assert_eq!(classify(path, &endpoints, "/docs/"), Route::NotFound, "{path}");
        }
    }

    #[test]
    fn test_encoded_traversal_stays_encoded() {
        let endpoints = endpoints();
        assert_eq!(
            classify("/%2e%2e/secret", &endpoints, "/"),
            Route::Resource("/%2e%2e/secret".into())
        );
    }
}
