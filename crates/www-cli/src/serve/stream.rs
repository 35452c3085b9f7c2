//! Live-update stream and its client script.

use crate::serve::{responder::NO_STORE, LiveEndpoints, SharedNotifier};
use axum::{
    http::{header, StatusCode},
    response::{
        sse::{Event, KeepAlive},
        IntoResponse, Response, Sse,
    },
};
use std::convert::Infallible;
use std::time::Duration;

/// Data of the one frame type sent on the stream.
pub const CHANGED_EVENT: &str = "changed";

/// Interval of SSE comment keep-alives. Comments never reach `onmessage`.
const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);

/// Open a live-update stream for one client.
///
/// The subscription is registered before this returns, so a change published
/// after the response is handed to axum is never missed. It is dropped, and
/// thereby unregistered, when axum drops the body on disconnect.
pub fn stream_response(notifier: &SharedNotifier) -> Response {
    let mut subscription = notifier.subscribe();
    tracing::info!(client = subscription.id(), "Client connected to watcher");

    let stream = async_stream::stream! {
        while subscription.recv().await.is_some() {
            yield Ok::<_, Infallible>(Event::default().data(CHANGED_EVENT));
        }
    };

    let sse = Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(KEEP_ALIVE_INTERVAL)
            .text("ping"),
    );

    ([(header::CACHE_CONTROL, NO_STORE)], sse).into_response()
}

/// Serve the client script that reloads the page on any message.
pub fn script_response(endpoints: &LiveEndpoints) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/javascript"),
            (header::CACHE_CONTROL, NO_STORE),
        ],
        endpoints.client_script(),
    )
        .into_response()
}
