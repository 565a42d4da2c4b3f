use crate::{notifications::Notice, state::AppState};
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::{Stream, StreamExt};
use log::debug;

/// Stream of notices about mutations, as server-sent events.
///
/// The event name is the notice kind and the data is the notice as JSON.
#[utoipa::path(
    get,
    path = "/notifications",
    responses(
        (status = 200, description = "Notice stream", content_type = "text/event-stream", body = Notice)
    ),
    tag = "Notifications"
)]
pub async fn notifications(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let subscription = state.notifier.subscribe();
    debug!(
        "Notification stream opened, {} listening",
        state.notifier.subscriber_count()
    );

    let stream = subscription
        .into_stream()
        .map(|notice| Event::default().event(notice.kind.as_str()).json_data(&notice));

    Sse::new(stream).keep_alive(KeepAlive::default())
}
