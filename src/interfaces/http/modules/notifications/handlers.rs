//! Notification stream handler

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::response::sse::{Event as SseEvent, KeepAlive, Sse};
use futures_util::stream::{self, Stream};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::notifications::{EventMessage, EventSubscriber, SharedEventBus};

#[derive(Clone)]
pub struct NotificationState {
    pub event_bus: SharedEventBus,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StreamQuery {
    /// Only stream events of this reservation
    pub reservation_id: Option<i32>,
}

fn to_sse(message: &EventMessage) -> SseEvent {
    let event = SseEvent::default()
        .event(message.event.event_type())
        .id(message.id.to_string());
    match serde_json::to_string(message) {
        Ok(json) => event.data(json),
        Err(e) => event.comment(format!("unserializable event: {}", e)),
    }
}

fn event_stream(subscriber: EventSubscriber) -> impl Stream<Item = Result<SseEvent, Infallible>> {
    stream::unfold(subscriber, |mut subscriber| async move {
        let message = subscriber.recv().await?;
        Some((Ok(to_sse(&message)), subscriber))
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/notifications/stream",
    tag = "Notifications",
    params(StreamQuery),
    responses(
        (status = 200, description = "Server-sent reservation events", body = String, content_type = "text/event-stream")
    )
)]
pub async fn notification_stream(
    State(state): State<NotificationState>,
    Query(query): Query<StreamQuery>,
) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>>> {
    let subscriber = match query.reservation_id {
        Some(id) => state.event_bus.subscribe_to(id),
        None => state.event_bus.subscribe(),
    };
    Sse::new(event_stream(subscriber))
        .keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::{create_event_bus, Event, ReservationCancelledEvent};
    use crate::interfaces::http::router::tests::{call, test_state, TestState};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use futures_util::StreamExt;

    #[tokio::test]
    async fn stream_yields_published_events() {
        let bus = create_event_bus();
        let stream = event_stream(bus.subscribe());
        futures_util::pin_mut!(stream);

        bus.publish(Event::ReservationCancelled(ReservationCancelledEvent {
            reservation_id: 3,
        }));

        let item = tokio::time::timeout(Duration::from_millis(200), stream.next())
            .await
            .expect("timeout")
            .expect("stream ended");
        assert!(item.is_ok());
        assert_eq!(bus.subscriber_count(), 1);
    }

    #[tokio::test]
    async fn filtered_stream_only_carries_its_reservation() {
        let bus = create_event_bus();
        let stream = event_stream(bus.subscribe_to(9));
        futures_util::pin_mut!(stream);

        for reservation_id in [8, 9] {
            bus.publish(Event::ReservationCancelled(ReservationCancelledEvent {
                reservation_id,
            }));
        }

        let first = tokio::time::timeout(Duration::from_millis(200), stream.next())
            .await
            .expect("timeout")
            .expect("stream ended");
        assert!(first.is_ok());
        assert!(
            tokio::time::timeout(Duration::from_millis(50), stream.next())
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn stream_endpoint_accepts_reservation_filter() {
        let TestState { router, .. } = test_state().await;
        let resp = call(
            &router,
            Request::get("/api/v1/notifications/stream?reservation_id=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/event-stream"));
    }
}
