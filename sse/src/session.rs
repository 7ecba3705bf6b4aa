use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use async_stream::stream;
use axum::response::sse::Event;
use events::EventQueue;
use futures::{Stream, StreamExt};
use log::{debug, error};

use crate::message::ConnectionAck;

/// One open event-stream connection.
///
/// The session holds a shared reference to the queue and nothing else; the
/// stream itself is owned by axum's response machinery. When the peer
/// disconnects (or the server shuts down) the stream is dropped mid-drain,
/// which is the session's only termination path. Events not yet dequeued at
/// that point stay in the queue for the next session.
pub struct StreamSession {
    queue: Arc<EventQueue>,
    poll_interval: Duration,
}

impl StreamSession {
    pub fn new(queue: Arc<EventQueue>, poll_interval: Duration) -> Self {
        Self {
            queue,
            poll_interval,
        }
    }

    /// Consumes the session into the stream of SSE records it will deliver:
    /// the connection ack first, then each stolen queue event in FIFO order,
    /// indefinitely.
    pub fn into_stream(self) -> impl Stream<Item = Result<Event, Infallible>> {
        self.records().map(|json| Ok(Event::default().data(json)))
    }

    /// The session's records as serialized JSON payloads, one per event.
    fn records(self) -> impl Stream<Item = String> {
        stream! {
            let _guard = DrainGuard;

            match serde_json::to_string(&ConnectionAck::default()) {
                Ok(json) => yield json,
                Err(e) => error!("Failed to serialize connection ack: {e}"),
            }

            loop {
                match self.queue.try_dequeue() {
                    Some(event) => match serde_json::to_string(&event) {
                        Ok(json) => yield json,
                        Err(e) => error!("Failed to serialize notification event: {e}"),
                    },
                    None => self.queue.wait_for_event(self.poll_interval).await,
                }
            }
        }
    }
}

/// Logs the end of a drain loop. The loop itself never returns; it ends only
/// by the stream being dropped, so the log lives in a Drop impl.
struct DrainGuard;

impl Drop for DrainGuard {
    fn drop(&mut self) {
        debug!("Event stream session ended");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use events::{LinkEntry, NotificationEvent};
    use serde_json::Value;
    use std::collections::HashSet;
    use std::time::Instant;
    use tokio::time::timeout;

    fn session(queue: &Arc<EventQueue>) -> StreamSession {
        StreamSession::new(Arc::clone(queue), Duration::from_millis(50))
    }

    async fn next_value(stream: &mut (impl Stream<Item = String> + Unpin)) -> Value {
        let json = timeout(Duration::from_secs(5), stream.next())
            .await
            .expect("timed out waiting for a record")
            .expect("stream ended unexpectedly");
        serde_json::from_str(&json).unwrap()
    }

    #[tokio::test]
    async fn ack_comes_first_even_with_a_backlog() {
        let queue = Arc::new(EventQueue::new());
        queue.enqueue(NotificationEvent::with_message("pendente", "antes do connect"));

        let mut records = Box::pin(session(&queue).records());

        let ack = next_value(&mut records).await;
        assert_eq!(ack["tipo"], "conexao");
        assert_eq!(ack["mensagem"], "connected");

        let event = next_value(&mut records).await;
        assert_eq!(event["titulo"], "pendente");
    }

    #[tokio::test]
    async fn single_session_sees_events_in_publish_order() {
        let queue = Arc::new(EventQueue::new());
        for n in 0..5 {
            queue.enqueue(NotificationEvent::with_message(format!("event-{n}"), "corpo"));
        }

        let mut records = Box::pin(session(&queue).records());
        next_value(&mut records).await; // ack

        for n in 0..5 {
            let event = next_value(&mut records).await;
            assert_eq!(event["titulo"], format!("event-{n}"));
        }
    }

    #[tokio::test]
    async fn result_event_reaches_the_stream_with_its_links() {
        let queue = Arc::new(EventQueue::new());
        queue.enqueue(NotificationEvent::with_links(
            "Pesquisa: rust",
            vec![LinkEntry::new("Rust Lang", "https://rust-lang.org")],
        ));

        let mut records = Box::pin(session(&queue).records());
        next_value(&mut records).await; // ack

        let event = next_value(&mut records).await;
        assert_eq!(event["titulo"], "Pesquisa: rust");
        assert_eq!(event["links"][0]["titulo"], "Rust Lang");
        assert_eq!(event["links"][0]["url"], "https://rust-lang.org");
        assert!(event.get("mensagem").is_none());
    }

    #[tokio::test]
    async fn session_survives_an_idle_period_and_picks_up_a_late_event() {
        let queue = Arc::new(EventQueue::new());
        let mut records = Box::pin(session(&queue).records());
        next_value(&mut records).await; // ack

        let publisher = {
            let queue = Arc::clone(&queue);
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(300)).await;
                queue.enqueue(NotificationEvent::with_message("tardio", "depois da pausa"));
                Instant::now()
            })
        };

        let event = next_value(&mut records).await;
        let published_at = publisher.await.unwrap();

        assert_eq!(event["titulo"], "tardio");
        // One polling interval plus generous slack.
        assert!(published_at.elapsed() < Duration::from_millis(500));
    }

    #[tokio::test]
    async fn concurrent_sessions_partition_events_without_duplication() {
        const TOTAL: usize = 40;

        let queue = Arc::new(EventQueue::new());

        let mut drains = Vec::new();
        for _ in 0..2 {
            let queue = Arc::clone(&queue);
            drains.push(tokio::spawn(async move {
                let mut records =
                    Box::pin(StreamSession::new(queue, Duration::from_millis(10)).records());
                let _ = records.next().await; // ack

                let mut seen = Vec::new();
                while let Ok(Some(json)) =
                    timeout(Duration::from_millis(500), records.next()).await
                {
                    let value: Value = serde_json::from_str(&json).unwrap();
                    seen.push(value["titulo"].as_str().unwrap().to_string());
                }
                seen
            }));
        }

        for n in 0..TOTAL {
            queue.enqueue(NotificationEvent::with_message(format!("event-{n}"), "corpo"));
        }

        let mut union = HashSet::new();
        let mut count = 0;
        for drain in drains {
            for title in drain.await.unwrap() {
                assert!(union.insert(title), "an event was delivered to two sessions");
                count += 1;
            }
        }

        assert_eq!(count, TOTAL, "some events were lost");
        assert!(queue.is_empty());
    }
}
