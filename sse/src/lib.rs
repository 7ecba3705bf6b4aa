//! Server-Sent Events (SSE) transport for notification delivery.
//!
//! This crate owns the wire side of the delivery mechanism: the record
//! format written onto an open event stream, and the per-connection drain
//! session that moves events from the shared queue to the browser.
//!
//! # Delivery model
//!
//! - **One session per connection**: every accepted `/notifications` request
//!   gets its own [`StreamSession`] with exclusive ownership of the stream.
//! - **Steal, not broadcast**: sessions compete for the shared queue; an
//!   event is delivered to whichever session dequeues it first and to no one
//!   else. With a single connected tab this degenerates to plain FIFO
//!   delivery.
//! - **Ack first**: every session emits a synthetic connection record before
//!   any queued event, so the page can tell "stream open, nothing yet" apart
//!   from "no stream".
//! - **Fire-and-forget**: there is no acknowledgement or retry. A session
//!   that loses its peer simply ends; undelivered queue contents remain for
//!   the next session.
//!
//! # Modules
//!
//! - `message`: the connection-ack record and its JSON shape
//! - `session`: the drain loop behind each open stream

pub mod message;
pub mod session;

pub use session::StreamSession;
