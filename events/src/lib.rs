//! Notification event model and delivery queue.
//!
//! This crate defines the data that flows from producers (the interactive
//! search loop) to consumers (browser tabs holding an open event stream),
//! plus the process-wide queue that hands each pending event to exactly one
//! stream.
//!
//! It has no dependencies on other workspace crates so that both the
//! producer-facing and transport-facing layers can depend on it without
//! cycles.
//!
//! # Wire format
//!
//! Events serialize to the JSON the notification page expects, with the
//! original protocol's Portuguese keys:
//!
//! - result event: `{"titulo": "...", "links": [{"titulo": "...", "url": "..."}]}`
//! - message event: `{"titulo": "...", "mensagem": "..."}`
//!
//! Exactly one of `links`/`mensagem` appears per event. This is enforced by
//! construction: [`Payload`] is an enum, so an event with both (or neither)
//! cannot exist.

use serde::{Deserialize, Serialize};

pub mod queue;

pub use queue::EventQueue;

/// A single result link as rendered by the notification page.
///
/// There is no uniqueness constraint; the same page may legitimately show up
/// again in a later search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntry {
    #[serde(rename = "titulo")]
    pub title: String,
    pub url: String,
}

impl LinkEntry {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// The body of a notification: an ordered list of result links, or a
/// free-text message for error and status reports.
///
/// An empty `links` list is a valid value distinct from a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Links { links: Vec<LinkEntry> },
    Message {
        #[serde(rename = "mensagem")]
        message: String,
    },
}

/// One notification, immutable once built, delivered to at most one
/// connected stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEvent {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(flatten)]
    pub payload: Payload,
}

impl NotificationEvent {
    /// A result notification carrying an ordered list of links.
    pub fn with_links(title: impl Into<String>, links: Vec<LinkEntry>) -> Self {
        Self {
            title: title.into(),
            payload: Payload::Links { links },
        }
    }

    /// A free-text notification, used for error and status reports.
    pub fn with_message(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            payload: Payload::Message {
                message: message.into(),
            },
        }
    }
}
