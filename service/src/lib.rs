use std::sync::Arc;

use events::EventQueue;

pub mod config;
pub mod logging;
pub mod network;

pub use config::Config;

// Service-level state containing only infrastructure concerns.
// Needs to implement Clone to be able to be passed into Router as State.
//
// The event queue is created exactly once, here, and every clone of the
// state shares it. Nothing else in the process constructs a queue, which is
// what makes the at-most-once delivery contract hold across the producer
// API and all transport sessions.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    queue: Arc<EventQueue>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            queue: Arc::new(EventQueue::new()),
        }
    }

    pub fn queue(&self) -> &Arc<EventQueue> {
        &self.queue
    }
}
