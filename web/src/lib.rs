//! HTTP surface of the notification server.
//!
//! A deliberately small, fixed route set (notification page, liveness
//! probe, event stream) plus the [`NotificationService`] lifecycle façade
//! that binds the endpoint, serves it on a background task, and exposes the
//! producer-facing publish API.

pub mod controller;
pub mod error;
pub mod router;
pub mod server;

pub use router::define_routes;
pub use server::NotificationService;
