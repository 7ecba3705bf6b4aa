//! Process-wide lifecycle for the notification endpoint.

use std::process::Command;

use events::{LinkEntry, NotificationEvent};
use log::{debug, info, warn};
use service::{network, AppState};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::error::Result;
use crate::router::define_routes;

/// Long-running façade over the event queue and the listening endpoint.
///
/// One instance per process: it owns the listener and the serve task.
/// Producers publish through it from any task or thread; consumers connect
/// to the URL it advertises.
pub struct NotificationService {
    state: AppState,
    advertised_url: String,
    shutdown: oneshot::Sender<()>,
    serve_task: JoinHandle<()>,
}

impl NotificationService {
    /// Binds the configured interface and port, starts serving on a
    /// background task, and returns once the endpoint is accepting
    /// connections.
    ///
    /// Advisory startup actions (liveness self-probe, optional browser
    /// launch) run before returning; their failure is logged and never
    /// aborts startup.
    pub async fn start(state: AppState) -> Result<Self> {
        let bind_addr = format!("{}:{}", state.config.interface, state.config.port);
        let listener = TcpListener::bind(&bind_addr).await?;
        let local_addr = listener.local_addr()?;

        // A wildcard bind is reachable on whatever interface routes LAN
        // traffic; advertise that one so the printed URL works from a phone.
        let advertised_ip = if local_addr.ip().is_unspecified() {
            network::discover_local_ip()
        } else {
            local_addr.ip()
        };
        let advertised_url = format!("http://{}:{}", advertised_ip, local_addr.port());

        let (shutdown, shutdown_signal) = oneshot::channel::<()>();
        let router = define_routes(state.clone());

        let serve_task = tokio::spawn(async move {
            let server = axum::serve(listener, router).with_graceful_shutdown(async move {
                let _ = shutdown_signal.await;
            });
            if let Err(e) = server.await {
                warn!("Notification endpoint exited with error: {e}");
            }
        });

        info!("Notification endpoint listening on {local_addr}, advertising {advertised_url}");

        let service = Self {
            state,
            advertised_url,
            shutdown,
            serve_task,
        };

        service.probe_self().await;
        if service.state.config.open_browser {
            service.open_in_browser();
        }

        Ok(service)
    }

    /// The URL a consumer should open to receive notifications.
    pub fn url(&self) -> &str {
        &self.advertised_url
    }

    /// Appends an event for delivery to whichever open stream drains it
    /// first. Infallible: the queue is unbounded and delivery is
    /// fire-and-forget.
    pub fn publish(&self, event: NotificationEvent) {
        info!("Publishing notification: {}", event.title);
        self.state.queue().enqueue(event);
    }

    pub fn publish_links(&self, title: impl Into<String>, links: Vec<LinkEntry>) {
        self.publish(NotificationEvent::with_links(title, links));
    }

    pub fn publish_message(&self, title: impl Into<String>, message: impl Into<String>) {
        self.publish(NotificationEvent::with_message(title, message));
    }

    /// Stops accepting connections and waits for the endpoint to wind down.
    /// Open stream sessions end through their own connection-drop path.
    pub async fn stop(self) {
        let _ = self.shutdown.send(());
        if let Err(e) = self.serve_task.await {
            warn!("Serve task ended abnormally: {e}");
        }
        info!("Notification endpoint stopped");
    }

    /// Best-effort GET against our own liveness route, to catch a bind that
    /// accepted but cannot actually answer (wrong advertised interface,
    /// local firewall).
    async fn probe_self(&self) {
        let probe_url = format!("{}/ping", self.advertised_url);
        match reqwest::get(&probe_url).await {
            Ok(response) if response.status().is_success() => {
                debug!("Liveness self-check passed");
            }
            Ok(response) => warn!("Liveness self-check returned {}", response.status()),
            Err(e) => warn!("Liveness self-check failed: {e}"),
        }
    }

    /// Best-effort launch of the local default browser on the advertised
    /// URL.
    fn open_in_browser(&self) {
        let (program, args): (&str, &[&str]) = if cfg!(target_os = "macos") {
            ("open", &[])
        } else if cfg!(target_os = "windows") {
            ("cmd", &["/C", "start"])
        } else {
            ("xdg-open", &[])
        };

        match Command::new(program)
            .args(args)
            .arg(&self.advertised_url)
            .spawn()
        {
            Ok(_) => debug!("Opened {} in the local browser", self.advertised_url),
            Err(e) => debug!("Could not open local browser: {e}"),
        }
    }
}
