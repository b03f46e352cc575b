// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live notice stream.
//!
//! Every notice the engines produce is logged and broadcast to the
//! WebSocket clients connected to `/live`. This is the server's only
//! delivery channel; mail or push delivery would be another
//! [`NoticeSink`].
//!
//! - clients receive notices published after they connect
//! - nothing is accepted from clients
//! - a slow client loses the oldest buffered notices

use autosub::{Notice, NoticeSink};
use axum::{
    extract::{
        State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{SinkExt, stream::StreamExt};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Maximum number of events to buffer in the broadcast channel.
const EVENT_BUFFER_SIZE: usize = 100;

/// A message on the live stream.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LiveEvent {
    /// A notice produced by a leave decision, assignment run or scan.
    Notice {
        /// Rendered subject line.
        subject: String,
        /// The notice itself.
        notice: Notice,
    },
    /// Connection confirmation (sent on initial connect).
    Connected {
        /// Server timestamp (ISO 8601).
        timestamp: String,
    },
}

/// Broadcaster for live notices.
#[derive(Clone)]
pub struct LiveNoticeBroadcaster {
    tx: broadcast::Sender<LiveEvent>,
}

impl LiveNoticeBroadcaster {
    /// Creates a new broadcaster with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self { tx }
    }

    /// Subscribes to the event stream.
    ///
    /// Events sent before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<LiveEvent> {
        self.tx.subscribe()
    }
}

impl Default for LiveNoticeBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl NoticeSink for LiveNoticeBroadcaster {
    fn publish(&self, notice: &Notice) {
        let subject: String = notice.subject_line();
        info!(
            recipient = notice.recipient_email().unwrap_or("-"),
            subject = %subject,
            "Notice"
        );

        let event: LiveEvent = LiveEvent::Notice {
            subject,
            notice: notice.clone(),
        };
        match self.tx.send(event) {
            Ok(count) => debug!(receivers = count, "Broadcast live notice"),
            Err(_) => debug!("No receivers for live notice"),
        }
    }
}

/// Handles WebSocket upgrade requests for the live notice stream.
pub async fn live_notices_handler(
    ws: WebSocketUpgrade,
    AxumState(broadcaster): AxumState<Arc<LiveNoticeBroadcaster>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, broadcaster))
}

/// Sends a connection confirmation, then streams notices until the
/// client disconnects or an error occurs.
async fn handle_socket(socket: WebSocket, broadcaster: Arc<LiveNoticeBroadcaster>) {
    info!("Client connected to live notice stream");

    let (mut sender, mut receiver) = socket.split();
    let mut rx: broadcast::Receiver<LiveEvent> = broadcaster.subscribe();

    let connected_event: LiveEvent = LiveEvent::Connected {
        timestamp: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| String::from("unknown")),
    };

    if let Ok(json) = serde_json::to_string(&connected_event)
        && sender.send(Message::Text(json.into())).await.is_err()
    {
        warn!("Failed to send connection confirmation");
        return;
    }

    let mut send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(json) => {
                        if sender.send(Message::Text(json.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => error!(?e, "Failed to serialize live event"),
                },
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Live client fell behind, notices dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(_) | Message::Binary(_)) => {
                    warn!("Received unexpected message from client, ignoring");
                }
                Ok(Message::Close(_)) => {
                    debug!("Client sent close frame");
                    break;
                }
                // Axum answers pings.
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Err(e) => {
                    error!(?e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            debug!("Send task completed");
            recv_task.abort();
        }
        _ = &mut recv_task => {
            debug!("Receive task completed");
            send_task.abort();
        }
    }

    info!("Client disconnected from live notice stream");
}
