//! Per-connection session management
//!
//! Each WebSocket connection gets its own Session sharing the concierge.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;

use smarttravel::TravelConcierge;

use crate::protocol::{ClientMessage, ServerMessage};

/// Per-connection session state
pub struct Session {
    /// Unique session identifier
    id: String,

    /// The shared concierge
    concierge: Arc<TravelConcierge>,

    /// Channel to send messages to WebSocket writer task
    ws_tx: mpsc::UnboundedSender<ServerMessage>,

    /// Channel to receive messages from WebSocket reader task
    ws_rx: mpsc::UnboundedReceiver<ClientMessage>,
}

impl Session {
    /// Create a new session with the given WebSocket channels
    pub fn new(
        concierge: Arc<TravelConcierge>,
        ws_tx: mpsc::UnboundedSender<ServerMessage>,
        ws_rx: mpsc::UnboundedReceiver<ClientMessage>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            concierge,
            ws_tx,
            ws_rx,
        }
    }

    /// Get the session ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Main event loop
    pub async fn run(&mut self) -> Result<()> {
        // Send connected message
        self.send(ServerMessage::Connected {
            session_id: self.id.clone(),
        })?;

        while let Some(msg) = self.ws_rx.recv().await {
            self.handle_client_message(msg).await?;
        }

        // Channel closed - client disconnected
        tracing::info!("Session {}: client disconnected", self.id);
        Ok(())
    }

    /// Send a message to the WebSocket
    fn send(&self, msg: ServerMessage) -> Result<()> {
        self.ws_tx
            .send(msg)
            .map_err(|_| anyhow::anyhow!("WebSocket channel closed"))
    }

    /// Handle a message from the client
    async fn handle_client_message(&mut self, msg: ClientMessage) -> Result<()> {
        match msg {
            ClientMessage::PlanTrip { request } => {
                tracing::debug!(
                    "Session {}: planning trip to {}",
                    self.id,
                    request.destination
                );

                match self.concierge.plan_trip(&request).await {
                    Ok(itinerary) => self.send(ServerMessage::Itinerary { itinerary })?,
                    Err(err) => {
                        tracing::warn!("Session {}: plan_trip failed: {:#}", self.id, err);
                        self.send(ServerMessage::Error {
                            message: format!("{:#}", err),
                            fatal: false,
                        })?;
                    }
                }
            }

            ClientMessage::Query { content } => {
                tracing::debug!("Session {}: received query", self.id);

                match self.concierge.answer(&content).await {
                    Ok(answer) => self.send(ServerMessage::Answer { content: answer })?,
                    Err(err) => {
                        tracing::warn!("Session {}: query failed: {:#}", self.id, err);
                        self.send(ServerMessage::Error {
                            message: format!("{:#}", err),
                            fatal: false,
                        })?;
                    }
                }
            }

            ClientMessage::GetStatus => {
                self.send(ServerMessage::Status {
                    status: self.concierge.status(),
                })?;
            }

            ClientMessage::Ping => {
                self.send(ServerMessage::Pong)?;
            }
        }

        Ok(())
    }
}
