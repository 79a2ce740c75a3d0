//! WebSocket protocol definitions
//!
//! Defines the message types for client-server communication.

use serde::{Deserialize, Serialize};
use smarttravel::{ConciergeStatus, TravelItinerary, TravelRequest};

// ============================================================================
// Client → Server Messages
// ============================================================================

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Plan a trip from a structured request
    PlanTrip { request: TravelRequest },

    /// Free-text travel query
    Query { content: String },

    /// Request concierge and agent status
    GetStatus,

    /// Ping to keep connection alive
    Ping,
}

// ============================================================================
// Server → Client Messages
// ============================================================================

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Session established
    Connected { session_id: String },

    /// Completed trip plan (response to PlanTrip)
    Itinerary { itinerary: TravelItinerary },

    /// Model answer to a free-text query (response to Query)
    Answer { content: String },

    /// Concierge status (response to GetStatus)
    Status { status: ConciergeStatus },

    /// Pong response to Ping
    Pong,

    /// Error occurred
    Error {
        message: String,
        /// If true, the session is no longer usable
        fatal: bool,
    },
}
