//! WebSocket message DTOs.
//!
//! Every frame is a JSON object tagged by `"type"`:
//!
//! ```text
//! client -> server: {"type":"set_name","name":"Alice"}
//!                   {"type":"message","text":"hi"}
//!                   {"type":"typing","isTyping":true}
//!                   {"type":"next_partner"}
//!                   {"type":"heartbeat"}
//! server -> client: {"type":"partner_found","partnerName":"Bob"}
//!                   {"type":"status_update","waitingCount":1,...}
//! ```

use serde::{Deserialize, Serialize};

/// Inbound events sent by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    SetName {
        #[serde(default)]
        name: String,
    },
    Message {
        text: String,
    },
    Typing {
        is_typing: bool,
    },
    NextPartner,
    Heartbeat,
}

/// Outbound events pushed to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    PartnerFound {
        partner_name: String,
    },
    PartnerLeft {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    Message {
        text: String,
    },
    Typing,
    StopTyping,
    HeartbeatAck,
    StatusUpdate {
        waiting_count: usize,
        active_session_count: usize,
        average_wait_time_seconds: u64,
    },
    Error {
        message: String,
    },
}
