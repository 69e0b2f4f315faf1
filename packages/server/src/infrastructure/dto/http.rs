//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// `GET /status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub total_admissions: u64,
    pub successful_pairings: u64,
    pub next_requests: u64,
    pub relayed_messages: u64,
    pub waiting_count: usize,
    pub active_session_count: usize,
    pub average_wait_time_seconds: u64,
    pub total_users: usize,
    pub uptime_seconds: u64,
    pub worker_id: u32,
}

/// `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    /// RFC 3339
    pub timestamp: String,
    pub uptime_seconds: u64,
}

/// `GET /debug`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugResponse {
    pub queue: Vec<String>,
    pub sessions: Vec<SessionInfo>,
    pub participants: Vec<ParticipantInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub a: String,
    pub b: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantInfo {
    pub id: String,
    pub name: String,
    pub state: String,
    pub connected_at: i64,
    pub last_activity_at: i64,
}
