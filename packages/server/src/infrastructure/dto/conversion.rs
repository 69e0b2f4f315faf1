//! Conversion logic between DTOs and domain models.

use crate::domain::{DebugState, ServerEvent, StatsSnapshot, StatusSnapshot};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// Domain → WebSocket DTO
// ========================================

impl From<StatusSnapshot> for dto::ServerMessage {
    fn from(status: StatusSnapshot) -> Self {
        Self::StatusUpdate {
            waiting_count: status.waiting_count,
            active_session_count: status.active_session_count,
            average_wait_time_seconds: status.average_wait_time_seconds,
        }
    }
}

impl From<ServerEvent> for dto::ServerMessage {
    fn from(event: ServerEvent) -> Self {
        match event {
            ServerEvent::PartnerFound { partner_name } => Self::PartnerFound {
                partner_name: partner_name.as_str().to_string(),
            },
            ServerEvent::PartnerLeft { reason } => Self::PartnerLeft {
                reason: reason.map(|reason| reason.as_str().to_string()),
            },
            ServerEvent::Message { text } => Self::Message {
                text: text.into_string(),
            },
            ServerEvent::Typing => Self::Typing,
            ServerEvent::StopTyping => Self::StopTyping,
            ServerEvent::HeartbeatAck => Self::HeartbeatAck,
            ServerEvent::StatusUpdate(status) => status.into(),
            ServerEvent::Error { message } => Self::Error { message },
        }
    }
}

// ========================================
// Domain → HTTP DTO
// ========================================

impl From<StatsSnapshot> for http::StatusResponse {
    fn from(stats: StatsSnapshot) -> Self {
        Self {
            total_admissions: stats.counters.total_admissions,
            successful_pairings: stats.counters.successful_pairings,
            next_requests: stats.counters.next_requests,
            relayed_messages: stats.counters.relayed_messages,
            waiting_count: stats.status.waiting_count,
            active_session_count: stats.status.active_session_count,
            average_wait_time_seconds: stats.status.average_wait_time_seconds,
            total_users: stats.total_users,
            uptime_seconds: stats.uptime_seconds,
            worker_id: std::process::id(),
        }
    }
}

impl From<DebugState> for http::DebugResponse {
    fn from(state: DebugState) -> Self {
        Self {
            queue: state.queue.into_iter().map(|id| id.into_string()).collect(),
            sessions: state
                .sessions
                .into_iter()
                .map(|(a, b)| http::SessionInfo {
                    a: a.into_string(),
                    b: b.into_string(),
                })
                .collect(),
            participants: state
                .participants
                .into_iter()
                .map(|participant| http::ParticipantInfo {
                    state: participant.state.as_str().to_string(),
                    id: participant.id.into_string(),
                    name: participant.name.as_str().to_string(),
                    connected_at: participant.connected_at.value(),
                    last_activity_at: participant.last_activity_at.value(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ConnectionState, Counters, DisplayName, MessageText, Participant, ParticipantId,
        PartnerLeftReason, Timestamp,
    };

    #[test]
    fn test_partner_left_reason_is_human_readable() {
        // テスト項目: partner_left の理由は表示用の文字列に変換される
        // given (前提条件):
        let event = ServerEvent::PartnerLeft {
            reason: Some(PartnerLeftReason::RequestedNewMatch),
        };

        // when (操作):
        let message: dto::ServerMessage = event.into();

        // then (期待する結果):
        assert_eq!(
            message,
            dto::ServerMessage::PartnerLeft {
                reason: Some("partner requested a new match".to_string())
            }
        );
    }

    #[test]
    fn test_message_text_is_relayed_verbatim() {
        // テスト項目: メッセージ本文は加工されずに DTO に載る
        let text = MessageText::new("  <b>hi</b>  ".to_string()).unwrap();
        let message: dto::ServerMessage = ServerEvent::Message { text }.into();
        assert_eq!(
            message,
            dto::ServerMessage::Message {
                text: "  <b>hi</b>  ".to_string()
            }
        );
    }

    #[test]
    fn test_stats_snapshot_to_status_response() {
        // テスト項目: 統計スナップショットが /status のレスポンスに変換される
        // given (前提条件):
        let stats = StatsSnapshot {
            counters: Counters {
                total_admissions: 5,
                successful_pairings: 2,
                next_requests: 1,
                relayed_messages: 9,
            },
            status: StatusSnapshot {
                waiting_count: 1,
                active_session_count: 2,
                average_wait_time_seconds: 3,
            },
            total_users: 5,
            uptime_seconds: 60,
        };

        // when (操作):
        let response: http::StatusResponse = stats.into();

        // then (期待する結果):
        assert_eq!(response.total_admissions, 5);
        assert_eq!(response.relayed_messages, 9);
        assert_eq!(response.active_session_count, 2);
        assert_eq!(response.worker_id, std::process::id());
    }

    #[test]
    fn test_debug_state_to_debug_response() {
        // テスト項目: デバッグ用の内部状態が /debug のレスポンスに変換される
        // given (前提条件):
        let a = ParticipantId::new("a".to_string()).unwrap();
        let b = ParticipantId::new("b".to_string()).unwrap();
        let mut participant = Participant::new(a.clone(), DisplayName::anonymous(), Timestamp::new(10));
        participant.state = ConnectionState::Chatting;
        let state = DebugState {
            queue: vec![],
            sessions: vec![(a, b)],
            participants: vec![participant],
        };

        // when (操作):
        let response: http::DebugResponse = state.into();

        // then (期待する結果):
        assert_eq!(response.sessions[0].a, "a");
        assert_eq!(response.sessions[0].b, "b");
        assert_eq!(response.participants[0].name, "Anonymous");
        assert_eq!(response.participants[0].state, "chatting");
        assert_eq!(response.participants[0].connected_at, 10);
    }
}
