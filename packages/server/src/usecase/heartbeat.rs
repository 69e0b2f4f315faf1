//! UseCase: ハートビート

use std::sync::Arc;

use crate::domain::{MatchmakerRepository, MessagePusher, ParticipantId, ServerEvent};

/// ハートビートのユースケース
///
/// 最終アクティビティを更新して `heartbeat_ack` を返します。
/// 入室前の接続にも応答します。
pub struct HeartbeatUseCase {
    repository: Arc<dyn MatchmakerRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl HeartbeatUseCase {
    pub fn new(
        repository: Arc<dyn MatchmakerRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Registry に存在して最終アクティビティを更新できたら true
    pub async fn execute(&self, id: &ParticipantId) -> bool {
        let touched = self.repository.touch(id).await;
        if let Err(e) = self.message_pusher.push_to(id, ServerEvent::HeartbeatAck) {
            tracing::debug!("Failed to ack heartbeat of {}: {}", id, e);
        }
        touched
    }
}
