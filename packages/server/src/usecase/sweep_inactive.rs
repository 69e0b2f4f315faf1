//! UseCase: 非アクティブな参加者のスイープ
//!
//! 取り除いた参加者には `error` を送ってから送信チャンネルを登録解除します。
//! 送信タスクはキューに残ったイベントを送り切った後に終了し、接続が閉じます。

use std::sync::Arc;

use crate::domain::{MatchmakerRepository, MessagePusher, ParticipantId, ServerEvent};

use super::status::broadcast_status;

pub const INACTIVITY_DISCONNECT_MESSAGE: &str = "Disconnected due to inactivity";

/// スイープのユースケース
pub struct SweepInactiveUseCase {
    repository: Arc<dyn MatchmakerRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    threshold_millis: i64,
}

impl SweepInactiveUseCase {
    pub fn new(
        repository: Arc<dyn MatchmakerRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        threshold_millis: i64,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            threshold_millis,
        }
    }

    /// スイープを実行し、取り除いた参加者の ID を返す
    pub async fn execute(&self) -> Vec<ParticipantId> {
        let removed = self.repository.sweep_inactive(self.threshold_millis).await;

        for id in &removed {
            let event = ServerEvent::Error {
                message: INACTIVITY_DISCONNECT_MESSAGE.to_string(),
            };
            if let Err(e) = self.message_pusher.push_to(id, event) {
                tracing::debug!("Could not notify inactive user {}: {}", id, e);
            }
            self.message_pusher.unregister_client(id);
        }

        if !removed.is_empty() {
            broadcast_status(self.repository.as_ref(), self.message_pusher.as_ref()).await;
        }
        removed
    }
}
