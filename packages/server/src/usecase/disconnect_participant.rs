//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 送信チャンネルの登録解除、Registry からの削除、残されたパートナーの再キュー
//!
//! ### どのような状況を想定しているか
//! - 正常系：セッション中の切断（パートナーに通知して待機に戻す）
//! - エッジケース：入室前の切断、二重の切断

use std::sync::Arc;

use crate::domain::{MatchmakerRepository, MessagePusher, ParticipantId, PartnerLeftReason};

use super::status::broadcast_status;

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    repository: Arc<dyn MatchmakerRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectParticipantUseCase {
    pub fn new(
        repository: Arc<dyn MatchmakerRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 参加者切断を実行
    ///
    /// # Returns
    ///
    /// 残されたパートナーの ID（セッション中だった場合）
    pub async fn execute(&self, id: &ParticipantId) -> Option<ParticipantId> {
        self.message_pusher.unregister_client(id);

        let orphan = self
            .repository
            .disconnect(id, PartnerLeftReason::Disconnected)
            .await;

        broadcast_status(self.repository.as_ref(), self.message_pusher.as_ref()).await;
        orphan
    }
}
