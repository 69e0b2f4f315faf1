//! UseCase: 新しいパートナーの要求（Next）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - NextPartnerUseCase::execute() メソッド
//!
//! ### どのような状況を想定しているか
//! - 正常系：要求者が待機中の相手と先にペアになり、元のパートナーは後ろに並ぶ
//! - 異常系：入室前の Next は何もしない

use std::sync::Arc;

use crate::domain::{MatchmakerRepository, MessagePusher, NextPartnerOutcome, ParticipantId};

use super::status::broadcast_status;

/// Next のユースケース
pub struct NextPartnerUseCase {
    repository: Arc<dyn MatchmakerRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl NextPartnerUseCase {
    pub fn new(
        repository: Arc<dyn MatchmakerRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Next を実行し、全参加者に status_update を送る
    ///
    /// 入室前（set_name 前）の参加者からの Next はログに残すだけで何もしません。
    pub async fn execute(&self, id: &ParticipantId) -> NextPartnerOutcome {
        let outcome = self.repository.request_next_partner(id).await;
        if outcome == NextPartnerOutcome::UnknownParticipant {
            tracing::debug!("Next from {} before joining, ignoring", id);
            return outcome;
        }

        broadcast_status(self.repository.as_ref(), self.message_pusher.as_ref()).await;
        outcome
    }
}
