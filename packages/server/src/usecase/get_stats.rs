//! UseCase: 統計情報・デバッグ情報の取得

use std::sync::Arc;

use crate::domain::{DebugState, MatchmakerRepository, StatsSnapshot};

/// 統計情報取得のユースケース
pub struct GetStatsUseCase {
    repository: Arc<dyn MatchmakerRepository>,
}

impl GetStatsUseCase {
    pub fn new(repository: Arc<dyn MatchmakerRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> StatsSnapshot {
        self.repository.stats().await
    }
}

/// デバッグ情報取得のユースケース
///
/// 取得した内部状態はログにも出力します。
pub struct GetDebugStateUseCase {
    repository: Arc<dyn MatchmakerRepository>,
}

impl GetDebugStateUseCase {
    pub fn new(repository: Arc<dyn MatchmakerRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> DebugState {
        let state = self.repository.debug_state().await;
        let queue: Vec<&str> = state.queue.iter().map(|id| id.short()).collect();
        tracing::info!(
            "Debug state: queue={:?}, sessions={}, participants={}",
            queue,
            state.sessions.len(),
            state.participants.len()
        );
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DisplayName;
    use crate::usecase::test_support::{connect, create_harness};

    #[tokio::test]
    async fn test_stats_reflect_current_state() {
        // テスト項目: 統計情報に入室数・待機数・セッション数・経過時間が反映される
        // given (前提条件):
        let harness = create_harness();
        let usecase = GetStatsUseCase::new(harness.repository.clone());
        let mut receivers = Vec::new();
        for value in ["a", "b", "c"] {
            let (id, rx) = connect(&harness.message_pusher, value);
            receivers.push(rx);
            harness.repository.admit(id, DisplayName::anonymous()).await;
        }
        harness.clock.advance(5_000);

        // when (操作):
        let stats = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(stats.counters.total_admissions, 3);
        assert_eq!(stats.counters.successful_pairings, 1);
        assert_eq!(stats.status.waiting_count, 1);
        assert_eq!(stats.status.active_session_count, 1);
        assert_eq!(stats.status.average_wait_time_seconds, 5);
        assert_eq!(stats.total_users, 3);
        assert_eq!(stats.uptime_seconds, 5);
    }

    #[tokio::test]
    async fn test_debug_state_lists_queue_order() {
        // テスト項目: デバッグ情報にキューの並び順とセッションが含まれる
        // given (前提条件):
        let harness = create_harness();
        let usecase = GetDebugStateUseCase::new(harness.repository.clone());
        let (a, _rx_a) = connect(&harness.message_pusher, "a");
        let (b, _rx_b) = connect(&harness.message_pusher, "b");
        let (c, _rx_c) = connect(&harness.message_pusher, "c");
        for id in [&a, &b, &c] {
            harness.repository.admit(id.clone(), DisplayName::anonymous()).await;
        }

        // when (操作):
        let state = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(state.queue, vec![c]);
        assert_eq!(state.sessions, vec![(a, b)]);
        assert_eq!(state.participants.len(), 3);
    }
}
