//! UseCase: 入室処理（set_name）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - AdmitParticipantUseCase::execute() メソッド
//! - 表示名の検証、入室とペアリング、入室済みの場合の改名
//!
//! ### どのような状況を想定しているか
//! - 正常系：1 人目は待機、2 人目でペア成立
//! - 正常系：入室済みの参加者の set_name は改名のみ
//! - 異常系：長すぎる表示名、接続が切れている参加者

use std::sync::Arc;

use crate::domain::{DisplayName, MatchmakerRepository, MessagePusher, ParticipantId, ServerEvent};

use super::error::AdmitError;

/// `execute` の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmitOutcome {
    /// キューに入った（`paired` はこの入室で成立したセッション数）
    Admitted { paired: usize },
    /// 既に入室済みで、表示名だけ変更した
    Renamed,
}

/// 入室のユースケース
pub struct AdmitParticipantUseCase {
    repository: Arc<dyn MatchmakerRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl AdmitParticipantUseCase {
    pub fn new(
        repository: Arc<dyn MatchmakerRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 入室を実行
    ///
    /// # Arguments
    ///
    /// * `id` - 参加者 ID
    /// * `raw_name` - クライアントから届いた表示名（未検証）
    ///
    /// # Returns
    ///
    /// * `Ok(AdmitOutcome)` - 入室または改名に成功
    /// * `Err(AdmitError)` - 表示名が不正、または接続が切れている
    pub async fn execute(
        &self,
        id: ParticipantId,
        raw_name: &str,
    ) -> Result<AdmitOutcome, AdmitError> {
        let name = DisplayName::new(raw_name)?;

        if !self.message_pusher.is_connected(&id) {
            return Err(AdmitError::NotConnected(id.as_str().to_string()));
        }

        if self.repository.contains(&id).await {
            self.repository.rename(&id, name).await;
            return Ok(AdmitOutcome::Renamed);
        }

        let paired = self.repository.admit(id.clone(), name).await;

        let status = self.repository.status().await;
        if let Err(e) = self
            .message_pusher
            .push_to(&id, ServerEvent::StatusUpdate(status))
        {
            tracing::warn!("Failed to send status to {}: {}", id, e);
        }

        Ok(AdmitOutcome::Admitted { paired })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConnectionState, MockMessagePusher, ValueObjectError};
    use crate::usecase::test_support::{connect, create_harness, drain};

    #[tokio::test]
    async fn test_first_participant_waits() {
        // テスト項目: 1 人目は待機状態になり、status_update だけを受け取る
        // given (前提条件):
        let harness = create_harness();
        let usecase =
            AdmitParticipantUseCase::new(harness.repository.clone(), harness.message_pusher.clone());
        let (alice, mut rx) = connect(&harness.message_pusher, "alice");

        // when (操作):
        let result = usecase.execute(alice.clone(), "Alice").await;

        // then (期待する結果):
        assert_eq!(result, Ok(AdmitOutcome::Admitted { paired: 0 }));
        assert_eq!(
            harness.repository.connection_state(&alice).await,
            Some(ConnectionState::Waiting)
        );
        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            ServerEvent::StatusUpdate(status) if status.waiting_count == 1
        ));
    }

    #[tokio::test]
    async fn test_second_participant_pairs() {
        // テスト項目: 2 人目の入室でペアが成立し、双方に partner_found が届く
        // given (前提条件):
        let harness = create_harness();
        let usecase =
            AdmitParticipantUseCase::new(harness.repository.clone(), harness.message_pusher.clone());
        let (alice, mut rx_alice) = connect(&harness.message_pusher, "alice");
        let (bob, mut rx_bob) = connect(&harness.message_pusher, "bob");
        usecase.execute(alice.clone(), "Alice").await.unwrap();
        drain(&mut rx_alice);

        // when (操作):
        let result = usecase.execute(bob.clone(), "  Bob  ").await;

        // then (期待する結果):
        assert_eq!(result, Ok(AdmitOutcome::Admitted { paired: 1 }));
        assert_eq!(
            drain(&mut rx_alice),
            vec![ServerEvent::PartnerFound {
                partner_name: DisplayName::new("Bob").unwrap()
            }]
        );
        let bob_events = drain(&mut rx_bob);
        assert_eq!(
            bob_events[0],
            ServerEvent::PartnerFound {
                partner_name: DisplayName::new("Alice").unwrap()
            }
        );
        assert!(matches!(bob_events[1], ServerEvent::StatusUpdate(_)));
    }

    #[tokio::test]
    async fn test_blank_name_becomes_anonymous() {
        // テスト項目: 空白だけの表示名は "Anonymous" になる
        // given (前提条件):
        let harness = create_harness();
        let usecase =
            AdmitParticipantUseCase::new(harness.repository.clone(), harness.message_pusher.clone());
        let (alice, _rx_alice) = connect(&harness.message_pusher, "alice");
        let (bob, mut rx_bob) = connect(&harness.message_pusher, "bob");

        // when (操作):
        usecase.execute(alice, "   ").await.unwrap();
        usecase.execute(bob, "Bob").await.unwrap();

        // then (期待する結果):
        assert_eq!(
            drain(&mut rx_bob)[0],
            ServerEvent::PartnerFound {
                partner_name: DisplayName::anonymous()
            }
        );
    }

    #[tokio::test]
    async fn test_second_set_name_only_renames() {
        // テスト項目: 入室済みの set_name は改名のみで、キューに二重に入らない
        // given (前提条件):
        let harness = create_harness();
        let usecase =
            AdmitParticipantUseCase::new(harness.repository.clone(), harness.message_pusher.clone());
        let (alice, _rx) = connect(&harness.message_pusher, "alice");
        usecase.execute(alice.clone(), "Alice").await.unwrap();

        // when (操作):
        let result = usecase.execute(alice, "Alicia").await;

        // then (期待する結果):
        assert_eq!(result, Ok(AdmitOutcome::Renamed));
        let stats = harness.repository.stats().await;
        assert_eq!(stats.status.waiting_count, 1);
        assert_eq!(stats.counters.total_admissions, 1);
    }

    #[tokio::test]
    async fn test_too_long_name_is_rejected() {
        // テスト項目: 20 文字を超える表示名はエラーになり、入室しない
        // given (前提条件):
        let harness = create_harness();
        let usecase =
            AdmitParticipantUseCase::new(harness.repository.clone(), harness.message_pusher.clone());
        let (alice, _rx) = connect(&harness.message_pusher, "alice");

        // when (操作):
        let result = usecase.execute(alice.clone(), &"x".repeat(21)).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(AdmitError::InvalidName(
                ValueObjectError::DisplayNameTooLong {
                    max: 20,
                    actual: 21
                }
            ))
        );
        assert!(!harness.repository.contains(&alice).await);
    }

    #[tokio::test]
    async fn test_disconnected_participant_is_not_admitted() {
        // テスト項目: 接続が切れている参加者は入室できない
        // given (前提条件):
        let harness = create_harness();
        let mut message_pusher = MockMessagePusher::new();
        message_pusher.expect_is_connected().return_const(false);
        message_pusher.expect_push_to().never();
        let usecase =
            AdmitParticipantUseCase::new(harness.repository.clone(), Arc::new(message_pusher));
        let ghost = ParticipantId::new("ghost".to_string()).unwrap();

        // when (操作):
        let result = usecase.execute(ghost.clone(), "Ghost").await;

        // then (期待する結果):
        assert_eq!(result, Err(AdmitError::NotConnected("ghost".to_string())));
        assert!(!harness.repository.contains(&ghost).await);
    }
}
