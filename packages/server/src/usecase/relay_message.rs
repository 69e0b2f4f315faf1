//! UseCase: パートナーへの中継（message / typing）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayMessageUseCase::execute() と relay_typing()
//!
//! ### どのような状況を想定しているか
//! - 正常系：セッション中のパートナーにだけ届く
//! - 異常系：パートナーがいない、メッセージが長すぎる

use std::sync::Arc;

use crate::domain::{MatchmakerRepository, MessageText, ParticipantId};

use super::error::RelayError;

/// 中継のユースケース
pub struct RelayMessageUseCase {
    repository: Arc<dyn MatchmakerRepository>,
}

impl RelayMessageUseCase {
    pub fn new(repository: Arc<dyn MatchmakerRepository>) -> Self {
        Self { repository }
    }

    /// メッセージをパートナーに中継し、受け取ったパートナーの ID を返す
    pub async fn execute(
        &self,
        from: &ParticipantId,
        raw_text: String,
    ) -> Result<ParticipantId, RelayError> {
        let text = MessageText::new(raw_text)?;
        self.repository
            .relay_message(from, text)
            .await
            .ok_or_else(|| RelayError::NoPartner(from.as_str().to_string()))
    }

    /// 入力中表示を中継する。パートナーがいなければ何もしない
    pub async fn relay_typing(&self, from: &ParticipantId, is_typing: bool) -> Option<ParticipantId> {
        self.repository.relay_typing(from, is_typing).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, ServerEvent, ValueObjectError};
    use crate::usecase::test_support::{connect, create_harness, drain};

    #[tokio::test]
    async fn test_message_is_relayed_to_partner() {
        // テスト項目: セッション中のパートナーにメッセージがそのまま届く
        // given (前提条件):
        let harness = create_harness();
        let usecase = RelayMessageUseCase::new(harness.repository.clone());
        let (alice, mut rx_alice) = connect(&harness.message_pusher, "alice");
        let (bob, mut rx_bob) = connect(&harness.message_pusher, "bob");
        harness.repository.admit(alice.clone(), DisplayName::anonymous()).await;
        harness.repository.admit(bob.clone(), DisplayName::anonymous()).await;
        drain(&mut rx_alice);
        drain(&mut rx_bob);

        // when (操作):
        let result = usecase.execute(&alice, "hello, bob".to_string()).await;

        // then (期待する結果):
        assert_eq!(result, Ok(bob));
        assert_eq!(
            drain(&mut rx_bob),
            vec![ServerEvent::Message {
                text: MessageText::new("hello, bob".to_string()).unwrap()
            }]
        );
        assert!(drain(&mut rx_alice).is_empty());
        assert_eq!(harness.repository.stats().await.counters.relayed_messages, 1);
    }

    #[tokio::test]
    async fn test_message_without_partner_is_dropped() {
        // テスト項目: 待機中の参加者のメッセージは破棄される
        // given (前提条件):
        let harness = create_harness();
        let usecase = RelayMessageUseCase::new(harness.repository.clone());
        let (alice, _rx) = connect(&harness.message_pusher, "alice");
        harness.repository.admit(alice.clone(), DisplayName::anonymous()).await;

        // when (操作):
        let result = usecase.execute(&alice, "anyone?".to_string()).await;

        // then (期待する結果):
        assert_eq!(result, Err(RelayError::NoPartner("alice".to_string())));
    }

    #[tokio::test]
    async fn test_too_long_message_is_rejected() {
        // テスト項目: 2000 文字を超えるメッセージはエラーになる
        // given (前提条件):
        let harness = create_harness();
        let usecase = RelayMessageUseCase::new(harness.repository.clone());
        let alice = ParticipantId::new("alice".to_string()).unwrap();

        // when (操作):
        let result = usecase.execute(&alice, "a".repeat(2001)).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RelayError::InvalidMessage(ValueObjectError::MessageTooLong {
                max: 2000,
                actual: 2001
            }))
        );
    }

    #[tokio::test]
    async fn test_typing_is_relayed_to_partner() {
        // テスト項目: 入力中表示がパートナーに届く
        // given (前提条件):
        let harness = create_harness();
        let usecase = RelayMessageUseCase::new(harness.repository.clone());
        let (alice, _rx_alice) = connect(&harness.message_pusher, "alice");
        let (bob, mut rx_bob) = connect(&harness.message_pusher, "bob");
        harness.repository.admit(alice.clone(), DisplayName::anonymous()).await;
        harness.repository.admit(bob.clone(), DisplayName::anonymous()).await;
        drain(&mut rx_bob);

        // when (操作):
        usecase.relay_typing(&alice, true).await;
        usecase.relay_typing(&alice, false).await;

        // then (期待する結果):
        assert_eq!(
            drain(&mut rx_bob),
            vec![ServerEvent::Typing, ServerEvent::StopTyping]
        );
    }
}
