//! InMemory Matchmaker Repository 実装
//!
//! ドメイン層が定義する MatchmakerRepository trait の具体的な実装。
//! `Matchmaker` を 1 つの Mutex で保護し、各メソッドを 1 回の変更単位として直列化します。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionState, DebugState, DisplayName, Matchmaker, MatchmakerRepository, MessageText,
    NextPartnerOutcome, ParticipantId, PartnerLeftReason, StatsSnapshot, StatusSnapshot,
};

/// インメモリ Matchmaker Repository 実装
pub struct InMemoryMatchmakerRepository {
    matchmaker: Arc<Mutex<Matchmaker>>,
}

impl InMemoryMatchmakerRepository {
    pub fn new(matchmaker: Arc<Mutex<Matchmaker>>) -> Self {
        Self { matchmaker }
    }
}

#[async_trait]
impl MatchmakerRepository for InMemoryMatchmakerRepository {
    async fn contains(&self, id: &ParticipantId) -> bool {
        self.matchmaker.lock().await.contains(id)
    }

    async fn connection_state(&self, id: &ParticipantId) -> Option<ConnectionState> {
        self.matchmaker.lock().await.connection_state(id)
    }

    async fn admit(&self, id: ParticipantId, name: DisplayName) -> usize {
        let mut matchmaker = self.matchmaker.lock().await;
        matchmaker.admit(id, name)
    }

    async fn rename(&self, id: &ParticipantId, name: DisplayName) -> bool {
        let mut matchmaker = self.matchmaker.lock().await;
        matchmaker.rename(id, name)
    }

    async fn request_next_partner(&self, id: &ParticipantId) -> NextPartnerOutcome {
        let mut matchmaker = self.matchmaker.lock().await;
        matchmaker.request_next_partner(id)
    }

    async fn disconnect(
        &self,
        id: &ParticipantId,
        reason: PartnerLeftReason,
    ) -> Option<ParticipantId> {
        let mut matchmaker = self.matchmaker.lock().await;
        matchmaker.disconnect(id, reason)
    }

    async fn touch(&self, id: &ParticipantId) -> bool {
        let mut matchmaker = self.matchmaker.lock().await;
        matchmaker.touch(id)
    }

    async fn relay_message(
        &self,
        from: &ParticipantId,
        text: MessageText,
    ) -> Option<ParticipantId> {
        let mut matchmaker = self.matchmaker.lock().await;
        matchmaker.relay_message(from, text)
    }

    async fn relay_typing(&self, from: &ParticipantId, is_typing: bool) -> Option<ParticipantId> {
        let mut matchmaker = self.matchmaker.lock().await;
        matchmaker.relay_typing(from, is_typing)
    }

    async fn sweep_inactive(&self, threshold_millis: i64) -> Vec<ParticipantId> {
        let mut matchmaker = self.matchmaker.lock().await;
        matchmaker.sweep_inactive(threshold_millis)
    }

    async fn participant_ids(&self) -> Vec<ParticipantId> {
        self.matchmaker.lock().await.participant_ids()
    }

    async fn status(&self) -> StatusSnapshot {
        self.matchmaker.lock().await.status()
    }

    async fn stats(&self) -> StatsSnapshot {
        self.matchmaker.lock().await.stats()
    }

    async fn debug_state(&self) -> DebugState {
        self.matchmaker.lock().await.debug_state()
    }
}
