//! Repository trait 定義
//!
//! UseCase 層が必要とするマッチング状態へのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! 各メソッドは 1 回の変更単位であり、実装はメソッド単位で直列化する必要があります。

use async_trait::async_trait;

use super::{
    event::PartnerLeftReason,
    lifecycle::ConnectionState,
    matchmaker::NextPartnerOutcome,
    stats::{DebugState, StatsSnapshot, StatusSnapshot},
    value_object::{DisplayName, MessageText, ParticipantId},
};

/// Matchmaker Repository trait
#[async_trait]
pub trait MatchmakerRepository: Send + Sync {
    /// Registry に存在するか
    async fn contains(&self, id: &ParticipantId) -> bool;

    /// 接続状態（Registry に存在しなければ `None`）
    async fn connection_state(&self, id: &ParticipantId) -> Option<ConnectionState>;

    /// キューに入れてペアリングを試みる。成立したセッション数を返す
    async fn admit(&self, id: ParticipantId, name: DisplayName) -> usize;

    /// 表示名を変更
    async fn rename(&self, id: &ParticipantId, name: DisplayName) -> bool;

    /// 新しいパートナーを要求
    async fn request_next_partner(&self, id: &ParticipantId) -> NextPartnerOutcome;

    /// 切断処理。残されたパートナーを返す
    async fn disconnect(
        &self,
        id: &ParticipantId,
        reason: PartnerLeftReason,
    ) -> Option<ParticipantId>;

    /// 最終アクティビティを更新
    async fn touch(&self, id: &ParticipantId) -> bool;

    /// パートナーにメッセージを中継
    async fn relay_message(&self, from: &ParticipantId, text: MessageText)
    -> Option<ParticipantId>;

    /// パートナーに入力中表示を中継
    async fn relay_typing(&self, from: &ParticipantId, is_typing: bool) -> Option<ParticipantId>;

    /// 非アクティブな参加者を取り除く
    async fn sweep_inactive(&self, threshold_millis: i64) -> Vec<ParticipantId>;

    /// Registry に存在する全参加者の ID
    async fn participant_ids(&self) -> Vec<ParticipantId>;

    async fn status(&self) -> StatusSnapshot;

    async fn stats(&self) -> StatsSnapshot;

    async fn debug_state(&self) -> DebugState;
}
