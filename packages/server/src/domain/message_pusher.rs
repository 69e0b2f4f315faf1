//! MessagePusher trait 定義
//!
//! 参加者 ID を指定してイベントを送信する能力の抽象化です。
//! 接続の受け付けと所有は Gateway（UI 層）が担い、マッチングエンジンは
//! この trait を通じてのみ参加者にイベントを届けます。
//!
//! 送信は同期的で、エンジンの処理中に await が発生することはありません。

use tokio::sync::mpsc;

use super::{error::MessagePushError, event::ServerEvent, value_object::ParticipantId};

/// クライアントへのイベント送信用チャンネル
pub type PusherChannel = mpsc::UnboundedSender<ServerEvent>;

/// MessagePusher trait
#[cfg_attr(test, mockall::automock)]
pub trait MessagePusher: Send + Sync {
    /// クライアントの送信チャンネルを登録
    fn register_client(&self, client_id: ParticipantId, sender: PusherChannel);

    /// クライアントの送信チャンネルを登録解除
    fn unregister_client(&self, client_id: &ParticipantId);

    /// クライアントの接続が生きているか
    fn is_connected(&self, client_id: &ParticipantId) -> bool;

    /// 特定のクライアントにイベントを送信
    fn push_to(&self, client_id: &ParticipantId, event: ServerEvent)
    -> Result<(), MessagePushError>;

    /// 複数のクライアントにイベントを送信（一部の失敗は許容）
    fn broadcast(&self, targets: &[ParticipantId], event: &ServerEvent);
}
