//! ドメイン層のエラー定義

use thiserror::Error;

/// 値オブジェクトの検証エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// 参加者 ID が空
    #[error("Participant ID must not be empty")]
    EmptyParticipantId,

    /// 表示名が長すぎる
    #[error("Display name is too long (max {max} characters, got {actual})")]
    DisplayNameTooLong { max: usize, actual: usize },

    /// メッセージが長すぎる
    #[error("Message is too long (max {max} characters, got {actual})")]
    MessageTooLong { max: usize, actual: usize },
}

/// MessagePusher のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// 送信先のクライアントが登録されていない
    #[error("Client '{0}' not found")]
    ClientNotFound(String),

    /// 送信チャンネルが閉じている
    #[error("Failed to push message: {0}")]
    PushFailed(String),
}
