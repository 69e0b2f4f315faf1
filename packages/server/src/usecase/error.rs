//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::ValueObjectError;

/// 入室（set_name）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdmitError {
    /// 表示名が不正
    #[error(transparent)]
    InvalidName(#[from] ValueObjectError),

    /// 送信チャンネルが登録されていない、または閉じている
    #[error("Participant '{0}' is not connected")]
    NotConnected(String),
}

/// メッセージ中継のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// メッセージが不正
    #[error(transparent)]
    InvalidMessage(#[from] ValueObjectError),

    /// セッション中のパートナーがいない
    #[error("Participant '{0}' has no partner")]
    NoPartner(String),
}
