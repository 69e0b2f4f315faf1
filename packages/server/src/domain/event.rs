//! 参加者へ送信するイベント

use super::{
    stats::StatusSnapshot,
    value_object::{DisplayName, MessageText},
};

/// パートナーがセッションを離れた理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartnerLeftReason {
    /// パートナーが新しい相手を要求した（Next）
    RequestedNewMatch,
    /// パートナーの接続が切れた
    Disconnected,
    /// パートナーが一定時間操作しなかった
    Inactive,
}

impl PartnerLeftReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RequestedNewMatch => "partner requested a new match",
            Self::Disconnected => "partner disconnected",
            Self::Inactive => "partner was inactive",
        }
    }
}

/// サーバーから参加者へのイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    PartnerFound { partner_name: DisplayName },
    PartnerLeft { reason: Option<PartnerLeftReason> },
    Message { text: MessageText },
    Typing,
    StopTyping,
    HeartbeatAck,
    StatusUpdate(StatusSnapshot),
    /// 検証エラーやプロトコルエラーを当該クライアントに伝える
    Error { message: String },
}

impl ServerEvent {
    /// ログ出力用のイベント名
    pub fn name(&self) -> &'static str {
        match self {
            Self::PartnerFound { .. } => "partner_found",
            Self::PartnerLeft { .. } => "partner_left",
            Self::Message { .. } => "message",
            Self::Typing => "typing",
            Self::StopTyping => "stop_typing",
            Self::HeartbeatAck => "heartbeat_ack",
            Self::StatusUpdate(_) => "status_update",
            Self::Error { .. } => "error",
        }
    }

    pub fn typing(is_typing: bool) -> Self {
        if is_typing { Self::Typing } else { Self::StopTyping }
    }
}
