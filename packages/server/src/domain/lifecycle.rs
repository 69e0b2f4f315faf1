//! 接続のライフサイクル状態機械
//!
//! ```text
//! Connecting --Admit--> Waiting --Pair--> Chatting
//!                          ^                  |
//!                          +-----Requeue------+
//! (any) --Terminate--> Terminated
//! ```
//!
//! `Terminated` からの遷移は存在しません。

/// 接続の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// ID は割り当て済み、表示名は未設定
    Connecting,
    Waiting,
    Chatting,
    Terminated,
}

/// 状態遷移を引き起こすイベント
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// 表示名が設定されキューに入った
    Admit,
    /// セッションが成立した
    Pair,
    /// Next またはパートナー切断で再びキューに入った
    Requeue,
    /// 明示的な切断、またはスイープによる削除
    Terminate,
}

impl ConnectionState {
    /// 遷移先を返す。許されない遷移は `None`
    pub fn transition(self, event: LifecycleEvent) -> Option<ConnectionState> {
        use ConnectionState::*;
        use LifecycleEvent::*;

        match (self, event) {
            (Terminated, _) => None,
            (_, Terminate) => Some(Terminated),
            (Connecting, Admit) => Some(Waiting),
            (Waiting, Pair) => Some(Chatting),
            (Waiting, Requeue) | (Chatting, Requeue) => Some(Waiting),
            _ => None,
        }
    }

    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Waiting | Self::Chatting)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Waiting => "waiting",
            Self::Chatting => "chatting",
            Self::Terminated => "terminated",
        }
    }
}
