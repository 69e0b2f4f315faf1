//! ドメイン層
//!
//! マッチングの中核となるモデル（待機キュー・セッション・参加者）と、
//! 外部とのやりとりに必要なインターフェース（Repository, MessagePusher）を定義します。

pub mod entity;
pub mod error;
pub mod event;
pub mod lifecycle;
pub mod matchmaker;
pub mod message_pusher;
pub mod repository;
pub mod session_tracker;
pub mod stats;
pub mod value_object;
pub mod waiting_queue;

pub use entity::Participant;
pub use error::{MessagePushError, ValueObjectError};
pub use event::{PartnerLeftReason, ServerEvent};
pub use lifecycle::{ConnectionState, LifecycleEvent};
pub use matchmaker::{DEFAULT_MAX_PAIRINGS_PER_PASS, Matchmaker, NextPartnerOutcome};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::MatchmakerRepository;
pub use session_tracker::SessionTracker;
pub use stats::{Counters, DebugState, StatsSnapshot, StatusSnapshot};
pub use value_object::{
    DEFAULT_DISPLAY_NAME, DISPLAY_NAME_MAX_CHARS, DisplayName, MESSAGE_MAX_CHARS, MessageText,
    ParticipantId, ParticipantIdFactory, Timestamp,
};
pub use waiting_queue::WaitingQueue;

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
