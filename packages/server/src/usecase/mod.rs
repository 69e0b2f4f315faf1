//! UseCase 層
//!
//! クライアントからのイベント 1 種類につき 1 つのユースケースを定義します。
//! 各ユースケースは Repository と MessagePusher の trait にのみ依存します。

pub mod admit_participant;
pub mod disconnect_participant;
pub mod error;
pub mod get_stats;
pub mod heartbeat;
pub mod next_partner;
pub mod relay_message;
pub mod status;
pub mod sweep_inactive;

#[cfg(test)]
pub(crate) mod test_support;

pub use admit_participant::{AdmitOutcome, AdmitParticipantUseCase};
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{AdmitError, RelayError};
pub use get_stats::{GetDebugStateUseCase, GetStatsUseCase};
pub use heartbeat::HeartbeatUseCase;
pub use next_partner::NextPartnerUseCase;
pub use relay_message::RelayMessageUseCase;
pub use sweep_inactive::SweepInactiveUseCase;
