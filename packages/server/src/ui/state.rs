//! Shared application state.

use std::sync::Arc;

use crate::{
    domain::MessagePusher,
    usecase::{
        AdmitParticipantUseCase, DisconnectParticipantUseCase, GetDebugStateUseCase,
        GetStatsUseCase, HeartbeatUseCase, NextPartnerUseCase, RelayMessageUseCase,
    },
};

/// State handed to every axum handler.
pub struct AppState {
    /// Connections register their outbound channel here on upgrade.
    pub message_pusher: Arc<dyn MessagePusher>,
    pub admit_participant_usecase: Arc<AdmitParticipantUseCase>,
    pub relay_message_usecase: Arc<RelayMessageUseCase>,
    pub next_partner_usecase: Arc<NextPartnerUseCase>,
    pub heartbeat_usecase: Arc<HeartbeatUseCase>,
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    pub get_stats_usecase: Arc<GetStatsUseCase>,
    pub get_debug_state_usecase: Arc<GetDebugStateUseCase>,
}
