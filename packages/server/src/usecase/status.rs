//! `status_update` の送信

use crate::domain::{MatchmakerRepository, MessagePusher, ServerEvent};

/// Registry にいる全参加者へ現在の状態を送る
pub async fn broadcast_status(
    repository: &dyn MatchmakerRepository,
    message_pusher: &dyn MessagePusher,
) {
    let status = repository.status().await;
    let targets = repository.participant_ids().await;
    tracing::debug!(
        "Broadcasting status to {} participants (waiting: {}, active: {})",
        targets.len(),
        status.waiting_count,
        status.active_session_count
    );
    message_pusher.broadcast(&targets, &ServerEvent::StatusUpdate(status));
}
