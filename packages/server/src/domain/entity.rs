//! エンティティ

use super::{
    lifecycle::{ConnectionState, LifecycleEvent},
    value_object::{DisplayName, ParticipantId, Timestamp},
};

/// 参加者（Registry が保持する正規のレコード）
///
/// 接続そのものは Gateway が所有しており、ここでは ID を通じてのみ送信します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: DisplayName,
    /// キューに入った時刻（再キューイングでリセットされる）
    pub connected_at: Timestamp,
    pub last_activity_at: Timestamp,
    /// 状態は `apply` を通じてのみ遷移させる
    pub state: ConnectionState,
}

impl Participant {
    pub fn new(id: ParticipantId, name: DisplayName, now: Timestamp) -> Self {
        Self {
            id,
            name,
            connected_at: now,
            last_activity_at: now,
            state: ConnectionState::Connecting,
        }
    }

    /// ライフサイクルのイベントを適用する。許されない遷移は状態を変えずに `false`
    pub fn apply(&mut self, event: LifecycleEvent) -> bool {
        match self.state.transition(event) {
            Some(next) => {
                self.state = next;
                true
            }
            None => {
                tracing::warn!(
                    "Ignoring invalid transition {:?} from {:?} for user {}",
                    event,
                    self.state,
                    self.id
                );
                false
            }
        }
    }

    pub fn touch(&mut self, now: Timestamp) {
        self.last_activity_at = now;
    }

    /// 最終アクティビティから `threshold_millis` を超えて経過しているか
    pub fn is_inactive(&self, now: Timestamp, threshold_millis: i64) -> bool {
        self.last_activity_at.elapsed_millis(now) > threshold_millis
    }
}
