//! 統計情報
//!
//! カウンタ以外は保持せず、問い合わせのたびに現在の状態から計算します。

use super::{
    entity::Participant,
    value_object::{ParticipantId, Timestamp},
};

/// 変更箇所で加算される累積カウンタ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub total_admissions: u64,
    pub successful_pairings: u64,
    pub next_requests: u64,
    pub relayed_messages: u64,
}

/// `status_update` で送る時点のスナップショット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub waiting_count: usize,
    pub active_session_count: usize,
    pub average_wait_time_seconds: u64,
}

/// `GET /status` 用のスナップショット
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub counters: Counters,
    pub status: StatusSnapshot,
    /// Registry に登録されている参加者数
    pub total_users: usize,
    pub uptime_seconds: u64,
}

/// `GET /debug` 用の内部状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugState {
    /// キューの並び順
    pub queue: Vec<ParticipantId>,
    pub sessions: Vec<(ParticipantId, ParticipantId)>,
    /// ID 順
    pub participants: Vec<Participant>,
}

/// 現在キューにいる参加者の平均待ち時間（秒、四捨五入）
///
/// 完了した待ち時間の履歴ではなく、今待っている参加者だけを対象にします。
/// 誰も待っていなければ 0。
pub fn average_wait_seconds<'a>(
    waiting: impl IntoIterator<Item = &'a Participant>,
    now: Timestamp,
) -> u64 {
    let (total_millis, count) = waiting
        .into_iter()
        .fold((0i64, 0u32), |(total, count), participant| {
            (total + participant.connected_at.elapsed_millis(now), count + 1)
        });

    if count == 0 {
        return 0;
    }

    (total_millis as f64 / f64::from(count) / 1000.0).round() as u64
}
