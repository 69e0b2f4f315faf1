//! マッチングエンジン
//!
//! 1 つのワーカーインスタンスが所有する Registry・待機キュー・セッションを
//! まとめて保持し、ペアリング・Next・削除・スイープを行います。
//!
//! ## 不変条件（すべての変更操作の後に成り立つ）
//!
//! 1. 参加者 ID は待機キューとセッションのどちらか一方にしか属さない
//! 2. セッションは対称かつ非反射
//! 3. 待機キューに重複はない
//! 4. 待機キュー・セッションが参照する ID は Registry に存在する
//!
//! 未知の ID に対する操作はすべて何もしません（切断との競合は想定内のため）。

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use tandem_shared::time::Clock;

use super::{
    entity::Participant,
    event::{PartnerLeftReason, ServerEvent},
    lifecycle::{ConnectionState, LifecycleEvent},
    message_pusher::MessagePusher,
    session_tracker::SessionTracker,
    stats::{
        Counters, DebugState, StatsSnapshot, StatusSnapshot, average_wait_seconds,
    },
    value_object::{DisplayName, MessageText, ParticipantId, Timestamp},
    waiting_queue::WaitingQueue,
};

/// 1 回の `try_pair` で試行するペアリングの上限
pub const DEFAULT_MAX_PAIRINGS_PER_PASS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QueuePosition {
    Front,
    Back,
}

/// `request_next_partner` の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPartnerOutcome {
    /// セッションを解除した。値は置いていかれたパートナー
    LeftPartner(ParticipantId),
    /// セッションはなく、キューの先頭に移動した
    Requeued,
    /// Registry に存在しない
    UnknownParticipant,
}

/// マッチングエンジン
pub struct Matchmaker {
    registry: HashMap<ParticipantId, Participant>,
    queue: WaitingQueue,
    sessions: SessionTracker,
    counters: Counters,
    pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
    max_pairings_per_pass: usize,
    started_at: Timestamp,
}

impl Matchmaker {
    pub fn new(pusher: Arc<dyn MessagePusher>, clock: Arc<dyn Clock>) -> Self {
        let started_at = Timestamp::new(clock.now_millis());
        Self {
            registry: HashMap::new(),
            queue: WaitingQueue::new(),
            sessions: SessionTracker::new(),
            counters: Counters::default(),
            pusher,
            clock,
            max_pairings_per_pass: DEFAULT_MAX_PAIRINGS_PER_PASS,
            started_at,
        }
    }

    pub fn with_max_pairings_per_pass(mut self, max_pairings_per_pass: usize) -> Self {
        self.max_pairings_per_pass = max_pairings_per_pass;
        self
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_millis())
    }

    // ========================================
    // Admission
    // ========================================

    /// 参加者をキューの末尾に入れ、ペアリングを試みる
    ///
    /// 既に存在する ID は一度切断扱いで取り除いてから入れ直します。
    /// 戻り値はこの呼び出しで成立したセッション数。
    pub fn admit(&mut self, id: ParticipantId, name: DisplayName) -> usize {
        self.register(id, name);
        self.try_pair()
    }

    /// 複数の参加者をまとめて入れ、ペアリングは最後に 1 回だけ行う
    #[cfg(test)]
    pub(crate) fn admit_batch(
        &mut self,
        entries: impl IntoIterator<Item = (ParticipantId, DisplayName)>,
    ) -> usize {
        for (id, name) in entries {
            self.register(id, name);
        }
        self.try_pair()
    }

    fn register(&mut self, id: ParticipantId, name: DisplayName) {
        if self.registry.contains_key(&id) {
            tracing::info!("User {} re-admitted, clearing previous state", id);
            self.disconnect(&id, PartnerLeftReason::Disconnected);
        }

        let participant = Participant::new(id.clone(), name, self.now());
        tracing::info!(
            "User {} ({}) added to queue. Queue size: {}",
            participant.name,
            id,
            self.queue.len() + 1
        );
        self.registry.insert(id.clone(), participant);
        self.enqueue(&id, QueuePosition::Back);
        self.counters.total_admissions += 1;
    }

    /// 表示名を変更する
    pub fn rename(&mut self, id: &ParticipantId, name: DisplayName) -> bool {
        match self.registry.get_mut(id) {
            Some(participant) => {
                tracing::info!("User {} set name to: {}", id, name);
                participant.name = name;
                true
            }
            None => {
                tracing::debug!("Ignoring rename of unknown user {}", id);
                false
            }
        }
    }

    // ========================================
    // Pairing
    // ========================================

    /// キューの先頭から 2 人ずつ取り出してセッションを作る
    ///
    /// 先に接続の切れた待機者を取り除いてから、
    /// `min(上限, キュー長 / 2)` 回まで試行します。残りは次のきっかけ
    /// （入室・再キュー・タイマー）で処理されます。
    pub fn try_pair(&mut self) -> usize {
        self.discard_unreachable_waiters();

        let attempts = self.max_pairings_per_pass.min(self.queue.len() / 2);
        tracing::debug!(
            "Attempting to pair. Queue size: {}, attempts: {}",
            self.queue.len(),
            attempts
        );

        let mut formed = 0;
        for _ in 0..attempts {
            if self.queue.len() < 2 {
                break;
            }
            let (Some(first), Some(second)) = (self.queue.pop_front(), self.queue.pop_front())
            else {
                break;
            };

            if self.is_valid_pair(&first, &second) {
                self.create_session(&first, &second);
                formed += 1;
            } else {
                tracing::warn!("Invalid pair {} / {} detected, skipping", first, second);
                // 有効な方は元の順序のまま先頭に戻す
                for id in [second, first] {
                    if self.is_pairable(&id) {
                        self.queue.push_front(id);
                    } else {
                        self.drop_waiter(&id);
                    }
                }
            }
        }

        if formed > 0 || attempts > 0 {
            tracing::debug!(
                "Pairing complete. Formed: {}, queue: {}, active: {}",
                formed,
                self.queue.len(),
                self.sessions.len()
            );
        }
        formed
    }

    fn is_live(&self, id: &ParticipantId) -> bool {
        self.registry.contains_key(id) && self.pusher.is_connected(id)
    }

    fn is_pairable(&self, id: &ParticipantId) -> bool {
        self.is_live(id) && !self.sessions.is_paired(id)
    }

    fn is_valid_pair(&self, a: &ParticipantId, b: &ParticipantId) -> bool {
        a != b && self.is_pairable(a) && self.is_pairable(b)
    }

    fn discard_unreachable_waiters(&mut self) {
        let unreachable: Vec<ParticipantId> = self
            .queue
            .iter()
            .filter(|id| !self.is_live(id))
            .cloned()
            .collect();

        for id in unreachable {
            tracing::info!("Removing disconnected user {} from queue", id);
            self.queue.remove(&id);
            self.registry.remove(&id);
        }
    }

    /// キューから外した参加者を戻さない。接続が切れていれば Registry からも消す
    fn drop_waiter(&mut self, id: &ParticipantId) {
        if !self.is_live(id) {
            self.registry.remove(id);
        }
    }

    fn create_session(&mut self, a: &ParticipantId, b: &ParticipantId) {
        if !self.sessions.create(a, b) {
            return;
        }

        let mut names = Vec::with_capacity(2);
        for id in [a, b] {
            if let Some(participant) = self.registry.get_mut(id) {
                participant.apply(LifecycleEvent::Pair);
                names.push(participant.name.clone());
            }
        }
        let [a_name, b_name] = <[DisplayName; 2]>::try_from(names)
            .unwrap_or_else(|_| [DisplayName::anonymous(), DisplayName::anonymous()]);

        self.counters.successful_pairings += 1;
        self.notify(
            a,
            ServerEvent::PartnerFound {
                partner_name: b_name.clone(),
            },
        );
        self.notify(
            b,
            ServerEvent::PartnerFound {
                partner_name: a_name.clone(),
            },
        );

        tracing::info!(
            "Successfully paired {} ({}) and {} ({})",
            a_name,
            a,
            b_name,
            b
        );
    }

    fn enqueue(&mut self, id: &ParticipantId, position: QueuePosition) -> bool {
        let now = self.now();
        let Some(participant) = self.registry.get_mut(id) else {
            return false;
        };
        participant.connected_at = now;
        participant.last_activity_at = now;
        let event = match participant.state {
            ConnectionState::Connecting => LifecycleEvent::Admit,
            _ => LifecycleEvent::Requeue,
        };
        if !participant.apply(event) {
            return false;
        }

        match position {
            QueuePosition::Front => self.queue.push_front(id.clone()),
            QueuePosition::Back => self.queue.push_back(id.clone()),
        }
    }

    fn notify(&self, id: &ParticipantId, event: ServerEvent) {
        let name = event.name();
        if let Err(e) = self.pusher.push_to(id, event) {
            tracing::warn!("Failed to send '{}' to user {}: {}", name, id, e);
        }
    }

    // ========================================
    // Next
    // ========================================

    /// 新しいパートナーを要求する
    ///
    /// セッション中なら解除し、要求者をキューの先頭、パートナーを末尾に入れます。
    /// 待機中ならキューの先頭に移動します。どちらの場合も最後にペアリングを試みます。
    pub fn request_next_partner(&mut self, id: &ParticipantId) -> NextPartnerOutcome {
        if !self.registry.contains_key(id) {
            tracing::debug!("User {} not found in registry, ignoring next", id);
            return NextPartnerOutcome::UnknownParticipant;
        }
        self.counters.next_requests += 1;
        tracing::info!("User {} requested a new partner", id);

        let outcome = match self.end_session(id, PartnerLeftReason::RequestedNewMatch) {
            Some(partner) => {
                self.enqueue(id, QueuePosition::Front);
                if self.is_live(&partner) {
                    self.enqueue(&partner, QueuePosition::Back);
                }
                NextPartnerOutcome::LeftPartner(partner)
            }
            None => {
                self.queue.remove(id);
                self.enqueue(id, QueuePosition::Front);
                NextPartnerOutcome::Requeued
            }
        };

        self.try_pair();
        outcome
    }

    /// `id` のセッションを解除し、パートナーに `partner_left` を送る
    fn end_session(
        &mut self,
        id: &ParticipantId,
        reason: PartnerLeftReason,
    ) -> Option<ParticipantId> {
        let partner = self.sessions.destroy(id)?;
        for member in [id, &partner] {
            if let Some(participant) = self.registry.get_mut(member) {
                participant.apply(LifecycleEvent::Requeue);
            }
        }
        tracing::info!("Chat ended between {} and {}", id, partner);

        if self.is_live(&partner) {
            self.notify(
                &partner,
                ServerEvent::PartnerLeft {
                    reason: Some(reason),
                },
            );
        }
        Some(partner)
    }

    // ========================================
    // Removal
    // ========================================

    /// 参加者をキュー・セッション・Registry から取り除く
    ///
    /// セッション中だった場合は残されたパートナーに `partner_left` を送り、
    /// その ID を返します。パートナーの再キューは呼び出し側が決めます。
    pub fn remove(
        &mut self,
        id: &ParticipantId,
        reason: PartnerLeftReason,
    ) -> Option<ParticipantId> {
        let was_queued = self.queue.remove(id);
        let orphan = self.end_session(id, reason);
        let removed = self.registry.remove(id);

        if let Some(mut participant) = removed {
            participant.apply(LifecycleEvent::Terminate);
            tracing::info!("User {} removed from all states ({:?})", id, participant.state);
        } else if !was_queued && orphan.is_none() {
            tracing::debug!("Ignoring removal of unknown user {}", id);
        }
        orphan
    }

    /// 切断時の処理：参加者を取り除き、残されたパートナーを末尾に再キューする
    pub fn disconnect(
        &mut self,
        id: &ParticipantId,
        reason: PartnerLeftReason,
    ) -> Option<ParticipantId> {
        let orphan = self.remove(id, reason);
        if let Some(partner) = &orphan {
            self.requeue_back(partner);
        }
        orphan
    }

    /// 残されたパートナーなどを末尾に再キューする
    fn requeue_back(&mut self, id: &ParticipantId) -> bool {
        if !self.is_pairable(id) || self.queue.contains(id) {
            return false;
        }
        let queued = self.enqueue(id, QueuePosition::Back);
        self.try_pair();
        queued
    }

    // ========================================
    // Staleness
    // ========================================

    /// 最終アクティビティから `threshold_millis` を超えた参加者
    pub fn find_inactive(&self, threshold_millis: i64) -> Vec<ParticipantId> {
        let now = self.now();
        let mut inactive: Vec<ParticipantId> = self
            .registry
            .values()
            .filter(|participant| participant.is_inactive(now, threshold_millis))
            .map(|participant| participant.id.clone())
            .collect();
        inactive.sort();
        inactive
    }

    /// 非アクティブな参加者を切断扱いで取り除き、最後にペアリングを試みる
    ///
    /// 新たに非アクティブになった参加者がいなければ何も削除しません。
    pub fn sweep_inactive(&mut self, threshold_millis: i64) -> Vec<ParticipantId> {
        let inactive = self.find_inactive(threshold_millis);
        let inactive_set: HashSet<ParticipantId> = inactive.iter().cloned().collect();

        for id in &inactive {
            tracing::info!("Cleaning up inactive user {}", id);
            if let Some(partner) = self.remove(id, PartnerLeftReason::Inactive) {
                if !inactive_set.contains(&partner) && self.is_live(&partner) {
                    self.enqueue(&partner, QueuePosition::Back);
                }
            }
        }

        self.try_pair();

        if !inactive.is_empty() {
            tracing::info!("Cleaned {} inactive users", inactive.len());
        }
        inactive
    }

    /// 最終アクティビティを更新する
    pub fn touch(&mut self, id: &ParticipantId) -> bool {
        let now = self.now();
        match self.registry.get_mut(id) {
            Some(participant) => {
                participant.touch(now);
                true
            }
            None => false,
        }
    }

    // ========================================
    // Relay
    // ========================================

    /// パートナーにメッセージを中継する。パートナーがいなければ破棄して `None`
    pub fn relay_message(
        &mut self,
        from: &ParticipantId,
        text: MessageText,
    ) -> Option<ParticipantId> {
        let partner = self.live_partner_of(from)?;
        match self.pusher.push_to(&partner, ServerEvent::Message { text }) {
            Ok(()) => {
                self.counters.relayed_messages += 1;
                self.touch(from);
                Some(partner)
            }
            Err(e) => {
                tracing::warn!("Failed to relay message from {} to {}: {}", from, partner, e);
                None
            }
        }
    }

    /// パートナーに入力中表示を中継する
    pub fn relay_typing(&mut self, from: &ParticipantId, is_typing: bool) -> Option<ParticipantId> {
        let partner = self.live_partner_of(from)?;
        self.notify(&partner, ServerEvent::typing(is_typing));
        Some(partner)
    }

    fn live_partner_of(&self, id: &ParticipantId) -> Option<ParticipantId> {
        match self.sessions.partner_of(id) {
            Some(partner) if self.is_live(partner) => Some(partner.clone()),
            Some(partner) => {
                tracing::debug!("Partner {} of {} is no longer connected", partner, id);
                None
            }
            None => {
                tracing::debug!("User {} has no partner, dropping event", id);
                None
            }
        }
    }

    // ========================================
    // Queries
    // ========================================

    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.registry.contains_key(id)
    }

    pub fn partner_of(&self, id: &ParticipantId) -> Option<&ParticipantId> {
        self.sessions.partner_of(id)
    }

    pub fn is_paired(&self, id: &ParticipantId) -> bool {
        self.sessions.is_paired(id)
    }

    pub fn is_waiting(&self, id: &ParticipantId) -> bool {
        self.queue.contains(id)
    }

    pub fn participant(&self, id: &ParticipantId) -> Option<&Participant> {
        self.registry.get(id)
    }

    /// Registry に存在する参加者の接続状態
    pub fn connection_state(&self, id: &ParticipantId) -> Option<ConnectionState> {
        self.registry
            .get(id)
            .map(|participant| participant.state)
    }

    pub fn participant_ids(&self) -> Vec<ParticipantId> {
        let mut ids: Vec<ParticipantId> = self.registry.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn queue_order(&self) -> Vec<ParticipantId> {
        self.queue.iter().cloned().collect()
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    /// 現在の待機数・セッション数・平均待ち時間
    pub fn status(&self) -> StatusSnapshot {
        let waiting = self.queue.iter().filter_map(|id| self.registry.get(id));
        StatusSnapshot {
            waiting_count: self.queue.len(),
            active_session_count: self.sessions.len(),
            average_wait_time_seconds: average_wait_seconds(waiting, self.now()),
        }
    }

    pub fn stats(&self) -> StatsSnapshot {
        StatsSnapshot {
            counters: self.counters,
            status: self.status(),
            total_users: self.registry.len(),
            uptime_seconds: (self.started_at.elapsed_millis(self.now()) / 1000) as u64,
        }
    }

    pub fn debug_state(&self) -> DebugState {
        let mut participants: Vec<Participant> = self.registry.values().cloned().collect();
        participants.sort_by(|a, b| a.id.cmp(&b.id));

        DebugState {
            queue: self.queue_order(),
            sessions: self.sessions.pairs(),
            participants,
        }
    }
}
