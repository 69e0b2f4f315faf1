//! セッション管理
//!
//! 参加者 ID からパートナー ID への対称なマッピング。
//! `A → B` が存在するのは `B → A` が存在するときに限り、`A → A` は存在しません。

use std::collections::HashMap;

use super::value_object::ParticipantId;

#[derive(Debug, Default, Clone)]
pub struct SessionTracker {
    partners: HashMap<ParticipantId, ParticipantId>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// セッションを作成する
    ///
    /// 同じ ID 同士、またはどちらかが既にセッション中なら何もせず `false`
    pub fn create(&mut self, a: &ParticipantId, b: &ParticipantId) -> bool {
        if a == b || self.is_paired(a) || self.is_paired(b) {
            return false;
        }
        self.partners.insert(a.clone(), b.clone());
        self.partners.insert(b.clone(), a.clone());
        true
    }

    /// `id` を含むセッションを解除し、パートナーの ID を返す
    pub fn destroy(&mut self, id: &ParticipantId) -> Option<ParticipantId> {
        let partner = self.partners.remove(id)?;
        self.partners.remove(&partner);
        Some(partner)
    }

    pub fn partner_of(&self, id: &ParticipantId) -> Option<&ParticipantId> {
        self.partners.get(id)
    }

    pub fn is_paired(&self, id: &ParticipantId) -> bool {
        self.partners.contains_key(id)
    }

    /// 現在のセッション数
    pub fn len(&self) -> usize {
        self.partners.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }

    /// 各セッションを 1 回ずつ `(小さい ID, 大きい ID)` の順で列挙する
    pub fn pairs(&self) -> Vec<(ParticipantId, ParticipantId)> {
        let mut pairs: Vec<_> = self
            .partners
            .iter()
            .filter(|(id, partner)| id < partner)
            .map(|(id, partner)| (id.clone(), partner.clone()))
            .collect();
        pairs.sort();
        pairs
    }

    /// 対称性と非反射性を満たしているか
    pub fn is_consistent(&self) -> bool {
        self.partners
            .iter()
            .all(|(id, partner)| id != partner && self.partners.get(partner) == Some(id))
    }
}
