//! 待機キュー
//!
//! 参加者 ID の FIFO キュー。先頭（優先再キュー）と末尾（通常）への挿入ができ、
//! 同じ ID は二重に入りません。

use std::collections::{HashSet, VecDeque};

use super::value_object::ParticipantId;

#[derive(Debug, Default, Clone)]
pub struct WaitingQueue {
    order: VecDeque<ParticipantId>,
    members: HashSet<ParticipantId>,
}

impl WaitingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// 末尾に追加。既に入っていれば何もせず `false`
    pub fn push_back(&mut self, id: ParticipantId) -> bool {
        if !self.members.insert(id.clone()) {
            return false;
        }
        self.order.push_back(id);
        true
    }

    /// 先頭に追加。既に入っていれば何もせず `false`
    pub fn push_front(&mut self, id: ParticipantId) -> bool {
        if !self.members.insert(id.clone()) {
            return false;
        }
        self.order.push_front(id);
        true
    }

    pub fn pop_front(&mut self) -> Option<ParticipantId> {
        let id = self.order.pop_front()?;
        self.members.remove(&id);
        Some(id)
    }

    /// 指定した ID をキューから取り除く
    pub fn remove(&mut self, id: &ParticipantId) -> bool {
        if !self.members.remove(id) {
            return false;
        }
        self.order.retain(|queued| queued != id);
        true
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.members.contains(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParticipantId> {
        self.order.iter()
    }
}
