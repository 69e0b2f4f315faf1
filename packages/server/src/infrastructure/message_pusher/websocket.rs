//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - WebSocket 接続ごとの `UnboundedSender` を管理
//! - 参加者へのイベント送信（push_to, broadcast）
//! - 接続が生きているかの判定（ペアリング前の確認に使う）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、イベント送信に使用します。
//! 受信側（送信タスク）が終了するとチャンネルが閉じ、`is_connected` は false を返します。

use dashmap::DashMap;

use crate::domain::{MessagePushError, MessagePusher, ParticipantId, PusherChannel, ServerEvent};

/// WebSocket を使った MessagePusher 実装
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの送信チャンネル
    clients: DashMap<ParticipantId, PusherChannel>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self {
            clients: DashMap::new(),
        }
    }

    /// 登録されているクライアント数
    pub fn client_count(&self) -> usize {
        self.clients.len()
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new()
    }
}

impl MessagePusher for WebSocketMessagePusher {
    fn register_client(&self, client_id: ParticipantId, sender: PusherChannel) {
        tracing::debug!("Client '{}' registered to MessagePusher", client_id);
        self.clients.insert(client_id, sender);
    }

    fn unregister_client(&self, client_id: &ParticipantId) {
        self.clients.remove(client_id);
        tracing::debug!("Client '{}' unregistered from MessagePusher", client_id);
    }

    fn is_connected(&self, client_id: &ParticipantId) -> bool {
        self.clients
            .get(client_id)
            .is_some_and(|sender| !sender.is_closed())
    }

    fn push_to(
        &self,
        client_id: &ParticipantId,
        event: ServerEvent,
    ) -> Result<(), MessagePushError> {
        let Some(sender) = self.clients.get(client_id) else {
            return Err(MessagePushError::ClientNotFound(
                client_id.as_str().to_string(),
            ));
        };

        let name = event.name();
        sender
            .send(event)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed '{}' to client '{}'", name, client_id);
        Ok(())
    }

    fn broadcast(&self, targets: &[ParticipantId], event: &ServerEvent) {
        for target in targets {
            match self.clients.get(target) {
                Some(sender) => {
                    // ブロードキャストでは一部の送信失敗を許容
                    if let Err(e) = sender.send(event.clone()) {
                        tracing::warn!("Failed to push event to client '{}': {}", target, e);
                    }
                }
                None => {
                    tracing::debug!("Client '{}' not found during broadcast, skipping", target);
                }
            }
        }
    }
}
