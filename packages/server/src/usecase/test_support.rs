//! UseCase テスト用のヘルパー

use std::sync::Arc;

use tandem_shared::time::ManualClock;
use tokio::sync::{Mutex, mpsc};

use crate::{
    domain::{Matchmaker, MessagePusher, ParticipantId, ServerEvent},
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryMatchmakerRepository,
    },
};

pub struct TestHarness {
    pub repository: Arc<InMemoryMatchmakerRepository>,
    pub message_pusher: Arc<WebSocketMessagePusher>,
    pub clock: Arc<ManualClock>,
}

pub fn create_harness() -> TestHarness {
    let message_pusher = Arc::new(WebSocketMessagePusher::new());
    let clock = Arc::new(ManualClock::new(0));
    let matchmaker = Matchmaker::new(message_pusher.clone(), clock.clone());
    let repository = Arc::new(InMemoryMatchmakerRepository::new(Arc::new(Mutex::new(
        matchmaker,
    ))));
    TestHarness {
        repository,
        message_pusher,
        clock,
    }
}

/// 送信チャンネルを登録し、受信側を返す
pub fn connect(
    message_pusher: &WebSocketMessagePusher,
    id: &str,
) -> (ParticipantId, mpsc::UnboundedReceiver<ServerEvent>) {
    let participant_id = ParticipantId::new(id.to_string()).unwrap();
    let (tx, rx) = mpsc::unbounded_channel();
    message_pusher.register_client(participant_id.clone(), tx);
    (participant_id, rx)
}

/// 受信済みのイベントをすべて取り出す
pub fn drain(rx: &mut mpsc::UnboundedReceiver<ServerEvent>) -> Vec<ServerEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
