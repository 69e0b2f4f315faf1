//! WebSocket connection handlers.

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionState, LifecycleEvent, ParticipantId, ParticipantIdFactory, ServerEvent},
    infrastructure::dto::websocket::{ClientMessage, ServerMessage},
    ui::state::AppState,
    usecase::{AdmitError, AdmitOutcome, RelayError},
};

/// How long a closing connection may take to flush events already queued for it.
const SEND_DRAIN_TIMEOUT: Duration = Duration::from_secs(1);

const MALFORMED_FRAME_MESSAGE: &str = "Malformed message";

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives events from the rx channel and writes them to the WebSocket.
///
/// The task ends once every sender for `rx` is dropped (the client was unregistered) and the
/// queued events are flushed, or as soon as a write fails.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<ServerEvent>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let message = ServerMessage::from(event);
            let json = match serde_json::to_string(&message) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize outbound event: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
        let _ = sender.close().await;
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let participant_id = ParticipantIdFactory::generate();

    // Create a channel for this client to receive events
    let (tx, rx) = mpsc::unbounded_channel();
    state
        .message_pusher
        .register_client(participant_id.clone(), tx);
    tracing::info!("User connected: {}", participant_id);

    let (sender, mut receiver) = socket.split();
    let mut send_task = pusher_loop(rx, sender);

    let recv_state = state.clone();
    let recv_id = participant_id.clone();
    let mut recv_task = tokio::spawn(async move {
        let mut connection = ConnectionState::Connecting;

        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error for {}: {}", recv_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => match serde_json::from_str::<ClientMessage>(text.as_str()) {
                    Ok(message) => {
                        connection = dispatch(&recv_state, &recv_id, connection, message).await;
                    }
                    Err(e) => {
                        tracing::warn!("Malformed frame from {}: {}", recv_id, e);
                        send_error(&recv_state, &recv_id, MALFORMED_FRAME_MESSAGE);
                        break;
                    }
                },
                Message::Binary(_) => {
                    tracing::warn!("Unexpected binary frame from {}", recv_id);
                    send_error(&recv_state, &recv_id, MALFORMED_FRAME_MESSAGE);
                    break;
                }
                Message::Close(_) => {
                    tracing::debug!("Client {} requested close", recv_id);
                    break;
                }
                _ => {}
            }
        }

        if let Some(terminated) = connection.transition(LifecycleEvent::Terminate) {
            tracing::debug!("Connection {} is now {:?}", recv_id, terminated);
        }
    });

    // If the client goes away first, the send task is flushed below; if the send side fails
    // (or the client was unregistered by the sweep), stop reading.
    let send_finished = tokio::select! {
        _ = &mut recv_task => false,
        _ = &mut send_task => {
            recv_task.abort();
            true
        }
    };

    // Unregistering drops the last sender, so the send task finishes after flushing.
    let orphan = state
        .disconnect_participant_usecase
        .execute(&participant_id)
        .await;
    if !send_finished
        && tokio::time::timeout(SEND_DRAIN_TIMEOUT, &mut send_task)
            .await
            .is_err()
    {
        send_task.abort();
    }

    match orphan {
        Some(partner) => tracing::info!(
            "User disconnected: {} (partner {} returned to queue)",
            participant_id,
            partner
        ),
        None => tracing::info!("User disconnected: {}", participant_id),
    }
}

/// Applies one inbound event and returns the connection's new local state.
async fn dispatch(
    state: &AppState,
    id: &ParticipantId,
    connection: ConnectionState,
    message: ClientMessage,
) -> ConnectionState {
    match message {
        ClientMessage::SetName { name } => {
            match state
                .admit_participant_usecase
                .execute(id.clone(), &name)
                .await
            {
                Ok(AdmitOutcome::Admitted { .. }) => {
                    return connection
                        .transition(LifecycleEvent::Admit)
                        .unwrap_or(connection);
                }
                Ok(AdmitOutcome::Renamed) => {}
                Err(AdmitError::InvalidName(e)) => send_error(state, id, &e.to_string()),
                Err(e @ AdmitError::NotConnected(_)) => tracing::warn!("{}", e),
            }
        }
        ClientMessage::Message { text } => {
            if !connection.is_admitted() {
                tracing::debug!("Ignoring message from {} before set_name", id);
                return connection;
            }
            match state.relay_message_usecase.execute(id, text).await {
                Ok(_) => {}
                Err(RelayError::InvalidMessage(e)) => send_error(state, id, &e.to_string()),
                Err(e @ RelayError::NoPartner(_)) => tracing::debug!("{}", e),
            }
        }
        ClientMessage::Typing { is_typing } => {
            if connection.is_admitted() {
                state
                    .relay_message_usecase
                    .relay_typing(id, is_typing)
                    .await;
            }
        }
        ClientMessage::NextPartner => {
            state.next_partner_usecase.execute(id).await;
        }
        ClientMessage::Heartbeat => {
            state.heartbeat_usecase.execute(id).await;
        }
    }
    connection
}

fn send_error(state: &AppState, id: &ParticipantId, message: &str) {
    let event = ServerEvent::Error {
        message: message.to_string(),
    };
    if let Err(e) = state.message_pusher.push_to(id, event) {
        tracing::debug!("Failed to send error to {}: {}", id, e);
    }
}
