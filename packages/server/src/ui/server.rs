//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tandem_shared::time::SystemClock;
use tokio::{
    net::TcpListener,
    sync::{Mutex, watch},
};
use tower_http::trace::TraceLayer;

use crate::{
    config::ServerConfig,
    domain::Matchmaker,
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryMatchmakerRepository,
    },
    usecase::{
        AdmitParticipantUseCase, DisconnectParticipantUseCase, GetDebugStateUseCase,
        GetStatsUseCase, HeartbeatUseCase, NextPartnerUseCase, RelayMessageUseCase,
        SweepInactiveUseCase,
    },
};

use super::{
    error::ServerError,
    handler::{debug_state, get_status, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
    sweeper::spawn_sweeper,
};

/// Matchmaking server for one worker instance
///
/// Owns the engine, the outbound channel registry and the cleanup sweeper.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(ServerConfig::default());
/// server.run().await?;
/// ```
pub struct Server {
    config: ServerConfig,
    app_state: Arc<AppState>,
    sweep_inactive_usecase: Arc<SweepInactiveUseCase>,
}

impl Server {
    /// Wire repository, message pusher and use cases from `config`.
    pub fn new(config: ServerConfig) -> Self {
        // 1. MessagePusher (WebSocket implementation)
        let message_pusher = Arc::new(WebSocketMessagePusher::new());

        // 2. Repository (in-memory engine behind one mutex)
        let matchmaker = Matchmaker::new(message_pusher.clone(), Arc::new(SystemClock))
            .with_max_pairings_per_pass(config.max_pairings_per_pass);
        let repository = Arc::new(InMemoryMatchmakerRepository::new(Arc::new(Mutex::new(
            matchmaker,
        ))));

        // 3. UseCases
        let app_state = Arc::new(AppState {
            message_pusher: message_pusher.clone(),
            admit_participant_usecase: Arc::new(AdmitParticipantUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            relay_message_usecase: Arc::new(RelayMessageUseCase::new(repository.clone())),
            next_partner_usecase: Arc::new(NextPartnerUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            heartbeat_usecase: Arc::new(HeartbeatUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            disconnect_participant_usecase: Arc::new(DisconnectParticipantUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            get_stats_usecase: Arc::new(GetStatsUseCase::new(repository.clone())),
            get_debug_state_usecase: Arc::new(GetDebugStateUseCase::new(repository.clone())),
        });
        let sweep_inactive_usecase = Arc::new(SweepInactiveUseCase::new(
            repository,
            message_pusher,
            config.inactivity_timeout_millis(),
        ));

        Self {
            config,
            app_state,
            sweep_inactive_usecase,
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/status", get(get_status))
            .route("/health", get(health_check))
            .route("/debug", get(debug_state))
            .layer(TraceLayer::new_for_http())
            .with_state(self.app_state.clone())
    }

    /// Bind to the configured address and serve until Ctrl+C or SIGTERM.
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.config.bind_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `signal` resolves.
    ///
    /// On shutdown the cleanup timer is stopped first, then the listener stops accepting
    /// and in-flight requests are allowed to finish.
    pub async fn serve<F>(self, listener: TcpListener, signal: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = self.router();

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let sweeper = spawn_sweeper(
            self.sweep_inactive_usecase.clone(),
            self.config.cleanup_interval,
            shutdown_rx,
        );

        tracing::info!(
            "Matchmaking server (worker {}) listening on {}",
            std::process::id(),
            listener.local_addr()?
        );
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        let result = axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                signal.await;
                let _ = shutdown_tx.send(true);
            })
            .await;

        if let Err(e) = sweeper.await {
            tracing::warn!("Cleanup sweeper ended abnormally: {}", e);
        }
        result?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}
