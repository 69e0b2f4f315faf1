//! UI layer: axum router, WebSocket gateway and server bootstrap.

mod error;
mod handler;
mod server;
mod signal;
pub mod state;
mod sweeper;

pub use error::ServerError;
pub use server::Server;
pub use signal::shutdown_signal;
