//! Echo receiver HTTP server (single port, single route).

use super::dispatch::DispatchTable;
use super::sink::{LogSink, MessageSink};
use crate::config::ReceiverConfig;
use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use serde_json::{Map, Value};
use std::net::SocketAddr;
use std::sync::Arc;

/// Shared, immutable state handed to every handler. Nothing is kept between requests.
#[derive(Clone)]
pub struct ReceiverState {
    pub sink: Arc<dyn MessageSink>,
}

impl ReceiverState {
    pub fn new(sink: Arc<dyn MessageSink>) -> Self {
        Self { sink }
    }
}

/// POST /runtime-messages — parse the body as any JSON value, record it, reply `Ok`.
/// An empty body counts as `{}`. Malformed JSON gets 400 and is not recorded.
pub fn runtime_messages(state: &ReceiverState, body: Bytes) -> Response {
    let message = if body.is_empty() {
        Value::Object(Map::new())
    } else {
        match serde_json::from_slice::<Value>(&body) {
            Ok(v) => v,
            Err(e) => {
                log::debug!("rejecting runtime message: {}", e);
                return (StatusCode::BAD_REQUEST, "Bad Request").into_response();
            }
        }
    };
    state.sink.record(&message);
    (StatusCode::OK, "Ok").into_response()
}

/// Build the app: every request goes through the receiver's dispatch table.
/// Bodies over `body_limit` bytes are rejected with 413 before dispatch.
pub fn router(state: ReceiverState, body_limit: usize) -> Router {
    let table = Arc::new(DispatchTable::receiver());
    Router::new()
        .fallback(
            move |State(state): State<ReceiverState>, method: Method, uri: Uri, body: Bytes| {
                let table = Arc::clone(&table);
                async move { table.lookup(&method, uri.path()).respond(&state, body) }
            },
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// A bound receiver that has not started serving yet.
pub struct Listening {
    listener: tokio::net::TcpListener,
    app: Router,
    local_addr: SocketAddr,
}

impl Listening {
    /// Address actually bound (resolves port 0 to the OS-assigned port).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Write the startup line naming the bound port.
    pub fn announce(&self) {
        log::info!("echo receiver listening on port {}", self.local_addr.port());
    }

    /// Serve requests until the process exits.
    pub async fn serve(self) -> Result<()> {
        axum::serve(self.listener, self.app)
            .await
            .context("echo receiver exited")
    }
}

/// Bind the listening socket for `config`; received messages go to `sink`.
pub async fn bind(config: &ReceiverConfig, sink: Arc<dyn MessageSink>) -> Result<Listening> {
    let bind_addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding to {}", bind_addr))?;
    let local_addr = listener
        .local_addr()
        .with_context(|| format!("reading local address of {}", bind_addr))?;
    let app = router(ReceiverState::new(sink), config.body_limit);
    Ok(Listening {
        listener,
        app,
        local_addr,
    })
}

/// Run the echo receiver: bind, log the port, serve until the process is terminated.
/// Received messages are written to the log under [`super::MESSAGE_TAG`].
pub async fn start(config: ReceiverConfig) -> Result<()> {
    let listening = bind(&config, Arc::new(LogSink)).await?;
    listening.announce();
    listening.serve().await
}
