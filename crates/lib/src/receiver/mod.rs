//! Echo receiver: HTTP test double for runtime message ingestion.
//!
//! Single port, single route: `POST /runtime-messages` parses the body as JSON, hands it
//! to a [`MessageSink`] and answers `Ok`. Everything else falls through to 404/405.

mod dispatch;
mod server;
mod sink;

pub use dispatch::{Dispatch, DispatchTable, Handler, RUNTIME_MESSAGES_PATH};
pub use server::{bind, router, runtime_messages, start, Listening, ReceiverState};
pub use sink::{LogSink, MemorySink, MessageSink, MESSAGE_TAG};
