//! Echo receiver core library: configuration, dispatch table, message sinks, and the
//! HTTP server used by the `echo-receiver` binary.

pub mod config;
pub mod receiver;

#[cfg(test)]
mod test_log;
