//! Explicit (method, path) → handler table with a not-found / method-not-allowed fallback.

use super::server::{runtime_messages, ReceiverState};
use axum::{
    body::Bytes,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
};

/// Path of the only route the receiver serves.
pub const RUNTIME_MESSAGES_PATH: &str = "/runtime-messages";

/// Request handler: receives shared state and the raw request body.
pub type Handler = fn(&ReceiverState, Bytes) -> Response;

/// Outcome of a table lookup.
#[derive(Clone)]
pub enum Dispatch {
    Handler(Handler),
    /// Path is known, method is not; carries the methods registered for the path.
    MethodNotAllowed(Vec<Method>),
    NotFound,
}

impl std::fmt::Debug for Dispatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dispatch::Handler(_) => f.write_str("Handler"),
            Dispatch::MethodNotAllowed(allowed) => {
                f.debug_tuple("MethodNotAllowed").field(allowed).finish()
            }
            Dispatch::NotFound => f.write_str("NotFound"),
        }
    }
}

impl Dispatch {
    /// Run the lookup outcome: call the handler or build the fallback response.
    pub fn respond(self, state: &ReceiverState, body: Bytes) -> Response {
        match self {
            Dispatch::Handler(handler) => handler(state, body),
            Dispatch::MethodNotAllowed(allowed) => method_not_allowed(&allowed),
            Dispatch::NotFound => (StatusCode::NOT_FOUND, "Not Found").into_response(),
        }
    }
}

/// Ordered route table. Paths match exactly; the first matching entry wins.
#[derive(Clone, Default)]
pub struct DispatchTable {
    routes: Vec<(Method, &'static str, Handler)>,
}

impl DispatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The receiver's table: `POST /runtime-messages` only.
    pub fn receiver() -> Self {
        Self::new().route(Method::POST, RUNTIME_MESSAGES_PATH, runtime_messages)
    }

    pub fn route(mut self, method: Method, path: &'static str, handler: Handler) -> Self {
        self.routes.push((method, path, handler));
        self
    }

    pub fn lookup(&self, method: &Method, path: &str) -> Dispatch {
        let mut allowed = Vec::new();
        for (m, p, handler) in &self.routes {
            if *p != path {
                continue;
            }
            if m == method {
                return Dispatch::Handler(*handler);
            }
            if !allowed.contains(m) {
                allowed.push(m.clone());
            }
        }
        if allowed.is_empty() {
            Dispatch::NotFound
        } else {
            Dispatch::MethodNotAllowed(allowed)
        }
    }
}

fn method_not_allowed(allowed: &[Method]) -> Response {
    let allow = allowed
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    let mut res = (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed").into_response();
    if let Ok(value) = HeaderValue::from_str(&allow) {
        res.headers_mut().insert(header::ALLOW, value);
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receiver::MemorySink;
    use std::sync::Arc;

    fn teapot(_state: &ReceiverState, _body: Bytes) -> Response {
        StatusCode::IM_A_TEAPOT.into_response()
    }

    fn state() -> ReceiverState {
        ReceiverState::new(Arc::new(MemorySink::new()))
    }

    #[test]
    fn post_runtime_messages_resolves_to_handler() {
        let table = DispatchTable::receiver();
        assert!(matches!(
            table.lookup(&Method::POST, "/runtime-messages"),
            Dispatch::Handler(_)
        ));
    }

    #[test]
    fn other_method_on_known_path_is_not_allowed() {
        let table = DispatchTable::receiver();
        for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH] {
            match table.lookup(&method, "/runtime-messages") {
                Dispatch::MethodNotAllowed(allowed) => assert_eq!(allowed, vec![Method::POST]),
                other => panic!("{} resolved to {:?}", method, other),
            }
        }
    }

    #[test]
    fn unknown_paths_are_not_found() {
        let table = DispatchTable::receiver();
        for path in ["/", "/runtime-messages/", "/runtime-message", "/RUNTIME-MESSAGES"] {
            assert!(
                matches!(table.lookup(&Method::POST, path), Dispatch::NotFound),
                "{} should not match",
                path
            );
        }
    }

    #[test]
    fn first_matching_route_wins() {
        let table = DispatchTable::new()
            .route(Method::GET, "/x", teapot)
            .route(Method::GET, "/x", runtime_messages);
        let res = table
            .lookup(&Method::GET, "/x")
            .respond(&state(), Bytes::new());
        assert_eq!(res.status(), StatusCode::IM_A_TEAPOT);
    }

    #[test]
    fn method_not_allowed_lists_every_registered_method() {
        let table = DispatchTable::new()
            .route(Method::POST, "/x", teapot)
            .route(Method::PUT, "/x", teapot);
        let res = table
            .lookup(&Method::GET, "/x")
            .respond(&state(), Bytes::new());
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(res.headers().get(header::ALLOW).unwrap(), "POST, PUT");
    }

    #[test]
    fn not_found_response_is_404() {
        let res = DispatchTable::receiver()
            .lookup(&Method::GET, "/")
            .respond(&state(), Bytes::new());
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
