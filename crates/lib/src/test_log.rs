//! Test-only `log` backend that captures records per thread.

use std::sync::{Mutex, OnceLock};
use std::thread::{self, ThreadId};

struct CaptureLogger {
    records: Mutex<Vec<(ThreadId, log::Level, String)>>,
}

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        let mut g = self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        g.push((thread::current().id(), record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<CaptureLogger> = OnceLock::new();

/// Run `f` and return the records it logged on the current thread.
/// Tests run in parallel on separate threads, so records are keyed by thread id.
pub(crate) fn capture<F: FnOnce()>(f: F) -> Vec<(log::Level, String)> {
    let logger = LOGGER.get_or_init(|| CaptureLogger {
        records: Mutex::new(Vec::new()),
    });
    if log::set_logger(logger).is_ok() {
        log::set_max_level(log::LevelFilter::Trace);
    }

    let id = thread::current().id();
    let take_own = || {
        let mut g = logger
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let (own, rest): (Vec<_>, Vec<_>) = g.drain(..).partition(|(t, _, _)| *t == id);
        *g = rest;
        own
    };

    take_own();
    f();
    take_own()
        .into_iter()
        .map(|(_, level, line)| (level, line))
        .collect()
}
