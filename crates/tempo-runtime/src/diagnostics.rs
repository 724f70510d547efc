//! Profiling samples and failure reports emitted by runners

use crate::phase::PlayerLoopTiming;
use crate::system::LifecycleStage;
use std::fmt;
use tempo_core::TempoError;

/// A captured failure from one stage of one system
#[derive(Debug)]
pub struct SystemFailure {
    pub system: &'static str,
    pub phase: PlayerLoopTiming,
    pub stage: LifecycleStage,
    pub error: TempoError,
}

impl fmt::Display for SystemFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}::{} failed: {}",
            self.phase, self.system, self.stage, self.error
        )
    }
}

/// Sink for runner instrumentation.
///
/// Runners open one sample per system per run and report each captured
/// failure exactly once.
pub trait Diagnostics {
    fn begin_sample(&self, _name: &str) {}

    fn end_sample(&self, _name: &str) {}

    fn report_failure(&self, failure: &SystemFailure);
}

/// Writes samples and failures through the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn begin_sample(&self, name: &str) {
        log::trace!("begin sample {}", name);
    }

    fn end_sample(&self, name: &str) {
        log::trace!("end sample {}", name);
    }

    fn report_failure(&self, failure: &SystemFailure) {
        log::error!("{}", failure);
    }
}

/// Extract a readable message from a panic payload
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
