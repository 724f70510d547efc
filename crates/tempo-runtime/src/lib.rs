//! Tempo Runtime - Phased system dispatch
//!
//! Provides the pieces a host frame loop plugs into:
//! - `PlayerLoopTiming` — the named timing points of a frame
//! - `UpdateSystem` — trait for systems driven through before/update/after
//! - `SystemRunner` — ordered, fault-isolated runner for one phase
//! - `SystemRunners` — one runner per phase plus a redirectable default
//! - `GameClock` / `ManualTime` — time sources snapshotted per run
//! - `PlayerLoop` — reference driver firing every phase once per frame
//! - `TempoConfig` — TOML configuration

mod clock;
mod config;
mod diagnostics;
mod phase;
mod player_loop;
mod runner;
mod runners;
mod system;

pub use clock::{GameClock, ManualTime, TimeSource};
pub use config::{LoopConfig, TempoConfig, MAX_FIXED_TIMESTEP_HZ};
pub use diagnostics::{Diagnostics, LogDiagnostics, SystemFailure};
pub use phase::PlayerLoopTiming;
pub use player_loop::{PlayerLoop, DEFAULT_MAX_FIXED_STEPS};
pub use runner::SystemRunner;
pub use runners::SystemRunners;
pub use system::{system_ref, LifecycleStage, SystemRef, UpdateSystem};
pub use tempo_core::SystemState;
