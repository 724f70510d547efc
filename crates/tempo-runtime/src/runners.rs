//! The set of phase runners owned by an application

use crate::clock::TimeSource;
use crate::diagnostics::{Diagnostics, LogDiagnostics};
use crate::phase::PlayerLoopTiming;
use crate::runner::SystemRunner;
use crate::system::SystemRef;
use std::rc::Rc;

/// One [`SystemRunner`] per frame-loop phase, plus a redirectable default.
///
/// Built once by the composition root and passed to whatever needs to
/// register systems or fire phases. The default runner starts as the update
/// runner and decides where [`SystemRunners::add`] attaches systems.
pub struct SystemRunners {
    runners: Vec<Rc<SystemRunner>>,
    default: Rc<SystemRunner>,
}

impl Default for SystemRunners {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemRunners {
    pub fn new() -> Self {
        Self::with_diagnostics(Rc::new(LogDiagnostics))
    }

    /// Create all runners sharing one diagnostics sink
    pub fn with_diagnostics(diagnostics: Rc<dyn Diagnostics>) -> Self {
        let runners: Vec<Rc<SystemRunner>> = PlayerLoopTiming::ALL
            .into_iter()
            .map(|phase| Rc::new(SystemRunner::with_diagnostics(phase, Rc::clone(&diagnostics))))
            .collect();
        let default = Rc::clone(&runners[PlayerLoopTiming::Update.index()]);
        Self { runners, default }
    }

    /// The built-in runner for `phase`
    pub fn runner(&self, phase: PlayerLoopTiming) -> &Rc<SystemRunner> {
        &self.runners[phase.index()]
    }

    pub fn initialization(&self) -> &Rc<SystemRunner> {
        self.runner(PlayerLoopTiming::Initialization)
    }

    pub fn early_update(&self) -> &Rc<SystemRunner> {
        self.runner(PlayerLoopTiming::EarlyUpdate)
    }

    pub fn fixed_update(&self) -> &Rc<SystemRunner> {
        self.runner(PlayerLoopTiming::FixedUpdate)
    }

    pub fn pre_update(&self) -> &Rc<SystemRunner> {
        self.runner(PlayerLoopTiming::PreUpdate)
    }

    pub fn update(&self) -> &Rc<SystemRunner> {
        self.runner(PlayerLoopTiming::Update)
    }

    pub fn pre_late_update(&self) -> &Rc<SystemRunner> {
        self.runner(PlayerLoopTiming::PreLateUpdate)
    }

    pub fn post_late_update(&self) -> &Rc<SystemRunner> {
        self.runner(PlayerLoopTiming::PostLateUpdate)
    }

    pub fn time_update(&self) -> &Rc<SystemRunner> {
        self.runner(PlayerLoopTiming::TimeUpdate)
    }

    pub fn default_runner(&self) -> &Rc<SystemRunner> {
        &self.default
    }

    /// Point the default at any runner, including one not owned by this set
    pub fn set_default(&mut self, runner: Rc<SystemRunner>) {
        log::debug!("default runner set to {}", runner.phase());
        self.default = runner;
    }

    /// Point the default at the built-in runner for `phase`
    pub fn set_default_phase(&mut self, phase: PlayerLoopTiming) {
        self.set_default(Rc::clone(self.runner(phase)));
    }

    /// Attach a system to the default runner
    pub fn add(&self, system: SystemRef) {
        self.default.add(system);
    }

    /// Detach a system from the default runner
    pub fn remove(&self, system: &SystemRef) -> bool {
        self.default.remove(system)
    }

    pub fn add_to(&self, phase: PlayerLoopTiming, system: SystemRef) {
        self.runner(phase).add(system);
    }

    pub fn remove_from(&self, phase: PlayerLoopTiming, system: &SystemRef) -> bool {
        self.runner(phase).remove(system)
    }

    /// Fire one phase of the frame loop
    pub fn run(&self, phase: PlayerLoopTiming, time: &dyn TimeSource) {
        self.runner(phase).run(time);
    }

    /// Total registrations across the built-in runners
    pub fn len(&self) -> usize {
        self.runners.iter().map(|r| r.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.runners.iter().all(|r| r.is_empty())
    }

    /// Phases holding a registration of `system`
    pub fn phases_of(&self, system: &SystemRef) -> Vec<PlayerLoopTiming> {
        self.runners
            .iter()
            .filter(|r| r.contains(system))
            .map(|r| r.phase())
            .collect()
    }
}
