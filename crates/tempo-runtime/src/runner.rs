//! Per-phase system runner

use crate::clock::TimeSource;
use crate::diagnostics::{panic_message, Diagnostics, LogDiagnostics, SystemFailure};
use crate::phase::PlayerLoopTiming;
use crate::system::{LifecycleStage, SystemRef};
use std::cell::RefCell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use tempo_core::{Result, SystemState, TempoError};

const UNRESOLVED_NAME: &str = "<unnamed>";

#[derive(Clone)]
struct Entry {
    system: SystemRef,
    /// `None` until the system could be borrowed, e.g. when it registered
    /// itself from inside its own callback
    name: Option<&'static str>,
}

impl Entry {
    fn label(&self) -> &'static str {
        self.name.unwrap_or(UNRESOLVED_NAME)
    }
}

/// Runs the systems registered for one frame-loop phase.
///
/// Registry order is execution order. A run snapshots the registry first, so
/// systems added or removed while the phase is running take effect on the
/// next run.
pub struct SystemRunner {
    phase: PlayerLoopTiming,
    systems: RefCell<Vec<Entry>>,
    diagnostics: Rc<dyn Diagnostics>,
}

impl SystemRunner {
    /// Create a runner reporting through [`LogDiagnostics`]
    pub fn new(phase: PlayerLoopTiming) -> Self {
        Self::with_diagnostics(phase, Rc::new(LogDiagnostics))
    }

    pub fn with_diagnostics(phase: PlayerLoopTiming, diagnostics: Rc<dyn Diagnostics>) -> Self {
        Self {
            phase,
            systems: RefCell::new(Vec::new()),
            diagnostics,
        }
    }

    pub fn phase(&self) -> PlayerLoopTiming {
        self.phase
    }

    /// Append a system. The same handle may be added more than once and then
    /// runs once per registration.
    pub fn add(&self, system: SystemRef) {
        let name = system.try_borrow().ok().map(|s| s.name());
        log::debug!("[{}] add system {}", self.phase, name.unwrap_or(UNRESOLVED_NAME));
        self.systems.borrow_mut().push(Entry { system, name });
    }

    /// Remove the first registration of `system`. Returns false when it was
    /// not registered.
    pub fn remove(&self, system: &SystemRef) -> bool {
        let mut systems = self.systems.borrow_mut();
        match systems.iter().position(|e| Rc::ptr_eq(&e.system, system)) {
            Some(index) => {
                let entry = systems.remove(index);
                log::debug!("[{}] remove system {}", self.phase, entry.label());
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, system: &SystemRef) -> bool {
        self.systems
            .borrow()
            .iter()
            .any(|e| Rc::ptr_eq(&e.system, system))
    }

    pub fn len(&self) -> usize {
        self.systems.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.systems.borrow_mut().clear();
    }

    /// Names of the registered systems in execution order
    pub fn system_names(&self) -> Vec<&'static str> {
        self.systems.borrow().iter().map(Entry::label).collect()
    }

    /// The snapshot a run of this phase would hand to its systems
    pub fn state_for(&self, time: &dyn TimeSource) -> SystemState {
        if self.phase.is_fixed() {
            SystemState::new(time.fixed_time(), time.fixed_delta_time())
        } else {
            SystemState::new(time.time(), time.delta_time())
        }
    }

    /// Run every registered system once. Failures are reported to the
    /// diagnostics sink and never escape.
    pub fn run(&self, time: &dyn TimeSource) {
        let state = self.state_for(time);
        let snapshot: Vec<Entry> = self.systems.borrow().clone();

        for entry in &snapshot {
            match entry.system.try_borrow_mut() {
                Ok(mut system) => {
                    let name = system.name();
                    if entry.name.is_none() {
                        self.resolve_name(&entry.system, name);
                    }

                    self.diagnostics.begin_sample(name);
                    self.invoke(name, LifecycleStage::BeforeUpdate, || {
                        system.before_update(&state)
                    });
                    self.invoke(name, LifecycleStage::Update, || system.update(&state));
                    self.invoke(name, LifecycleStage::AfterUpdate, || {
                        system.after_update(&state)
                    });
                    self.diagnostics.end_sample(name);
                }
                Err(_) => {
                    // Re-entrant run from inside this system's own callback
                    let name = entry.label();
                    self.diagnostics.begin_sample(name);
                    for stage in LifecycleStage::ALL {
                        self.report(name, stage, TempoError::SystemBusy(name.to_string()));
                    }
                    self.diagnostics.end_sample(name);
                }
            }
        }
    }

    /// Fill in the name of every registration of `system` still unnamed
    fn resolve_name(&self, system: &SystemRef, name: &'static str) {
        if let Ok(mut systems) = self.systems.try_borrow_mut() {
            systems
                .iter_mut()
                .filter(|e| e.name.is_none() && Rc::ptr_eq(&e.system, system))
                .for_each(|e| e.name = Some(name));
        }
    }

    fn invoke<F>(&self, name: &'static str, stage: LifecycleStage, callback: F)
    where
        F: FnOnce() -> Result<()>,
    {
        let outcome = match panic::catch_unwind(AssertUnwindSafe(callback)) {
            Ok(result) => result,
            Err(payload) => Err(TempoError::SystemPanicked(panic_message(payload.as_ref()))),
        };

        if let Err(error) = outcome {
            self.report(name, stage, error);
        }
    }

    fn report(&self, system: &'static str, stage: LifecycleStage, error: TempoError) {
        self.diagnostics.report_failure(&SystemFailure {
            system,
            phase: self.phase,
            stage,
            error,
        });
    }
}

impl fmt::Debug for SystemRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemRunner")
            .field("phase", &self.phase)
            .field("systems", &self.system_names())
            .finish()
    }
}
