//! Reference frame loop driving a set of runners

use crate::clock::GameClock;
use crate::phase::PlayerLoopTiming;
use crate::runners::SystemRunners;

/// Fixed steps a single frame may run before the backlog is dropped
pub const DEFAULT_MAX_FIXED_STEPS: u32 = 8;

/// Fires every phase of a [`SystemRunners`] once per frame, and the fixed
/// update phase once per accumulated fixed step, up to `max_fixed_steps`.
pub struct PlayerLoop {
    clock: GameClock,
    max_fixed_steps: u32,
    frame_count: u64,
    fixed_steps: u64,
}

impl Default for PlayerLoop {
    fn default() -> Self {
        Self::new(GameClock::new())
    }
}

impl PlayerLoop {
    pub fn new(clock: GameClock) -> Self {
        Self {
            clock,
            max_fixed_steps: DEFAULT_MAX_FIXED_STEPS,
            frame_count: 0,
            fixed_steps: 0,
        }
    }

    /// Limit fixed steps per frame. Clamped to at least one.
    pub fn with_max_fixed_steps(mut self, max_fixed_steps: u32) -> Self {
        self.max_fixed_steps = max_fixed_steps.max(1);
        self
    }

    pub fn max_fixed_steps(&self) -> u32 {
        self.max_fixed_steps
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut GameClock {
        &mut self.clock
    }

    /// Frames completed so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Fixed steps run so far
    pub fn fixed_steps(&self) -> u64 {
        self.fixed_steps
    }

    /// Advance from the wall clock and run one frame
    pub fn tick(&mut self, runners: &SystemRunners) {
        self.clock.tick();
        self.run_frame(runners);
    }

    /// Advance by `dt` seconds and run one frame
    pub fn step(&mut self, runners: &SystemRunners, dt: f64) {
        self.clock.advance(dt);
        self.run_frame(runners);
    }

    fn run_frame(&mut self, runners: &SystemRunners) {
        for phase in PlayerLoopTiming::FRAME_ORDER {
            if phase.is_fixed() {
                self.run_fixed_steps(runners);
            } else {
                runners.run(phase, &self.clock);
            }
        }
        self.frame_count += 1;
    }

    fn run_fixed_steps(&mut self, runners: &SystemRunners) {
        let mut steps = 0;
        while self.clock.should_fixed_update() {
            if steps == self.max_fixed_steps {
                log::warn!(
                    "frame {}: fixed update fell behind after {} steps, dropping backlog",
                    self.frame_count,
                    steps
                );
                self.clock.drop_fixed_backlog();
                break;
            }
            self.clock.consume_fixed_step();
            runners.run(PlayerLoopTiming::FixedUpdate, &self.clock);
            self.fixed_steps += 1;
            steps += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::{system_ref, UpdateSystem};
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempo_core::{Result, SystemState};

    struct PhaseLog {
        phase: PlayerLoopTiming,
        log: Rc<RefCell<Vec<(PlayerLoopTiming, SystemState)>>>,
    }

    impl UpdateSystem for PhaseLog {
        fn update(&mut self, state: &SystemState) -> Result<()> {
            self.log.borrow_mut().push((self.phase, *state));
            Ok(())
        }
    }

    fn register_all(runners: &SystemRunners) -> Rc<RefCell<Vec<(PlayerLoopTiming, SystemState)>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        for phase in PlayerLoopTiming::ALL {
            runners.add_to(phase, system_ref(PhaseLog { phase, log: log.clone() }));
        }
        log
    }

    #[test]
    fn test_frame_visits_phases_in_order() {
        let runners = SystemRunners::new();
        let log = register_all(&runners);
        let mut player_loop = PlayerLoop::new(GameClock::with_fixed_timestep(50.0));

        // One fixed step's worth of time
        player_loop.step(&runners, 0.021);

        let phases: Vec<_> = log.borrow().iter().map(|(p, _)| *p).collect();
        assert_eq!(phases, PlayerLoopTiming::FRAME_ORDER.to_vec());
        assert_eq!(player_loop.frame_count(), 1);
        assert_eq!(player_loop.fixed_steps(), 1);
    }

    #[test]
    fn test_fixed_update_catches_up() {
        let runners = SystemRunners::new();
        let log = register_all(&runners);
        let mut player_loop = PlayerLoop::new(GameClock::with_fixed_timestep(50.0));

        player_loop.step(&runners, 0.01);
        player_loop.step(&runners, 0.065);

        let fixed: Vec<SystemState> = log
            .borrow()
            .iter()
            .filter(|(p, _)| p.is_fixed())
            .map(|(_, s)| *s)
            .collect();
        assert_eq!(fixed.len(), 3);
        for pair in fixed.windows(2) {
            assert!(pair[1].elapsed_time > pair[0].elapsed_time);
        }
        assert!(fixed.iter().all(|s| (s.delta_time - 0.02).abs() < 1e-6));
    }

    #[test]
    fn test_fixed_steps_capped_per_frame() {
        let runners = SystemRunners::new();
        let log = register_all(&runners);
        let mut player_loop =
            PlayerLoop::new(GameClock::with_fixed_timestep(50.0)).with_max_fixed_steps(4);

        // Twelve steps pending, only four may run
        player_loop.step(&runners, 0.25);
        assert_eq!(player_loop.fixed_steps(), 4);

        // The dropped backlog does not carry into the next frame
        player_loop.step(&runners, 0.001);
        assert_eq!(player_loop.fixed_steps(), 4);
        assert_eq!(player_loop.frame_count(), 2);

        let fixed_runs = log.borrow().iter().filter(|(p, _)| p.is_fixed()).count();
        assert_eq!(fixed_runs, 4);
    }

    #[test]
    fn test_tiny_fixed_timestep_still_finishes_frame() {
        let runners = SystemRunners::new();
        let mut player_loop = PlayerLoop::new(GameClock::with_fixed_timestep(1e18));

        player_loop.step(&runners, 1.0 / 60.0);

        assert_eq!(player_loop.frame_count(), 1);
        assert_eq!(
            player_loop.fixed_steps(),
            u64::from(DEFAULT_MAX_FIXED_STEPS)
        );
    }

    #[test]
    fn test_max_fixed_steps_at_least_one() {
        let player_loop = PlayerLoop::default().with_max_fixed_steps(0);
        assert_eq!(player_loop.max_fixed_steps(), 1);
    }

    #[test]
    fn test_variable_phases_see_frame_time() {
        let runners = SystemRunners::new();
        let log = register_all(&runners);
        let mut player_loop = PlayerLoop::default();

        player_loop.step(&runners, 0.1);

        let update = log
            .borrow()
            .iter()
            .find(|(p, _)| *p == PlayerLoopTiming::Update)
            .map(|(_, s)| *s)
            .unwrap();
        assert!((update.elapsed_time - 0.1).abs() < 1e-10);
        assert!((update.delta_time - 0.1).abs() < 1e-6);
    }
}
