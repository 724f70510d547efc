//! Run command — drives the demo simulation through the player loop

use super::load_config;
use crate::demo::{
    ConversionSystem, FaultySystem, LifetimeSystem, MovementSystem, Position, SceneObject,
    SharedWorld, Velocity,
};
use anyhow::{bail, Result};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tempo_runtime::{
    system_ref, Diagnostics, LogDiagnostics, PlayerLoopTiming, SystemFailure, SystemRunners,
};

pub struct RunArgs {
    pub config: Option<String>,
    pub frames: u64,
    pub dt: f64,
    pub faulty: bool,
}

/// Logs through the `log` facade and keeps a failure count for the summary
#[derive(Default)]
struct CountingDiagnostics {
    inner: LogDiagnostics,
    failures: Cell<usize>,
}

impl Diagnostics for CountingDiagnostics {
    fn begin_sample(&self, name: &str) {
        self.inner.begin_sample(name);
    }

    fn end_sample(&self, name: &str) {
        self.inner.end_sample(name);
    }

    fn report_failure(&self, failure: &SystemFailure) {
        self.failures.set(self.failures.get() + 1);
        self.inner.report_failure(failure);
    }
}

fn demo_scene() -> Vec<SceneObject> {
    let mut objects = vec![SceneObject {
        name: "ship".to_string(),
        position: Position(0.0, 0.0),
        velocity: Velocity(0.0, 0.0),
        lifetime: None,
    }];
    for i in 0..8 {
        let angle = i as f32 * std::f32::consts::TAU / 8.0;
        objects.push(SceneObject {
            name: format!("debris_{}", i),
            position: Position(0.0, 0.0),
            velocity: Velocity(angle.cos() * 3.0, angle.sin() * 3.0),
            lifetime: Some(0.5 + i as f32 * 0.25),
        });
    }
    objects
}

pub fn run(args: RunArgs) -> Result<()> {
    if !(args.dt.is_finite() && args.dt > 0.0) {
        bail!("--dt must be a positive number of seconds, got {}", args.dt);
    }

    let config = load_config(args.config.as_deref())?;

    let diagnostics = Rc::new(CountingDiagnostics::default());
    let mut runners = SystemRunners::with_diagnostics(diagnostics.clone());
    config.apply(&mut runners)?;

    let world = SharedWorld::default();
    let scene = Rc::new(RefCell::new(demo_scene()));
    let scene_size = scene.borrow().len();

    runners.add_to(
        PlayerLoopTiming::Initialization,
        system_ref(ConversionSystem::new(world.clone(), scene.clone(), config.conversion)),
    );
    runners.add_to(
        PlayerLoopTiming::FixedUpdate,
        system_ref(MovementSystem::new(world.clone())),
    );
    let lifetime = Rc::new(RefCell::new(LifetimeSystem::new(world.clone())));
    runners.add(lifetime.clone());
    if args.faulty {
        runners.add_to(PlayerLoopTiming::PreLateUpdate, system_ref(FaultySystem::new(30)));
    }

    log::info!(
        "Running {} frames at dt={:.4}s, default phase {}",
        args.frames,
        args.dt,
        runners.default_runner().phase()
    );

    let mut player_loop = config.frame_loop.player_loop();
    for _ in 0..args.frames {
        player_loop.step(&runners, args.dt);
    }

    println!("Frames:           {}", player_loop.frame_count());
    println!("Fixed steps:      {}", player_loop.fixed_steps());
    println!("Elapsed:          {:.3}s", player_loop.clock().total_time);
    println!(
        "Fixed alpha:      {:.3}",
        player_loop.clock().interpolation_alpha()
    );
    println!(
        "Conversion:       {} (hybrid: {})",
        config.conversion.mode, config.conversion.convert_hybrid_components
    );
    println!("Scene objects:    {} -> {} kept", scene_size, scene.borrow().len());
    println!("Entities alive:   {}", world.borrow().len());
    println!("Despawned:        {}", lifetime.borrow().despawned());
    println!("System failures:  {}", diagnostics.failures.get());

    Ok(())
}
