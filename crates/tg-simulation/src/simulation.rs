use rand::SeedableRng;
use rand::rngs::StdRng;
use tg_core::world::World;

use crate::clock::SimClock;
use crate::config::SimConfig;
use crate::context::SimContext;
use crate::control::PlayerControlSystem;
use crate::error::{SimError, SimResult};
use crate::event::EventLog;
use crate::integrator::Integrator;
use crate::needs::NeedsSystem;
use crate::provision::ProvisionSystem;
use crate::selector::BehaviorSelector;
use crate::steering::SteeringSystem;
use crate::system::{Stage, System};

/// The top-level simulation orchestrator.
///
/// Owns the world, clock, RNG, event log, and registered systems.
/// Drives the tick loop, running systems stage by stage.
pub struct Simulation {
    world: World,
    clock: SimClock,
    rng: StdRng,
    events: EventLog,
    config: SimConfig,
    systems: Vec<Box<dyn System>>,
    initialized: bool,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("tick", &self.clock.tick())
            .field("systems", &self.systems.len())
            .field("events", &self.events.len())
            .finish()
    }
}

impl Simulation {
    /// Create a new simulation from a world and configuration.
    ///
    /// The RNG is seeded from `config.seed`. No systems are registered.
    pub fn new(world: World, config: SimConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        let events = EventLog::new(config.max_events);
        Self {
            world,
            clock: SimClock::new(),
            rng,
            events,
            config,
            systems: Vec::new(),
            initialized: false,
        }
    }

    /// Replace the random source, e.g. with one shared by a test harness.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Register the full needs-driven steering pipeline.
    pub fn with_default_systems(mut self) -> Self {
        self.add_system(NeedsSystem::new());
        self.add_system(ProvisionSystem::new());
        self.add_system(BehaviorSelector::new());
        self.add_system(SteeringSystem::new());
        self.add_system(PlayerControlSystem::new());
        self.add_system(Integrator::new());
        self
    }

    /// Register a system. Systems run by stage, then in registration order.
    pub fn add_system<S: System + 'static>(&mut self, system: S) {
        tracing::debug!(system = system.name(), stage = %system.stage(), "registering system");
        self.systems.push(Box::new(system));
        self.systems.sort_by_key(|s| s.stage());
    }

    /// Names of the registered systems in execution order.
    pub fn system_names(&self) -> Vec<&str> {
        self.systems.iter().map(|s| s.name()).collect()
    }

    /// Initialize all registered systems.
    pub fn init(&mut self) -> SimResult<()> {
        if self.initialized {
            return Ok(());
        }
        for i in 0..self.systems.len() {
            let mut system = std::mem::replace(&mut self.systems[i], Box::new(NoopSystem));
            let mut ctx = SimContext {
                world: &mut self.world,
                clock: &self.clock,
                events: &mut self.events,
                rng: &mut self.rng,
                config: &self.config,
            };
            let result = system.init(&mut ctx);
            self.systems[i] = system;
            result?;
        }
        self.initialized = true;
        Ok(())
    }

    /// Advance the simulation by one step of `dt` seconds.
    ///
    /// The caller bounds `dt`; only negative or non-finite steps are refused.
    pub fn tick(&mut self, dt: f32) -> SimResult<()> {
        if !dt.is_finite() || dt < 0.0 {
            tracing::warn!(dt, "rejecting invalid time step");
            return Err(SimError::InvalidTimeStep(dt));
        }
        if !self.initialized {
            self.init()?;
        }

        self.clock.advance(dt);
        tracing::trace!(tick = self.clock.tick(), dt, "tick");

        for i in 0..self.systems.len() {
            let mut system = std::mem::replace(&mut self.systems[i], Box::new(NoopSystem));
            let mut ctx = SimContext {
                world: &mut self.world,
                clock: &self.clock,
                events: &mut self.events,
                rng: &mut self.rng,
                config: &self.config,
            };
            let result = system.tick(&mut ctx);
            self.systems[i] = system;
            result?;
        }
        Ok(())
    }

    /// Advance the simulation by `n` steps of `dt` seconds each.
    pub fn run(&mut self, n: u64, dt: f32) -> SimResult<()> {
        for _ in 0..n {
            self.tick(dt)?;
        }
        Ok(())
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Access a system by downcasting to a concrete type.
    pub fn get_system<T: System + 'static>(&self) -> Option<&T> {
        self.systems
            .iter()
            .find_map(|s| s.as_any().downcast_ref::<T>())
    }

    /// Access a system mutably by downcasting to a concrete type.
    pub fn get_system_mut<T: System + 'static>(&mut self) -> Option<&mut T> {
        self.systems
            .iter_mut()
            .find_map(|s| s.as_any_mut().downcast_mut::<T>())
    }

    /// Extract the world, consuming the simulation.
    pub fn into_world(self) -> World {
        self.world
    }

    pub fn current_tick(&self) -> u64 {
        self.clock.tick()
    }
}

/// Placeholder system used during the swap-and-tick pattern.
#[derive(Debug)]
struct NoopSystem;

impl System for NoopSystem {
    fn name(&self) -> &str {
        "noop"
    }
    fn stage(&self) -> Stage {
        Stage::Integration
    }
    fn tick(&mut self, _ctx: &mut SimContext<'_>) -> SimResult<()> {
        Ok(())
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::SimEventKind;
    use tg_core::{
        Behaviour, BoundaryAvoidance, Kinematics, MovementLimits, Need, Needs, Position,
        ResourceKind, WanderSteering,
    };

    #[derive(Debug)]
    struct Recorder {
        label: &'static str,
        stage: Stage,
    }

    impl System for Recorder {
        fn name(&self) -> &str {
            self.label
        }
        fn stage(&self) -> Stage {
            self.stage
        }
        fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
            ctx.emit(
                SimEventKind::Custom {
                    label: self.label.into(),
                    entities: Vec::new(),
                },
                self.label,
            );
            Ok(())
        }
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
    }

    fn wanderer(world: &mut World, x: f32, y: f32) {
        world
            .spawn()
            .with(Position::new(x, y))
            .with(Kinematics::facing(0.4))
            .with(MovementLimits::default())
            .with(Behaviour::wander())
            .with(WanderSteering::default())
            .with(BoundaryAvoidance::default());
    }

    #[test]
    fn systems_run_in_stage_order_regardless_of_registration() {
        let mut sim = Simulation::new(World::new(), SimConfig::default());
        sim.add_system(Recorder { label: "integrate", stage: Stage::Integration });
        sim.add_system(Recorder { label: "select", stage: Stage::Selection });
        sim.add_system(Recorder { label: "drain", stage: Stage::Needs });
        sim.add_system(Recorder { label: "select-2", stage: Stage::Selection });

        assert_eq!(sim.system_names(), ["drain", "select", "select-2", "integrate"]);
        sim.tick(0.016).unwrap();
        let order: Vec<&str> = sim
            .events()
            .events()
            .iter()
            .map(|e| e.description.as_str())
            .collect();
        assert_eq!(order, ["drain", "select", "select-2", "integrate"]);
    }

    #[test]
    fn default_pipeline_order() {
        let sim = Simulation::new(World::new(), SimConfig::default()).with_default_systems();
        assert_eq!(
            sim.system_names(),
            ["needs", "provision", "behavior-selector", "steering", "player-control", "integrator"]
        );
    }

    #[test]
    fn invalid_time_steps_are_rejected() {
        let mut sim = Simulation::new(World::new(), SimConfig::default());
        for dt in [-0.1, f32::NAN, f32::INFINITY] {
            assert!(matches!(sim.tick(dt), Err(SimError::InvalidTimeStep(_))));
        }
        assert_eq!(sim.current_tick(), 0);
        sim.tick(0.0).unwrap();
        assert_eq!(sim.current_tick(), 1);
    }

    #[test]
    fn deterministic_with_same_seed() {
        let run = |seed: u64| {
            let mut world = World::new();
            wanderer(&mut world, 200.0, 300.0);
            wanderer(&mut world, 800.0, 700.0);
            let mut sim = Simulation::new(world, SimConfig::default().with_seed(seed))
                .with_default_systems();
            sim.run(200, 0.016).unwrap();
            sim.world()
                .iter::<Position>()
                .map(|(_, p)| *p)
                .collect::<Vec<_>>()
        };
        assert_eq!(run(123), run(123));
        assert_ne!(run(123), run(124));
    }

    #[test]
    fn with_rng_overrides_seed() {
        let make = |rng_seed: u64| {
            let mut world = World::new();
            wanderer(&mut world, 500.0, 500.0);
            let mut sim = Simulation::new(world, SimConfig::default().with_seed(1))
                .with_rng(StdRng::seed_from_u64(rng_seed))
                .with_default_systems();
            sim.run(60, 0.016).unwrap();
            sim.world().iter::<Position>().map(|(_, p)| *p).collect::<Vec<_>>()
        };
        assert_eq!(make(9), make(9));
        assert_ne!(make(9), make(10));
    }

    #[test]
    fn custom_system_can_be_fetched() {
        let mut sim = Simulation::new(World::new(), SimConfig::default());
        sim.add_system(Recorder { label: "probe", stage: Stage::Needs });
        sim.tick(0.016).unwrap();
        assert_eq!(sim.get_system::<Recorder>().unwrap().label, "probe");
        assert!(sim.get_system_mut::<Integrator>().is_none());
    }

    #[test]
    fn into_world_preserves_changes() {
        let mut world = World::new();
        let id = world
            .spawn()
            .with(Needs::new(vec![
                Need::new(ResourceKind::Food, 50.0, 100.0).with_loss_per_second(10.0),
            ]))
            .id();
        let mut sim = Simulation::new(world, SimConfig::default()).with_default_systems();
        sim.run(10, 0.1).unwrap();
        let world = sim.into_world();
        let food = world.get::<Needs>(id).unwrap().get(&ResourceKind::Food).unwrap().value;
        assert!((food - 40.0).abs() < 1e-3);
    }

    #[test]
    fn empty_world_no_crash() {
        let mut sim = Simulation::new(World::new(), SimConfig::default()).with_default_systems();
        sim.run(100, 0.016).unwrap();
        assert_eq!(sim.current_tick(), 100);
    }
}
