//! World factory and core resource registration.

use bevy_ecs::prelude::*;
use orrery_config::Config;
use orrery_core::{
    BodySystem, CameraChoreographer, Catalog, FocusRegistry, InteractionTracker, SimulationClock,
};

use crate::{
    Bodies, CameraRig, Focus, FrameSnapshot, FrameTime, InputEvents, Interaction, SimClock,
    snapshot::shader_time,
};

/// Registers every core resource, built from `config` and `catalog`.
pub fn register_core_resources(world: &mut World, config: &Config, catalog: &Catalog) {
    let bodies = BodySystem::from_catalog(catalog);
    let registry = FocusRegistry::new(&bodies, &config.camera.focus);
    let choreographer =
        CameraChoreographer::new(&registry, &bodies, config.camera.choreography);
    let sim = SimClock {
        clock: SimulationClock::new(config.simulation.clamped_speed()),
        time_mode: config.simulation.time_mode,
        max_speed_multiplier: config.simulation.max_speed_multiplier,
    };

    let snapshot = FrameSnapshot {
        frame: 0,
        elapsed: sim.clock.elapsed(),
        shader_time: shader_time(sim.clock.elapsed()),
        bodies: bodies.transforms(),
        camera: choreographer.live(),
        state: choreographer.state(),
        focus: choreographer.focus().id.clone(),
    };

    world.insert_resource(FrameTime::default());
    world.insert_resource(sim);
    world.insert_resource(Bodies(bodies));
    world.insert_resource(Focus(registry));
    world.insert_resource(CameraRig::new(choreographer));
    world.insert_resource(Interaction(InteractionTracker::new(
        config.camera.interaction_debounce(),
    )));
    world.insert_resource(InputEvents::default());
    world.insert_resource(snapshot);
}

/// Creates an ECS world with every orrery resource pre-inserted.
pub fn create_world(config: &Config, catalog: &Catalog) -> World {
    let mut world = World::new();
    register_core_resources(&mut world, config, catalog);
    world
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_core::{ChoreographerState, FocusId, TimeMode};

    #[test]
    fn test_create_world_has_all_resources() {
        let world = create_world(&Config::default(), &Catalog::builtin());
        assert!(world.contains_resource::<FrameTime>());
        assert!(world.contains_resource::<SimClock>());
        assert!(world.contains_resource::<Bodies>());
        assert!(world.contains_resource::<Focus>());
        assert!(world.contains_resource::<CameraRig>());
        assert!(world.contains_resource::<Interaction>());
        assert!(world.contains_resource::<InputEvents>());
        assert!(world.contains_resource::<FrameSnapshot>());
        assert_eq!(world.entities().len(), 0);
    }

    #[test]
    fn test_resources_follow_config() {
        let mut config = Config::default();
        config.simulation.speed_multiplier = 9.0;
        config.simulation.time_mode = TimeMode::Elapsed;
        config.camera.interaction_debounce_ms = 250;
        let world = create_world(&config, &Catalog::builtin());

        let sim = world.resource::<SimClock>();
        assert_eq!(sim.time_mode, TimeMode::Elapsed);
        // Clamped to max_speed_multiplier.
        assert_eq!(sim.clock.speed_multiplier(), 5.0);
        assert_eq!(
            world.resource::<Interaction>().0.debounce().as_millis(),
            250
        );
    }

    #[test]
    fn test_initial_snapshot_shows_overview() {
        let world = create_world(&Config::default(), &Catalog::builtin());
        let snapshot = world.resource::<FrameSnapshot>();
        assert_eq!(snapshot.state, ChoreographerState::Free);
        assert_eq!(snapshot.focus, FocusId::Overview);
        assert_eq!(snapshot.bodies.len(), 9);
        assert_eq!(snapshot.camera.look_at, glam::DVec3::ZERO);
    }
}
