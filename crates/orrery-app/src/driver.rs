//! The per-frame driver: scripted view requests in, snapshots out.

use bevy_ecs::world::World;
use orrery_config::{Config, ScheduledView};
use orrery_core::{Catalog, ChoreographerState};
use orrery_ecs::{
    CameraRig, FrameSnapshot, InputEvent, InputEvents, OrrerySchedules, create_world,
};
use orrery_space::SpaceScene;
use tracing::{info, warn};

/// Loads the configured catalog, falling back to the built-in one.
pub fn load_catalog(config: &Config) -> Catalog {
    let Some(path) = &config.scene.catalog_path else {
        return Catalog::builtin();
    };
    match Catalog::load(path) {
        Ok(catalog) => {
            info!(
                "Loaded catalog from {} ({} planets)",
                path.display(),
                catalog.planets.len()
            );
            catalog
        }
        Err(err) => {
            warn!("Failed to load catalog {}: {err}, using built-in", path.display());
            Catalog::builtin()
        }
    }
}

/// An orrery world plus its schedule and scripted input.
pub struct Orrery {
    world: World,
    schedules: OrrerySchedules,
    scene: SpaceScene,
    views: Vec<ScheduledView>,
    next_view: usize,
    frames_run: u64,
    snapshot_interval: u64,
    last_state: ChoreographerState,
}

impl Orrery {
    /// Builds the world, registers the core systems, and prepares the static
    /// scene. `views` may be given in any order.
    pub fn new(config: &Config, catalog: &Catalog, mut views: Vec<ScheduledView>) -> Self {
        views.sort_by_key(|view| view.frame);
        let world = create_world(config, catalog);
        let scene = SpaceScene::build(
            catalog,
            config.scene.star_seed,
            config.scene.star_count,
            config.scene.starfield_extent,
            config.scene.orbit_segments,
        );
        let last_state = world.resource::<CameraRig>().choreographer.state();
        Self {
            world,
            schedules: OrrerySchedules::with_core_systems(),
            scene,
            views,
            next_view: 0,
            frames_run: 0,
            snapshot_interval: config.debug.snapshot_interval,
            last_state,
        }
    }

    /// Queues an input event for the next frame.
    pub fn push_event(&mut self, event: InputEvent) {
        self.world.resource_mut::<InputEvents>().push(event);
    }

    /// Runs one frame of `frame_dt` seconds and returns its snapshot.
    pub fn run_frame(&mut self, frame_dt: f64) -> &FrameSnapshot {
        while let Some(view) = self.views.get(self.next_view) {
            if view.frame > self.frames_run {
                break;
            }
            let target = view.target.clone();
            self.next_view += 1;
            info!(frame = self.frames_run, %target, "requesting view");
            self.push_event(InputEvent::ViewChange(target));
        }

        self.schedules.run(&mut self.world, frame_dt);
        self.frames_run += 1;
        self.report();
        self.world.resource::<FrameSnapshot>()
    }

    fn report(&mut self) {
        let snapshot = self.world.resource::<FrameSnapshot>();
        if snapshot.state != self.last_state {
            info!(
                frame = snapshot.frame,
                focus = %snapshot.focus,
                "camera {:?} -> {:?}",
                self.last_state,
                snapshot.state
            );
            self.last_state = snapshot.state;
        }
        if self.snapshot_interval > 0 && snapshot.frame % self.snapshot_interval == 0 {
            let camera = snapshot.camera.position;
            info!(
                frame = snapshot.frame,
                elapsed = snapshot.elapsed,
                focus = %snapshot.focus,
                state = ?snapshot.state,
                "camera at ({:.2}, {:.2}, {:.2})",
                camera.x,
                camera.y,
                camera.z
            );
        }
    }

    pub fn snapshot(&self) -> &FrameSnapshot {
        self.world.resource::<FrameSnapshot>()
    }

    pub fn scene(&self) -> &SpaceScene {
        &self.scene
    }

    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Adds render-stage systems and other collaborators.
    pub fn schedules_mut(&mut self) -> &mut OrrerySchedules {
        &mut self.schedules
    }
}
