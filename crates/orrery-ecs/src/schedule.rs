//! Stage labels and the ordered schedule runner.

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::{IntoSystemConfigs, ScheduleLabel};

use crate::FrameTime;

/// Labels for each per-frame stage.
///
/// Stages run in the order listed, top to bottom, every frame.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Apply queued view requests and interaction events.
    Input,
    /// Advance the clock, then every body.
    Simulation,
    /// Refresh the focus position and tick the choreographer.
    Camera,
    /// Publish the frame snapshot.
    Publish,
    /// Render collaborators, reading the snapshot.
    Render,
}

const STAGES: [Stage; 5] = [
    Stage::Input,
    Stage::Simulation,
    Stage::Camera,
    Stage::Publish,
    Stage::Render,
];

/// Ordered collection of [`Schedule`]s that drives one orrery frame.
///
/// All core state is mutated inside a single [`run`](Self::run) call, so
/// anything queued between frames is applied atomically at the next one.
pub struct OrrerySchedules {
    schedules: Vec<(Stage, Schedule)>,
}

impl OrrerySchedules {
    /// Create one empty schedule per stage.
    pub fn new() -> Self {
        let schedules = STAGES
            .into_iter()
            .map(|label| (label, Schedule::default()))
            .collect();
        Self { schedules }
    }

    /// Stages with the core systems already registered.
    pub fn with_core_systems() -> Self {
        let mut schedules = Self::new();
        crate::register_core_systems(&mut schedules);
        schedules
    }

    /// Register a system (or system tuple) into a specific stage.
    pub fn add_system<M>(&mut self, stage: Stage, system: impl IntoSystemConfigs<M>) {
        if let Some(schedule) = self.get_schedule_mut(&stage) {
            schedule.add_systems(system);
        }
    }

    /// Run all stages in order for one frame of `frame_dt` seconds.
    pub fn run(&mut self, world: &mut World, frame_dt: f64) {
        if let Some(mut time) = world.get_resource_mut::<FrameTime>() {
            time.begin_frame(frame_dt);
        }
        for (_label, schedule) in &mut self.schedules {
            schedule.run(world);
        }
    }

    /// Returns a mutable reference to the schedule for a given stage.
    pub fn get_schedule_mut(&mut self, stage: &Stage) -> Option<&mut Schedule> {
        self.schedules
            .iter_mut()
            .find(|(label, _)| label == stage)
            .map(|(_, schedule)| schedule)
    }
}

impl Default for OrrerySchedules {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Resource, Default)]
    struct ExecutionLog {
        stages: Vec<&'static str>,
    }

    fn log_system(stage_name: &'static str) -> impl Fn(ResMut<'_, ExecutionLog>) {
        move |mut log: ResMut<'_, ExecutionLog>| {
            log.stages.push(stage_name);
        }
    }

    #[test]
    fn test_schedule_runs_all_stages_in_order() {
        let mut world = World::new();
        world.insert_resource(ExecutionLog::default());

        let mut schedules = OrrerySchedules::new();
        // Registered out of order on purpose.
        schedules.add_system(Stage::Render, log_system("Render"));
        schedules.add_system(Stage::Camera, log_system("Camera"));
        schedules.add_system(Stage::Input, log_system("Input"));
        schedules.add_system(Stage::Publish, log_system("Publish"));
        schedules.add_system(Stage::Simulation, log_system("Simulation"));

        schedules.run(&mut world, 1.0 / 60.0);

        let log = world.resource::<ExecutionLog>();
        assert_eq!(
            log.stages,
            vec!["Input", "Simulation", "Camera", "Publish", "Render"]
        );
    }

    #[test]
    fn test_run_updates_frame_time() {
        let mut world = World::new();
        world.insert_resource(FrameTime::default());
        let mut schedules = OrrerySchedules::new();

        schedules.run(&mut world, 0.02);
        schedules.run(&mut world, 0.03);

        let time = world.resource::<FrameTime>();
        assert_eq!(time.frame, 1);
        assert!((time.delta - 0.03).abs() < 1e-12);
        assert!((time.wall_elapsed - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_stage_labels_are_distinct() {
        for (i, a) in STAGES.iter().enumerate() {
            for (j, b) in STAGES.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b);
                }
            }
        }
    }
}
