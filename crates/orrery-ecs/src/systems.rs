//! The core per-frame systems and their registration.

use bevy_ecs::prelude::*;
use tracing::{debug, warn};

use crate::{
    Bodies, CameraRig, Focus, FrameSnapshot, FrameTime, InputEvent, InputEvents, Interaction,
    OrrerySchedules, SimClock, Stage, snapshot::shader_time,
};

/// Applies every queued input event in arrival order, then derives the
/// manual-override flag for this frame.
pub fn process_input(
    time: Res<'_, FrameTime>,
    bodies: Res<'_, Bodies>,
    focus: Res<'_, Focus>,
    mut events: ResMut<'_, InputEvents>,
    mut interaction: ResMut<'_, Interaction>,
    mut rig: ResMut<'_, CameraRig>,
    mut sim: ResMut<'_, SimClock>,
) {
    let now = time.now();
    for event in events.drain() {
        match event {
            InputEvent::ViewChange(target_id) => {
                if let Err(err) = rig
                    .choreographer
                    .request_view(&target_id, &focus.0, &bodies.0)
                {
                    warn!(%err, "view change ignored");
                }
            }
            InputEvent::InteractionStart => interaction.0.press(),
            InputEvent::InteractionEnd => interaction.0.release(now),
            InputEvent::ManualPose(pose) => {
                let manual = interaction.0.is_overriding(now);
                if !rig.choreographer.sync_manual_pose(pose, manual) {
                    debug!("manual camera pose ignored");
                }
            }
            InputEvent::ReleaseFocus => rig.choreographer.release(),
            InputEvent::SetSpeed(speed) => {
                sim.set_speed(speed);
                debug!(speed = sim.clock.speed_multiplier(), "speed multiplier changed");
            }
        }
    }
    rig.manual_override = interaction.0.is_overriding(now);
}

/// Advances the simulation clock by this frame's nominal step.
pub fn advance_clock(time: Res<'_, FrameTime>, mut sim: ResMut<'_, SimClock>) {
    let step = sim.time_mode.nominal_step(time.delta);
    sim.clock.tick(step);
}

/// Advances every body by the clock's latest delta.
pub fn advance_bodies(sim: Res<'_, SimClock>, mut bodies: ResMut<'_, Bodies>) {
    // The clock delta already carries the speed multiplier.
    bodies.0.advance(sim.clock.last_delta(), 1.0);
}

/// Refreshes the focus position and eases the live camera pose.
pub fn update_camera(bodies: Res<'_, Bodies>, mut rig: ResMut<'_, CameraRig>) {
    let manual = rig.manual_override;
    rig.choreographer.tick(&bodies.0, manual);
}

/// Publishes body transforms and the live camera pose for renderers.
pub fn publish_snapshot(
    time: Res<'_, FrameTime>,
    sim: Res<'_, SimClock>,
    bodies: Res<'_, Bodies>,
    rig: Res<'_, CameraRig>,
    mut snapshot: ResMut<'_, FrameSnapshot>,
) {
    let elapsed = sim.clock.elapsed();
    *snapshot = FrameSnapshot {
        frame: time.frame,
        elapsed,
        shader_time: shader_time(elapsed),
        bodies: bodies.0.transforms(),
        camera: rig.choreographer.live(),
        state: rig.choreographer.state(),
        focus: rig.choreographer.focus().id.clone(),
    };
}

/// Registers the core systems into their stages.
pub fn register_core_systems(schedules: &mut OrrerySchedules) {
    schedules.add_system(Stage::Input, process_input);
    schedules.add_system(Stage::Simulation, (advance_clock, advance_bodies).chain());
    schedules.add_system(Stage::Camera, update_camera);
    schedules.add_system(Stage::Publish, publish_snapshot);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_world;
    use orrery_config::Config;
    use orrery_core::{CameraPose, Catalog, ChoreographerState, FocusId, TimeMode};

    const DT: f64 = 1.0 / 60.0;

    fn setup() -> (World, OrrerySchedules) {
        let world = create_world(&Config::default(), &Catalog::builtin());
        (world, OrrerySchedules::with_core_systems())
    }

    fn run_frames(world: &mut World, schedules: &mut OrrerySchedules, frames: usize) {
        for _ in 0..frames {
            schedules.run(world, DT);
        }
    }

    fn push(world: &mut World, event: InputEvent) {
        world.resource_mut::<InputEvents>().push(event);
    }

    fn camera(world: &World) -> CameraPose {
        world.resource::<CameraRig>().choreographer.live()
    }

    fn state(world: &World) -> ChoreographerState {
        world.resource::<CameraRig>().choreographer.state()
    }

    #[test]
    fn test_camera_tracks_bodies_advanced_this_frame() {
        let (mut world, mut schedules) = setup();
        push(&mut world, InputEvent::ViewChange("Mars".into()));
        run_frames(&mut world, &mut schedules, 1);

        let mars = world.resource::<FrameSnapshot>().body("Mars").unwrap().position;
        let pending = world.resource::<CameraRig>().choreographer.pending();
        assert!((pending.look_at - mars).length() < 1e-12);
        // One tick of Mars's orbit has already been applied.
        let expected_angle = 0.0053;
        assert!((mars.x - 9.0 * f64::cos(expected_angle)).abs() < 1e-9);
        assert!((mars.z - 9.0 * f64::sin(expected_angle)).abs() < 1e-9);
    }

    #[test]
    fn test_render_stage_sees_current_frame() {
        #[derive(Resource, Default)]
        struct Rendered(Vec<(u64, ChoreographerState)>);

        let (mut world, mut schedules) = setup();
        world.insert_resource(Rendered::default());
        schedules.add_system(
            Stage::Render,
            |snapshot: Res<'_, FrameSnapshot>, mut rendered: ResMut<'_, Rendered>| {
                rendered.0.push((snapshot.frame, snapshot.state));
            },
        );

        run_frames(&mut world, &mut schedules, 2);
        push(&mut world, InputEvent::ViewChange("Earth".into()));
        run_frames(&mut world, &mut schedules, 1);

        assert_eq!(
            world.resource::<Rendered>().0,
            vec![
                (0, ChoreographerState::Free),
                (1, ChoreographerState::Free),
                (2, ChoreographerState::Transitioning),
            ]
        );
    }

    #[test]
    fn test_unknown_view_is_ignored() {
        let (mut world, mut schedules) = setup();
        run_frames(&mut world, &mut schedules, 3);
        let before = camera(&world);

        push(&mut world, InputEvent::ViewChange("Vulcan".into()));
        run_frames(&mut world, &mut schedules, 1);

        assert_eq!(state(&world), ChoreographerState::Free);
        assert_eq!(camera(&world), before);
        assert_eq!(world.resource::<FrameSnapshot>().focus, FocusId::Overview);
        assert!(world.resource::<InputEvents>().is_empty());
    }

    #[test]
    fn test_frozen_simulation_still_converges() {
        let (mut world, mut schedules) = setup();
        push(&mut world, InputEvent::SetSpeed(0.0));
        push(&mut world, InputEvent::ViewChange("Jupiter".into()));
        let angles_before = world.resource::<Bodies>().0.transforms();

        run_frames(&mut world, &mut schedules, 300);

        let angles_after = world.resource::<Bodies>().0.transforms();
        assert_eq!(angles_before, angles_after);
        assert_eq!(state(&world), ChoreographerState::Following);
        assert!(world.resource::<CameraRig>().choreographer.distance_to_pending() < 0.5);
    }

    #[test]
    fn test_speed_changes_accumulate_linearly() {
        let (mut world, mut schedules) = setup();
        run_frames(&mut world, &mut schedules, 10);
        push(&mut world, InputEvent::SetSpeed(2.0));
        run_frames(&mut world, &mut schedules, 10);

        let snapshot = world.resource::<FrameSnapshot>();
        assert!((snapshot.elapsed - 30.0).abs() < 1e-9);
        assert!((snapshot.shader_time - 0.09).abs() < 1e-12);
        let earth = snapshot.body("Earth").unwrap();
        assert!((earth.revolution_angle - 0.3).abs() < 1e-9);
        assert!((earth.rotation_angle - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_elapsed_mode_scales_with_frame_time() {
        let mut config = Config::default();
        config.simulation.time_mode = TimeMode::Elapsed;
        let mut world = create_world(&config, &Catalog::builtin());
        let mut schedules = OrrerySchedules::with_core_systems();

        schedules.run(&mut world, 1.0 / 30.0);
        schedules.run(&mut world, 1.0 / 30.0);
        // A stall is clamped rather than jumping the whole system forward.
        schedules.run(&mut world, 5.0);

        let elapsed = world.resource::<SimClock>().clock.elapsed();
        assert!((elapsed - (2.0 + 2.0 + 15.0)).abs() < 1e-9);
    }

    #[test]
    fn test_overview_settles_into_following() {
        let (mut world, mut schedules) = setup();
        push(&mut world, InputEvent::ViewChange("Saturn".into()));
        run_frames(&mut world, &mut schedules, 200);
        push(&mut world, InputEvent::ViewChange("overview".into()));
        run_frames(&mut world, &mut schedules, 300);

        assert_eq!(state(&world), ChoreographerState::Following);
        let rig = world.resource::<CameraRig>();
        assert!(rig.choreographer.distance_to_pending() < 1e-3);
    }

    #[test]
    fn test_manual_override_pauses_following() {
        let mut config = Config::default();
        config.camera.choreography.carry_with_focus = true;
        let mut world = create_world(&config, &Catalog::builtin());
        let mut schedules = OrrerySchedules::with_core_systems();
        push(&mut world, InputEvent::ViewChange("Earth".into()));
        run_frames(&mut world, &mut schedules, 300);
        assert_eq!(state(&world), ChoreographerState::Following);

        push(&mut world, InputEvent::InteractionStart);
        run_frames(&mut world, &mut schedules, 1);
        let held = camera(&world);
        run_frames(&mut world, &mut schedules, 20);
        assert!(world.resource::<CameraRig>().manual_override);
        assert_eq!(camera(&world), held);

        // The viewer drags the camera somewhere else.
        let dragged = CameraPose::new(glam::DVec3::new(0.0, 30.0, 0.0), held.look_at);
        push(&mut world, InputEvent::ManualPose(dragged));
        run_frames(&mut world, &mut schedules, 1);
        assert_eq!(camera(&world), dragged);

        // Tracking resumes once the 100 ms debounce has passed.
        push(&mut world, InputEvent::InteractionEnd);
        run_frames(&mut world, &mut schedules, 3);
        assert!(world.resource::<CameraRig>().manual_override);
        assert_eq!(camera(&world), dragged);
        run_frames(&mut world, &mut schedules, 10);
        assert!(!world.resource::<CameraRig>().manual_override);
        assert_ne!(camera(&world), dragged);
        assert_eq!(state(&world), ChoreographerState::Following);
    }

    #[test]
    fn test_manual_pose_ignored_without_interaction() {
        let (mut world, mut schedules) = setup();
        push(&mut world, InputEvent::ViewChange("Mars".into()));
        run_frames(&mut world, &mut schedules, 300);
        let stray = CameraPose::new(glam::DVec3::splat(100.0), glam::DVec3::ZERO);
        push(&mut world, InputEvent::ManualPose(stray));
        run_frames(&mut world, &mut schedules, 1);
        assert_ne!(camera(&world), stray);
    }

    #[test]
    fn test_release_focus_freezes_camera() {
        let (mut world, mut schedules) = setup();
        push(&mut world, InputEvent::ViewChange("Earth".into()));
        run_frames(&mut world, &mut schedules, 30);
        push(&mut world, InputEvent::ReleaseFocus);
        run_frames(&mut world, &mut schedules, 1);
        let released = camera(&world);
        run_frames(&mut world, &mut schedules, 30);

        assert_eq!(state(&world), ChoreographerState::Free);
        assert_eq!(camera(&world), released);
    }
}
