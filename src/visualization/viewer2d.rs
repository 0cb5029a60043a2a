use std::fs::File;
use std::io::BufWriter;

use bevy::app::AppExit;
use bevy::math::primitives::Circle;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};

use crate::output::trajectory::TrajectoryWriter;
use crate::simulation::scenario::Scenario;

#[derive(Component)]
struct BodyIndex(pub usize);

/// Scenario plus its trajectory log, stepped once per frame
#[derive(Resource)]
struct ViewerRun {
    scenario: Scenario,
    writer: TrajectoryWriter<BufWriter<File>>,
}

const WINDOW_SIZE: f32 = 800.0;
const SCALE: f32 = 200.0; // pixels per simulation unit
const MARKER_RADIUS: f32 = 16.0;

pub fn run_2d(scenario: Scenario, mut writer: TrajectoryWriter<BufWriter<File>>) -> anyhow::Result<()> {
    tracing::info!(bodies = scenario.system.body_count(), "starting 2D viewer");

    writer.write_header(&scenario.system)?;
    writer.log_state(scenario.t, &scenario.system)?;

    App::new()
        .insert_resource(ViewerRun { scenario, writer })
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "N-Body Simulator".into(),
                resolution: (WINDOW_SIZE, WINDOW_SIZE).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        .add_systems(Startup, setup_bodies_system)
        .add_systems(Update, (physics_step_system, sync_transforms_system).chain())
        .run();

    Ok(())
}

/// Red, green, blue for the first three bodies, then golden-angle hues
fn body_color(i: usize) -> Color {
    match i {
        0 => Color::RED,
        1 => Color::GREEN,
        2 => Color::BLUE,
        _ => Color::hsl((i as f32 * 137.508) % 360.0, 0.7, 0.6),
    }
}

fn setup_bodies_system(mut commands: Commands, run: Res<ViewerRun>, mut meshes: ResMut<Assets<Mesh>>, mut materials: ResMut<Assets<ColorMaterial>>) {
    // 2D camera, simulation origin at the window center, y up
    commands.spawn(Camera2dBundle::default());

    let marker = Mesh2dHandle(meshes.add(Circle::new(MARKER_RADIUS)));

    for (i, body) in run.scenario.system.bodies().iter().enumerate() {
        let x = body.x.x as f32 * SCALE;
        let y = body.x.y as f32 * SCALE;

        commands.spawn((
            MaterialMesh2dBundle {
                mesh: marker.clone(),
                material: materials.add(ColorMaterial::from(body_color(i))),
                transform: Transform::from_xyz(x, y, 0.0),
                ..Default::default()
            },
            BodyIndex(i),
        ));
    }
}

fn physics_step_system(mut run: ResMut<ViewerRun>, mut exit: EventWriter<AppExit>) {
    let ViewerRun { scenario, writer } = &mut *run;

    if scenario.finished() {
        return;
    }

    scenario.advance();

    let logged = if scenario.sample_due() {
        writer.log_state(scenario.t, &scenario.system)
    } else {
        Ok(())
    };
    if let Err(e) = logged {
        tracing::error!(error = %e, "trajectory write failed");
        exit.send(AppExit);
        return;
    }

    if scenario.finished() {
        if let Err(e) = writer.flush() {
            tracing::error!(error = %e, "trajectory flush failed");
        }
        tracing::info!(
            steps = scenario.step,
            t = scenario.t,
            energy = scenario.system.total_energy(),
            "run finished"
        );
        exit.send(AppExit);
    }
}

fn sync_transforms_system(run: Res<ViewerRun>, mut query: Query<(&BodyIndex, &mut Transform)>) {
    let bodies = run.scenario.system.bodies();
    for (BodyIndex(i), mut transform) in &mut query {
        if let Some(b) = bodies.get(*i) {
            transform.translation.x = (b.x.x as f32) * SCALE;
            transform.translation.y = (b.x.y as f32) * SCALE;
        }
    }
}
