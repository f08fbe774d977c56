mod camera;
mod car;
mod game_logic;
mod hud;

use bevy::{prelude::*, window::PresentMode};

use camera::{camera_setup, move_camera};
use car::{detect_wreck, drive_car, handle_restart, sample_input, spawn_car};
use game_logic::{build_track, load_track_from_file, sync_cone_visuals, DriveInput, RaceStats};
use hud::{clear_wrecked_banner, setup_hud, show_wrecked_banner, update_hud};

#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    #[default]
    Driving,
    Wrecked,
}

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Ramp Racers".into(),
                resolution: (1280., 720.).into(),
                present_mode: PresentMode::AutoVsync,
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.35, 0.55, 0.3)))
        .insert_resource(load_track())
        .insert_resource(RaceStats::new(0.0))
        .init_resource::<DriveInput>()
        .init_state::<GamePhase>()
        .add_systems(Startup, (camera_setup, spawn_car, game_logic::spawn_track, setup_hud))
        .add_systems(
            Update,
            (
                (sample_input, drive_car, detect_wreck)
                    .chain()
                    .run_if(in_state(GamePhase::Driving)),
                handle_restart.run_if(in_state(GamePhase::Wrecked)),
                move_camera.after(drive_car),
                sync_cone_visuals,
                update_hud,
            ),
        )
        .add_systems(OnEnter(GamePhase::Wrecked), show_wrecked_banner)
        .add_systems(OnExit(GamePhase::Wrecked), clear_wrecked_banner)
        .run();
}

// Track layout comes from the asset file when present, otherwise the
// built-in circuit
fn load_track() -> game_logic::ObstacleField {
    match load_track_from_file("assets/track.json") {
        Ok(field) => field,
        Err(e) => {
            eprintln!("{e}; using the built-in circuit");
            build_track()
        }
    }
}
