use bevy::prelude::*;

use crate::game_logic::{CarMotion, PlayerControlled, RaceStats};

#[derive(Component)]
pub struct StatusText;

#[derive(Component)]
pub struct JumpText;

#[derive(Component)]
pub struct WreckedBanner;

pub fn setup_hud(mut commands: Commands) {
    commands.spawn((
        StatusText,
        Text::new(""),
        TextFont {
            font_size: 22.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(8.0),
            left: Val::Px(12.0),
            ..default()
        },
    ));

    commands.spawn((
        JumpText,
        Text::new(""),
        TextFont {
            font_size: 30.0,
            ..default()
        },
        TextColor(Color::srgb(1.0, 0.85, 0.2)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(60.0),
            left: Val::Px(12.0),
            ..default()
        },
    ));
}

fn format_lap_time(ms: u32) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;
    let millis = ms % 1000;
    format!("{minutes}:{seconds:02}.{millis:03}")
}

pub fn update_hud(
    time: Res<Time>,
    mut stats: ResMut<RaceStats>,
    motion: Single<&CarMotion, With<PlayerControlled>>,
    mut status: Single<&mut Text, (With<StatusText>, Without<JumpText>)>,
    mut jump: Single<&mut Text, (With<JumpText>, Without<StatusText>)>,
    mut jump_flash: Local<f32>,
) {
    let now_ms = time.elapsed_secs_f64() * 1000.0;
    let best = match stats.best_lap_ms() {
        Some(ms) => format_lap_time(ms),
        None => "--:--.---".to_string(),
    };
    status.0 = format!(
        "Lap {}   Time {}   Best {}   Score {}   {:.0} u/s",
        stats.lap(),
        format_lap_time(stats.current_lap_elapsed_ms(now_ms)),
        best,
        stats.score(),
        motion.speed.abs(),
    );

    // One-shot jump award, flashed briefly
    if let Some(points) = stats.take_jump_points() {
        jump.0 = format!("Jump +{points}");
        *jump_flash = 2.0;
    }
    if *jump_flash > 0.0 {
        *jump_flash -= time.delta_secs();
        if *jump_flash <= 0.0 {
            jump.0.clear();
        }
    }
}

pub fn show_wrecked_banner(mut commands: Commands) {
    commands.spawn((
        WreckedBanner,
        Text::new("WRECKED - press R to restart"),
        TextFont {
            font_size: 40.0,
            ..default()
        },
        TextColor(Color::srgb(1.0, 0.25, 0.2)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Percent(40.0),
            left: Val::Percent(25.0),
            ..default()
        },
    ));
}

pub fn clear_wrecked_banner(mut commands: Commands, banners: Query<Entity, With<WreckedBanner>>) {
    for entity in banners.iter() {
        commands.entity(entity).despawn();
    }
}
