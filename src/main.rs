mod combat;
mod core;
#[cfg(feature = "dev-tools")]
mod debug;
mod enemies;
mod fsm;
mod hero;
mod level;
mod physics;
mod sound;

use bevy::prelude::*;

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Skyforge".to_string(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(ClearColor(Color::srgb(0.08, 0.08, 0.12)))
    .add_plugins((
        core::CorePlugin,
        level::LevelPlugin,
        hero::HeroPlugin,
        enemies::EnemiesPlugin,
        combat::CombatPlugin,
        sound::SoundPlugin,
    ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(debug::DebugPlugin);

    app.run();
}
