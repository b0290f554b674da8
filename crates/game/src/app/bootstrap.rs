use engine::LoopConfig;
use kingdom_quest::{ConfigError, GameConfig, GameState, ZoneError};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::scene::RpgScene;

#[derive(Debug, Error)]
pub(crate) enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build starting zone: {0}")]
    Zone(#[from] ZoneError),
}

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: RpgScene,
}

pub(crate) fn build_app() -> Result<AppWiring, BootstrapError> {
    init_tracing();
    info!("=== Kingdom Quest Startup ===");

    let game_config = GameConfig::from_env()?;
    let config = loop_config(&game_config);
    let state = GameState::new(game_config)?;
    info!(seed = state.seed(), "world_seeded");

    Ok(AppWiring {
        config,
        scene: RpgScene::new(state),
    })
}

fn loop_config(game: &GameConfig) -> LoopConfig {
    LoopConfig {
        window_title: game.window.title.clone(),
        window_width: game.viewport.width,
        window_height: game.viewport.height,
        max_frame_delta: game.window.max_frame_delta(),
        metrics_log_interval: game.window.metrics_log_interval(),
        max_render_fps: game.window.max_render_fps,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loop_config_follows_window_settings() {
        let mut game = GameConfig::default();
        game.viewport.width = 1024;
        game.window.max_render_fps = None;

        let config = loop_config(&game);

        assert_eq!(config.window_title, "Kingdom Quest");
        assert_eq!(config.window_width, 1024);
        assert_eq!(config.window_height, 600);
        assert_eq!(config.max_render_fps, None);
        assert_eq!(config.max_frame_delta.as_millis(), 100);
    }
}
