mod app;
mod config;
mod fonts;
mod screens;

use anyhow::{Context, Result};
use lights_core::{PuzzleGenerator, Session};
use lights_engine::device::GpuInit;
use lights_engine::logging::{LoggingConfig, init_logging};
use lights_engine::text::FontSystem;
use lights_engine::window::Runtime;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::app::LightsOutApp;
use crate::config::GameConfig;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = GameConfig::from_env().context("failed to read game configuration")?;

    let mut rng = match config.seed {
        Some(seed) => {
            log::info!("board seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };

    let generator = PuzzleGenerator::new().allow_solved(!config.reject_solved);
    let session = Session::generate(&generator, config.layout, &mut rng);
    log::info!("new board with {} light(s) on", session.grid().lit_count());

    let mut font_system = FontSystem::new();
    let font = fonts::load(&mut font_system, config.font_path.as_deref());

    let app = LightsOutApp::new(session, font_system, font);
    Runtime::run(config.runtime(), GpuInit::default(), app)
}
