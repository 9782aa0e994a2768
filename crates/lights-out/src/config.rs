use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use lights_core::BoardLayout;
use lights_engine::window::RuntimeConfig;
use winit::dpi::LogicalSize;

pub const SEED_VAR: &str = "LIGHTS_OUT_SEED";
pub const REJECT_SOLVED_VAR: &str = "LIGHTS_OUT_REJECT_SOLVED";
pub const FONT_VAR: &str = "LIGHTS_OUT_FONT";

/// Game settings. Defaults reproduce the classic 700x700 board.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub title: String,
    pub width: f64,
    pub height: f64,
    pub resizable: bool,
    pub layout: BoardLayout,
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Re-roll a start board that is already all off.
    pub reject_solved: bool,
    /// Tried before the system font candidates.
    pub font_path: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Lights Out!".to_string(),
            width: 700.0,
            height: 700.0,
            resizable: false,
            layout: BoardLayout::default(),
            seed: None,
            reject_solved: false,
            font_path: None,
        }
    }
}

impl GameConfig {
    /// Defaults overridden by the `LIGHTS_OUT_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`GameConfig::from_env`] but reads variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = non_empty(lookup(SEED_VAR)) {
            config.seed = Some(parse_var::<u64>(SEED_VAR, &raw)?);
        }
        if let Some(raw) = non_empty(lookup(REJECT_SOLVED_VAR)) {
            config.reject_solved = parse_flag(&raw).with_context(|| format!("invalid {REJECT_SOLVED_VAR}"))?;
        }
        if let Some(raw) = non_empty(lookup(FONT_VAR)) {
            config.font_path = Some(PathBuf::from(raw));
        }

        Ok(config)
    }

    pub fn runtime(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            size: LogicalSize::new(self.width, self.height),
            resizable: self.resizable,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T>(name: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse::<T>()
        .with_context(|| format!("invalid {name}: {raw:?}"))
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got {other:?}"),
    }
}
