use anyhow::{Context, Result};
use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;
use std::env;

pub type Number = f32;

pub const EPSILON: f32 = 1e-6;

/// Default result cap for the diet ranker.
pub const DEFAULT_DIET_LIMIT: usize = 50;
/// Default result cap for the meditation matcher.
pub const DEFAULT_MEDITATION_TOP_K: usize = 5;

#[derive(Deserialize)]
pub struct WellkitConfig {
    pub exercise_path: Option<String>,
    pub diet_path: Option<String>,
    pub meditation_path: Option<String>,
    pub diet_limit: Option<usize>,
    pub meditation_top_k: Option<usize>,
}

impl WellkitConfig {
    pub fn try_from(config: &Config) -> Result<Self, ConfigError> {
        Ok(WellkitConfig {
            exercise_path: config.get("exercise_path").ok(),
            diet_path: config.get("diet_path").ok(),
            meditation_path: config.get("meditation_path").ok(),
            diet_limit: config.get("diet_limit").ok(),
            meditation_top_k: config.get("meditation_top_k").ok(),
        })
    }
}

/// Resolved, immutable runtime settings. Built once in `main` and passed by
/// reference everywhere else.
pub struct State {
    pub exercise_path: String,
    pub diet_path: String,
    pub meditation_path: String,
    pub diet_limit: usize,
    pub meditation_top_k: usize,
}

impl State {
    pub fn new() -> Result<Self> {
        let mut config = Config::default();
        #[allow(deprecated)]
        {
            config.merge(ConfigFile::with_name("wellkit_config").required(false))?;
            config.merge(Environment::with_prefix("WELLKIT"))?;
        }

        let wellkit_config = WellkitConfig::try_from(&config)?;

        let exercise_path = wellkit_config
            .exercise_path
            .or_else(|| env::var("WELLKIT_EXERCISE_PATH").ok())
            .context("WELLKIT_EXERCISE_PATH not set in config or environment")?;

        let diet_path = wellkit_config
            .diet_path
            .or_else(|| env::var("WELLKIT_DIET_PATH").ok())
            .context("WELLKIT_DIET_PATH not set in config or environment")?;

        let meditation_path = wellkit_config
            .meditation_path
            .or_else(|| env::var("WELLKIT_MEDITATION_PATH").ok())
            .context("WELLKIT_MEDITATION_PATH not set in config or environment")?;

        let diet_limit = wellkit_config
            .diet_limit
            .or_else(|| env::var("WELLKIT_DIET_LIMIT").ok().and_then(|s| s.parse().ok()))
            .unwrap_or(DEFAULT_DIET_LIMIT);

        let meditation_top_k = wellkit_config
            .meditation_top_k
            .or_else(|| {
                env::var("WELLKIT_MEDITATION_TOP_K")
                    .ok()
                    .and_then(|s| s.parse().ok())
            })
            .unwrap_or(DEFAULT_MEDITATION_TOP_K);

        if diet_limit == 0 {
            anyhow::bail!("WELLKIT_DIET_LIMIT must be at least 1.");
        }
        if meditation_top_k == 0 {
            anyhow::bail!("WELLKIT_MEDITATION_TOP_K must be at least 1.");
        }

        Ok(Self {
            exercise_path,
            diet_path,
            meditation_path,
            diet_limit,
            meditation_top_k,
        })
    }

    pub fn print_config(&self) {
        println!("exercise_path={}", self.exercise_path);
        println!("diet_path={}", self.diet_path);
        println!("meditation_path={}", self.meditation_path);
        println!("diet_limit={}", self.diet_limit);
        println!("meditation_top_k={}", self.meditation_top_k);
    }
}

pub fn verbose_print(message: &str) {
    if env::var("WELLKIT_VERBOSE").unwrap_or_else(|_| "false".to_string()) == "true" {
        eprintln!("{}", message);
    }
}
