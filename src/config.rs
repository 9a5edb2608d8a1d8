//! # Scenario configuration
//!
//! A scenario describes the jobs to seed a [`Simulator`] with. It is read
//! from TOML:
//!
//! ```toml
//! [logging]
//! level = "debug"
//!
//! [[jobs]]
//! name = "a"
//! start = 1
//! delays = [8]
//!
//! [[jobs]]
//! start = 3
//! delays = [2, 9]
//! ```
//!
//! Each job becomes one [`Worker`] whose load is a [`DelayedAction`] per
//! entry in `delays`, posted at `start`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::event::Event;
use crate::payload::Payload;
use crate::simulation::Simulator;
use crate::worker::{Action, DelayedAction, Worker};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Top-level scenario file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub jobs: Vec<JobConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default filter directive, used when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

/// One job: when it enters the system and how long each stage takes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct JobConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub start: u64,
    #[serde(default)]
    pub delays: Vec<u64>,
}

impl JobConfig {
    pub fn worker(&self) -> Worker {
        let load = self
            .delays
            .iter()
            .map(|&delay| Action::from(DelayedAction::new(delay)));
        match &self.name {
            Some(name) => Worker::named(name.clone(), load),
            None => Worker::new(load),
        }
    }
}

impl ScenarioConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// A simulator with one worker event posted per job.
    pub fn build_simulator(&self) -> Simulator {
        let mut sim = Simulator::new();
        for job in &self.jobs {
            sim.post(Event::at(job.start, Payload::Worker(job.worker())));
        }
        sim
    }
}

/// Load a scenario from a TOML file.
pub fn load_config(path: impl AsRef<Path>) -> Result<ScenarioConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    ScenarioConfig::from_toml_str(&content)
}
