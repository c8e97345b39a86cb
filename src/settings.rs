//! Scene settings – which elevators and floors exist and how fast things run.
//!
//! Loaded through the `config` crate, later sources overriding earlier ones:
//!
//! 1. built-in defaults (the three elevators of the reference building)
//! 2. an optional TOML file
//! 3. `SCENE_*` environment variables (lists comma-separated)
//!
//! ```toml
//! elevators = ["Dorisch", "Ionisch", "Korinthisch"]
//! floors = ["Ground", "First", "Second", "Third"]
//! speed = 10.0
//! tick_rate_hz = 60.0
//! ```

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::entity::motion::DEFAULT_Y;
use crate::entity::{ElevatorEntity, FloorEntity, MotionEntity};
use crate::error::SettingsError;
use crate::scene::Scene;
use crate::types::{FloorLabel, Layout, Vec2};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    /// Elevator identities, left to right.
    pub elevators: Vec<String>,
    /// Floors, bottom to top.
    pub floors: Vec<FloorLabel>,
    /// Car speed in pixels per tick.
    pub speed: f32,
    pub tick_rate_hz: f32,
    /// Bridge → render loop buffer depth.
    pub event_buffer: usize,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            elevators: vec!["Dorisch".into(), "Ionisch".into(), "Korinthisch".into()],
            floors: FloorLabel::ALL.to_vec(),
            speed: 10.0,
            tick_rate_hz: 60.0,
            event_buffer: 1024,
        }
    }
}

impl SceneSettings {
    /// Load and validate settings from defaults, `file` and the environment.
    pub fn load(file: Option<&Path>) -> Result<Self, SettingsError> {
        let mut builder = Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix("SCENE")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("elevators")
                .with_list_parse_key("floors"),
        );

        let settings: SceneSettings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(SettingsError::InvalidSpeed(self.speed));
        }
        self.frame_interval()?;
        if self.event_buffer == 0 {
            return Err(SettingsError::ZeroEventBuffer);
        }
        if self.elevators.is_empty() {
            return Err(SettingsError::NoElevators);
        }
        Ok(())
    }

    /// Time between frames; must be finite and at least one nanosecond.
    pub fn frame_interval(&self) -> Result<Duration, SettingsError> {
        let rate = self.tick_rate_hz;
        if !rate.is_finite() || rate <= 0.0 {
            return Err(SettingsError::InvalidTickRate(rate));
        }
        match Duration::try_from_secs_f32(1.0 / rate) {
            Ok(interval) if !interval.is_zero() => Ok(interval),
            _ => Err(SettingsError::InvalidTickRate(rate)),
        }
    }

    /// Construct the scene these settings describe.
    pub fn build_scene(&self) -> Result<Scene, SettingsError> {
        let layout = Layout::default();
        let car = layout.car;
        let mut scene = Scene::with_layout(layout);

        for name in &self.elevators {
            let motion = MotionEntity::new(Vec2::new(0.0, DEFAULT_Y), car, self.speed)?;
            scene.register_elevator(ElevatorEntity::with_motion(name.clone(), motion));
        }
        for &floor in &self.floors {
            scene.register_floor(FloorEntity::new(floor));
        }

        Ok(scene)
    }
}
