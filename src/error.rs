//! Error types for message translation, routing, motion and settings.
//!
//! None of these are fatal: the bridge logs and drops a [`PayloadError`],
//! the scene counts and logs a [`RoutingError`], and the render loop keeps
//! going either way.

use thiserror::Error;

/// An inbound message that cannot become an [`Action`](crate::action::Action).
///
/// Rejected in the bridge, before anything reaches the scene queue.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("topic '{topic}' is not of the form elevator/<id>/<kind>")]
    Topic { topic: String },

    #[error("topic '{topic}' carries unsupported message kind '{kind}'")]
    UnknownKind { topic: String, kind: String },

    #[error("invalid JSON body on '{topic}': {source}")]
    Json {
        topic: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown floor label '{label}'")]
    UnknownFloor { label: String },
}

/// An action addressed to an elevator the scene does not know.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoutingError {
    #[error("no elevator registered with identity '{id}'")]
    UnknownElevator { id: String },
}

/// A car that cannot move.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MotionError {
    #[error("motion speed must be finite and positive, got {0}")]
    InvalidSpeed(f32),
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("motion speed must be finite and positive, got {0}")]
    InvalidSpeed(f32),

    #[error("tick rate {0} Hz does not give a usable frame interval")]
    InvalidTickRate(f32),

    #[error("event buffer must hold at least one event")]
    ZeroEventBuffer,

    #[error("at least one elevator must be configured")]
    NoElevators,

    #[error(transparent)]
    Motion(#[from] MotionError),

    #[cfg(feature = "bridge")]
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),
}
