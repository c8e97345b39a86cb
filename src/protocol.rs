//! `elevator/*` wire protocol.
//!
//! This module owns **every message that crosses the broker boundary**
//! between the elevator backend and the scene.
//!
//! ## Topics
//!
//! | Topic                         | Body                                   |
//! |-------------------------------|----------------------------------------|
//! | `elevator/<id>/position`      | [`PositionMsg`] `{"floor": "First"}`   |
//! | `elevator/<id>/door`          | [`DoorMsg`] `{"status": "Open"}`       |
//! | `elevator/<id>/passengers`    | [`PassengersMsg`] `{"passengers": []}` |
//!
//! `<id>` is the elevator identity the scene routes on.  Bodies may carry
//! extra fields; only the ones below are read.

use serde::{Deserialize, Serialize};

use crate::error::PayloadError;
use crate::types::FloorLabel;

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// The elevator is now at `floor`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionMsg {
    pub floor: FloorLabel,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum DoorStatus {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoorMsg {
    pub status: DoorStatus,
}

/// Names of everyone currently riding the elevator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassengersMsg {
    pub passengers: Vec<String>,
}

// ---------------------------------------------------------------------------
// Topic parsing
// ---------------------------------------------------------------------------

/// Message kind carried in the third topic segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicKind {
    Position,
    Door,
    Passengers,
}

/// A parsed `elevator/<id>/<kind>` topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElevatorTopic<'a> {
    pub id: &'a str,
    pub kind: TopicKind,
}

/// Split an inbound topic into elevator identity and message kind.
pub fn parse_topic(topic: &str) -> Result<ElevatorTopic<'_>, PayloadError> {
    let mut parts = topic.split('/');
    let (Some(root), Some(id), Some(kind), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(PayloadError::Topic {
            topic: topic.to_string(),
        });
    };

    if root != topics::ROOT || id.is_empty() {
        return Err(PayloadError::Topic {
            topic: topic.to_string(),
        });
    }

    let kind = match kind {
        topics::POSITION => TopicKind::Position,
        topics::DOOR => TopicKind::Door,
        topics::PASSENGERS => TopicKind::Passengers,
        other => {
            return Err(PayloadError::UnknownKind {
                topic: topic.to_string(),
                kind: other.to_string(),
            })
        }
    };

    Ok(ElevatorTopic { id, kind })
}

/// Topic names and subscription filters, as constants.
pub mod topics {
    pub const ROOT: &str = "elevator";

    pub const POSITION: &str = "position";
    pub const DOOR: &str = "door";
    pub const PASSENGERS: &str = "passengers";

    pub const POSITION_FILTER: &str = "elevator/+/position";
    pub const DOOR_FILTER: &str = "elevator/+/door";
    pub const PASSENGERS_FILTER: &str = "elevator/+/passengers";
}
