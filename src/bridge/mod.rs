//! Event bridge – broker messages in, scene actions out.
//!
//! [`translate`] is the whole of the bridge's logic and has no transport
//! dependency.  The `mqtt` submodule (feature `bridge`) runs it on a
//! dedicated thread against a live broker.
//!
//! ## Translation
//!
//! | Topic                      | Body                       | Action                       |
//! |----------------------------|----------------------------|------------------------------|
//! | `elevator/<id>/position`   | `{"floor": <label>}`       | `ElevatorPositionUpdate`     |
//! | `elevator/<id>/door`       | `{"status": <door>}`       | `ElevatorDoorUpdate`         |
//! | `elevator/<id>/passengers` | `{"passengers": [..]}`     | `ElevatorPassengersUpdate`   |
//!
//! Anything else is a [`PayloadError`] and never reaches the scene.

#[cfg(feature = "bridge")]
pub mod mqtt;

#[cfg(feature = "bridge")]
pub use mqtt::{spawn, BridgeConfig, BridgeEvent, BridgeHandle, BridgeStats};

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::action::Action;
use crate::error::PayloadError;
use crate::protocol::{parse_topic, DoorMsg, PassengersMsg, TopicKind};
use crate::scene::FloorMap;

/// Turn one broker message into a scene action.
///
/// `floors` is the scene's floor → pixel mapping (see [`crate::Scene::floor_map`]).
pub fn translate(topic: &str, payload: &[u8], floors: &FloorMap) -> Result<Action, PayloadError> {
    let t = parse_topic(topic)?;
    let id = t.id.to_string();

    let action = match t.kind {
        TopicKind::Position => {
            // Unknown labels must surface as UnknownFloor, not as a JSON error.
            #[derive(Deserialize)]
            struct RawPosition {
                floor: String,
            }
            let body: RawPosition = parse_body(topic, payload)?;
            Action::ElevatorPositionUpdate {
                id,
                target_y: floors.resolve(&body.floor)?,
            }
        }
        TopicKind::Door => {
            let body: DoorMsg = parse_body(topic, payload)?;
            Action::ElevatorDoorUpdate {
                id,
                status: body.status,
            }
        }
        TopicKind::Passengers => {
            let body: PassengersMsg = parse_body(topic, payload)?;
            Action::ElevatorPassengersUpdate {
                id,
                passengers: body.passengers,
            }
        }
    };

    Ok(action)
}

fn parse_body<T: DeserializeOwned>(topic: &str, payload: &[u8]) -> Result<T, PayloadError> {
    serde_json::from_slice(payload).map_err(|source| PayloadError::Json {
        topic: topic.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::DoorStatus;

    #[test]
    fn position_message_becomes_target_update() {
        let a = translate(
            "elevator/Korinthisch/position",
            br#"{"floor":"Second"}"#,
            &FloorMap::default(),
        )
        .unwrap();
        assert_eq!(
            a,
            Action::ElevatorPositionUpdate {
                id: "Korinthisch".into(),
                target_y: 300.0
            }
        );
    }

    #[test]
    fn unknown_floor_is_rejected() {
        let err = translate(
            "elevator/A/position",
            br#"{"floor":"Basement"}"#,
            &FloorMap::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PayloadError::UnknownFloor { label } if label == "Basement"));
    }

    #[test]
    fn missing_floor_or_garbage_body_is_json_error() {
        let floors = FloorMap::default();
        for body in [&b"{}"[..], &b"not json"[..], &br#"{"floor":3}"#[..]] {
            let err = translate("elevator/A/position", body, &floors).unwrap_err();
            assert!(matches!(err, PayloadError::Json { .. }), "{:?}", err);
        }
    }

    #[test]
    fn door_and_passenger_messages() {
        let floors = FloorMap::default();
        assert_eq!(
            translate("elevator/A/door", br#"{"status":"Closing"}"#, &floors).unwrap(),
            Action::ElevatorDoorUpdate {
                id: "A".into(),
                status: DoorStatus::Closing
            }
        );
        assert_eq!(
            translate(
                "elevator/A/passengers",
                br#"{"passengers":["Student_1"]}"#,
                &floors
            )
            .unwrap(),
            Action::ElevatorPassengersUpdate {
                id: "A".into(),
                passengers: vec!["Student_1".into()]
            }
        );
    }

    #[test]
    fn bad_topic_is_rejected_before_body() {
        let err = translate("person/introduce", b"{}", &FloorMap::default()).unwrap_err();
        assert!(matches!(err, PayloadError::Topic { .. }));
    }
}
