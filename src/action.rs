//! Scene actions – the only way state changes reach the scene.
//!
//! Actions are produced by the bridge, queued on the [`Scene`](crate::scene::Scene)
//! and consumed exactly once during the next tick's drain.

use std::collections::VecDeque;

use crate::protocol::DoorStatus;

/// A single typed state change addressed to one elevator.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Move the elevator's car towards `target_y` (canvas pixels).
    ElevatorPositionUpdate { id: String, target_y: f32 },
    ElevatorDoorUpdate { id: String, status: DoorStatus },
    ElevatorPassengersUpdate { id: String, passengers: Vec<String> },
}

impl Action {
    /// Identity of the elevator this action is routed to.
    pub fn elevator_id(&self) -> &str {
        match self {
            Action::ElevatorPositionUpdate { id, .. }
            | Action::ElevatorDoorUpdate { id, .. }
            | Action::ElevatorPassengersUpdate { id, .. } => id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Action::ElevatorPositionUpdate { .. } => "ELEVATOR_POSITION_UPDATE",
            Action::ElevatorDoorUpdate { .. } => "ELEVATOR_DOOR_UPDATE",
            Action::ElevatorPassengersUpdate { .. } => "ELEVATOR_PASSENGERS_UPDATE",
        }
    }
}

/// Append-only view of the pending queue handed to a dispatch hook.
///
/// Anything pushed here lands behind the drain boundary of the current
/// tick and is processed on the next one.
pub struct ActionSink<'a> {
    queue: &'a mut VecDeque<Action>,
}

impl<'a> ActionSink<'a> {
    pub(crate) fn new(queue: &'a mut VecDeque<Action>) -> Self {
        Self { queue }
    }

    pub fn push(&mut self, action: Action) {
        self.queue.push_back(action);
    }
}
