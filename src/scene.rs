//! Scene – owns every entity and the inbound action queue.
//!
//! ## Frame
//!
//! ```text
//! render_frame(canvas)
//!   ├── clear background
//!   ├── layout_and_draw  ← slots from registration order, elevators then floors
//!   └── tick
//!         ├── drain pending actions (only those queued before the drain)
//!         ├── update elevators (cars step toward their targets)
//!         └── update floors    (no-op)
//! ```
//!
//! The scene is plain owned data.  Whoever runs the render loop owns it and
//! feeds it through [`Scene::enqueue_action`]; nothing else holds a reference.

use log::{debug, warn};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};

use crate::action::{Action, ActionSink};
use crate::canvas::Canvas;
use crate::entity::{ElevatorEntity, FloorEntity, Stage};
use crate::error::{PayloadError, RoutingError};
use crate::types::{FloorLabel, Layout, Rgb, SceneStats};

const BACKGROUND: Rgb = Rgb::gray(250);

// ---------------------------------------------------------------------------
// Floor → pixel mapping
// ---------------------------------------------------------------------------

/// Target car y for each floor.  Smaller y is higher on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorMap {
    ground: f32,
    first: f32,
    second: f32,
    third: f32,
}

impl FloorMap {
    pub fn pixel_for(&self, floor: FloorLabel) -> f32 {
        match floor {
            FloorLabel::Ground => self.ground,
            FloorLabel::First => self.first,
            FloorLabel::Second => self.second,
            FloorLabel::Third => self.third,
        }
    }

    /// Resolve a wire label such as `"Second"`.
    pub fn resolve(&self, label: &str) -> Result<f32, PayloadError> {
        Ok(self.pixel_for(label.parse()?))
    }
}

impl Default for FloorMap {
    fn default() -> Self {
        Self {
            ground: 700.0,
            first: 500.0,
            second: 300.0,
            third: 100.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Tick result
// ---------------------------------------------------------------------------

/// What a single [`Scene::tick`] did with the queue.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// The tick counter that produced this report.
    pub tick: u64,
    /// Actions that reached an elevator.
    pub dispatched: usize,
    /// Actions dropped because their elevator is not registered.
    pub unroutable: Vec<RoutingError>,
}

/// Called after every drained action.  Anything pushed into the sink waits
/// for the next tick.
pub type DispatchHook = Box<dyn FnMut(&Action, &mut ActionSink<'_>) + Send>;

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

pub struct Scene {
    layout: Layout,
    floor_map: FloorMap,
    elevators: Vec<ElevatorEntity>,
    /// identity → index of the first elevator registered under it.
    routes: HashMap<String, usize>,
    floors: Vec<FloorEntity>,
    pending: VecDeque<Action>,
    dispatch_hook: Option<DispatchHook>,
    tick_count: u64,
    dispatched_total: u64,
    unroutable_total: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_layout(Layout::default())
    }

    pub fn with_layout(layout: Layout) -> Self {
        Self {
            layout,
            floor_map: FloorMap::default(),
            elevators: Vec::new(),
            routes: HashMap::new(),
            floors: Vec::new(),
            pending: VecDeque::new(),
            dispatch_hook: None,
            tick_count: 0,
            dispatched_total: 0,
            unroutable_total: 0,
        }
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    /// Append an elevator.  Registration order decides its column.
    ///
    /// A second elevator with an identity that is already taken is drawn
    /// and updated like any other, but actions keep going to the first one.
    pub fn register_elevator(&mut self, elevator: ElevatorEntity) {
        let index = self.elevators.len();
        match self.routes.entry(elevator.name().to_string()) {
            Entry::Vacant(v) => {
                v.insert(index);
            }
            Entry::Occupied(_) => {
                warn!(
                    "Elevator '{}' registered twice; actions route to the first one",
                    elevator.name()
                );
            }
        }
        self.elevators.push(elevator);
    }

    /// Append a floor.  The last registered floor is drawn at the top.
    pub fn register_floor(&mut self, floor: FloorEntity) {
        self.floors.push(floor);
    }

    // -----------------------------------------------------------------------
    // Bridge surface
    // -----------------------------------------------------------------------

    pub fn enqueue_action(&mut self, action: Action) {
        self.pending.push_back(action);
    }

    pub fn floor_map(&self) -> &FloorMap {
        &self.floor_map
    }

    pub fn set_dispatch_hook(
        &mut self,
        hook: impl FnMut(&Action, &mut ActionSink<'_>) + Send + 'static,
    ) {
        self.dispatch_hook = Some(Box::new(hook));
    }

    // -----------------------------------------------------------------------
    // Frame
    // -----------------------------------------------------------------------

    /// Draw the current state, then advance one tick.
    pub fn render_frame(&mut self, canvas: &mut dyn Canvas) -> TickReport {
        canvas.clear(BACKGROUND);
        self.layout_and_draw(canvas);
        self.tick()
    }

    /// Drain the queue as it stood when the tick began, then update every
    /// elevator and floor.
    pub fn tick(&mut self) -> TickReport {
        self.tick_count += 1;

        let mut report = TickReport {
            tick: self.tick_count,
            ..Default::default()
        };

        let boundary = self.pending.len();
        for _ in 0..boundary {
            let Some(action) = self.pending.pop_front() else {
                break;
            };

            match self.dispatch(&action) {
                Ok(()) => report.dispatched += 1,
                Err(e) => report.unroutable.push(e),
            }

            if let Some(hook) = self.dispatch_hook.as_mut() {
                hook(&action, &mut ActionSink::new(&mut self.pending));
            }
        }

        self.dispatched_total += report.dispatched as u64;
        self.unroutable_total += report.unroutable.len() as u64;

        for e in &mut self.elevators {
            e.update();
        }
        for f in &mut self.floors {
            f.update();
        }

        report
    }

    /// Assign slots from registration order, then draw elevators followed
    /// by floors.
    pub fn layout_and_draw(&mut self, canvas: &mut dyn Canvas) {
        self.layout();

        for e in &self.elevators {
            e.draw(canvas, &self.layout);
        }
        for f in &self.floors {
            f.draw(canvas, &self.layout);
        }
    }

    /// Columns left to right in registration order; floor rows top to
    /// bottom in reverse registration order.
    pub fn layout(&mut self) {
        let l = &self.layout;

        let mut x = l.elevator_base_offset;
        for e in &mut self.elevators {
            e.set_slot(x, l);
            x += l.column_width;
        }

        let mut y = l.floor_top_offset;
        for f in self.floors.iter_mut().rev() {
            f.set_slot(y);
            y += l.row_height;
        }
    }

    fn dispatch(&mut self, action: &Action) -> Result<(), RoutingError> {
        debug!("Dispatching {} for '{}'", action.kind(), action.elevator_id());

        let Some(&index) = self.routes.get(action.elevator_id()) else {
            warn!(
                "Dropping {}: no elevator named '{}'",
                action.kind(),
                action.elevator_id()
            );
            return Err(RoutingError::UnknownElevator {
                id: action.elevator_id().to_string(),
            });
        };

        let elevator = &mut self.elevators[index];
        match action {
            Action::ElevatorPositionUpdate { target_y, .. } => elevator.set_target(*target_y),
            Action::ElevatorDoorUpdate { status, .. } => elevator.set_door(*status),
            Action::ElevatorPassengersUpdate { passengers, .. } => {
                elevator.set_passengers(passengers.clone())
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn layout_config(&self) -> &Layout {
        &self.layout
    }

    pub fn elevators(&self) -> &[ElevatorEntity] {
        &self.elevators
    }

    /// The elevator actions for `id` are routed to.
    pub fn elevator(&self, id: &str) -> Option<&ElevatorEntity> {
        self.routes.get(id).map(|&i| &self.elevators[i])
    }

    pub fn floors(&self) -> &[FloorEntity] {
        &self.floors
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn stats(&self) -> SceneStats {
        SceneStats {
            elevators: self.elevators.len(),
            floors: self.floors.len(),
            pending_actions: self.pending.len(),
            total_ticks: self.tick_count,
            dispatched_actions: self.dispatched_total,
            unroutable_actions: self.unroutable_total,
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
