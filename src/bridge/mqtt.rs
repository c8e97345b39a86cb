//! MQTT bridge – a Tokio thread subscribed to `elevator/*`, delivering actions.
//!
//! ## Threading model
//!
//! ```text
//! Render loop (owns Scene)        │  Bridge thread (Tokio, current-thread)
//! ─────────────────────────────── │ ─────────────────────────────────────
//! handle.poll()                   │ eventloop.poll()
//!   → scene.enqueue_action(a)     │   ConnAck  → subscribe topics
//! scene.render_frame(canvas)      │   Publish  → translate → tx.try_send
//! ```
//!
//! The bridge thread owns the broker connection and its runtime.  The render
//! loop never touches the connection; it only drains a `crossbeam_channel`
//! receiver between frames, so the scene is never shared.

use crossbeam_channel::{Receiver, Sender, TryRecvError, TrySendError};
use parking_lot::Mutex;
use rumqttc::{AsyncClient, Event, MqttOptions, Packet, QoS};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::translate;
use crate::action::Action;
use crate::protocol::topics;
use crate::scene::FloorMap;

/// Pause before polling again after a connection error.
const RECONNECT_DELAY: Duration = Duration::from_secs(1);

// ---------------------------------------------------------------------------
// Events (bridge thread → render loop)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum BridgeEvent {
    Connected { broker: String },
    Disconnected { reason: String },
    Action(Action),
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub host: String,
    pub port: u16,
    pub client_id: String,
    /// Subscription filters.
    pub topics: Vec<String>,
    /// How deep to buffer events before dropping (back-pressure).
    pub event_buffer: usize,
    pub keep_alive: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 1883,
            client_id: "elevator-scene".into(),
            topics: vec![
                topics::POSITION_FILTER.into(),
                topics::DOOR_FILTER.into(),
                topics::PASSENGERS_FILTER.into(),
            ],
            event_buffer: 1024,
            keep_alive: Duration::from_secs(5),
        }
    }
}

impl BridgeConfig {
    fn broker(&self) -> String {
        format!("mqtt://{}:{}", self.host, self.port)
    }
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BridgeStats {
    pub connected: bool,
    /// Publishes seen on subscribed topics.
    pub received: u64,
    /// Publishes rejected with a `PayloadError`.
    pub rejected: u64,
    /// Actions lost because the event channel was full.
    pub dropped: u64,
}

// ---------------------------------------------------------------------------
// Handle (given to the render loop)
// ---------------------------------------------------------------------------

pub struct BridgeHandle {
    events: Receiver<BridgeEvent>,
    stats: Arc<Mutex<BridgeStats>>,
    _thread: thread::JoinHandle<()>,
}

impl BridgeHandle {
    /// Drain all pending events without blocking.
    pub fn poll(&self) -> Vec<BridgeEvent> {
        let mut out = Vec::new();
        loop {
            match self.events.try_recv() {
                Ok(ev) => out.push(ev),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        out
    }

    pub fn stats(&self) -> BridgeStats {
        self.stats.lock().clone()
    }
}

// ---------------------------------------------------------------------------
// Spawning the bridge thread
// ---------------------------------------------------------------------------

/// Spawn the bridge thread and return a [`BridgeHandle`] for the render loop.
///
/// `floors` is a copy of the scene's floor → pixel mapping; the bridge needs
/// nothing else from the scene.
pub fn spawn(config: BridgeConfig, floors: FloorMap) -> std::io::Result<BridgeHandle> {
    let (event_tx, event_rx) = crossbeam_channel::bounded::<BridgeEvent>(config.event_buffer);
    let stats = Arc::new(Mutex::new(BridgeStats::default()));
    let thread_stats = stats.clone();

    let handle = thread::Builder::new()
        .name("elevator-scene-bridge".into())
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    log::error!("[bridge] Failed to create Tokio runtime: {}", e);
                    let _ = event_tx.try_send(BridgeEvent::Disconnected {
                        reason: format!("runtime: {}", e),
                    });
                    return;
                }
            };

            rt.block_on(run_bridge(config, floors, event_tx, thread_stats));
        })?;

    Ok(BridgeHandle {
        events: event_rx,
        stats,
        _thread: handle,
    })
}

// ---------------------------------------------------------------------------
// Async bridge implementation
// ---------------------------------------------------------------------------

async fn run_bridge(
    config: BridgeConfig,
    floors: FloorMap,
    event_tx: Sender<BridgeEvent>,
    stats: Arc<Mutex<BridgeStats>>,
) {
    let broker = config.broker();
    log::info!("[bridge] Connecting to {} as '{}'", broker, config.client_id);

    let mut options = MqttOptions::new(config.client_id.clone(), config.host.clone(), config.port);
    options.set_keep_alive(config.keep_alive);

    let (client, mut eventloop) = AsyncClient::new(options, 16);

    loop {
        match eventloop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(_))) => {
                log::info!("[bridge] Connected to {}", broker);
                stats.lock().connected = true;

                // Subscriptions do not survive a clean-session reconnect.
                for filter in &config.topics {
                    if let Err(e) = client.try_subscribe(filter.as_str(), QoS::AtLeastOnce) {
                        log::error!("[bridge] Subscribe to {} failed: {}", filter, e);
                    }
                }

                let connected = BridgeEvent::Connected {
                    broker: broker.clone(),
                };
                if deliver(&event_tx, connected, &stats).is_err() {
                    break;
                }
            }

            Ok(Event::Incoming(Packet::Publish(publish))) => {
                if forward_publish(&publish.topic, &publish.payload, &floors, &event_tx, &stats)
                    .is_err()
                {
                    break;
                }
            }

            Ok(_) => {}

            Err(e) => {
                let was_connected = std::mem::replace(&mut stats.lock().connected, false);
                if was_connected {
                    log::warn!("[bridge] Connection to {} lost: {}", broker, e);
                    let lost = BridgeEvent::Disconnected {
                        reason: e.to_string(),
                    };
                    if deliver(&event_tx, lost, &stats).is_err() {
                        break;
                    }
                } else {
                    log::debug!("[bridge] Connect to {} failed: {}", broker, e);
                }
                tokio::time::sleep(RECONNECT_DELAY).await;
            }
        }
    }

    log::info!("[bridge] Render loop gone, exiting run loop");
    let _ = client.try_disconnect();
}

/// The render loop dropped its receiver.
#[derive(Debug, PartialEq, Eq)]
struct ReceiverGone;

/// Translate one publish and queue the resulting action.
///
/// Malformed messages are logged, counted and skipped; only a vanished
/// receiver stops the bridge.
fn forward_publish(
    topic: &str,
    payload: &[u8],
    floors: &FloorMap,
    tx: &Sender<BridgeEvent>,
    stats: &Mutex<BridgeStats>,
) -> Result<(), ReceiverGone> {
    stats.lock().received += 1;

    match translate(topic, payload, floors) {
        Ok(action) => deliver(tx, BridgeEvent::Action(action), stats),
        Err(e) => {
            log::warn!("[bridge] Rejected message on {}: {}", topic, e);
            stats.lock().rejected += 1;
            Ok(())
        }
    }
}

fn deliver(
    tx: &Sender<BridgeEvent>,
    event: BridgeEvent,
    stats: &Mutex<BridgeStats>,
) -> Result<(), ReceiverGone> {
    match tx.try_send(event) {
        Ok(()) => Ok(()),
        Err(TrySendError::Full(_)) => {
            log::warn!("[bridge] Event channel full, dropping event");
            stats.lock().dropped += 1;
            Ok(())
        }
        Err(TrySendError::Disconnected(_)) => Err(ReceiverGone),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(cap: usize) -> (Sender<BridgeEvent>, Receiver<BridgeEvent>, Mutex<BridgeStats>) {
        let (tx, rx) = crossbeam_channel::bounded(cap);
        (tx, rx, Mutex::new(BridgeStats::default()))
    }

    #[test]
    fn valid_publish_is_forwarded_as_action() {
        let (tx, rx, stats) = channel(4);
        let floors = FloorMap::default();

        forward_publish(
            "elevator/Dorisch/position",
            br#"{"floor":"First"}"#,
            &floors,
            &tx,
            &stats,
        )
        .unwrap();

        assert_eq!(
            rx.try_recv().unwrap(),
            BridgeEvent::Action(Action::ElevatorPositionUpdate {
                id: "Dorisch".into(),
                target_y: 500.0
            })
        );
        assert_eq!(stats.lock().received, 1);
        assert_eq!(stats.lock().rejected, 0);
    }

    #[test]
    fn malformed_publish_is_counted_not_forwarded() {
        let (tx, rx, stats) = channel(4);
        let floors = FloorMap::default();

        forward_publish("elevator/A/position", b"{", &floors, &tx, &stats).unwrap();
        forward_publish(
            "elevator/A/position",
            br#"{"floor":"Attic"}"#,
            &floors,
            &tx,
            &stats,
        )
        .unwrap();

        assert!(rx.try_recv().is_err());
        let s = stats.lock().clone();
        assert_eq!(s.received, 2);
        assert_eq!(s.rejected, 2);
    }

    #[test]
    fn full_channel_drops_and_counts() {
        let (tx, rx, stats) = channel(1);
        let floors = FloorMap::default();
        let body = br#"{"floor":"Third"}"#;

        forward_publish("elevator/A/position", body, &floors, &tx, &stats).unwrap();
        forward_publish("elevator/B/position", body, &floors, &tx, &stats).unwrap();

        assert_eq!(rx.len(), 1);
        assert_eq!(stats.lock().dropped, 1);
    }

    #[test]
    fn dropped_receiver_stops_forwarding() {
        let (tx, rx, stats) = channel(1);
        drop(rx);
        let result = forward_publish(
            "elevator/A/position",
            br#"{"floor":"Third"}"#,
            &FloorMap::default(),
            &tx,
            &stats,
        );
        assert_eq!(result, Err(ReceiverGone));
    }

    #[test]
    fn default_config_subscribes_all_elevator_topics() {
        let c = BridgeConfig::default();
        assert_eq!(
            c.topics,
            vec![
                "elevator/+/position",
                "elevator/+/door",
                "elevator/+/passengers"
            ]
        );
        assert_eq!(c.broker(), "mqtt://localhost:1883");
    }
}
