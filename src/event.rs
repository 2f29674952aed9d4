//! # Packet Events
//!
//! Decoded packets arrive from the host on whatever thread it receives them.
//! [`PacketBus`] fans them out over crossbeam channels to subscribers, so the
//! ingestion work runs on its own thread and never blocks the renderer.
//!
//! ## Lifecycle
//! 1. `subscribe()` registers a channel and returns its [`Subscription`]
//! 2. `publish()` clones the packet into every live channel
//! 3. `unsubscribe()` drops the sender; the receiver drains what is queued and
//!    then reports disconnection
//!
//! [`PacketBus::spawn_listener`] wraps all three around a handler thread and
//! hands back a [`ListenerHandle`] that tears it down deterministically.

use crossbeam::channel::{unbounded, Receiver, Sender};
use dashmap::DashMap;
use log::{debug, info, warn};
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Sound effect played at a world position.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SoundEffectPacket {
    /// Sound identifier, e.g. `block.note.harp`.
    pub sound: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub pitch: f32,
}

/// A decoded packet. Only sound effects matter here; every other kind is
/// carried by name so hosts can forward their whole stream.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Packet {
    SoundEffect(SoundEffectPacket),
    Other { name: String },
}

pub type SubscriptionId = u64;

/// Receiving end of one bus subscription.
#[derive(Debug)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub receiver: Receiver<Packet>,
}

#[derive(Debug, Default)]
pub struct PacketBus {
    subscribers: DashMap<SubscriptionId, Sender<Packet>>,
    next_id: AtomicU64,
}

impl PacketBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = unbounded();
        self.subscribers.insert(id, sender);
        debug!("subscription {} registered", id);
        Subscription { id, receiver }
    }

    /// Drop the sender for `id`. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.subscribers.remove(&id).is_some();
        if removed {
            debug!("subscription {} removed", id);
        }
        removed
    }

    /// Deliver `packet` to every subscriber. Subscribers whose receiver is
    /// gone are pruned. Returns how many received the packet.
    pub fn publish(&self, packet: Packet) -> usize {
        let mut delivered = 0;
        let mut dead = Vec::new();
        for entry in self.subscribers.iter() {
            if entry.value().send(packet.clone()).is_ok() {
                delivered += 1;
            } else {
                dead.push(*entry.key());
            }
        }
        // Removing while iterating would deadlock on the shard lock
        for id in dead {
            warn!("subscription {} disconnected, pruning", id);
            self.subscribers.remove(&id);
        }
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Subscribe and run `handler` for every packet on a dedicated thread.
    pub fn spawn_listener<F>(self: &Arc<Self>, name: &str, mut handler: F) -> std::io::Result<ListenerHandle>
    where
        F: FnMut(Packet) + Send + 'static,
    {
        let Subscription { id, receiver } = self.subscribe();
        let spawned = thread::Builder::new().name(name.to_string()).spawn(move || {
            // Ends once the sender is dropped and the queue is drained
            for packet in receiver.iter() {
                handler(packet);
            }
        });
        let thread = match spawned {
            Ok(thread) => thread,
            Err(e) => {
                self.unsubscribe(id);
                return Err(e);
            }
        };
        info!("listener '{}' attached as subscription {}", name, id);
        Ok(ListenerHandle {
            bus: Arc::clone(self),
            id,
            thread: Some(thread),
        })
    }
}

/// Owns a listener thread. Detaching unsubscribes, lets the thread finish the
/// packets already queued, and joins it. Dropping the handle detaches.
#[derive(Debug)]
pub struct ListenerHandle {
    bus: Arc<PacketBus>,
    id: SubscriptionId,
    thread: Option<JoinHandle<()>>,
}

impl ListenerHandle {
    pub fn detach(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(thread) = self.thread.take() {
            self.bus.unsubscribe(self.id);
            if thread.join().is_err() {
                warn!("listener {} panicked", self.id);
            }
            info!("listener {} detached", self.id);
        }
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
