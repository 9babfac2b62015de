//! Engine runner - physics and intent tasks around the gateway.
//!
//! Execution contexts:
//!
//! - **physics**: sleeps until the next gravity deadline, ticks, re-reads the fall
//!   interval (it shortens with level) and stops for good at game over
//! - **dispatch**: drains the bounded intent channel, applying intents in the order
//!   they were received
//! - **render** (caller-owned): subscribes to snapshots via [`Engine::snapshots`]
//! - **input** (caller-owned): any producer holding [`Engine::intents`]
//!
//! Shutdown flips a shared flag. Each task checks it between operations, so a mutation
//! in flight finishes exactly once. Dispatch then closes the channel and applies the
//! intents it had already accepted, in order; later sends fail.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::core::{MovementManager, Snapshot, StepOutcome};
use crate::gateway::Gateway;
use crate::types::Intent;

/// Default capacity of the intent channel.
pub const DEFAULT_INTENT_CAPACITY: usize = 64;

/// Default render poll interval (about 60 frames per second).
pub const DEFAULT_RENDER_INTERVAL_MS: u64 = 16;

/// Engine tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub intent_capacity: usize,
    pub render_interval_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            intent_capacity: DEFAULT_INTENT_CAPACITY,
            render_interval_ms: DEFAULT_RENDER_INTERVAL_MS,
        }
    }
}

impl EngineConfig {
    pub fn render_interval(&self) -> Duration {
        Duration::from_millis(self.render_interval_ms.max(1))
    }
}

/// Cloneable shutdown trigger shared by every context.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: Arc<watch::Sender<bool>>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Request shutdown. Idempotent.
    pub fn trigger(&self) {
        if !self.tx.send_replace(true) {
            log::info!("shutdown requested");
        }
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Resolve once shutdown has been requested.
    pub async fn wait(&self) {
        let mut rx = self.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let _ = rx.wait_for(|stop| *stop).await;
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// A running session.
#[derive(Debug)]
pub struct Engine {
    gateway: Gateway,
    intents: mpsc::Sender<Intent>,
    shutdown: Shutdown,
    physics: JoinHandle<()>,
    dispatch: JoinHandle<()>,
}

impl Engine {
    /// Spawn the physics and dispatch tasks. Must be called inside a tokio runtime.
    pub fn start(manager: MovementManager, config: EngineConfig) -> Self {
        let gateway = Gateway::new(manager);
        let shutdown = Shutdown::new();
        let (intents, intent_rx) = mpsc::channel(config.intent_capacity.max(1));

        let physics = tokio::spawn(run_physics(gateway.clone(), shutdown.subscribe()));
        let dispatch = tokio::spawn(run_dispatch(gateway.clone(), intent_rx, shutdown.subscribe()));

        log::info!("engine started (intent capacity {})", config.intent_capacity);
        Self {
            gateway,
            intents,
            shutdown,
            physics,
            dispatch,
        }
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// Producer side of the intent channel.
    pub fn intents(&self) -> mpsc::Sender<Intent> {
        self.intents.clone()
    }

    pub fn snapshots(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.gateway.subscribe()
    }

    pub fn shutdown_handle(&self) -> Shutdown {
        self.shutdown.clone()
    }

    /// True while gravity is still being applied.
    pub fn physics_running(&self) -> bool {
        !self.physics.is_finished()
    }

    /// Signal shutdown and wait for both tasks to exit.
    pub async fn shutdown(self) {
        self.shutdown.trigger();
        drop(self.intents);
        for (name, task) in [("physics", self.physics), ("dispatch", self.dispatch)] {
            if let Err(err) = task.await {
                log::error!("{name} task failed: {err}");
            }
        }
        log::info!("engine stopped");
    }
}

fn stop_requested(changed: Result<(), watch::error::RecvError>, rx: &watch::Receiver<bool>) -> bool {
    changed.is_err() || *rx.borrow()
}

async fn run_physics(gateway: Gateway, mut shutdown: watch::Receiver<bool>) {
    if *shutdown.borrow() {
        return;
    }
    let mut deadline = Instant::now() + gateway.fall_interval();
    loop {
        tokio::select! {
            biased;
            changed = shutdown.changed() => {
                if stop_requested(changed, &shutdown) {
                    break;
                }
            }
            _ = tokio::time::sleep_until(deadline) => {
                match gateway.tick() {
                    StepOutcome::GameOver | StepOutcome::Ignored => {
                        log::info!("physics stopped: game over");
                        break;
                    }
                    StepOutcome::Locked { lines_cleared } if lines_cleared > 0 => {
                        log::debug!("tick cleared {lines_cleared} lines");
                    }
                    _ => {}
                }
                deadline += gateway.fall_interval();
            }
        }
    }
}

async fn run_dispatch(
    gateway: Gateway,
    mut intents: mpsc::Receiver<Intent>,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        tokio::select! {
            biased;
            changed = shutdown.changed() => {
                if stop_requested(changed, &shutdown) {
                    break;
                }
            }
            intent = intents.recv() => match intent {
                Some(intent) => {
                    gateway.apply(intent);
                }
                None => break,
            },
        }
    }

    // Accepted intents are still applied; a session that ended ignores them.
    intents.close();
    let mut drained = 0usize;
    while let Ok(intent) = intents.try_recv() {
        gateway.apply(intent);
        drained += 1;
    }
    if drained > 0 {
        log::debug!("applied {drained} queued intents at shutdown");
    }
}
