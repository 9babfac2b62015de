//! Input capture context.
//!
//! A dedicated OS thread waits on the terminal (blocking poll/read), maps key presses
//! to intents and enqueues them. It never touches game state. The quit key invokes a
//! caller-supplied callback; the thread exits when the shutdown flag flips or the
//! intent channel closes.

use std::io;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tokio::sync::{mpsc, watch};

use crate::map::{handle_key_event, should_quit};
use crate::types::Intent;

/// How long one wait for a key may block before the shutdown flag is re-checked.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Source of key presses.
pub trait KeySource {
    /// Wait up to `timeout` for the next key event.
    fn next_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>>;
}

/// The process terminal, read through crossterm.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn next_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => Ok(Some(key)),
            _ => Ok(None),
        }
    }
}

/// Why the capture loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureExit {
    Quit,
    Shutdown,
    ChannelClosed,
    /// The key source ended (e.g. a scripted source ran dry) or failed.
    SourceClosed,
}

/// Run the capture loop on the current thread.
pub fn run_capture<S, F>(
    mut source: S,
    intents: mpsc::Sender<Intent>,
    shutdown: watch::Receiver<bool>,
    poll_interval: Duration,
    on_quit: F,
) -> CaptureExit
where
    S: KeySource,
    F: FnOnce(),
{
    loop {
        if *shutdown.borrow() {
            return CaptureExit::Shutdown;
        }
        let key = match source.next_key(poll_interval) {
            Ok(Some(key)) => key,
            Ok(None) => continue,
            Err(err) => {
                log::error!("input source failed: {err}");
                return CaptureExit::SourceClosed;
            }
        };
        if should_quit(key) {
            log::info!("quit requested");
            on_quit();
            return CaptureExit::Quit;
        }
        if let Some(intent) = handle_key_event(key) {
            if intents.blocking_send(intent).is_err() {
                log::warn!("intent channel closed; dropping {}", intent.as_str());
                return CaptureExit::ChannelClosed;
            }
        }
    }
}

/// Spawn the capture loop on its own named thread.
pub fn spawn_capture<S, F>(
    source: S,
    intents: mpsc::Sender<Intent>,
    shutdown: watch::Receiver<bool>,
    on_quit: F,
) -> io::Result<JoinHandle<CaptureExit>>
where
    S: KeySource + Send + 'static,
    F: FnOnce() + Send + 'static,
{
    thread::Builder::new()
        .name("blockfall-input".into())
        .spawn(move || run_capture(source, intents, shutdown, DEFAULT_POLL_INTERVAL, on_quit))
}
