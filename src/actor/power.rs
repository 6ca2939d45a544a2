//! Power Timer Actor: Long-lived thread that ends power mode.
//!
//! Power mode is entered (or restarted) on the caller's thread by
//! [`PowerTimer::trigger`], which flips every pursuer to Vulnerable and
//! moves the deadline under the pursuer-mode lock, then wakes the timer
//! thread through a single-slot channel. The timer thread sleeps until the
//! current deadline and performs the expiry under the same lock. Because
//! expiry re-checks the deadline while holding the lock, a restart racing
//! an expiry can never produce a Normal flicker.

use crate::game::{PowerPhase, SharedModes};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Power timer actor.
pub struct PowerTimer {
    /// Handle to the timer thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
    /// Wakes the timer thread to re-read the deadline.
    wake_tx: Sender<()>,
    /// Shared pursuer modes.
    modes: SharedModes,
    /// Full countdown length.
    duration: Duration,
}

impl PowerTimer {
    /// Spawn the timer thread over `modes`.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the thread.
    pub fn spawn(modes: SharedModes, duration: Duration) -> io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        // One pending wake is enough: the thread always re-reads the deadline.
        let (wake_tx, wake_rx) = bounded(1);
        let thread_modes = modes.clone();

        let handle = thread::Builder::new()
            .name("mazechase-power".to_string())
            .spawn(move || {
                Self::run_loop(&wake_rx, &shutdown_clone, &thread_modes);
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
            wake_tx,
            modes,
            duration,
        })
    }

    /// The shared pursuer modes this timer drives.
    pub const fn modes(&self) -> &SharedModes {
        &self.modes
    }

    /// Current phase.
    pub fn phase(&self) -> PowerPhase {
        self.modes.phase()
    }

    /// Enter power mode, or restart the countdown if already active.
    ///
    /// Never blocks beyond the short lock.
    pub fn trigger(&self) {
        let restarted = {
            let mut modes = self.modes.lock();
            let active = matches!(modes.phase(), PowerPhase::Active { .. });
            modes.activate(Instant::now(), self.duration);
            active
        };

        if restarted {
            log::debug!("power mode restarted for {:?}", self.duration);
        } else {
            log::info!("power mode on for {:?}", self.duration);
        }

        self.wake();
    }

    fn wake(&self) {
        // Full means a wake is already pending.
        let _ = self.wake_tx.try_send(());
    }

    /// Signal the timer thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
        self.wake();
    }

    /// Wait for the timer thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main timer loop.
    fn run_loop(wake_rx: &Receiver<()>, shutdown: &AtomicBool, modes: &SharedModes) {
        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            let deadline = modes.lock().deadline();
            let woken = match deadline {
                Some(deadline) => wake_rx.recv_deadline(deadline),
                None => wake_rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
            };

            match woken {
                Ok(()) => {}
                Err(RecvTimeoutError::Timeout) => {
                    if modes.lock().expire(Instant::now()) {
                        log::info!("power mode over");
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    }
}

impl Drop for PowerTimer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
