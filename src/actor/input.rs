//! Input Actor: Dedicated thread for reading the keyboard.
//!
//! This actor runs in its own thread and uses crossterm's event polling
//! to turn key presses into [`Command`]s without ever blocking the
//! simulation loop. Reading errors are reported as [`Command::Quit`].

use super::messages::Command;
use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Input actor that reads the keyboard.
pub struct InputActor {
    /// Handle to the input thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl InputActor {
    /// Spawn the input actor thread.
    ///
    /// # Arguments
    ///
    /// * `sender` - Channel to publish commands to the simulation loop.
    /// * `poll_timeout` - How long to wait for a key before checking shutdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the thread.
    pub fn spawn(sender: Sender<Command>, poll_timeout: Duration) -> io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("mazechase-input".to_string())
            .spawn(move || {
                Self::run_loop(&sender, &shutdown_clone, poll_timeout);
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the input thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the input thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main input loop.
    fn run_loop(sender: &Sender<Command>, shutdown: &AtomicBool, poll_timeout: Duration) {
        while !shutdown.load(Ordering::Relaxed) {
            let event = match event::poll(poll_timeout) {
                Ok(true) => event::read(),
                Ok(false) => continue,
                Err(e) => Err(e),
            };

            let command = match event {
                Ok(event) => match classify(&event) {
                    Some(command) => command,
                    None => continue,
                },
                Err(e) => {
                    log::warn!("keyboard read failed, quitting: {e}");
                    let _ = sender.send(Command::Quit);
                    break;
                }
            };

            if sender.send(command).is_err() {
                // Receiver dropped, exit
                break;
            }
        }
    }
}

impl Drop for InputActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Classify a terminal event.
///
/// Every key press yields exactly one command; key releases, repeats and
/// non-key events yield `None`.
pub fn classify(event: &Event) -> Option<Command> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(classify_key(key)),
        _ => None,
    }
}

/// Map a key press to a command.
pub fn classify_key(key: &KeyEvent) -> Command {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c' | 'C') => Command::Quit,
            _ => Command::Noop,
        };
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => Command::Up,
        KeyCode::Down | KeyCode::Char('s' | 'S') => Command::Down,
        KeyCode::Left | KeyCode::Char('a' | 'A') => Command::Left,
        KeyCode::Right | KeyCode::Char('d' | 'D') => Command::Right,
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => Command::Quit,
        _ => Command::Noop,
    }
}
