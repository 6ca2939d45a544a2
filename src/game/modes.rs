//! Pursuer modes: The one piece of state shared between threads.
//!
//! The simulation loop and the power timer both read and write pursuer
//! vulnerability. Everything they share lives in [`PursuerModes`] behind a
//! single mutex, together with the power-mode deadline, so that every
//! transition is one read-modify-write under one lock.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Whether contact with a pursuer is lethal to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Vulnerability {
    /// Contact costs the player a life.
    #[default]
    Normal,
    /// Contact sends the pursuer back to its spawn.
    Vulnerable,
}

/// Power-mode state machine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerPhase {
    /// No countdown running; every pursuer is Normal.
    Idle,
    /// A countdown is running until the given instant.
    Active {
        /// When power mode ends unless restarted.
        deadline: Instant,
    },
}

/// Vulnerability of every pursuer plus the power-mode countdown.
#[derive(Debug, Clone)]
pub struct PursuerModes {
    /// One entry per pursuer, indexed like [`GameState::pursuers`](crate::game::GameState).
    modes: Vec<Vulnerability>,
    /// When power mode ends, if it is running.
    deadline: Option<Instant>,
}

impl PursuerModes {
    /// All pursuers Normal, no countdown.
    pub fn new(pursuers: usize) -> Self {
        Self {
            modes: vec![Vulnerability::Normal; pursuers],
            deadline: None,
        }
    }

    /// Vulnerability of one pursuer. Unknown indices read as Normal.
    pub fn get(&self, index: usize) -> Vulnerability {
        self.modes.get(index).copied().unwrap_or_default()
    }

    /// Copy of all vulnerabilities, in pursuer order.
    pub fn snapshot(&self) -> Vec<Vulnerability> {
        self.modes.clone()
    }

    /// Current phase of the power-mode state machine.
    pub fn phase(&self) -> PowerPhase {
        self.deadline
            .map_or(PowerPhase::Idle, |deadline| PowerPhase::Active { deadline })
    }

    /// The running countdown's deadline, if any.
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Enter (or restart) power mode: every pursuer Vulnerable, countdown
    /// reset to the full `duration` from `now`.
    pub fn activate(&mut self, now: Instant, duration: Duration) {
        self.modes.fill(Vulnerability::Vulnerable);
        self.deadline = Some(now + duration);
    }

    /// End power mode if its deadline has passed at `now`.
    ///
    /// Returns `true` if this call performed the Active → Idle transition.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.reset();
                true
            }
            _ => false,
        }
    }

    /// End power mode immediately: every pursuer Normal, no countdown.
    pub fn reset(&mut self) {
        self.modes.fill(Vulnerability::Normal);
        self.deadline = None;
    }

    /// Put one pursuer back to Normal, leaving the others and the countdown.
    pub fn defeat(&mut self, index: usize) {
        if let Some(mode) = self.modes.get_mut(index) {
            *mode = Vulnerability::Normal;
        }
    }
}

/// Cloneable handle to the lock-guarded [`PursuerModes`].
#[derive(Debug, Clone)]
pub struct SharedModes {
    inner: Arc<Mutex<PursuerModes>>,
}

impl SharedModes {
    /// Wrap a fresh region for `pursuers` pursuers.
    pub fn new(pursuers: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(PursuerModes::new(pursuers))),
        }
    }

    /// Acquire the lock.
    ///
    /// Hold the guard only for a read-then-write sequence; never across a
    /// sleep or a channel operation. A poisoned lock is recovered: the
    /// region is plain data and consistent at every unlock point.
    pub fn lock(&self) -> MutexGuard<'_, PursuerModes> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Convenience: copy of all vulnerabilities.
    pub fn snapshot(&self) -> Vec<Vulnerability> {
        self.lock().snapshot()
    }

    /// Convenience: current phase.
    pub fn phase(&self) -> PowerPhase {
        self.lock().phase()
    }

    /// Live handles onto the region.
    #[cfg(test)]
    pub(crate) fn handles(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn test_new_is_idle_and_normal() {
        let modes = PursuerModes::new(3);
        assert_eq!(modes.snapshot().len(), 3);
        assert_eq!(modes.phase(), PowerPhase::Idle);
        assert!(modes.snapshot().iter().all(|&m| m == Vulnerability::Normal));
    }

    #[test]
    fn test_activate_then_expire() {
        let mut modes = PursuerModes::new(2);
        let start = Instant::now();
        modes.activate(start, SECOND);

        assert_eq!(modes.phase(), PowerPhase::Active { deadline: start + SECOND });
        assert_eq!(modes.get(0), Vulnerability::Vulnerable);
        assert_eq!(modes.get(1), Vulnerability::Vulnerable);

        assert!(!modes.expire(start + SECOND / 2));
        assert_eq!(modes.get(0), Vulnerability::Vulnerable);

        assert!(modes.expire(start + SECOND));
        assert_eq!(modes.phase(), PowerPhase::Idle);
        assert_eq!(modes.get(0), Vulnerability::Normal);
    }

    #[test]
    fn test_restart_extends_without_flicker() {
        let mut modes = PursuerModes::new(1);
        let start = Instant::now();
        modes.activate(start, SECOND);
        modes.activate(start + SECOND / 2, SECOND);

        // The first countdown's deadline passes while still Active.
        assert!(!modes.expire(start + SECOND));
        assert_eq!(modes.get(0), Vulnerability::Vulnerable);

        assert!(modes.expire(start + SECOND + SECOND / 2));
        assert_eq!(modes.get(0), Vulnerability::Normal);
    }

    #[test]
    fn test_defeat_touches_one_pursuer() {
        let mut modes = PursuerModes::new(3);
        let start = Instant::now();
        modes.activate(start, SECOND);
        modes.defeat(1);

        assert_eq!(
            modes.snapshot(),
            vec![
                Vulnerability::Vulnerable,
                Vulnerability::Normal,
                Vulnerability::Vulnerable
            ]
        );
        assert!(matches!(modes.phase(), PowerPhase::Active { .. }));
    }

    #[test]
    fn test_reset_ends_power_mode() {
        let mut modes = PursuerModes::new(2);
        modes.activate(Instant::now(), SECOND);
        modes.reset();
        assert_eq!(modes.phase(), PowerPhase::Idle);
        assert!(!modes.expire(Instant::now() + SECOND * 2));
    }

    #[test]
    fn test_expire_when_idle_is_noop() {
        let mut modes = PursuerModes::new(1);
        assert!(!modes.expire(Instant::now()));
    }

    #[test]
    fn test_shared_handles_see_same_state() {
        let shared = SharedModes::new(2);
        let other = shared.clone();
        shared.lock().activate(Instant::now(), SECOND);
        assert!(matches!(other.phase(), PowerPhase::Active { .. }));
        assert_eq!(other.snapshot(), vec![Vulnerability::Vulnerable; 2]);
    }
}
