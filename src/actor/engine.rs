//! Engine: The fixed-tick simulation loop.
//!
//! The engine owns the [`GameState`] outright and runs on the caller's
//! thread. Each tick it drains the input channel without blocking, moves
//! the player and pursuers, resolves collisions, hands a [`Frame`] to its
//! [`FrameSink`], checks the end conditions and sleeps out the rest of the
//! tick. The only state it shares is the pursuer-mode region, which it
//! shares with the [`PowerTimer`].

use super::messages::{Command, Frame};
use super::power::PowerTimer;
use super::renderer::FrameSink;
use crate::game::rules::{self, Outcome, Pickup};
use crate::game::{GameState, SharedModes};
use crate::maze::{Direction, Maze};
use crossbeam_channel::{Receiver, TryRecvError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io;
use std::thread;
use std::time::{Duration, Instant};

/// Configuration for the Engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Target tick period.
    pub tick: Duration,
    /// Pause after the player is caught with lives left.
    pub death_pause: Duration,
    /// Power-mode countdown length.
    pub power_duration: Duration,
    /// Lives at the start of the game.
    pub lives: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(200),
            death_pause: Duration::from_millis(1000),
            power_duration: Duration::from_secs(10),
            lives: 3,
        }
    }
}

/// What the player asked for this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Step in a direction.
    Move(Direction),
    /// No movement (no input, or an unbound key).
    Stay,
    /// End the game.
    Quit,
}

/// The simulation loop.
pub struct Engine<S, R = StdRng> {
    /// Configuration.
    config: EngineConfig,
    /// Everything the loop owns.
    state: GameState,
    /// Commands from the input thread.
    input_rx: Receiver<Command>,
    /// Power-mode timer and the shared pursuer modes.
    power: PowerTimer,
    /// Where frames go.
    sink: S,
    /// Pursuer movement randomness.
    rng: R,
    /// Ticks run so far.
    ticks: u64,
}

impl<S: FrameSink> Engine<S> {
    /// Create an engine with an OS-seeded random source.
    ///
    /// # Errors
    ///
    /// Returns an error if the power timer thread cannot be spawned.
    pub fn new(
        config: EngineConfig,
        maze: Maze,
        input_rx: Receiver<Command>,
        sink: S,
    ) -> io::Result<Self> {
        Self::with_rng(config, maze, input_rx, sink, StdRng::from_os_rng())
    }
}

impl<S: FrameSink, R: Rng> Engine<S, R> {
    /// Create an engine with the given random source.
    ///
    /// # Errors
    ///
    /// Returns an error if the power timer thread cannot be spawned.
    pub fn with_rng(
        config: EngineConfig,
        maze: Maze,
        input_rx: Receiver<Command>,
        sink: S,
        rng: R,
    ) -> io::Result<Self> {
        let state = GameState::new(maze, config.lives);
        let modes = SharedModes::new(state.pursuers.len());
        let power = PowerTimer::spawn(modes, config.power_duration)?;

        Ok(Self {
            config,
            state,
            input_rx,
            power,
            sink,
            rng,
            ticks: 0,
        })
    }

    /// The game state.
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// The shared pursuer modes.
    pub const fn modes(&self) -> &SharedModes {
        self.power.modes()
    }

    /// The frame sink.
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Drain all pending commands without blocking.
    ///
    /// Quit anywhere in the queue wins; otherwise the most recent command
    /// decides. A disconnected channel counts as Quit.
    pub fn poll_input(&self) -> Intent {
        let mut intent = Intent::Stay;
        loop {
            match self.input_rx.try_recv() {
                Ok(Command::Quit) | Err(TryRecvError::Disconnected) => return Intent::Quit,
                Ok(command) => {
                    intent = command.direction().map_or(Intent::Stay, Intent::Move);
                }
                Err(TryRecvError::Empty) => return intent,
            }
        }
    }

    /// Run one tick, without the trailing sleep.
    ///
    /// Returns the outcome once the game is over; the frame drawn by that
    /// tick is the final one.
    pub fn tick(&mut self) -> Option<Outcome> {
        self.ticks += 1;

        match self.poll_input() {
            Intent::Quit => {
                log::info!("quit requested");
                self.state.lives = 0;
            }
            Intent::Move(direction) => {
                if rules::move_player(&mut self.state, direction) == Some(Pickup::Power) {
                    self.power.trigger();
                }
            }
            Intent::Stay => {}
        }

        rules::move_pursuers(&mut self.state, &mut self.rng);

        let report = rules::resolve_collisions(&mut self.state, self.power.modes());
        for index in &report.defeated {
            log::info!("pursuer {index} defeated");
        }

        if self.state.lives > 0 {
            if let Some(&at) = report.deaths.last() {
                log::info!("caught at {at}, {} lives left", self.state.lives);
                let frame = self.capture().with_death(at);
                self.sink.draw(frame);
                thread::sleep(self.config.death_pause);
            }
        }

        let mut frame = self.capture();
        let outcome = rules::outcome(&self.state);
        if let Some(outcome) = outcome {
            if outcome == Outcome::Lost {
                frame = frame.with_death(self.state.player.position);
            }
            frame = frame.with_outcome(outcome);
            log::info!(
                "game over after {} ticks: {outcome:?}, score {}",
                self.ticks,
                self.state.score
            );
        }
        self.sink.draw(frame);

        outcome
    }

    /// Run ticks until the game ends, then join the power timer thread.
    pub fn run(mut self) -> Outcome {
        log::info!(
            "game started: {}x{} maze, {} pursuers, {} dots, {} lives",
            self.state.grid.rows(),
            self.state.grid.cols(),
            self.state.pursuers.len(),
            self.state.dots_remaining,
            self.state.lives
        );

        let outcome = loop {
            let tick_start = Instant::now();
            if let Some(outcome) = self.tick() {
                break outcome;
            }
            if let Some(rest) = self.config.tick.checked_sub(tick_start.elapsed()) {
                thread::sleep(rest);
            }
        };

        self.power.join();
        outcome
    }

    fn capture(&self) -> Frame {
        Frame::capture(&self.state, &self.power.modes().snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{PowerPhase, Vulnerability};
    use crate::maze::{Position, Tile};
    use crossbeam_channel::{bounded, Sender};
    use rand::RngCore;

    /// Every draw is zero, so every pursuer always tries to move Up.
    struct ZeroRng;

    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    fn config(lives: u32) -> EngineConfig {
        EngineConfig {
            tick: Duration::from_millis(1),
            death_pause: Duration::ZERO,
            power_duration: Duration::from_secs(60),
            lives,
        }
    }

    fn engine(source: &str, lives: u32) -> (Engine<Vec<Frame>, ZeroRng>, Sender<Command>) {
        let (tx, rx) = bounded(16);
        let maze = source.parse::<Maze>().unwrap();
        let engine = Engine::with_rng(config(lives), maze, rx, Vec::new(), ZeroRng).unwrap();
        (engine, tx)
    }

    // Player at (1, 1). The pursuer at (2, 2) steps Up into (1, 2) every
    // tick. The dot at (1, 3) keeps the game from being won.
    const CORRIDOR: &str = "#####\n#P .#\n##G##\n#####";
    const CORRIDOR_POWER: &str = "#####\n#PX.#\n##G##\n#####";

    #[test]
    fn test_zero_rng_moves_up() {
        assert_eq!(Direction::random(&mut ZeroRng), Direction::Up);
    }

    #[test]
    fn test_no_input_player_stays() {
        let (mut engine, _tx) = engine("P..", 3);
        assert_eq!(engine.poll_input(), Intent::Stay);
        assert_eq!(engine.tick(), None);
        assert_eq!(engine.state().player.position, Position::new(0, 0));
        assert_eq!(engine.sink().len(), 1);
    }

    #[test]
    fn test_noop_player_stays() {
        let (mut engine, tx) = engine("P..", 3);
        tx.send(Command::Noop).unwrap();
        assert_eq!(engine.tick(), None);
        assert_eq!(engine.state().player.position, Position::new(0, 0));
    }

    #[test]
    fn test_move_and_eat() {
        let (mut engine, tx) = engine("P..", 3);
        tx.send(Command::Right).unwrap();
        assert_eq!(engine.tick(), None);
        assert_eq!(engine.state().player.position, Position::new(0, 1));
        assert_eq!(engine.state().score, 1);
        assert_eq!(engine.state().dots_remaining, 1);
        assert_eq!(engine.sink()[0].score, 1);
    }

    #[test]
    fn test_latest_command_wins() {
        let (mut engine, tx) = engine(".P.", 3);
        tx.send(Command::Left).unwrap();
        tx.send(Command::Right).unwrap();
        engine.tick();
        assert_eq!(engine.state().player.position, Position::new(0, 2));
        assert_eq!(engine.poll_input(), Intent::Stay);
    }

    #[test]
    fn test_quit_anywhere_in_queue() {
        let (engine, tx) = engine("P..", 3);
        tx.send(Command::Quit).unwrap();
        tx.send(Command::Right).unwrap();
        assert_eq!(engine.poll_input(), Intent::Quit);
    }

    #[test]
    fn test_quit_is_a_loss() {
        let (mut engine, tx) = engine("P..", 3);
        tx.send(Command::Quit).unwrap();
        assert_eq!(engine.tick(), Some(Outcome::Lost));
        assert_eq!(engine.state().lives, 0);
        let last = engine.sink().last().unwrap();
        assert_eq!(last.outcome, Some(Outcome::Lost));
        assert_eq!(last.death, Some(Position::new(0, 0)));
    }

    #[test]
    fn test_disconnected_input_is_quit() {
        let (mut engine, tx) = engine("P..", 3);
        drop(tx);
        assert_eq!(engine.tick(), Some(Outcome::Lost));
    }

    #[test]
    fn test_empty_maze_wins_first_tick() {
        let (mut engine, _tx) = engine("P  ", 3);
        assert_eq!(engine.tick(), Some(Outcome::Won));
        assert_eq!(engine.sink().len(), 1);
        assert_eq!(engine.sink()[0].outcome, Some(Outcome::Won));
    }

    #[test]
    fn test_empty_maze_wins_regardless_of_input() {
        for command in [Command::Right, Command::Noop, Command::Quit] {
            let (mut engine, tx) = engine("P  ", 3);
            tx.send(command).unwrap();
            assert_eq!(engine.tick(), Some(Outcome::Won), "{command:?}");
        }
    }

    #[test]
    fn test_first_move_into_wall() {
        let (mut engine, tx) = engine("#P.\n###\n.G.", 3);
        let grid_before = engine.state().grid.clone();
        tx.send(Command::Left).unwrap();

        assert_eq!(engine.tick(), None);

        let state = engine.state();
        assert_eq!(state.player.position, Position::new(0, 1));
        assert_eq!(state.score, 0);
        assert_eq!(state.dots_remaining, 3);
        assert_eq!(state.lives, 3);
        assert_eq!(state.grid, grid_before);
    }

    #[test]
    fn test_normal_collision_costs_a_life() {
        let (mut engine, tx) = engine(CORRIDOR, 3);
        tx.send(Command::Right).unwrap();

        assert_eq!(engine.tick(), None);

        let state = engine.state();
        assert_eq!(state.lives, 2);
        assert_eq!(state.player.position, state.player.spawn);
        assert_eq!(engine.modes().snapshot(), vec![Vulnerability::Normal]);

        // A death frame, then the regular frame.
        let frames = engine.sink();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].death, Some(Position::new(1, 2)));
        assert_eq!(frames[1].death, None);
        assert_eq!(frames[1].lives, 2);
    }

    #[test]
    fn test_last_life_lost() {
        let (mut engine, tx) = engine(CORRIDOR, 1);
        tx.send(Command::Right).unwrap();

        assert_eq!(engine.tick(), Some(Outcome::Lost));

        let state = engine.state();
        assert_eq!(state.lives, 0);
        assert_eq!(state.player.position, Position::new(1, 2));
        assert_eq!(engine.sink().len(), 1);
    }

    #[test]
    fn test_power_pickup_then_defeat_pursuer() {
        let (mut engine, tx) = engine(CORRIDOR_POWER, 3);
        tx.send(Command::Right).unwrap();

        assert_eq!(engine.tick(), None);

        let state = engine.state();
        assert_eq!(state.score, 10);
        assert_eq!(state.lives, 3);
        assert_eq!(state.player.position, Position::new(1, 2));
        assert_eq!(state.grid.get(Position::new(1, 2)), Some(Tile::Empty));
        assert_eq!(state.pursuers[0].position, state.pursuers[0].spawn);
        assert_eq!(engine.modes().snapshot(), vec![Vulnerability::Normal]);
        assert!(matches!(engine.modes().phase(), PowerPhase::Active { .. }));
    }

    #[test]
    fn test_frame_shows_vulnerable_pursuers() {
        // Pursuer boxed in; it can never reach the player.
        let (mut engine, tx) = engine("PX.\n###\n#G#\n###", 3);
        tx.send(Command::Right).unwrap();

        engine.tick();

        let frame = &engine.sink()[0];
        assert_eq!(frame.pursuers[0].vulnerability, Vulnerability::Vulnerable);
        assert_eq!(frame.score, 10);
    }

    #[test]
    fn test_run_until_win() {
        let (mut engine, tx) = engine("P.", 3);
        tx.send(Command::Right).unwrap();
        engine.config.tick = Duration::from_millis(1);
        assert_eq!(engine.run(), Outcome::Won);
    }

    #[test]
    fn test_run_joins_power_timer() {
        let (engine, tx) = engine("PX.", 3);
        let modes = engine.modes().clone();
        tx.send(Command::Quit).unwrap();

        assert_eq!(engine.run(), Outcome::Lost);
        assert_eq!(modes.handles(), 1);
    }
}
