//! Actor Model: Message-passing concurrency for the game.
//!
//! This module implements a small actor system using crossbeam channels:
//! - **Input Actor**: Reads the keyboard, forwards commands to the engine
//! - **Power Timer**: Ends power mode when its countdown runs out
//! - **Render Actor**: Receives frames, paints and flushes them
//! - **Engine**: The fixed-tick simulation loop on the main thread
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐      Command        ┌──────────────┐
//! │ Input Thread │ ─────────────────▶  │              │
//! └──────────────┘                     │    Engine    │
//!                                      │  (main loop) │
//! ┌──────────────┐    RenderCommand    │              │
//! │Render Thread │ ◀───────────────── │              │
//! └──────────────┘                     └──────────────┘
//!                                         ▲      │ trigger
//!                          PursuerModes   │      ▼
//!                          (one mutex)  ┌──────────────┐
//!                                       │ Power Timer  │
//!                                       └──────────────┘
//! ```

mod engine;
mod input;
mod messages;
mod power;
mod renderer;

pub use engine::{Engine, EngineConfig, Intent};
pub use input::{classify, classify_key, InputActor};
pub use messages::{Command, Frame, PursuerView, RenderCommand};
pub use power::PowerTimer;
pub use renderer::{FrameSink, Painter, RenderHandle, RendererActor};
