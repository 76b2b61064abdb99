//! # atlas_engine
//!
//! The mode-aware runtime shell: [`Engine`] owns the core collaborators
//! (world, networking, scheduler) and exposes a pure per-mode capability
//! table, and [`Console`] layers a text command grammar over the same
//! collaborators for editor/admin tooling.

pub mod console;
pub mod engine;

pub use console::Console;
pub use engine::{Capability, Engine, EngineConfig, EngineMode};
