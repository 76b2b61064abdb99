//! [`Console`] — a renderer-free command interpreter over the engine's
//! core collaborators. The original panel this is grounded on drew an
//! on-screen text buffer; `Console` keeps only the command grammar and the
//! line history, so a host can wire it to a terminal, an in-game overlay,
//! or a remote admin socket equally well.

use atlas_ecs::World;
use atlas_net::{NetContext, NetMode};
use atlas_sim::TickScheduler;

fn net_mode_label(mode: NetMode) -> &'static str {
    match mode {
        NetMode::Standalone => "Standalone",
        NetMode::Client => "Client",
        NetMode::Server => "Server",
        NetMode::P2pHost => "P2P_Host",
        NetMode::P2pPeer => "P2P_Peer",
    }
}

/// A line-oriented command interpreter borrowing the engine's core
/// collaborators for the duration of each call.
///
/// `Console` does not own `World`, `NetContext` or `TickScheduler` — it
/// operates on borrows supplied to [`Console::execute`], so a single
/// instance can be reused across frames without fighting the borrow
/// checker over who holds the engine's state.
#[derive(Debug, Default)]
pub struct Console {
    history: Vec<String>,
}

impl Console {
    /// Creates a console with empty history.
    #[must_use]
    pub fn new() -> Self {
        Self {
            history: Vec::new(),
        }
    }

    /// Returns the accumulated history, oldest first.
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Appends a line to the history without executing it.
    pub fn add_line(&mut self, line: impl Into<String>) {
        self.history.push(line.into());
    }

    /// Parses and runs `command` against `world`/`net`/`scheduler`,
    /// appending the echoed input and the result to the history.
    ///
    /// Recognized grammar: `spawn_entity`, `ecs.dump`, `set tickrate <N>`,
    /// `net.mode`, `help`. Anything else is reported as unknown.
    pub fn execute(
        &mut self,
        command: &str,
        world: &mut World,
        net: &NetContext,
        scheduler: &mut TickScheduler,
    ) {
        self.history.push(format!("> {command}"));

        let tokens: Vec<&str> = command.split_whitespace().collect();
        match tokens.as_slice() {
            ["spawn_entity"] => {
                let entity = world.create_entity();
                self.history.push(format!("Created entity {}", entity.id()));
            }
            ["ecs.dump"] => {
                self.history
                    .push(format!("Entities: {}", world.entity_count()));
                for &entity in world.entities() {
                    let component_count = world.component_types(entity).len();
                    self.history.push(format!(
                        "  Entity {} ({component_count} components)",
                        entity.id()
                    ));
                }
            }
            ["set", "tickrate", value] => match value.parse::<u32>() {
                Ok(hz) if hz > 0 => {
                    scheduler.set_tick_rate(hz);
                    self.history.push(format!("Tick rate set to {hz}"));
                }
                _ => self.history.push("Invalid tick rate".to_string()),
            },
            ["set", key, ..] => {
                self.history.push(format!("Unknown setting: {key}"));
            }
            ["net.mode"] => {
                self.history
                    .push(format!("Net mode: {}", net_mode_label(net.mode())));
            }
            ["help"] => {
                self.history.push(
                    "Commands: spawn_entity, ecs.dump, set tickrate <N>, net.mode, help"
                        .to_string(),
                );
            }
            _ => {
                self.history.push(format!("Unknown command: {command}"));
            }
        }
    }
}
