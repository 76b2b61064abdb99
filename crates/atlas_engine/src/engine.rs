//! [`Engine`] — the mode-aware runtime shell tying [`atlas_ecs::World`],
//! [`atlas_net::NetContext`] and [`atlas_sim::TickScheduler`] into a single
//! lifecycle with a pure capability table.

use atlas_ecs::World;
use atlas_net::{NetContext, NetMode};
use atlas_sim::TickScheduler;

/// The role an [`Engine`] instance is running under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineMode {
    /// Full editor: rendering, UI, asset writes, hot reload, graph editing.
    Editor,
    /// Non-authoritative client: rendering, no editor-only capabilities.
    Client,
    /// Headless authoritative server: no rendering, no editor capabilities.
    Server,
}

/// A capability an [`Engine`] may or may not grant, depending on its mode.
///
/// [`Engine::can`] is a pure lookup with no side effects — callers are free
/// to poll it every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Writing asset files back to disk.
    AssetWrite,
    /// Drawing to a window/swapchain.
    Rendering,
    /// Editing graph assets (adding/removing nodes and edges).
    GraphEdit,
    /// Watching the asset root for changes and reloading live.
    HotReload,
    /// Executing compiled graph bytecode.
    GraphExecute,
    /// Physics/simulation stepping.
    Physics,
    /// Acting as the authoritative source of truth over the network.
    NetAuthority,
}

/// Construction parameters for an [`Engine`].
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// The runtime role. Defaults to [`EngineMode::Client`].
    pub mode: EngineMode,
    /// Root directory asset scanning starts from. Defaults to `"assets"`.
    pub asset_root: String,
    /// Scheduler tick rate in Hz. Defaults to 30.
    pub tick_rate: u32,
    /// Stop [`Engine::run`] after this many ticks. `0` means unbounded.
    pub max_ticks: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: EngineMode::Client,
            asset_root: "assets".to_string(),
            tick_rate: 30,
            max_ticks: 0,
        }
    }
}

/// The mode-aware engine shell.
///
/// Owns the [`World`], [`NetContext`] and [`TickScheduler`] collaborators
/// and drives them through a single run loop, shaped once per mode at
/// [`Engine::init_networking`] time and otherwise identical across modes.
pub struct Engine {
    config: EngineConfig,
    running: bool,
    world: World,
    net: NetContext,
    scheduler: TickScheduler,
}

impl Engine {
    /// Creates an engine from `config`. No subsystem is initialized yet —
    /// call the `init_*` methods (or [`Engine::run`], which does not call
    /// them for you) before relying on `running()`.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            running: false,
            world: World::new(),
            net: NetContext::new(),
            scheduler: TickScheduler::new(),
        }
    }

    /// Logs engine startup and marks the engine as running.
    pub fn init_core(&mut self) {
        tracing::info!("Engine core initialized");
        self.running = true;
    }

    /// No-op outside of a rendering-capable mode; logs otherwise.
    pub fn init_render(&mut self) {
        if self.config.mode == EngineMode::Server {
            tracing::info!("Render init skipped (server mode)");
            return;
        }
        tracing::info!("Render subsystem initialized");
    }

    /// No-op outside of a rendering-capable mode; logs otherwise.
    pub fn init_ui(&mut self) {
        if self.config.mode == EngineMode::Server {
            tracing::info!("UI init skipped (server mode)");
            return;
        }
        tracing::info!("UI subsystem initialized");
    }

    /// Logs ECS readiness. The [`World`] itself needs no explicit init.
    pub fn init_ecs(&mut self) {
        tracing::info!("ECS world ready");
    }

    /// Maps [`EngineMode`] to [`NetMode`] (`Server` -> `Server`, `Client` ->
    /// `Client`, `Editor` -> `Standalone`) and initializes [`NetContext`]
    /// with it.
    pub fn init_networking(&mut self) {
        let net_mode = match self.config.mode {
            EngineMode::Server => NetMode::Server,
            EngineMode::Client => NetMode::Client,
            EngineMode::Editor => NetMode::Standalone,
        };
        self.net.init(net_mode);
        tracing::info!(?net_mode, "Networking initialized");
    }

    /// Logs editor readiness. A no-op outside [`EngineMode::Editor`].
    pub fn init_editor(&mut self) {
        if self.config.mode == EngineMode::Editor {
            tracing::info!("Editor subsystem initialized");
        }
    }

    /// Applies `config.tick_rate` to the scheduler and runs the mode's loop
    /// to completion (or forever, if `max_ticks == 0`).
    pub fn run(&mut self) {
        self.scheduler.set_tick_rate(self.config.tick_rate);
        match self.config.mode {
            EngineMode::Editor => self.run_loop(false),
            EngineMode::Client => self.run_loop(false),
            EngineMode::Server => self.run_loop(true),
        }
    }

    /// The run loop shared by every mode: poll network, tick the world,
    /// flush outbound traffic (server only), then check `max_ticks`.
    fn run_loop(&mut self, flush_after_tick: bool) {
        let mut tick_count: u64 = 0;
        while self.running {
            self.net.poll();
            let world = &mut self.world;
            self.scheduler.tick(|dt| world.update(dt));
            if flush_after_tick {
                self.net.flush();
            }
            tick_count += 1;
            if self.config.max_ticks > 0 && tick_count >= self.config.max_ticks {
                self.running = false;
            }
        }
    }

    /// Returns `true` if the engine has been started and not yet shut down.
    #[must_use]
    pub fn running(&self) -> bool {
        self.running
    }

    /// Idempotent: logs and tears down networking the first time it is
    /// called while running, no-ops on subsequent calls.
    pub fn shutdown(&mut self) {
        if self.running {
            tracing::info!("Engine shutting down");
            self.net.shutdown();
            self.running = false;
        }
    }

    /// Pure per-mode capability lookup.
    #[must_use]
    pub fn can(&self, capability: Capability) -> bool {
        match capability {
            Capability::AssetWrite | Capability::GraphEdit | Capability::HotReload => {
                self.config.mode == EngineMode::Editor
            }
            Capability::Rendering => self.config.mode != EngineMode::Server,
            Capability::GraphExecute | Capability::Physics => true,
            Capability::NetAuthority => self.config.mode == EngineMode::Server,
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns a reference to the owned [`World`].
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Returns a mutable reference to the owned [`World`].
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Returns a reference to the owned [`NetContext`].
    #[must_use]
    pub fn net(&self) -> &NetContext {
        &self.net
    }

    /// Returns a mutable reference to the owned [`NetContext`].
    pub fn net_mut(&mut self) -> &mut NetContext {
        &mut self.net
    }

    /// Returns a reference to the owned [`TickScheduler`].
    #[must_use]
    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    /// Returns a mutable reference to the owned [`TickScheduler`].
    pub fn scheduler_mut(&mut self) -> &mut TickScheduler {
        &mut self.scheduler
    }
}
