//! High-level runtime orchestrator.
//!
//! The runtime owns one worker task per match, wires up command/event
//! channels, and exposes a builder-based API for creating, addressing and
//! evicting matches.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use battle_core::{Difficulty, MatchId, MatchSetup, MatchState};

use crate::api::{ActionProvider, MatchHandle, Result, RuntimeError};
use crate::events::{EventBus, MatchSummary};
use crate::providers::DecisionEngineProvider;
use crate::workers::MatchWorker;

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Pause before an easy bot submits.
    pub bot_delay_easy: Duration,
    pub bot_delay_normal: Duration,
    pub bot_delay_hard: Duration,
    /// Seed of the default decision engine.
    pub bot_seed: u64,
}

impl RuntimeConfig {
    pub fn bot_delay(&self, difficulty: Difficulty) -> Duration {
        match difficulty {
            Difficulty::Easy => self.bot_delay_easy,
            Difficulty::Normal => self.bot_delay_normal,
            Difficulty::Hard => self.bot_delay_hard,
        }
    }

    /// Same configuration with every bot delay set to `delay`.
    pub fn with_bot_delay(mut self, delay: Duration) -> Self {
        self.bot_delay_easy = delay;
        self.bot_delay_normal = delay;
        self.bot_delay_hard = delay;
        self
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 100,
            command_buffer_size: 32,
            bot_delay_easy: Duration::from_millis(1500),
            bot_delay_normal: Duration::from_millis(1000),
            bot_delay_hard: Duration::from_millis(500),
            bot_seed: 0,
        }
    }
}

struct MatchEntry {
    handle: MatchHandle,
    worker: JoinHandle<()>,
}

/// Registry of running matches.
///
/// Matches share nothing mutable: each one is driven by its own
/// [`MatchWorker`] and addressed through a cloneable [`MatchHandle`].
pub struct Runtime {
    config: RuntimeConfig,
    event_bus: EventBus,
    bot_provider: Arc<dyn ActionProvider>,
    matches: HashMap<MatchId, MatchEntry>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Materializes `setup` and spawns its worker.
    ///
    /// Nothing is registered when roster materialization fails.
    pub fn create_match(&mut self, setup: MatchSetup) -> Result<MatchHandle> {
        let match_id = setup.id;
        if self.matches.contains_key(&match_id) {
            return Err(RuntimeError::MatchAlreadyExists(match_id));
        }
        let state = MatchState::from_setup(setup)?;

        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer_size);
        self.event_bus.register(match_id);

        let worker = MatchWorker::new(
            state,
            command_rx,
            command_tx.downgrade(),
            self.event_bus.clone(),
            Arc::clone(&self.bot_provider),
            self.config.clone(),
        );
        let worker = tokio::spawn(worker.run());
        let handle = MatchHandle::new(match_id, command_tx, self.event_bus.clone());

        info!(target: "runtime::worker", %match_id, "match created");
        self.matches.insert(
            match_id,
            MatchEntry {
                handle: handle.clone(),
                worker,
            },
        );
        Ok(handle)
    }

    pub fn handle(&self, match_id: MatchId) -> Result<MatchHandle> {
        self.matches
            .get(&match_id)
            .map(|entry| entry.handle.clone())
            .ok_or(RuntimeError::MatchNotFound(match_id))
    }

    pub fn match_ids(&self) -> Vec<MatchId> {
        let mut ids: Vec<_> = self.matches.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Stops a terminal match and returns its summary.
    ///
    /// Fails with [`RuntimeError::MatchNotTerminal`] while the match is in
    /// progress; the match stays registered in that case.
    pub async fn evict(&mut self, match_id: MatchId) -> Result<MatchSummary> {
        let entry = self
            .matches
            .get(&match_id)
            .ok_or(RuntimeError::MatchNotFound(match_id))?;
        let snapshot = entry.handle.snapshot().await?;
        let summary =
            MatchSummary::from_state(&snapshot).ok_or(RuntimeError::MatchNotTerminal(match_id))?;

        if let Some(entry) = self.matches.remove(&match_id) {
            Self::stop(entry).await?;
        }
        self.event_bus.close(match_id);
        info!(target: "runtime::worker", %match_id, winner = %summary.winner, "match evicted");
        Ok(summary)
    }

    /// Stops every worker, terminal or not.
    pub async fn shutdown(mut self) -> Result<()> {
        for (match_id, entry) in self.matches.drain() {
            Self::stop(entry).await?;
            self.event_bus.close(match_id);
        }
        Ok(())
    }

    async fn stop(entry: MatchEntry) -> Result<()> {
        // A worker that already exited has nothing left to stop.
        let _ = entry.handle.shutdown().await;
        drop(entry.handle);
        entry.worker.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    bot_provider: Option<Arc<dyn ActionProvider>>,
}

impl RuntimeBuilder {
    pub fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            bot_provider: None,
        }
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the default decision engine for bot-controlled sides.
    pub fn bot_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.bot_provider = Some(Arc::new(provider));
        self
    }

    pub fn build(self) -> Runtime {
        let bot_provider = self
            .bot_provider
            .unwrap_or_else(|| Arc::new(DecisionEngineProvider::new(self.config.bot_seed)));

        Runtime {
            event_bus: EventBus::with_capacity(self.config.event_buffer_size),
            bot_provider,
            config: self.config,
            matches: HashMap::new(),
        }
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
