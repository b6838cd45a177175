//! Bridge runtime integration.
//!
//! Bridges the sync game loop with the async subprocess plumbing: the
//! bridge owns a small tokio runtime that runs the subscriber reader task
//! and the bounded publish waits, while the foreground stays plain blocking
//! code.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::runtime::{Builder, Runtime};

use crate::config::BridgeConfig;
use crate::core::{BoardState, SharedBoard};
use crate::publisher::{CommandPublisher, PublishOutcome, Publisher};
use crate::supervisor::{BridgeEvents, Supervisor};

/// Running bridge instance.
pub struct Bridge {
    // Declared before the runtime so it is stopped while the runtime is still alive.
    supervisor: Supervisor,
    publisher: CommandPublisher,
    config: BridgeConfig,
    _rt: Runtime,
}

impl Bridge {
    /// Build the runtime and wire up supervisor and publisher. Does not start listening.
    pub fn new(config: BridgeConfig, events: Arc<dyn BridgeEvents>) -> Result<Self> {
        let rt = Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("ttt-bridge")
            .enable_all()
            .build()
            .context("failed to create bridge runtime")?;

        let supervisor = Supervisor::new(config.clone(), rt.handle().clone(), events);
        let publisher = CommandPublisher::new(config.clone(), rt.handle().clone());

        Ok(Self {
            supervisor,
            publisher,
            config,
            _rt: rt,
        })
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn supervisor(&self) -> &Supervisor {
        &self.supervisor
    }

    pub fn publisher(&self) -> &CommandPublisher {
        &self.publisher
    }

    pub fn board(&self) -> &SharedBoard {
        self.supervisor.board()
    }

    /// Copy of the mirrored board
    pub fn snapshot(&self) -> BoardState {
        self.supervisor.board().snapshot()
    }

    pub fn start_listener(&self) -> Result<()> {
        self.supervisor.start()
    }

    pub fn stop_listener(&self) {
        self.supervisor.stop()
    }

    pub fn is_listening(&self) -> bool {
        self.supervisor.is_running()
    }
}

impl Publisher for Bridge {
    fn publish(&self, message: &str) -> PublishOutcome {
        self.publisher.publish(message)
    }
}
