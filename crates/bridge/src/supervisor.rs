//! Subscriber process supervisor
//!
//! Owns the long-lived subscriber process and the one reader task that
//! drains its stdout. The reader frames the stream into lines, splits each
//! line into `(topic, payload)` and reduces it into the shared board.
//!
//! Lifecycle: `Stopped -> Running -> Stopped`. [`Supervisor::start`] and
//! [`Supervisor::stop`] are idempotent. The running flag, the child process
//! and the reader task live together in one [`Session`] that is swapped in
//! and out under a single lock, so no caller ever sees half of a session.

use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;
use tokio::process::{Child, ChildStdout, Command};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::config::BridgeConfig;
use crate::core::framer::split_event;
use crate::core::{apply, BoardState, LineFramer, Notice, RouteOutcome, SharedBoard};

/// Size of a single read from the subscriber pipe
const READ_CHUNK: usize = 4096;

/// Observer for what the reader task applies.
///
/// Callbacks run on the bridge runtime, outside the board lock.
pub trait BridgeEvents: Send + Sync {
    /// Grid or current player changed
    fn board_changed(&self, board: &BoardState);

    /// Status or moves announcement
    fn notice(&self, notice: &Notice);

    /// The subscriber closed its output while the listener was running
    fn stream_ended(&self) {}
}

/// Observer that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEvents;

impl BridgeEvents for NoopEvents {
    fn board_changed(&self, _board: &BoardState) {}
    fn notice(&self, _notice: &Notice) {}
}

/// Arguments for subscribing to everything under the topic root, verbose (`topic payload`) output
pub fn subscriber_args(config: &BridgeConfig) -> Vec<String> {
    let mut args = config.broker_args();
    args.push("-t".to_string());
    args.push(config.subscribe_pattern());
    args.push("-v".to_string());
    args
}

/// One running subscriber: process, reader task and the flag that keeps the reader going
struct Session {
    child: Child,
    reader: JoinHandle<()>,
    running: Arc<AtomicBool>,
}

impl Session {
    fn is_live(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

/// Everything the reader task needs, moved into it at start
struct ReaderContext {
    topic_root: String,
    poll_interval: Duration,
    max_fragment: usize,
    board: SharedBoard,
    events: Arc<dyn BridgeEvents>,
    running: Arc<AtomicBool>,
}

impl ReaderContext {
    async fn run(self, mut stdout: ChildStdout) {
        let mut framer = LineFramer::with_max_fragment(self.max_fragment);
        let mut buf = vec![0u8; READ_CHUNK];
        let mut ended = false;

        while self.running.load(Ordering::Acquire) {
            match tokio::time::timeout(self.poll_interval, stdout.read(&mut buf)).await {
                // Nothing this interval; go check the flag again.
                Err(_) => continue,
                Ok(Ok(0)) => {
                    log::debug!("subscriber output closed");
                    ended = true;
                    break;
                }
                Ok(Ok(n)) => {
                    for line in framer.feed(&buf[..n]) {
                        self.dispatch(&line);
                    }
                }
                Ok(Err(e)) => {
                    log::warn!("subscriber read failed: {}", e);
                    ended = true;
                    break;
                }
            }
        }

        // Only report an end the supervisor did not ask for.
        if ended && self.running.swap(false, Ordering::AcqRel) {
            self.events.stream_ended();
        }
        if framer.pending() > 0 {
            log::debug!("discarding {} byte partial line", framer.pending());
        }
    }

    fn dispatch(&self, line: &str) {
        let Some((topic, payload)) = split_event(line) else {
            log::trace!("ignoring line without payload: {:?}", line);
            return;
        };

        let (outcome, snapshot) = {
            let mut board = self.board.lock();
            let outcome = apply(&mut board, &self.topic_root, topic, payload);
            (outcome, *board)
        };

        match outcome {
            RouteOutcome::BoardChanged => self.events.board_changed(&snapshot),
            RouteOutcome::Notice(notice) => self.events.notice(&notice),
            RouteOutcome::Ignored => log::trace!("ignored {} {:?}", topic, payload),
        }
    }
}

/// Supervises the subscriber process and owns the mirrored board
pub struct Supervisor {
    config: BridgeConfig,
    handle: Handle,
    board: SharedBoard,
    events: Arc<dyn BridgeEvents>,
    session: Mutex<Option<Session>>,
}

impl Supervisor {
    pub fn new(config: BridgeConfig, handle: Handle, events: Arc<dyn BridgeEvents>) -> Self {
        Self {
            config,
            handle,
            board: SharedBoard::new(),
            events,
            session: Mutex::new(None),
        }
    }

    fn lock_session(&self) -> MutexGuard<'_, Option<Session>> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Handle to the board the reader task writes into
    pub fn board(&self) -> &SharedBoard {
        &self.board
    }

    /// True while a subscriber is running and its output is still open
    pub fn is_running(&self) -> bool {
        self.lock_session().as_ref().is_some_and(Session::is_live)
    }

    /// Process id of the current subscriber, if one is running
    pub fn pid(&self) -> Option<u32> {
        self.lock_session()
            .as_ref()
            .filter(|s| s.is_live())
            .and_then(|s| s.child.id())
    }

    /// Spawn the subscriber and its reader task. No-op if already running.
    ///
    /// A session whose output already ended is reaped first. Spawn failure leaves the
    /// supervisor stopped.
    pub fn start(&self) -> Result<()> {
        let stale = {
            let mut slot = self.lock_session();
            if slot.as_ref().is_some_and(Session::is_live) {
                return Ok(());
            }
            slot.take()
        };
        if let Some(stale) = stale {
            self.shutdown(stale);
        }

        let mut slot = self.lock_session();
        if slot.as_ref().is_some_and(Session::is_live) {
            return Ok(());
        }

        let mut cmd = Command::new(&self.config.subscriber_program);
        cmd.args(subscriber_args(&self.config))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let mut child = {
            let _rt = self.handle.enter();
            cmd.spawn().with_context(|| {
                format!(
                    "failed to start subscriber `{}`",
                    self.config.subscriber_program
                )
            })?
        };
        let stdout = child
            .stdout
            .take()
            .context("subscriber stdout was not captured")?;

        let running = Arc::new(AtomicBool::new(true));
        let ctx = ReaderContext {
            topic_root: self.config.topic_root.clone(),
            poll_interval: self.config.poll_interval(),
            max_fragment: self.config.max_fragment_bytes,
            board: self.board.clone(),
            events: Arc::clone(&self.events),
            running: Arc::clone(&running),
        };
        let reader = self.handle.spawn(ctx.run(stdout));

        log::info!(
            "subscriber started (pid {:?}) on {}",
            child.id(),
            self.config.subscribe_pattern()
        );

        *slot = Some(Session {
            child,
            reader,
            running,
        });
        Ok(())
    }

    /// Stop the reader, kill the subscriber and reap it. No-op if already stopped.
    ///
    /// Blocks the calling thread; must not be called from inside the bridge runtime.
    pub fn stop(&self) {
        let Some(session) = self.lock_session().take() else {
            return;
        };
        self.shutdown(session);
        log::info!("subscriber stopped");
    }

    fn shutdown(&self, session: Session) {
        let Session {
            mut child,
            reader,
            running,
        } = session;
        running.store(false, Ordering::Release);

        // The reader notices the flag within one poll interval.
        let reader_grace = self.config.poll_interval() * 5;

        self.handle.block_on(async move {
            if let Err(e) = child.start_kill() {
                log::debug!("subscriber already exited: {}", e);
            }
            match child.wait().await {
                Ok(status) => log::debug!("subscriber exited: {}", status),
                Err(e) => log::warn!("failed to reap subscriber: {}", e),
            }

            let abort = reader.abort_handle();
            if tokio::time::timeout(reader_grace, reader).await.is_err() {
                log::warn!("subscriber reader did not stop in time, aborting");
                abort.abort();
            }
        });
    }
}

impl Drop for Supervisor {
    fn drop(&mut self) {
        self.stop();
    }
}
