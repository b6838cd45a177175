//! Outbound publishing through a short-lived publisher process.
//!
//! Each message runs `<publisher> -h <host> [-p <port>] -t <root> -m <message>`,
//! waits a bounded time for it to exit, then pauses briefly so the broker
//! round-trip can land before the caller moves on. A publisher that is still
//! running when the wait expires is left to finish on its own.

use std::fmt;
use std::process::Stdio;
use std::sync::Mutex;

use tokio::process::Command;
use tokio::runtime::Handle;

use crate::config::BridgeConfig;

/// What happened to one publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Publisher exited with status 0
    Delivered,
    /// Publisher exited unsuccessfully; `code` is `None` when killed by a signal
    Failed { code: Option<i32> },
    /// Publisher was still running when the wait expired
    TimedOut,
    /// Publisher could not be started or waited on
    SpawnFailed(String),
}

impl PublishOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PublishOutcome::Delivered)
    }
}

impl fmt::Display for PublishOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishOutcome::Delivered => write!(f, "delivered"),
            PublishOutcome::Failed { code: Some(code) } => {
                write!(f, "publisher exited with status {}", code)
            }
            PublishOutcome::Failed { code: None } => write!(f, "publisher killed by signal"),
            PublishOutcome::TimedOut => write!(f, "publisher still running after timeout"),
            PublishOutcome::SpawnFailed(reason) => write!(f, "could not run publisher ({})", reason),
        }
    }
}

/// Sends one message to the topic root
pub trait Publisher {
    fn publish(&self, message: &str) -> PublishOutcome;
}

/// Arguments for publishing `message` to the configured topic root
pub fn publisher_args(config: &BridgeConfig, message: &str) -> Vec<String> {
    let mut args = config.broker_args();
    args.push("-t".to_string());
    args.push(config.topic_root.clone());
    args.push("-m".to_string());
    args.push(message.to_string());
    args
}

/// [`Publisher`] backed by the external publisher executable
#[derive(Debug, Clone)]
pub struct CommandPublisher {
    config: BridgeConfig,
    handle: Handle,
}

impl CommandPublisher {
    pub fn new(config: BridgeConfig, handle: Handle) -> Self {
        Self { config, handle }
    }

    async fn run(&self, message: &str) -> PublishOutcome {
        let mut cmd = Command::new(&self.config.publisher_program);
        cmd.args(publisher_args(&self.config, message))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                return PublishOutcome::SpawnFailed(format!(
                    "{}: {}",
                    self.config.publisher_program, e
                ))
            }
        };

        match tokio::time::timeout(self.config.publish_timeout(), child.wait()).await {
            Ok(Ok(status)) if status.success() => PublishOutcome::Delivered,
            Ok(Ok(status)) => PublishOutcome::Failed {
                code: status.code(),
            },
            Ok(Err(e)) => PublishOutcome::SpawnFailed(format!(
                "{}: {}",
                self.config.publisher_program, e
            )),
            Err(_) => PublishOutcome::TimedOut,
        }
    }
}

impl Publisher for CommandPublisher {
    /// Blocks the calling thread; must not be called from inside the bridge runtime.
    fn publish(&self, message: &str) -> PublishOutcome {
        log::debug!("publishing {:?} to {}", message, self.config.topic_root);

        let outcome = self.handle.block_on(async {
            let outcome = self.run(message).await;
            tokio::time::sleep(self.config.settle_delay()).await;
            outcome
        });

        if !outcome.is_success() {
            log::warn!("publish of {:?} did not succeed: {:?}", message, outcome);
        }
        outcome
    }
}

/// In-memory [`Publisher`] that records messages instead of running anything.
///
/// Used to drive the game loop in tests.
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    sent: Mutex<Vec<String>>,
    outcome: Option<PublishOutcome>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorder that reports `outcome` for every publish
    pub fn failing_with(outcome: PublishOutcome) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            outcome: Some(outcome),
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Publisher for RecordingPublisher {
    fn publish(&self, message: &str) -> PublishOutcome {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.to_string());
        self.outcome.clone().unwrap_or(PublishOutcome::Delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::runtime::Runtime;

    fn config_with(program: &str) -> BridgeConfig {
        BridgeConfig {
            publisher_program: program.to_string(),
            settle_delay_ms: 0,
            ..BridgeConfig::default()
        }
    }

    #[test]
    fn test_publisher_args_encode_topic_and_payload() {
        let config = BridgeConfig::default();
        assert_eq!(
            publisher_args(&config, "2,3"),
            vec!["-h", "localhost", "-t", "TTT", "-m", "2,3"]
        );
    }

    #[test]
    fn test_publisher_args_keep_payload_as_single_argument() {
        let config = BridgeConfig::default();
        let args = publisher_args(&config, "X wins \"quoted\"");
        assert_eq!(args.last().map(String::as_str), Some("X wins \"quoted\""));
        assert_eq!(args.iter().filter(|a| *a == "-m").count(), 1);
    }

    #[test]
    fn test_recording_publisher() {
        let publisher = RecordingPublisher::new();
        assert!(publisher.publish("1,1").is_success());
        assert!(publisher.publish("r").is_success());
        assert_eq!(publisher.sent(), vec!["1,1", "r"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_command_publisher_exit_status() {
        let rt = Runtime::new().unwrap();

        let ok = CommandPublisher::new(config_with("true"), rt.handle().clone());
        assert_eq!(ok.publish("2,3"), PublishOutcome::Delivered);

        let failing = CommandPublisher::new(config_with("false"), rt.handle().clone());
        assert_eq!(failing.publish("2,3"), PublishOutcome::Failed { code: Some(1) });
    }

    #[test]
    fn test_command_publisher_missing_program() {
        let rt = Runtime::new().unwrap();
        let publisher = CommandPublisher::new(
            config_with("/nonexistent/tictactoe-mqtt-publisher"),
            rt.handle().clone(),
        );
        assert!(matches!(
            publisher.publish("1,1"),
            PublishOutcome::SpawnFailed(_)
        ));
    }
}
