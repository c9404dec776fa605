//! Runtime services and shared state for the clinic desk.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, instrument};

use crate::{
    base::{config::Config, types::Void},
    interaction::desk::{Desk, Reply},
    service::{clock::Clock, identity::IdentityClient, queue::QueueClient},
};

/// Runtime service context that can be shared across the application.
///
/// Created once at process start and dropped at process end; it owns the
/// pending queue and the account table. It is designed to be trivially
/// cloneable, allowing it to be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The triage queue.
    pub queue: QueueClient,
    /// The identity provider.
    pub identity: IdentityClient,
    /// The clock used to stamp requests.
    pub clock: Clock,
}

impl Runtime {
    /// Create a new runtime instance backed by in-memory services.
    #[instrument(skip_all)]
    pub fn new(config: Config) -> Self {
        let queue = QueueClient::memory();
        let identity = IdentityClient::memory(&config);
        let clock = Clock::system();

        info!("Runtime initialized with {} staff accounts.", config.staff.len());

        Self { config, queue, identity, clock }
    }

    /// Runs the desk over stdin/stdout until EOF, `quit`, or Ctrl-C.
    pub async fn start(&self) -> Void {
        let mut desk = Desk::new(self.clone());
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        stdout.write_all(b"Clinic check-in desk. Type `help` for commands.\n").await?;

        loop {
            stdout.write_all(b"> ").await?;
            stdout.flush().await?;

            let line = tokio::select! {
                line = lines.next_line() => line?,
                _ = tokio::signal::ctrl_c() => None,
            };

            let Some(line) = line else {
                info!("Input closed, shutting down.");
                break;
            };

            match desk.handle_line(&line).await {
                Some(Reply::Message(text)) => stdout.write_all(format!("{text}\n").as_bytes()).await?,
                Some(Reply::Quit(text)) => {
                    stdout.write_all(format!("{text}\n").as_bytes()).await?;
                    break;
                }
                None => {}
            }
        }

        stdout.flush().await?;

        Ok(())
    }
}
