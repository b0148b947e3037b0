use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use catalog_core::{Effect, Msg};
use catalog_logging::{catalog_debug, catalog_error};
use tokio::sync::mpsc as command_channel;

use crate::{EffectExecutor, EngineConfig, FetchError};

enum EngineCommand {
    Execute(Effect),
}

/// Background executor for core effects.
///
/// Effects run as tasks on a single-threaded runtime owned by a dedicated thread;
/// resolution messages come back in completion order through [`EngineHandle::try_recv`].
/// Requests are never cancelled; the sessions drop stale answers.
pub struct EngineHandle {
    cmd_tx: command_channel::UnboundedSender<EngineCommand>,
    msg_rx: mpsc::Receiver<Msg>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, FetchError> {
        let executor = EffectExecutor::from_config(&config)?;
        Ok(Self::with_executor(executor))
    }

    pub fn with_executor(executor: EffectExecutor) -> Self {
        let (cmd_tx, mut cmd_rx) = command_channel::unbounded_channel();
        let (msg_tx, msg_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    catalog_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            runtime.block_on(async move {
                while let Some(command) = cmd_rx.recv().await {
                    let executor = executor.clone();
                    let msg_tx = msg_tx.clone();
                    tokio::spawn(async move {
                        handle_command(&executor, command, msg_tx).await;
                    });
                }
            });
        });

        Self { cmd_tx, msg_rx }
    }

    pub fn dispatch(&self, effects: Vec<Effect>) {
        for effect in effects {
            catalog_debug!("Dispatching {:?}", effect);
            if self.cmd_tx.send(EngineCommand::Execute(effect)).is_err() {
                catalog_error!("Engine runtime is gone; effect dropped");
            }
        }
    }

    pub fn try_recv(&self) -> Option<Msg> {
        self.msg_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<Msg> {
        self.msg_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    executor: &EffectExecutor,
    command: EngineCommand,
    msg_tx: mpsc::Sender<Msg>,
) {
    match command {
        EngineCommand::Execute(effect) => {
            let msg = executor.execute(effect).await;
            let _ = msg_tx.send(msg);
        }
    }
}
