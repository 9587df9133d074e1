// src/surface/queue.rs
// The surface is not thread-safe. One task owns it; everyone else talks to
// it through a command channel and gets completion only after the owning
// task actually ran the command.
use crate::surface::controller::{SurfaceSettings, SurfaceSnapshot, WebViewSurface};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;

const COMMAND_BUFFER: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("surface unavailable: the embedded view has not been created")]
    Unavailable,

    #[error("surface queue is closed")]
    Closed,
}

enum SurfaceCommand {
    Attach {
        reply: oneshot::Sender<()>,
    },
    Detach {
        reply: oneshot::Sender<()>,
    },
    ApplySettings {
        settings: SurfaceSettings,
        reply: oneshot::Sender<Result<SurfaceSettings, SurfaceError>>,
    },
    SubmitScript {
        script: String,
        reply: oneshot::Sender<Result<(), SurfaceError>>,
    },
    Snapshot {
        reply: oneshot::Sender<Result<SurfaceSnapshot, SurfaceError>>,
    },
}

/// Cloneable sender half bound to the task that owns the surface.
#[derive(Clone)]
pub struct SurfaceHandle {
    tx: mpsc::Sender<SurfaceCommand>,
}

pub struct SurfaceQueue;

impl SurfaceQueue {
    /// Spawn the owning task. The surface itself does not exist until
    /// [`SurfaceHandle::attach`] reports the embedded view as created;
    /// until then every mutation answers `Unavailable`.
    pub fn spawn() -> (SurfaceHandle, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel(COMMAND_BUFFER);

        let task = tokio::spawn(async move {
            let mut surface: Option<WebViewSurface> = None;

            while let Some(command) = rx.recv().await {
                match command {
                    SurfaceCommand::Attach { reply } => {
                        if surface.is_none() {
                            debug!("Embedded view created, surface attached");
                            surface = Some(WebViewSurface::new());
                        }
                        let _ = reply.send(());
                    }
                    SurfaceCommand::Detach { reply } => {
                        if surface.take().is_some() {
                            debug!("Surface detached");
                        }
                        let _ = reply.send(());
                    }
                    SurfaceCommand::ApplySettings { settings, reply } => {
                        let result = match surface.as_mut() {
                            Some(view) => Ok(view.apply_settings(settings)),
                            None => Err(SurfaceError::Unavailable),
                        };
                        let _ = reply.send(result);
                    }
                    SurfaceCommand::SubmitScript { script, reply } => {
                        let result = match surface.as_mut() {
                            Some(view) => {
                                view.submit_script(script);
                                Ok(())
                            }
                            None => Err(SurfaceError::Unavailable),
                        };
                        let _ = reply.send(result);
                    }
                    SurfaceCommand::Snapshot { reply } => {
                        let result = match surface.as_ref() {
                            Some(view) => Ok(view.snapshot()),
                            None => Err(SurfaceError::Unavailable),
                        };
                        let _ = reply.send(result);
                    }
                }
            }

            debug!("Surface queue stopped");
        });

        (SurfaceHandle { tx }, task)
    }
}

impl SurfaceHandle {
    /// Mark the embedded view as created. Idempotent; an already attached
    /// surface keeps its state.
    pub async fn attach(&self) -> Result<(), SurfaceError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(SurfaceCommand::Attach { reply })
            .await
            .map_err(|_| SurfaceError::Closed)?;
        rx.await.map_err(|_| SurfaceError::Closed)
    }

    /// Drop the embedded view. Later mutations answer `Unavailable` again.
    pub async fn detach(&self) -> Result<(), SurfaceError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(SurfaceCommand::Detach { reply })
            .await
            .map_err(|_| SurfaceError::Closed)?;
        rx.await.map_err(|_| SurfaceError::Closed)
    }

    /// Apply an interaction settings block on the owning task and return
    /// the resulting settings state.
    pub async fn apply_settings(
        &self,
        settings: SurfaceSettings,
    ) -> Result<SurfaceSettings, SurfaceError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(SurfaceCommand::ApplySettings { settings, reply })
            .await
            .map_err(|_| SurfaceError::Closed)?;
        rx.await.map_err(|_| SurfaceError::Closed)?
    }

    /// Submit a script into the hosted content's execution context.
    pub async fn submit_script(&self, script: impl Into<String>) -> Result<(), SurfaceError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(SurfaceCommand::SubmitScript {
                script: script.into(),
                reply,
            })
            .await
            .map_err(|_| SurfaceError::Closed)?;
        rx.await.map_err(|_| SurfaceError::Closed)?
    }

    pub async fn snapshot(&self) -> Result<SurfaceSnapshot, SurfaceError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(SurfaceCommand::Snapshot { reply })
            .await
            .map_err(|_| SurfaceError::Closed)?;
        rx.await.map_err(|_| SurfaceError::Closed)?
    }
}
