use std::sync::Arc;

use futures_util::StreamExt;
use scb_proto::scb::commands::v1::{DestroyRequest, InitRequest, Instance};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::ClientError;
use crate::events::{InitWarning, Notifier};
use crate::transport::CoreTransport;

/// Owns the one live daemon instance handle for this process.
///
/// The handle is created lazily by [`ensure_instance`], torn down by
/// [`destroy_instance`] and thrown away by [`invalidate`] when the daemon
/// stopped recognizing it. The mutex is held across `Init` so concurrent
/// callers can never race two instances into existence.
///
/// [`ensure_instance`]: SessionManager::ensure_instance
/// [`destroy_instance`]: SessionManager::destroy_instance
/// [`invalidate`]: SessionManager::invalidate
pub struct SessionManager {
    transport: Arc<dyn CoreTransport>,
    notifier: Arc<Notifier>,
    config_file: String,
    current: Mutex<Option<Instance>>,
}

impl SessionManager {
    pub fn new(transport: Arc<dyn CoreTransport>, notifier: Arc<Notifier>) -> Self {
        Self {
            transport,
            notifier,
            config_file: String::new(),
            current: Mutex::new(None),
        }
    }

    /// Points `Init` at a non-default daemon configuration file.
    pub fn with_config_file(mut self, config_file: impl Into<String>) -> Self {
        self.config_file = config_file.into();
        self
    }

    /// Returns the live instance, creating one if none exists. Repeated
    /// calls without an intervening invalidate/destroy return the same
    /// handle and never issue a second `Init`.
    pub async fn ensure_instance(&self) -> Result<Instance, ClientError> {
        let mut guard = self.current.lock().await;
        if let Some(instance) = *guard {
            return Ok(instance);
        }
        let instance = self.create_instance().await?;
        *guard = Some(instance);
        Ok(instance)
    }

    async fn create_instance(&self) -> Result<Instance, ClientError> {
        debug!("initializing daemon instance");
        let mut stream = self
            .transport
            .init(InitRequest {
                config_file: self.config_file.clone(),
            })
            .await
            .map_err(ClientError::from_status)?;

        let mut instance = None;
        while let Some(message) = stream.next().await {
            let message = message.map_err(ClientError::from_status)?;
            if let Some(progress) = message.download_progress {
                self.notifier.download.publish(progress);
            }
            if let Some(progress) = message.task_progress {
                self.notifier.task.publish(progress);
            }
            // Index and configuration problems during Init are warnings,
            // not failures: a corrupt index must not block startup.
            for error in message.platforms_index_errors {
                warn!("platform index failed to load: {error}");
                self.notifier
                    .init_warnings
                    .publish(InitWarning::PlatformIndex(error));
            }
            if let Some(error) = message.libraries_index_error {
                warn!("library index failed to load: {error}");
                self.notifier
                    .init_warnings
                    .publish(InitWarning::LibraryIndex(error));
            }
            for warning in message.config_warnings {
                warn!("daemon configuration warning: {warning}");
                self.notifier
                    .init_warnings
                    .publish(InitWarning::Config(warning));
            }
            if let Some(handle) = message.instance {
                instance = Some(handle);
            }
        }

        let instance = instance.ok_or(ClientError::InitIncomplete)?;
        info!(id = instance.id, "daemon instance ready");
        scb_telemetry::event("session.init", &[("instance", &instance.id.to_string())]);
        Ok(instance)
    }

    /// Destroys the live instance, if any. Idempotent: with no live handle
    /// this is a no-op and no daemon `Destroy` call is made.
    pub async fn destroy_instance(&self) -> Result<(), ClientError> {
        let mut guard = self.current.lock().await;
        let Some(instance) = guard.take() else {
            return Ok(());
        };
        if let Err(status) = self
            .transport
            .destroy(DestroyRequest {
                instance: Some(instance),
            })
            .await
        {
            let error = ClientError::from_status(status);
            // A rejected Destroy leaves the daemon-side instance alive, so
            // keep the handle for a retry. Transport and stale-instance
            // failures mean the handle is gone either way.
            if !error.invalidates_session() {
                *guard = Some(instance);
            }
            return Err(error);
        }
        info!(id = instance.id, "daemon instance destroyed");
        scb_telemetry::event("session.destroy", &[]);
        Ok(())
    }

    /// Drops the local handle after the daemon stopped recognizing it.
    /// The next `ensure_instance` call re-creates the session.
    pub async fn invalidate(&self) {
        let mut guard = self.current.lock().await;
        if guard.take().is_some() {
            warn!("daemon instance invalidated; next command will re-initialize");
        }
    }

    pub async fn current(&self) -> Option<Instance> {
        *self.current.lock().await
    }
}
