//! Client-side core for driving a sketch-tooling daemon over gRPC.
//!
//! One shared channel to the daemon carries everything: session lifecycle
//! (`Init`/`Destroy`), streaming commands (compile, upload, catalog
//! installs, board watching), index freshness bookkeeping and the settings
//! service. [`CoreBridge`] wires the pieces together; each piece is also
//! usable on its own against any [`CoreTransport`].

pub mod diagnostics;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod index;
pub mod session;
pub mod settings;
pub mod store;
pub mod transport;

use std::sync::Arc;

use tonic::transport::Channel;

pub use crate::dispatch::{
    BoardEvent, CommandDispatcher, CommandEvent, CommandHandle, CommandOutput, CompileOptions,
    OutputChunk, OutputSource, UploadOptions,
};
pub use crate::error::ClientError;
pub use crate::events::{IndexUpdateEvent, InitWarning, Notifier};
pub use crate::index::{IndexKind, IndexState, IndexUpdateScheduler};
pub use crate::session::SessionManager;
pub use crate::settings::Settings;
pub use crate::store::{FileUpdateTimeStore, MemoryUpdateTimeStore, UpdateTimeStore};
pub use crate::transport::{CoreTransport, GrpcTransport, MsgStream};

pub use scb_proto::scb::commands::v1 as proto;

/// Everything a frontend needs to talk to one daemon.
pub struct CoreBridge {
    session: Arc<SessionManager>,
    dispatcher: Arc<CommandDispatcher>,
    scheduler: IndexUpdateScheduler,
    notifier: Arc<Notifier>,
    settings: Settings,
}

impl CoreBridge {
    /// Connects to the daemon at `addr` (host:port) and assembles the full
    /// client stack over one multiplexed channel.
    pub async fn connect(addr: &str) -> Result<Self, ClientError> {
        let channel = scb_util::connect(addr).await?;
        Ok(Self::with_channel(channel))
    }

    pub fn with_channel(channel: Channel) -> Self {
        scb_telemetry::init_with_env("scb-client", env!("CARGO_PKG_VERSION"));
        let notifier = Arc::new(Notifier::default());
        let transport: Arc<dyn CoreTransport> = Arc::new(GrpcTransport::new(channel.clone()));
        let session = Arc::new(SessionManager::new(transport.clone(), notifier.clone()));
        let dispatcher = Arc::new(CommandDispatcher::new(
            transport,
            session.clone(),
            notifier.clone(),
        ));
        let scheduler = IndexUpdateScheduler::new(
            dispatcher.clone(),
            Arc::new(FileUpdateTimeStore::new(FileUpdateTimeStore::default_path())),
            notifier.clone(),
        );
        let settings = Settings::new(channel);
        Self {
            session,
            dispatcher,
            scheduler,
            notifier,
            settings,
        }
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    pub fn dispatcher(&self) -> &Arc<CommandDispatcher> {
        &self.dispatcher
    }

    pub fn scheduler(&self) -> &IndexUpdateScheduler {
        &self.scheduler
    }

    pub fn notifier(&self) -> &Arc<Notifier> {
        &self.notifier
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Tears down the daemon instance. Safe to call more than once.
    pub async fn shutdown(&self) -> Result<(), ClientError> {
        self.session.destroy_instance().await
    }
}
