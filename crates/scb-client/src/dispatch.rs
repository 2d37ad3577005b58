//! Streaming command dispatcher.
//!
//! Each logical command (compile, upload, update-index, install, board-list
//! watch) opens its own daemon stream scoped to the session instance. The
//! dispatcher pumps that stream on a task, folds messages through a
//! [`StreamCollector`] strictly in arrival order, forwards progress to the
//! shared [`Notifier`], and settles the command with a typed result when the
//! stream ends. Commands are independent: concurrent streams never share
//! buffers and cancelling one never touches another.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use futures_util::StreamExt;
use scb_proto::scb::commands::v1::*;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::ClientError;
use crate::events::Notifier;
use crate::session::SessionManager;
use crate::transport::{CoreTransport, MsgStream};

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Incremental progress emitted while a command is in flight.
#[derive(Clone, Debug)]
pub enum CommandEvent {
    Download(DownloadProgress),
    Task(TaskProgress),
    Output(OutputChunk),
    Board(BoardEvent),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputSource {
    Stdout,
    Stderr,
}

/// One raw output chunk, exactly as the daemon sent it.
#[derive(Clone, Debug)]
pub struct OutputChunk {
    pub source: OutputSource,
    pub data: Vec<u8>,
}

#[derive(Clone, Debug)]
pub enum BoardEvent {
    Add(DetectedPort),
    Remove(DetectedPort),
    Error(String),
}

/// Final output of a compile/upload command. Chunks are appended in arrival
/// order and never re-sorted; `combined` interleaves both sources the way
/// the daemon emitted them, which is what the error extractor scans.
#[derive(Clone, Debug, Default)]
pub struct CommandOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub combined: Vec<u8>,
}

impl CommandOutput {
    fn absorb(&mut self, source: OutputSource, data: &[u8], events: &mut Vec<CommandEvent>) {
        if data.is_empty() {
            return;
        }
        match source {
            OutputSource::Stdout => self.stdout.extend_from_slice(data),
            OutputSource::Stderr => self.stderr.extend_from_slice(data),
        }
        self.combined.extend_from_slice(data);
        events.push(CommandEvent::Output(OutputChunk {
            source,
            data: data.to_vec(),
        }));
    }
}

/// Folds one command's stream messages, in order, into its outcome.
pub trait StreamCollector: Send + 'static {
    type Msg: Send + 'static;
    type Outcome: Send + 'static;

    fn absorb(&mut self, message: Self::Msg, events: &mut Vec<CommandEvent>);
    fn finish(self) -> Self::Outcome;
}

#[derive(Default)]
struct CompileCollector {
    output: CommandOutput,
}

impl StreamCollector for CompileCollector {
    type Msg = CompileResponse;
    type Outcome = CommandOutput;

    fn absorb(&mut self, message: CompileResponse, events: &mut Vec<CommandEvent>) {
        self.output
            .absorb(OutputSource::Stdout, &message.out_stream, events);
        self.output
            .absorb(OutputSource::Stderr, &message.err_stream, events);
        if let Some(progress) = message.download_progress {
            events.push(CommandEvent::Download(progress));
        }
        if let Some(progress) = message.task_progress {
            events.push(CommandEvent::Task(progress));
        }
    }

    fn finish(self) -> CommandOutput {
        self.output
    }
}

#[derive(Default)]
struct UploadCollector {
    output: CommandOutput,
}

impl StreamCollector for UploadCollector {
    type Msg = UploadResponse;
    type Outcome = CommandOutput;

    fn absorb(&mut self, message: UploadResponse, events: &mut Vec<CommandEvent>) {
        self.output
            .absorb(OutputSource::Stdout, &message.out_stream, events);
        self.output
            .absorb(OutputSource::Stderr, &message.err_stream, events);
        if let Some(progress) = message.task_progress {
            events.push(CommandEvent::Task(progress));
        }
    }

    fn finish(self) -> CommandOutput {
        self.output
    }
}

#[derive(Default)]
struct IndexCollector {
    confirmed: Vec<String>,
}

impl StreamCollector for IndexCollector {
    type Msg = UpdateIndexResponse;
    type Outcome = Vec<String>;

    fn absorb(&mut self, message: UpdateIndexResponse, events: &mut Vec<CommandEvent>) {
        if let Some(progress) = message.download_progress {
            events.push(CommandEvent::Download(progress));
        }
        if let Some(progress) = message.task_progress {
            events.push(CommandEvent::Task(progress));
        }
        if let Some(updated) = message.updated_type {
            self.confirmed.push(updated);
        }
    }

    fn finish(self) -> Vec<String> {
        self.confirmed
    }
}

#[derive(Default)]
struct PlatformInstallCollector;

impl StreamCollector for PlatformInstallCollector {
    type Msg = PlatformInstallResponse;
    type Outcome = ();

    fn absorb(&mut self, message: PlatformInstallResponse, events: &mut Vec<CommandEvent>) {
        if let Some(progress) = message.download_progress {
            events.push(CommandEvent::Download(progress));
        }
        if let Some(progress) = message.task_progress {
            events.push(CommandEvent::Task(progress));
        }
    }

    fn finish(self) {}
}

#[derive(Default)]
struct LibraryInstallCollector;

impl StreamCollector for LibraryInstallCollector {
    type Msg = LibraryInstallResponse;
    type Outcome = ();

    fn absorb(&mut self, message: LibraryInstallResponse, events: &mut Vec<CommandEvent>) {
        if let Some(progress) = message.download_progress {
            events.push(CommandEvent::Download(progress));
        }
        if let Some(progress) = message.task_progress {
            events.push(CommandEvent::Task(progress));
        }
    }

    fn finish(self) {}
}

/// Keeps the client half of the board-list-watch stream open for as long as
/// the command runs; dropping it half-closes the request side.
struct WatchCollector {
    _requests: mpsc::Sender<BoardListWatchRequest>,
}

impl StreamCollector for WatchCollector {
    type Msg = BoardListWatchResponse;
    type Outcome = ();

    fn absorb(&mut self, message: BoardListWatchResponse, events: &mut Vec<CommandEvent>) {
        if !message.error.is_empty() {
            events.push(CommandEvent::Board(BoardEvent::Error(message.error)));
            return;
        }
        let Some(port) = message.port else {
            return;
        };
        match message.event_type.as_str() {
            "add" => events.push(CommandEvent::Board(BoardEvent::Add(port))),
            "remove" => events.push(CommandEvent::Board(BoardEvent::Remove(port))),
            other => warn!("unknown board watch event type: {other}"),
        }
    }

    fn finish(self) {}
}

/// Cancels one command without holding the whole handle.
#[derive(Clone)]
pub struct CommandCanceller {
    token: CancellationToken,
}

impl CommandCanceller {
    pub fn cancel(&self) {
        self.token.cancel();
    }
}

/// One in-flight command: an event feed plus a settling result.
pub struct CommandHandle<T> {
    id: Uuid,
    kind: &'static str,
    cancel: CancellationToken,
    events: mpsc::Receiver<CommandEvent>,
    task: JoinHandle<Result<T, ClientError>>,
}

impl<T> CommandHandle<T> {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn canceller(&self) -> CommandCanceller {
        CommandCanceller {
            token: self.cancel.clone(),
        }
    }

    /// Closes only this command's stream; other commands keep running.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Next progress event, or `None` once the stream has settled.
    pub async fn next_event(&mut self) -> Option<CommandEvent> {
        self.events.recv().await
    }

    /// Waits for the terminal result. Pending display events are dropped.
    pub async fn wait(mut self) -> Result<T, ClientError> {
        self.events.close();
        (&mut self.task).await?
    }
}

impl<T> Drop for CommandHandle<T> {
    fn drop(&mut self) {
        // An abandoned handle must not leak its stream.
        if !self.task.is_finished() {
            self.cancel.cancel();
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct CompileOptions {
    pub fqbn: String,
    pub sketch_path: PathBuf,
    pub verbose: bool,
    pub export_binaries: bool,
}

#[derive(Clone, Debug, Default)]
pub struct UploadOptions {
    pub fqbn: String,
    pub sketch_path: PathBuf,
    pub port: Option<Port>,
    pub verbose: bool,
    pub programmer: String,
}

pub struct CommandDispatcher {
    transport: Arc<dyn CoreTransport>,
    session: Arc<SessionManager>,
    notifier: Arc<Notifier>,
}

impl CommandDispatcher {
    pub fn new(
        transport: Arc<dyn CoreTransport>,
        session: Arc<SessionManager>,
        notifier: Arc<Notifier>,
    ) -> Self {
        Self {
            transport,
            session,
            notifier,
        }
    }

    pub async fn compile(
        &self,
        options: CompileOptions,
    ) -> Result<CommandHandle<CommandOutput>, ClientError> {
        let instance = self.session.ensure_instance().await?;
        let request = CompileRequest {
            instance: Some(instance),
            fqbn: options.fqbn,
            sketch_path: options.sketch_path.to_string_lossy().into_owned(),
            verbose: options.verbose,
            export_binaries: options.export_binaries,
        };
        match self.transport.compile(request).await {
            Ok(stream) => Ok(self.spawn("compile", stream, CompileCollector::default())),
            Err(status) => Err(self.classify(status).await),
        }
    }

    pub async fn upload(
        &self,
        options: UploadOptions,
    ) -> Result<CommandHandle<CommandOutput>, ClientError> {
        let instance = self.session.ensure_instance().await?;
        let request = UploadRequest {
            instance: Some(instance),
            fqbn: options.fqbn,
            sketch_path: options.sketch_path.to_string_lossy().into_owned(),
            port: options.port,
            verbose: options.verbose,
            programmer: options.programmer,
        };
        match self.transport.upload(request).await {
            Ok(stream) => Ok(self.spawn("upload", stream, UploadCollector::default())),
            Err(status) => Err(self.classify(status).await),
        }
    }

    /// Runs one coalesced index refresh; `index_types` carries every stale
    /// type in a single daemon call. Outcome is the list of types the
    /// daemon confirmed while streaming.
    pub async fn update_index(
        &self,
        index_types: Vec<String>,
    ) -> Result<CommandHandle<Vec<String>>, ClientError> {
        let instance = self.session.ensure_instance().await?;
        let request = UpdateIndexRequest {
            instance: Some(instance),
            index_types,
        };
        match self.transport.update_index(request).await {
            Ok(stream) => Ok(self.spawn("update-index", stream, IndexCollector::default())),
            Err(status) => Err(self.classify(status).await),
        }
    }

    pub async fn platform_install(
        &self,
        platform_package: String,
        architecture: String,
        version: String,
    ) -> Result<CommandHandle<()>, ClientError> {
        let instance = self.session.ensure_instance().await?;
        let request = PlatformInstallRequest {
            instance: Some(instance),
            platform_package,
            architecture,
            version,
        };
        match self.transport.platform_install(request).await {
            Ok(stream) => Ok(self.spawn(
                "platform-install",
                stream,
                PlatformInstallCollector::default(),
            )),
            Err(status) => Err(self.classify(status).await),
        }
    }

    pub async fn library_install(
        &self,
        name: String,
        version: String,
    ) -> Result<CommandHandle<()>, ClientError> {
        let instance = self.session.ensure_instance().await?;
        let request = LibraryInstallRequest {
            instance: Some(instance),
            name,
            version,
        };
        match self.transport.library_install(request).await {
            Ok(stream) => {
                Ok(self.spawn("library-install", stream, LibraryInstallCollector::default()))
            }
            Err(status) => Err(self.classify(status).await),
        }
    }

    /// Watches port attach/detach events until cancelled.
    pub async fn board_list_watch(&self) -> Result<CommandHandle<()>, ClientError> {
        let instance = self.session.ensure_instance().await?;
        let (requests_tx, requests_rx) = mpsc::channel(4);
        // Subscribe message; buffered, so the send cannot block.
        let _ = requests_tx
            .send(BoardListWatchRequest {
                instance: Some(instance),
                interrupt: false,
            })
            .await;
        match self
            .transport
            .board_list_watch(ReceiverStream::new(requests_rx).boxed())
            .await
        {
            Ok(stream) => Ok(self.spawn(
                "board-list-watch",
                stream,
                WatchCollector {
                    _requests: requests_tx,
                },
            )),
            Err(status) => Err(self.classify(status).await),
        }
    }

    pub async fn board_list(&self) -> Result<Vec<DetectedPort>, ClientError> {
        let instance = self.session.ensure_instance().await?;
        match self
            .transport
            .board_list(BoardListRequest {
                instance: Some(instance),
            })
            .await
        {
            Ok(response) => Ok(response.ports),
            Err(status) => Err(self.classify(status).await),
        }
    }

    pub async fn board_search(&self, search_args: String) -> Result<Vec<BoardListItem>, ClientError> {
        let instance = self.session.ensure_instance().await?;
        match self
            .transport
            .board_search(BoardSearchRequest {
                instance: Some(instance),
                search_args,
            })
            .await
        {
            Ok(response) => Ok(response.boards),
            Err(status) => Err(self.classify(status).await),
        }
    }

    pub async fn platform_search(
        &self,
        search_args: String,
        all_versions: bool,
    ) -> Result<Vec<Platform>, ClientError> {
        let instance = self.session.ensure_instance().await?;
        match self
            .transport
            .platform_search(PlatformSearchRequest {
                instance: Some(instance),
                search_args,
                all_versions,
            })
            .await
        {
            Ok(response) => Ok(response.search_output),
            Err(status) => Err(self.classify(status).await),
        }
    }

    pub async fn platform_list(&self, updatable_only: bool) -> Result<Vec<Platform>, ClientError> {
        let instance = self.session.ensure_instance().await?;
        match self
            .transport
            .platform_list(PlatformListRequest {
                instance: Some(instance),
                updatable_only,
            })
            .await
        {
            Ok(response) => Ok(response.installed_platforms),
            Err(status) => Err(self.classify(status).await),
        }
    }

    pub async fn library_search(&self, query: String) -> Result<Vec<SearchedLibrary>, ClientError> {
        let instance = self.session.ensure_instance().await?;
        match self
            .transport
            .library_search(LibrarySearchRequest {
                instance: Some(instance),
                query,
            })
            .await
        {
            Ok(response) => Ok(response.libraries),
            Err(status) => Err(self.classify(status).await),
        }
    }

    pub async fn library_list(
        &self,
        all: bool,
        updatable: bool,
    ) -> Result<Vec<InstalledLibrary>, ClientError> {
        let instance = self.session.ensure_instance().await?;
        match self
            .transport
            .library_list(LibraryListRequest {
                instance: Some(instance),
                all,
                updatable,
            })
            .await
        {
            Ok(response) => Ok(response.installed_libraries),
            Err(status) => Err(self.classify(status).await),
        }
    }

    /// Index refreshes the daemon already ran before this client attached,
    /// keyed by index type with RFC 3339 completion times.
    pub async fn index_update_summary(&self) -> Result<HashMap<String, String>, ClientError> {
        let instance = self.session.ensure_instance().await?;
        match self
            .transport
            .index_update_summary(IndexUpdateSummaryRequest {
                instance: Some(instance),
            })
            .await
        {
            Ok(response) => Ok(response.updated_at),
            Err(status) => Err(self.classify(status).await),
        }
    }

    async fn classify(&self, status: tonic::Status) -> ClientError {
        let error = ClientError::from_status(status);
        if error.invalidates_session() {
            self.session.invalidate().await;
        }
        error
    }

    fn spawn<C: StreamCollector>(
        &self,
        kind: &'static str,
        stream: MsgStream<C::Msg>,
        collector: C,
    ) -> CommandHandle<C::Outcome> {
        let id = Uuid::new_v4();
        let cancel = CancellationToken::new();
        let (events_tx, events_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        scb_telemetry::event("command.start", &[("kind", kind)]);
        let task = tokio::spawn(pump(
            kind,
            stream,
            collector,
            cancel.clone(),
            events_tx,
            Arc::clone(&self.session),
            Arc::clone(&self.notifier),
        ));
        CommandHandle {
            id,
            kind,
            cancel,
            events: events_rx,
            task,
        }
    }
}

async fn pump<C: StreamCollector>(
    kind: &'static str,
    mut stream: MsgStream<C::Msg>,
    mut collector: C,
    cancel: CancellationToken,
    events: mpsc::Sender<CommandEvent>,
    session: Arc<SessionManager>,
    notifier: Arc<Notifier>,
) -> Result<C::Outcome, ClientError> {
    let mut pending = Vec::new();
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!(kind, "command cancelled; closing its stream");
                // Dropping the stream is the transport-native cancellation;
                // no separate RPC is sent.
                drop(stream);
                scb_telemetry::event("command.cancelled", &[("kind", kind)]);
                return Err(ClientError::Cancelled);
            }
            next = stream.next() => match next {
                Some(Ok(message)) => {
                    pending.clear();
                    collector.absorb(message, &mut pending);
                    for event in pending.drain(..) {
                        match &event {
                            CommandEvent::Download(progress) => {
                                notifier.download.publish(progress.clone());
                            }
                            CommandEvent::Task(progress) => {
                                notifier.task.publish(progress.clone());
                            }
                            _ => {}
                        }
                        // Display feed is best effort; the collector keeps
                        // the authoritative buffers.
                        let _ = events.try_send(event);
                    }
                }
                Some(Err(status)) => {
                    let error = ClientError::from_status(status);
                    if error.invalidates_session() {
                        session.invalidate().await;
                    }
                    warn!(kind, error = %error, "command stream failed");
                    scb_telemetry::event("command.failed", &[("kind", kind)]);
                    return Err(error);
                }
                None => {
                    debug!(kind, "command stream completed");
                    scb_telemetry::event("command.finished", &[("kind", kind)]);
                    return Ok(collector.finish());
                }
            }
        }
    }
}
