#![allow(dead_code)]

//! Scripted in-process transport used by the integration tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::stream::{self, BoxStream};
use futures_util::StreamExt;
use tonic::Status;

use scb_client::proto::*;
use scb_client::{CoreTransport, MsgStream, Notifier, SessionManager};

/// One scripted answer to a streaming RPC: either a finite message batch
/// or a stream that stays open until the caller cancels.
pub enum Script<T> {
    Finite(Vec<Result<T, Status>>),
    Hang,
}

impl<T: Send + 'static> Script<T> {
    fn into_stream(self) -> MsgStream<T> {
        match self {
            Script::Finite(batch) => stream::iter(batch).boxed(),
            Script::Hang => stream::pending().boxed(),
        }
    }
}

type ScriptQueue<T> = std::sync::Mutex<VecDeque<Script<T>>>;

fn pop_or_empty<T: Send + 'static>(queue: &ScriptQueue<T>) -> MsgStream<T> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or(Script::Finite(Vec::new()))
        .into_stream()
}

#[derive(Default)]
pub struct FakeTransport {
    pub init_calls: AtomicUsize,
    pub destroy_calls: AtomicUsize,
    pub init_scripts: ScriptQueue<InitResponse>,
    pub compile_scripts: ScriptQueue<CompileResponse>,
    pub upload_scripts: ScriptQueue<UploadResponse>,
    pub update_index_scripts: ScriptQueue<UpdateIndexResponse>,
    pub watch_scripts: ScriptQueue<BoardListWatchResponse>,
    pub destroy_errors: std::sync::Mutex<VecDeque<Status>>,
    /// The `index_types` of every UpdateIndex request, in call order.
    pub update_index_requests: std::sync::Mutex<Vec<Vec<String>>>,
    pub summary: std::sync::Mutex<HashMap<String, String>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_init(&self, script: Script<InitResponse>) {
        self.init_scripts.lock().unwrap().push_back(script);
    }

    pub fn push_compile(&self, script: Script<CompileResponse>) {
        self.compile_scripts.lock().unwrap().push_back(script);
    }

    pub fn push_upload(&self, script: Script<UploadResponse>) {
        self.upload_scripts.lock().unwrap().push_back(script);
    }

    pub fn push_update_index(&self, script: Script<UpdateIndexResponse>) {
        self.update_index_scripts.lock().unwrap().push_back(script);
    }

    pub fn push_watch(&self, script: Script<BoardListWatchResponse>) {
        self.watch_scripts.lock().unwrap().push_back(script);
    }

    pub fn fail_next_destroy(&self, status: Status) {
        self.destroy_errors.lock().unwrap().push_back(status);
    }

    pub fn set_summary(&self, entries: &[(&str, &str)]) {
        let mut summary = self.summary.lock().unwrap();
        summary.clear();
        for (kind, stamp) in entries {
            summary.insert(kind.to_string(), stamp.to_string());
        }
    }

    pub fn init_count(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }

    pub fn destroy_count(&self) -> usize {
        self.destroy_calls.load(Ordering::SeqCst)
    }
}

/// Terminal Init message carrying the instance handle.
pub fn init_done(id: i32) -> InitResponse {
    InitResponse {
        instance: Some(Instance { id }),
        ..Default::default()
    }
}

pub fn compile_out(data: &[u8]) -> CompileResponse {
    CompileResponse {
        out_stream: data.to_vec(),
        ..Default::default()
    }
}

pub fn compile_err(data: &[u8]) -> CompileResponse {
    CompileResponse {
        err_stream: data.to_vec(),
        ..Default::default()
    }
}

#[async_trait]
impl CoreTransport for FakeTransport {
    async fn init(&self, _request: InitRequest) -> Result<MsgStream<InitResponse>, Status> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        let script = self.init_scripts.lock().unwrap().pop_front();
        match script {
            Some(script) => Ok(script.into_stream()),
            None => Ok(stream::iter([Ok(init_done(1))]).boxed()),
        }
    }

    async fn destroy(&self, _request: DestroyRequest) -> Result<DestroyResponse, Status> {
        self.destroy_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = self.destroy_errors.lock().unwrap().pop_front() {
            return Err(status);
        }
        Ok(DestroyResponse {})
    }

    async fn update_index(
        &self,
        request: UpdateIndexRequest,
    ) -> Result<MsgStream<UpdateIndexResponse>, Status> {
        self.update_index_requests
            .lock()
            .unwrap()
            .push(request.index_types);
        Ok(pop_or_empty(&self.update_index_scripts))
    }

    async fn index_update_summary(
        &self,
        _request: IndexUpdateSummaryRequest,
    ) -> Result<IndexUpdateSummaryResponse, Status> {
        Ok(IndexUpdateSummaryResponse {
            updated_at: self.summary.lock().unwrap().clone(),
        })
    }

    async fn board_list(&self, _request: BoardListRequest) -> Result<BoardListResponse, Status> {
        Ok(BoardListResponse::default())
    }

    async fn board_search(
        &self,
        _request: BoardSearchRequest,
    ) -> Result<BoardSearchResponse, Status> {
        Ok(BoardSearchResponse::default())
    }

    async fn board_list_watch(
        &self,
        _requests: BoxStream<'static, BoardListWatchRequest>,
    ) -> Result<MsgStream<BoardListWatchResponse>, Status> {
        let script = self.watch_scripts.lock().unwrap().pop_front();
        match script {
            Some(script) => Ok(script.into_stream()),
            None => Ok(stream::pending().boxed()),
        }
    }

    async fn compile(&self, _request: CompileRequest) -> Result<MsgStream<CompileResponse>, Status> {
        Ok(pop_or_empty(&self.compile_scripts))
    }

    async fn upload(&self, _request: UploadRequest) -> Result<MsgStream<UploadResponse>, Status> {
        Ok(pop_or_empty(&self.upload_scripts))
    }

    async fn platform_install(
        &self,
        _request: PlatformInstallRequest,
    ) -> Result<MsgStream<PlatformInstallResponse>, Status> {
        Ok(stream::empty().boxed())
    }

    async fn platform_search(
        &self,
        _request: PlatformSearchRequest,
    ) -> Result<PlatformSearchResponse, Status> {
        Ok(PlatformSearchResponse::default())
    }

    async fn platform_list(
        &self,
        _request: PlatformListRequest,
    ) -> Result<PlatformListResponse, Status> {
        Ok(PlatformListResponse::default())
    }

    async fn library_install(
        &self,
        _request: LibraryInstallRequest,
    ) -> Result<MsgStream<LibraryInstallResponse>, Status> {
        Ok(stream::empty().boxed())
    }

    async fn library_search(
        &self,
        _request: LibrarySearchRequest,
    ) -> Result<LibrarySearchResponse, Status> {
        Ok(LibrarySearchResponse::default())
    }

    async fn library_list(
        &self,
        _request: LibraryListRequest,
    ) -> Result<LibraryListResponse, Status> {
        Ok(LibraryListResponse::default())
    }
}

/// Session wired to a fake transport, plus the pieces tests inspect.
pub fn session_fixture() -> (Arc<FakeTransport>, Arc<SessionManager>, Arc<Notifier>) {
    let transport = FakeTransport::new();
    let notifier = Arc::new(Notifier::default());
    let session = Arc::new(SessionManager::new(transport.clone(), notifier.clone()));
    (transport, session, notifier)
}
