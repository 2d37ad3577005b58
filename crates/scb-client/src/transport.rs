//! Seam between the orchestration layer and the daemon RPC clients.
//!
//! Everything above this trait sees "an operation that yields an ordered,
//! finite stream of messages"; only [`GrpcTransport`] knows about tonic.
//! Tests substitute their own implementation.

use async_trait::async_trait;
use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use scb_proto::scb::commands::v1::core_service_client::CoreServiceClient;
use scb_proto::scb::commands::v1::*;
use tonic::transport::Channel;
use tonic::Status;

pub type MsgStream<T> = BoxStream<'static, Result<T, Status>>;

#[async_trait]
pub trait CoreTransport: Send + Sync {
    async fn init(&self, request: InitRequest) -> Result<MsgStream<InitResponse>, Status>;
    async fn destroy(&self, request: DestroyRequest) -> Result<DestroyResponse, Status>;

    async fn update_index(
        &self,
        request: UpdateIndexRequest,
    ) -> Result<MsgStream<UpdateIndexResponse>, Status>;
    async fn index_update_summary(
        &self,
        request: IndexUpdateSummaryRequest,
    ) -> Result<IndexUpdateSummaryResponse, Status>;

    async fn board_list(&self, request: BoardListRequest) -> Result<BoardListResponse, Status>;
    async fn board_search(&self, request: BoardSearchRequest)
        -> Result<BoardSearchResponse, Status>;
    async fn board_list_watch(
        &self,
        requests: BoxStream<'static, BoardListWatchRequest>,
    ) -> Result<MsgStream<BoardListWatchResponse>, Status>;

    async fn compile(&self, request: CompileRequest) -> Result<MsgStream<CompileResponse>, Status>;
    async fn upload(&self, request: UploadRequest) -> Result<MsgStream<UploadResponse>, Status>;

    async fn platform_install(
        &self,
        request: PlatformInstallRequest,
    ) -> Result<MsgStream<PlatformInstallResponse>, Status>;
    async fn platform_search(
        &self,
        request: PlatformSearchRequest,
    ) -> Result<PlatformSearchResponse, Status>;
    async fn platform_list(
        &self,
        request: PlatformListRequest,
    ) -> Result<PlatformListResponse, Status>;

    async fn library_install(
        &self,
        request: LibraryInstallRequest,
    ) -> Result<MsgStream<LibraryInstallResponse>, Status>;
    async fn library_search(
        &self,
        request: LibrarySearchRequest,
    ) -> Result<LibrarySearchResponse, Status>;
    async fn library_list(&self, request: LibraryListRequest)
        -> Result<LibraryListResponse, Status>;
}

/// Production transport over one shared multiplexed [`Channel`]. Client
/// handles are cheap clones of the channel, so every call gets its own
/// stream while reusing the underlying connection.
pub struct GrpcTransport {
    channel: Channel,
}

impl GrpcTransport {
    pub fn new(channel: Channel) -> Self {
        Self { channel }
    }

    fn core(&self) -> CoreServiceClient {
        CoreServiceClient::new(self.channel.clone())
    }
}

#[async_trait]
impl CoreTransport for GrpcTransport {
    async fn init(&self, request: InitRequest) -> Result<MsgStream<InitResponse>, Status> {
        let stream = self.core().init(request).await?.into_inner();
        Ok(stream.boxed())
    }

    async fn destroy(&self, request: DestroyRequest) -> Result<DestroyResponse, Status> {
        Ok(self.core().destroy(request).await?.into_inner())
    }

    async fn update_index(
        &self,
        request: UpdateIndexRequest,
    ) -> Result<MsgStream<UpdateIndexResponse>, Status> {
        let stream = self.core().update_index(request).await?.into_inner();
        Ok(stream.boxed())
    }

    async fn index_update_summary(
        &self,
        request: IndexUpdateSummaryRequest,
    ) -> Result<IndexUpdateSummaryResponse, Status> {
        Ok(self.core().index_update_summary(request).await?.into_inner())
    }

    async fn board_list(&self, request: BoardListRequest) -> Result<BoardListResponse, Status> {
        Ok(self.core().board_list(request).await?.into_inner())
    }

    async fn board_search(
        &self,
        request: BoardSearchRequest,
    ) -> Result<BoardSearchResponse, Status> {
        Ok(self.core().board_search(request).await?.into_inner())
    }

    async fn board_list_watch(
        &self,
        requests: BoxStream<'static, BoardListWatchRequest>,
    ) -> Result<MsgStream<BoardListWatchResponse>, Status> {
        let stream = self
            .core()
            .board_list_watch(tonic::Request::new(requests))
            .await?
            .into_inner();
        Ok(stream.boxed())
    }

    async fn compile(&self, request: CompileRequest) -> Result<MsgStream<CompileResponse>, Status> {
        let stream = self.core().compile(request).await?.into_inner();
        Ok(stream.boxed())
    }

    async fn upload(&self, request: UploadRequest) -> Result<MsgStream<UploadResponse>, Status> {
        let stream = self.core().upload(request).await?.into_inner();
        Ok(stream.boxed())
    }

    async fn platform_install(
        &self,
        request: PlatformInstallRequest,
    ) -> Result<MsgStream<PlatformInstallResponse>, Status> {
        let stream = self.core().platform_install(request).await?.into_inner();
        Ok(stream.boxed())
    }

    async fn platform_search(
        &self,
        request: PlatformSearchRequest,
    ) -> Result<PlatformSearchResponse, Status> {
        Ok(self.core().platform_search(request).await?.into_inner())
    }

    async fn platform_list(
        &self,
        request: PlatformListRequest,
    ) -> Result<PlatformListResponse, Status> {
        Ok(self.core().platform_list(request).await?.into_inner())
    }

    async fn library_install(
        &self,
        request: LibraryInstallRequest,
    ) -> Result<MsgStream<LibraryInstallResponse>, Status> {
        let stream = self.core().library_install(request).await?.into_inner();
        Ok(stream.boxed())
    }

    async fn library_search(
        &self,
        request: LibrarySearchRequest,
    ) -> Result<LibrarySearchResponse, Status> {
        Ok(self.core().library_search(request).await?.into_inner())
    }

    async fn library_list(
        &self,
        request: LibraryListRequest,
    ) -> Result<LibraryListResponse, Status> {
        Ok(self.core().library_list(request).await?.into_inner())
    }
}
