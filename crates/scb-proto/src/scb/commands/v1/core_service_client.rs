use std::pin::Pin;

use tonic::codec::{ProstCodec, Streaming};
use tonic::codegen::http::uri::PathAndQuery;
use tonic::codegen::tokio_stream::Stream;
use tonic::transport::Channel;

use super::*;

/// Request side of the bidirectional `BoardListWatch` stream.
pub type BoardListWatchRequestStream =
    Pin<Box<dyn Stream<Item = BoardListWatchRequest> + Send + 'static>>;

/// Client for `scb.commands.v1.CoreService`, written in tonic-codegen style
/// over a shared multiplexed [`Channel`]. Cloning is cheap; concurrent
/// streams over one clone-source channel are supported by the transport.
#[derive(Debug, Clone)]
pub struct CoreServiceClient {
    inner: tonic::client::Grpc<Channel>,
}

impl CoreServiceClient {
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: tonic::client::Grpc::new(channel),
        }
    }

    async fn ready(&mut self) -> Result<(), tonic::Status> {
        self.inner
            .ready()
            .await
            .map_err(|e| tonic::Status::unknown(format!("Service was not ready: {e}")))
    }

    pub async fn init(
        &mut self,
        request: impl tonic::IntoRequest<InitRequest>,
    ) -> Result<tonic::Response<Streaming<InitResponse>>, tonic::Status> {
        self.ready().await?;
        let codec: ProstCodec<InitRequest, InitResponse> = ProstCodec::default();
        let path = PathAndQuery::from_static("/scb.commands.v1.CoreService/Init");
        self.inner
            .server_streaming(request.into_request(), path, codec)
            .await
    }

    pub async fn destroy(
        &mut self,
        request: impl tonic::IntoRequest<DestroyRequest>,
    ) -> Result<tonic::Response<DestroyResponse>, tonic::Status> {
        self.ready().await?;
        let codec: ProstCodec<DestroyRequest, DestroyResponse> = ProstCodec::default();
        let path = PathAndQuery::from_static("/scb.commands.v1.CoreService/Destroy");
        self.inner.unary(request.into_request(), path, codec).await
    }

    pub async fn update_index(
        &mut self,
        request: impl tonic::IntoRequest<UpdateIndexRequest>,
    ) -> Result<tonic::Response<Streaming<UpdateIndexResponse>>, tonic::Status> {
        self.ready().await?;
        let codec: ProstCodec<UpdateIndexRequest, UpdateIndexResponse> = ProstCodec::default();
        let path = PathAndQuery::from_static("/scb.commands.v1.CoreService/UpdateIndex");
        self.inner
            .server_streaming(request.into_request(), path, codec)
            .await
    }

    pub async fn index_update_summary(
        &mut self,
        request: impl tonic::IntoRequest<IndexUpdateSummaryRequest>,
    ) -> Result<tonic::Response<IndexUpdateSummaryResponse>, tonic::Status> {
        self.ready().await?;
        let codec: ProstCodec<IndexUpdateSummaryRequest, IndexUpdateSummaryResponse> =
            ProstCodec::default();
        let path = PathAndQuery::from_static("/scb.commands.v1.CoreService/IndexUpdateSummary");
        self.inner.unary(request.into_request(), path, codec).await
    }

    pub async fn board_list(
        &mut self,
        request: impl tonic::IntoRequest<BoardListRequest>,
    ) -> Result<tonic::Response<BoardListResponse>, tonic::Status> {
        self.ready().await?;
        let codec: ProstCodec<BoardListRequest, BoardListResponse> = ProstCodec::default();
        let path = PathAndQuery::from_static("/scb.commands.v1.CoreService/BoardList");
        self.inner.unary(request.into_request(), path, codec).await
    }

    pub async fn board_search(
        &mut self,
        request: impl tonic::IntoRequest<BoardSearchRequest>,
    ) -> Result<tonic::Response<BoardSearchResponse>, tonic::Status> {
        self.ready().await?;
        let codec: ProstCodec<BoardSearchRequest, BoardSearchResponse> = ProstCodec::default();
        let path = PathAndQuery::from_static("/scb.commands.v1.CoreService/BoardSearch");
        self.inner.unary(request.into_request(), path, codec).await
    }

    pub async fn board_list_watch(
        &mut self,
        request: tonic::Request<BoardListWatchRequestStream>,
    ) -> Result<tonic::Response<Streaming<BoardListWatchResponse>>, tonic::Status> {
        self.ready().await?;
        let codec: ProstCodec<BoardListWatchRequest, BoardListWatchResponse> =
            ProstCodec::default();
        let path = PathAndQuery::from_static("/scb.commands.v1.CoreService/BoardListWatch");
        self.inner.streaming(request, path, codec).await
    }

    pub async fn compile(
        &mut self,
        request: impl tonic::IntoRequest<CompileRequest>,
    ) -> Result<tonic::Response<Streaming<CompileResponse>>, tonic::Status> {
        self.ready().await?;
        let codec: ProstCodec<CompileRequest, CompileResponse> = ProstCodec::default();
        let path = PathAndQuery::from_static("/scb.commands.v1.CoreService/Compile");
        self.inner
            .server_streaming(request.into_request(), path, codec)
            .await
    }

    pub async fn upload(
        &mut self,
        request: impl tonic::IntoRequest<UploadRequest>,
    ) -> Result<tonic::Response<Streaming<UploadResponse>>, tonic::Status> {
        self.ready().await?;
        let codec: ProstCodec<UploadRequest, UploadResponse> = ProstCodec::default();
        let path = PathAndQuery::from_static("/scb.commands.v1.CoreService/Upload");
        self.inner
            .server_streaming(request.into_request(), path, codec)
            .await
    }

    pub async fn platform_install(
        &mut self,
        request: impl tonic::IntoRequest<PlatformInstallRequest>,
    ) -> Result<tonic::Response<Streaming<PlatformInstallResponse>>, tonic::Status> {
        self.ready().await?;
        let codec: ProstCodec<PlatformInstallRequest, PlatformInstallResponse> =
            ProstCodec::default();
        let path = PathAndQuery::from_static("/scb.commands.v1.CoreService/PlatformInstall");
        self.inner
            .server_streaming(request.into_request(), path, codec)
            .await
    }

    pub async fn platform_search(
        &mut self,
        request: impl tonic::IntoRequest<PlatformSearchRequest>,
    ) -> Result<tonic::Response<PlatformSearchResponse>, tonic::Status> {
        self.ready().await?;
        let codec: ProstCodec<PlatformSearchRequest, PlatformSearchResponse> =
            ProstCodec::default();
        let path = PathAndQuery::from_static("/scb.commands.v1.CoreService/PlatformSearch");
        self.inner.unary(request.into_request(), path, codec).await
    }

    pub async fn platform_list(
        &mut self,
        request: impl tonic::IntoRequest<PlatformListRequest>,
    ) -> Result<tonic::Response<PlatformListResponse>, tonic::Status> {
        self.ready().await?;
        let codec: ProstCodec<PlatformListRequest, PlatformListResponse> = ProstCodec::default();
        let path = PathAndQuery::from_static("/scb.commands.v1.CoreService/PlatformList");
        self.inner.unary(request.into_request(), path, codec).await
    }

    pub async fn library_install(
        &mut self,
        request: impl tonic::IntoRequest<LibraryInstallRequest>,
    ) -> Result<tonic::Response<Streaming<LibraryInstallResponse>>, tonic::Status> {
        self.ready().await?;
        let codec: ProstCodec<LibraryInstallRequest, LibraryInstallResponse> =
            ProstCodec::default();
        let path = PathAndQuery::from_static("/scb.commands.v1.CoreService/LibraryInstall");
        self.inner
            .server_streaming(request.into_request(), path, codec)
            .await
    }

    pub async fn library_search(
        &mut self,
        request: impl tonic::IntoRequest<LibrarySearchRequest>,
    ) -> Result<tonic::Response<LibrarySearchResponse>, tonic::Status> {
        self.ready().await?;
        let codec: ProstCodec<LibrarySearchRequest, LibrarySearchResponse> = ProstCodec::default();
        let path = PathAndQuery::from_static("/scb.commands.v1.CoreService/LibrarySearch");
        self.inner.unary(request.into_request(), path, codec).await
    }

    pub async fn library_list(
        &mut self,
        request: impl tonic::IntoRequest<LibraryListRequest>,
    ) -> Result<tonic::Response<LibraryListResponse>, tonic::Status> {
        self.ready().await?;
        let codec: ProstCodec<LibraryListRequest, LibraryListResponse> = ProstCodec::default();
        let path = PathAndQuery::from_static("/scb.commands.v1.CoreService/LibraryList");
        self.inner.unary(request.into_request(), path, codec).await
    }
}
