use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;

use super::*;

/// Client for `scb.commands.v1.SettingsService`. All methods are unary and
/// settings values travel as JSON strings.
#[derive(Debug, Clone)]
pub struct SettingsServiceClient {
    inner: tonic::client::Grpc<Channel>,
}

impl SettingsServiceClient {
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

    pub async fn get_all(
        &mut self,
        request: impl tonic::IntoRequest<SettingsGetAllRequest>,
    ) -> Result<tonic::Response<SettingsGetAllResponse>, tonic::Status> {
        self.ready().await?;
        let codec: ProstCodec<SettingsGetAllRequest, SettingsGetAllResponse> =
            ProstCodec::default();
        let path = PathAndQuery::from_static("/scb.commands.v1.SettingsService/GetAll");
        self.inner.unary(request.into_request(), path, codec).await
    }

    pub async fn merge(
        &mut self,
        request: impl tonic::IntoRequest<SettingsMergeRequest>,
    ) -> Result<tonic::Response<SettingsMergeResponse>, tonic::Status> {
        self.ready().await?;
        let codec: ProstCodec<SettingsMergeRequest, SettingsMergeResponse> = ProstCodec::default();
        let path = PathAndQuery::from_static("/scb.commands.v1.SettingsService/Merge");
        self.inner.unary(request.into_request(), path, codec).await
    }

    pub async fn get_value(
        &mut self,
        request: impl tonic::IntoRequest<SettingsGetValueRequest>,
    ) -> Result<tonic::Response<SettingsGetValueResponse>, tonic::Status> {
        self.ready().await?;
        let codec: ProstCodec<SettingsGetValueRequest, SettingsGetValueResponse> =
            ProstCodec::default();
        let path = PathAndQuery::from_static("/scb.commands.v1.SettingsService/GetValue");
        self.inner.unary(request.into_request(), path, codec).await
    }

    pub async fn set_value(
        &mut self,
        request: impl tonic::IntoRequest<SettingsSetValueRequest>,
    ) -> Result<tonic::Response<SettingsSetValueResponse>, tonic::Status> {
        self.ready().await?;
        let codec: ProstCodec<SettingsSetValueRequest, SettingsSetValueResponse> =
            ProstCodec::default();
        let path = PathAndQuery::from_static("/scb.commands.v1.SettingsService/SetValue");
        self.inner.unary(request.into_request(), path, codec).await
    }

    pub async fn write(
        &mut self,
        request: impl tonic::IntoRequest<SettingsWriteRequest>,
    ) -> Result<tonic::Response<SettingsWriteResponse>, tonic::Status> {
        self.ready().await?;
        let codec: ProstCodec<SettingsWriteRequest, SettingsWriteResponse> = ProstCodec::default();
        let path = PathAndQuery::from_static("/scb.commands.v1.SettingsService/Write");
        self.inner.unary(request.into_request(), path, codec).await
    }

    pub async fn delete(
        &mut self,
        request: impl tonic::IntoRequest<SettingsDeleteRequest>,
    ) -> Result<tonic::Response<SettingsDeleteResponse>, tonic::Status> {
        self.ready().await?;
        let codec: ProstCodec<SettingsDeleteRequest, SettingsDeleteResponse> =
            ProstCodec::default();
        let path = PathAndQuery::from_static("/scb.commands.v1.SettingsService/Delete");
        self.inner.unary(request.into_request(), path, codec).await
    }
}
