//! Daemon settings facade.
//!
//! Thin typed wrapper over the unary `SettingsService` RPCs. Values cross
//! the wire as JSON text; this module decodes them into `serde_json::Value`
//! so callers never touch raw strings.

use serde_json::Value;
use tonic::transport::Channel;

use crate::error::ClientError;
use scb_proto::scb::commands::v1::settings_service_client::SettingsServiceClient;
use scb_proto::scb::commands::v1::{
    SettingsDeleteRequest, SettingsGetAllRequest, SettingsGetValueRequest, SettingsMergeRequest,
    SettingsSetValueRequest, SettingsWriteRequest,
};

#[derive(Clone)]
pub struct Settings {
    channel: Channel,
}

impl Settings {
    pub fn new(channel: Channel) -> Self {
        Self { channel }
    }

    fn client(&self) -> SettingsServiceClient {
        SettingsServiceClient::new(self.channel.clone())
    }

    /// Full daemon configuration as one JSON object.
    pub async fn get_all(&self) -> Result<Value, ClientError> {
        let response = self
            .client()
            .get_all(SettingsGetAllRequest {})
            .await
            .map_err(ClientError::from_status)?
            .into_inner();
        Ok(serde_json::from_str(&response.json_data)?)
    }

    /// Merges `patch` into the daemon configuration. Unmentioned keys keep
    /// their current values.
    pub async fn merge(&self, patch: &Value) -> Result<(), ClientError> {
        self.client()
            .merge(SettingsMergeRequest {
                json_data: patch.to_string(),
            })
            .await
            .map_err(ClientError::from_status)?;
        Ok(())
    }

    pub async fn get_value(&self, key: &str) -> Result<Value, ClientError> {
        let response = self
            .client()
            .get_value(SettingsGetValueRequest {
                key: key.to_string(),
            })
            .await
            .map_err(ClientError::from_status)?
            .into_inner();
        Ok(serde_json::from_str(&response.json_data)?)
    }

    pub async fn set_value(&self, key: &str, value: &Value) -> Result<(), ClientError> {
        self.client()
            .set_value(SettingsSetValueRequest {
                key: key.to_string(),
                json_data: value.to_string(),
            })
            .await
            .map_err(ClientError::from_status)?;
        Ok(())
    }

    /// Persists the current configuration to `path` on the daemon host.
    pub async fn write(&self, path: &str) -> Result<(), ClientError> {
        self.client()
            .write(SettingsWriteRequest {
                file_path: path.to_string(),
            })
            .await
            .map_err(ClientError::from_status)?;
        Ok(())
    }

    pub async fn delete(&self, key: &str) -> Result<(), ClientError> {
        self.client()
            .delete(SettingsDeleteRequest {
                key: key.to_string(),
            })
            .await
            .map_err(ClientError::from_status)?;
        Ok(())
    }
}
