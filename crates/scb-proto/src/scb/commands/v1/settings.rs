#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct SettingsGetAllRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SettingsGetAllResponse {
    /// Full settings tree serialized as a JSON object.
    #[prost(string, tag = "1")]
    pub json_data: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SettingsMergeRequest {
    #[prost(string, tag = "1")]
    pub json_data: String,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct SettingsMergeResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SettingsGetValueRequest {
    #[prost(string, tag = "1")]
    pub key: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SettingsGetValueResponse {
    #[prost(string, tag = "1")]
    pub key: String,
    #[prost(string, tag = "2")]
    pub json_data: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SettingsSetValueRequest {
    #[prost(string, tag = "1")]
    pub key: String,
    #[prost(string, tag = "2")]
    pub json_data: String,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct SettingsSetValueResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SettingsWriteRequest {
    #[prost(string, tag = "1")]
    pub file_path: String,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct SettingsWriteResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SettingsDeleteRequest {
    #[prost(string, tag = "1")]
    pub key: String,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct SettingsDeleteResponse {}
