use super::{BoardListItem, DetectedPort, DownloadProgress, InstalledLibrary, Instance, Platform, Port, SearchedLibrary, TaskProgress};

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InitRequest {
    #[prost(string, tag = "1")]
    pub config_file: String,
}

/// Streamed by `Init`. The terminal message carries `instance`; index and
/// configuration problems arrive as non-fatal warning fields on the way.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InitResponse {
    #[prost(message, optional, tag = "1")]
    pub instance: Option<Instance>,
    #[prost(message, optional, tag = "2")]
    pub download_progress: Option<DownloadProgress>,
    #[prost(message, optional, tag = "3")]
    pub task_progress: Option<TaskProgress>,
    #[prost(string, repeated, tag = "4")]
    pub platforms_index_errors: Vec<String>,
    #[prost(string, optional, tag = "5")]
    pub libraries_index_error: Option<String>,
    #[prost(string, repeated, tag = "6")]
    pub config_warnings: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DestroyRequest {
    #[prost(message, optional, tag = "1")]
    pub instance: Option<Instance>,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct DestroyResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateIndexRequest {
    #[prost(message, optional, tag = "1")]
    pub instance: Option<Instance>,
    /// Index catalogs to refresh, e.g. "platform", "library". The daemon
    /// processes all of them within this single streamed call.
    #[prost(string, repeated, tag = "2")]
    pub index_types: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateIndexResponse {
    #[prost(message, optional, tag = "1")]
    pub download_progress: Option<DownloadProgress>,
    #[prost(message, optional, tag = "2")]
    pub task_progress: Option<TaskProgress>,
    /// Set when one of the requested index types has finished refreshing.
    #[prost(string, optional, tag = "3")]
    pub updated_type: Option<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct IndexUpdateSummaryRequest {
    #[prost(message, optional, tag = "1")]
    pub instance: Option<Instance>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct IndexUpdateSummaryResponse {
    /// Index type -> RFC 3339 time of the refresh the daemon already ran.
    #[prost(map = "string, string", tag = "1")]
    pub updated_at: ::std::collections::HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BoardListRequest {
    #[prost(message, optional, tag = "1")]
    pub instance: Option<Instance>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BoardListResponse {
    #[prost(message, repeated, tag = "1")]
    pub ports: Vec<DetectedPort>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BoardSearchRequest {
    #[prost(message, optional, tag = "1")]
    pub instance: Option<Instance>,
    #[prost(string, tag = "2")]
    pub search_args: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BoardSearchResponse {
    #[prost(message, repeated, tag = "1")]
    pub boards: Vec<BoardListItem>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BoardListWatchRequest {
    #[prost(message, optional, tag = "1")]
    pub instance: Option<Instance>,
    /// Client -> daemon: stop watching and close the stream.
    #[prost(bool, tag = "2")]
    pub interrupt: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BoardListWatchResponse {
    /// "add" or "remove".
    #[prost(string, tag = "1")]
    pub event_type: String,
    #[prost(message, optional, tag = "2")]
    pub port: Option<DetectedPort>,
    #[prost(string, tag = "3")]
    pub error: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CompileRequest {
    #[prost(message, optional, tag = "1")]
    pub instance: Option<Instance>,
    #[prost(string, tag = "2")]
    pub fqbn: String,
    #[prost(string, tag = "3")]
    pub sketch_path: String,
    #[prost(bool, tag = "4")]
    pub verbose: bool,
    #[prost(bool, tag = "5")]
    pub export_binaries: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CompileResponse {
    #[prost(bytes = "vec", tag = "1")]
    pub out_stream: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub err_stream: Vec<u8>,
    #[prost(message, optional, tag = "3")]
    pub download_progress: Option<DownloadProgress>,
    #[prost(message, optional, tag = "4")]
    pub task_progress: Option<TaskProgress>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UploadRequest {
    #[prost(message, optional, tag = "1")]
    pub instance: Option<Instance>,
    #[prost(string, tag = "2")]
    pub fqbn: String,
    #[prost(string, tag = "3")]
    pub sketch_path: String,
    #[prost(message, optional, tag = "4")]
    pub port: Option<Port>,
    #[prost(bool, tag = "5")]
    pub verbose: bool,
    #[prost(string, tag = "6")]
    pub programmer: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UploadResponse {
    #[prost(bytes = "vec", tag = "1")]
    pub out_stream: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub err_stream: Vec<u8>,
    #[prost(message, optional, tag = "3")]
    pub task_progress: Option<TaskProgress>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PlatformInstallRequest {
    #[prost(message, optional, tag = "1")]
    pub instance: Option<Instance>,
    #[prost(string, tag = "2")]
    pub platform_package: String,
    #[prost(string, tag = "3")]
    pub architecture: String,
    #[prost(string, tag = "4")]
    pub version: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PlatformInstallResponse {
    #[prost(message, optional, tag = "1")]
    pub download_progress: Option<DownloadProgress>,
    #[prost(message, optional, tag = "2")]
    pub task_progress: Option<TaskProgress>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PlatformSearchRequest {
    #[prost(message, optional, tag = "1")]
    pub instance: Option<Instance>,
    #[prost(string, tag = "2")]
    pub search_args: String,
    #[prost(bool, tag = "3")]
    pub all_versions: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PlatformSearchResponse {
    #[prost(message, repeated, tag = "1")]
    pub search_output: Vec<Platform>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PlatformListRequest {
    #[prost(message, optional, tag = "1")]
    pub instance: Option<Instance>,
    #[prost(bool, tag = "2")]
    pub updatable_only: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PlatformListResponse {
    #[prost(message, repeated, tag = "1")]
    pub installed_platforms: Vec<Platform>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LibraryInstallRequest {
    #[prost(message, optional, tag = "1")]
    pub instance: Option<Instance>,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub version: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LibraryInstallResponse {
    #[prost(message, optional, tag = "1")]
    pub download_progress: Option<DownloadProgress>,
    #[prost(message, optional, tag = "2")]
    pub task_progress: Option<TaskProgress>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LibrarySearchRequest {
    #[prost(message, optional, tag = "1")]
    pub instance: Option<Instance>,
    #[prost(string, tag = "2")]
    pub query: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LibrarySearchResponse {
    #[prost(message, repeated, tag = "1")]
    pub libraries: Vec<SearchedLibrary>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LibraryListRequest {
    #[prost(message, optional, tag = "1")]
    pub instance: Option<Instance>,
    #[prost(bool, tag = "2")]
    pub all: bool,
    #[prost(bool, tag = "3")]
    pub updatable: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LibraryListResponse {
    #[prost(message, repeated, tag = "1")]
    pub installed_libraries: Vec<InstalledLibrary>,
}
