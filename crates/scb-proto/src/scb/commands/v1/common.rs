/// Opaque handle identifying one initialized daemon session.
///
/// Issued by `CoreService.Init`; every other request must carry it back.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Instance {
    #[prost(int32, tag = "1")]
    pub id: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DownloadProgress {
    #[prost(string, tag = "1")]
    pub url: String,
    #[prost(string, tag = "2")]
    pub file: String,
    #[prost(int64, tag = "3")]
    pub total_size: i64,
    #[prost(int64, tag = "4")]
    pub downloaded: i64,
    #[prost(bool, tag = "5")]
    pub completed: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TaskProgress {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub message: String,
    #[prost(bool, tag = "3")]
    pub completed: bool,
    #[prost(float, tag = "4")]
    pub percent: f32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Port {
    #[prost(string, tag = "1")]
    pub address: String,
    #[prost(string, tag = "2")]
    pub protocol: String,
    #[prost(string, tag = "3")]
    pub protocol_label: String,
    #[prost(string, tag = "4")]
    pub label: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BoardListItem {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub fqbn: String,
    #[prost(bool, tag = "3")]
    pub is_hidden: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DetectedPort {
    #[prost(message, optional, tag = "1")]
    pub port: Option<Port>,
    #[prost(message, repeated, tag = "2")]
    pub matching_boards: Vec<BoardListItem>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Platform {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub installed_version: String,
    #[prost(string, tag = "3")]
    pub latest_version: String,
    #[prost(string, tag = "4")]
    pub name: String,
    #[prost(string, tag = "5")]
    pub maintainer: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SearchedLibrary {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub author: String,
    #[prost(string, tag = "3")]
    pub maintainer: String,
    #[prost(string, tag = "4")]
    pub sentence: String,
    #[prost(string, tag = "5")]
    pub latest_version: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InstalledLibrary {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub author: String,
    #[prost(string, tag = "3")]
    pub version: String,
    #[prost(string, tag = "4")]
    pub install_dir: String,
}
