use std::{
    fs, io,
    path::{Path, PathBuf},
};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tonic::transport::{Channel, Endpoint};

pub const DEFAULT_DAEMON_ADDR: &str = "127.0.0.1:50061";

pub fn env_addr(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

pub fn daemon_addr() -> String {
    env_addr("SCB_DAEMON_ADDR", DEFAULT_DAEMON_ADDR)
}

pub fn data_dir() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".local/share/scb")
    } else {
        PathBuf::from("/tmp/scb")
    }
}

pub fn state_dir() -> PathBuf {
    data_dir().join("state")
}

pub fn state_file_path(file_name: &str) -> PathBuf {
    state_dir().join(file_name)
}

pub fn expand_user(path: &str) -> PathBuf {
    if path == "~" || path.starts_with("~/") {
        if let Ok(home) = std::env::var("HOME") {
            let rest = path.strip_prefix("~/").unwrap_or("");
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(path)
}

pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("json.tmp");
    let data = serde_json::to_vec_pretty(value).map_err(io::Error::other)?;
    fs::write(&tmp, data)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn now_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

pub fn rfc3339_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn format_rfc3339(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub async fn connect(addr: &str) -> Result<Channel, tonic::transport::Error> {
    Endpoint::from_shared(format!("http://{addr}"))?.connect().await
}

pub fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("info".parse()?),
        )
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_user_passes_absolute_paths_through() {
        assert_eq!(expand_user("/opt/scb"), PathBuf::from("/opt/scb"));
    }

    #[test]
    fn expand_user_resolves_home_prefix() {
        if let Ok(home) = std::env::var("HOME") {
            assert_eq!(
                expand_user("~/sketches"),
                PathBuf::from(home).join("sketches")
            );
        }
    }

    #[tokio::test]
    async fn connect_rejects_a_malformed_address() {
        assert!(connect("not a host:port").await.is_err());
    }

    #[test]
    fn write_json_atomic_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("state.json");
        write_json_atomic(&path, &serde_json::json!({ "k": 1 })).expect("write");
        let raw = fs::read(&path).expect("read");
        let value: serde_json::Value = serde_json::from_slice(&raw).expect("parse");
        assert_eq!(value["k"], 1);
    }
}
