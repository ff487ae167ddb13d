use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;

use crate::error::AppError;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Runtime configuration, resolved from the environment with production
/// defaults. The shared directory is the rendezvous point between the two
/// process roles, so both must resolve the same value.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    /// OCR + LLM round trips regularly run past a minute; keep this high.
    pub request_timeout: Duration,
    pub shared_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let base_url = std::env::var("QIAOQIAO_SCAN_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let request_timeout = std::env::var("QIAOQIAO_SCAN_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        let shared_dir = match std::env::var_os("QIAOQIAO_SHARED_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => default_shared_dir()?,
        };

        Ok(Self {
            base_url,
            request_timeout,
            shared_dir,
        })
    }
}

fn default_shared_dir() -> Result<PathBuf, AppError> {
    ProjectDirs::from("com", "dm", "qiaoqiao")
        .map(|dirs| dirs.data_dir().join("shared"))
        .ok_or_else(|| AppError::General("could not resolve a shared data directory".to_string()))
}
