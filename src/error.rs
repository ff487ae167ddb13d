#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("网络请求失败: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("服务器错误: {0}")]
    Protocol(String),

    #[error("未找到图片文件，请先执行保存账单图片")]
    MissingImage,

    #[error("{0}")]
    General(String),
}
