//! 错误类型定义

use thiserror::Error;

/// 帖子加载错误
///
/// 两种失败按同一方式处理：记录日志、在错误横幅中展示原因、隐藏加载指示器。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// 服务端返回非成功状态码
    #[error("HTTP {status}")]
    Status { status: u16 },

    /// 传输层失败（网络不可达、超时、响应体无法解析等）
    #[error("{cause}")]
    Transport { cause: String },
}

/// 帖子查看器错误类型
#[derive(Error, Debug)]
pub enum PostViewerError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid view mode: {0} (expected `flex` or `card`)")]
    InvalidViewMode(String),
}

/// 应用程序通用结果类型
pub type Result<T> = anyhow::Result<T>;
