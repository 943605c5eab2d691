//! 帖子数据加载

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::{debug, warn};

use crate::app::error::types::{FetchError, Result};
use crate::core::posts::model::Post;

/// 默认数据源地址
pub const DEFAULT_POSTS_URL: &str =
    "https://jsonplaceholder.typicode.com/posts";

/// 默认请求超时（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// 帖子数据源
///
/// 每个会话只调用一次 `load`，不重试、不去重。
#[async_trait]
pub trait PostSource: Send + Sync {
    /// 读取完整的帖子集合
    async fn load(&self) -> std::result::Result<Vec<Post>, FetchError>;
}

/// 基于 HTTP 的数据源
pub struct HttpPostSource {
    client: reqwest::Client,
    url: String,
}

impl HttpPostSource {
    /// 创建新的 HTTP 数据源
    pub fn new(
        url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// 请求地址
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl PostSource for HttpPostSource {
    async fn load(&self) -> std::result::Result<Vec<Post>, FetchError> {
        debug!("GET {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                cause: e.to_string(),
            })?;

        let status = response.status();
        debug!("Response status: {}", status.as_u16());

        if !status.is_success() {
            warn!("Posts request rejected: HTTP {}", status.as_u16());
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let text = response.text().await.map_err(|e| {
            FetchError::Transport {
                cause: format!("Failed to read response body: {e}"),
            }
        })?;
        debug!("Response body: {} bytes", text.len());

        parse_posts(&text)
    }
}

/// 解析响应体
fn parse_posts(
    text: &str,
) -> std::result::Result<Vec<Post>, FetchError> {
    serde_json::from_str(text).map_err(|e| FetchError::Transport {
        cause: format!("Invalid response body: {e}"),
    })
}
