//! 列表渲染模块

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::app::error::types::PostViewerError;
use crate::core::posts::model::Post;

/// 视图模式
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
pub enum ViewMode {
    /// 行列表布局
    #[default]
    #[serde(rename = "flex", alias = "list")]
    List,
    /// 卡片布局
    #[serde(rename = "card")]
    Card,
}

impl ViewMode {
    /// 选择器中的取值
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::List => "flex",
            ViewMode::Card => "card",
        }
    }

    /// 模板使用的 CSS 类名前缀
    pub fn class_prefix(&self) -> &'static str {
        match self {
            ViewMode::List => "post-row",
            ViewMode::Card => "post-card",
        }
    }

    /// 另一种视图
    pub fn toggled(&self) -> Self {
        match self {
            ViewMode::List => ViewMode::Card,
            ViewMode::Card => ViewMode::List,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = PostViewerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flex" | "list" => Ok(ViewMode::List),
            "card" => Ok(ViewMode::Card),
            other => Err(PostViewerError::InvalidViewMode(other.to_string())),
        }
    }
}

/// 转义 HTML 保留字符
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// 渲染单条帖子
pub fn render_post(post: &Post, view_mode: ViewMode) -> String {
    let class = view_mode.class_prefix();
    format!(
        r#"
    <article class="{class}">
      <div class="{class}__meta">#{id} · user {user_id}</div>
      <h2 class="{class}__title">{title}</h2>
      <p class="{class}__body">{body}</p>
    </article>
  "#,
        id = post.id,
        user_id = post.user_id,
        title = escape_html(&post.title),
        body = escape_html(&post.body),
    )
}

/// 渲染结果：只属于一个容器
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub view_mode: ViewMode,
    pub markup: String,
}

/// 按视图模式渲染一页帖子
pub fn render(page: &[Post], view_mode: ViewMode) -> RenderedPage {
    let markup = page
        .iter()
        .map(|post| render_post(post, view_mode))
        .collect::<String>();

    RenderedPage { view_mode, markup }
}
