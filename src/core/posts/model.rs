//! 帖子数据结构

use serde::{Deserialize, Serialize};

/// 单条帖子记录
///
/// 加载后只读，集合顺序即服务端返回顺序。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    pub body: String,
}
