//! Comment Queries

/// 列出小说评论查询（联结作者公开字段）
#[derive(Debug, Clone)]
pub struct ListComments {
    pub novel_id: i64,
}
