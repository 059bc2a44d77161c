//! Comment Commands

/// 发表评论命令（user_id 来自已解析的请求身份）
#[derive(Debug, Clone)]
pub struct PostComment {
    pub novel_id: i64,
    pub user_id: i64,
    pub com_text: String,
}
