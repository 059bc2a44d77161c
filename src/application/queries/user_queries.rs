//! User Queries

/// 获取当前用户公开信息查询
#[derive(Debug, Clone)]
pub struct GetUserProfile {
    pub user_id: i64,
}
