//! Favorite Commands

/// 添加收藏命令（幂等）
#[derive(Debug, Clone)]
pub struct AddFavorite {
    pub user_id: i64,
    pub novel_id: i64,
}

/// 移除收藏命令
#[derive(Debug, Clone)]
pub struct RemoveFavorite {
    pub user_id: i64,
    pub novel_id: i64,
}
