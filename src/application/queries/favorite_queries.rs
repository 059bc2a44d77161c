//! Favorite Queries

/// 收藏关系存在性查询
#[derive(Debug, Clone)]
pub struct IsFavorite {
    pub user_id: i64,
    pub novel_id: i64,
}

/// 列出用户收藏的小说查询
#[derive(Debug, Clone)]
pub struct ListFavorites {
    pub user_id: i64,
}
