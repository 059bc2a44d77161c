//! Novel Queries

/// 列出所有小说查询（联结类型，按 novel_id 升序）
#[derive(Debug, Clone)]
pub struct ListNovels;

/// 列出指定作者的小说查询
#[derive(Debug, Clone)]
pub struct ListOwnNovels {
    pub user_id: i64,
}

/// 列出小说章节查询（按 chap_num 升序）
#[derive(Debug, Clone)]
pub struct ListChapters {
    pub novel_id: i64,
}

/// 列出小说类型查询（只读参考数据）
#[derive(Debug, Clone)]
pub struct ListNovelTypes;
