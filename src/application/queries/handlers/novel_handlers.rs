//! Novel Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    ChapterRecord, NovelRepositoryPort, NovelTypeRecord, NovelWithTypeRecord,
};
use crate::application::queries::{ListChapters, ListNovelTypes, ListNovels, ListOwnNovels};

// ============================================================================
// Response DTOs
// ============================================================================

/// 小说联结类型响应
#[derive(Debug, Clone)]
pub struct NovelWithTypeResponse {
    pub novel_id: i64,
    pub novel_name: String,
    pub novel_type_id: i64,
    pub novel_type_name: String,
    pub novel_img: String,
    pub novel_penname: String,
    pub user_id: i64,
}

impl From<NovelWithTypeRecord> for NovelWithTypeResponse {
    fn from(record: NovelWithTypeRecord) -> Self {
        Self {
            novel_id: record.novel_id,
            novel_name: record.novel_name,
            novel_type_id: record.novel_type_id,
            novel_type_name: record.novel_type_name,
            novel_img: record.novel_img,
            novel_penname: record.novel_penname,
            user_id: record.user_id,
        }
    }
}

/// 章节响应
#[derive(Debug, Clone)]
pub struct ChapterResponse {
    pub chapter_id: i64,
    pub novel_id: i64,
    pub chap_num: i64,
    pub chap_write: String,
}

impl From<ChapterRecord> for ChapterResponse {
    fn from(record: ChapterRecord) -> Self {
        Self {
            chapter_id: record.chapter_id,
            novel_id: record.novel_id,
            chap_num: record.chap_num,
            chap_write: record.chap_write,
        }
    }
}

/// 小说类型响应
#[derive(Debug, Clone)]
pub struct NovelTypeResponse {
    pub novel_type_id: i64,
    pub novel_type_name: String,
}

impl From<NovelTypeRecord> for NovelTypeResponse {
    fn from(record: NovelTypeRecord) -> Self {
        Self {
            novel_type_id: record.novel_type_id,
            novel_type_name: record.novel_type_name,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// ListNovels Handler
pub struct ListNovelsHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
}

impl ListNovelsHandler {
    pub fn new(novel_repo: Arc<dyn NovelRepositoryPort>) -> Self {
        Self { novel_repo }
    }

    pub async fn handle(
        &self,
        _query: ListNovels,
    ) -> Result<Vec<NovelWithTypeResponse>, ApplicationError> {
        let novels = self.novel_repo.find_all_with_type().await?;
        Ok(novels.into_iter().map(NovelWithTypeResponse::from).collect())
    }
}

/// ListOwnNovels Handler
pub struct ListOwnNovelsHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
}

impl ListOwnNovelsHandler {
    pub fn new(novel_repo: Arc<dyn NovelRepositoryPort>) -> Self {
        Self { novel_repo }
    }

    pub async fn handle(
        &self,
        query: ListOwnNovels,
    ) -> Result<Vec<NovelWithTypeResponse>, ApplicationError> {
        let novels = self.novel_repo.find_by_owner(query.user_id).await?;
        Ok(novels.into_iter().map(NovelWithTypeResponse::from).collect())
    }
}

/// ListChapters Handler
///
/// 小说必须存在；章节按 chap_num 升序返回
pub struct ListChaptersHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
}

impl ListChaptersHandler {
    pub fn new(novel_repo: Arc<dyn NovelRepositoryPort>) -> Self {
        Self { novel_repo }
    }

    pub async fn handle(
        &self,
        query: ListChapters,
    ) -> Result<Vec<ChapterResponse>, ApplicationError> {
        if !self.novel_repo.exists(query.novel_id).await? {
            return Err(ApplicationError::not_found("Novel", query.novel_id));
        }

        let chapters = self.novel_repo.find_chapters(query.novel_id).await?;
        Ok(chapters.into_iter().map(ChapterResponse::from).collect())
    }
}

/// ListNovelTypes Handler
pub struct ListNovelTypesHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
}

impl ListNovelTypesHandler {
    pub fn new(novel_repo: Arc<dyn NovelRepositoryPort>) -> Self {
        Self { novel_repo }
    }

    pub async fn handle(
        &self,
        _query: ListNovelTypes,
    ) -> Result<Vec<NovelTypeResponse>, ApplicationError> {
        let types = self.novel_repo.find_all_types().await?;
        Ok(types.into_iter().map(NovelTypeResponse::from).collect())
    }
}
