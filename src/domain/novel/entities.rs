//! Novel Context - Entities

use super::NovelError;

/// 小说投稿载荷
///
/// 不变量:
/// - novel_name 不可为空
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NovelSubmission {
    novel_name: String,
    novel_type_id: i64,
    novel_penname: String,
}

impl NovelSubmission {
    pub fn new(
        novel_name: impl Into<String>,
        novel_type_id: i64,
        novel_penname: impl Into<String>,
    ) -> Result<Self, NovelError> {
        let novel_name = novel_name.into();
        if novel_name.is_empty() {
            return Err(NovelError::MissingField("novel_name"));
        }

        Ok(Self {
            novel_name,
            novel_type_id,
            novel_penname: novel_penname.into(),
        })
    }

    pub fn novel_name(&self) -> &str {
        &self.novel_name
    }

    pub fn novel_type_id(&self) -> i64 {
        self.novel_type_id
    }

    pub fn novel_penname(&self) -> &str {
        &self.novel_penname
    }
}

/// 章节草稿
///
/// 不变量:
/// - novel_id / chap_num 必须给出
/// - (novel_id, chap_num) 不要求唯一，重复章节号按原样接受
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterDraft {
    novel_id: i64,
    chap_num: i64,
    chap_write: String,
}

impl ChapterDraft {
    pub fn new(
        novel_id: Option<i64>,
        chap_num: Option<i64>,
        chap_write: impl Into<String>,
    ) -> Result<Self, NovelError> {
        let novel_id = novel_id.ok_or(NovelError::MissingField("novel_id"))?;
        let chap_num = chap_num.ok_or(NovelError::MissingField("novel_num"))?;

        Ok(Self {
            novel_id,
            chap_num,
            chap_write: chap_write.into(),
        })
    }

    pub fn novel_id(&self) -> i64 {
        self.novel_id
    }

    pub fn chap_num(&self) -> i64 {
        self.chap_num
    }

    pub fn chap_write(&self) -> &str {
        &self.chap_write
    }
}

/// 评论草稿
///
/// 不变量:
/// - com_text 不可为空
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDraft {
    novel_id: i64,
    com_text: String,
}

impl CommentDraft {
    pub fn new(novel_id: i64, com_text: impl Into<String>) -> Result<Self, NovelError> {
        let com_text = com_text.into();
        if com_text.is_empty() {
            return Err(NovelError::MissingField("com_text"));
        }

        Ok(Self { novel_id, com_text })
    }

    pub fn novel_id(&self) -> i64 {
        self.novel_id
    }

    pub fn com_text(&self) -> &str {
        &self.com_text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_rejects_empty_name() {
        assert_eq!(
            NovelSubmission::new("", 1, "pen").unwrap_err(),
            NovelError::MissingField("novel_name")
        );
    }

    #[test]
    fn test_chapter_draft_requires_ids() {
        assert_eq!(
            ChapterDraft::new(None, Some(1), "text").unwrap_err(),
            NovelError::MissingField("novel_id")
        );
        assert_eq!(
            ChapterDraft::new(Some(1), None, "text").unwrap_err(),
            NovelError::MissingField("novel_num")
        );
    }

    #[test]
    fn test_chapter_draft_accepts_empty_body() {
        let draft = ChapterDraft::new(Some(1), Some(2), "").unwrap();
        assert_eq!(draft.chap_write(), "");
    }

    #[test]
    fn test_comment_draft_rejects_empty_text() {
        assert_eq!(
            CommentDraft::new(1, "").unwrap_err(),
            NovelError::MissingField("com_text")
        );
    }
}
