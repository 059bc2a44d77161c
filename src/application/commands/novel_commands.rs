//! Novel Commands

/// 投稿小说命令（封面图片随命令携带，落盘后入库）
#[derive(Debug, Clone)]
pub struct SubmitNovel {
    pub novel_name: String,
    pub novel_type_id: Option<i64>,
    pub novel_penname: String,
    pub image_name: String,
    pub image_data: Vec<u8>,
    pub user_id: i64,
}

/// 提交章节命令
///
/// novel_id / chap_num 为 Option 以便将缺失映射为 MissingField
#[derive(Debug, Clone)]
pub struct SubmitChapter {
    pub novel_id: Option<i64>,
    pub chap_num: Option<i64>,
    pub chap_write: String,
}
