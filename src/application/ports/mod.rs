//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod image_storage;
mod password_hasher;
mod repositories;

pub use image_storage::{ImageStorageError, ImageStoragePort};
pub use password_hasher::{HasherError, PasswordHasherPort};
pub use repositories::{
    ChapterRecord, CommentRecord, CommentRepositoryPort, CommentWithAuthorRecord,
    FavoriteRepositoryPort, NewChapter, NewComment, NewNovel, NewUser, NovelRecord,
    NovelRepositoryPort, NovelTypeRecord, NovelWithTypeRecord, RepositoryError, SessionRecord,
    SessionRepositoryPort, UserRecord, UserRepositoryPort,
};
