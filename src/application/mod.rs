//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（Repositories、PasswordHasher、ImageStorage）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // User commands
    ChangePassword,
    DeleteAccount,
    Login,
    Logout,
    RegisterUser,
    // Novel commands
    SubmitChapter,
    SubmitNovel,
    // Favorite commands
    AddFavorite,
    RemoveFavorite,
    // Comment commands
    PostComment,
    // Handlers
    handlers::{
        AddFavoriteHandler, ChangePasswordHandler, CommentResponse, DeleteAccountHandler,
        LoginHandler, LoginResponse, LogoutHandler, PostCommentHandler, RegisterUserHandler,
        RemoveFavoriteHandler, SubmitChapterHandler, SubmitChapterResponse, SubmitNovelHandler,
        SubmitNovelResponse, UserResponse,
    },
};

pub use error::ApplicationError;

pub use ports::{
    // Repositories
    ChapterRecord,
    CommentRecord,
    CommentRepositoryPort,
    CommentWithAuthorRecord,
    FavoriteRepositoryPort,
    NewChapter,
    NewComment,
    NewNovel,
    NewUser,
    NovelRecord,
    NovelRepositoryPort,
    NovelTypeRecord,
    NovelWithTypeRecord,
    RepositoryError,
    SessionRecord,
    SessionRepositoryPort,
    UserRecord,
    UserRepositoryPort,
    // Password hasher
    HasherError,
    PasswordHasherPort,
    // Image storage
    ImageStorageError,
    ImageStoragePort,
};

pub use queries::{
    // User queries
    GetUserProfile,
    // Novel queries
    ListChapters,
    ListNovelTypes,
    ListNovels,
    ListOwnNovels,
    // Favorite queries
    IsFavorite,
    ListFavorites,
    // Comment queries
    ListComments,
    // Handlers
    handlers::{
        ChapterResponse, CommentWithAuthorResponse, GetUserProfileHandler, IsFavoriteHandler,
        ListChaptersHandler, ListCommentsHandler, ListFavoritesHandler, ListNovelTypesHandler,
        ListNovelsHandler, ListOwnNovelsHandler, NovelTypeResponse, NovelWithTypeResponse,
        UserProfileResponse,
    },
};
