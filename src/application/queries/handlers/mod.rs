//! Query Handlers

mod comment_handlers;
mod favorite_handlers;
mod novel_handlers;
mod user_handlers;

pub use comment_handlers::{CommentWithAuthorResponse, ListCommentsHandler};
pub use favorite_handlers::{IsFavoriteHandler, ListFavoritesHandler};
pub use novel_handlers::{
    ChapterResponse, ListChaptersHandler, ListNovelTypesHandler, ListNovelsHandler,
    ListOwnNovelsHandler, NovelTypeResponse, NovelWithTypeResponse,
};
pub use user_handlers::{GetUserProfileHandler, UserProfileResponse};
