//! Command Handlers

mod comment_handlers;
mod favorite_handlers;
mod novel_handlers;
mod user_handlers;

pub use comment_handlers::{CommentResponse, PostCommentHandler};
pub use favorite_handlers::{AddFavoriteHandler, RemoveFavoriteHandler};
pub use novel_handlers::{
    SubmitChapterHandler, SubmitChapterResponse, SubmitNovelHandler, SubmitNovelResponse,
};
pub use user_handlers::{
    ChangePasswordHandler, DeleteAccountHandler, LoginHandler, LoginResponse, LogoutHandler,
    RegisterUserHandler, UserResponse,
};
