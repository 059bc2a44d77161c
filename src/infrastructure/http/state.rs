//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    AddFavoriteHandler, ChangePasswordHandler, DeleteAccountHandler, LoginHandler, LogoutHandler,
    PostCommentHandler, RegisterUserHandler, RemoveFavoriteHandler, SubmitChapterHandler,
    SubmitNovelHandler,
    // Query handlers
    GetUserProfileHandler, IsFavoriteHandler, ListChaptersHandler, ListCommentsHandler,
    ListFavoritesHandler, ListNovelTypesHandler, ListNovelsHandler, ListOwnNovelsHandler,
    // Ports
    CommentRepositoryPort, FavoriteRepositoryPort, ImageStoragePort, NovelRepositoryPort,
    PasswordHasherPort, SessionRepositoryPort, UserRepositoryPort,
};

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub user_repo: Arc<dyn UserRepositoryPort>,
    pub session_repo: Arc<dyn SessionRepositoryPort>,
    pub novel_repo: Arc<dyn NovelRepositoryPort>,
    pub favorite_repo: Arc<dyn FavoriteRepositoryPort>,
    pub comment_repo: Arc<dyn CommentRepositoryPort>,
    pub hasher: Arc<dyn PasswordHasherPort>,
    pub image_storage: Arc<dyn ImageStoragePort>,

    // ========== Command Handlers ==========
    pub register_user_handler: RegisterUserHandler,
    pub login_handler: LoginHandler,
    pub logout_handler: LogoutHandler,
    pub change_password_handler: ChangePasswordHandler,
    pub delete_account_handler: DeleteAccountHandler,
    pub submit_novel_handler: SubmitNovelHandler,
    pub submit_chapter_handler: SubmitChapterHandler,
    pub add_favorite_handler: AddFavoriteHandler,
    pub remove_favorite_handler: RemoveFavoriteHandler,
    pub post_comment_handler: PostCommentHandler,

    // ========== Query Handlers ==========
    pub get_user_profile_handler: GetUserProfileHandler,
    pub list_novels_handler: ListNovelsHandler,
    pub list_own_novels_handler: ListOwnNovelsHandler,
    pub list_chapters_handler: ListChaptersHandler,
    pub list_novel_types_handler: ListNovelTypesHandler,
    pub is_favorite_handler: IsFavoriteHandler,
    pub list_favorites_handler: ListFavoritesHandler,
    pub list_comments_handler: ListCommentsHandler,
}

impl AppState {
    /// 创建应用状态
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<dyn UserRepositoryPort>,
        session_repo: Arc<dyn SessionRepositoryPort>,
        novel_repo: Arc<dyn NovelRepositoryPort>,
        favorite_repo: Arc<dyn FavoriteRepositoryPort>,
        comment_repo: Arc<dyn CommentRepositoryPort>,
        hasher: Arc<dyn PasswordHasherPort>,
        image_storage: Arc<dyn ImageStoragePort>,
        session_ttl_secs: u64,
    ) -> Self {
        Self {
            // Ports
            user_repo: user_repo.clone(),
            session_repo: session_repo.clone(),
            novel_repo: novel_repo.clone(),
            favorite_repo: favorite_repo.clone(),
            comment_repo: comment_repo.clone(),
            hasher: hasher.clone(),
            image_storage: image_storage.clone(),

            // Command handlers
            register_user_handler: RegisterUserHandler::new(user_repo.clone(), hasher.clone()),
            login_handler: LoginHandler::new(
                user_repo.clone(),
                session_repo.clone(),
                hasher.clone(),
                session_ttl_secs,
            ),
            logout_handler: LogoutHandler::new(session_repo.clone()),
            change_password_handler: ChangePasswordHandler::new(user_repo.clone(), hasher.clone()),
            delete_account_handler: DeleteAccountHandler::new(
                user_repo.clone(),
                image_storage.clone(),
            ),
            submit_novel_handler: SubmitNovelHandler::new(
                novel_repo.clone(),
                image_storage.clone(),
            ),
            submit_chapter_handler: SubmitChapterHandler::new(novel_repo.clone()),
            add_favorite_handler: AddFavoriteHandler::new(
                novel_repo.clone(),
                favorite_repo.clone(),
            ),
            remove_favorite_handler: RemoveFavoriteHandler::new(favorite_repo.clone()),
            post_comment_handler: PostCommentHandler::new(
                novel_repo.clone(),
                comment_repo.clone(),
            ),

            // Query handlers
            get_user_profile_handler: GetUserProfileHandler::new(user_repo.clone()),
            list_novels_handler: ListNovelsHandler::new(novel_repo.clone()),
            list_own_novels_handler: ListOwnNovelsHandler::new(novel_repo.clone()),
            list_chapters_handler: ListChaptersHandler::new(novel_repo.clone()),
            list_novel_types_handler: ListNovelTypesHandler::new(novel_repo.clone()),
            is_favorite_handler: IsFavoriteHandler::new(favorite_repo.clone()),
            list_favorites_handler: ListFavoritesHandler::new(favorite_repo.clone()),
            list_comments_handler: ListCommentsHandler::new(comment_repo.clone()),
        }
    }
}
