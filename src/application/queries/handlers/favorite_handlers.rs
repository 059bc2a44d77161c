//! Favorite Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::FavoriteRepositoryPort;
use crate::application::queries::handlers::NovelWithTypeResponse;
use crate::application::queries::{IsFavorite, ListFavorites};

/// IsFavorite Handler
pub struct IsFavoriteHandler {
    favorite_repo: Arc<dyn FavoriteRepositoryPort>,
}

impl IsFavoriteHandler {
    pub fn new(favorite_repo: Arc<dyn FavoriteRepositoryPort>) -> Self {
        Self { favorite_repo }
    }

    pub async fn handle(&self, query: IsFavorite) -> Result<bool, ApplicationError> {
        let exists = self
            .favorite_repo
            .exists(query.user_id, query.novel_id)
            .await?;
        Ok(exists)
    }
}

/// ListFavorites Handler
pub struct ListFavoritesHandler {
    favorite_repo: Arc<dyn FavoriteRepositoryPort>,
}

impl ListFavoritesHandler {
    pub fn new(favorite_repo: Arc<dyn FavoriteRepositoryPort>) -> Self {
        Self { favorite_repo }
    }

    pub async fn handle(
        &self,
        query: ListFavorites,
    ) -> Result<Vec<NovelWithTypeResponse>, ApplicationError> {
        let novels = self
            .favorite_repo
            .find_novels_for_user(query.user_id)
            .await?;
        Ok(novels.into_iter().map(NovelWithTypeResponse::from).collect())
    }
}
