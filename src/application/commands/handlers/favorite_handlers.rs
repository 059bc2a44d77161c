//! Favorite Command Handlers

use std::sync::Arc;

use crate::application::commands::{AddFavorite, RemoveFavorite};
use crate::application::error::ApplicationError;
use crate::application::ports::{FavoriteRepositoryPort, NovelRepositoryPort};

/// AddFavorite Handler
///
/// 幂等：重复添加同一配对不报错，关系中最多一行
pub struct AddFavoriteHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
    favorite_repo: Arc<dyn FavoriteRepositoryPort>,
}

impl AddFavoriteHandler {
    pub fn new(
        novel_repo: Arc<dyn NovelRepositoryPort>,
        favorite_repo: Arc<dyn FavoriteRepositoryPort>,
    ) -> Self {
        Self {
            novel_repo,
            favorite_repo,
        }
    }

    pub async fn handle(&self, command: AddFavorite) -> Result<(), ApplicationError> {
        if !self.novel_repo.exists(command.novel_id).await? {
            return Err(ApplicationError::not_found("Novel", command.novel_id));
        }

        self.favorite_repo
            .add(command.user_id, command.novel_id)
            .await?;

        tracing::info!(
            user_id = command.user_id,
            novel_id = command.novel_id,
            "Favorite added"
        );

        Ok(())
    }
}

/// RemoveFavorite Handler
///
/// 配对不存在时返回 NotFound，关系集保持不变
pub struct RemoveFavoriteHandler {
    favorite_repo: Arc<dyn FavoriteRepositoryPort>,
}

impl RemoveFavoriteHandler {
    pub fn new(favorite_repo: Arc<dyn FavoriteRepositoryPort>) -> Self {
        Self { favorite_repo }
    }

    pub async fn handle(&self, command: RemoveFavorite) -> Result<(), ApplicationError> {
        let removed = self
            .favorite_repo
            .remove(command.user_id, command.novel_id)
            .await?;

        if removed == 0 {
            return Err(ApplicationError::not_found("Favorite", command.novel_id));
        }

        tracing::info!(
            user_id = command.user_id,
            novel_id = command.novel_id,
            "Favorite removed"
        );

        Ok(())
    }
}
