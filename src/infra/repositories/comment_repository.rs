//! Comment repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::comment::{self, ActiveModel, Entity as CommentEntity};
use super::entities::user::Entity as UserEntity;
use crate::domain::{Author, Comment};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Comment repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// List all comments for a blog, oldest first, each paired with its author
    async fn list_for_blog(&self, blog_id: Uuid) -> AppResult<Vec<(Comment, Option<Author>)>>;

    /// Find comment by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Comment>>;

    /// Create a new comment on a blog
    async fn create(&self, blog_id: Uuid, user_id: Uuid, content: String) -> AppResult<Comment>;

    /// Delete a comment by ID
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of CommentRepository
pub struct CommentStore {
    db: DatabaseConnection,
}

impl CommentStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentRepository for CommentStore {
    async fn list_for_blog(&self, blog_id: Uuid) -> AppResult<Vec<(Comment, Option<Author>)>> {
        let rows = CommentEntity::find()
            .find_also_related(UserEntity)
            .filter(comment::Column::BlogId.eq(blog_id))
            .order_by(comment::Column::CreatedAt, Order::Asc)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows
            .into_iter()
            .map(|(comment, author)| {
                (
                    Comment::from(comment),
                    author.map(|user| Author {
                        id: user.id,
                        username: user.username,
                    }),
                )
            })
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Comment>> {
        let result = CommentEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Comment::from))
    }

    async fn create(&self, blog_id: Uuid, user_id: Uuid, content: String) -> AppResult<Comment> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            blog_id: Set(blog_id),
            user_id: Set(user_id),
            content: Set(content),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Comment::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = CommentEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
