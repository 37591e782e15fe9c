//! Blog repository implementation.
//!
//! List queries join the author so responses can embed `{id, username}`
//! without a second round trip.

use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use serde_json::json;
use uuid::Uuid;

use super::entities::blog::{self, ActiveModel, Entity as BlogEntity};
use super::entities::user::Entity as UserEntity;
use crate::domain::{Author, Blog, BlogStatus};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Filter applied to blog list queries
#[derive(Debug, Clone, Default)]
pub struct BlogFilter {
    /// Case-insensitive term matched against title, short description and content
    pub search: Option<String>,
    pub status: Option<BlogStatus>,
}

/// Sort direction for list queries (by creation time)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl Default for SortDirection {
    /// Newest first
    fn default() -> Self {
        SortDirection::Desc
    }
}

impl From<SortDirection> for Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        }
    }
}

/// Fields required to persist a new blog
#[derive(Debug, Clone)]
pub struct NewBlog {
    pub slug: String,
    pub user_id: Uuid,
    pub title: String,
    pub short_description: String,
    pub content: String,
    pub image: Option<String>,
    pub tags: Vec<String>,
}

/// Blog repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// List blogs matching the filter, newest first unless told otherwise,
    /// each paired with its author
    async fn list(
        &self,
        filter: BlogFilter,
        sort: SortDirection,
        offset: u64,
        limit: u64,
    ) -> AppResult<Vec<(Blog, Option<Author>)>>;

    /// Count blogs matching the filter
    async fn count(&self, filter: BlogFilter) -> AppResult<u64>;

    /// Find blog by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Blog>>;

    /// Find blog by slug, paired with its author
    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<(Blog, Option<Author>)>>;

    /// Create a new blog (starts as draft with no likes)
    async fn create(&self, data: NewBlog) -> AppResult<Blog>;

    /// Update the editable fields of a blog
    async fn update_content(
        &self,
        id: Uuid,
        title: String,
        short_description: String,
        content: String,
        tags: Vec<String>,
    ) -> AppResult<Blog>;

    /// Set the publication status
    async fn set_status(&self, id: Uuid, status: BlogStatus) -> AppResult<Blog>;

    /// Replace the likes set
    async fn set_likes(&self, id: Uuid, likes: Vec<Uuid>) -> AppResult<Blog>;

    /// Delete a blog by ID
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of BlogRepository
pub struct BlogStore {
    db: DatabaseConnection,
}

impl BlogStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Translate a [`BlogFilter`] into a query condition
    fn filter_condition(filter: &BlogFilter) -> Condition {
        let mut condition = Condition::all();

        if let Some(term) = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
        {
            let pattern = format!("%{}%", term);
            condition = condition.add(
                Condition::any()
                    .add(Expr::col((blog::Entity, blog::Column::Title)).ilike(pattern.clone()))
                    .add(
                        Expr::col((blog::Entity, blog::Column::ShortDescription))
                            .ilike(pattern.clone()),
                    )
                    .add(Expr::col((blog::Entity, blog::Column::Content)).ilike(pattern)),
            );
        }

        if let Some(status) = filter.status {
            condition = condition.add(blog::Column::Status.eq(status.as_str()));
        }

        condition
    }
}

#[async_trait]
impl BlogRepository for BlogStore {
    async fn list(
        &self,
        filter: BlogFilter,
        sort: SortDirection,
        offset: u64,
        limit: u64,
    ) -> AppResult<Vec<(Blog, Option<Author>)>> {
        let rows = BlogEntity::find()
            .find_also_related(UserEntity)
            .filter(Self::filter_condition(&filter))
            .order_by(blog::Column::CreatedAt, sort.into())
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows
            .into_iter()
            .map(|(blog, author)| {
                (
                    Blog::from(blog),
                    author.map(|user| Author {
                        id: user.id,
                        username: user.username,
                    }),
                )
            })
            .collect())
    }

    async fn count(&self, filter: BlogFilter) -> AppResult<u64> {
        BlogEntity::find()
            .filter(Self::filter_condition(&filter))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Blog>> {
        let result = BlogEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Blog::from))
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<(Blog, Option<Author>)>> {
        let result = BlogEntity::find()
            .find_also_related(UserEntity)
            .filter(blog::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(|(blog, author)| {
            (
                Blog::from(blog),
                author.map(|user| Author {
                    id: user.id,
                    username: user.username,
                }),
            )
        }))
    }

    async fn create(&self, data: NewBlog) -> AppResult<Blog> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            slug: Set(data.slug),
            user_id: Set(data.user_id),
            title: Set(data.title),
            short_description: Set(data.short_description),
            content: Set(data.content),
            image: Set(data.image),
            tags: Set(json!(data.tags)),
            status: Set(BlogStatus::Draft.as_str().to_string()),
            likes: Set(json!([])),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Blog::from(model))
    }

    async fn update_content(
        &self,
        id: Uuid,
        title: String,
        short_description: String,
        content: String,
        tags: Vec<String>,
    ) -> AppResult<Blog> {
        let blog = BlogEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = blog.into();
        active.title = Set(title);
        active.short_description = Set(short_description);
        active.content = Set(content);
        active.tags = Set(json!(tags));
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Blog::from(model))
    }

    async fn set_status(&self, id: Uuid, status: BlogStatus) -> AppResult<Blog> {
        let blog = BlogEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = blog.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Blog::from(model))
    }

    async fn set_likes(&self, id: Uuid, likes: Vec<Uuid>) -> AppResult<Blog> {
        let blog = BlogEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = blog.into();
        active.likes = Set(json!(likes));
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Blog::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = BlogEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
