//! Blog service - blog CRUD, publication workflow and likes.
//!
//! Ownership checks for update and delete run strictly after the caller
//! has been authenticated and strictly before the mutating write.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{slugify, Author, Blog, BlogStatus};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{public_id_from_url, AssetStore, BlogFilter, NewBlog, SortDirection, UnitOfWork};
use crate::types::PaginationParams;

/// Parameters for the blog list query
#[derive(Debug, Clone, Default)]
pub struct BlogListQuery {
    pub search: Option<String>,
    pub status: Option<BlogStatus>,
    pub sort: Option<SortDirection>,
    pub pagination: PaginationParams,
}

/// An image received from the client, not yet uploaded to the asset host
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Fields for creating a blog
#[derive(Debug)]
pub struct CreateBlogData {
    pub title: String,
    pub short_description: String,
    pub content: String,
    pub tags: Vec<String>,
    pub image: Option<ImageUpload>,
}

/// Fields for updating a blog
#[derive(Debug)]
pub struct UpdateBlogData {
    pub title: String,
    pub short_description: String,
    pub content: String,
    pub tags: Vec<String>,
}

/// Blog service trait for dependency injection.
#[async_trait]
pub trait BlogService: Send + Sync {
    /// List blogs with search/status filters, returning rows and the
    /// filtered total
    async fn list_blogs(
        &self,
        query: BlogListQuery,
    ) -> AppResult<(Vec<(Blog, Option<Author>)>, u64)>;

    /// Create a blog for the author, uploading the image if present
    async fn create_blog(&self, author_id: Uuid, data: CreateBlogData) -> AppResult<Blog>;

    /// Update a blog; only the author may do this (401 otherwise).
    /// Provided tags are appended to the existing list.
    async fn update_blog(&self, caller_id: Uuid, id: Uuid, data: UpdateBlogData)
        -> AppResult<Blog>;

    /// Delete a blog and its hosted image; only the author may do this
    async fn delete_blog(&self, caller_id: Uuid, id: Uuid) -> AppResult<()>;

    /// Fetch a blog by its slug, with the author embedded
    async fn get_blog_by_slug(&self, slug: &str) -> AppResult<(Blog, Option<Author>)>;

    /// Mark a blog published; rejects blogs that already are
    async fn publish_blog(&self, id: Uuid) -> AppResult<Blog>;

    /// Move a blog back to draft; rejects blogs that already are
    async fn unpublish_blog(&self, id: Uuid) -> AppResult<Blog>;

    /// Add the caller to the likes set, returning the new total
    async fn like_blog(&self, caller_id: Uuid, id: Uuid) -> AppResult<u64>;

    /// Remove the caller from the likes set, returning the new total
    async fn unlike_blog(&self, caller_id: Uuid, id: Uuid) -> AppResult<u64>;
}

/// Concrete implementation of BlogService using Unit of Work.
pub struct BlogManager<U: UnitOfWork> {
    uow: Arc<U>,
    assets: Arc<dyn AssetStore>,
    asset_folder: String,
}

impl<U: UnitOfWork> BlogManager<U> {
    /// Create new blog service instance with Unit of Work and asset host
    pub fn new(uow: Arc<U>, assets: Arc<dyn AssetStore>, asset_folder: String) -> Self {
        Self {
            uow,
            assets,
            asset_folder,
        }
    }

    async fn load_owned_blog(&self, caller_id: Uuid, id: Uuid) -> AppResult<Blog> {
        let blog = self
            .uow
            .blogs()
            .find_by_id(id)
            .await?
            .ok_or_not_found()?;

        // Blog ownership violations report Unauthorized, unlike comment
        // ownership which reports Forbidden
        if !blog.is_owned_by(caller_id) {
            return Err(AppError::Unauthorized);
        }

        Ok(blog)
    }
}

#[async_trait]
impl<U: UnitOfWork> BlogService for BlogManager<U> {
    async fn list_blogs(
        &self,
        query: BlogListQuery,
    ) -> AppResult<(Vec<(Blog, Option<Author>)>, u64)> {
        let filter = BlogFilter {
            search: query.search,
            status: query.status,
        };
        let sort = query.sort.unwrap_or_default();

        let total = self.uow.blogs().count(filter.clone()).await?;
        let rows = self
            .uow
            .blogs()
            .list(
                filter,
                sort,
                query.pagination.offset(),
                query.pagination.limit(),
            )
            .await?;

        Ok((rows, total))
    }

    async fn create_blog(&self, author_id: Uuid, data: CreateBlogData) -> AppResult<Blog> {
        let image = match data.image {
            Some(upload) => Some(self.assets.upload(&upload.filename, upload.bytes).await?),
            None => None,
        };

        self.uow
            .blogs()
            .create(NewBlog {
                slug: slugify(&data.title),
                user_id: author_id,
                title: data.title,
                short_description: data.short_description,
                content: data.content,
                image,
                tags: data.tags,
            })
            .await
    }

    async fn update_blog(
        &self,
        caller_id: Uuid,
        id: Uuid,
        data: UpdateBlogData,
    ) -> AppResult<Blog> {
        let blog = self.load_owned_blog(caller_id, id).await?;

        // New tags accumulate rather than replace
        let mut tags = blog.tags;
        tags.extend(data.tags);

        // TODO: replace the hosted image on update (delete the old asset,
        // upload the new one, store the new URL)

        self.uow
            .blogs()
            .update_content(id, data.title, data.short_description, data.content, tags)
            .await
    }

    async fn delete_blog(&self, caller_id: Uuid, id: Uuid) -> AppResult<()> {
        let blog = self.load_owned_blog(caller_id, id).await?;

        // Remove the hosted image first so we never keep paying for assets
        // of deleted posts
        if let Some(image_url) = &blog.image {
            if let Some(public_id) = public_id_from_url(&self.asset_folder, image_url) {
                self.assets.delete(&public_id).await?;
            }
        }

        self.uow.blogs().delete(id).await
    }

    async fn get_blog_by_slug(&self, slug: &str) -> AppResult<(Blog, Option<Author>)> {
        self.uow
            .blogs()
            .find_by_slug(slug)
            .await?
            .ok_or_not_found()
    }

    async fn publish_blog(&self, id: Uuid) -> AppResult<Blog> {
        let blog = self
            .uow
            .blogs()
            .find_by_id(id)
            .await?
            .ok_or_not_found()?;

        if blog.status == BlogStatus::Published {
            return Err(AppError::validation("Blog is already published"));
        }

        self.uow.blogs().set_status(id, BlogStatus::Published).await
    }

    async fn unpublish_blog(&self, id: Uuid) -> AppResult<Blog> {
        let blog = self
            .uow
            .blogs()
            .find_by_id(id)
            .await?
            .ok_or_not_found()?;

        if blog.status == BlogStatus::Draft {
            return Err(AppError::validation("Blog is already in draft status"));
        }

        self.uow.blogs().set_status(id, BlogStatus::Draft).await
    }

    async fn like_blog(&self, caller_id: Uuid, id: Uuid) -> AppResult<u64> {
        let blog = self
            .uow
            .blogs()
            .find_by_id(id)
            .await?
            .ok_or_not_found()?;

        if blog.is_liked_by(caller_id) {
            return Err(AppError::validation("You have already liked this blog"));
        }

        let mut likes = blog.likes;
        likes.push(caller_id);
        let total = likes.len() as u64;

        self.uow.blogs().set_likes(id, likes).await?;
        Ok(total)
    }

    async fn unlike_blog(&self, caller_id: Uuid, id: Uuid) -> AppResult<u64> {
        let blog = self
            .uow
            .blogs()
            .find_by_id(id)
            .await?
            .ok_or_not_found()?;

        if !blog.is_liked_by(caller_id) {
            return Err(AppError::validation("You have not liked this blog"));
        }

        let likes: Vec<Uuid> = blog
            .likes
            .into_iter()
            .filter(|liker| *liker != caller_id)
            .collect();
        let total = likes.len() as u64;

        self.uow.blogs().set_likes(id, likes).await?;
        Ok(total)
    }
}
