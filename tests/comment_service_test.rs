//! Comment service integration tests against in-memory persistence.

mod common;

use std::sync::Arc;

use uuid::Uuid;

use blog_api::errors::AppError;
use blog_api::infra::{BlogRepository, NewBlog};
use blog_api::services::{
    BlogManager, BlogService, CommentManager, CommentService, CreateBlogData,
    UpdateBlogData,
};

use common::{RecordingAssetStore, TestUow, TEST_ASSET_FOLDER};

fn make_service() -> (CommentManager<TestUow>, Arc<TestUow>) {
    let uow = Arc::new(TestUow::default());
    let service = CommentManager::new(uow.clone());
    (service, uow)
}

async fn seed_blog(uow: &TestUow, author: Uuid) -> Uuid {
    uow.blogs
        .create(NewBlog {
            slug: "seeded".to_string(),
            user_id: author,
            title: "Seeded".to_string(),
            short_description: "d".to_string(),
            content: "c".to_string(),
            image: None,
            tags: vec![],
        })
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn test_add_and_list_comments() {
    let (service, uow) = make_service();
    let author = Uuid::new_v4();
    let commenter = Uuid::new_v4();
    let blog_id = seed_blog(&uow, author).await;

    let comment = service
        .add_comment(commenter, blog_id, "Great post!".to_string())
        .await
        .unwrap();
    assert_eq!(comment.blog_id, blog_id);
    assert_eq!(comment.user_id, commenter);

    service
        .add_comment(author, blog_id, "Thanks!".to_string())
        .await
        .unwrap();

    let comments = service.list_comments(blog_id).await.unwrap();
    assert_eq!(comments.len(), 2);

    // Other blogs see nothing
    let other = service.list_comments(Uuid::new_v4()).await.unwrap();
    assert!(other.is_empty());
}

#[tokio::test]
async fn test_add_comment_to_missing_blog_is_not_found() {
    let (service, _uow) = make_service();

    let result = service
        .add_comment(Uuid::new_v4(), Uuid::new_v4(), "hello".to_string())
        .await;
    assert!(matches!(result, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_delete_comment_requires_ownership() {
    let (service, uow) = make_service();
    let author = Uuid::new_v4();
    let commenter = Uuid::new_v4();
    let blog_id = seed_blog(&uow, author).await;

    let comment = service
        .add_comment(commenter, blog_id, "Mine".to_string())
        .await
        .unwrap();

    // Even the blog author cannot delete someone else's comment
    let denied = service.delete_comment(author, comment.id).await;
    assert!(matches!(denied, Err(AppError::Forbidden)));

    service.delete_comment(commenter, comment.id).await.unwrap();
    let remaining = service.list_comments(blog_id).await.unwrap();
    assert!(remaining.is_empty());
}

#[tokio::test]
async fn test_delete_missing_comment_is_not_found() {
    let (service, _uow) = make_service();

    let result = service.delete_comment(Uuid::new_v4(), Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::NotFound)));
}

/// Ownership violations carry different status codes on the two resources:
/// blog mutations report Unauthorized (401) while comment deletion reports
/// Forbidden (403). Kept as-is from the original API surface.
#[tokio::test]
async fn test_ownership_violation_codes_differ_between_blogs_and_comments() {
    let uow = Arc::new(TestUow::default());
    let assets = Arc::new(RecordingAssetStore::default());
    let blog_service = BlogManager::new(uow.clone(), assets, TEST_ASSET_FOLDER.to_string());
    let comment_service = CommentManager::new(uow.clone());

    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();

    let blog = blog_service
        .create_blog(
            owner,
            CreateBlogData {
                title: "Owned".to_string(),
                short_description: "d".to_string(),
                content: "c".to_string(),
                tags: vec![],
                image: None,
            },
        )
        .await
        .unwrap();
    let comment = comment_service
        .add_comment(owner, blog.id, "mine".to_string())
        .await
        .unwrap();

    let blog_denied = blog_service
        .update_blog(
            stranger,
            blog.id,
            UpdateBlogData {
                title: "t".to_string(),
                short_description: "d".to_string(),
                content: "c".to_string(),
                tags: vec![],
            },
        )
        .await;
    assert!(matches!(blog_denied, Err(AppError::Unauthorized)));

    let comment_denied = comment_service.delete_comment(stranger, comment.id).await;
    assert!(matches!(comment_denied, Err(AppError::Forbidden)));
}
