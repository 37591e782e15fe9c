//! Blog service integration tests against in-memory persistence and a
//! recording asset-store double.

mod common;

use std::sync::Arc;

use uuid::Uuid;

use blog_api::domain::BlogStatus;
use blog_api::errors::AppError;
use blog_api::infra::SortDirection;
use blog_api::services::{
    BlogListQuery, BlogManager, BlogService, CreateBlogData, ImageUpload, UpdateBlogData,
};
use blog_api::types::PaginationParams;

use common::{RecordingAssetStore, TestUow, TEST_ASSET_FOLDER};

fn make_service() -> (
    BlogManager<TestUow>,
    Arc<TestUow>,
    Arc<RecordingAssetStore>,
) {
    let uow = Arc::new(TestUow::default());
    let assets = Arc::new(RecordingAssetStore::default());
    let service = BlogManager::new(
        uow.clone(),
        assets.clone(),
        TEST_ASSET_FOLDER.to_string(),
    );
    (service, uow, assets)
}

fn post(title: &str) -> CreateBlogData {
    CreateBlogData {
        title: title.to_string(),
        short_description: format!("{} in brief", title),
        content: format!("Long form content about {}", title),
        tags: vec![],
        image: None,
    }
}

#[tokio::test]
async fn test_create_blog_slugifies_title_and_starts_as_draft() {
    let (service, _uow, _assets) = make_service();
    let author = Uuid::new_v4();

    let blog = service.create_blog(author, post("My First Blog")).await.unwrap();

    assert_eq!(blog.slug, "my-first-blog");
    assert_eq!(blog.status, BlogStatus::Draft);
    assert_eq!(blog.user_id, author);
    assert!(blog.likes.is_empty());
}

#[tokio::test]
async fn test_create_blog_uploads_image_and_stores_url() {
    let (service, _uow, assets) = make_service();
    let author = Uuid::new_v4();

    let mut data = post("Picture Post");
    data.image = Some(ImageUpload {
        filename: "cover.png".to_string(),
        bytes: vec![0u8; 64],
    });

    let blog = service.create_blog(author, data).await.unwrap();

    assert_eq!(assets.uploads.lock().unwrap().as_slice(), ["cover.png"]);
    let image = blog.image.expect("image URL should be stored");
    assert!(image.ends_with("cover.png"));
}

#[tokio::test]
async fn test_update_appends_tags_and_requires_ownership() {
    let (service, _uow, _assets) = make_service();
    let author = Uuid::new_v4();
    let stranger = Uuid::new_v4();

    let mut data = post("Tagged");
    data.tags = vec!["rust".to_string()];
    let blog = service.create_blog(author, data).await.unwrap();

    // Non-owner update reports Unauthorized
    let update = UpdateBlogData {
        title: "Tagged v2".to_string(),
        short_description: "updated".to_string(),
        content: "updated content".to_string(),
        tags: vec!["axum".to_string()],
    };
    let denied = service.update_blog(stranger, blog.id, update).await;
    assert!(matches!(denied, Err(AppError::Unauthorized)));

    // Owner update appends tags rather than replacing them
    let update = UpdateBlogData {
        title: "Tagged v2".to_string(),
        short_description: "updated".to_string(),
        content: "updated content".to_string(),
        tags: vec!["axum".to_string()],
    };
    let updated = service.update_blog(author, blog.id, update).await.unwrap();
    assert_eq!(updated.title, "Tagged v2");
    assert_eq!(updated.tags, vec!["rust".to_string(), "axum".to_string()]);
}

#[tokio::test]
async fn test_update_missing_blog_is_not_found() {
    let (service, _uow, _assets) = make_service();

    let result = service
        .update_blog(
            Uuid::new_v4(),
            Uuid::new_v4(),
            UpdateBlogData {
                title: "t".to_string(),
                short_description: "d".to_string(),
                content: "c".to_string(),
                tags: vec![],
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_delete_requires_ownership_and_removes_hosted_image() {
    let (service, uow, assets) = make_service();
    let author = Uuid::new_v4();
    let stranger = Uuid::new_v4();

    let mut data = post("Doomed");
    data.image = Some(ImageUpload {
        filename: "doomed.jpg".to_string(),
        bytes: vec![0u8; 64],
    });
    let blog = service.create_blog(author, data).await.unwrap();

    let denied = service.delete_blog(stranger, blog.id).await;
    assert!(matches!(denied, Err(AppError::Unauthorized)));

    service.delete_blog(author, blog.id).await.unwrap();
    assert!(uow.blogs.get(blog.id).is_none());

    // Public id is the asset folder plus the filename stem
    assert_eq!(
        assets.deletes.lock().unwrap().as_slice(),
        [format!("{}/doomed", TEST_ASSET_FOLDER)]
    );
}

#[tokio::test]
async fn test_get_by_slug() {
    let (service, _uow, _assets) = make_service();
    let author = Uuid::new_v4();

    service.create_blog(author, post("Findable Post")).await.unwrap();

    let (blog, _author) = service.get_blog_by_slug("findable-post").await.unwrap();
    assert_eq!(blog.title, "Findable Post");

    let missing = service.get_blog_by_slug("no-such-slug").await;
    assert!(matches!(missing, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_publish_and_unpublish_state_checks() {
    let (service, _uow, _assets) = make_service();
    let author = Uuid::new_v4();

    let blog = service.create_blog(author, post("Workflow")).await.unwrap();

    // Unpublishing a draft is rejected
    let premature = service.unpublish_blog(blog.id).await;
    assert!(matches!(premature, Err(AppError::Validation(_))));

    let published = service.publish_blog(blog.id).await.unwrap();
    assert_eq!(published.status, BlogStatus::Published);

    // Publishing twice is rejected
    let again = service.publish_blog(blog.id).await;
    assert!(matches!(again, Err(AppError::Validation(_))));

    let drafted = service.unpublish_blog(blog.id).await.unwrap();
    assert_eq!(drafted.status, BlogStatus::Draft);
}

#[tokio::test]
async fn test_like_and_unlike() {
    let (service, _uow, _assets) = make_service();
    let author = Uuid::new_v4();
    let fan = Uuid::new_v4();

    let blog = service.create_blog(author, post("Likeable")).await.unwrap();

    assert_eq!(service.like_blog(fan, blog.id).await.unwrap(), 1);

    // Double-like is rejected
    let twice = service.like_blog(fan, blog.id).await;
    assert!(matches!(twice, Err(AppError::Validation(_))));

    assert_eq!(service.unlike_blog(fan, blog.id).await.unwrap(), 0);

    // Unliking without a prior like is rejected
    let nothing = service.unlike_blog(fan, blog.id).await;
    assert!(matches!(nothing, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_list_filters_and_pagination() {
    let (service, _uow, _assets) = make_service();
    let author = Uuid::new_v4();

    let first = service.create_blog(author, post("Rust Deep Dive")).await.unwrap();
    service.create_blog(author, post("Gardening Notes")).await.unwrap();
    service.create_blog(author, post("More Rust Tricks")).await.unwrap();
    service.publish_blog(first.id).await.unwrap();

    // Case-insensitive search over the text fields
    let (rows, total) = service
        .list_blogs(BlogListQuery {
            search: Some("rust".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(total, 2);
    assert_eq!(rows.len(), 2);

    // Status filter
    let (rows, total) = service
        .list_blogs(BlogListQuery {
            status: Some(BlogStatus::Published),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(rows[0].0.id, first.id);

    // Pagination slices the filtered set; the total stays the filtered count
    let (rows, total) = service
        .list_blogs(BlogListQuery {
            pagination: PaginationParams { page: 2, limit: 2 },
            sort: Some(SortDirection::Asc),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(total, 3);
    assert_eq!(rows.len(), 1);
}
