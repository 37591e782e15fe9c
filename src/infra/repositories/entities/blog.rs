//! Blog database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Blog, BlogStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "blogs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub slug: String,
    pub user_id: Uuid,
    pub title: String,
    pub short_description: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    /// Hosted image URL on the external asset host
    pub image: Option<String>,
    /// JSON array of tag strings
    pub tags: Json,
    pub status: String,
    /// JSON array of user ids
    pub likes: Json,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Blog {
    fn from(model: Model) -> Self {
        Blog {
            id: model.id,
            slug: model.slug,
            user_id: model.user_id,
            title: model.title,
            short_description: model.short_description,
            content: model.content,
            image: model.image,
            tags: serde_json::from_value(model.tags).unwrap_or_default(),
            status: BlogStatus::from(model.status.as_str()),
            likes: serde_json::from_value(model.likes).unwrap_or_default(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
