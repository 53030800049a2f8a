//! Activity photo entity - Pictures attached to an activity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Activity photo database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activity_photos")]
pub struct Model {
    /// Unique identifier for the photo
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Activity the photo belongs to
    pub activity_id: i64,
    /// Absolute URL of the stored photo
    pub photo_url: String,
    /// Optional caption
    pub caption: Option<String>,
    /// User who uploaded the photo
    pub uploaded_by: i64,
    /// When the photo was added
    pub created_at: DateTimeUtc,
}

/// Defines relationships between ActivityPhoto and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::activity::Entity",
        from = "Column::ActivityId",
        to = "super::activity::Column::Id"
    )]
    /// Each photo belongs to one activity
    Activity,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UploadedBy",
        to = "super::user::Column::Id"
    )]
    /// Each photo has one uploader
    Uploader,
}

impl Related<super::activity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Activity.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Uploader.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
