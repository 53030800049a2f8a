//! Activity entity - Organized events children and staff can join.
//!
//! `max_participants`, when set, caps the number of participation rows.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Activity database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activities")]
pub struct Model {
    /// Unique identifier for the activity
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name
    pub name: String,
    /// Longer description of the activity
    pub description: Option<String>,
    /// Day the activity takes place
    pub activity_date: Date,
    /// Where the activity takes place
    pub location: Option<String>,
    /// User who organizes the activity
    pub organizer_id: i64,
    /// Hard cap on participants, unlimited when None
    pub max_participants: Option<i32>,
    /// When the activity was created
    pub created_at: DateTimeUtc,
    /// When the activity was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Activity and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each activity has one organizer
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OrganizerId",
        to = "super::user::Column::Id"
    )]
    Organizer,
    /// One activity has many participation rows
    #[sea_orm(has_many = "super::activity_participation::Entity")]
    Participations,
    /// One activity has many photos
    #[sea_orm(has_many = "super::activity_photo::Entity")]
    Photos,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organizer.def()
    }
}

impl Related<super::activity_participation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participations.def()
    }
}

impl Related<super::activity_photo::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Photos.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
