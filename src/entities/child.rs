//! Child entity - Care profile attached to a child-role user.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Gender recorded on a child profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male
    #[sea_orm(string_value = "male")]
    Male,
    /// Female
    #[sea_orm(string_value = "female")]
    Female,
    /// Other or undisclosed
    #[sea_orm(string_value = "other")]
    Other,
}

/// Child profile database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "children")]
pub struct Model {
    /// Unique identifier for the profile
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning user; at most one profile per user
    #[sea_orm(unique)]
    pub user_id: i64,
    /// Date of birth
    pub date_of_birth: Date,
    /// Recorded gender
    pub gender: Gender,
    /// Legal guardian, if known
    pub guardian_name: Option<String>,
    /// How to reach the guardian
    pub guardian_contact: Option<String>,
    /// Date the child entered care
    pub admission_date: Date,
    /// Current grade or level
    pub education_level: Option<String>,
    /// School the child attends
    pub school_name: Option<String>,
    /// Known conditions and allergies
    pub health_conditions: Option<String>,
    /// Who to call in an emergency
    pub emergency_contact: Option<String>,
    /// When the profile was created
    pub created_at: DateTimeUtc,
    /// When the profile was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Child and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each profile belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
