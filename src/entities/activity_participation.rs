//! Activity participation entity - Join rows between activities and users.
//!
//! The `(activity_id, user_id)` pair is unique; the index is created in
//! `config::database::create_tables`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Participation database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activity_participation")]
pub struct Model {
    /// Unique identifier for the participation
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Activity joined
    pub activity_id: i64,
    /// Participating user
    pub user_id: i64,
    /// When the user was added to the activity
    pub participation_date: DateTimeUtc,
    /// Remarks recorded when the user was added
    pub notes: Option<String>,
}

/// Defines relationships between participation rows and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::activity::Entity",
        from = "Column::ActivityId",
        to = "super::activity::Column::Id"
    )]
    /// Each participation belongs to one activity
    Activity,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    /// Each participation belongs to one user
    User,
}

impl Related<super::activity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Activity.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
