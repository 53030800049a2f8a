//! User entity - Every person known to the system.
//!
//! Admins, caregivers, donors and children all share this table; the `role`
//! column decides which relations a user may take part in.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Staff member with full authority
    #[sea_orm(string_value = "admin")]
    Admin,
    /// Staff member looking after children
    #[sea_orm(string_value = "caregiver")]
    Caregiver,
    /// External supporter who donates money or items
    #[sea_orm(string_value = "donor")]
    Donor,
    /// Resident child; owns exactly one child profile
    #[sea_orm(string_value = "child")]
    Child,
}

impl UserRole {
    /// Whether the role carries authority to approve expenses.
    #[must_use]
    pub const fn is_staff(self) -> bool {
        matches!(self, Self::Admin | Self::Caregiver)
    }
}

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login name, unique across the store
    #[sea_orm(unique)]
    pub username: String,
    /// Contact email, unique across the store
    #[sea_orm(unique)]
    pub email: String,
    /// Opaque password hash; never serialized
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Role of the account
    pub role: UserRole,
    /// Optional phone number
    pub phone: Option<String>,
    /// Optional postal address
    pub address: Option<String>,
    /// Whether the account is enabled
    pub is_active: bool,
    /// When the user was created
    pub created_at: DateTimeUtc,
    /// When the user was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A child-role user has one child profile
    #[sea_orm(has_one = "super::child::Entity")]
    Child,
    /// A donor has many donations
    #[sea_orm(has_many = "super::donation::Entity")]
    Donations,
    /// A user organizes many activities
    #[sea_orm(has_many = "super::activity::Entity")]
    Activities,
}

impl Related<super::child::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Child.def()
    }
}

impl Related<super::donation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Donations.def()
    }
}

impl Related<super::activity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Activities.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
