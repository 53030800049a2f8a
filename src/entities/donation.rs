//! Donation entity - Money or in-kind gifts received from donors.
//!
//! Money donations carry `amount`; item donations carry the `item_*` columns.
//! The pairing is enforced by `core::donation::create_donation`, not by the schema.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of donation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
#[serde(rename_all = "snake_case")]
pub enum DonationType {
    /// Monetary gift; `amount` is set
    #[sea_orm(string_value = "money")]
    Money,
    /// In-kind gift; `item_name` and `item_quantity` are set
    #[sea_orm(string_value = "item")]
    Item,
}

/// Donation database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "donations")]
pub struct Model {
    /// Unique identifier for the donation
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Donor-role user who gave the donation
    pub donor_id: i64,
    /// Money or item
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub donation_type: DonationType,
    /// Amount in currency units, money donations only
    pub amount: Option<f64>,
    /// Donated item, item donations only
    pub item_name: Option<String>,
    /// Number of items donated
    pub item_quantity: Option<i32>,
    /// Estimated value of the donated items
    pub item_value: Option<f64>,
    /// Free-form note from the donor or staff
    pub description: Option<String>,
    /// Date the donation was received
    pub donation_date: Date,
    /// When the record was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Donation and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each donation belongs to one donor
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::DonorId",
        to = "super::user::Column::Id"
    )]
    Donor,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Donor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
