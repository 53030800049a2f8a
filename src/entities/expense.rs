//! Expense entity - Money spent by the organization, optionally approved by staff.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Budget category of an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    /// Groceries and meals
    #[sea_orm(string_value = "food")]
    Food,
    /// School fees, books and supplies
    #[sea_orm(string_value = "education")]
    Education,
    /// Medical and dental care
    #[sea_orm(string_value = "healthcare")]
    Healthcare,
    /// Power, water and connectivity
    #[sea_orm(string_value = "utilities")]
    Utilities,
    /// Repairs and upkeep of the premises
    #[sea_orm(string_value = "maintenance")]
    Maintenance,
    /// Wages and staff costs
    #[sea_orm(string_value = "staff")]
    Staff,
    /// Outings and organized activities
    #[sea_orm(string_value = "activities")]
    Activities,
    /// Anything not covered above
    #[sea_orm(string_value = "other")]
    Other,
}

/// Expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Unique identifier for the expense
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Budget category
    pub category: ExpenseCategory,
    /// Amount spent, always positive
    pub amount: f64,
    /// What the money was spent on
    pub description: String,
    /// Receipt or invoice reference
    pub receipt_number: Option<String>,
    /// Who was paid
    pub vendor: Option<String>,
    /// Date the money was spent
    pub expense_date: Date,
    /// Admin or caregiver who approved the expense
    pub approved_by: Option<i64>,
    /// When the record was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Expense and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Optional approving staff member
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ApprovedBy",
        to = "super::user::Column::Id"
    )]
    Approver,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Approver.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
