//! Expense business logic - Money spent by the organization.

use crate::{
    core::{
        audit::{self, Actor, AuditAction, entity_type},
        user::require_user_with_role,
    },
    entities::{Expense, ExpenseCategory, UserRole, expense},
    errors::Result,
    validation::{self, Validate},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Deserialize;
use tracing::{info, instrument};

/// Roles allowed to approve an expense
const APPROVER_ROLES: &[UserRole] = &[UserRole::Admin, UserRole::Caregiver];

/// Input for recording an expense
#[derive(Debug, Clone, Deserialize)]
pub struct CreateExpenseInput {
    /// Budget category
    pub category: ExpenseCategory,
    /// Positive amount spent
    pub amount: f64,
    /// What the money was spent on, must not be blank
    pub description: String,
    /// Receipt or invoice reference
    #[serde(default)]
    pub receipt_number: Option<String>,
    /// Who was paid
    #[serde(default)]
    pub vendor: Option<String>,
    /// Date the money was spent
    pub expense_date: NaiveDate,
    /// Staff member who approved the expense
    #[serde(default)]
    pub approved_by: Option<i64>,
}

impl Validate for CreateExpenseInput {
    fn validate(&self) -> Result<()> {
        validation::positive_amount("amount", self.amount)?;
        validation::not_blank("description", &self.description)
    }
}

/// Records an expense, checking that the approver (if any) is staff.
#[instrument(skip(db, actor, input), fields(category = ?input.category))]
pub async fn create_expense(
    db: &DatabaseConnection,
    actor: &Actor,
    input: CreateExpenseInput,
) -> Result<expense::Model> {
    input.validate()?;

    let txn = db.begin().await?;
    if let Some(approver_id) = input.approved_by {
        require_user_with_role(&txn, approver_id, APPROVER_ROLES, "approving an expense").await?;
    }

    let created = expense::ActiveModel {
        category: Set(input.category),
        amount: Set(input.amount),
        description: Set(validation::clean(&input.description)),
        receipt_number: Set(input.receipt_number),
        vendor: Set(input.vendor),
        expense_date: Set(input.expense_date),
        approved_by: Set(input.approved_by),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    audit::record(
        &txn,
        actor,
        AuditAction::Create,
        entity_type::EXPENSE,
        created.id,
        None,
        Some(&created),
    )
    .await?;
    txn.commit().await?;

    info!(expense_id = created.id, amount = created.amount, "Expense recorded");
    Ok(created)
}

/// Retrieves all expenses, most recent first.
pub async fn get_expenses(db: &DatabaseConnection) -> Result<Vec<expense::Model>> {
    Expense::find()
        .order_by_desc(expense::Column::ExpenseDate)
        .order_by_desc(expense::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the expenses of one category, most recent first.
pub async fn get_expenses_by_category(
    db: &DatabaseConnection,
    category: ExpenseCategory,
) -> Result<Vec<expense::Model>> {
    Expense::find()
        .filter(expense::Column::Category.eq(category))
        .order_by_desc(expense::Column::ExpenseDate)
        .order_by_desc(expense::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
