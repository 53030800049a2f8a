//! Dashboard read models.
//!
//! This module computes the admin-wide and donor-specific summaries straight
//! from the store. Each call reads inside a single transaction so all figures
//! come from the same snapshot. Nothing here writes or audits.

use crate::{
    core::user::require_user_with_role,
    entities::{
        Activity, Child, Donation, DonationType, Expense, User, UserRole, activity, donation,
        expense, user,
    },
    errors::Result,
};
use chrono::{Datelike, Days, Months, NaiveDate, Utc};
use sea_orm::{
    PaginatorTrait, QueryOrder, QuerySelect, Select, TransactionTrait, prelude::*,
    sea_query::Expr,
};
use serde::Serialize;
use tracing::{debug, instrument};

/// Length of the "recent" lists on both dashboards.
pub const RECENT_ITEMS_LIMIT: u64 = 5;

/// Organization-wide figures for staff.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminDashboard {
    /// Number of child profiles
    pub total_children: u64,
    /// Number of donor-role users
    pub total_donors: u64,
    /// Sum of money donations dated in the current month
    pub total_donations_this_month: f64,
    /// Sum of expenses dated in the current month
    pub total_expenses_this_month: f64,
    /// Number of activities dated after today
    pub upcoming_activities: u64,
    /// Most recent donations, newest first
    pub recent_donations: Vec<donation::Model>,
    /// Most recent expenses, newest first
    pub recent_expenses: Vec<expense::Model>,
}

/// Giving summary for a single donor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonorDashboard {
    /// Number of donations of any type
    pub total_donations: u64,
    /// Sum of money donations
    pub total_amount_donated: f64,
    /// Most recent donations, newest first
    pub recent_donations: Vec<donation::Model>,
    /// Every donation, newest first
    pub donation_history: Vec<donation::Model>,
}

/// Returns the first and last day of the month containing `today`.
fn month_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = today - Days::new(u64::from(today.day0()));
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX);
    (first, last)
}

/// Sums `column` over the rows matched by `query`, treating no rows as zero.
async fn sum_column<C, E>(conn: &C, query: Select<E>, column: E::Column) -> Result<f64>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let total: Option<Option<f64>> = query
        .select_only()
        .column_as(Expr::col(column).sum(), "total")
        .into_tuple()
        .one(conn)
        .await?;
    Ok(total.flatten().unwrap_or(0.0))
}

/// Computes the admin dashboard for the current UTC date.
pub async fn get_admin_dashboard(db: &DatabaseConnection) -> Result<AdminDashboard> {
    admin_dashboard_as_of(db, Utc::now().date_naive()).await
}

/// Computes the admin dashboard as seen on `today`.
///
/// # Arguments
/// * `db` - Database connection
/// * `today` - Reference date for the monthly totals and upcoming activities
///
/// # Returns
/// An `AdminDashboard` whose monthly totals cover the first through the last
/// day of `today`'s month, and whose upcoming count includes only activities
/// strictly after `today`.
#[instrument(skip(db))]
pub async fn admin_dashboard_as_of(
    db: &DatabaseConnection,
    today: NaiveDate,
) -> Result<AdminDashboard> {
    let (month_start, month_end) = month_bounds(today);
    let txn = db.begin().await?;

    let total_children = Child::find().count(&txn).await?;
    let total_donors = User::find()
        .filter(user::Column::Role.eq(UserRole::Donor))
        .count(&txn)
        .await?;

    let total_donations_this_month = sum_column(
        &txn,
        Donation::find()
            .filter(donation::Column::DonationType.eq(DonationType::Money))
            .filter(donation::Column::DonationDate.between(month_start, month_end)),
        donation::Column::Amount,
    )
    .await?;
    let total_expenses_this_month = sum_column(
        &txn,
        Expense::find().filter(expense::Column::ExpenseDate.between(month_start, month_end)),
        expense::Column::Amount,
    )
    .await?;

    let upcoming_activities = Activity::find()
        .filter(activity::Column::ActivityDate.gt(today))
        .count(&txn)
        .await?;

    let recent_donations = Donation::find()
        .order_by_desc(donation::Column::DonationDate)
        .order_by_desc(donation::Column::Id)
        .limit(RECENT_ITEMS_LIMIT)
        .all(&txn)
        .await?;
    let recent_expenses = Expense::find()
        .order_by_desc(expense::Column::ExpenseDate)
        .order_by_desc(expense::Column::Id)
        .limit(RECENT_ITEMS_LIMIT)
        .all(&txn)
        .await?;
    txn.commit().await?;

    debug!(
        total_children,
        total_donors, upcoming_activities, "Admin dashboard computed"
    );
    Ok(AdminDashboard {
        total_children,
        total_donors,
        total_donations_this_month,
        total_expenses_this_month,
        upcoming_activities,
        recent_donations,
        recent_expenses,
    })
}

/// Computes the giving summary of one donor.
///
/// Fails with `NotFound` for an unknown id and `PermissionDenied` if the user
/// is not a donor.
#[instrument(skip(db))]
pub async fn get_donor_dashboard(db: &DatabaseConnection, donor_id: i64) -> Result<DonorDashboard> {
    let txn = db.begin().await?;
    require_user_with_role(&txn, donor_id, &[UserRole::Donor], "a donor dashboard").await?;

    let by_donor = || Donation::find().filter(donation::Column::DonorId.eq(donor_id));

    let total_donations = by_donor().count(&txn).await?;
    let total_amount_donated = sum_column(
        &txn,
        by_donor().filter(donation::Column::DonationType.eq(DonationType::Money)),
        donation::Column::Amount,
    )
    .await?;
    let newest_first = || {
        by_donor()
            .order_by_desc(donation::Column::DonationDate)
            .order_by_desc(donation::Column::Id)
    };
    let recent_donations = newest_first()
        .limit(RECENT_ITEMS_LIMIT)
        .all(&txn)
        .await?;
    let donation_history = newest_first().all(&txn).await?;
    txn.commit().await?;

    Ok(DonorDashboard {
        total_donations,
        total_amount_donated,
        recent_donations,
        donation_history,
    })
}
