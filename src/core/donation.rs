//! Donation business logic - Recording gifts from donors.
//!
//! Money donations must carry a positive `amount` and no item details; item
//! donations must name the item and its quantity and carry no `amount`. Signs
//! are checked by [`Validate`], the type/field pairing by [`create_donation`].

use crate::{
    core::{
        audit::{self, Actor, AuditAction, entity_type},
        user::{require_user, require_user_with_role},
    },
    entities::{Donation, DonationType, UserRole, donation},
    errors::{Error, Result},
    validation::{self, Validate},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Deserialize;
use tracing::{debug, info, instrument};

/// Input for recording a donation
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDonationInput {
    /// Donor-role user giving the donation
    pub donor_id: i64,
    /// Money or item; decides which fields must be present
    #[serde(rename = "type")]
    pub donation_type: DonationType,
    /// Positive amount, money donations only
    #[serde(default)]
    pub amount: Option<f64>,
    /// Donated item, item donations only
    #[serde(default)]
    pub item_name: Option<String>,
    /// Positive number of items, item donations only
    #[serde(default)]
    pub item_quantity: Option<i32>,
    /// Estimated positive value of the items
    #[serde(default)]
    pub item_value: Option<f64>,
    /// Free-form note
    #[serde(default)]
    pub description: Option<String>,
    /// Date the donation was received
    pub donation_date: NaiveDate,
}

impl Validate for CreateDonationInput {
    fn validate(&self) -> Result<()> {
        if let Some(amount) = self.amount {
            validation::positive_amount("amount", amount)?;
        }
        if let Some(quantity) = self.item_quantity {
            validation::positive_count("item_quantity", quantity)?;
        }
        if let Some(value) = self.item_value {
            validation::positive_amount("item_value", value)?;
        }
        if let Some(name) = &self.item_name {
            validation::not_blank("item_name", name)?;
        }
        Ok(())
    }
}

fn invalid_state(message: &str) -> Error {
    Error::InvalidState {
        message: message.to_string(),
    }
}

/// Checks that the populated fields match the donation type.
fn check_type_fields(input: &CreateDonationInput) -> Result<()> {
    match input.donation_type {
        DonationType::Money => {
            if input.amount.is_none() {
                return Err(invalid_state("money donations require an amount"));
            }
            if input.item_name.is_some() || input.item_quantity.is_some() || input.item_value.is_some()
            {
                return Err(invalid_state("money donations cannot carry item details"));
            }
        }
        DonationType::Item => {
            if input.item_name.is_none() {
                return Err(invalid_state("item donations require an item_name"));
            }
            if input.item_quantity.is_none() {
                return Err(invalid_state("item donations require an item_quantity"));
            }
            if input.amount.is_some() {
                return Err(invalid_state(
                    "item donations cannot carry an amount; use item_value",
                ));
            }
        }
    }
    Ok(())
}

/// Records a donation from a donor-role user.
#[instrument(skip(db, actor, input), fields(donor_id = input.donor_id))]
pub async fn create_donation(
    db: &DatabaseConnection,
    actor: &Actor,
    input: CreateDonationInput,
) -> Result<donation::Model> {
    input.validate()?;
    check_type_fields(&input).inspect_err(|e| debug!("Rejected donation: {e}"))?;

    let txn = db.begin().await?;
    require_user_with_role(&txn, input.donor_id, &[UserRole::Donor], "a donation").await?;

    let created = donation::ActiveModel {
        donor_id: Set(input.donor_id),
        donation_type: Set(input.donation_type),
        amount: Set(input.amount),
        item_name: Set(input.item_name.as_deref().map(validation::clean)),
        item_quantity: Set(input.item_quantity),
        item_value: Set(input.item_value),
        description: Set(input.description),
        donation_date: Set(input.donation_date),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    audit::record(
        &txn,
        actor,
        AuditAction::Create,
        entity_type::DONATION,
        created.id,
        None,
        Some(&created),
    )
    .await?;
    txn.commit().await?;

    info!(donation_id = created.id, donor_id = created.donor_id, "Donation recorded");
    Ok(created)
}

/// Retrieves all donations, most recent first.
pub async fn get_donations(db: &DatabaseConnection) -> Result<Vec<donation::Model>> {
    Donation::find()
        .order_by_desc(donation::Column::DonationDate)
        .order_by_desc(donation::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the donations of one donor, most recent first.
///
/// Fails with [`Error::NotFound`] if the donor does not exist.
pub async fn get_donations_by_donor(
    db: &DatabaseConnection,
    donor_id: i64,
) -> Result<Vec<donation::Model>> {
    require_user(db, donor_id).await?;
    Donation::find()
        .filter(donation::Column::DonorId.eq(donor_id))
        .order_by_desc(donation::Column::DonationDate)
        .order_by_desc(donation::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::audit::get_audit_logs_for_entity;
    use crate::errors::ErrorKind;
    use crate::test_utils::*;

    fn money(donor_id: i64, amount: f64) -> CreateDonationInput {
        CreateDonationInput {
            donor_id,
            donation_type: DonationType::Money,
            amount: Some(amount),
            item_name: None,
            item_quantity: None,
            item_value: None,
            description: None,
            donation_date: today(),
        }
    }

    fn items(donor_id: i64) -> CreateDonationInput {
        CreateDonationInput {
            donor_id,
            donation_type: DonationType::Item,
            amount: None,
            item_name: Some("School backpacks".to_string()),
            item_quantity: Some(12),
            item_value: Some(240.0),
            description: Some("Back-to-school drive".to_string()),
            donation_date: today(),
        }
    }

    #[tokio::test]
    async fn test_money_donation_scenario() -> Result<()> {
        let db = setup_test_db().await?;
        let donor = create_test_user(&db, "donor1", UserRole::Donor).await?;

        let created = create_donation(&db, &Actor::new(donor.id), money(donor.id, 100.0)).await?;
        assert_eq!(created.amount, Some(100.0));
        assert_eq!(created.donation_type, DonationType::Money);

        let by_donor = get_donations_by_donor(&db, donor.id).await?;
        assert_eq!(by_donor, vec![created.clone()]);

        let history = get_audit_logs_for_entity(&db, entity_type::DONATION, created.id).await?;
        assert_eq!(history.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_item_donation() -> Result<()> {
        let db = setup_test_db().await?;
        let donor = create_test_user(&db, "donor1", UserRole::Donor).await?;

        let created = create_donation(&db, &Actor::new(donor.id), items(donor.id)).await?;
        assert_eq!(created.amount, None);
        assert_eq!(created.item_name.as_deref(), Some("School backpacks"));
        assert_eq!(created.item_quantity, Some(12));
        Ok(())
    }

    #[tokio::test]
    async fn test_type_field_mismatch_is_invalid_state() -> Result<()> {
        let db = setup_test_db().await?;
        let donor = create_test_user(&db, "donor1", UserRole::Donor).await?;
        let actor = Actor::new(donor.id);

        let mut no_amount = money(donor.id, 10.0);
        no_amount.amount = None;
        let mut money_with_item = money(donor.id, 10.0);
        money_with_item.item_name = Some("Rice".to_string());
        let mut items_with_amount = items(donor.id);
        items_with_amount.amount = Some(5.0);
        let mut nameless_items = items(donor.id);
        nameless_items.item_name = None;

        for input in [no_amount, money_with_item, items_with_amount, nameless_items] {
            let err = create_donation(&db, &actor, input).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidState);
        }
        assert!(get_donations(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_sign_checks_are_validation_errors() -> Result<()> {
        let db = setup_test_db().await?;
        let donor = create_test_user(&db, "donor1", UserRole::Donor).await?;
        let actor = Actor::new(donor.id);

        let err = create_donation(&db, &actor, money(donor.id, -1.0))
            .await
            .unwrap_err();
        assert_eq!(err.field(), Some("amount"));

        let mut zero_items = items(donor.id);
        zero_items.item_quantity = Some(0);
        let err = create_donation(&db, &actor, zero_items).await.unwrap_err();
        assert_eq!(err.field(), Some("item_quantity"));
        Ok(())
    }

    #[tokio::test]
    async fn test_donor_reference_errors() -> Result<()> {
        let db = setup_test_db().await?;
        let caregiver = create_test_user(&db, "carer1", UserRole::Caregiver).await?;
        let actor = Actor::new(caregiver.id);

        let missing = create_donation(&db, &actor, money(777, 10.0))
            .await
            .unwrap_err();
        assert_eq!(missing.kind(), ErrorKind::NotFound);

        let not_a_donor = create_donation(&db, &actor, money(caregiver.id, 10.0))
            .await
            .unwrap_err();
        assert_eq!(not_a_donor.kind(), ErrorKind::PermissionDenied);
        Ok(())
    }

    #[tokio::test]
    async fn test_donations_ordered_by_date_then_id() -> Result<()> {
        let db = setup_test_db().await?;
        let donor = create_test_user(&db, "donor1", UserRole::Donor).await?;
        let other = create_test_user(&db, "donor2", UserRole::Donor).await?;
        let day = |d| NaiveDate::from_ymd_opt(2026, 3, d).unwrap();

        let older = create_test_money_donation(&db, donor.id, 10.0, day(1)).await?;
        let newer_a = create_test_money_donation(&db, donor.id, 20.0, day(5)).await?;
        let newer_b = create_test_money_donation(&db, donor.id, 30.0, day(5)).await?;
        let others = create_test_money_donation(&db, other.id, 40.0, day(3)).await?;

        let ids: Vec<i64> = get_donations(&db).await?.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![newer_b.id, newer_a.id, others.id, older.id]);

        let ids: Vec<i64> = get_donations_by_donor(&db, donor.id)
            .await?
            .iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec![newer_b.id, newer_a.id, older.id]);
        Ok(())
    }
}
