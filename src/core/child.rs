//! Child profile business logic.
//!
//! A profile can only be attached to a user whose role is `child`, and each
//! such user has at most one profile.

use crate::{
    core::{
        audit::{self, Actor, AuditAction, entity_type},
        user::require_user_with_role,
    },
    entities::{Child, Gender, UserRole, child},
    errors::{Error, Result},
    validation::{self, Patch, Validate},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Deserialize;
use tracing::{info, instrument};

/// Input for creating a child profile
#[derive(Debug, Clone, Deserialize)]
pub struct CreateChildInput {
    /// Child-role user the profile belongs to
    pub user_id: i64,
    /// Date of birth
    pub date_of_birth: NaiveDate,
    /// Recorded gender
    pub gender: Gender,
    /// Legal guardian, if known
    #[serde(default)]
    pub guardian_name: Option<String>,
    /// How to reach the guardian
    #[serde(default)]
    pub guardian_contact: Option<String>,
    /// Date the child entered care, not before birth
    pub admission_date: NaiveDate,
    /// Current grade or level
    #[serde(default)]
    pub education_level: Option<String>,
    /// School the child attends
    #[serde(default)]
    pub school_name: Option<String>,
    /// Known conditions and allergies
    #[serde(default)]
    pub health_conditions: Option<String>,
    /// Who to call in an emergency
    #[serde(default)]
    pub emergency_contact: Option<String>,
}

impl Validate for CreateChildInput {
    fn validate(&self) -> Result<()> {
        admitted_after_birth(self.date_of_birth, self.admission_date)
    }
}

fn admitted_after_birth(date_of_birth: NaiveDate, admission_date: NaiveDate) -> Result<()> {
    if admission_date < date_of_birth {
        return Err(Error::validation(
            "admission_date",
            "cannot be earlier than date_of_birth",
        ));
    }
    Ok(())
}

/// Partial update of a child profile; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateChildInput {
    /// Profile to update
    pub id: i64,
    /// New date of birth; cannot be cleared
    #[serde(default)]
    pub date_of_birth: Patch<NaiveDate>,
    /// New gender; cannot be cleared
    #[serde(default)]
    pub gender: Patch<Gender>,
    /// Guardian name, `null` clears it
    #[serde(default)]
    pub guardian_name: Patch<String>,
    /// Guardian contact, `null` clears it
    #[serde(default)]
    pub guardian_contact: Patch<String>,
    /// Education level, `null` clears it
    #[serde(default)]
    pub education_level: Patch<String>,
    /// School name, `null` clears it
    #[serde(default)]
    pub school_name: Patch<String>,
    /// Health notes, `null` clears them
    #[serde(default)]
    pub health_conditions: Patch<String>,
    /// Emergency contact, `null` clears it
    #[serde(default)]
    pub emergency_contact: Patch<String>,
}

impl Validate for UpdateChildInput {
    fn validate(&self) -> Result<()> {
        validation::not_null("date_of_birth", &self.date_of_birth)?;
        validation::not_null("gender", &self.gender)
    }
}

/// Creates the care profile of a child-role user.
#[instrument(skip(db, actor, input), fields(user_id = input.user_id))]
pub async fn create_child(
    db: &DatabaseConnection,
    actor: &Actor,
    input: CreateChildInput,
) -> Result<child::Model> {
    input.validate()?;

    let txn = db.begin().await?;
    require_user_with_role(&txn, input.user_id, &[UserRole::Child], "a child profile").await?;

    let existing = Child::find()
        .filter(child::Column::UserId.eq(input.user_id))
        .count(&txn)
        .await?;
    if existing > 0 {
        return Err(Error::Conflict {
            message: format!("user {} already has a child profile", input.user_id),
        });
    }

    let now = Utc::now();
    let created = child::ActiveModel {
        user_id: Set(input.user_id),
        date_of_birth: Set(input.date_of_birth),
        gender: Set(input.gender),
        guardian_name: Set(input.guardian_name),
        guardian_contact: Set(input.guardian_contact),
        admission_date: Set(input.admission_date),
        education_level: Set(input.education_level),
        school_name: Set(input.school_name),
        health_conditions: Set(input.health_conditions),
        emergency_contact: Set(input.emergency_contact),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .map_err(|e| {
        Error::conflict_on_unique(e, format!("user {} already has a child profile", input.user_id))
    })?;

    audit::record(
        &txn,
        actor,
        AuditAction::Create,
        entity_type::CHILD,
        created.id,
        None,
        Some(&created),
    )
    .await?;
    txn.commit().await?;

    info!(child_id = created.id, "Child profile created");
    Ok(created)
}

/// Retrieves all child profiles ordered by id.
pub async fn get_children(db: &DatabaseConnection) -> Result<Vec<child::Model>> {
    Child::find()
        .order_by_asc(child::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a child profile by id, returning None if it does not exist.
pub async fn get_child_by_id(db: &DatabaseConnection, child_id: i64) -> Result<Option<child::Model>> {
    Child::find_by_id(child_id).one(db).await.map_err(Into::into)
}

/// Applies a partial update to a child profile.
#[instrument(skip(db, actor, input), fields(child_id = input.id))]
pub async fn update_child(
    db: &DatabaseConnection,
    actor: &Actor,
    input: UpdateChildInput,
) -> Result<child::Model> {
    input.validate()?;

    let txn = db.begin().await?;
    let existing = Child::find_by_id(input.id)
        .one(&txn)
        .await?
        .ok_or(Error::NotFound {
            entity: "child",
            id: input.id,
        })?;

    let mut active: child::ActiveModel = existing.clone().into();
    if let Patch::Value(date_of_birth) = input.date_of_birth {
        admitted_after_birth(date_of_birth, existing.admission_date)?;
        active.date_of_birth = Set(date_of_birth);
    }
    if let Patch::Value(gender) = input.gender {
        active.gender = Set(gender);
    }
    if let Some(value) = input.guardian_name.into_update() {
        active.guardian_name = Set(value);
    }
    if let Some(value) = input.guardian_contact.into_update() {
        active.guardian_contact = Set(value);
    }
    if let Some(value) = input.education_level.into_update() {
        active.education_level = Set(value);
    }
    if let Some(value) = input.school_name.into_update() {
        active.school_name = Set(value);
    }
    if let Some(value) = input.health_conditions.into_update() {
        active.health_conditions = Set(value);
    }
    if let Some(value) = input.emergency_contact.into_update() {
        active.emergency_contact = Set(value);
    }
    active.updated_at = Set(Utc::now());

    let updated = active.update(&txn).await?;
    audit::record(
        &txn,
        actor,
        AuditAction::Update,
        entity_type::CHILD,
        updated.id,
        Some(&existing),
        Some(&updated),
    )
    .await?;
    txn.commit().await?;

    info!(child_id = updated.id, "Child profile updated");
    Ok(updated)
}
