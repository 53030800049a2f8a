//! Activity business logic - Events, their participants and their photos.
//!
//! Adding a participant takes the activity row's write lock before counting
//! the existing participants, so concurrent adds for the same activity are
//! serialized by the store and `max_participants` is never exceeded.

use crate::{
    core::{
        audit::{self, Actor, AuditAction, entity_type},
        user::{require_user, require_user_with_role},
    },
    entities::{
        Activity, ActivityParticipation, ActivityPhoto, UserRole, activity,
        activity_participation, activity_photo,
    },
    errors::{Error, Result},
    validation::{self, Validate},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ConnectionTrait, PaginatorTrait, QueryOrder, Set, TransactionTrait, prelude::*,
    sea_query::Expr,
};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

/// Roles allowed to organize an activity
const ORGANIZER_ROLES: &[UserRole] = &[UserRole::Admin, UserRole::Caregiver];

/// Input for creating an activity
#[derive(Debug, Clone, Deserialize)]
pub struct CreateActivityInput {
    /// Display name, must not be blank
    pub name: String,
    /// Longer description
    #[serde(default)]
    pub description: Option<String>,
    /// Day the activity takes place
    pub activity_date: NaiveDate,
    /// Where it takes place
    #[serde(default)]
    pub location: Option<String>,
    /// Admin or caregiver organizing it
    pub organizer_id: i64,
    /// Cap on participants, unlimited when absent
    #[serde(default)]
    pub max_participants: Option<i32>,
}

impl Validate for CreateActivityInput {
    fn validate(&self) -> Result<()> {
        validation::not_blank("name", &self.name)?;
        if let Some(max) = self.max_participants {
            validation::positive_count("max_participants", max)?;
        }
        Ok(())
    }
}

/// Input for adding a participant to an activity
#[derive(Debug, Clone, Deserialize)]
pub struct CreateActivityParticipationInput {
    /// Activity to join
    pub activity_id: i64,
    /// User joining it
    pub user_id: i64,
    /// Optional remarks
    #[serde(default)]
    pub notes: Option<String>,
}

/// Input for attaching a photo to an activity
#[derive(Debug, Clone, Deserialize)]
pub struct CreateActivityPhotoInput {
    /// Activity the photo belongs to
    pub activity_id: i64,
    /// Absolute URL of the stored photo
    pub photo_url: String,
    /// Optional caption
    #[serde(default)]
    pub caption: Option<String>,
    /// User uploading the photo
    pub uploaded_by: i64,
}

impl Validate for CreateActivityPhotoInput {
    fn validate(&self) -> Result<()> {
        validation::url("photo_url", &self.photo_url)
    }
}

async fn require_activity<C>(conn: &C, activity_id: i64) -> Result<activity::Model>
where
    C: ConnectionTrait,
{
    Activity::find_by_id(activity_id)
        .one(conn)
        .await?
        .ok_or(Error::NotFound {
            entity: "activity",
            id: activity_id,
        })
}

/// Takes the write lock on one activity row for the rest of the transaction.
///
/// The update assigns `max_participants` to itself, so the row is unchanged.
async fn lock_activity<C>(conn: &C, activity_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let locked = Activity::update_many()
        .col_expr(
            activity::Column::MaxParticipants,
            Expr::col(activity::Column::MaxParticipants).into(),
        )
        .filter(activity::Column::Id.eq(activity_id))
        .exec(conn)
        .await?;
    if locked.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "activity",
            id: activity_id,
        });
    }
    Ok(())
}

/// Creates an activity organized by a staff member.
#[instrument(skip(db, actor, input), fields(organizer_id = input.organizer_id))]
pub async fn create_activity(
    db: &DatabaseConnection,
    actor: &Actor,
    input: CreateActivityInput,
) -> Result<activity::Model> {
    input.validate()?;

    let txn = db.begin().await?;
    require_user_with_role(&txn, input.organizer_id, ORGANIZER_ROLES, "organizing an activity")
        .await?;

    let now = Utc::now();
    let created = activity::ActiveModel {
        name: Set(validation::clean(&input.name)),
        description: Set(input.description),
        activity_date: Set(input.activity_date),
        location: Set(input.location),
        organizer_id: Set(input.organizer_id),
        max_participants: Set(input.max_participants),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    audit::record(
        &txn,
        actor,
        AuditAction::Create,
        entity_type::ACTIVITY,
        created.id,
        None,
        Some(&created),
    )
    .await?;
    txn.commit().await?;

    info!(activity_id = created.id, name = %created.name, "Activity created");
    Ok(created)
}

/// Retrieves all activities ordered by id.
pub async fn get_activities(db: &DatabaseConnection) -> Result<Vec<activity::Model>> {
    Activity::find()
        .order_by_asc(activity::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an activity by id, returning None if it does not exist.
pub async fn get_activity_by_id(
    db: &DatabaseConnection,
    activity_id: i64,
) -> Result<Option<activity::Model>> {
    Activity::find_by_id(activity_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Adds a user to an activity.
///
/// Fails with [`Error::Conflict`] if the user already participates and with
/// [`Error::CapacityExceeded`] if the activity is full.
#[instrument(skip(db, actor, input), fields(activity_id = input.activity_id, user_id = input.user_id))]
pub async fn add_activity_participant(
    db: &DatabaseConnection,
    actor: &Actor,
    input: CreateActivityParticipationInput,
) -> Result<activity_participation::Model> {
    let txn = db.begin().await?;
    lock_activity(&txn, input.activity_id).await?;
    let target = require_activity(&txn, input.activity_id).await?;
    require_user(&txn, input.user_id).await?;

    let already = ActivityParticipation::find()
        .filter(activity_participation::Column::ActivityId.eq(input.activity_id))
        .filter(activity_participation::Column::UserId.eq(input.user_id))
        .count(&txn)
        .await?;
    if already > 0 {
        debug!("Participant already registered");
        return Err(Error::Conflict {
            message: format!(
                "user {} already participates in activity {}",
                input.user_id, input.activity_id
            ),
        });
    }

    if let Some(max) = target.max_participants {
        let current = ActivityParticipation::find()
            .filter(activity_participation::Column::ActivityId.eq(input.activity_id))
            .count(&txn)
            .await?;
        if current >= u64::try_from(max).unwrap_or(0) {
            warn!(current, max, "Activity is full");
            return Err(Error::CapacityExceeded {
                activity_id: input.activity_id,
                max_participants: max,
            });
        }
    }

    let created = activity_participation::ActiveModel {
        activity_id: Set(input.activity_id),
        user_id: Set(input.user_id),
        participation_date: Set(Utc::now()),
        notes: Set(input.notes),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .map_err(|e| Error::conflict_on_unique(e, "user already participates in this activity"))?;

    audit::record(
        &txn,
        actor,
        AuditAction::Create,
        entity_type::ACTIVITY_PARTICIPATION,
        created.id,
        None,
        Some(&created),
    )
    .await?;
    txn.commit().await?;

    info!(participation_id = created.id, "Participant added");
    Ok(created)
}

/// Retrieves the participation rows of one activity ordered by id.
///
/// Fails with [`Error::NotFound`] if the activity does not exist.
pub async fn get_activity_participants(
    db: &DatabaseConnection,
    activity_id: i64,
) -> Result<Vec<activity_participation::Model>> {
    require_activity(db, activity_id).await?;
    ActivityParticipation::find()
        .filter(activity_participation::Column::ActivityId.eq(activity_id))
        .order_by_asc(activity_participation::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Attaches a photo to an activity.
#[instrument(skip(db, actor, input), fields(activity_id = input.activity_id))]
pub async fn add_activity_photo(
    db: &DatabaseConnection,
    actor: &Actor,
    input: CreateActivityPhotoInput,
) -> Result<activity_photo::Model> {
    input.validate()?;

    let txn = db.begin().await?;
    require_activity(&txn, input.activity_id).await?;
    require_user(&txn, input.uploaded_by).await?;

    let created = activity_photo::ActiveModel {
        activity_id: Set(input.activity_id),
        photo_url: Set(input.photo_url.trim().to_string()),
        caption: Set(input.caption),
        uploaded_by: Set(input.uploaded_by),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    audit::record(
        &txn,
        actor,
        AuditAction::Create,
        entity_type::ACTIVITY_PHOTO,
        created.id,
        None,
        Some(&created),
    )
    .await?;
    txn.commit().await?;

    info!(photo_id = created.id, "Activity photo added");
    Ok(created)
}

/// Retrieves the photos of one activity ordered by id.
///
/// Fails with [`Error::NotFound`] if the activity does not exist.
pub async fn get_activity_photos(
    db: &DatabaseConnection,
    activity_id: i64,
) -> Result<Vec<activity_photo::Model>> {
    require_activity(db, activity_id).await?;
    ActivityPhoto::find()
        .filter(activity_photo::Column::ActivityId.eq(activity_id))
        .order_by_asc(activity_photo::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
