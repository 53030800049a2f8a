//! Audit trail - Records who changed what.
//!
//! Mutating operations call [`record`] inside their own database transaction,
//! so an entity row and its audit entry are committed or rolled back together.
//! Entries are never updated or deleted.

use crate::{
    core::user::require_user,
    entities::{AuditLog, audit_log},
    errors::Result,
    validation::{self, Validate},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// The user on whose behalf a mutation runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Acting user id
    pub user_id: i64,
    /// Caller address, if the transport knows it
    pub ip_address: Option<String>,
}

impl Actor {
    /// Creates an actor without an address.
    #[must_use]
    pub const fn new(user_id: i64) -> Self {
        Self {
            user_id,
            ip_address: None,
        }
    }

    /// Attaches the caller address.
    #[must_use]
    pub fn with_ip(mut self, ip_address: impl Into<String>) -> Self {
        self.ip_address = Some(ip_address.into());
        self
    }
}

/// Verb stored in `audit_log.action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    /// A row was inserted
    Create,
    /// A row was modified
    Update,
    /// A row was removed
    Delete,
}

impl AuditAction {
    /// Stored representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Entity names stored in `audit_log.entity_type`.
pub mod entity_type {
    /// `users` rows
    pub const USER: &str = "user";
    /// `children` rows
    pub const CHILD: &str = "child";
    /// `donations` rows
    pub const DONATION: &str = "donation";
    /// `expenses` rows
    pub const EXPENSE: &str = "expense";
    /// `activities` rows
    pub const ACTIVITY: &str = "activity";
    /// `activity_participation` rows
    pub const ACTIVITY_PARTICIPATION: &str = "activity_participation";
    /// `activity_photos` rows
    pub const ACTIVITY_PHOTO: &str = "activity_photo";
}

fn snapshot<S: Serialize>(value: Option<&S>) -> Result<Option<String>> {
    value
        .map(serde_json::to_string)
        .transpose()
        .map_err(Into::into)
}

/// Appends one audit entry for a mutation.
///
/// Must be called with the same connection or transaction that performs the
/// mutation. The actor has to exist at the time of writing.
pub(crate) async fn record<C, S>(
    conn: &C,
    actor: &Actor,
    action: AuditAction,
    entity_type: &str,
    entity_id: i64,
    old_values: Option<&S>,
    new_values: Option<&S>,
) -> Result<audit_log::Model>
where
    C: ConnectionTrait,
    S: Serialize,
{
    require_user(conn, actor.user_id).await?;

    let entry = audit_log::ActiveModel {
        user_id: Set(actor.user_id),
        action: Set(action.as_str().to_string()),
        entity_type: Set(entity_type.to_string()),
        entity_id: Set(Some(entity_id)),
        old_values: Set(snapshot(old_values)?),
        new_values: Set(snapshot(new_values)?),
        ip_address: Set(actor.ip_address.clone()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let entry = entry.insert(conn).await?;
    debug!(
        audit_id = entry.id,
        action = action.as_str(),
        entity_type,
        entity_id,
        "Audit entry recorded"
    );
    Ok(entry)
}

/// Input for writing an audit entry directly
///
/// Keys are camelCase on the wire (`userId`, `entityType`, `ipAddress`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuditLogInput {
    /// Acting user, must exist
    pub user_id: i64,
    /// Verb describing what happened
    pub action: String,
    /// Kind of entity affected
    pub entity_type: String,
    /// Affected row, when there is one
    #[serde(default)]
    pub entity_id: Option<i64>,
    /// JSON snapshot before the action
    #[serde(default)]
    pub old_values: Option<String>,
    /// JSON snapshot after the action
    #[serde(default)]
    pub new_values: Option<String>,
    /// Caller address, when known
    #[serde(default)]
    pub ip_address: Option<String>,
}

impl Validate for CreateAuditLogInput {
    fn validate(&self) -> Result<()> {
        validation::not_blank("action", &self.action)?;
        validation::not_blank("entity_type", &self.entity_type)
    }
}

/// Writes an audit entry supplied by the caller, for actions that happen
/// outside this crate (logins, exports, ...).
#[instrument(skip(db, input), fields(user_id = input.user_id))]
pub async fn create_audit_log(
    db: &DatabaseConnection,
    input: CreateAuditLogInput,
) -> Result<audit_log::Model> {
    input.validate()?;
    require_user(db, input.user_id).await?;

    let entry = audit_log::ActiveModel {
        user_id: Set(input.user_id),
        action: Set(validation::clean(&input.action)),
        entity_type: Set(validation::clean(&input.entity_type)),
        entity_id: Set(input.entity_id),
        old_values: Set(input.old_values),
        new_values: Set(input.new_values),
        ip_address: Set(input.ip_address),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    entry.insert(db).await.map_err(Into::into)
}

/// Retrieves every audit entry, newest first.
pub async fn get_audit_logs(db: &DatabaseConnection) -> Result<Vec<audit_log::Model>> {
    AuditLog::find()
        .order_by_desc(audit_log::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the audit history of one entity, newest first.
pub async fn get_audit_logs_for_entity(
    db: &DatabaseConnection,
    entity_type: &str,
    entity_id: i64,
) -> Result<Vec<audit_log::Model>> {
    AuditLog::find()
        .filter(audit_log::Column::EntityType.eq(entity_type))
        .filter(audit_log::Column::EntityId.eq(entity_id))
        .order_by_desc(audit_log::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
