//! Audit log entity - Append-only trail of every mutating operation.
//!
//! `user_id` names the acting user. It is deliberately not a foreign key so
//! entries outlive the accounts they mention; existence is checked on write.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Audit log database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "audit_log")]
pub struct Model {
    /// Unique identifier for the entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Acting user
    pub user_id: i64,
    /// Verb, e.g. `"create"`, `"update"`, `"delete"`
    pub action: String,
    /// Table-level name of the affected entity, e.g. `"donation"`
    pub entity_type: String,
    /// Id of the affected row, when there is one
    pub entity_id: Option<i64>,
    /// JSON snapshot before the change
    pub old_values: Option<String>,
    /// JSON snapshot after the change
    pub new_values: Option<String>,
    /// Caller address, when known
    pub ip_address: Option<String>,
    /// When the entry was written
    pub created_at: DateTimeUtc,
}

/// `AuditLog` has no enforced relationships
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
