//! Database configuration module.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so unique columns and foreign keys declared on the entities end up in the schema without
//! hand-written SQL. Creation is idempotent and safe to run on every start.

use crate::entities::{
    Activity, ActivityParticipation, ActivityPhoto, AuditLog, Child, Donation, Expense, User,
    activity_participation,
};
use crate::errors::Result;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema,
    sea_query::Index,
};
use tracing::{debug, info};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/care_records.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable or returns the
/// default local `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database at `database_url`.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Connecting to database at {database_url}");
    let mut options = ConnectOptions::new(database_url.to_owned());
    options.sqlx_logging(false);
    Database::connect(options).await.map_err(Into::into)
}

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

/// Creates all tables and indexes if they do not exist yet.
///
/// Parents are created before the tables whose foreign keys point at them.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    create_table(db, &schema, User).await?;
    create_table(db, &schema, Child).await?;
    create_table(db, &schema, Donation).await?;
    create_table(db, &schema, Expense).await?;
    create_table(db, &schema, Activity).await?;
    create_table(db, &schema, ActivityParticipation).await?;
    create_table(db, &schema, ActivityPhoto).await?;
    create_table(db, &schema, AuditLog).await?;

    // A user can join a given activity only once
    let participation_pair = Index::create()
        .name("idx_activity_participation_unique")
        .table(ActivityParticipation)
        .col(activity_participation::Column::ActivityId)
        .col(activity_participation::Column::UserId)
        .unique()
        .if_not_exists()
        .to_owned();
    db.execute(builder.build(&participation_pair)).await?;

    info!("Database tables ensured.");
    Ok(())
}
