//! Shared test utilities for the records backend.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        activity::{self, CreateActivityInput},
        audit::Actor,
        donation::{self, CreateDonationInput},
        password::PasswordHasher,
        user::{self, CreateUserInput},
    },
    entities::{self, DonationType, UserRole},
    errors::Result,
};
use chrono::{NaiveDate, Utc};
use sea_orm::{ConnectOptions, DatabaseConnection};
use tempfile::TempDir;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
///
/// The pool holds exactly one connection, so concurrent transactions in a test
/// queue behind each other instead of failing on a locked shared cache.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = sea_orm::Database::connect(options).await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a file-backed `SQLite` database served by a pool of
/// `max_connections` connections.
///
/// Use this when a test needs transactions running on separate connections.
/// The returned [`TempDir`] owns the database file and must outlive `db`.
pub async fn setup_pooled_test_db(max_connections: u32) -> Result<(DatabaseConnection, TempDir)> {
    let dir = TempDir::new()?;
    let url = format!(
        "sqlite://{}?mode=rwc",
        dir.path().join("records.sqlite").display()
    );
    let mut options = ConnectOptions::new(url);
    options
        .max_connections(max_connections)
        .sqlx_logging(false);
    let db = sea_orm::Database::connect(options).await?;
    crate::config::database::create_tables(&db).await?;
    Ok((db, dir))
}

/// Stand-in for the Argon2 hasher; stores `plain:<password>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash_password(&self, password: &str) -> Result<String> {
        Ok(format!("plain:{password}"))
    }

    fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        Ok(hash.strip_prefix("plain:") == Some(password))
    }
}

/// Current UTC date.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// An actor for the given user without an address.
pub const fn system_actor(user_id: i64) -> Actor {
    Actor::new(user_id)
}

/// Creates a test user with sensible defaults.
///
/// # Defaults
/// * email: `<username>@example.org`
/// * password: "secret123" (hashed with [`PlainHasher`])
/// * names: "Test" / the username
/// * the user is recorded as the actor of its own creation
pub async fn create_test_user(
    db: &DatabaseConnection,
    username: &str,
    role: UserRole,
) -> Result<entities::user::Model> {
    user::create_user(
        db,
        &PlainHasher,
        None,
        CreateUserInput {
            username: username.to_string(),
            email: format!("{username}@example.org"),
            password: "secret123".to_string(),
            first_name: "Test".to_string(),
            last_name: username.to_string(),
            role,
            phone: None,
            address: None,
        },
    )
    .await
}

/// Records a money donation on behalf of the donor.
pub async fn create_test_money_donation(
    db: &DatabaseConnection,
    donor_id: i64,
    amount: f64,
    donation_date: NaiveDate,
) -> Result<entities::donation::Model> {
    donation::create_donation(
        db,
        &system_actor(donor_id),
        CreateDonationInput {
            donor_id,
            donation_type: DonationType::Money,
            amount: Some(amount),
            item_name: None,
            item_quantity: None,
            item_value: None,
            description: None,
            donation_date,
        },
    )
    .await
}

/// Creates a test activity organized (and recorded) by `organizer_id`.
///
/// # Defaults
/// * name: "Test Activity"
/// * no description or location
pub async fn create_test_activity(
    db: &DatabaseConnection,
    organizer_id: i64,
    activity_date: NaiveDate,
    max_participants: Option<i32>,
) -> Result<entities::activity::Model> {
    activity::create_activity(
        db,
        &system_actor(organizer_id),
        CreateActivityInput {
            name: "Test Activity".to_string(),
            description: None,
            activity_date,
            location: None,
            organizer_id,
            max_participants,
        },
    )
    .await
}
