use care_records::{
    config::{
        database,
        settings::{self, BOOTSTRAP_PASSWORD_ENV, BootstrapAdmin},
    },
    core::{
        dashboard,
        password::Argon2Hasher,
        user::{self, CreateUserInput},
    },
    entities::UserRole,
    errors::Result,
};
use dotenvy::dotenv;
use sea_orm::DatabaseConnection;
use std::env;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Creates the configured administrator unless a user with that username exists.
async fn seed_bootstrap_admin(db: &DatabaseConnection, admin: &BootstrapAdmin) -> Result<()> {
    if user::get_user_by_username(db, &admin.username)
        .await?
        .is_some()
    {
        info!(username = %admin.username, "Bootstrap admin already present");
        return Ok(());
    }

    let Ok(password) = env::var(BOOTSTRAP_PASSWORD_ENV) else {
        warn!("{BOOTSTRAP_PASSWORD_ENV} is not set; skipping bootstrap admin");
        return Ok(());
    };

    let created = user::create_user(
        db,
        &Argon2Hasher::new(),
        None,
        CreateUserInput {
            username: admin.username.clone(),
            email: admin.email.clone(),
            password,
            first_name: admin.first_name.clone(),
            last_name: admin.last_name.clone(),
            role: UserRole::Admin,
            phone: None,
            address: None,
        },
    )
    .await?;
    info!(user_id = created.id, "Bootstrap admin created");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, env vars can also be set externally
    dotenv().ok();

    // 3. Load application settings
    let app_settings = settings::load_default_settings()
        .inspect_err(|e| error!("Failed to load settings: {e}"))?;

    // 4. Connect and create the schema
    let db = database::create_connection(&database::get_database_url())
        .await
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db)
        .await
        .inspect(|()| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    // 5. Seed the administrator account
    if let Some(admin) = &app_settings.bootstrap_admin {
        seed_bootstrap_admin(&db, admin)
            .await
            .inspect_err(|e| error!("Failed to seed bootstrap admin: {e}"))?;
    }

    // 6. Report the current state
    let summary = dashboard::get_admin_dashboard(&db).await?;
    info!(
        children = summary.total_children,
        donors = summary.total_donors,
        donations_this_month = summary.total_donations_this_month,
        expenses_this_month = summary.total_expenses_this_month,
        upcoming_activities = summary.upcoming_activities,
        "Records store ready"
    );

    Ok(())
}
