//! User business logic - Accounts for staff, donors and children.
//!
//! Usernames and emails are unique across the store. Uniqueness is checked up
//! front so the caller gets a precise message, and a constraint violation
//! raised by the store on a race is still reported as a conflict. Users who
//! still own rows elsewhere cannot be deleted.

use crate::{
    core::{
        audit::{self, Actor, AuditAction, entity_type},
        password::PasswordHasher,
    },
    entities::{
        Activity, ActivityParticipation, ActivityPhoto, Child, Donation, Expense, User, UserRole,
        activity, activity_participation, activity_photo, child, donation, expense, user,
    },
    errors::{Error, Result},
    validation::{self, Patch, Validate},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Deserialize;
use tracing::{debug, info, instrument};

const USERNAME_MIN_LEN: usize = 3;
const PASSWORD_MIN_LEN: usize = 6;

/// Input for creating a user
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserInput {
    /// Login name, at least three characters and unique
    pub username: String,
    /// Contact address, unique and stored lowercased
    pub email: String,
    /// Plaintext password, hashed before storage
    pub password: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Category driving permitted operations
    pub role: UserRole,
    /// Optional phone number
    #[serde(default)]
    pub phone: Option<String>,
    /// Optional postal address
    #[serde(default)]
    pub address: Option<String>,
}

impl Validate for CreateUserInput {
    fn validate(&self) -> Result<()> {
        validation::min_length("username", self.username.trim(), USERNAME_MIN_LEN)?;
        validation::email("email", &self.email)?;
        validation::min_length("password", &self.password, PASSWORD_MIN_LEN)?;
        validation::not_blank("first_name", &self.first_name)?;
        validation::not_blank("last_name", &self.last_name)
    }
}

/// Partial update of a user; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserInput {
    /// User to update
    pub id: i64,
    /// New login name
    #[serde(default)]
    pub username: Patch<String>,
    /// New contact address
    #[serde(default)]
    pub email: Patch<String>,
    /// New plaintext password
    #[serde(default)]
    pub password: Patch<String>,
    /// New given name
    #[serde(default)]
    pub first_name: Patch<String>,
    /// New family name
    #[serde(default)]
    pub last_name: Patch<String>,
    /// New role; refused while role-bound rows exist
    #[serde(default)]
    pub role: Patch<UserRole>,
    /// Phone number, `null` clears it
    #[serde(default)]
    pub phone: Patch<String>,
    /// Postal address, `null` clears it
    #[serde(default)]
    pub address: Patch<String>,
    /// Enables or disables the account
    #[serde(default)]
    pub is_active: Patch<bool>,
}

impl Validate for UpdateUserInput {
    fn validate(&self) -> Result<()> {
        validation::not_null("username", &self.username)?;
        validation::not_null("email", &self.email)?;
        validation::not_null("password", &self.password)?;
        validation::not_null("first_name", &self.first_name)?;
        validation::not_null("last_name", &self.last_name)?;
        validation::not_null("role", &self.role)?;
        validation::not_null("is_active", &self.is_active)?;

        if let Some(username) = self.username.as_value() {
            validation::min_length("username", username.trim(), USERNAME_MIN_LEN)?;
        }
        if let Some(email) = self.email.as_value() {
            validation::email("email", email)?;
        }
        if let Some(password) = self.password.as_value() {
            validation::min_length("password", password, PASSWORD_MIN_LEN)?;
        }
        if let Some(first_name) = self.first_name.as_value() {
            validation::not_blank("first_name", first_name)?;
        }
        if let Some(last_name) = self.last_name.as_value() {
            validation::not_blank("last_name", last_name)?;
        }
        Ok(())
    }
}

/// Loads a user or fails with [`Error::NotFound`].
pub(crate) async fn require_user<C>(conn: &C, user_id: i64) -> Result<user::Model>
where
    C: ConnectionTrait,
{
    User::find_by_id(user_id)
        .one(conn)
        .await?
        .ok_or(Error::NotFound {
            entity: "user",
            id: user_id,
        })
}

/// Loads a user and checks that it holds one of `allowed` roles.
///
/// `purpose` completes the sentence "... but `purpose` requires ..." in the
/// [`Error::PermissionDenied`] message.
pub(crate) async fn require_user_with_role<C>(
    conn: &C,
    user_id: i64,
    allowed: &[UserRole],
    purpose: &str,
) -> Result<user::Model>
where
    C: ConnectionTrait,
{
    let found = require_user(conn, user_id).await?;
    if !allowed.contains(&found.role) {
        let expected = allowed
            .iter()
            .map(ActiveEnum::to_value)
            .collect::<Vec<_>>()
            .join(" or ");
        debug!(user_id, role = %found.role.to_value(), purpose, "Role check failed");
        return Err(Error::PermissionDenied {
            message: format!(
                "user {user_id} has role '{}' but {purpose} requires {expected}",
                found.role.to_value()
            ),
        });
    }
    Ok(found)
}

/// Fails with [`Error::Conflict`] if another user already has `username` or `email`.
async fn ensure_unique<C>(
    conn: &C,
    username: Option<&str>,
    email: Option<&str>,
    exclude_id: Option<i64>,
) -> Result<()>
where
    C: ConnectionTrait,
{
    let others = || {
        let query = User::find();
        match exclude_id {
            Some(id) => query.filter(user::Column::Id.ne(id)),
            None => query,
        }
    };

    if let Some(username) = username {
        let taken = others()
            .filter(user::Column::Username.eq(username))
            .count(conn)
            .await?;
        if taken > 0 {
            return Err(Error::Conflict {
                message: format!("username '{username}' is already taken"),
            });
        }
    }

    if let Some(email) = email {
        let taken = others()
            .filter(user::Column::Email.eq(email))
            .count(conn)
            .await?;
        if taken > 0 {
            return Err(Error::Conflict {
                message: format!("email '{email}' is already registered"),
            });
        }
    }

    Ok(())
}

/// Kinds of rows that reference a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dependent {
    /// A child profile for the user
    ChildProfile,
    /// Donations given as donor
    Donations,
    /// Expenses approved by the user
    ApprovedExpenses,
    /// Activities the user organizes
    OrganizedActivities,
    /// Activities the user joined
    Participations,
    /// Activity photos the user uploaded
    UploadedPhotos,
}

impl Dependent {
    const fn label(self) -> &'static str {
        match self {
            Self::ChildProfile => "child profile",
            Self::Donations => "donations",
            Self::ApprovedExpenses => "approved expenses",
            Self::OrganizedActivities => "organized activities",
            Self::Participations => "activity participations",
            Self::UploadedPhotos => "uploaded photos",
        }
    }

    /// Whether rows of this kind stay valid after the user takes `role`.
    const fn allows_role(self, role: UserRole) -> bool {
        match self {
            Self::ChildProfile | Self::Donations => false,
            Self::ApprovedExpenses => role.is_staff(),
            Self::OrganizedActivities | Self::Participations | Self::UploadedPhotos => true,
        }
    }
}

fn labels(kinds: &[Dependent]) -> String {
    kinds
        .iter()
        .map(|kind| kind.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Lists the kinds of rows that still reference `user_id`.
async fn dependent_rows<C>(conn: &C, user_id: i64) -> Result<Vec<Dependent>>
where
    C: ConnectionTrait,
{
    let counts = [
        (
            Dependent::ChildProfile,
            Child::find()
                .filter(child::Column::UserId.eq(user_id))
                .count(conn)
                .await?,
        ),
        (
            Dependent::Donations,
            Donation::find()
                .filter(donation::Column::DonorId.eq(user_id))
                .count(conn)
                .await?,
        ),
        (
            Dependent::ApprovedExpenses,
            Expense::find()
                .filter(expense::Column::ApprovedBy.eq(user_id))
                .count(conn)
                .await?,
        ),
        (
            Dependent::OrganizedActivities,
            Activity::find()
                .filter(activity::Column::OrganizerId.eq(user_id))
                .count(conn)
                .await?,
        ),
        (
            Dependent::Participations,
            ActivityParticipation::find()
                .filter(activity_participation::Column::UserId.eq(user_id))
                .count(conn)
                .await?,
        ),
        (
            Dependent::UploadedPhotos,
            ActivityPhoto::find()
                .filter(activity_photo::Column::UploadedBy.eq(user_id))
                .count(conn)
                .await?,
        ),
    ];

    Ok(counts
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(kind, _)| kind)
        .collect())
}

/// Rejects a role change that would leave role-bound rows pointing at the wrong kind of user.
async fn ensure_role_change_allowed<C>(
    conn: &C,
    existing: &user::Model,
    new_role: UserRole,
) -> Result<()>
where
    C: ConnectionTrait,
{
    let blocking: Vec<Dependent> = dependent_rows(conn, existing.id)
        .await?
        .into_iter()
        .filter(|kind| !kind.allows_role(new_role))
        .collect();

    if blocking.is_empty() {
        return Ok(());
    }
    Err(Error::InvalidState {
        message: format!(
            "cannot change role of user {} from '{}' to '{}' while it has {}",
            existing.id,
            existing.role.to_value(),
            new_role.to_value(),
            labels(&blocking)
        ),
    })
}

/// Creates a user with a hashed password.
///
/// When `actor` is `None` (self-registration or bootstrap), the new user is
/// recorded as the actor of its own creation.
#[instrument(skip(db, hasher, input), fields(username = %input.username))]
pub async fn create_user(
    db: &DatabaseConnection,
    hasher: &dyn PasswordHasher,
    actor: Option<&Actor>,
    input: CreateUserInput,
) -> Result<user::Model> {
    input.validate()?;

    let username = validation::clean(&input.username);
    let email = input.email.trim().to_lowercase();
    let password_hash = hasher.hash_password(&input.password)?;

    let txn = db.begin().await?;
    ensure_unique(&txn, Some(&username), Some(&email), None).await?;

    let now = Utc::now();
    let created = user::ActiveModel {
        username: Set(username),
        email: Set(email),
        password_hash: Set(password_hash),
        first_name: Set(validation::clean(&input.first_name)),
        last_name: Set(validation::clean(&input.last_name)),
        role: Set(input.role),
        phone: Set(input.phone),
        address: Set(input.address),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .map_err(|e| Error::conflict_on_unique(e, "username or email already in use"))?;

    let actor = actor.cloned().unwrap_or_else(|| Actor::new(created.id));
    audit::record(
        &txn,
        &actor,
        AuditAction::Create,
        entity_type::USER,
        created.id,
        None,
        Some(&created),
    )
    .await?;
    txn.commit().await?;

    info!(user_id = created.id, role = %created.role.to_value(), "User created");
    Ok(created)
}

/// Retrieves all users ordered by id.
pub async fn get_users(db: &DatabaseConnection) -> Result<Vec<user::Model>> {
    User::find()
        .order_by_asc(user::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a user by id, returning None if it does not exist.
pub async fn get_user_by_id(db: &DatabaseConnection, user_id: i64) -> Result<Option<user::Model>> {
    User::find_by_id(user_id).one(db).await.map_err(Into::into)
}

/// Finds a user by username, returning None if it does not exist.
pub async fn get_user_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::Username.eq(username.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Applies a partial update to a user.
///
/// Absent fields are kept, `null` clears nullable fields (`phone`, `address`).
#[instrument(skip(db, hasher, actor, input), fields(user_id = input.id))]
pub async fn update_user(
    db: &DatabaseConnection,
    hasher: &dyn PasswordHasher,
    actor: &Actor,
    input: UpdateUserInput,
) -> Result<user::Model> {
    input.validate()?;

    let password_hash = match input.password.as_value() {
        Some(password) => Some(hasher.hash_password(password)?),
        None => None,
    };
    let username = input.username.map(|u| validation::clean(&u));
    let email = input.email.map(|e| e.trim().to_lowercase());

    let txn = db.begin().await?;
    let existing = require_user(&txn, input.id).await?;
    ensure_unique(
        &txn,
        username.as_value().map(String::as_str),
        email.as_value().map(String::as_str),
        Some(existing.id),
    )
    .await?;

    if let Patch::Value(role) = input.role {
        if role != existing.role {
            ensure_role_change_allowed(&txn, &existing, role).await?;
        }
    }

    let mut active: user::ActiveModel = existing.clone().into();
    if let Patch::Value(username) = username {
        active.username = Set(username);
    }
    if let Patch::Value(email) = email {
        active.email = Set(email);
    }
    if let Some(password_hash) = password_hash {
        active.password_hash = Set(password_hash);
    }
    if let Patch::Value(first_name) = input.first_name {
        active.first_name = Set(validation::clean(&first_name));
    }
    if let Patch::Value(last_name) = input.last_name {
        active.last_name = Set(validation::clean(&last_name));
    }
    if let Patch::Value(role) = input.role {
        active.role = Set(role);
    }
    if let Some(phone) = input.phone.into_update() {
        active.phone = Set(phone);
    }
    if let Some(address) = input.address.into_update() {
        active.address = Set(address);
    }
    if let Patch::Value(is_active) = input.is_active {
        active.is_active = Set(is_active);
    }
    active.updated_at = Set(Utc::now());

    let updated = active
        .update(&txn)
        .await
        .map_err(|e| Error::conflict_on_unique(e, "username or email already in use"))?;

    audit::record(
        &txn,
        actor,
        AuditAction::Update,
        entity_type::USER,
        updated.id,
        Some(&existing),
        Some(&updated),
    )
    .await?;
    txn.commit().await?;

    info!(user_id = updated.id, "User updated");
    Ok(updated)
}

/// Deletes a user that owns no dependent rows.
///
/// Users still referenced by a child profile, donations, approved expenses,
/// activities, participations or photos are kept and the call fails with
/// [`Error::Conflict`]. Audit entries never block deletion.
#[instrument(skip(db, actor))]
pub async fn delete_user(db: &DatabaseConnection, actor: &Actor, user_id: i64) -> Result<()> {
    let txn = db.begin().await?;
    let existing = require_user(&txn, user_id).await?;

    let owned = dependent_rows(&txn, user_id).await?;
    if !owned.is_empty() {
        debug!(user_id, ?owned, "Refusing to delete user with dependent rows");
        return Err(Error::Conflict {
            message: format!("user {user_id} still has {}", labels(&owned)),
        });
    }

    // Recorded first: the actor may be the user being deleted
    audit::record(
        &txn,
        actor,
        AuditAction::Delete,
        entity_type::USER,
        user_id,
        Some(&existing),
        None,
    )
    .await?;
    existing.delete(&txn).await?;
    txn.commit().await?;

    info!(user_id, "User deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::audit::get_audit_logs_for_entity;
    use crate::errors::ErrorKind;
    use crate::test_utils::*;

    fn donor_input(username: &str, email: &str) -> CreateUserInput {
        CreateUserInput {
            username: username.to_string(),
            email: email.to_string(),
            password: "s3cret!".to_string(),
            first_name: "Amara".to_string(),
            last_name: "Nwosu".to_string(),
            role: UserRole::Donor,
            phone: None,
            address: Some("12 Harbour Rd".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_user_hashes_and_audits() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_user(
            &db,
            &PlainHasher,
            None,
            donor_input("amara", "Amara@Example.org"),
        )
        .await?;

        assert_eq!(created.username, "amara");
        assert_eq!(created.email, "amara@example.org");
        assert_eq!(created.password_hash, "plain:s3cret!");
        assert_eq!(created.role, UserRole::Donor);
        assert!(created.is_active);
        assert_eq!(created.phone, None);
        assert_eq!(
            get_user_by_username(&db, " amara ").await?,
            Some(created.clone())
        );
        assert_eq!(get_user_by_username(&db, "nobody").await?, None);

        let history = get_audit_logs_for_entity(&db, entity_type::USER, created.id).await?;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].action, "create");
        // self-registration: the new user is its own actor
        assert_eq!(history[0].user_id, created.id);
        assert!(history[0].old_values.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_user_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let cases = [
            (donor_input("am", "amara@example.org"), "username"),
            (donor_input("amara", "not-an-email"), "email"),
            (
                CreateUserInput {
                    password: "12345".to_string(),
                    ..donor_input("amara", "amara@example.org")
                },
                "password",
            ),
            (
                CreateUserInput {
                    first_name: " ".to_string(),
                    ..donor_input("amara", "amara@example.org")
                },
                "first_name",
            ),
        ];

        for (input, field) in cases {
            let err = create_user(&db, &PlainHasher, None, input).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
            assert_eq!(err.field(), Some(field));
        }

        // Nothing reached the store
        assert!(get_users(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_user_duplicate_username_or_email() -> Result<()> {
        let db = setup_test_db().await?;
        create_user(&db, &PlainHasher, None, donor_input("amara", "amara@example.org")).await?;

        let dup_username =
            create_user(&db, &PlainHasher, None, donor_input("amara", "other@example.org"))
                .await
                .unwrap_err();
        assert_eq!(dup_username.kind(), ErrorKind::Conflict);

        let dup_email =
            create_user(&db, &PlainHasher, None, donor_input("other", "AMARA@example.org"))
                .await
                .unwrap_err();
        assert_eq!(dup_email.kind(), ErrorKind::Conflict);

        assert_eq!(get_users(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_user_partial_and_null_semantics() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = create_test_user(&db, "admin1", UserRole::Admin).await?;
        let created = create_user(
            &db,
            &PlainHasher,
            None,
            CreateUserInput {
                phone: Some("555-0100".to_string()),
                ..donor_input("amara", "amara@example.org")
            },
        )
        .await?;

        // Only first_name set, address cleared, phone left untouched
        let updated = update_user(
            &db,
            &PlainHasher,
            &Actor::new(admin.id),
            UpdateUserInput {
                id: created.id,
                first_name: Patch::Value("Ama".to_string()),
                address: Patch::Null,
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(updated.first_name, "Ama");
        assert_eq!(updated.last_name, created.last_name);
        assert_eq!(updated.phone.as_deref(), Some("555-0100"));
        assert_eq!(updated.address, None);
        assert_eq!(updated.password_hash, created.password_hash);

        let history = get_audit_logs_for_entity(&db, entity_type::USER, created.id).await?;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].action, "update");
        assert_eq!(history[0].user_id, admin.id);
        assert!(history[0].old_values.is_some());
        assert!(history[0].new_values.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_update_user_password_rehashes() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_test_user(&db, "amara", UserRole::Donor).await?;

        let updated = update_user(
            &db,
            &PlainHasher,
            &Actor::new(created.id),
            UpdateUserInput {
                id: created.id,
                password: Patch::Value("n3w-pass".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(updated.password_hash, "plain:n3w-pass");
        Ok(())
    }

    #[tokio::test]
    async fn test_update_user_errors() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = create_test_user(&db, "admin1", UserRole::Admin).await?;
        let other = create_test_user(&db, "other", UserRole::Caregiver).await?;
        let actor = Actor::new(admin.id);

        let missing = update_user(
            &db,
            &PlainHasher,
            &actor,
            UpdateUserInput {
                id: 999,
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(missing, Error::NotFound { entity: "user", id: 999 }));

        let taken = update_user(
            &db,
            &PlainHasher,
            &actor,
            UpdateUserInput {
                id: other.id,
                email: Patch::Value(admin.email.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(taken.kind(), ErrorKind::Conflict);

        let null_username = update_user(
            &db,
            &PlainHasher,
            &actor,
            UpdateUserInput {
                id: other.id,
                username: Patch::Null,
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(null_username.field(), Some("username"));

        // Keeping one's own username is not a conflict
        let same = update_user(
            &db,
            &PlainHasher,
            &actor,
            UpdateUserInput {
                id: other.id,
                username: Patch::Value("other".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(same.username, "other");
        Ok(())
    }

    #[tokio::test]
    async fn test_update_user_role_change_blocked_by_donations() -> Result<()> {
        let db = setup_test_db().await?;
        let donor = create_test_user(&db, "donor1", UserRole::Donor).await?;
        create_test_money_donation(&db, donor.id, 50.0, today()).await?;

        let err = update_user(
            &db,
            &PlainHasher,
            &Actor::new(donor.id),
            UpdateUserInput {
                id: donor.id,
                role: Patch::Value(UserRole::Caregiver),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_user() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = create_test_user(&db, "admin1", UserRole::Admin).await?;
        let donor = create_test_user(&db, "donor1", UserRole::Donor).await?;

        delete_user(&db, &Actor::new(admin.id), donor.id).await?;
        assert!(get_user_by_id(&db, donor.id).await?.is_none());

        let history = get_audit_logs_for_entity(&db, entity_type::USER, donor.id).await?;
        assert_eq!(history[0].action, "delete");
        assert!(history[0].new_values.is_none());

        let again = delete_user(&db, &Actor::new(admin.id), donor.id)
            .await
            .unwrap_err();
        assert_eq!(again.kind(), ErrorKind::NotFound);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_user_with_dependents_is_blocked() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = create_test_user(&db, "admin1", UserRole::Admin).await?;
        let donor = create_test_user(&db, "donor1", UserRole::Donor).await?;
        create_test_money_donation(&db, donor.id, 20.0, today()).await?;
        let audit_rows_before = crate::core::audit::get_audit_logs(&db).await?.len();

        let err = delete_user(&db, &Actor::new(admin.id), donor.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(err.to_string().contains("donations"));

        // Nothing changed, no audit entry written
        assert!(get_user_by_id(&db, donor.id).await?.is_some());
        assert_eq!(
            crate::core::audit::get_audit_logs(&db).await?.len(),
            audit_rows_before
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_self_delete_keeps_audit_trail() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = create_test_user(&db, "admin1", UserRole::Admin).await?;

        delete_user(&db, &Actor::new(admin.id), admin.id).await?;

        let history = get_audit_logs_for_entity(&db, entity_type::USER, admin.id).await?;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].user_id, admin.id);
        Ok(())
    }
}
