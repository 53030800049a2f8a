//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod activity;
pub mod activity_participation;
pub mod activity_photo;
pub mod audit_log;
pub mod child;
pub mod donation;
pub mod expense;
pub mod user;

// Re-export specific types to avoid conflicts
pub use activity::{Column as ActivityColumn, Entity as Activity, Model as ActivityModel};
pub use activity_participation::{
    Column as ActivityParticipationColumn, Entity as ActivityParticipation,
    Model as ActivityParticipationModel,
};
pub use activity_photo::{
    Column as ActivityPhotoColumn, Entity as ActivityPhoto, Model as ActivityPhotoModel,
};
pub use audit_log::{Column as AuditLogColumn, Entity as AuditLog, Model as AuditLogModel};
pub use child::{Column as ChildColumn, Entity as Child, Gender, Model as ChildModel};
pub use donation::{
    Column as DonationColumn, DonationType, Entity as Donation, Model as DonationModel,
};
pub use expense::{
    Column as ExpenseColumn, Entity as Expense, ExpenseCategory, Model as ExpenseModel,
};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel, UserRole};
