//! Core business logic - Framework-agnostic operations over the records store.
//! Every function takes an injected `DatabaseConnection`; mutations also take
//! the acting user and append an audit entry in the same transaction.

pub mod activity;
pub mod audit;
pub mod child;
pub mod dashboard;
pub mod donation;
pub mod expense;
pub mod password;
pub mod user;
