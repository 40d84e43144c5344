//! # Domain Module
//!
//! Business logic for the gym desk.
//!
//! ## Module Organization
//!
//! - **stats_store**: the mock backend; record CRUD, login/signup and the
//!   dashboard queries
//! - **dashboard**: derived statistics computed from the raw collections
//! - **member_validation**: payload normalization and validation rules
//! - **auth_session**: the signed-in staff profile and its persisted cache
//! - **navigation**: route catalog and role checks for the shell
//!
//! ## Business Rules
//!
//! - Member name, gender, contact and group are required when adding
//! - Amounts must be present and non-negative
//! - Record timestamps are assigned by the store, never by the caller
//! - Usernames are unique ignoring case

pub mod auth_session;
pub mod dashboard;
pub mod member_validation;
pub mod navigation;
pub mod stats_store;

pub use auth_session::AuthSession;
pub use stats_store::StatsStore;
