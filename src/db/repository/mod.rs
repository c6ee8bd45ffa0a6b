//! Entity repositories: create / read / filter operations per entity type.
//!
//! All functions take a borrowed `Connection`; callers own transactions
//! and locking.

pub mod medicines;
pub mod patients;
pub mod treatments;
