// User domain module
// Contains the user record, its create/update inputs, and the error kinds

#![allow(clippy::module_inception)]

pub mod errors;
pub mod user;

// Re-export main types for convenience
pub use errors::{UserError, UserResult};
pub use user::{NewUser, User, UserChanges};
