// Domain layer module exports
// Domain is independent of storage and HTTP concerns

pub mod repositories;
pub mod user;
