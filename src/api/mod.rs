// API layer module (HTTP adapter over the domain)

pub mod errors;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod routes;

pub use routes::router;
