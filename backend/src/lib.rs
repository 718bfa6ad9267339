pub mod routes;
pub mod members;
pub mod password;
pub mod cors;
pub mod error;
pub mod rate_limiter;
pub mod catchers;
pub mod server;
pub use shared::user_info;
pub use shared::{models::*, error::*, user_info::*};

#[cfg(test)]
mod tests;
