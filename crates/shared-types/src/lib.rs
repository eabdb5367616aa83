pub mod access;
pub mod complaint;
pub mod config;
pub mod error;
pub mod models;
pub mod role;
pub mod routes;

pub use access::*;
pub use config::*;
pub use error::*;
pub use models::*;
pub use role::*;
