//! # SkillSwap Config
//!
//! Configuration structures loaded from environment variables once at
//! process startup and then passed around explicitly:
//!
//! - [`jwt`]: credential verification secret, expiry and cookie name
//! - [`cors`]: allowed browser origins
//! - [`server`]: listen address
//! - [`storage`]: optional PostgreSQL connection settings
//!
//! # Example
//!
//! ```ignore
//! use skillswap_config::{CorsConfig, JwtConfig, ServerConfig, StorageConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! let storage_config = StorageConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod server;
pub mod storage;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;
pub use storage::StorageConfig;
