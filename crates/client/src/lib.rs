//! REST client layer for the fleet admin console.
//!
//! This crate contains:
//! - HTTP client construction and the JSON envelope handling
//! - Wire entity definitions (backend snake_case mappings)
//! - Repository implementations of the domain service traits
//! - Bearer token storage

pub mod entities;
pub mod error;
pub mod http;
pub mod repositories;
pub mod timing;
pub mod token;

pub use error::ClientError;
pub use http::{ApiClient, HttpConfig};
pub use token::{FileTokenStore, MemoryTokenStore, TokenError, TokenStore};
