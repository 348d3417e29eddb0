//! Shared utilities and common types for the fleet admin console.
//!
//! This crate provides common functionality used across all other crates:
//! - Page-number pagination math
//! - Form field validation helpers
//! - Bearer token claim inspection

pub mod jwt;
pub mod pagination;
pub mod validation;
