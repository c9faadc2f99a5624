//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types used as input values
//! - Generational handles for non-owning references
//! - Logging utilities

pub mod collections;
pub mod logging;
pub mod math;
