//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types for entity spatial state
//! - Key types for non-owning entity references
//! - Frame time management
//! - Logging utilities

pub mod math;
pub mod collections;
pub mod time;
pub mod logging;
