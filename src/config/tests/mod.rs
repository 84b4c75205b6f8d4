//! Unit tests for configuration loading and precedence.
//!
//! Tests are organised into modules by functional area:
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence and defaults
//! - `field_resolution`: Token resolution
//! - `validation`: Numeric setting checks

mod helpers;
mod validation;
