//! Binary operation modes.
//!
//! - [`migrations`]: apply database migrations and exit
//! - [`serve`]: run the bot until interrupted

pub mod migrations;
pub mod serve;
