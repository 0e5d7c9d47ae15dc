#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod core;
#[cfg(feature = "std")]
mod logging;
pub mod notation;
pub mod prelude;
#[cfg(feature = "std")]
pub mod simulation;

pub use crate::core::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, level_from, LOG_ENV};
pub use notation::{format_position, parse_position};
