pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::desk_config::DeskConfig;
pub use crate::core::desk::DeskEngine;
pub use crate::core::intake::{IntakeRequest, IntakeValidator};
pub use crate::core::schedule::WeeklyCalendar;
pub use crate::utils::error::{DeskError, Result};

pub use crate::adapters::local::LocalStorage;
