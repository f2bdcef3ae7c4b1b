/// crowdfund library
///
/// Users, projects, and the console session for running crowdfunding
/// campaigns. Everything lives in memory for the life of the process.

pub mod config;
pub mod console;
pub mod core;
pub mod error;
pub mod models;

// Re-exports for convenience
pub use config::AppConfig;
pub use console::Console;
pub use core::{ProjectStore, Session, UserDirectory};
pub use error::{CrowdfundError, Result};
