/// Error types for crowdfund
///
/// This module defines all possible errors that can occur in the application.
/// Uses thiserror for ergonomic error handling.

use thiserror::Error;

/// Main error type for crowdfund operations
#[derive(Error, Debug)]
pub enum CrowdfundError {
    /// Email is already taken by another user
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    /// Email does not look like an email address
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// Password and its confirmation differ
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Phone number is not an 11-digit mobile number
    #[error("Invalid phone number: {0}")]
    InvalidPhone(String),

    /// Unknown email or wrong password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Target amount is not a number
    #[error("Invalid target amount: {0}")]
    InvalidAmount(String),

    /// Date is not a YYYY-MM-DD calendar date
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Start date is not strictly before end date
    #[error("Start date {start} must be before end date {end}")]
    InvalidDateRange { start: String, end: String },

    /// Display index outside of 1..=count
    #[error("Project number {index} is out of range (1..={count})")]
    IndexOutOfRange { index: String, count: usize },

    /// Caller does not own the project
    #[error("Project is owned by another user")]
    NotOwner,

    /// Menu input did not name an option
    #[error("Invalid menu choice: {0}")]
    InvalidMenuChoice(String),

    /// I/O errors (console, config file)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Password hashing failed
    #[error("Password hashing error: {0}")]
    PasswordHash(String),
}

/// Result type alias for crowdfund operations
pub type Result<T> = std::result::Result<T, CrowdfundError>;

impl CrowdfundError {
    /// Convert CrowdfundError to the message shown at the console
    pub fn user_message(&self) -> String {
        match self {
            CrowdfundError::DuplicateEmail(_) => "This email is already registered.".to_string(),
            CrowdfundError::InvalidEmail(_) => "Invalid email format.".to_string(),
            CrowdfundError::PasswordMismatch => "Passwords do not match.".to_string(),
            CrowdfundError::InvalidPhone(_) => "Invalid phone number format.".to_string(),
            CrowdfundError::InvalidCredentials => "Invalid email or password.".to_string(),
            CrowdfundError::InvalidAmount(_) => "Invalid target amount!".to_string(),
            CrowdfundError::InvalidDate(_) => "Invalid date format.".to_string(),
            CrowdfundError::InvalidDateRange { .. } => {
                "Start date must be before end date.".to_string()
            }
            CrowdfundError::IndexOutOfRange { .. } => "Invalid project number.".to_string(),
            CrowdfundError::NotOwner => "You can only change your own projects!".to_string(),
            CrowdfundError::InvalidMenuChoice(_) => "Invalid choice!".to_string(),
            CrowdfundError::Io(e) => {
                format!("Console error. Details: {}", e)
            }
            CrowdfundError::Config(msg) => {
                format!("Configuration issue: {}", msg)
            }
            CrowdfundError::Serialization(e) => {
                format!("Data format error: {}", e)
            }
            CrowdfundError::PasswordHash(msg) => {
                format!("Could not secure password: {}", msg)
            }
        }
    }

    /// Whether the session can carry on after this error
    ///
    /// Every validation and authorization failure is recoverable; the user
    /// is sent back to the menu. Only broken infrastructure is not.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            CrowdfundError::Io(_) | CrowdfundError::Config(_) | CrowdfundError::Serialization(_)
        )
    }
}
