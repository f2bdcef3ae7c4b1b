/// Core functionality modules
///
/// Contains the business logic: field validation, the user directory,
/// the project store, and the session that ties them together.

pub mod menu;
pub mod password;
pub mod project_store;
pub mod session;
pub mod user_directory;
pub mod validators;

pub use menu::{AccountMenuChoice, MainMenuChoice};
pub use password::PasswordHasher;
pub use project_store::ProjectStore;
pub use session::Session;
pub use user_directory::UserDirectory;
pub use validators::{validate_date, validate_email, validate_phone};
