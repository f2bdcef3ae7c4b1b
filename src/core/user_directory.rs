// Registered users, keyed by email
//
// Handles sign-up and login. Only password hashes are kept.

use crate::core::password::PasswordHasher;
use crate::core::validators::{validate_email, validate_phone};
use crate::error::{CrowdfundError, Result};
use crate::models::{RegistrationForm, User, UserProfile};
use std::collections::HashMap;
use tracing::{debug, info};

pub struct UserDirectory {
    users: HashMap<String, User>,
    hasher: PasswordHasher,
}

impl UserDirectory {
    pub fn new(hasher: PasswordHasher) -> Self {
        Self {
            users: HashMap::new(),
            hasher,
        }
    }

    /// Directory with cheap hashing so tests stay fast
    #[cfg(test)]
    pub fn new_test() -> Self {
        Self::new(PasswordHasher::new_test())
    }

    /// Register a new user and return the email as their identity.
    ///
    /// Checks run in a fixed order and stop at the first failure:
    /// duplicate email, email format, password confirmation, phone format.
    /// Nothing is stored unless all of them pass.
    pub fn register(&mut self, form: RegistrationForm) -> Result<String> {
        self.check_email(&form.email)?;
        check_passwords(&form.password, &form.confirm_password)?;
        check_phone(&form.phone)?;

        let password_hash = self.hasher.hash(&form.password)?;

        let user = User {
            email: form.email.clone(),
            first_name: form.first_name,
            last_name: form.last_name,
            password_hash,
            phone: form.phone,
        };

        self.users.insert(form.email.clone(), user);
        info!(email = %form.email, "user registered");

        Ok(form.email)
    }

    /// Check an email/password pair and return the email on success
    pub fn authenticate(&self, email: &str, password: &str) -> Result<String> {
        let Some(user) = self.users.get(email) else {
            debug!(email, "login for unknown email");
            return Err(CrowdfundError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &user.password_hash) {
            debug!(email, "login with wrong password");
            return Err(CrowdfundError::InvalidCredentials);
        }

        Ok(user.email.clone())
    }

    /// The email is free and well-formed. Registration asks for it first,
    /// so the console calls this before prompting for anything else.
    pub fn check_email(&self, email: &str) -> Result<()> {
        if self.users.contains_key(email) {
            return Err(CrowdfundError::DuplicateEmail(email.to_string()));
        }

        if !validate_email(email) {
            return Err(CrowdfundError::InvalidEmail(email.to_string()));
        }

        Ok(())
    }

    pub fn profile(&self, email: &str) -> Option<UserProfile> {
        self.users.get(email).map(User::profile)
    }

    pub fn contains(&self, email: &str) -> bool {
        self.users.contains_key(email)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new(PasswordHasher::default())
    }
}

/// Password and its confirmation must be identical
pub fn check_passwords(password: &str, confirm: &str) -> Result<()> {
    if password != confirm {
        return Err(CrowdfundError::PasswordMismatch);
    }
    Ok(())
}

pub fn check_phone(phone: &str) -> Result<()> {
    if !validate_phone(phone) {
        return Err(CrowdfundError::InvalidPhone(phone.to_string()));
    }
    Ok(())
}
