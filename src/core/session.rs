// Session controller
//
// Owns the user directory and project store for one interactive session and
// remembers who is logged in. Project operations always act as that user.

use crate::core::{ProjectStore, UserDirectory};
use crate::error::{CrowdfundError, Result};
use crate::models::{Listing, Project, ProjectDraft, ProjectId, RegistrationForm, UserProfile};
use tracing::info;

pub struct Session {
    users: UserDirectory,
    projects: ProjectStore,
    current_user: Option<String>,
}

impl Session {
    pub fn new(users: UserDirectory, projects: ProjectStore) -> Self {
        Self {
            users,
            projects,
            current_user: None,
        }
    }

    #[cfg(test)]
    pub fn new_test() -> Self {
        Self::new(UserDirectory::new_test(), ProjectStore::new())
    }

    pub fn users(&self) -> &UserDirectory {
        &self.users
    }

    pub fn projects(&self) -> &ProjectStore {
        &self.projects
    }

    pub fn current_user(&self) -> Option<&str> {
        self.current_user.as_deref()
    }

    /// Profile of whoever is logged in
    pub fn current_profile(&self) -> Option<UserProfile> {
        self.current_user
            .as_deref()
            .and_then(|email| self.users.profile(email))
    }

    /// Register and log straight in, like the menu does
    pub fn register(&mut self, form: RegistrationForm) -> Result<String> {
        let email = self.users.register(form)?;
        self.current_user = Some(email.clone());
        Ok(email)
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<String> {
        let email = self.users.authenticate(email, password)?;
        info!(email = %email, "logged in");
        self.current_user = Some(email.clone());
        Ok(email)
    }

    /// Returns the email that was logged out, if any
    pub fn logout(&mut self) -> Option<String> {
        let email = self.current_user.take();
        if let Some(email) = &email {
            info!(email = %email, "logged out");
        }
        email
    }

    pub fn create_project(
        &mut self,
        title: &str,
        details: &str,
        target_raw: &str,
        start_raw: &str,
        end_raw: &str,
    ) -> Result<ProjectId> {
        let owner = self.require_user()?.to_string();
        self.projects
            .create(&owner, title, details, target_raw, start_raw, end_raw)
    }

    pub fn list_projects(&self) -> Listing {
        self.projects.list()
    }

    /// Look up the project at a display index the current user may change.
    ///
    /// The console calls this before prompting for new values so that a bad
    /// number or someone else's project is reported straight away.
    pub fn editable_project(&self, display_index: usize) -> Result<&Project> {
        let owner = self.require_user()?;
        let id = self.projects.id_at(display_index)?;

        match self.projects.get(id) {
            Some(project) if project.is_owned_by(owner) => Ok(project),
            Some(_) => Err(CrowdfundError::NotOwner),
            None => Err(CrowdfundError::IndexOutOfRange {
                index: display_index.to_string(),
                count: self.projects.len(),
            }),
        }
    }

    pub fn update_project(&mut self, id: ProjectId, draft: ProjectDraft) -> Result<()> {
        let owner = self.require_user()?.to_string();
        self.projects.update(&owner, id, draft)
    }

    pub fn delete_project(&mut self, display_index: usize) -> Result<Project> {
        let owner = self.require_user()?.to_string();
        let id = self.projects.id_at(display_index)?;
        self.projects.remove(&owner, id)
    }

    // Project menus are only reachable after login, so a missing user
    // means the caller skipped it.
    fn require_user(&self) -> Result<&str> {
        self.current_user
            .as_deref()
            .ok_or(CrowdfundError::InvalidCredentials)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(UserDirectory::default(), ProjectStore::new())
    }
}
