/// Menu options
///
/// Parses what the user typed at a menu prompt into an option.

use crate::error::{CrowdfundError, Result};

/// Menu shown while nobody is logged in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainMenuChoice {
    Register,
    Login,
    Exit,
}

impl MainMenuChoice {
    pub const ALL: [MainMenuChoice; 3] = [
        MainMenuChoice::Register,
        MainMenuChoice::Login,
        MainMenuChoice::Exit,
    ];

    pub fn parse(input: &str) -> Result<Self> {
        match input.trim() {
            "1" => Ok(MainMenuChoice::Register),
            "2" => Ok(MainMenuChoice::Login),
            "3" => Ok(MainMenuChoice::Exit),
            other => Err(CrowdfundError::InvalidMenuChoice(other.to_string())),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            MainMenuChoice::Register => "Register",
            MainMenuChoice::Login => "Login",
            MainMenuChoice::Exit => "Exit",
        }
    }
}

/// Menu shown to a logged-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountMenuChoice {
    CreateProject,
    ViewProjects,
    EditProject,
    DeleteProject,
    SearchProjects,
    Logout,
}

impl AccountMenuChoice {
    pub const ALL: [AccountMenuChoice; 6] = [
        AccountMenuChoice::CreateProject,
        AccountMenuChoice::ViewProjects,
        AccountMenuChoice::EditProject,
        AccountMenuChoice::DeleteProject,
        AccountMenuChoice::SearchProjects,
        AccountMenuChoice::Logout,
    ];

    pub fn parse(input: &str) -> Result<Self> {
        match input.trim() {
            "1" => Ok(AccountMenuChoice::CreateProject),
            "2" => Ok(AccountMenuChoice::ViewProjects),
            "3" => Ok(AccountMenuChoice::EditProject),
            "4" => Ok(AccountMenuChoice::DeleteProject),
            "5" => Ok(AccountMenuChoice::SearchProjects),
            "6" => Ok(AccountMenuChoice::Logout),
            other => Err(CrowdfundError::InvalidMenuChoice(other.to_string())),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            AccountMenuChoice::CreateProject => "Create Project",
            AccountMenuChoice::ViewProjects => "View Projects",
            AccountMenuChoice::EditProject => "Edit Project",
            AccountMenuChoice::DeleteProject => "Delete Project",
            AccountMenuChoice::SearchProjects => "Search Projects",
            AccountMenuChoice::Logout => "Logout",
        }
    }
}

/// Render a numbered menu, one option per line
pub fn render_menu<'a>(labels: impl IntoIterator<Item = &'a str>) -> String {
    labels
        .into_iter()
        .enumerate()
        .map(|(i, label)| format!("{}. {}", i + 1, label))
        .collect::<Vec<_>>()
        .join("\n")
}
