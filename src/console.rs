/// Interactive console
///
/// Text menus on top of `Session`. Reads answers line by line from any async
/// buffered reader and writes prompts to any async writer, so the same loop
/// drives stdin/stdout and in-memory buffers.

use crate::core::menu::render_menu;
use crate::core::user_directory::check_passwords;
use crate::core::validators::{parse_amount, parse_date};
use crate::core::{AccountMenuChoice, MainMenuChoice, Session};
use crate::error::{CrowdfundError, Result};
use crate::models::{Listing, ProjectDraft, RegistrationForm};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// What the loop should do after a menu action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

pub struct Console<R, W> {
    input: R,
    output: W,
    session: Session,
    currency: String,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W, session: Session, currency: impl Into<String>) -> Self {
        Self {
            input,
            output,
            session,
            currency: currency.into(),
        }
    }

    /// Hand back the session and the writer, mostly for inspection
    pub fn into_parts(self) -> (Session, W) {
        (self.session, self.output)
    }

    /// Run menus until the user picks Exit or input runs out
    pub async fn run(&mut self) -> Result<()> {
        loop {
            let step = if self.session.current_user().is_some() {
                self.account_menu().await
            } else {
                self.main_menu().await
            };

            match step {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(CrowdfundError::Io(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                    tracing::debug!("input closed, leaving");
                    break;
                }
                Err(e) if e.is_recoverable() => {
                    tracing::debug!(error = %e, "operation rejected");
                    self.say(&e.user_message()).await?;
                }
                Err(e) => return Err(e),
            }
        }

        self.output.flush().await?;
        Ok(())
    }

    async fn main_menu(&mut self) -> Result<Flow> {
        let menu = render_menu(MainMenuChoice::ALL.iter().map(|c| c.label()));
        self.say(&format!("\n{}", menu)).await?;

        let choice = self.prompt("Choose an option: ").await?;
        match MainMenuChoice::parse(&choice)? {
            MainMenuChoice::Register => self.register().await?,
            MainMenuChoice::Login => self.login().await?,
            MainMenuChoice::Exit => return Ok(Flow::Exit),
        }

        Ok(Flow::Continue)
    }

    async fn account_menu(&mut self) -> Result<Flow> {
        let first_name = self
            .session
            .current_profile()
            .map(|profile| profile.first_name)
            .unwrap_or_default();
        let menu = render_menu(AccountMenuChoice::ALL.iter().map(|c| c.label()));
        self.say(&format!("\nWelcome, {}!\n\n{}", first_name, menu))
            .await?;

        let choice = self.prompt("Choose an option: ").await?;
        match AccountMenuChoice::parse(&choice)? {
            AccountMenuChoice::CreateProject => self.create_project().await?,
            AccountMenuChoice::ViewProjects => self.view_projects().await?,
            AccountMenuChoice::EditProject => self.edit_project().await?,
            AccountMenuChoice::DeleteProject => self.delete_project().await?,
            AccountMenuChoice::SearchProjects => {
                self.say("Searching projects is not available yet.").await?
            }
            AccountMenuChoice::Logout => {
                self.session.logout();
                self.say("Logged out successfully!").await?;
            }
        }

        Ok(Flow::Continue)
    }

    // Each answer is checked as soon as it is given, in the order asked.
    async fn register(&mut self) -> Result<()> {
        let first_name = self.prompt("Enter your first name: ").await?;
        let last_name = self.prompt("Enter your last name: ").await?;

        let email = self.prompt("Enter your email: ").await?;
        self.session.users().check_email(&email)?;

        let password = self.prompt("Enter your password: ").await?;
        let confirm_password = self.prompt("Confirm your password: ").await?;
        check_passwords(&password, &confirm_password)?;

        let phone = self.prompt("Enter your phone number: ").await?;

        self.session.register(RegistrationForm {
            first_name: first_name.clone(),
            last_name: last_name.clone(),
            email,
            password,
            confirm_password,
            phone,
        })?;

        self.say(&format!("{} {} registered successfully!", first_name, last_name))
            .await
    }

    async fn login(&mut self) -> Result<()> {
        let email = self.prompt("Enter your email: ").await?;
        let password = self.prompt("Enter your password: ").await?;

        self.session.login(&email, &password)?;
        self.say("Login successful!").await
    }

    async fn create_project(&mut self) -> Result<()> {
        let title = self.prompt("Enter project title: ").await?;
        let details = self.prompt("Enter project details: ").await?;

        let target = self
            .prompt(&format!("Enter target amount ({}): ", self.currency))
            .await?;
        parse_amount(&target)?;

        let start = self.prompt("Enter start date (YYYY-MM-DD): ").await?;
        parse_date(&start)?;

        let end = self.prompt("Enter end date (YYYY-MM-DD): ").await?;

        self.session
            .create_project(&title, &details, &target, &start, &end)?;
        self.say(&format!("Project '{}' created successfully!", title))
            .await
    }

    async fn view_projects(&mut self) -> Result<()> {
        let lines = match self.session.list_projects() {
            Listing::Empty => {
                return self.say("No projects available.").await;
            }
            Listing::Projects(items) => items
                .iter()
                .map(|item| {
                    format!(
                        "{}. {} - Target: {} {} - Start: {} - End: {}",
                        item.index,
                        item.title,
                        format_amount(item.target),
                        self.currency,
                        item.start_date,
                        item.end_date
                    )
                })
                .collect::<Vec<_>>(),
        };

        self.say(&lines.join("\n")).await
    }

    async fn edit_project(&mut self) -> Result<()> {
        // The number is always asked for, even with nothing listed
        self.view_projects().await?;

        let index = self.prompt_index("Enter project number to edit: ").await?;
        let current = self.session.editable_project(index)?.clone();

        let title = self
            .prompt(&format!("Enter new title (Current: {}): ", current.title))
            .await?;
        let details = self
            .prompt(&format!("Enter new details (Current: {}): ", current.details))
            .await?;

        let target = self
            .prompt(&format!(
                "Enter new target (Current: {}): ",
                format_amount(current.target)
            ))
            .await?;
        parse_amount(&target)?;

        let start = self
            .prompt(&format!("Enter new start date (Current: {}): ", current.start_date))
            .await?;
        parse_date(&start)?;

        let end = self
            .prompt(&format!("Enter new end date (Current: {}): ", current.end_date))
            .await?;

        let draft = ProjectDraft::parse(&title, &details, &target, &start, &end)?;
        self.session.update_project(current.id, draft)?;

        self.say(&format!("Project '{}' updated successfully!", title))
            .await
    }

    async fn delete_project(&mut self) -> Result<()> {
        self.view_projects().await?;

        let index = self.prompt_index("Enter project number to delete: ").await?;
        self.session.delete_project(index)?;

        self.say("Project deleted successfully!").await
    }

    // Anything that is not a positive whole number can't name a project
    async fn prompt_index(&mut self, text: &str) -> Result<usize> {
        let raw = self.prompt(text).await?;

        raw.trim()
            .parse::<usize>()
            .map_err(|_| CrowdfundError::IndexOutOfRange {
                index: raw.clone(),
                count: self.session.projects().len(),
            })
    }

    /// Write a prompt and read one line back, without the line ending
    async fn prompt(&mut self, text: &str) -> Result<String> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).await?;
        if read == 0 {
            return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
        }

        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }

    async fn say(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        Ok(())
    }
}

/// Amounts are shown with two decimals
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}
