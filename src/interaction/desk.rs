//! The check-in desk: one session at a time, driven by text commands.

use tracing::{Instrument, debug, info, instrument, warn};

use crate::{
    base::{
        error::{DeskError, QueueError},
        types::{Account, AppointmentRequest, Res, Role},
    },
    runtime::Runtime,
};

use super::{
    command::{Command, HELP},
    render,
};

/// What the desk says back after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Message(String),
    Quit(String),
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Message(text) | Reply::Quit(text) => text,
        }
    }
}

/// A desk bound to a runtime, holding the currently logged-in account.
pub struct Desk {
    runtime: Runtime,
    session: Option<Account>,
}

impl Desk {
    pub fn new(runtime: Runtime) -> Self {
        Self { runtime, session: None }
    }

    /// The logged-in account, if any.
    pub fn session(&self) -> Option<&Account> {
        self.session.as_ref()
    }

    /// Parses and runs one input line.
    ///
    /// Every error is recoverable, so failures come back as a message rather than an `Err`.
    #[instrument(skip_all)]
    pub async fn handle_line(&mut self, line: &str) -> Option<Reply> {
        let result = match Command::parse(line) {
            Ok(Some(command)) => self.handle(command).in_current_span().await,
            Ok(None) => return None,
            Err(err) => Err(err),
        };

        match result {
            Ok(reply) => Some(reply),
            Err(err) => {
                warn!("Command failed: {}", err);
                Some(Reply::Message(format!("Error: {err}")))
            }
        }
    }

    /// Runs one parsed command.
    #[instrument(skip_all)]
    pub async fn handle(&mut self, command: Command) -> Res<Reply> {
        let message = match command {
            Command::Help => HELP.to_string(),
            Command::WhoAmI => match &self.session {
                Some(Account { id, name, role: Role::Patient }) => format!("{name} ({id}), patient"),
                Some(Account { id, name, role: Role::Staff { title } }) => format!("{name} ({id}), {title}"),
                None => "Not logged in.".to_string(),
            },
            Command::Quit => {
                let farewell = self.end_session().unwrap_or_default();
                return Ok(Reply::Quit(format!("{farewell}Goodbye.")));
            }
            Command::Register { id, password, name } => {
                self.ensure_logged_out()?;

                let account = self.runtime.identity.register(&id, &password, &name).await?;
                let greeting = format!("Registered {} ({}). You are now logged in.", account.name, account.id);
                self.session = Some(account);

                greeting
            }
            Command::Login { id, password } => {
                self.ensure_logged_out()?;

                let account = self.runtime.identity.authenticate(&id, &password).await?;
                info!(account = %account.id, staff = account.is_staff(), "Logged in.");

                let greeting = format!("Welcome, {}.", account.name);
                self.session = Some(account);

                greeting
            }
            Command::Logout => {
                let farewell = self.end_session().ok_or(DeskError::NotLoggedIn)?;
                format!("{farewell}Logged out.")
            }
            Command::Request { priority } => {
                let patient = self.patient()?;

                let request = AppointmentRequest::new(&patient.id, &patient.name, priority, self.runtime.clock.now());
                self.runtime.queue.submit(request)?;

                let position = self.runtime.queue.position(&patient.id).unwrap_or(self.runtime.queue.len());
                format!("Turn requested ({priority}). You are #{position} in the queue.")
            }
            Command::Queue { json } => {
                self.account()?;

                let rows = render::rows(&self.runtime.queue.ordered_view(), &self.runtime.config.timestamp_format);
                if json { render::json(&rows)? } else { render::table(&rows) }
            }
            Command::Position => {
                let patient = self.patient()?;

                match self.runtime.queue.position(&patient.id) {
                    Some(position) => format!("You are #{position} of {} in the queue.", self.runtime.queue.len()),
                    None => "You have no pending request.".to_string(),
                }
            }
            Command::Cancel { patient_id: None } => {
                let patient = self.patient()?;

                self.runtime.queue.cancel(&patient.id)?;
                "Your request was withdrawn.".to_string()
            }
            Command::Cancel { patient_id: Some(patient_id) } => {
                self.staff()?;

                let withdrawn = self.runtime.queue.cancel(&patient_id)?;
                format!("Withdrew the request of {} ({}).", withdrawn.display_name(), withdrawn.patient_id())
            }
            Command::Next => {
                self.staff()?;

                match self.runtime.queue.serve_next() {
                    Some(served) => self.serving(&served),
                    None => "No patients waiting.".to_string(),
                }
            }
            Command::Serve { patient_id } => {
                self.staff()?;

                let served = self.runtime.queue.serve(&patient_id)?;
                self.serving(&served)
            }
        };

        Ok(Reply::Message(message))
    }

    fn serving(&self, served: &AppointmentRequest) -> String {
        format!(
            "Now serving {} ({}), {}, submitted {}.",
            served.display_name(),
            served.patient_id(),
            served.priority(),
            served.submitted_at().format(&self.runtime.config.timestamp_format)
        )
    }

    /// Clears the session, withdrawing a pending request when configured to.
    ///
    /// Returns `None` when nobody was logged in, otherwise a (possibly empty) notice.
    fn end_session(&mut self) -> Option<String> {
        let account = self.session.take()?;

        if account.is_staff() || !self.runtime.config.withdraw_on_logout {
            return Some(String::new());
        }

        match self.runtime.queue.cancel(&account.id) {
            Ok(_) => {
                info!(account = %account.id, "Pending request withdrawn at logout.");
                Some("Your pending request was withdrawn. ".to_string())
            }
            Err(QueueError::NotFound { .. }) => Some(String::new()),
            Err(err) => {
                debug!("Unexpected error while withdrawing: {}", err);
                Some(String::new())
            }
        }
    }

    fn ensure_logged_out(&self) -> Result<(), DeskError> {
        match &self.session {
            Some(account) => Err(DeskError::AlreadyLoggedIn(account.id.clone())),
            None => Ok(()),
        }
    }

    fn account(&self) -> Result<&Account, DeskError> {
        self.session.as_ref().ok_or(DeskError::NotLoggedIn)
    }

    fn patient(&self) -> Result<Account, DeskError> {
        let account = self.account()?;

        if account.is_staff() {
            return Err(DeskError::Forbidden("patients"));
        }

        Ok(account.clone())
    }

    fn staff(&self) -> Result<&Account, DeskError> {
        let account = self.account()?;

        if !account.is_staff() {
            return Err(DeskError::Forbidden("staff"));
        }

        Ok(account)
    }
}
