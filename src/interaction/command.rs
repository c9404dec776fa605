//! Parsing of desk input lines into commands.

use crate::base::{
    error::DeskError,
    types::{Priority, Res},
};

pub const HELP: &str = "\
Commands:
  register <id> <password> <name...>   create a patient account
  login <id> <password>                log in as patient or staff
  logout                               end the session
  request <priority>                   ask for a turn (1|critical, 2|urgent, 3|regular)
  position                             your place in the queue
  cancel                               withdraw your request
  queue [--json]                       show the queue in serving order
  next                                 (staff) serve the next patient
  serve <id>                           (staff) serve a specific patient
  cancel <id>                          (staff) withdraw a patient's request
  whoami                               show the current session
  help                                 this text
  quit                                 leave the desk";

/// A single desk command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    WhoAmI,
    Quit,
    Register { id: String, password: String, name: String },
    Login { id: String, password: String },
    Logout,
    Request { priority: Priority },
    Queue { json: bool },
    Position,
    Cancel { patient_id: Option<String> },
    Next,
    Serve { patient_id: String },
}

impl Command {
    /// Parses one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Res<Option<Self>> {
        let mut words = line.split_whitespace();

        let Some(verb) = words.next() else {
            return Ok(None);
        };

        let args = words.collect::<Vec<_>>();

        let command = match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("help" | "?", _) => Command::Help,
            ("whoami", []) => Command::WhoAmI,
            ("quit" | "exit", []) => Command::Quit,
            ("register", [id, password, name @ ..]) if !name.is_empty() => Command::Register {
                id: id.to_string(),
                password: password.to_string(),
                name: name.join(" "),
            },
            ("register", _) => return Err(DeskError::Usage("register <id> <password> <name...>").into()),
            ("login", [id, password]) => Command::Login {
                id: id.to_string(),
                password: password.to_string(),
            },
            ("login", _) => return Err(DeskError::Usage("login <id> <password>").into()),
            ("logout", []) => Command::Logout,
            ("request", [priority]) => Command::Request { priority: priority.parse()? },
            ("request", _) => return Err(DeskError::Usage("request <priority>").into()),
            ("queue", []) => Command::Queue { json: false },
            ("queue", ["--json"]) => Command::Queue { json: true },
            ("queue", _) => return Err(DeskError::Usage("queue [--json]").into()),
            ("position", []) => Command::Position,
            ("cancel", []) => Command::Cancel { patient_id: None },
            ("cancel", [id]) => Command::Cancel {
                patient_id: Some(id.to_string()),
            },
            ("cancel", _) => return Err(DeskError::Usage("cancel [<id>]").into()),
            ("next", []) => Command::Next,
            ("serve", [id]) => Command::Serve { patient_id: id.to_string() },
            ("serve", _) => return Err(DeskError::Usage("serve <id>").into()),
            ("whoami" | "quit" | "exit" | "logout" | "position" | "next", _) => return Err(DeskError::Usage("this command takes no arguments").into()),
            (other, _) => return Err(DeskError::UnknownCommand(other.to_string()).into()),
        };

        Ok(Some(command))
    }
}

// Tests.
