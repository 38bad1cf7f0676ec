//! Typed commands parsed from user input.
//!
//! Anything that is not a `/command` is a chat message to send. This is the
//! dispatch seam between the input loop and the controller: input produces a
//! `Command`, the controller executes it.

use std::path::PathBuf;
use thiserror::Error;

/// One user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Send a chat message (streaming, or upload when an image is pending).
    Send(String),
    /// Create a new session and switch to it.
    NewSession,
    /// List sessions.
    ListSessions,
    /// Switch to a session by list index or ID.
    SwitchSession(String),
    /// Delete a session by list index or ID.
    DeleteSession(String),
    /// Show the current session's history.
    History,
    /// List selectable models.
    ListModels,
    /// Select a model by ID.
    SelectModel(String),
    /// Stage an image for the next send.
    Attach(PathBuf),
    /// Drop the staged image.
    Detach,
    /// Show connectivity and backend security status.
    Status,
    /// Show command help.
    Help,
    /// Exit.
    Quit,
}

/// Input that could not be turned into a command.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Slash command is not recognized.
    #[error("Unknown command: /{0} (try /help)")]
    Unknown(String),

    /// Slash command needs an argument.
    #[error("/{0} needs an argument: /{0} {1}")]
    MissingArg(&'static str, &'static str),
}

impl Command {
    /// Parse one input line. Blank input yields `None`.
    ///
    /// # Errors
    ///
    /// Unknown slash commands and missing arguments; both are user errors
    /// to report, never fatal.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let Some(rest) = line.strip_prefix('/') else {
            return Ok(Some(Self::Send(line.to_string())));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        let command = match name {
            "new" => Self::NewSession,
            "sessions" => Self::ListSessions,
            "switch" => {
                if arg.is_empty() {
                    return Err(ParseError::MissingArg("switch", "<index|id>"));
                }
                Self::SwitchSession(arg.to_string())
            }
            "delete" => {
                if arg.is_empty() {
                    return Err(ParseError::MissingArg("delete", "<index|id>"));
                }
                Self::DeleteSession(arg.to_string())
            }
            "history" => Self::History,
            "models" => Self::ListModels,
            "model" => {
                if arg.is_empty() {
                    return Err(ParseError::MissingArg("model", "<id>"));
                }
                Self::SelectModel(arg.to_string())
            }
            "attach" => {
                if arg.is_empty() {
                    return Err(ParseError::MissingArg("attach", "<path>"));
                }
                Self::Attach(PathBuf::from(arg))
            }
            "detach" => Self::Detach,
            "status" => Self::Status,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }
}

/// Help text listing every command.
pub const HELP: &str = "\
  <text>            send a message
  /new              start a new conversation
  /sessions         list conversations
  /switch <n|id>    switch conversation
  /delete <n|id>    delete conversation
  /history          show current conversation
  /models           list available models
  /model <id>       select a model
  /attach <path>    stage an image for the next message
  /detach           drop the staged image
  /status           connectivity and backend security status
  /help             this help
  /quit             exit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_send() {
        assert_eq!(
            Command::parse("hello there").unwrap(),
            Some(Command::Send("hello there".to_string()))
        );
    }

    #[test]
    fn test_blank_is_none() {
        assert_eq!(Command::parse("   ").unwrap(), None);
        assert_eq!(Command::parse("").unwrap(), None);
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(Command::parse("/new").unwrap(), Some(Command::NewSession));
        assert_eq!(Command::parse("/quit").unwrap(), Some(Command::Quit));
        assert_eq!(Command::parse("/exit").unwrap(), Some(Command::Quit));
        assert_eq!(Command::parse("/help").unwrap(), Some(Command::Help));
    }

    #[test]
    fn test_commands_with_args() {
        assert_eq!(
            Command::parse("/switch 2").unwrap(),
            Some(Command::SwitchSession("2".to_string()))
        );
        assert_eq!(
            Command::parse("/model gpt-4o-mini").unwrap(),
            Some(Command::SelectModel("gpt-4o-mini".to_string()))
        );
        assert_eq!(
            Command::parse("/attach ./cat.png").unwrap(),
            Some(Command::Attach(PathBuf::from("./cat.png")))
        );
    }

    #[test]
    fn test_missing_arg() {
        assert_eq!(
            Command::parse("/switch").unwrap_err(),
            ParseError::MissingArg("switch", "<index|id>")
        );
        assert_eq!(
            Command::parse("/model  ").unwrap_err(),
            ParseError::MissingArg("model", "<id>")
        );
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            Command::parse("/frobnicate now").unwrap_err(),
            ParseError::Unknown("frobnicate".to_string())
        );
    }

    #[test]
    fn test_leading_whitespace_trimmed() {
        assert_eq!(Command::parse("  /new  ").unwrap(), Some(Command::NewSession));
    }
}
