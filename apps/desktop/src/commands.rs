//! Parsing of REPL input into shell commands.

use std::fmt;

use client_core::SettingChange;
use shared::{
    domain::EventId,
    error::{PreferenceError, SettingsError},
    locale::{translate, TextKey},
    preferences::{Language, ThemePreference},
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Send(String),
    New,
    Open(EventId),
    Delete(EventId),
    ClearCurrent,
    Events(Option<String>),
    Theme(Option<ThemePreference>),
    Language(Option<Language>),
    Settings(Option<SettingChange>),
    Profile(ProfileCommand),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileCommand {
    Show,
    LogIn { email: String, password: Password },
    Register { email: String, password: Password },
    Switch(String),
}

/// Keeps passwords out of `Debug` output and therefore out of logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '/{0}' (try /help)")]
    Unknown(String),
    #[error("/{0} needs a conversation id")]
    MissingId(&'static str),
    #[error("'{0}' is not a conversation id")]
    InvalidId(String),
    #[error("/settings {0} needs a value")]
    MissingValue(String),
    #[error("usage: /profile [login <email> <password> | register <email> <password> | switch <email>]")]
    ProfileUsage,
    #[error(transparent)]
    Preference(#[from] PreferenceError),
    #[error(transparent)]
    Setting(#[from] SettingsError),
}

pub fn parse_command(line: &str) -> Result<ShellCommand, CommandError> {
    let Some(command) = line.trim_start().strip_prefix('/') else {
        return Ok(ShellCommand::Send(line.to_string()));
    };

    let (name, argument) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, Some(rest.trim()).filter(|rest| !rest.is_empty())),
        None => (command.trim(), None),
    };

    match name.to_ascii_lowercase().as_str() {
        "new" => Ok(ShellCommand::New),
        "open" => parse_id("open", argument).map(ShellCommand::Open),
        "delete" => parse_id("delete", argument).map(ShellCommand::Delete),
        "clear" => Ok(ShellCommand::ClearCurrent),
        "events" | "search" => Ok(ShellCommand::Events(argument.map(str::to_string))),
        "theme" => Ok(ShellCommand::Theme(
            argument.map(str::parse::<ThemePreference>).transpose()?,
        )),
        "lang" | "language" => Ok(ShellCommand::Language(
            argument.map(str::parse::<Language>).transpose()?,
        )),
        "settings" => parse_settings(argument),
        "profile" => parse_profile(argument).map(ShellCommand::Profile),
        "help" => Ok(ShellCommand::Help),
        "quit" | "exit" => Ok(ShellCommand::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn parse_id(command: &'static str, argument: Option<&str>) -> Result<EventId, CommandError> {
    let raw = argument.ok_or(CommandError::MissingId(command))?;
    raw.parse::<i64>()
        .map(EventId)
        .map_err(|_| CommandError::InvalidId(raw.to_string()))
}

fn parse_settings(argument: Option<&str>) -> Result<ShellCommand, CommandError> {
    let Some(argument) = argument else {
        return Ok(ShellCommand::Settings(None));
    };
    let (name, value) = argument
        .split_once(char::is_whitespace)
        .ok_or_else(|| CommandError::MissingValue(argument.to_string()))?;
    let change = SettingChange::parse(name, value)?;
    Ok(ShellCommand::Settings(Some(change)))
}

fn parse_profile(argument: Option<&str>) -> Result<ProfileCommand, CommandError> {
    let words: Vec<&str> = argument.unwrap_or_default().split_whitespace().collect();
    match words.as_slice() {
        [] => Ok(ProfileCommand::Show),
        [action, email, password] if action.eq_ignore_ascii_case("login") => {
            Ok(ProfileCommand::LogIn {
                email: email.to_string(),
                password: Password(password.to_string()),
            })
        }
        [action, email, password] if action.eq_ignore_ascii_case("register") => {
            Ok(ProfileCommand::Register {
                email: email.to_string(),
                password: Password(password.to_string()),
            })
        }
        [action, email] if action.eq_ignore_ascii_case("switch") => {
            Ok(ProfileCommand::Switch(email.to_string()))
        }
        _ => Err(CommandError::ProfileUsage),
    }
}

/// Accepts `y`/`yes` and the localized "yes".
pub fn is_confirmation(answer: &str, language: Language) -> bool {
    let answer = answer.trim().to_lowercase();
    answer == "y"
        || answer == "yes"
        || answer == translate(language, TextKey::Yes).to_lowercase()
}
