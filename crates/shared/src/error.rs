use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreferenceError {
    #[error("unknown language code '{0}' (expected en, ru or ro)")]
    UnknownLanguage(String),
    #[error("unknown theme '{0}' (expected light, dark or system)")]
    UnknownTheme(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("unknown setting '{0}' (expected notifications, history, suggest, voice-response, voice or response-language)")]
    UnknownSetting(String),
    #[error("'{0}' is not on or off")]
    InvalidToggle(String),
    #[error("unknown voice '{0}' (expected jarvis, female, british or australian)")]
    UnknownVoice(String),
    #[error("unknown response language '{0}' (expected same, en, ru or ro)")]
    UnknownResponseLanguage(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("an email address is required")]
    MissingEmail,
    #[error("a password is required")]
    MissingPassword,
    #[error("account '{0}' is already registered")]
    AlreadyRegistered(String),
    #[error("no account '{0}' on this device")]
    UnknownAccount(String),
}
