//! In-memory assistant settings. Nothing here is persisted; only language and theme survive a
//! restart.

use std::str::FromStr;

use shared::{error::SettingsError, preferences::Language};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Voice {
    #[default]
    Jarvis,
    Female,
    BritishMale,
    AustralianFemale,
}

impl Voice {
    pub const ALL: [Voice; 4] = [
        Voice::Jarvis,
        Voice::Female,
        Voice::BritishMale,
        Voice::AustralianFemale,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Voice::Jarvis => "jarvis",
            Voice::Female => "female",
            Voice::BritishMale => "british",
            Voice::AustralianFemale => "australian",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Voice::Jarvis => "Jarvis (Default)",
            Voice::Female => "Female Voice",
            Voice::BritishMale => "British Male",
            Voice::AustralianFemale => "Australian Female",
        }
    }
}

impl FromStr for Voice {
    type Err = SettingsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let code = value.trim().to_ascii_lowercase();
        Voice::ALL
            .into_iter()
            .find(|voice| voice.code() == code)
            .ok_or_else(|| SettingsError::UnknownVoice(value.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseLanguage {
    #[default]
    SameAsInterface,
    Fixed(Language),
}

impl ResponseLanguage {
    pub fn resolve(self, interface: Language) -> Language {
        match self {
            ResponseLanguage::SameAsInterface => interface,
            ResponseLanguage::Fixed(language) => language,
        }
    }
}

impl FromStr for ResponseLanguage {
    type Err = SettingsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("same") {
            return Ok(ResponseLanguage::SameAsInterface);
        }
        value
            .parse::<Language>()
            .map(ResponseLanguage::Fixed)
            .map_err(|_| SettingsError::UnknownResponseLanguage(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantSettings {
    /// Print replies as they arrive instead of only on the next render.
    pub notifications: bool,
    pub save_event_history: bool,
    pub auto_suggest: bool,
    pub voice_response: bool,
    pub voice: Voice,
    pub response_language: ResponseLanguage,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            notifications: true,
            save_event_history: true,
            auto_suggest: false,
            voice_response: true,
            voice: Voice::default(),
            response_language: ResponseLanguage::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingChange {
    Notifications(bool),
    SaveEventHistory(bool),
    AutoSuggest(bool),
    VoiceResponse(bool),
    Voice(Voice),
    ResponseLanguage(ResponseLanguage),
}

impl SettingChange {
    pub fn parse(name: &str, value: &str) -> Result<Self, SettingsError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "notifications" => parse_toggle(value).map(SettingChange::Notifications),
            "history" => parse_toggle(value).map(SettingChange::SaveEventHistory),
            "suggest" => parse_toggle(value).map(SettingChange::AutoSuggest),
            "voice-response" => parse_toggle(value).map(SettingChange::VoiceResponse),
            "voice" => value.parse().map(SettingChange::Voice),
            "response-language" | "reply-lang" => {
                value.parse().map(SettingChange::ResponseLanguage)
            }
            other => Err(SettingsError::UnknownSetting(other.to_string())),
        }
    }
}

fn parse_toggle(value: &str) -> Result<bool, SettingsError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        _ => Err(SettingsError::InvalidToggle(value.to_string())),
    }
}

impl AssistantSettings {
    pub fn apply(&mut self, change: SettingChange) {
        debug!(?change, "updated setting");
        match change {
            SettingChange::Notifications(on) => self.notifications = on,
            SettingChange::SaveEventHistory(on) => self.save_event_history = on,
            SettingChange::AutoSuggest(on) => self.auto_suggest = on,
            SettingChange::VoiceResponse(on) => self.voice_response = on,
            SettingChange::Voice(voice) => self.voice = voice,
            SettingChange::ResponseLanguage(language) => self.response_language = language,
        }
    }
}
