//! Text rendering of the conversation snapshot for the terminal.

use client_core::{AccountDirectory, AssistantSettings, ResponseLanguage};
use shared::{
    domain::{Event, Message, Sender},
    locale::{format_event_stamp, translate, TextKey},
    preferences::{Language, ResolvedTheme, ThemePreference},
    protocol::ConversationSnapshot,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    user: &'static str,
    assistant: &'static str,
    muted: &'static str,
    reset: &'static str,
}

impl Palette {
    pub fn for_theme(theme: ResolvedTheme) -> Self {
        match theme {
            ResolvedTheme::Dark => Self {
                user: "\x1b[1;94m",
                assistant: "\x1b[1;96m",
                muted: "\x1b[90m",
                reset: "\x1b[0m",
            },
            ResolvedTheme::Light => Self {
                user: "\x1b[1;34m",
                assistant: "\x1b[1;35m",
                muted: "\x1b[2m",
                reset: "\x1b[0m",
            },
        }
    }

    pub fn plain() -> Self {
        Self {
            user: "",
            assistant: "",
            muted: "",
            reset: "",
        }
    }
}

/// Reads the terminal background from `COLORFGBG` ("fg;bg"); dark backgrounds are 0-6 and 8.
pub fn system_prefers_dark(colorfgbg: Option<&str>) -> bool {
    colorfgbg
        .and_then(|value| value.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok())
        .is_some_and(|bg| bg <= 6 || bg == 8)
}

#[derive(Debug, Clone)]
pub struct Renderer {
    language: Language,
    theme: ResolvedTheme,
    palette: Palette,
    colored: bool,
}

impl Renderer {
    pub fn new(language: Language, theme: ResolvedTheme, colored: bool) -> Self {
        Self {
            language,
            theme,
            palette: if colored {
                Palette::for_theme(theme)
            } else {
                Palette::plain()
            },
            colored,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn with_language(&self, language: Language) -> Self {
        Self::new(language, self.theme, self.colored)
    }

    pub fn with_theme(&self, theme: ResolvedTheme) -> Self {
        Self::new(self.language, theme, self.colored)
    }

    pub fn text(&self, key: TextKey) -> &'static str {
        translate(self.language, key)
    }

    pub fn landing(&self) -> Vec<String> {
        vec![
            format!("{}{}{}", self.palette.assistant, self.text(TextKey::AssistantName), self.palette.reset),
            format!("{}{}{}", self.palette.muted, self.text(TextKey::AskMeAnything), self.palette.reset),
        ]
    }

    pub fn header(&self, snapshot: &ConversationSnapshot) -> String {
        let title = snapshot
            .selected_event()
            .map(|event| event.title.as_str())
            .unwrap_or_else(|| self.text(TextKey::CurrentChat));
        format!("== {title} ==")
    }

    pub fn message(&self, message: &Message) -> String {
        let (color, label) = match message.sender {
            Sender::User => (self.palette.user, self.text(TextKey::You)),
            Sender::Assistant => (self.palette.assistant, self.text(TextKey::AssistantName)),
        };
        format!(
            "{color}{label}{reset} {muted}({}){reset}: {}",
            self.text(TextKey::JustNow),
            message.text,
            reset = self.palette.reset,
            muted = self.palette.muted,
        )
    }

    /// Landing screen or header plus the whole transcript.
    pub fn snapshot(&self, snapshot: &ConversationSnapshot) -> Vec<String> {
        if snapshot.is_landing() {
            return self.landing();
        }
        std::iter::once(self.header(snapshot))
            .chain(snapshot.transcript.iter().map(|message| self.message(message)))
            .collect()
    }

    pub fn event_list(&self, events: &[&Event]) -> Vec<String> {
        let mut lines = vec![format!("{}:", self.text(TextKey::Events))];
        if events.is_empty() {
            lines.push(format!("  {}", self.text(TextKey::NoEventsFound)));
            return lines;
        }
        lines.extend(events.iter().map(|event| {
            let stamp = format_event_stamp(event.created_at, self.language);
            format!(
                "  [{}] {} | {} {muted}({}, {}){reset}",
                event.id,
                event.title,
                event.preview,
                stamp.time,
                stamp.date,
                muted = self.palette.muted,
                reset = self.palette.reset,
            )
        }));
        lines
    }

    pub fn confirm_delete(&self, event: &Event) -> Vec<String> {
        vec![
            format!("{}: {}", self.text(TextKey::ConfirmClearTitle), event.title),
            format!(
                "{} [{}/{}]",
                self.text(TextKey::ConfirmClearMessage),
                self.text(TextKey::Yes),
                self.text(TextKey::No),
            ),
        ]
    }

    pub fn theme_status(&self, preference: ThemePreference) -> String {
        let name = |key| self.text(key);
        let chosen = match preference {
            ThemePreference::Light => name(TextKey::Light),
            ThemePreference::Dark => name(TextKey::Dark),
            ThemePreference::System => name(TextKey::System),
        };
        let applied = match self.theme {
            ResolvedTheme::Light => name(TextKey::Light),
            ResolvedTheme::Dark => name(TextKey::Dark),
        };
        format!("{}: {chosen} ({applied})", self.text(TextKey::Theme))
    }

    pub fn language_status(&self) -> String {
        format!(
            "{}: {} ({})",
            self.text(TextKey::InterfaceLanguage),
            self.language.native_name(),
            self.language.code()
        )
    }

    pub fn settings(&self, settings: &AssistantSettings) -> Vec<String> {
        let toggle = |on: bool| self.text(if on { TextKey::On } else { TextKey::Off });
        let response_language = match settings.response_language {
            ResponseLanguage::SameAsInterface => self.text(TextKey::SameAsInterface),
            ResponseLanguage::Fixed(language) => language.native_name(),
        };
        vec![
            format!("{}:", self.text(TextKey::GeneralSettings)),
            format!("  {}: {}", self.text(TextKey::EnableNotifications), toggle(settings.notifications)),
            format!("  {}: {}", self.text(TextKey::SaveEventHistory), toggle(settings.save_event_history)),
            format!("  {}: {}", self.text(TextKey::AutoSuggestResponses), toggle(settings.auto_suggest)),
            format!("{}:", self.text(TextKey::VoiceSettings)),
            format!("  {}: {}", self.text(TextKey::VoiceResponse), toggle(settings.voice_response)),
            format!("  {}: {}", self.text(TextKey::Voice), settings.voice.label()),
            format!("{}:", self.text(TextKey::LanguageSettings)),
            format!("  {}", self.language_status()),
            format!("  {}: {response_language}", self.text(TextKey::ResponseLanguage)),
        ]
    }

    pub fn profile(&self, directory: &AccountDirectory) -> Vec<String> {
        let mut lines = vec![
            self.text(TextKey::ProfileTitle).to_string(),
            format!("{}:", self.text(TextKey::YourAccounts)),
        ];
        if directory.accounts().is_empty() {
            lines.push(format!("  {}", self.text(TextKey::NoAccounts)));
            return lines;
        }
        let active = directory.active();
        lines.extend(directory.accounts().iter().map(|account| {
            let marker = if Some(account) == active { '*' } else { ' ' };
            format!("  {marker} {}", account.email)
        }));
        lines
    }

    pub fn help(&self) -> Vec<String> {
        [
            ("<text>", TextKey::HelpSend),
            ("/new", TextKey::HelpNew),
            ("/open <id>", TextKey::HelpOpen),
            ("/delete <id>", TextKey::HelpDelete),
            ("/clear", TextKey::HelpClear),
            ("/events [query]", TextKey::HelpEvents),
            ("/theme [light|dark|system]", TextKey::HelpTheme),
            ("/lang [en|ru|ro]", TextKey::HelpLanguage),
            ("/settings [name value]", TextKey::HelpSettings),
            ("/profile [login|register|switch]", TextKey::HelpProfile),
            ("/quit", TextKey::HelpQuit),
        ]
        .into_iter()
        .map(|(usage, key)| format!("{usage:<34}{}", self.text(key)))
        .collect()
    }
}
