//! Display strings for the three supported interface languages.

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::preferences::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKey {
    NewRequest,
    SearchEvents,
    Events,
    NoEventsFound,
    Settings,
    Theme,
    Light,
    Dark,
    System,
    InterfaceLanguage,
    CurrentChat,
    ClearConversation,
    AskMeAnything,
    You,
    JustNow,
    AssistantName,
    ConfirmClearTitle,
    ConfirmClearMessage,
    Yes,
    No,
    GeneralSettings,
    EnableNotifications,
    SaveEventHistory,
    AutoSuggestResponses,
    VoiceSettings,
    VoiceResponse,
    Voice,
    LanguageSettings,
    ResponseLanguage,
    SameAsInterface,
    On,
    Off,
    ProfileTitle,
    YourAccounts,
    NoAccounts,
    LogIn,
    Register,
    HelpSend,
    HelpNew,
    HelpOpen,
    HelpDelete,
    HelpClear,
    HelpEvents,
    HelpTheme,
    HelpLanguage,
    HelpSettings,
    HelpProfile,
    HelpQuit,
}

pub fn translate(language: Language, key: TextKey) -> &'static str {
    match language {
        Language::En => english(key),
        Language::Ru => russian(key),
        Language::Ro => romanian(key),
    }
}

fn english(key: TextKey) -> &'static str {
    match key {
        TextKey::NewRequest => "New Request",
        TextKey::SearchEvents => "Search events...",
        TextKey::Events => "Events",
        TextKey::NoEventsFound => "No events found",
        TextKey::Settings => "Settings",
        TextKey::Theme => "Theme",
        TextKey::Light => "Light",
        TextKey::Dark => "Dark",
        TextKey::System => "System",
        TextKey::InterfaceLanguage => "Interface Language",
        TextKey::CurrentChat => "Current Chat",
        TextKey::ClearConversation => "Clear Conversation",
        TextKey::AskMeAnything => "Ask me anything...",
        TextKey::You => "You",
        TextKey::JustNow => "Just now",
        TextKey::AssistantName => "NOIR",
        TextKey::ConfirmClearTitle => "Confirm deletion",
        TextKey::ConfirmClearMessage => "Are you sure you want to delete this conversation?",
        TextKey::Yes => "Yes",
        TextKey::No => "No",
        TextKey::GeneralSettings => "General Settings",
        TextKey::EnableNotifications => "Enable notifications",
        TextKey::SaveEventHistory => "Save event history",
        TextKey::AutoSuggestResponses => "Auto-suggest responses",
        TextKey::VoiceSettings => "Voice Settings",
        TextKey::VoiceResponse => "Voice response",
        TextKey::Voice => "Voice",
        TextKey::LanguageSettings => "Language Settings",
        TextKey::ResponseLanguage => "Response Language",
        TextKey::SameAsInterface => "Same as interface",
        TextKey::On => "On",
        TextKey::Off => "Off",
        TextKey::ProfileTitle => "Profile",
        TextKey::YourAccounts => "Your accounts",
        TextKey::NoAccounts => "No accounts yet",
        TextKey::LogIn => "Log in",
        TextKey::Register => "Register",
        TextKey::HelpSend => "send a message",
        TextKey::HelpNew => "start a new request",
        TextKey::HelpOpen => "open a conversation",
        TextKey::HelpDelete => "delete a conversation",
        TextKey::HelpClear => "delete the current conversation",
        TextKey::HelpEvents => "list or search conversations",
        TextKey::HelpTheme => "show or change the theme",
        TextKey::HelpLanguage => "show or change the interface language",
        TextKey::HelpSettings => "show or change assistant settings",
        TextKey::HelpProfile => "manage accounts",
        TextKey::HelpQuit => "exit",
    }
}

fn russian(key: TextKey) -> &'static str {
    match key {
        TextKey::NewRequest => "Новый запрос",
        TextKey::SearchEvents => "Поиск событий...",
        TextKey::Events => "События",
        TextKey::NoEventsFound => "События не найдены",
        TextKey::Settings => "Настройки",
        TextKey::Theme => "Тема",
        TextKey::Light => "Светлая",
        TextKey::Dark => "Темная",
        TextKey::System => "Системная",
        TextKey::InterfaceLanguage => "Язык интерфейса",
        TextKey::CurrentChat => "Текущий чат",
        TextKey::ClearConversation => "Очистить беседу",
        TextKey::AskMeAnything => "Спросите что угодно...",
        TextKey::You => "Вы",
        TextKey::JustNow => "Только что",
        TextKey::AssistantName => "НУАР",
        TextKey::ConfirmClearTitle => "Подтверждение удаления",
        TextKey::ConfirmClearMessage => "Вы уверены, что хотите удалить этот разговор?",
        TextKey::Yes => "Да",
        TextKey::No => "Нет",
        TextKey::GeneralSettings => "Общие настройки",
        TextKey::EnableNotifications => "Включить уведомления",
        TextKey::SaveEventHistory => "Сохранять историю событий",
        TextKey::AutoSuggestResponses => "Автоматические предложения",
        TextKey::VoiceSettings => "Настройки голоса",
        TextKey::VoiceResponse => "Голосовой ответ",
        TextKey::Voice => "Голос",
        TextKey::LanguageSettings => "Настройки языка",
        TextKey::ResponseLanguage => "Язык ответов",
        TextKey::SameAsInterface => "Как у интерфейса",
        TextKey::On => "Вкл",
        TextKey::Off => "Выкл",
        TextKey::ProfileTitle => "Профиль",
        TextKey::YourAccounts => "Ваши аккаунты",
        TextKey::NoAccounts => "Аккаунтов пока нет",
        TextKey::LogIn => "Войти",
        TextKey::Register => "Регистрация",
        TextKey::HelpSend => "отправить сообщение",
        TextKey::HelpNew => "начать новый запрос",
        TextKey::HelpOpen => "открыть разговор",
        TextKey::HelpDelete => "удалить разговор",
        TextKey::HelpClear => "удалить текущий разговор",
        TextKey::HelpEvents => "показать или найти разговоры",
        TextKey::HelpTheme => "показать или сменить тему",
        TextKey::HelpLanguage => "показать или сменить язык интерфейса",
        TextKey::HelpSettings => "показать или изменить настройки ассистента",
        TextKey::HelpProfile => "управление аккаунтами",
        TextKey::HelpQuit => "выйти",
    }
}

fn romanian(key: TextKey) -> &'static str {
    match key {
        TextKey::NewRequest => "Cerere nouă",
        TextKey::SearchEvents => "Caută evenimente...",
        TextKey::Events => "Evenimente",
        TextKey::NoEventsFound => "Nu s-au găsit evenimente",
        TextKey::Settings => "Setări",
        TextKey::Theme => "Temă",
        TextKey::Light => "Luminos",
        TextKey::Dark => "Întunecat",
        TextKey::System => "Sistem",
        TextKey::InterfaceLanguage => "Limba interfeței",
        TextKey::CurrentChat => "Chat curent",
        TextKey::ClearConversation => "Șterge conversația",
        TextKey::AskMeAnything => "Întreabă-mă orice...",
        TextKey::You => "Tu",
        TextKey::JustNow => "Acum",
        TextKey::AssistantName => "NOIR",
        TextKey::ConfirmClearTitle => "Confirmare ștergere",
        TextKey::ConfirmClearMessage => "Sigur doriți să ștergeți această conversație?",
        TextKey::Yes => "Da",
        TextKey::No => "Nu",
        TextKey::GeneralSettings => "Setări generale",
        TextKey::EnableNotifications => "Activează notificările",
        TextKey::SaveEventHistory => "Salvează istoricul evenimentelor",
        TextKey::AutoSuggestResponses => "Sugestii automate de răspuns",
        TextKey::VoiceSettings => "Setări voce",
        TextKey::VoiceResponse => "Răspuns vocal",
        TextKey::Voice => "Voce",
        TextKey::LanguageSettings => "Setări de limbă",
        TextKey::ResponseLanguage => "Limba răspunsurilor",
        TextKey::SameAsInterface => "Aceeași ca interfața",
        TextKey::On => "Pornit",
        TextKey::Off => "Oprit",
        TextKey::ProfileTitle => "Profil",
        TextKey::YourAccounts => "Conturile tale",
        TextKey::NoAccounts => "Niciun cont încă",
        TextKey::LogIn => "Autentificare",
        TextKey::Register => "Înregistrare",
        TextKey::HelpSend => "trimite un mesaj",
        TextKey::HelpNew => "începe o cerere nouă",
        TextKey::HelpOpen => "deschide o conversație",
        TextKey::HelpDelete => "șterge o conversație",
        TextKey::HelpClear => "șterge conversația curentă",
        TextKey::HelpEvents => "listează sau caută conversații",
        TextKey::HelpTheme => "arată sau schimbă tema",
        TextKey::HelpLanguage => "arată sau schimbă limba interfeței",
        TextKey::HelpSettings => "arată sau modifică setările asistentului",
        TextKey::HelpProfile => "gestionează conturile",
        TextKey::HelpQuit => "ieșire",
    }
}

const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];
const MONTHS_RU: [&str; 12] = [
    "Январь", "Февраль", "Март", "Апрель", "Май", "Июнь", "Июль", "Август", "Сентябрь",
    "Октябрь", "Ноябрь", "Декабрь",
];
const MONTHS_RO: [&str; 12] = [
    "Ianuarie", "Februarie", "Martie", "Aprilie", "Mai", "Iunie", "Iulie", "August",
    "Septembrie", "Octombrie", "Noiembrie", "Decembrie",
];

/// `month` is 1-based, as returned by `Datelike::month`.
pub fn month_name(language: Language, month: u32) -> &'static str {
    let table = match language {
        Language::En => &MONTHS_EN,
        Language::Ru => &MONTHS_RU,
        Language::Ro => &MONTHS_RO,
    };
    let index = month.clamp(1, 12) as usize - 1;
    table[index]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventStamp {
    pub time: String,
    pub date: String,
}

pub fn format_event_stamp(created_at: NaiveDateTime, language: Language) -> EventStamp {
    EventStamp {
        time: format!("{:02}:{:02}", created_at.hour(), created_at.minute()),
        date: format!(
            "{} {}",
            month_name(language, created_at.month()),
            created_at.day()
        ),
    }
}
