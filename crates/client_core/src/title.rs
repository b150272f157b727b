//! Derives short sidebar titles from the utterance that opened a conversation.

pub const DEFAULT_TITLE_PREFIXES: [&str; 10] = [
    "can you",
    "could you",
    "please",
    "i need",
    "i want",
    "help me",
    "noir",
    "create",
    "make",
    "find",
];
pub const DEFAULT_MAX_TITLE_LENGTH: usize = 20;
pub const TITLE_ELLIPSIS: &str = "...";

/// Filler prefixes are tried in order; only the first match is stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitlePolicy {
    pub prefixes: Vec<String>,
    pub max_title_length: usize,
}

impl Default for TitlePolicy {
    fn default() -> Self {
        Self {
            prefixes: DEFAULT_TITLE_PREFIXES
                .iter()
                .map(|prefix| prefix.to_string())
                .collect(),
            max_title_length: DEFAULT_MAX_TITLE_LENGTH,
        }
    }
}

impl TitlePolicy {
    pub fn derive(&self, utterance: &str) -> String {
        let stripped = self
            .prefixes
            .iter()
            .find_map(|prefix| strip_prefix_ignore_case(utterance, prefix))
            .map(str::trim);

        let base = match stripped {
            Some(rest) if !rest.is_empty() => rest,
            Some(_) => utterance.trim(),
            None => utterance,
        };

        let title = capitalize_first(base);
        if title.chars().count() > self.max_title_length {
            let mut truncated: String = title.chars().take(self.max_title_length).collect();
            truncated.push_str(TITLE_ELLIPSIS);
            truncated
        } else {
            title
        }
    }
}

fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    let mut rest = value.char_indices();
    for expected in prefix.chars() {
        let (_, actual) = rest.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }
    let offset = rest.next().map_or(value.len(), |(index, _)| index);
    Some(&value[offset..])
}

fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
