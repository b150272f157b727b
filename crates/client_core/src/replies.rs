//! Canned assistant replies.

pub fn greeting(title: &str) -> String {
    format!("I'll help you with \"{title}\". What specific information do you need?")
}

pub fn acknowledgement() -> String {
    "I'll continue helping with this. Is there anything else you'd like to know?".to_string()
}
