pub mod domain;
pub mod error;
pub mod locale;
pub mod preferences;
pub mod protocol;
