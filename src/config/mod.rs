//! Configuration module for wikinote

mod settings;

pub use settings::{FallbackSettings, NoteSettings, OutgoingSettings, Settings, WikiSettings};
