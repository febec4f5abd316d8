pub mod config;
pub mod organizer;
pub mod sanitize;
pub mod scanner;

/// Audio file suffixes eligible for organizing. Matched case-sensitively
/// against the end of the file name.
pub const AUDIO_EXTENSIONS: &[&str] = &[".mp3", ".wav", ".opus", ".flac", ".wma", ".m4a"];

/// Application name for XDG paths
pub const APP_NAME: &str = "tagfold";
