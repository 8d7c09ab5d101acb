use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Wardflow";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default API endpoint of the hospital management server.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";

/// Default request timeout for API calls. Calls are interactive, never bulk.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> String {
    format!("{}=info", env!("CARGO_PKG_NAME"))
}

/// Get the application data directory
/// ~/Wardflow/ on all platforms (user-visible, holds session + receipts)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Wardflow")
}

/// Where generated payment receipts are written.
pub fn receipts_dir() -> PathBuf {
    app_data_dir().join("receipts")
}

/// The persisted session file (auth token + cached user profile).
pub fn session_file() -> PathBuf {
    app_data_dir().join("session.json")
}
