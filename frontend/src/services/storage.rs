use anyhow::{anyhow, Result};
use gloo::storage::{LocalStorage, Storage};
use shared::{Meeting, OfflineMeetings, Theme};

/// Theme preference, `"light"` or `"dark"`
pub const THEME_KEY: &str = "meeting_prep::theme";
/// Single slot holding the most recently fetched meetings for offline access
pub const OFFLINE_MEETINGS_KEY: &str = "meeting_prep::offline_meetings";

/// Read the persisted theme; absent or unreadable values fall back to dark
pub fn load_theme() -> Theme {
    LocalStorage::get::<String>(THEME_KEY)
        .map(|value| Theme::from_storage(&value))
        .unwrap_or_default()
}

pub fn save_theme(theme: Theme) -> Result<()> {
    LocalStorage::set(THEME_KEY, theme.as_str())
        .map_err(|e| anyhow!("failed to persist theme: {}", e))
}

/// Overwrite the offline slot with the latest successful fetch
pub fn save_offline_meetings(date: &str, meetings: &[Meeting]) -> Result<()> {
    let blob = OfflineMeetings {
        date: date.to_string(),
        meetings: meetings.to_vec(),
        saved_at: Some(js_sys::Date::now()),
    };
    LocalStorage::set(OFFLINE_MEETINGS_KEY, &blob)
        .map_err(|e| anyhow!("failed to persist offline meetings: {}", e))
}

/// Read back whatever the last session stashed, if anything
pub fn load_offline_meetings() -> Option<OfflineMeetings> {
    LocalStorage::get(OFFLINE_MEETINGS_KEY).ok()
}
