use shared::Preferences;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::services::logging::Logger;
use crate::services::storage;

pub struct UseThemeResult {
    /// Explicit preferences object handed down to the render layer
    pub preferences: Preferences,
    pub actions: UseThemeActions,
}

#[derive(Clone)]
pub struct UseThemeActions {
    pub toggle_theme: Callback<MouseEvent>,
}

/// Theme preference state, read from storage at startup and written back
/// on every toggle.
#[hook]
pub fn use_theme() -> UseThemeResult {
    let preferences = use_state(|| Preferences::with_theme(storage::load_theme()));

    let toggle_theme = {
        let preferences = preferences.clone();
        use_callback(*preferences, move |_: MouseEvent, current| {
            let mut next = *current;
            next.set_theme(current.theme.toggled());
            if let Err(e) = storage::save_theme(next.theme) {
                Logger::warn_with_component("theme", &format!("{}", e));
            }
            preferences.set(next);
        })
    };

    UseThemeResult {
        preferences: *preferences,
        actions: UseThemeActions { toggle_theme },
    }
}
