use shared::{Meeting, Preferences, Theme};
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::services::date_utils::format_start_time;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub preferences: Preferences,
    pub on_toggle_theme: Callback<MouseEvent>,
    pub backend_connected: bool,
    pub backend_endpoint: String,
    /// Next upcoming meeting, shown as a teaser under the title
    pub next_meeting: Option<Meeting>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let theme_label = match props.preferences.theme {
        Theme::Dark => "☀️ Light",
        Theme::Light => "🌙 Dark",
    };

    html! {
        <header class="header">
            <div class="container">
                <div class="header-left">
                    <h1>{"🗓️ Meeting Prep Assistant"}</h1>
                    {if let Some(meeting) = &props.next_meeting {
                        let when = meeting
                            .start_time
                            .as_deref()
                            .and_then(format_start_time)
                            .map(|t| format!(" at {}", t))
                            .unwrap_or_default();
                        html! {
                            <div class="next-meeting-teaser">
                                {format!("Up next: {}{}", meeting.title, when)}
                            </div>
                        }
                    } else {
                        html! {}
                    }}
                </div>
                <div class="header-right">
                    <div class={if props.backend_connected { "connection-status connected" } else { "connection-status" }}>
                        {if props.backend_connected {
                            format!("● Connected to {}", props.backend_endpoint)
                        } else {
                            props.backend_endpoint.clone()
                        }}
                    </div>
                    <button class="theme-toggle-btn" onclick={props.on_toggle_theme.clone()}>
                        {theme_label}
                    </button>
                </div>
            </div>
        </header>
    }
}
