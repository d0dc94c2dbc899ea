use shared::{LoadState, Meeting, RESEARCH_SOURCES};
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::hooks::use_meetings::MeetingsQuery;
use crate::services::date_utils::{format_day_heading, format_start_time};

#[derive(Properties, PartialEq)]
pub struct MeetingListProps {
    pub load: LoadState,
    pub loading_message: Option<&'static str>,
    /// Query the current result set answers
    pub query: Option<MeetingsQuery>,
    pub on_open_research: Callback<Meeting>,
}

fn heading(query: &Option<MeetingsQuery>) -> String {
    match query {
        Some(MeetingsQuery::Date(date)) => format!("Meetings on {}", format_day_heading(date)),
        Some(MeetingsQuery::Keyword(keyword)) => format!("Meetings matching \"{}\"", keyword),
        None => "Meetings".to_string(),
    }
}

#[function_component(MeetingList)]
pub fn meeting_list(props: &MeetingListProps) -> Html {
    match &props.load {
        LoadState::Idle => html! {
            <div class="meetings-placeholder">
                {"Pick a date to see your meetings and prep research."}
            </div>
        },
        LoadState::Loading => {
            let message = props.loading_message.unwrap_or(RESEARCH_SOURCES[0]);
            html! {
                <div class="loading meetings-loading">
                    <span class="loading-spinner"></span>
                    {format!("{}...", message)}
                </div>
            }
        }
        LoadState::Loaded(meetings) => html! {
            <>
                <h2 class="meetings-heading">{heading(&props.query)}</h2>
                <div class="meeting-cards">
                    {for meetings.iter().map(|meeting| {
                        let research_button = if meeting.has_research() {
                            let on_open_research = props.on_open_research.clone();
                            let meeting = meeting.clone();
                            let onclick = Callback::from(move |_: MouseEvent| {
                                on_open_research.emit(meeting.clone());
                            });
                            html! {
                                <button class="btn btn-primary research-btn" {onclick}>
                                    {"🔍 Research"}
                                </button>
                            }
                        } else {
                            html! {}
                        };

                        html! {
                            <div class="meeting-card">
                                <div class="meeting-card-main">
                                    <div class="meeting-title">{&meeting.title}</div>
                                    {if let Some(time) = meeting.start_time.as_deref().and_then(format_start_time) {
                                        html! { <div class="meeting-time">{format!("🕐 {}", time)}</div> }
                                    } else {
                                        html! {}
                                    }}
                                    {if !meeting.attendees.is_empty() {
                                        html! {
                                            <div class="meeting-attendees">
                                                {format!("👥 {}", meeting.attendee_labels().join(", "))}
                                            </div>
                                        }
                                    } else {
                                        html! {}
                                    }}
                                </div>
                                {research_button}
                            </div>
                        }
                    })}
                </div>
            </>
        },
        LoadState::Empty => html! {
            <div class="meetings-empty">
                {"😴 No meetings on this day."}
            </div>
        },
        LoadState::Failed(message) => html! {
            <div class="error-panel">
                <div class="error-title">{"⚠️ Could not load meetings"}</div>
                <div class="error-message">{message}</div>
                <div class="error-hint">{"Check that the research backend is running, then pick the date again."}</div>
            </div>
        },
    }
}
