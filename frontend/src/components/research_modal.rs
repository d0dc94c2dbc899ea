use shared::{excerpt, Attendee, Meeting, ATTENDEE_EXCERPT_CHARS, MEETING_EXCERPT_CHARS};
use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ResearchModalProps {
    /// Meeting whose research is shown; `None` keeps the modal hidden
    pub meeting: Option<Meeting>,
    pub on_close: Callback<()>,
}

#[function_component(ResearchModal)]
pub fn research_modal(props: &ResearchModalProps) -> Html {
    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_close_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| {
            on_close.emit(());
        })
    };

    let meeting = match &props.meeting {
        Some(meeting) => meeting,
        None => return html! {},
    };

    html! {
        <div class="research-modal-backdrop" onclick={on_backdrop_click}>
            <div class="research-modal" onclick={on_modal_click}>
                <div class="research-modal-content">
                    <h3 class="research-title">{format!("🔍 {}", meeting.title)}</h3>

                    {research_section("📋 Meeting Analysis", &meeting.research_summary)}
                    {research_section("❓ Preparation Questions", &meeting.preparation_questions)}

                    {if meeting.attendees.is_empty() {
                        html! {
                            <div class="research-no-attendees">
                                <p>{"No attendee research available"}</p>
                            </div>
                        }
                    } else {
                        html! {
                            <div class="attendee-cards">
                                <h4>{"👥 Attendees"}</h4>
                                {for meeting.attendees.iter().map(attendee_card)}
                            </div>
                        }
                    }}

                    <div class="research-buttons">
                        <button
                            type="button"
                            class="btn btn-secondary"
                            onclick={on_close_click}
                        >
                            {"Close"}
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}

fn research_section(heading: &str, text: &Option<String>) -> Html {
    match text.as_deref().filter(|t| !t.trim().is_empty()) {
        Some(text) => html! {
            <div class="research-section">
                <h4>{heading}</h4>
                <p class="research-excerpt">{excerpt(text, MEETING_EXCERPT_CHARS)}</p>
            </div>
        },
        None => html! {},
    }
}

fn attendee_card(attendee: &Attendee) -> Html {
    let detail_row = |label: &str, value: &Option<String>| -> Html {
        match value.as_deref().filter(|v| !v.trim().is_empty()) {
            Some(value) => html! {
                <div class="attendee-row">
                    <span class="attendee-label">{label}</span>
                    <span class="attendee-value">{value}</span>
                </div>
            },
            None => html! {},
        }
    };

    html! {
        <div class="attendee-card">
            <div class="attendee-name">{attendee.label()}</div>
            {detail_row("Email", &attendee.email)}
            {detail_row("Company", &attendee.company)}
            {detail_row("Title", &attendee.title)}
            {match attendee.research_summary.as_deref().filter(|s| !s.trim().is_empty()) {
                Some(summary) => html! {
                    <p class="attendee-research">{excerpt(summary, ATTENDEE_EXCERPT_CHARS)}</p>
                },
                None => html! {},
            }}
        </div>
    }
}
