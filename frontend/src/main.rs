mod components;
mod hooks;
mod services;

use shared::Meeting;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use components::calendar::Calendar;
use components::header::Header;
use components::meeting_list::MeetingList;
use components::research_modal::ResearchModal;
use components::search_bar::SearchBar;
use components::status_banner::StatusBanner;
use hooks::use_calendar::use_calendar;
use hooks::use_meetings::use_meetings;
use hooks::use_theme::use_theme;
use services::api::ApiClient;
use services::logging::Logger;
use services::storage;

#[function_component(App)]
fn app() -> Html {
    let api_client = ApiClient::new();

    let theme = use_theme();
    let meetings = use_meetings(&api_client);
    let calendar = use_calendar(meetings.actions.fetch_date.clone());

    let research_meeting = use_state(|| Option::<Meeting>::None);
    // id of the meeting the research view currently shows, so a slow detail
    // fetch cannot reopen or repaint a view the user moved away from
    let research_id = use_mut_ref(|| Option::<String>::None);

    let backend_connected = use_state(|| false);
    let backend_endpoint = use_state(|| String::from("Checking..."));
    let next_meeting = use_state(|| Option::<Meeting>::None);

    // Startup: install log, offline-slot restore, connection check, next meeting
    {
        let api_client = api_client.clone();
        let backend_connected = backend_connected.clone();
        let backend_endpoint = backend_endpoint.clone();
        let next_meeting = next_meeting.clone();

        use_effect_with((), move |_| {
            Logger::info_with_component("app", "🚀 Meeting prep assistant installed and ready");
            if let Some(cached) = storage::load_offline_meetings() {
                Logger::info_with_component(
                    "app",
                    &format!(
                        "📦 Offline slot holds {} meetings saved for {}",
                        cached.meetings.len(),
                        cached.date
                    ),
                );
            }

            spawn_local(async move {
                match api_client.health().await {
                    Ok(health) => {
                        backend_connected.set(health.status == "healthy");
                        backend_endpoint.set(
                            api_client
                                .base_url()
                                .trim_start_matches("http://")
                                .to_string(),
                        );
                    }
                    Err(e) => {
                        backend_connected.set(false);
                        backend_endpoint.set("Backend unreachable".to_string());
                        Logger::error_with_component("app", &format!("Health check failed: {}", e));
                    }
                }

                match api_client.next_meeting().await {
                    Ok(meeting) => next_meeting.set(meeting),
                    Err(e) => {
                        Logger::warn_with_component(
                            "app",
                            &format!("Next-meeting lookup failed: {}", e),
                        );
                    }
                }
            });

            || ()
        });
    }

    // Open the research view with what we already have, then refresh it with
    // full backend detail when the meeting has an id
    let open_research = {
        let api_client = api_client.clone();
        let research_meeting = research_meeting.clone();
        let research_id = research_id.clone();

        Callback::from(move |meeting: Meeting| {
            *research_id.borrow_mut() = meeting.id.clone();
            research_meeting.set(Some(meeting.clone()));

            if let Some(id) = meeting.id {
                let api_client = api_client.clone();
                let research_meeting = research_meeting.clone();
                let research_id = research_id.clone();
                spawn_local(async move {
                    match api_client.meeting_detail(&id).await {
                        Ok(detail) => {
                            if research_id.borrow().as_deref() == Some(id.as_str()) {
                                research_meeting.set(Some(detail));
                            }
                        }
                        Err(e) => {
                            Logger::debug_with_component(
                                "research",
                                &format!("Detail refresh skipped: {}", e),
                            );
                        }
                    }
                });
            }
        })
    };

    let close_research = {
        let research_meeting = research_meeting.clone();
        let research_id = research_id.clone();
        Callback::from(move |_| {
            *research_id.borrow_mut() = None;
            research_meeting.set(None);
        })
    };

    html! {
        <div class={classes!("app", theme.preferences.theme.css_class())}>
            <Header
                preferences={theme.preferences}
                on_toggle_theme={theme.actions.toggle_theme.clone()}
                backend_connected={*backend_connected}
                backend_endpoint={(*backend_endpoint).clone()}
                next_meeting={(*next_meeting).clone()}
            />
            <StatusBanner message={meetings.state.banner.clone()} />

            <main class="main">
                <div class="container">
                    <section class="calendar-section">
                        <Calendar
                            grid={calendar.state.grid.clone()}
                            selected={calendar.state.selected.clone()}
                            on_prev_month={calendar.actions.prev_month.clone()}
                            on_next_month={calendar.actions.next_month.clone()}
                            on_select_date={calendar.actions.select_date.clone()}
                        />
                    </section>

                    <section class="search-section">
                        <SearchBar on_search={meetings.actions.search.clone()} />
                    </section>

                    <section class="meetings-section">
                        <MeetingList
                            load={meetings.state.load.clone()}
                            loading_message={meetings.state.loading_message}
                            query={meetings.state.query.clone()}
                            on_open_research={open_research}
                        />
                    </section>
                </div>
            </main>

            <ResearchModal
                meeting={(*research_meeting).clone()}
                on_close={close_research}
            />
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
