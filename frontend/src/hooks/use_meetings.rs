use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Interval;
use gloo::timers::future::TimeoutFuture;
use shared::{LoadState, LoadingCycle, MeetingLoader, LOADING_TICK_MS};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::{ApiClient, FetchError};
use crate::services::logging::Logger;
use crate::services::storage;

/// Banner raised alongside the error panel on any fetch failure
pub const BACKEND_HINT: &str =
    "Could not complete the request. Make sure the research backend is running.";

const BANNER_CLEAR_MS: u32 = 3000;

/// What the current result set was asked for
#[derive(Clone, PartialEq)]
pub enum MeetingsQuery {
    /// An ISO `YYYY-MM-DD` day click
    Date(String),
    /// A keyword search
    Keyword(String),
}

#[derive(Clone, PartialEq)]
pub struct MeetingsState {
    pub load: LoadState,
    /// Query behind the latest fetch; always matches whatever `load` shows,
    /// because only the latest token can resolve into it
    pub query: Option<MeetingsQuery>,
    /// Current rotating indicator message while a fetch is in flight
    pub loading_message: Option<&'static str>,
    /// Transient status banner text; clears itself after a fixed delay
    pub banner: Option<String>,
}

pub struct UseMeetingsResult {
    pub state: MeetingsState,
    pub actions: UseMeetingsActions,
}

#[derive(Clone)]
pub struct UseMeetingsActions {
    /// Fetch the researched meetings for an ISO `YYYY-MM-DD` day
    pub fetch_date: Callback<String>,
    /// Keyword search; supersedes any fetch still in flight, and vice versa
    pub search: Callback<String>,
}

/// The load/display state machine behind the meetings panel.
///
/// Each fetch gets a token from the shared [`MeetingLoader`]; a resolution
/// that is no longer current mutates nothing. The rotating indicator
/// `Interval` is owned here: starting a new fetch replaces (and thereby
/// cancels) the previous handle, and the surviving fetch takes it exactly
/// once when it resolves.
#[hook]
pub fn use_meetings(api_client: &ApiClient) -> UseMeetingsResult {
    let load = use_state(|| LoadState::Idle);
    let query = use_state(|| Option::<MeetingsQuery>::None);
    let loading_message = use_state(|| Option::<&'static str>::None);
    let banner = use_state(|| Option::<String>::None);

    let loader = use_mut_ref(MeetingLoader::new);
    let spinner = use_mut_ref(|| Option::<Interval>::None);

    let show_banner = {
        let banner = banner.clone();
        Callback::from(move |message: String| {
            banner.set(Some(message));
            let banner_clear = banner.clone();
            spawn_local(async move {
                TimeoutFuture::new(BANNER_CLEAR_MS).await;
                banner_clear.set(None);
            });
        })
    };

    let fetch_date = {
        let api_client = api_client.clone();
        let loader = loader.clone();
        let spinner = spinner.clone();
        let load = load.clone();
        let query = query.clone();
        let loading_message = loading_message.clone();
        let show_banner = show_banner.clone();

        use_callback((), move |date: String, _| {
            query.set(Some(MeetingsQuery::Date(date.clone())));
            let token = start_loading(&loader, &spinner, &load, &loading_message);
            let api_client = api_client.clone();
            let loader = loader.clone();
            let spinner = spinner.clone();
            let load = load.clone();
            let loading_message = loading_message.clone();
            let show_banner = show_banner.clone();

            spawn_local(async move {
                let outcome = api_client.meetings_for_date(&date).await;
                finish_loading(
                    &loader,
                    &spinner,
                    &load,
                    &loading_message,
                    &show_banner,
                    token,
                    Some(&date),
                    outcome,
                );
            });
        })
    };

    let search = {
        let api_client = api_client.clone();
        let loader = loader.clone();
        let spinner = spinner.clone();
        let load = load.clone();
        let query = query.clone();
        let loading_message = loading_message.clone();
        let show_banner = show_banner.clone();

        use_callback((), move |keyword: String, _| {
            query.set(Some(MeetingsQuery::Keyword(keyword.clone())));
            let token = start_loading(&loader, &spinner, &load, &loading_message);
            let api_client = api_client.clone();
            let loader = loader.clone();
            let spinner = spinner.clone();
            let load = load.clone();
            let loading_message = loading_message.clone();
            let show_banner = show_banner.clone();

            spawn_local(async move {
                let outcome = api_client.search_meetings(&keyword).await;
                finish_loading(
                    &loader,
                    &spinner,
                    &load,
                    &loading_message,
                    &show_banner,
                    token,
                    None,
                    outcome,
                );
            });
        })
    };

    let state = MeetingsState {
        load: (*load).clone(),
        query: (*query).clone(),
        loading_message: *loading_message,
        banner: (*banner).clone(),
    };

    let actions = UseMeetingsActions { fetch_date, search };

    UseMeetingsResult { state, actions }
}

/// Begin a tokened fetch: flip to `Loading` and hand the indicator cycle to
/// the new request, cancelling whichever request owned it before.
fn start_loading(
    loader: &Rc<RefCell<MeetingLoader>>,
    spinner: &Rc<RefCell<Option<Interval>>>,
    load: &UseStateHandle<LoadState>,
    loading_message: &UseStateHandle<Option<&'static str>>,
) -> u64 {
    let token = loader.borrow_mut().begin();
    load.set(LoadState::Loading);

    let cycle = Rc::new(RefCell::new(LoadingCycle::new()));
    loading_message.set(Some(cycle.borrow().message()));

    let message_handle = loading_message.clone();
    let interval = Interval::new(LOADING_TICK_MS, move || {
        message_handle.set(Some(cycle.borrow_mut().advance()));
    });
    // dropping the superseded handle stops its cycle
    *spinner.borrow_mut() = Some(interval);

    token
}

/// Apply a fetch outcome. A stale token leaves the display and the spinner
/// of the newer fetch untouched.
#[allow(clippy::too_many_arguments)]
fn finish_loading(
    loader: &Rc<RefCell<MeetingLoader>>,
    spinner: &Rc<RefCell<Option<Interval>>>,
    load: &UseStateHandle<LoadState>,
    loading_message: &UseStateHandle<Option<&'static str>>,
    show_banner: &Callback<String>,
    token: u64,
    offline_date: Option<&str>,
    outcome: Result<Vec<shared::Meeting>, FetchError>,
) {
    let applied = loader
        .borrow_mut()
        .resolve(token, outcome.map_err(|e| e.to_string()));
    if !applied {
        Logger::debug_with_component("meetings", "⏭️ Dropped superseded fetch response");
        return;
    }

    // terminal state: stop and clear the indicator exactly once
    spinner.borrow_mut().take();
    loading_message.set(None);

    let state = loader.borrow().state().clone();
    match &state {
        LoadState::Loaded(meetings) => {
            if let Some(date) = offline_date {
                if let Err(e) = storage::save_offline_meetings(date, meetings) {
                    Logger::warn_with_component("meetings", &format!("{}", e));
                }
            }
        }
        LoadState::Failed(message) => {
            Logger::error_with_component("meetings", &format!("Fetch failed: {}", message));
            show_banner.emit(BACKEND_HINT.to_string());
        }
        _ => {}
    }
    load.set(state);
}
