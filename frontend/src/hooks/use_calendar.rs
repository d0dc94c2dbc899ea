use shared::{CalendarGrid, MonthCursor};
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::services::date_utils;

#[derive(Clone, PartialEq)]
pub struct CalendarState {
    pub cursor: MonthCursor,
    /// Grid snapshot for the cursor month, rebuilt on every navigation
    pub grid: CalendarGrid,
    /// Selected `YYYY-MM-DD` day. Navigation does not clear it; the
    /// highlight simply is not visible while another month is shown.
    pub selected: Option<String>,
}

pub struct UseCalendarResult {
    pub state: CalendarState,
    pub actions: UseCalendarActions,
}

#[derive(Clone)]
pub struct UseCalendarActions {
    pub prev_month: Callback<MouseEvent>,
    pub next_month: Callback<MouseEvent>,
    pub select_date: Callback<String>,
}

/// Month navigation and day selection. `on_date_selected` fires once per
/// day click with the clicked ISO date.
#[hook]
pub fn use_calendar(on_date_selected: Callback<String>) -> UseCalendarResult {
    let cursor = use_state(date_utils::current_month_cursor);
    let selected = use_state(|| Option::<String>::None);

    let prev_month = {
        let cursor = cursor.clone();
        use_callback(*cursor, move |_: MouseEvent, current| {
            cursor.set(current.prev());
        })
    };

    let next_month = {
        let cursor = cursor.clone();
        use_callback(*cursor, move |_: MouseEvent, current| {
            cursor.set(current.next());
        })
    };

    let select_date = {
        let selected = selected.clone();
        use_callback(on_date_selected, move |date: String, on_date_selected| {
            selected.set(Some(date.clone()));
            on_date_selected.emit(date);
        })
    };

    let state = CalendarState {
        cursor: *cursor,
        grid: cursor.grid(),
        selected: (*selected).clone(),
    };

    let actions = UseCalendarActions {
        prev_month,
        next_month,
        select_date,
    };

    UseCalendarResult { state, actions }
}
