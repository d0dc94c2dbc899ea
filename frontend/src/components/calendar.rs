use shared::{CalendarDayType, CalendarGrid};
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::services::date_utils::is_today;

#[derive(Properties, PartialEq)]
pub struct CalendarProps {
    pub grid: CalendarGrid,
    /// Currently selected ISO day, highlighted when visible in this month
    pub selected: Option<String>,
    pub on_prev_month: Callback<MouseEvent>,
    pub on_next_month: Callback<MouseEvent>,
    pub on_select_date: Callback<String>,
}

#[function_component(Calendar)]
pub fn calendar(props: &CalendarProps) -> Html {
    let grid = &props.grid;

    let mut calendar_days = Vec::new();
    for cell in &grid.cells {
        match cell.day_type {
            CalendarDayType::MonthDay => {
                let date = cell.date.clone().unwrap_or_default();
                let mut day_class = Classes::from("calendar-day");
                if props.selected.as_deref() == Some(date.as_str()) {
                    day_class.push("selected");
                }
                if is_today(&date) {
                    day_class.push("today");
                }

                let onclick = {
                    let on_select_date = props.on_select_date.clone();
                    let date = date.clone();
                    Callback::from(move |_: MouseEvent| {
                        on_select_date.emit(date.clone());
                    })
                };

                calendar_days.push(html! {
                    <div class={day_class} {onclick}>
                        <div class="day-number">{cell.day}</div>
                    </div>
                });
            }
            CalendarDayType::PaddingBefore | CalendarDayType::PaddingAfter => {
                // adjacent-month filler, shown dimmed and not clickable
                calendar_days.push(html! {
                    <div class="calendar-day filler">
                        <div class="day-number">{cell.day}</div>
                    </div>
                });
            }
        }
    }

    html! {
        <div class="calendar">
            <div class="calendar-header">
                <button class="calendar-nav-btn" onclick={props.on_prev_month.clone()}>{"‹"}</button>
                <h2 class="calendar-title">{grid.title()}</h2>
                <button class="calendar-nav-btn" onclick={props.on_next_month.clone()}>{"›"}</button>
            </div>
            <div class="calendar-weekdays">
                <div class="weekday">{"Sun"}</div>
                <div class="weekday">{"Mon"}</div>
                <div class="weekday">{"Tue"}</div>
                <div class="weekday">{"Wed"}</div>
                <div class="weekday">{"Thu"}</div>
                <div class="weekday">{"Fri"}</div>
                <div class="weekday">{"Sat"}</div>
            </div>
            <div class="calendar-grid">
                {for calendar_days}
            </div>
        </div>
    }
}
