use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SearchBarProps {
    /// Emits the trimmed keyword; empty input never fires
    pub on_search: Callback<String>,
}

#[function_component(SearchBar)]
pub fn search_bar(props: &SearchBarProps) -> Html {
    let keyword = use_state(String::new);

    let on_keyword_change = {
        let keyword = keyword.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            keyword.set(input.value());
        })
    };

    let onsubmit = {
        let keyword = keyword.clone();
        let on_search = props.on_search.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let trimmed = keyword.trim().to_string();
            if !trimmed.is_empty() {
                on_search.emit(trimmed);
            }
        })
    };

    html! {
        <form class="search-bar" {onsubmit}>
            <input
                type="text"
                class="search-input"
                placeholder="Search meetings by keyword..."
                value={(*keyword).clone()}
                onchange={on_keyword_change}
            />
            <button type="submit" class="btn btn-secondary search-btn">{"Search"}</button>
        </form>
    }
}
