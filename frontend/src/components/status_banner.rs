use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatusBannerProps {
    /// Transient text; the owning hook clears it after a fixed delay
    pub message: Option<String>,
}

#[function_component(StatusBanner)]
pub fn status_banner(props: &StatusBannerProps) -> Html {
    match &props.message {
        Some(message) => html! {
            <div class="status-banner">{message}</div>
        },
        None => html! {},
    }
}
