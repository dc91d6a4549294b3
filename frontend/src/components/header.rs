use super::super::{Model, Msg};
use crate::theme::Theme;
use yew::prelude::*;

/// Renders the application header with the theme toggle
pub fn render_header(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();

    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-recycle"></i> {" Eco Recycle Reward"}</h1>
            <p class="subtitle">{"Turn your recycling into rewards"}</p>
            <div class="top-right">
                <button
                    id="theme-toggle"
                    class="theme-toggle"
                    onclick={link.callback(|_| Msg::ToggleTheme)}
                    title={ if model.theme == Theme::Light { "Switch to Dark Mode" } else { "Switch to Light Mode" } }
                >
                    { if model.theme == Theme::Light {
                        html! { <i class="fa-solid fa-sun toggle-icon"></i> }
                    } else {
                        html! { <i class="fa-solid fa-moon toggle-icon"></i> }
                    }}
                </button>
            </div>
        </header>
    }
}
