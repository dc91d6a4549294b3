use super::super::{Model, Msg};
use crate::notify::Severity;
use yew::prelude::*;

/// Fixed-position toast stack. One toast per session outcome; each
/// auto-dismisses after a few seconds or on click.
pub fn render_toasts(model: &Model, ctx: &Context<Model>) -> Html {
    if model.toasts.is_empty() {
        return html! {};
    }

    let link = ctx.link();

    html! {
        <div class="toast-stack">
            { for model.toasts.iter().map(|toast| {
                let id = toast.id;
                let severity = match toast.severity {
                    Severity::Info => "toast-info",
                    Severity::Error => "toast-error",
                };
                html! {
                    <div class={classes!("toast", severity)} key={id.to_string()}>
                        <div class="toast-body">
                            <strong>{ &toast.title }</strong>
                            <p>{ &toast.description }</p>
                        </div>
                        <button
                            class="toast-close"
                            onclick={link.callback(move |_| Msg::DismissToast(id))}
                        >
                            <i class="fa-solid fa-times"></i>
                        </button>
                    </div>
                }
            })}
        </div>
    }
}
