use super::super::{Model, Msg};
use super::utils::debounce;
use shared::catalog::CATALOG;
use yew::prelude::*;

/// The scan section: camera controls, live preview while a session is open,
/// and the manual-add catalog cards.
pub fn render_scanner(model: &Model, ctx: &Context<Model>) -> Html {
    html! {
        <section id="scanner" class="scanner-section">
            <h2>{"Scan Your Items"}</h2>
            <p class="subtitle">
                { if model.model_ready {
                    "Detect recyclables using on-device AI"
                } else {
                    "Detect recyclables using on-device AI (model loading...)"
                }}
            </p>

            { if model.camera_open() {
                render_live_preview(model, ctx)
            } else {
                render_open_button(model, ctx)
            }}

            { render_catalog(model, ctx) }
        </section>
    }
}

fn render_open_button(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link().clone();

    html! {
        <button
            class="primary-btn scan-btn"
            disabled={model.requesting_camera()}
            onclick={debounce(300, move || link.callback(|_| Msg::StartScan).emit(()))}
        >
            { if model.requesting_camera() {
                html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Starting camera..."}</> }
            } else {
                html! { <><i class="fa-solid fa-camera"></i>{" Open Camera"}</> }
            }}
        </button>
    }
}

fn render_live_preview(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();

    html! {
        <div class="camera-panel">
            <video
                ref={model.video_ref.clone()}
                autoplay=true
                playsinline=true
                muted=true
                class="camera-preview"
            />
            // Capture target; never shown.
            <canvas ref={model.canvas_ref.clone()} class="hidden" />

            <div class="button-container">
                <button
                    class="primary-btn"
                    onclick={link.callback(|_| Msg::Capture)}
                    disabled={model.detecting()}
                >
                    { if model.detecting() {
                        html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Detecting..."}</> }
                    } else {
                        html! { <><i class="fa-solid fa-camera"></i>{" Capture & Detect"}</> }
                    }}
                </button>
                <button class="outline-btn" onclick={link.callback(|_| Msg::CancelScan)}>
                    <i class="fa-solid fa-xmark"></i> {" Close Camera"}
                </button>
            </div>
        </div>
    }
}

fn render_catalog(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();

    html! {
        <div class="catalog-grid">
            { for CATALOG.iter().map(|item| {
                let onclick = link.callback(move |_| Msg::ManualAdd(item));
                html! {
                    <div class="card catalog-card" key={item.id}>
                        <i class={format!("{} catalog-icon", item.icon)}></i>
                        <h3>{ item.name }</h3>
                        <p class="catalog-points">{ format!("+{} points", item.points) }</p>
                        <button
                            class="primary-btn"
                            {onclick}
                            disabled={model.scan_in_progress()}
                        >
                            <i class="fa-solid fa-plus"></i> {" Add Manually"}
                        </button>
                    </div>
                }
            })}
        </div>
    }
}
