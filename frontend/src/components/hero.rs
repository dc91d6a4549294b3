use super::super::{Model, Msg};
use yew::prelude::*;

pub fn render_hero(ctx: &Context<Model>) -> Html {
    let link = ctx.link();

    html! {
        <section class="hero">
            <span class="hero-badge"><i class="fa-solid fa-leaf"></i> {" Earn Eco Points"}</span>
            <h1>{"Turn "}<span class="accent">{"Waste"}</span>{" Into Rewards"}</h1>
            <p class="lead">
                {"Scan recyclable items, earn points, and redeem rewards. \
                  Join thousands making a difference for our planet."}
            </p>
            <button class="primary-btn" onclick={link.callback(|_| Msg::StartScan)}>
                <i class="fa-solid fa-camera"></i> {" Start Scanning"}
            </button>
        </section>
    }
}

pub fn render_how_it_works() -> Html {
    let steps = [
        ("1", "Identify", "Photograph waste; the on-device AI recognizes the material."),
        ("2", "Earn Points", "Every verified action earns points instantly."),
        ("3", "Redeem", "Use points for coupons, discounts or donate."),
    ];

    html! {
        <section id="how" class="how-it-works">
            <h2>{"How it Works"}</h2>
            <div class="step-grid">
                { for steps.iter().map(|(step, title, desc)| html! {
                    <div class="card step-card" key={*step}>
                        <div class="step-number">{ step }</div>
                        <h3>{ title }</h3>
                        <p>{ desc }</p>
                    </div>
                })}
            </div>
        </section>
    }
}

pub fn render_stats() -> Html {
    let stats = [
        ("150+", "KG Recycled"),
        ("2,000+", "Points Earned"),
        ("500+", "Active Users"),
    ];

    html! {
        <section id="stats" class="stats">
            <h2>{"By The Numbers"}</h2>
            <div class="stat-grid">
                { for stats.iter().map(|(value, label)| html! {
                    <div class="card stat-card" key={*label}>
                        <h3>{ value }</h3>
                        <p>{ label }</p>
                    </div>
                })}
            </div>
        </section>
    }
}
