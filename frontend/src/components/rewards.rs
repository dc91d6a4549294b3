use shared::catalog::REWARDS;
use yew::prelude::*;

/// Static rewards catalog. Redemption is a demo stub; the buttons are
/// presentational only.
pub fn render_rewards() -> Html {
    html! {
        <section id="rewards" class="rewards">
            <h2>{"Redeem Your Rewards"}</h2>
            <p class="subtitle">{"Convert your eco points into exciting rewards"}</p>

            <div class="reward-grid">
                { for REWARDS.iter().map(|reward| html! {
                    <div class="card reward-card" key={reward.id.to_string()}>
                        <i class={format!("{} reward-icon", reward.icon)}></i>
                        <h3>{ reward.name }</h3>
                        <p class="reward-desc">{ reward.description }</p>
                        <p class="reward-cost">
                            <span>{ reward.points }</span> {" points"}
                        </p>
                        <button class="outline-btn" disabled=true>{"Redeem"}</button>
                    </div>
                })}
            </div>
        </section>
    }
}
