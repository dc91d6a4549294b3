use super::super::Model;
use yew::prelude::*;

/// Running eco-point total for this visit.
pub fn render_points(model: &Model) -> Html {
    html! {
        <div class="points-card card">
            <div class="points-icon"><i class="fa-solid fa-coins"></i></div>
            <div>
                <p class="points-label">{"Your Eco Points"}</p>
                <span class="points-total">{ model.ledger.total() }</span>
                <i class="fa-solid fa-arrow-trend-up"></i>
            </div>
        </div>
    }
}
