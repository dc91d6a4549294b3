use shared::catalog::LEADERS;
use yew::prelude::*;

fn medal_class(rank: u32) -> &'static str {
    match rank {
        1 => "medal-gold",
        2 => "medal-silver",
        3 => "medal-bronze",
        _ => "medal-none",
    }
}

/// Static demo leaderboard.
pub fn render_leaderboard() -> Html {
    html! {
        <section id="leaderboard" class="leaderboard">
            <h2><i class="fa-solid fa-trophy"></i> {" Top Eco Warriors"}</h2>
            <p class="subtitle">{"Leading the way in sustainable recycling"}</p>

            <div class="card leader-list">
                { for LEADERS.iter().map(|leader| html! {
                    <div class="leader-row" key={leader.rank.to_string()}>
                        <div class={classes!("leader-rank", medal_class(leader.rank))}>
                            { if leader.rank <= 3 {
                                html! { <i class="fa-solid fa-medal"></i> }
                            } else {
                                html! { <>{ leader.rank }</> }
                            }}
                        </div>
                        <div class="leader-name">
                            <h3>{ leader.name }</h3>
                            <p>{"Eco Warrior"}</p>
                        </div>
                        <div class="leader-points">
                            <span>{ leader.points }</span>
                            <p>{"points"}</p>
                        </div>
                    </div>
                })}
            </div>
        </section>
    }
}
