use super::super::{Model, Msg};
use shared::catalog::QUOTES;
use yew::prelude::*;

/// Rotating quote carousel; advances every five seconds, dots jump directly.
pub fn render_quotes(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();
    let quote = &QUOTES[model.quote_index % QUOTES.len()];

    html! {
        <section id="quotes" class="quotes">
            <h2>{"Stay Motivated"}</h2>
            <p class="subtitle">{"Words of wisdom for our eco journey"}</p>

            <div class="card quote-card" key={model.quote_index.to_string()}>
                <i class="fa-solid fa-quote-left quote-mark"></i>
                <p class="quote-text">{ format!("\u{201c}{}\u{201d}", quote.text) }</p>
                <p class="quote-author">{ format!("— {}", quote.author) }</p>

                <div class="quote-dots">
                    { for (0..QUOTES.len()).map(|index| {
                        let active = index == model.quote_index;
                        html! {
                            <button
                                key={index.to_string()}
                                class={classes!("quote-dot", active.then_some("active"))}
                                onclick={link.callback(move |_| Msg::SelectQuote(index))}
                            />
                        }
                    })}
                </div>
            </div>
        </section>
    }
}
