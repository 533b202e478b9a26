use crate::util::format_time;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct GameOverOverlayProps {
    pub show: bool,
    pub won: bool,
    pub score: u32,
    pub total: u32,
    pub remaining_secs: u32,
    pub restart: Callback<()>,
    pub close: Callback<()>,
}

#[function_component]
pub fn GameOverOverlay(props: &GameOverOverlayProps) -> Html {
    if !props.show {
        return html! {};
    }
    let restart_btn = {
        let cb = props.restart.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let close_btn = {
        let cb = props.close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    // Clicking the backdrop closes; clicks inside the card do not bubble to it.
    let backdrop = {
        let cb = props.close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let swallow = Callback::from(|e: MouseEvent| e.stop_propagation());
    let (title, detail, accent) = if props.won {
        ("Congratulations!", "You've found all the stags!", "#3fb950")
    } else {
        ("Game Over", "Time's up!", "#f85149")
    };
    html! {
        <div id="game-over-modal" onclick={backdrop} style="position:fixed; inset:0; background:rgba(0,0,0,0.55); display:flex; align-items:center; justify-content:center;">
            <div onclick={swallow} style={format!("position:relative; background:rgba(0,0,0,0.85); border:2px solid {accent}; padding:24px 32px; border-radius:12px; text-align:center; min-width:300px;")}>
                <button onclick={close_btn} style="position:absolute; top:6px; right:10px; background:none; border:none; color:#c9d1d9; font-size:20px;">{"×"}</button>
                <h2 style={format!("margin:0 0 12px 0; color:{accent};")}>{ title }</h2>
                <p style="margin:4px 0;">{ detail }</p>
                <p style="margin:4px 0;">{ format!("Stags found: {}/{}", props.score, props.total) }</p>
                <p style="margin:4px 0;">{ format!("Time left: {}", format_time(props.remaining_secs)) }</p>
                <div style="margin-top:16px; display:flex; gap:12px; justify-content:center;">
                    <button onclick={restart_btn}>{"Restart Game"}</button>
                </div>
            </div>
        </div>
    }
}
