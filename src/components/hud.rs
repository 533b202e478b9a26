use crate::error::{GameError, Result};
use crate::util::format_time;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct HudProps {
    /// Found flag per target, in target order.
    pub found: Vec<bool>,
    /// Icon image per target, same order as `found`.
    pub icons: Vec<String>,
    pub remaining_secs: u32,
    pub ended: bool,
}

fn toggle_fullscreen() -> Result<()> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| GameError::MissingElement("document".into()))?;
    if document.fullscreen_element().is_some() {
        document.exit_fullscreen();
        return Ok(());
    }
    let root = document
        .document_element()
        .ok_or_else(|| GameError::MissingElement("documentElement".into()))?;
    root.request_fullscreen()
        .map_err(|e| GameError::Fullscreen(format!("{e:?}")))
}

#[function_component]
pub fn Hud(props: &HudProps) -> Html {
    let fullscreen_cb = Callback::from(|_| {
        if let Err(err) = toggle_fullscreen() {
            log::warn!("{err}");
        }
    });
    let score = props.found.iter().filter(|f| **f).count();
    let time_text = if props.ended && props.remaining_secs == 0 {
        "Game Over".to_string()
    } else {
        format_time(props.remaining_secs)
    };
    html! {
        <div id="top-bar" style="display:flex; align-items:center; justify-content:space-between; gap:12px; padding:6px 14px; background:#161b22; border-bottom:1px solid #30363d;">
            <div style="display:flex; gap:6px; align-items:center;">
                { for props.found.iter().zip(&props.icons).enumerate().map(|(i, (found, icon))| {
                    let class = if *found { "stag-icon found" } else { "stag-icon" };
                    let style = if *found {
                        "width:28px; height:28px; border-radius:50%; opacity:1; box-shadow:0 0 8px #ffd54a;"
                    } else {
                        "width:28px; height:28px; border-radius:50%; opacity:0.5;"
                    };
                    html! { <img id={format!("stag-icon-{}", i + 1)} class={class} style={style} src={icon.clone()} alt="stag" /> }
                }) }
                <span style="margin-left:8px; font-variant-numeric:tabular-nums;">{ format!("{}/{}", score, props.found.len()) }</span>
            </div>
            <div id="time" style="font-size:20px; font-weight:600; font-variant-numeric:tabular-nums;">{ time_text }</div>
            <button id="fullscreen-button" onclick={fullscreen_cb}>{"⛶"}</button>
        </div>
    }
}
