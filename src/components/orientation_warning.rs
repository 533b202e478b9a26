use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct OrientationWarningProps {
    pub show: bool,
}

#[function_component(OrientationWarning)]
pub fn orientation_warning(props: &OrientationWarningProps) -> Html {
    if !props.show {
        return html! {};
    }
    html! {
        <div id="orientation-warning" style="position:fixed; inset:0; background:rgba(0,0,0,0.9); display:flex; flex-direction:column; align-items:center; justify-content:center; gap:12px; text-align:center; padding:24px;">
            <div style="font-size:48px;">{"⟳"}</div>
            <h2 style="margin:0; color:#58a6ff;">{"Rotate your device"}</h2>
            <p style="margin:0; opacity:0.85;">{"The hunt continues in landscape. The timer is paused until then."}</p>
        </div>
    }
}
