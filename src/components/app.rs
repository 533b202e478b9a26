use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Interval;
use yew::prelude::*;

use super::{
    game_over_overlay::GameOverOverlay, hud::Hud, map_view::MapView,
    orientation_warning::OrientationWarning,
};
use crate::config;
use crate::model::{SessionAction, SessionState};
use crate::persist::{BrowserStore, OutcomeRecorder, ResultStore};
use crate::util::is_portrait;

const TICK_MILLIS: u32 = 1_000;

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| config::load_from_page());
    let session = {
        let config = config.clone();
        use_reducer(move || SessionState::new(config))
    };
    let portrait = use_state(|| false);
    let show_modal = use_state(|| false);
    let recorder = use_mut_ref(OutcomeRecorder::default);

    // Report the last saved result once at startup.
    {
        let key = config.storage_key.clone();
        use_effect_with((), move |_| {
            if let Some(prev) = BrowserStore.load(&key) {
                log::info!("previous result: {prev:?}");
            }
            || ()
        });
    }

    // Countdown: an interval exists only while playing; pause and end drop it.
    {
        let ticking = session.session.phase().is_ticking();
        let run_id = session.run_id;
        let session = session.clone();
        use_effect_with((run_id, ticking), move |(_, ticking)| {
            let interval = ticking.then(|| {
                Interval::new(TICK_MILLIS, move || {
                    session.dispatch(SessionAction::TickSecond)
                })
            });
            move || drop(interval)
        });
    }

    // Session end: show the modal and persist the result, once per run.
    {
        let outcome = session.session.outcome();
        let run_id = session.run_id;
        let key = config.storage_key.clone();
        let show_modal = show_modal.clone();
        let recorder = recorder.clone();
        use_effect_with((run_id, outcome), move |(run_id, outcome)| {
            let recorded = recorder.borrow_mut().observe(
                &mut BrowserStore,
                &key,
                *run_id,
                outcome.as_ref(),
            );
            if recorded {
                show_modal.set(true);
            } else if outcome.is_none() {
                show_modal.set(false);
            }
            || ()
        });
    }

    // Host orientation notifications.
    {
        let session = session.clone();
        let portrait = portrait.clone();
        use_effect_with((), move |_| {
            let check = Rc::new(move || {
                let Some(win) = web_sys::window() else {
                    return;
                };
                let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
                    v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
                };
                let p = is_portrait(dim(win.inner_width()), dim(win.inner_height()));
                portrait.set(p);
                session.dispatch(SessionAction::OrientationChanged { portrait: p });
            });
            check();
            let listeners = web_sys::window().map(|win| {
                ["resize", "orientationchange"].map(|kind| {
                    let check = check.clone();
                    EventListener::new(&win, kind, move |_| check())
                })
            });
            move || drop(listeners)
        });
    }

    let restart = {
        let session = session.clone();
        Callback::from(move |()| session.dispatch(SessionAction::Restart))
    };
    let close = {
        let show_modal = show_modal.clone();
        Callback::from(move |()| show_modal.set(false))
    };

    let s = &session.session;
    let found: Vec<bool> = s.targets().iter().map(|t| t.found).collect();
    let icons: Vec<String> = (0..found.len())
        .map(|i| config.target_image(i).unwrap_or_default().to_string())
        .collect();
    let won = s.outcome().is_some_and(|o| o.won);

    html! {<div style="position:relative; width:100vw; height:100vh; display:flex; flex-direction:column; overflow:hidden;">
        <Hud found={found.clone()} icons={icons} remaining_secs={s.remaining_secs()} ended={s.phase().is_ended()} />
        <div style="position:relative; flex:1;">
            <MapView config={config.clone()} session={session.clone()} />
        </div>
        <GameOverOverlay show={*show_modal} won={won} score={s.score()} total={found.len() as u32} remaining_secs={s.remaining_secs()} restart={restart} close={close} />
        <OrientationWarning show={*portrait} />
    </div>}
}
