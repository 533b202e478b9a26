use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Event, HtmlCanvasElement, HtmlElement, HtmlImageElement,
    PointerEvent, WheelEvent,
};
use yew::prelude::*;

use super::camera_controls::CameraControls;
use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::model::{SessionAction, SessionPhase, SessionState};
use crate::state::{Point, Rect, Viewport, ViewportController};

type DrawRef = Rc<RefCell<Option<Rc<dyn Fn()>>>>;
type ControllerRef = Rc<RefCell<ViewportController>>;
type SessionRef = Rc<RefCell<UseReducerHandle<SessionState>>>;

#[derive(Properties, PartialEq, Clone)]
pub struct MapViewProps {
    pub config: Rc<GameConfig>,
    pub session: UseReducerHandle<SessionState>,
}

fn request_draw(draw_ref: &DrawRef) {
    let f = draw_ref.borrow().clone();
    if let Some(f) = f {
        f();
    }
}

struct Sprites {
    map: HtmlImageElement,
    targets: Vec<Option<HtmlImageElement>>,
}

fn load_image(src: &str) -> Result<HtmlImageElement> {
    let img = HtmlImageElement::new().map_err(|e| GameError::Canvas(format!("{e:?}")))?;
    img.set_src(src);
    Ok(img)
}

fn is_ready(img: &HtmlImageElement) -> bool {
    img.complete() && img.natural_width() > 0
}

/// Listeners and images owned by a mounted map; dropping it detaches everything.
struct MountedMap {
    _listeners: Vec<EventListener>,
}

fn mount(
    canvas_ref: &NodeRef,
    config: Rc<GameConfig>,
    controller: ControllerRef,
    session_ref: SessionRef,
    draw_ref: DrawRef,
) -> Result<MountedMap> {
    let window = web_sys::window().ok_or_else(|| GameError::MissingElement("window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| GameError::MissingElement("document".into()))?;
    let canvas: HtmlCanvasElement = canvas_ref
        .cast::<HtmlCanvasElement>()
        .ok_or_else(|| GameError::MissingElement("game-canvas".into()))?;
    let ctx = canvas
        .get_context("2d")
        .map_err(|e| GameError::Canvas(format!("{e:?}")))?
        .ok_or_else(|| GameError::Canvas("2d context unavailable".into()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| GameError::Canvas("context is not 2d".into()))?;

    let sprites = {
        let map = load_image(&config.map_image)?;
        let targets = (0..config.targets.len())
            .map(|i| match config.target_image(i).map(load_image) {
                Some(Ok(img)) => Some(img),
                Some(Err(err)) => {
                    log::warn!("target {i} sprite: {err}");
                    None
                }
                None => None,
            })
            .collect();
        Rc::new(Sprites { map, targets })
    };

    let resize = {
        let canvas = canvas.clone();
        let document = document.clone();
        let window = window.clone();
        let controller = controller.clone();
        move || {
            let bar_height: f64 = document
                .get_element_by_id("top-bar")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                .map(|el| el.client_height() as f64)
                .unwrap_or(0.0);
            let width = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(800.0);
            let height = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(600.0)
                - bar_height;
            canvas.set_width(width.max(0.0) as u32);
            canvas.set_height(height.max(0.0) as u32);
            controller
                .borrow_mut()
                .set_screen_size(canvas.width() as f64, canvas.height() as f64);
        }
    };
    resize();

    let draw_closure: Rc<dyn Fn()> = {
        let canvas = canvas.clone();
        let controller = controller.clone();
        let session_ref = session_ref.clone();
        let sprites = sprites.clone();
        let config = config.clone();
        Rc::new(move || {
            if !canvas.is_connected() {
                return;
            }
            let c = controller.borrow();
            let vp = c.viewport();
            let (w, h) = vp.screen_size();
            let zoom = vp.zoom();
            let scroll = vp.scroll_offset();
            let visible = vp.visible_rect();
            let handle = session_ref.borrow().clone();

            ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
            ctx.set_fill_style_str("#1b1f1a");
            ctx.fill_rect(0.0, 0.0, w, h);
            ctx.set_transform(zoom, 0.0, 0.0, zoom, -scroll.x * zoom, -scroll.y * zoom)
                .ok();

            if is_ready(&sprites.map) {
                ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    &sprites.map,
                    0.0,
                    0.0,
                    config.content_width,
                    config.content_height,
                )
                .ok();
            } else {
                ctx.set_fill_style_str("#2d3a27");
                ctx.fill_rect(0.0, 0.0, config.content_width, config.content_height);
            }

            for t in handle.session.targets() {
                let b = t.bounds;
                let ring = b.width.max(b.height) * 0.6;
                let reach = Rect {
                    x: t.x - ring,
                    y: t.y - ring,
                    width: ring * 2.0,
                    height: ring * 2.0,
                };
                if !visible.intersects(&reach) {
                    continue;
                }
                match sprites.targets.get(t.id).and_then(Option::as_ref) {
                    Some(img) if is_ready(img) => {
                        ctx.draw_image_with_html_image_element_and_dw_and_dh(
                            img, b.x, b.y, b.width, b.height,
                        )
                        .ok();
                    }
                    _ => {}
                }
                if t.found {
                    ctx.set_stroke_style_str("#ffd54a");
                    ctx.set_line_width((4.0 / zoom).max(1.0));
                    ctx.begin_path();
                    ctx.arc(t.x, t.y, ring, 0.0, TAU).ok();
                    ctx.stroke();
                }
            }
        })
    };
    *draw_ref.borrow_mut() = Some(draw_closure.clone());
    (draw_closure)();

    let mut listeners = Vec::new();

    for img in std::iter::once(&sprites.map).chain(sprites.targets.iter().flatten()) {
        let draw_ref = draw_ref.clone();
        listeners.push(EventListener::new(img, "load", move |_| request_draw(&draw_ref)));
    }

    listeners.push({
        let canvas_pd = canvas.clone();
        let controller = controller.clone();
        let session_ref = session_ref.clone();
        let draw_ref = draw_ref.clone();
        EventListener::new(&canvas, "pointerdown", move |event: &Event| {
            let Some(e) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            let pos = Point::new(e.offset_x() as f64, e.offset_y() as f64);
            let mut c = controller.borrow_mut();
            let first = c.pointers().is_empty();
            c.pointer_down(e.pointer_id(), pos);
            let hit = if first && c.input_enabled() {
                Some(c.viewport().screen_to_content(pos))
            } else {
                None
            };
            drop(c);
            let _ = canvas_pd.set_pointer_capture(e.pointer_id());
            if let Some(content) = hit {
                let handle = session_ref.borrow().clone();
                if let Some(id) = handle.session.target_at(content) {
                    log::debug!("target {id} hit at ({:.0}, {:.0})", content.x, content.y);
                    handle.dispatch(SessionAction::ActivateTarget(id));
                }
            }
            request_draw(&draw_ref);
        })
    });

    listeners.push({
        let controller = controller.clone();
        let draw_ref = draw_ref.clone();
        EventListener::new(&canvas, "pointermove", move |event: &Event| {
            let Some(e) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            let pos = Point::new(e.offset_x() as f64, e.offset_y() as f64);
            let moved = {
                let mut c = controller.borrow_mut();
                let before = (c.viewport().center(), c.viewport().zoom());
                c.pointer_move(e.pointer_id(), pos);
                before != (c.viewport().center(), c.viewport().zoom())
            };
            if moved {
                request_draw(&draw_ref);
            }
        })
    });

    for kind in ["pointerup", "pointercancel", "pointerleave"] {
        let controller = controller.clone();
        listeners.push(EventListener::new(&canvas, kind, move |event: &Event| {
            if let Some(e) = event.dyn_ref::<PointerEvent>() {
                controller.borrow_mut().pointer_up(e.pointer_id());
            }
        }));
    }

    listeners.push({
        let controller = controller.clone();
        let draw_ref = draw_ref.clone();
        EventListener::new_with_options(
            &canvas,
            "wheel",
            EventListenerOptions::enable_prevent_default(),
            move |event: &Event| {
                let Some(e) = event.dyn_ref::<WheelEvent>() else {
                    return;
                };
                e.prevent_default();
                controller.borrow_mut().wheel(e.delta_y());
                request_draw(&draw_ref);
            },
        )
    });

    listeners.push({
        let draw_ref = draw_ref.clone();
        EventListener::new(&window, "resize", move |_| {
            resize();
            request_draw(&draw_ref);
        })
    });

    Ok(MountedMap {
        _listeners: listeners,
    })
}

#[function_component(MapView)]
pub fn map_view(props: &MapViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let controller = {
        let config = props.config.clone();
        use_mut_ref(move || ViewportController::new(Viewport::new(&config, 0.0, 0.0)))
    };
    let draw_ref: DrawRef = use_mut_ref(|| None::<Rc<dyn Fn()>>);
    let session_ref = use_mut_ref(|| props.session.clone());

    {
        let canvas_ref = canvas_ref.clone();
        let config = props.config.clone();
        let controller = controller.clone();
        let session_ref = session_ref.clone();
        let draw_ref = draw_ref.clone();
        use_effect_with((), move |_| {
            let mounted = match mount(&canvas_ref, config, controller, session_ref, draw_ref.clone()) {
                Ok(m) => Some(m),
                Err(err) => {
                    log::warn!("map view not mounted: {err}");
                    None
                }
            };
            move || {
                *draw_ref.borrow_mut() = None;
                drop(mounted);
            }
        });
    }

    // Keep the handle the listeners read current, then redraw.
    {
        let session_ref = session_ref.clone();
        let current = props.session.clone();
        let draw_ref = draw_ref.clone();
        use_effect_with(props.session.version, move |_| {
            *session_ref.borrow_mut() = current;
            request_draw(&draw_ref);
            || ()
        });
    }

    {
        let controller = controller.clone();
        let phase = props.session.session.phase();
        use_effect_with(phase, move |phase| {
            controller
                .borrow_mut()
                .set_input_enabled(*phase == SessionPhase::Playing);
            || ()
        });
    }

    // Fresh run: back to the initial view.
    {
        let controller = controller.clone();
        let draw_ref = draw_ref.clone();
        use_effect_with(props.session.run_id, move |_| {
            controller.borrow_mut().reset();
            request_draw(&draw_ref);
            || ()
        });
    }

    let zoom_cb = |zoom_in: bool| {
        let controller = controller.clone();
        let draw_ref = draw_ref.clone();
        Callback::from(move |()| {
            controller.borrow_mut().step_zoom(zoom_in);
            request_draw(&draw_ref);
        })
    };
    let center_cb = {
        let controller = controller.clone();
        let draw_ref = draw_ref.clone();
        Callback::from(move |()| {
            controller.borrow_mut().reset();
            request_draw(&draw_ref);
        })
    };

    html! {<div style="position:relative; width:100%; height:100%;">
        <canvas ref={canvas_ref} id="game-canvas" style="display:block; width:100%; height:100%; touch-action:none;"></canvas>
        <CameraControls on_zoom_in={zoom_cb(true)} on_zoom_out={zoom_cb(false)} on_center={center_cb} />
    </div>}
}
