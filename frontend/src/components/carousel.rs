use std::cell::RefCell;
use std::rc::{Rc, Weak};

use chrono::Utc;
use gloo_timers::callback::{Interval, Timeout};
use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    PointerEvent, Window,
};
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::carousel::{Carousel as CarouselState, CarouselConfig, Direction, TimerCommand};

/// Share of the carousel that has to be on screen before autoplay starts.
const VISIBILITY_THRESHOLD: f64 = 0.1;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Layout {
    /// Cards side by side, scrolled horizontally.
    Track,
    /// Cards piled in 3D with the active one in front.
    Stack,
}

#[derive(Properties, PartialEq)]
pub struct CarouselProps {
    pub config: CarouselConfig,
    pub items: Vec<Html>,
    #[prop_or(Layout::Track)]
    pub layout: Layout,
    #[prop_or(true)]
    pub show_arrows: bool,
    #[prop_or(true)]
    pub show_dots: bool,
    #[prop_or_default]
    pub class: Classes,
}

type PointerListener = (&'static str, Closure<dyn FnMut(PointerEvent)>);

/// Window listeners that only live for the length of one drag.
/// Dropping the guard removes them.
struct DragListeners {
    window: Window,
    listeners: Vec<PointerListener>,
}

impl DragListeners {
    fn attach(window: Window, handlers: Vec<PointerListener>) -> Self {
        for (event, closure) in &handlers {
            if window
                .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
                .is_err()
            {
                warn!("Failed to attach {} listener", event);
            }
        }
        Self {
            window,
            listeners: handlers,
        }
    }
}

impl Drop for DragListeners {
    fn drop(&mut self) {
        for (event, closure) in &self.listeners {
            let _ = self
                .window
                .remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        }
    }
}

/// Window `resize` listener, removed when dropped.
struct ResizeListener {
    window: Window,
    closure: Closure<dyn FnMut()>,
}

impl Drop for ResizeListener {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.closure.as_ref().unchecked_ref());
    }
}

/// Browser side of one carousel: the state machine plus the timer handles
/// and listeners it asked for. Each slot holds at most one handle and
/// gloo cancels a timer when its handle drops.
struct Host {
    state: CarouselState,
    autoplay: Option<Interval>,
    cooldown: Option<Timeout>,
    drag_listeners: Option<DragListeners>,
    observer: Option<VisibilityObserver>,
    resize: Option<ResizeListener>,
}

type VisibilityObserver = (
    IntersectionObserver,
    Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
);

type SharedHost = Rc<RefCell<Host>>;

fn now_ms() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}

fn apply(
    host: &mut Host,
    weak: &Weak<RefCell<Host>>,
    commands: Vec<TimerCommand>,
    redraw: &UseForceUpdateHandle,
) {
    for command in commands {
        match command {
            TimerCommand::ArmAutoplay { period_ms } => {
                let weak = weak.clone();
                let redraw = redraw.clone();
                host.autoplay = Some(Interval::new(period_ms, move || {
                    if let Some(host) = weak.upgrade() {
                        host.borrow_mut().state.on_autoplay_tick(now_ms());
                        redraw.force_update();
                    }
                }));
            }
            TimerCommand::DisarmAutoplay => {
                host.autoplay = None;
            }
            TimerCommand::ArmCooldown { delay_ms } => {
                let weak_inner = weak.clone();
                let redraw = redraw.clone();
                host.cooldown = Some(Timeout::new(delay_ms, move || {
                    if let Some(host) = weak_inner.upgrade() {
                        let mut guard = host.borrow_mut();
                        let spent = guard.cooldown.take();
                        let commands = guard.state.on_cooldown_elapsed(now_ms());
                        apply(&mut guard, &weak_inner, commands, &redraw);
                        drop(guard);
                        drop(spent);
                        redraw.force_update();
                    }
                }));
            }
            TimerCommand::DisarmCooldown => {
                host.cooldown = None;
            }
        }
    }
}

fn run(
    host: &SharedHost,
    redraw: &UseForceUpdateHandle,
    f: impl FnOnce(&mut CarouselState) -> Vec<TimerCommand>,
) {
    let weak = Rc::downgrade(host);
    let mut guard = host.borrow_mut();
    let commands = f(&mut guard.state);
    apply(&mut guard, &weak, commands, redraw);
    drop(guard);
    redraw.force_update();
}

fn drag_handlers(host: &SharedHost, redraw: &UseForceUpdateHandle) -> Vec<PointerListener> {
    let on_move = {
        let weak = Rc::downgrade(host);
        let redraw = redraw.clone();
        Closure::wrap(Box::new(move |e: PointerEvent| {
            if let Some(host) = weak.upgrade() {
                host.borrow_mut().state.update_drag(e.client_x() as f64);
                redraw.force_update();
            }
        }) as Box<dyn FnMut(PointerEvent)>)
    };
    let release = |cancelled: bool| {
        let weak = Rc::downgrade(host);
        let redraw = redraw.clone();
        Closure::wrap(Box::new(move |_e: PointerEvent| {
            let Some(host) = weak.upgrade() else {
                return;
            };
            let spent = host.borrow_mut().drag_listeners.take();
            run(&host, &redraw, |state| {
                if cancelled {
                    state.cancel_drag(now_ms())
                } else {
                    state.end_drag(now_ms())
                }
            });
            drop(spent);
        }) as Box<dyn FnMut(PointerEvent)>)
    };
    vec![
        ("pointermove", on_move),
        ("pointerup", release(false)),
        ("pointercancel", release(true)),
    ]
}

/// Feeds the rendered viewport width back into the track, since the
/// viewport shrinks below the configured extent on narrow screens.
fn measure_viewport(host: &SharedHost, redraw: &UseForceUpdateHandle, viewport: &NodeRef) {
    let Some(element) = viewport.cast::<Element>() else {
        return;
    };
    let width = element.client_width();
    if width > 0 {
        run(host, redraw, |state| state.set_visible_extent(width as f64));
    }
}

fn listen_for_resize(
    host: &SharedHost,
    redraw: &UseForceUpdateHandle,
    viewport: &NodeRef,
) -> Option<ResizeListener> {
    let window = web_sys::window()?;
    let closure = {
        let weak = Rc::downgrade(host);
        let redraw = redraw.clone();
        let viewport = viewport.clone();
        Closure::wrap(Box::new(move || {
            if let Some(host) = weak.upgrade() {
                measure_viewport(&host, &redraw, &viewport);
            }
        }) as Box<dyn FnMut()>)
    };
    if window
        .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
        .is_err()
    {
        warn!("Failed to attach resize listener");
        return None;
    }
    Some(ResizeListener { window, closure })
}

fn observe_visibility(
    host: &SharedHost,
    redraw: &UseForceUpdateHandle,
    element: &Element,
) -> Option<VisibilityObserver> {
    let callback = {
        let weak = Rc::downgrade(host);
        let redraw = redraw.clone();
        Closure::wrap(Box::new(move |entries: js_sys::Array, _observer: IntersectionObserver| {
            let Some(host) = weak.upgrade() else {
                return;
            };
            let visible = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .any(|entry| {
                    entry.is_intersecting() && entry.intersection_ratio() >= VISIBILITY_THRESHOLD
                });
            run(&host, &redraw, |state| state.set_visible(visible, now_ms()));
        }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>)
    };

    let init = IntersectionObserverInit::new();
    init.set_threshold(&VISIBILITY_THRESHOLD.into());
    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
        Ok(observer) => {
            observer.observe(element);
            Some((observer, callback))
        }
        Err(err) => {
            warn!("IntersectionObserver unavailable, starting carousel immediately: {:?}", err);
            None
        }
    }
}

#[function_component(Carousel)]
pub fn carousel(props: &CarouselProps) -> Html {
    let redraw = use_force_update();
    let node = use_node_ref();
    let viewport = use_node_ref();
    let item_count = props.items.len();
    let host: SharedHost = {
        let config = props.config.clone();
        use_mut_ref(move || Host {
            state: CarouselState::new(config.or_default(), item_count),
            autoplay: None,
            cooldown: None,
            drag_listeners: None,
            observer: None,
            resize: None,
        })
    };

    {
        let host = host.clone();
        let redraw = redraw.clone();
        let node = node.clone();
        let viewport = viewport.clone();
        use_mount(move || {
            let resize = listen_for_resize(&host, &redraw, &viewport);
            host.borrow_mut().resize = resize;
            let observer = node
                .cast::<Element>()
                .and_then(|element| observe_visibility(&host, &redraw, &element));
            match observer {
                Some(observer) => host.borrow_mut().observer = Some(observer),
                // no observer means no way to tell, so treat it as on screen
                None => run(&host, &redraw, |state| state.set_visible(true, now_ms())),
            }
        });
    }

    {
        let host = host.clone();
        let redraw = redraw.clone();
        use_unmount(move || {
            let weak = Rc::downgrade(&host);
            let mut guard = host.borrow_mut();
            if let Some((observer, _callback)) = guard.observer.take() {
                observer.disconnect();
            }
            let commands = guard.state.teardown();
            apply(&mut guard, &weak, commands, &redraw);
            guard.drag_listeners = None;
            guard.resize = None;
            debug!("carousel unmounted");
        });
    }

    // also runs on mount, which takes the first viewport measurement
    {
        let host = host.clone();
        let redraw = redraw.clone();
        let viewport = viewport.clone();
        use_effect_with_deps(
            move |config: &CarouselConfig| {
                let config = config.clone().or_default();
                run(&host, &redraw, |state| state.set_config(config));
                measure_viewport(&host, &redraw, &viewport);
                || ()
            },
            props.config.clone(),
        );
    }

    {
        let host = host.clone();
        let redraw = redraw.clone();
        use_effect_with_deps(
            move |count: &usize| {
                let count = *count;
                if host.borrow().state.track().item_count != count {
                    run(&host, &redraw, |state| state.set_item_count(count));
                }
                || ()
            },
            item_count,
        );
    }

    let on_pointer_down = {
        let host = host.clone();
        let redraw = redraw.clone();
        Callback::from(move |e: PointerEvent| {
            if e.pointer_type() == "mouse" && e.button() != 0 {
                return;
            }
            e.prevent_default();
            run(&host, &redraw, |state| state.begin_drag(e.client_x() as f64));
            let dragging = host.borrow().state.drag().is_some();
            if dragging && host.borrow().drag_listeners.is_none() {
                if let Some(window) = web_sys::window() {
                    let listeners = DragListeners::attach(window, drag_handlers(&host, &redraw));
                    host.borrow_mut().drag_listeners = Some(listeners);
                }
            }
        })
    };

    let navigate = |direction: Direction| {
        let host = host.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: MouseEvent| {
            run(&host, &redraw, |state| state.manual_navigate(direction, now_ms()));
        })
    };
    let on_prev = navigate(Direction::Backward);
    let on_next = navigate(Direction::Forward);

    let snapshot = host.borrow();
    let state = &snapshot.state;
    let dragging = state.drag().is_some();
    let config = state.config();
    let active = state.index();

    let slides = match props.layout {
        Layout::Track => {
            let track_style = format!(
                "transform: translate3d({:.1}px, 0, 0); width: {:.1}px;",
                -state.offset(),
                state.track().total_extent()
            );
            html! {
                <div class={classes!("carousel-track", dragging.then(|| "dragging"))} style={track_style}>
                    { for props.items.iter().enumerate().map(|(i, item)| html! {
                        <div
                            class={classes!("carousel-slide", (i == active).then(|| "active"))}
                            style={format!("width: {:.1}px;", config.item_extent)}
                        >
                            { item.clone() }
                        </div>
                    }) }
                </div>
            }
        }
        Layout::Stack => {
            let shift = state.drag().map(|drag| drag.delta).unwrap_or(0.0);
            html! {
                <div
                    class={classes!("carousel-stack", dragging.then(|| "dragging"))}
                    style={format!("transform: translate3d({:.1}px, 0, 0);", shift)}
                >
                    { for props.items.iter().enumerate().map(|(i, item)| {
                        let distance = state.track().cyclic_distance(active, i);
                        let depth = distance.unsigned_abs() as f64;
                        let style = format!(
                            "width: {:.1}px; transform: translateX({:.1}px) scale({:.2}) rotateY({:.1}deg); z-index: {}; opacity: {};",
                            config.item_extent,
                            distance as f64 * config.item_extent * 0.18,
                            (1.0 - depth * 0.08).max(0.5),
                            distance as f64 * -12.0,
                            100 - distance.unsigned_abs().min(99),
                            if depth > 2.0 { 0.0 } else { 1.0 - depth * 0.25 },
                        );
                        html! {
                            <div class={classes!("carousel-card", (distance == 0).then(|| "active"))} style={style}>
                                { item.clone() }
                            </div>
                        }
                    }) }
                </div>
            }
        }
    };

    let arrows = if props.show_arrows {
        html! {
            <>
                <button class="carousel-arrow prev" aria-label="Previous" disabled={!state.can_go_prev()} onclick={on_prev}>
                    {"‹"}
                </button>
                <button class="carousel-arrow next" aria-label="Next" disabled={!state.can_go_next()} onclick={on_next}>
                    {"›"}
                </button>
            </>
        }
    } else {
        html! {}
    };

    let stops = state.track().stop_count();
    let dots = if props.show_dots && stops > 1 {
        html! {
            <div class="carousel-dots">
                { for (0..stops).map(|i| {
                    let host = host.clone();
                    let redraw = redraw.clone();
                    let onclick = Callback::from(move |_: MouseEvent| {
                        run(&host, &redraw, |state| state.set_index_directly(i, now_ms()));
                    });
                    html! {
                        <button
                            class={classes!("carousel-dot", (i == active).then(|| "active"))}
                            aria-label={format!("Go to slide {}", i + 1)}
                            {onclick}
                        />
                    }
                }) }
            </div>
        }
    } else {
        html! {}
    };

    html! {
        <div class={classes!("carousel", props.class.clone())} ref={node}>
            <div
                class="carousel-viewport"
                ref={viewport}
                style={format!("max-width: {:.1}px;", config.visible_extent)}
                onpointerdown={on_pointer_down}
            >
                { slides }
            </div>
            { arrows }
            { dots }
            <style>
                {r#"
                .carousel {
                    position: relative;
                    margin: 0 auto;
                    user-select: none;
                }
                .carousel-viewport {
                    overflow: hidden;
                    margin: 0 auto;
                    touch-action: pan-y;
                    cursor: grab;
                }
                .carousel-track {
                    display: flex;
                    transition: transform 0.6s ease;
                    will-change: transform;
                }
                .carousel-track.dragging,
                .carousel-stack.dragging {
                    transition: none;
                    cursor: grabbing;
                }
                .carousel-slide {
                    flex: 0 0 auto;
                    padding: 0 0.75rem;
                    box-sizing: border-box;
                }
                .carousel-stack {
                    position: relative;
                    height: 420px;
                    perspective: 1200px;
                    transform-style: preserve-3d;
                }
                .carousel-card {
                    position: absolute;
                    left: 0;
                    right: 0;
                    margin: 0 auto;
                    transition: transform 0.6s ease, opacity 0.6s ease;
                }
                .carousel-arrow {
                    position: absolute;
                    top: 50%;
                    transform: translateY(-50%);
                    background: rgba(26, 26, 26, 0.85);
                    color: #fff;
                    border: 1px solid rgba(30, 144, 255, 0.3);
                    border-radius: 50%;
                    width: 44px;
                    height: 44px;
                    font-size: 1.5rem;
                    cursor: pointer;
                }
                .carousel-arrow.prev { left: 0.5rem; }
                .carousel-arrow.next { right: 0.5rem; }
                .carousel-arrow:disabled { opacity: 0.3; cursor: default; }
                .carousel-dots {
                    display: flex;
                    justify-content: center;
                    gap: 0.5rem;
                    margin-top: 1.5rem;
                }
                .carousel-dot {
                    width: 10px;
                    height: 10px;
                    border-radius: 50%;
                    border: none;
                    background: rgba(255, 255, 255, 0.3);
                    cursor: pointer;
                    padding: 0;
                }
                .carousel-dot.active { background: #1E90FF; }
                "#}
            </style>
        </div>
    }
}
