use super::browser::{element_rect, now_ms, prefers_reduced_motion, viewport_size};
use super::{emit_log, use_site_config};
use crate::logging::LogLevel;
use crate::motion::reveal::{RevealFrame, RevealPlan, RevealSequence};
use crate::motion::scroll_progress::{ScrollProgressTracker, ScrollWindow};
use crate::motion::sequencer::Autoplay;
use crate::motion::visibility::{VisibilityConfig, VisibilityObserver, VisibilitySample, VisibilitySet};
use gloo_events::EventListener;
use gloo_render::{request_animation_frame, AnimationFrame};
use serde_json::json;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

#[hook]
pub fn use_reduced_motion() -> bool {
    *use_state(prefers_reduced_motion)
}

struct FrameLoop {
    alive: Rc<Cell<bool>>,
    handle: Rc<RefCell<Option<AnimationFrame>>>,
}

impl FrameLoop {
    fn start(callback: Rc<RefCell<Callback<f64>>>) -> Self {
        let frame_loop = Self {
            alive: Rc::new(Cell::new(true)),
            handle: Rc::new(RefCell::new(None)),
        };
        schedule_frame(frame_loop.alive.clone(), frame_loop.handle.clone(), callback);
        frame_loop
    }

    fn stop(&self) {
        self.alive.set(false);
        self.handle.borrow_mut().take();
    }
}

fn schedule_frame(
    alive: Rc<Cell<bool>>,
    slot: Rc<RefCell<Option<AnimationFrame>>>,
    callback: Rc<RefCell<Callback<f64>>>,
) {
    let next_slot = slot.clone();
    let frame = request_animation_frame(move |timestamp| {
        if !alive.get() {
            return;
        }
        let current = callback.borrow().clone();
        current.emit(timestamp);
        if alive.get() {
            schedule_frame(alive, next_slot, callback);
        }
    });
    *slot.borrow_mut() = Some(frame);
}

#[hook]
pub fn use_animation_frame(active: bool, on_frame: Callback<f64>) {
    let latest = use_mut_ref(|| on_frame.clone());
    *latest.borrow_mut() = on_frame;

    use_effect_with(active, move |active| {
        let frame_loop = active.then(|| FrameLoop::start(latest));
        move || {
            if let Some(frame_loop) = frame_loop {
                frame_loop.stop();
            }
        }
    });
}

fn observer_init(config: &VisibilityConfig) -> IntersectionObserverInit {
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(config.threshold));
    init.set_root_margin(&config.root_margin.to_css());
    init
}

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

#[hook]
pub fn use_visibility(node: NodeRef, config: VisibilityConfig) -> bool {
    let visible = use_state_eq(|| false);

    // An empty ref leaves the observer awaiting its element; the mounted
    // flag re-runs the effect once the node exists.
    let mounted = node.get().is_some();

    {
        let visible = visible.clone();
        use_effect_with((node, config, mounted), move |(node, config, _)| {
            let state = Rc::new(RefCell::new(VisibilityObserver::new(config.clone())));
            let element = node.cast::<Element>();

            let observer: Option<(IntersectionObserver, ObserverCallback)> = element.and_then(|element| {
                let state_for_callback = state.clone();
                let visible_for_callback = visible.clone();
                let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
                    move |entries: js_sys::Array, _observer: IntersectionObserver| {
                        for entry in entries.iter() {
                            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                                continue;
                            };
                            let sample = VisibilitySample {
                                intersecting: entry.is_intersecting(),
                                ratio: entry.intersection_ratio(),
                            };
                            if let Some(next) = state_for_callback.borrow_mut().observe(sample) {
                                visible_for_callback.set(next);
                            }
                        }
                    },
                );

                match IntersectionObserver::new_with_options(
                    callback.as_ref().unchecked_ref(),
                    &observer_init(config),
                ) {
                    Ok(observer) => {
                        observer.observe(&element);
                        state.borrow_mut().attach();
                        Some((observer, callback))
                    }
                    Err(_) => {
                        // No observer support: show the content rather than
                        // leaving it hidden forever.
                        visible.set(true);
                        None
                    }
                }
            });

            move || {
                state.borrow_mut().teardown();
                if let Some((observer, _callback)) = observer {
                    observer.disconnect();
                }
            }
        });
    }

    *visible
}

#[hook]
pub fn use_one_shot_reveal(node: NodeRef, config: VisibilityConfig, plan: RevealPlan) -> RevealFrame {
    let site = use_site_config();
    let visible = use_visibility(node, config);
    let reduced_motion = use_reduced_motion();
    let sequence = use_mut_ref(|| RevealSequence::new(plan));
    let frame = use_state_eq(|| sequence.borrow_mut().update(0.0));

    {
        let sequence = sequence.clone();
        let frame = frame.clone();
        use_effect_with(visible, move |visible| {
            let now = now_ms();
            let mut sequence = sequence.borrow_mut();
            if reduced_motion && *visible {
                sequence.finish_immediately();
            }
            sequence.on_visibility(*visible, now);
            frame.set(sequence.update(now));
            || ()
        });
    }

    {
        let sequence = sequence.clone();
        use_effect_with((), move |_| {
            move || {
                let mut sequence = sequence.borrow_mut();
                let phase = sequence.phase();
                let was_running = sequence.is_running();
                sequence.cancel();
                if was_running {
                    emit_log(&site, LogLevel::Debug, "reveal_cancelled", json!({ "phase": phase }));
                }
            }
        });
    }

    let running = sequence.borrow().is_running();
    let on_frame = {
        let sequence = sequence.clone();
        let frame = frame.clone();
        Callback::from(move |timestamp: f64| {
            let next = sequence.borrow_mut().update(timestamp);
            frame.set(next);
        })
    };
    use_animation_frame(running, on_frame);

    *frame
}

#[hook]
pub fn use_scroll_progress(node: NodeRef, scroll_window: ScrollWindow) -> f64 {
    let progress = use_state_eq(|| 0.0_f64);

    {
        let progress = progress.clone();
        use_effect_with((node, scroll_window), move |(node, scroll_window)| {
            let tracker = Rc::new(RefCell::new(ScrollProgressTracker::new(*scroll_window)));
            let measure: Rc<dyn Fn()> = {
                let node = node.clone();
                Rc::new(move || {
                    let Some(element) = node.cast::<Element>() else {
                        return;
                    };
                    let rect = element_rect(&element);
                    let (_, viewport_height) = viewport_size();
                    let value = tracker
                        .borrow_mut()
                        .measure(rect.top, rect.height, viewport_height);
                    // Three decimals is below what a transform can show.
                    progress.set((value * 1_000.0).round() / 1_000.0);
                })
            };

            measure();
            let listeners: Vec<EventListener> = window()
                .map(|win| {
                    ["scroll", "resize"]
                        .into_iter()
                        .map(|event_type| {
                            let measure = measure.clone();
                            EventListener::new(&win, event_type, move |_event| measure())
                        })
                        .collect()
                })
                .unwrap_or_default();

            move || drop(listeners)
        });
    }

    *progress
}

#[derive(Clone, PartialEq)]
pub struct AutoplayHandle {
    pub index: usize,
    pub progress: f64,
    pub finished: bool,
    pub advance: Callback<()>,
    pub go_to: Callback<usize>,
}

#[hook]
pub fn use_autoplay(len: usize, dwell_ms: f64, looping: bool, active: bool) -> AutoplayHandle {
    let autoplay = use_mut_ref(|| Autoplay::new(len, dwell_ms, looping));
    let snapshot = use_state_eq(|| (0_usize, 0.0_f64, false));
    let last_frame = use_mut_ref(|| None::<f64>);

    let publish = {
        let snapshot = snapshot.clone();
        move |autoplay: &Autoplay| {
            let progress = (autoplay.progress() * 500.0).round() / 500.0;
            snapshot.set((autoplay.index(), progress, autoplay.is_finished()));
        }
    };

    if let Some(autoplay) = autoplay.borrow_mut().as_mut() {
        if active {
            autoplay.start();
        } else {
            autoplay.pause();
        }
    }

    {
        let last_frame = last_frame.clone();
        use_effect_with(active, move |_| {
            *last_frame.borrow_mut() = None;
            || ()
        });
    }

    let running = active
        && autoplay
            .borrow()
            .as_ref()
            .is_some_and(|autoplay| autoplay.is_running());
    let on_frame = {
        let autoplay = autoplay.clone();
        let last_frame = last_frame.clone();
        let publish = publish.clone();
        Callback::from(move |timestamp: f64| {
            let previous = last_frame.borrow_mut().replace(timestamp);
            let mut autoplay = autoplay.borrow_mut();
            let Some(autoplay) = autoplay.as_mut() else {
                return;
            };
            if let Some(previous) = previous {
                autoplay.tick(timestamp - previous);
            }
            publish(autoplay);
        })
    };
    use_animation_frame(running, on_frame);

    let advance = {
        let autoplay = autoplay.clone();
        let publish = publish.clone();
        Callback::from(move |_: ()| {
            if let Some(autoplay) = autoplay.borrow_mut().as_mut() {
                autoplay.advance();
                publish(autoplay);
            }
        })
    };
    let go_to = {
        let autoplay = autoplay.clone();
        Callback::from(move |index: usize| {
            if let Some(autoplay) = autoplay.borrow_mut().as_mut() {
                autoplay.go_to(index);
                publish(autoplay);
            }
        })
    };

    let (index, progress, finished) = *snapshot;
    AutoplayHandle {
        index,
        progress,
        finished,
        advance,
        go_to,
    }
}

#[hook]
pub fn use_first_visible(nodes: Vec<NodeRef>, config: VisibilityConfig) -> Option<usize> {
    let first = use_state_eq(|| None::<usize>);
    let mounted = nodes.iter().filter(|node| node.get().is_some()).count();

    {
        let first = first.clone();
        use_effect_with((nodes, config, mounted), move |(nodes, config, _)| {
            let alive = Rc::new(Cell::new(true));
            let elements: Vec<Element> = nodes.iter().filter_map(NodeRef::cast::<Element>).collect();
            let set = Rc::new(RefCell::new(VisibilitySet::new()));

            let observer = {
                let alive = alive.clone();
                let elements = elements.clone();
                let threshold = config.threshold;
                let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
                    move |entries: js_sys::Array, _observer: IntersectionObserver| {
                        if !alive.get() {
                            return;
                        }
                        let batch = entries.iter().filter_map(|entry| {
                            let entry = entry.dyn_into::<IntersectionObserverEntry>().ok()?;
                            let target = entry.target();
                            let order = elements.iter().position(|element| *element == target)?;
                            let sample = VisibilitySample {
                                intersecting: entry.is_intersecting(),
                                ratio: entry.intersection_ratio(),
                            };
                            Some((order, sample.passes(threshold)))
                        });
                        let next = set.borrow_mut().update(batch.collect::<Vec<_>>());
                        first.set(next);
                    },
                );

                IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &observer_init(config))
                    .ok()
                    .map(|observer| {
                        for element in &elements {
                            observer.observe(element);
                        }
                        (observer, callback)
                    })
            };

            move || {
                alive.set(false);
                if let Some((observer, _callback)) = observer {
                    observer.disconnect();
                }
            }
        });
    }

    *first
}
