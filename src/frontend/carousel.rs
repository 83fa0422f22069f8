use super::browser::{client_point, element_rect, is_desktop, viewport_size};
use super::cursor::HoverCursorOverlay;
use super::hooks::{use_animation_frame, use_autoplay, use_reduced_motion, use_visibility};
use super::{use_site_config, Route};
use crate::content::{CaseStudy, Insight};
use crate::motion::cursor::CursorIcon;
use crate::motion::flip::InsightsCarousel;
use crate::motion::marquee::{Marquee, VelocityCurve};
use crate::motion::sequencer::ring_dash_offset;
use crate::motion::visibility::VisibilityConfig;
use gloo_events::EventListener;
use web_sys::{window, Element};
use yew::prelude::*;
use yew_router::prelude::*;

const RING_RADIUS: f64 = 14.0;
const MARQUEE_IDLE_SPEED: f64 = 40.0;

#[derive(Properties, PartialEq)]
pub struct AutoplayShowcaseProps {
    pub studies: Vec<CaseStudy>,
}

#[function_component(AutoplayShowcase)]
pub fn autoplay_showcase(props: &AutoplayShowcaseProps) -> Html {
    let config = use_site_config();
    let node = use_node_ref();
    let visible = use_visibility(node.clone(), VisibilityConfig::with_threshold(0.3));
    let reduced_motion = use_reduced_motion();
    let hovered = use_state_eq(|| false);
    let autoplay = use_autoplay(
        props.studies.len(),
        config.autoplay_dwell_ms as f64,
        true,
        visible && !*hovered,
    );

    let Some(study) = props.studies.get(autoplay.index).copied() else {
        return html! {};
    };

    let circumference = std::f64::consts::TAU * RING_RADIUS;
    // Reduced motion keeps the rotation but drops the animated ring.
    let ring_offset = if reduced_motion {
        circumference
    } else {
        ring_dash_offset(autoplay.progress, circumference)
    };
    let onmouseenter = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(true))
    };
    let onmouseleave = Callback::from(move |_: MouseEvent| hovered.set(false));
    let on_next = {
        let advance = autoplay.advance.clone();
        Callback::from(move |_: MouseEvent| advance.emit(()))
    };

    html! {
        <section ref={node} class="showcase" aria-roledescription="carousel" aria-label="Selected work">
            <HoverCursorOverlay icon={CursorIcon::View} class={classes!("showcase-stage")}>
                <div {onmouseenter} {onmouseleave}>
                    <Link<Route> to={Route::CaseStudy { slug: study.slug.to_string() }} classes={classes!("showcase-card")}>
                        <img
                            src={study.cover.src}
                            alt={study.cover.alt}
                            style={study.cover.aspect_ratio_css()}
                            loading="lazy"
                        />
                        <div class="showcase-copy" aria-live="polite">
                            <h3>{study.title}</h3>
                            <p>{study.summary}</p>
                        </div>
                    </Link<Route>>
                </div>
            </HoverCursorOverlay>
            <div class="showcase-controls">
                <ol class="showcase-dots">
                    { for props.studies.iter().enumerate().map(|(index, item)| {
                        let go_to = autoplay.go_to.clone();
                        let current = index == autoplay.index;
                        html! {
                            <li>
                                <button
                                    type="button"
                                    class={classes!("dot", current.then_some("is-active"))}
                                    aria-label={format!("Show {}", item.title)}
                                    aria-current={current.then_some("true")}
                                    onclick={Callback::from(move |_: MouseEvent| go_to.emit(index))}
                                />
                            </li>
                        }
                    }) }
                </ol>
                <button type="button" class="showcase-next" aria-label="Next project" onclick={on_next}>
                    <svg viewBox="0 0 32 32" aria-hidden="true">
                        <circle class="ring-track" cx="16" cy="16" r={RING_RADIUS.to_string()} />
                        <circle
                            class="ring-progress"
                            cx="16"
                            cy="16"
                            r={RING_RADIUS.to_string()}
                            stroke-dasharray={format!("{circumference:.3}")}
                            stroke-dashoffset={format!("{ring_offset:.3}")}
                        />
                    </svg>
                    <span class="sr-only">{"Next"}</span>
                </button>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct InsightsDeckProps {
    pub insights: Vec<Insight>,
}

#[function_component(InsightsDeck)]
pub fn insights_deck(props: &InsightsDeckProps) -> Html {
    let card = use_node_ref();
    let deck = use_mut_ref(|| InsightsCarousel::new(props.insights.len(), is_desktop()));
    let render = use_state_eq(|| (0_usize, false, String::new()));
    let animating = use_state_eq(|| false);
    let last_frame = use_mut_ref(|| None::<f64>);

    let publish = {
        let render = render.clone();
        move |deck: &InsightsCarousel| {
            render.set((deck.active(), deck.is_flipped(), deck.card_style()));
        }
    };

    {
        let deck = deck.clone();
        let publish = publish.clone();
        use_effect_with((), move |_| {
            let listener = window().map(|win| {
                EventListener::new(&win, "resize", move |_| {
                    if let Some(deck) = deck.borrow_mut().as_mut() {
                        deck.set_desktop(is_desktop());
                        publish(deck);
                    }
                })
            });
            move || drop(listener)
        });
    }

    let with_deck = {
        let deck = deck.clone();
        let publish = publish.clone();
        move |apply: &dyn Fn(&mut InsightsCarousel)| {
            if let Some(deck) = deck.borrow_mut().as_mut() {
                apply(deck);
                publish(deck);
            }
        }
    };

    let on_flip = {
        let with_deck = with_deck.clone();
        Callback::from(move |_: MouseEvent| with_deck(&|deck: &mut InsightsCarousel| {
            deck.flip();
        }))
    };
    let on_previous = {
        let with_deck = with_deck.clone();
        Callback::from(move |_: MouseEvent| with_deck(&|deck: &mut InsightsCarousel| deck.previous()))
    };
    let on_next = Callback::from(move |_: MouseEvent| with_deck(&|deck: &mut InsightsCarousel| deck.next()));

    let onmousemove = {
        let card = card.clone();
        let deck = deck.clone();
        let animating = animating.clone();
        Callback::from(move |event: MouseEvent| {
            let Some(element) = card.cast::<Element>() else {
                return;
            };
            if let Some(deck) = deck.borrow_mut().as_mut() {
                deck.pointer_moved(&element_rect(&element), client_point(&event));
                if deck.tilt_enabled() {
                    animating.set(true);
                }
            }
        })
    };
    let onmouseleave = {
        let deck = deck.clone();
        let animating = animating.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(deck) = deck.borrow_mut().as_mut() {
                deck.pointer_left();
                animating.set(true);
            }
        })
    };

    let on_frame = {
        let deck = deck.clone();
        let animating = animating.clone();
        Callback::from(move |timestamp: f64| {
            let previous = last_frame.borrow_mut().replace(timestamp);
            let mut deck = deck.borrow_mut();
            let Some(deck) = deck.as_mut() else {
                return;
            };
            if let Some(previous) = previous {
                deck.step((timestamp - previous) / 1_000.0);
            }
            publish(deck);
            if deck.is_settled() {
                last_frame.borrow_mut().take();
                animating.set(false);
            }
        })
    };
    use_animation_frame(*animating, on_frame);

    let (active, flipped, style) = (*render).clone();
    let Some(insight) = props.insights.get(active) else {
        return html! {};
    };

    html! {
        <section class="insights" aria-roledescription="carousel" aria-label="Insights">
            <HoverCursorOverlay icon={CursorIcon::Next}>
                <button
                    ref={card}
                    type="button"
                    class={classes!("insight-card", flipped.then_some("is-flipped"))}
                    aria-pressed={flipped.to_string()}
                    {style}
                    onclick={on_flip}
                    {onmousemove}
                    {onmouseleave}
                >
                    <span class="insight-face is-front" aria-hidden={flipped.to_string()}>
                        <strong>{insight.title}</strong>
                        <span>{insight.front}</span>
                    </span>
                    <span class="insight-face is-back" aria-hidden={(!flipped).to_string()}>
                        {insight.back}
                    </span>
                </button>
            </HoverCursorOverlay>
            <div class="insights-nav">
                <button type="button" aria-label="Previous insight" onclick={on_previous}>
                    {CursorIcon::Previous.label()}
                </button>
                <span class="insights-count">{format!("{} / {}", active + 1, props.insights.len())}</span>
                <button type="button" aria-label="Next insight" onclick={on_next}>
                    {CursorIcon::Next.label()}
                </button>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct VelocityMarqueeProps {
    pub words: Vec<&'static str>,
}

fn measure_marquee(container: &NodeRef, first_copy: &NodeRef) -> Option<(f64, f64)> {
    let container = element_rect(&container.cast::<Element>()?);
    let copy = element_rect(&first_copy.cast::<Element>()?);
    Some((copy.width, container.width))
}

/// Endless strip of words. The pointer's distance from center steers
/// direction and speed; the track is moved by writing its style directly
/// so frames do not re-render the component.
#[function_component(VelocityMarquee)]
pub fn velocity_marquee(props: &VelocityMarqueeProps) -> Html {
    let container = use_node_ref();
    let track = use_node_ref();
    let first_copy = use_node_ref();
    let reduced_motion = use_reduced_motion();
    let visible = use_visibility(container.clone(), VisibilityConfig::default());
    let marquee = use_mut_ref(|| {
        let (viewport_width, _) = viewport_size();
        Marquee::new(viewport_width, viewport_width, VelocityCurve::default(), MARQUEE_IDLE_SPEED)
    });
    let copies = use_state_eq(|| marquee.borrow().track().copies());
    let last_frame = use_mut_ref(|| None::<f64>);

    {
        let container = container.clone();
        let first_copy = first_copy.clone();
        let marquee = marquee.clone();
        let copies = copies.clone();
        use_effect_with(props.words.clone(), move |_| {
            let relayout = move || {
                if let Some((copy_width, container_width)) = measure_marquee(&container, &first_copy) {
                    let mut marquee = marquee.borrow_mut();
                    marquee.relayout(copy_width, container_width);
                    copies.set(marquee.track().copies());
                }
            };
            relayout();
            let listener = window().map(|win| EventListener::new(&win, "resize", move |_| relayout()));
            move || drop(listener)
        });
    }

    let onmousemove = {
        let container = container.clone();
        let marquee = marquee.clone();
        Callback::from(move |event: MouseEvent| {
            let Some(element) = container.cast::<Element>() else {
                return;
            };
            let local = element_rect(&element).local(client_point(&event));
            marquee.borrow_mut().pointer_moved(local.x);
        })
    };
    let onmouseleave = {
        let marquee = marquee.clone();
        Callback::from(move |_: MouseEvent| marquee.borrow_mut().pointer_left())
    };

    {
        let last_frame = last_frame.clone();
        use_effect_with(visible, move |_| {
            last_frame.borrow_mut().take();
            || ()
        });
    }

    let on_frame = {
        let track = track.clone();
        let marquee = marquee.clone();
        Callback::from(move |timestamp: f64| {
            let previous = last_frame.borrow_mut().replace(timestamp);
            let mut marquee = marquee.borrow_mut();
            if let Some(previous) = previous {
                marquee.tick((timestamp - previous) / 1_000.0);
            }
            if let Some(element) = track.cast::<Element>() {
                let _ = element.set_attribute("style", &marquee.track().translate_style());
            }
        })
    };
    use_animation_frame(visible && !reduced_motion, on_frame);

    let initial_style = marquee.borrow().track().translate_style();

    html! {
        <div ref={container} class="marquee" {onmousemove} {onmouseleave}>
            <p class="sr-only">{props.words.join(", ")}</p>
            <div ref={track} class="marquee-track" aria-hidden="true" style={initial_style}>
                { for (0..*copies).map(|copy| {
                    let node = if copy == 0 { first_copy.clone() } else { NodeRef::default() };
                    html! {
                        <ul ref={node} class="marquee-copy">
                            { for props.words.iter().map(|word| html! { <li>{*word}</li> }) }
                        </ul>
                    }
                }) }
            </div>
        </div>
    }
}
