use super::browser::{client_point, element_rect, pointer_capability};
use super::hooks::use_animation_frame;
use crate::motion::cursor::{CursorIcon, HoverCursor};
use web_sys::Element;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct HoverCursorOverlayProps {
    pub icon: CursorIcon,
    #[prop_or_default]
    pub children: Html,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(HoverCursorOverlay)]
pub fn hover_cursor_overlay(props: &HoverCursorOverlayProps) -> Html {
    let container = use_node_ref();
    let cursor = use_mut_ref(|| HoverCursor::new(pointer_capability()));
    let style = use_state_eq(|| cursor.borrow().style());
    let animating = use_state_eq(|| false);
    let last_frame = use_mut_ref(|| None::<f64>);
    let enabled = cursor.borrow().is_enabled();

    let local_point = {
        let container = container.clone();
        move |event: &MouseEvent| {
            let point = client_point(event);
            container
                .cast::<Element>()
                .map(|element| element_rect(&element).local(point))
                .unwrap_or(point)
        }
    };

    let onmouseenter = {
        let cursor = cursor.clone();
        let animating = animating.clone();
        let local_point = local_point.clone();
        Callback::from(move |event: MouseEvent| {
            cursor.borrow_mut().enter(local_point(&event));
            animating.set(true);
        })
    };

    let onmousemove = {
        let cursor = cursor.clone();
        let animating = animating.clone();
        Callback::from(move |event: MouseEvent| {
            cursor.borrow_mut().moved(local_point(&event));
            animating.set(true);
        })
    };

    let onmouseleave = {
        let cursor = cursor.clone();
        let style = style.clone();
        Callback::from(move |_: MouseEvent| {
            let mut cursor = cursor.borrow_mut();
            cursor.leave();
            style.set(cursor.style());
        })
    };

    let on_frame = {
        let cursor = cursor.clone();
        let style = style.clone();
        let animating = animating.clone();
        Callback::from(move |timestamp: f64| {
            let previous = last_frame.borrow_mut().replace(timestamp);
            let mut cursor = cursor.borrow_mut();
            if let Some(previous) = previous {
                cursor.step((timestamp - previous) / 1_000.0);
            }
            style.set(cursor.style());
            if cursor.is_settled() {
                last_frame.borrow_mut().take();
                animating.set(false);
            }
        })
    };
    use_animation_frame(enabled && *animating, on_frame);

    if !enabled {
        return html! {
            <div class={props.class.clone()}>{props.children.clone()}</div>
        };
    }

    html! {
        <div
            ref={container}
            class={classes!("has-hover-cursor", props.class.clone())}
            {onmouseenter}
            {onmousemove}
            {onmouseleave}
        >
            {props.children.clone()}
            <div class="hover-cursor" aria-hidden="true" style={(*style).clone()}>
                {props.icon.label()}
            </div>
        </div>
    }
}
