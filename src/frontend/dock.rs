use super::browser::{client_point, element_rect, now_ms};
use super::hooks::{use_animation_frame, use_reduced_motion};
use crate::content::DockItem;
use crate::motion::geometry::{Point, Rect};
use crate::motion::proximity::{DockConfig, DockTracker, ItemTransform};
use web_sys::Element;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct MagnifyDockProps {
    pub items: Vec<DockItem>,
}

fn measure(container: &NodeRef, items: &[NodeRef]) -> Option<(Rect, Vec<Point>)> {
    let container = element_rect(&container.cast::<Element>()?);
    let centers = items
        .iter()
        .map(|item| item.cast::<Element>().map(|element| element_rect(&element).center()))
        .collect::<Option<Vec<_>>>()?;
    Some((container, centers))
}

#[function_component(MagnifyDock)]
pub fn magnify_dock(props: &MagnifyDockProps) -> Html {
    let reduced_motion = use_reduced_motion();
    let container = use_node_ref();
    let item_refs = use_memo(props.items.len(), |len| {
        (0..*len).map(|_| NodeRef::default()).collect::<Vec<_>>()
    });
    let tracker = use_mut_ref(|| DockTracker::new(DockConfig::default(), Rect::default(), Vec::new()));
    let transforms = use_state_eq(|| vec![ItemTransform::REST; props.items.len()]);
    let animating = use_state_eq(|| false);

    let onmouseenter = {
        let container = container.clone();
        let item_refs = item_refs.clone();
        let tracker = tracker.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some((rect, centers)) = measure(&container, &item_refs) {
                tracker.borrow_mut().relayout(rect, centers);
            }
        })
    };

    let onmousemove = {
        let tracker = tracker.clone();
        let animating = animating.clone();
        Callback::from(move |event: MouseEvent| {
            if reduced_motion {
                return;
            }
            tracker.borrow_mut().pointer_moved(client_point(&event), now_ms());
            animating.set(true);
        })
    };

    let onmouseleave = {
        let tracker = tracker.clone();
        let animating = animating.clone();
        Callback::from(move |_: MouseEvent| {
            tracker.borrow_mut().pointer_left(now_ms());
            animating.set(true);
        })
    };

    let on_frame = {
        let tracker = tracker.clone();
        let transforms = transforms.clone();
        let animating = animating.clone();
        Callback::from(move |_timestamp: f64| {
            let now = now_ms();
            let tracker = tracker.borrow();
            transforms.set(tracker.frame(now));
            if tracker.is_settled(now) {
                animating.set(false);
            }
        })
    };
    use_animation_frame(*animating, on_frame);

    html! {
        <nav ref={container} class="dock" aria-label="Quick links" {onmouseenter} {onmousemove} {onmouseleave}>
            { for props.items.iter().zip(item_refs.iter()).enumerate().map(|(index, (item, node))| {
                let transform = transforms.get(index).copied().unwrap_or(ItemTransform::REST);
                html! {
                    <a
                        ref={node.clone()}
                        class="dock-item"
                        href={item.href}
                        aria-label={item.label}
                        style={transform.style()}
                    >
                        <span class="dock-glyph" aria-hidden="true">{item.glyph}</span>
                        <span class="dock-label">{item.label}</span>
                    </a>
                }
            }) }
        </nav>
    }
}
