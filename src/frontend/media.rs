use super::hooks::{use_reduced_motion, use_scroll_progress};
use crate::content::{Asset, AssetKind};
use crate::motion::scroll_progress::{ScrollKeyframes, ScrollWindow};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ScrollScaleMediaProps {
    pub asset: Asset,
    #[prop_or_default]
    pub caption: Option<AttrValue>,
}

#[function_component(ScrollScaleMedia)]
pub fn scroll_scale_media(props: &ScrollScaleMediaProps) -> Html {
    let node = use_node_ref();
    let reduced_motion = use_reduced_motion();
    let progress = use_scroll_progress(node.clone(), ScrollWindow::enter_to_center());
    let keyframes = use_memo((), |_| ScrollKeyframes::grow_in());

    let asset = props.asset;
    let motion_style = if reduced_motion {
        String::new()
    } else {
        keyframes.style(progress)
    };
    let style = format!("{} {}", asset.aspect_ratio_css(), motion_style);

    let media = match asset.kind {
        AssetKind::Image => html! {
            <img src={asset.src} alt={asset.alt} loading="lazy" decoding="async" />
        },
        AssetKind::Video => html! {
            <video
                src={asset.src}
                aria-label={asset.alt}
                autoplay={(!reduced_motion).then_some("")}
                muted=""
                loop=""
                playsinline=""
                preload="metadata"
            />
        },
    };

    html! {
        <figure ref={node} class="scroll-media">
            <div class="scroll-media-frame" {style}>
                {media}
            </div>
            if let Some(caption) = props.caption.clone() {
                <figcaption>{caption}</figcaption>
            }
        </figure>
    }
}
