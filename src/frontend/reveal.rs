use super::hooks::use_one_shot_reveal;
use super::use_site_config;
use crate::content::{Insight, Metric};
use crate::motion::reveal::{RevealPhase, RevealPlan};
use crate::motion::text_effects::{CountUp, ScrambleText};
use yew::prelude::*;

const RISE_PX: f64 = 24.0;
const FLIP_HOLD_MS: f64 = 1_600.0;

#[derive(Properties, PartialEq)]
pub struct RevealProps {
    #[prop_or_default]
    pub children: Html,
    #[prop_or_default]
    pub delay_ms: f64,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(Reveal)]
pub fn reveal(props: &RevealProps) -> Html {
    let config = use_site_config();
    let node = use_node_ref();
    let frame = use_one_shot_reveal(node.clone(), config.reveal.clone(), RevealPlan::fade_in(props.delay_ms));

    let style = format!(
        "opacity: {:.3}; transform: translateY({:.2}px);",
        frame.amount,
        (1.0 - frame.amount) * RISE_PX
    );

    html! {
        <div ref={node} class={classes!("reveal", props.class.clone())} {style}>
            {props.children.clone()}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ScrambleHeadingProps {
    pub text: AttrValue,
    #[prop_or(7)]
    pub seed: u64,
}

#[function_component(ScrambleHeading)]
pub fn scramble_heading(props: &ScrambleHeadingProps) -> Html {
    let config = use_site_config();
    let node = use_node_ref();
    let frame = use_one_shot_reveal(node.clone(), config.reveal.clone(), RevealPlan::fade_in(0.0));
    let scramble = use_memo((props.text.clone(), props.seed), |(text, seed)| {
        ScrambleText::new(text, *seed)
    });

    html! {
        <h2 ref={node} class="scramble-heading" aria-label={props.text.clone()}>
            <span aria-hidden="true">{scramble.frame(frame.amount)}</span>
        </h2>
    }
}

#[derive(Properties, PartialEq)]
pub struct CountUpMetricProps {
    pub metric: Metric,
}

#[function_component(CountUpMetric)]
pub fn count_up_metric(props: &CountUpMetricProps) -> Html {
    let config = use_site_config();
    let node = use_node_ref();
    let frame = use_one_shot_reveal(node.clone(), config.reveal.clone(), RevealPlan::fade_in(150.0));
    let metric = props.metric;
    let counter = CountUp::new(metric.value)
        .with_decimals(metric.decimals)
        .with_affixes(metric.prefix, metric.suffix);

    html! {
        <div ref={node} class="metric">
            <p class="metric-value" aria-label={counter.format(1.0)}>
                <span aria-hidden="true">{counter.format(frame.amount)}</span>
            </p>
            <p class="metric-label">{metric.label}</p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct AutoFlipCardProps {
    pub insight: Insight,
    #[prop_or_default]
    pub delay_ms: f64,
}

#[function_component(AutoFlipCard)]
pub fn auto_flip_card(props: &AutoFlipCardProps) -> Html {
    let config = use_site_config();
    let node = use_node_ref();
    let frame = use_one_shot_reveal(
        node.clone(),
        config.reveal.clone(),
        RevealPlan::flip_and_return(props.delay_ms, FLIP_HOLD_MS),
    );
    let showing_back = matches!(frame.phase, RevealPhase::Holding) || frame.amount > 0.5;
    let style = format!("transform: rotateY({:.2}deg);", frame.amount * 180.0);

    html! {
        <article ref={node} class="flip-card">
            <div class="flip-card-inner" {style}>
                <div class="flip-card-face is-front" aria-hidden={showing_back.to_string()}>
                    <h3>{props.insight.title}</h3>
                    <p>{props.insight.front}</p>
                </div>
                <div class="flip-card-face is-back" aria-hidden={(!showing_back).to_string()}>
                    <p>{props.insight.back}</p>
                </div>
            </div>
        </article>
    }
}
