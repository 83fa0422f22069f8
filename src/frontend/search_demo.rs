use super::hooks::{use_reduced_motion, use_visibility};
use super::{emit_log, use_site_config};
use crate::content::SEARCH_SCENARIOS;
use crate::logging::LogLevel;
use crate::motion::search_demo::{
    run_search_demo, CancelToken, DemoFrame, DemoPhase, DemoTimings, Delay, RunOutcome,
};
use crate::motion::visibility::VisibilityConfig;
use gloo_timers::future::TimeoutFuture;
use serde_json::json;
use std::future::Future;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

struct TimerDelay;

impl Delay for TimerDelay {
    fn wait(&self, ms: u32) -> impl Future<Output = ()> {
        TimeoutFuture::new(ms)
    }
}

fn still_frame() -> DemoFrame {
    let scenario = SEARCH_SCENARIOS[0];
    DemoFrame {
        scenario: 0,
        input: scenario.query.to_string(),
        phase: DemoPhase::Done,
        response: scenario.response.to_string(),
    }
}

#[function_component(SearchDemo)]
pub fn search_demo() -> Html {
    let config = use_site_config();
    let node = use_node_ref();
    let visible = use_visibility(node.clone(), VisibilityConfig::with_threshold(0.4));
    let reduced_motion = use_reduced_motion();
    let frame = use_state_eq(|| if reduced_motion { still_frame() } else { DemoFrame::hidden() });

    {
        let frame = frame.clone();
        let config = config.clone();
        use_effect_with((visible, reduced_motion), move |(visible, reduced_motion)| {
            let cancel = CancelToken::new();
            if *visible && !*reduced_motion {
                let timings = DemoTimings {
                    response_char_ms: u32::try_from(config.typing_interval_ms).unwrap_or(28),
                    ..DemoTimings::default()
                };
                let max_cycles = config.search_demo_max_cycles;
                let cancel = cancel.clone();
                spawn_local(async move {
                    let emit = |next: &DemoFrame| frame.set(next.clone());
                    let outcome =
                        run_search_demo(&SEARCH_SCENARIOS, timings, max_cycles, &TimerDelay, &cancel, emit).await;
                    match outcome {
                        RunOutcome::Finished { cycles } => emit_log(
                            &config,
                            LogLevel::Info,
                            "search_demo_finished",
                            json!({ "cycles": cycles }),
                        ),
                        RunOutcome::Cancelled { cycle, scenario, step } => emit_log(
                            &config,
                            LogLevel::Debug,
                            "search_demo_cancelled",
                            json!({ "cycle": cycle, "scenario": scenario, "step": step }),
                        ),
                    }
                });
            }
            move || cancel.cancel()
        });
    }

    let result_count = SEARCH_SCENARIOS
        .get(frame.scenario)
        .map(|scenario| scenario.result_count)
        .unwrap_or(0);

    let body = match frame.phase {
        DemoPhase::Hidden => html! {},
        DemoPhase::Thinking { skeletons } => html! {
            <ul class="search-results is-loading" aria-label="Loading results">
                { for (0..skeletons).map(|_| html! { <li class="skeleton-tile" /> }) }
            </ul>
        },
        DemoPhase::Responding { .. } | DemoPhase::Done => html! {
            <>
                <p class="search-answer">
                    {frame.response.clone()}
                    if matches!(frame.phase, DemoPhase::Responding { .. }) {
                        <span class="search-caret" aria-hidden="true" />
                    }
                </p>
                <ul class="search-results">
                    { for (0..result_count).map(|index| html! {
                        <li class="result-tile">{format!("Result {}", index + 1)}</li>
                    }) }
                </ul>
            </>
        },
    };

    html! {
        <section ref={node} class="search-demo" aria-label="Search demo" aria-live="off">
            <div class="search-input" role="textbox" aria-readonly="true">
                <span>{frame.input.clone()}</span>
                <span class="search-caret" aria-hidden="true" />
            </div>
            {body}
        </section>
    }
}
