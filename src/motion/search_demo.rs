use serde::Serialize;
use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scenario {
    pub query: &'static str,
    pub response: &'static str,
    pub result_count: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DemoTimings {
    pub type_char_ms: u32,
    pub erase_char_ms: u32,
    pub thinking_ms: u32,
    pub response_char_ms: u32,
    pub done_ms: u32,
    pub between_ms: u32,
}

impl Default for DemoTimings {
    fn default() -> Self {
        Self {
            type_char_ms: 55,
            erase_char_ms: 20,
            thinking_ms: 1_400,
            response_char_ms: 28,
            done_ms: 2_600,
            between_ms: 600,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "phase")]
pub enum DemoPhase {
    Hidden,
    Thinking { skeletons: usize },
    Responding { shown: usize },
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DemoStep {
    Typing,
    Thinking,
    Responding,
    Done,
    Erasing,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemoFrame {
    pub scenario: usize,
    pub input: String,
    pub phase: DemoPhase,
    pub response: String,
}

impl DemoFrame {
    pub fn hidden() -> Self {
        Self {
            scenario: 0,
            input: String::new(),
            phase: DemoPhase::Hidden,
            response: String::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Finished { cycles: u32 },
    Cancelled { cycle: u32, scenario: usize, step: DemoStep },
}

pub trait Delay {
    fn wait(&self, ms: u32) -> impl Future<Output = ()>;
}

#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

#[derive(Clone, Debug)]
pub struct Typewriter {
    chars: Vec<char>,
    shown: usize,
}

impl Typewriter {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            shown: 0,
        }
    }

    pub fn step(&mut self) -> usize {
        self.shown = (self.shown + 1).min(self.chars.len());
        self.shown
    }

    pub fn text(&self) -> String {
        self.chars[..self.shown].iter().collect()
    }

    pub fn is_complete(&self) -> bool {
        self.shown >= self.chars.len()
    }
}

struct Halted(DemoStep);

struct Runner<'a, D, F> {
    delay: &'a D,
    cancel: &'a CancelToken,
    emit: F,
}

impl<D, F> Runner<'_, D, F>
where
    D: Delay,
    F: FnMut(&DemoFrame),
{
    async fn pause(&self, ms: u32, step: DemoStep) -> Result<(), Halted> {
        if self.cancel.is_cancelled() {
            return Err(Halted(step));
        }
        self.delay.wait(ms).await;
        if self.cancel.is_cancelled() {
            return Err(Halted(step));
        }
        Ok(())
    }

    async fn play(&mut self, index: usize, scenario: &Scenario, timings: &DemoTimings) -> Result<(), Halted> {
        let mut frame = DemoFrame {
            scenario: index,
            input: String::new(),
            phase: DemoPhase::Hidden,
            response: String::new(),
        };

        for ch in scenario.query.chars() {
            self.pause(timings.type_char_ms, DemoStep::Typing).await?;
            frame.input.push(ch);
            (self.emit)(&frame);
        }

        frame.phase = DemoPhase::Thinking {
            skeletons: scenario.result_count,
        };
        (self.emit)(&frame);
        self.pause(timings.thinking_ms, DemoStep::Thinking).await?;

        let mut typewriter = Typewriter::new(scenario.response);
        while !typewriter.is_complete() {
            let shown = typewriter.step();
            frame.phase = DemoPhase::Responding { shown };
            frame.response = typewriter.text();
            (self.emit)(&frame);
            self.pause(timings.response_char_ms, DemoStep::Responding).await?;
        }

        frame.phase = DemoPhase::Done;
        (self.emit)(&frame);
        self.pause(timings.done_ms, DemoStep::Done).await?;

        frame.phase = DemoPhase::Hidden;
        frame.response.clear();
        (self.emit)(&frame);
        while frame.input.pop().is_some() {
            self.pause(timings.erase_char_ms, DemoStep::Erasing).await?;
            (self.emit)(&frame);
        }
        self.pause(timings.between_ms, DemoStep::Erasing).await
    }
}

/// Cycles through `scenarios` up to `max_cycles` times.
pub async fn run_search_demo<D, F>(
    scenarios: &[Scenario],
    timings: DemoTimings,
    max_cycles: u32,
    delay: &D,
    cancel: &CancelToken,
    emit: F,
) -> RunOutcome
where
    D: Delay,
    F: FnMut(&DemoFrame),
{
    let mut runner = Runner { delay, cancel, emit };

    for cycle in 0..max_cycles {
        for (index, scenario) in scenarios.iter().enumerate() {
            if let Err(Halted(step)) = runner.play(index, scenario, &timings).await {
                return RunOutcome::Cancelled {
                    cycle,
                    scenario: index,
                    step,
                };
            }
        }
    }

    (runner.emit)(&DemoFrame::hidden());
    RunOutcome::Finished { cycles: max_cycles }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::SEARCH_SCENARIOS;
    use std::cell::RefCell;

    const SCENARIOS: [Scenario; 2] = [
        Scenario {
            query: "tea",
            response: "Three picks.",
            result_count: 3,
        },
        Scenario {
            query: "go",
            response: "Two.",
            result_count: 2,
        },
    ];

    #[derive(Default)]
    struct FakeDelay {
        waits: RefCell<Vec<u32>>,
        cancel_at: Option<(usize, CancelToken)>,
    }

    impl Delay for FakeDelay {
        fn wait(&self, ms: u32) -> impl Future<Output = ()> {
            let mut waits = self.waits.borrow_mut();
            waits.push(ms);
            if let Some((count, token)) = &self.cancel_at {
                if waits.len() == *count {
                    token.cancel();
                }
            }
            std::future::ready(())
        }
    }

    #[tokio::test]
    async fn one_cycle_types_thinks_responds_and_erases() {
        let delay = FakeDelay::default();
        let cancel = CancelToken::new();
        let mut frames = Vec::new();

        let outcome = run_search_demo(&SCENARIOS[..1], DemoTimings::default(), 1, &delay, &cancel, |frame| {
            frames.push(frame.clone())
        })
        .await;

        assert_eq!(outcome, RunOutcome::Finished { cycles: 1 });
        let inputs: Vec<&str> = frames.iter().take(3).map(|frame| frame.input.as_str()).collect();
        assert_eq!(inputs, ["t", "te", "tea"]);
        assert_eq!(frames[3].phase, DemoPhase::Thinking { skeletons: 3 });

        let done_at = frames
            .iter()
            .position(|frame| frame.phase == DemoPhase::Done)
            .expect("reaches done");
        let before_done = &frames[done_at - 1];
        assert_eq!(before_done.phase, DemoPhase::Responding { shown: 12 });
        assert_eq!(before_done.response, "Three picks.");
        assert_eq!(frames.last(), Some(&DemoFrame::hidden()));
    }

    #[tokio::test]
    async fn next_scenario_starts_only_after_response_is_fully_typed() {
        let delay = FakeDelay::default();
        let cancel = CancelToken::new();
        let mut frames = Vec::new();

        run_search_demo(&SCENARIOS, DemoTimings::default(), 1, &delay, &cancel, |frame| {
            frames.push(frame.clone())
        })
        .await;

        let first_of_second = frames
            .iter()
            .position(|frame| frame.scenario == 1)
            .expect("second scenario runs");
        let full_response = frames[..first_of_second]
            .iter()
            .any(|frame| frame.response == SCENARIOS[0].response);
        assert!(full_response);
        assert!(frames[..first_of_second]
            .iter()
            .any(|frame| frame.phase == DemoPhase::Done));
        assert_eq!(frames[first_of_second].input, "g");
    }

    #[tokio::test]
    async fn cancellation_during_a_wait_stops_all_further_frames() {
        let cancel = CancelToken::new();
        // Three typing waits, then the thinking wait trips the flag.
        let delay = FakeDelay {
            waits: RefCell::new(Vec::new()),
            cancel_at: Some((4, cancel.clone())),
        };
        let mut frames = Vec::new();

        let outcome = run_search_demo(&SCENARIOS, DemoTimings::default(), 5, &delay, &cancel, |frame| {
            frames.push(frame.clone())
        })
        .await;

        assert_eq!(
            outcome,
            RunOutcome::Cancelled {
                cycle: 0,
                scenario: 0,
                step: DemoStep::Thinking
            }
        );
        assert_eq!(delay.waits.borrow().len(), 4);
        assert_eq!(frames.last().map(|frame| frame.phase), Some(DemoPhase::Thinking { skeletons: 3 }));
    }

    #[tokio::test]
    async fn already_cancelled_run_never_waits_or_emits() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let delay = FakeDelay::default();
        let mut emitted = 0;

        let outcome = run_search_demo(&SCENARIOS, DemoTimings::default(), 1, &delay, &cancel, |_| emitted += 1).await;

        assert!(matches!(outcome, RunOutcome::Cancelled { step: DemoStep::Typing, .. }));
        assert_eq!(emitted, 0);
        assert!(delay.waits.borrow().is_empty());
    }

    #[tokio::test]
    async fn run_is_bounded_by_max_cycles() {
        let delay = FakeDelay::default();
        let cancel = CancelToken::new();
        let mut thinking = 0;

        let outcome = run_search_demo(&SCENARIOS, DemoTimings::default(), 3, &delay, &cancel, |frame| {
            if matches!(frame.phase, DemoPhase::Thinking { .. }) {
                thinking += 1;
            }
        })
        .await;

        assert_eq!(outcome, RunOutcome::Finished { cycles: 3 });
        assert_eq!(thinking, 6);
    }

    #[tokio::test]
    async fn site_scenarios_play_in_order_for_one_cycle() {
        let delay = FakeDelay::default();
        let cancel = CancelToken::new();
        let mut frames = Vec::new();

        let outcome = run_search_demo(&SEARCH_SCENARIOS, DemoTimings::default(), 1, &delay, &cancel, |frame| {
            frames.push(frame.clone())
        })
        .await;
        assert_eq!(outcome, RunOutcome::Finished { cycles: 1 });

        let query: Vec<char> = SEARCH_SCENARIOS[0].query.chars().collect();
        for (typed, frame) in frames.iter().take(query.len()).enumerate() {
            let expected: String = query[..=typed].iter().collect();
            assert_eq!(frame.input, expected);
            assert_eq!(frame.phase, DemoPhase::Hidden);
        }

        let thinking: Vec<(usize, DemoPhase)> = frames
            .iter()
            .filter(|frame| matches!(frame.phase, DemoPhase::Thinking { .. }))
            .map(|frame| (frame.scenario, frame.phase))
            .collect();
        let expected: Vec<(usize, DemoPhase)> = SEARCH_SCENARIOS
            .iter()
            .enumerate()
            .map(|(index, scenario)| {
                (
                    index,
                    DemoPhase::Thinking {
                        skeletons: scenario.result_count,
                    },
                )
            })
            .collect();
        assert_eq!(thinking, expected);

        for (index, scenario) in SEARCH_SCENARIOS.iter().enumerate().skip(1) {
            let next_starts = frames
                .iter()
                .position(|frame| frame.scenario == index)
                .expect("every scenario plays");
            let previous = &SEARCH_SCENARIOS[index - 1];
            assert!(frames[..next_starts]
                .iter()
                .any(|frame| frame.scenario == index - 1 && frame.response == previous.response));
            assert_eq!(frames[next_starts].input, scenario.query.chars().take(1).collect::<String>());
        }
    }

    #[test]
    fn typewriter_reports_completion() {
        let mut typewriter = Typewriter::new("héllo");
        assert!(!typewriter.is_complete());
        for _ in 0..5 {
            typewriter.step();
        }
        assert!(typewriter.is_complete());
        assert_eq!(typewriter.text(), "héllo");
        assert_eq!(typewriter.step(), 5);
    }
}
