use super::easing::{clamp01, ease_out_cubic};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LatchState {
    NotTriggered,
    Triggered,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OneShotLatch {
    state: LatchState,
}

impl Default for OneShotLatch {
    fn default() -> Self {
        Self {
            state: LatchState::NotTriggered,
        }
    }
}

impl OneShotLatch {
    /// Returns `true` only for the call that flips the latch.
    pub fn fire(&mut self) -> bool {
        match self.state {
            LatchState::NotTriggered => {
                self.state = LatchState::Triggered;
                true
            }
            LatchState::Triggered => false,
        }
    }

    pub fn state(&self) -> LatchState {
        self.state
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReturnStep {
    pub hold_ms: f64,
    pub return_ms: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealPlan {
    pub delay_ms: f64,
    pub transition_ms: f64,
    pub then_return: Option<ReturnStep>,
}

impl RevealPlan {
    pub fn fade_in(delay_ms: f64) -> Self {
        Self {
            delay_ms,
            transition_ms: 700.0,
            then_return: None,
        }
    }

    pub fn flip_and_return(delay_ms: f64, hold_ms: f64) -> Self {
        Self {
            delay_ms,
            transition_ms: 600.0,
            then_return: Some(ReturnStep {
                hold_ms,
                return_ms: 600.0,
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealPhase {
    NotTriggered,
    Delaying,
    Transitioning,
    Holding,
    Returning,
    Complete,
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealFrame {
    pub phase: RevealPhase,
    pub amount: f64,
}

#[derive(Clone, Debug)]
pub struct RevealSequence {
    plan: RevealPlan,
    latch: OneShotLatch,
    phase: RevealPhase,
    phase_started_at: f64,
    last_amount: f64,
}

impl RevealSequence {
    pub fn new(plan: RevealPlan) -> Self {
        Self {
            plan,
            latch: OneShotLatch::default(),
            phase: RevealPhase::NotTriggered,
            phase_started_at: 0.0,
            last_amount: 0.0,
        }
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    pub fn latch_state(&self) -> LatchState {
        self.latch.state()
    }

    pub fn is_running(&self) -> bool {
        matches!(
            self.phase,
            RevealPhase::Delaying
                | RevealPhase::Transitioning
                | RevealPhase::Holding
                | RevealPhase::Returning
        )
    }

    pub fn on_visibility(&mut self, visible: bool, now_ms: f64) -> bool {
        if !visible || self.phase == RevealPhase::Cancelled || !self.latch.fire() {
            return false;
        }

        self.enter(RevealPhase::Delaying, now_ms);
        self.settle(now_ms);
        true
    }

    pub fn update(&mut self, now_ms: f64) -> RevealFrame {
        if self.is_running() {
            self.settle(now_ms);
        }

        let amount = match self.phase {
            RevealPhase::NotTriggered | RevealPhase::Delaying => 0.0,
            RevealPhase::Transitioning => {
                ease_out_cubic(self.phase_fraction(now_ms, self.plan.transition_ms))
            }
            RevealPhase::Holding => 1.0,
            RevealPhase::Returning => {
                let return_ms = self.plan.then_return.map(|step| step.return_ms).unwrap_or(0.0);
                1.0 - ease_out_cubic(self.phase_fraction(now_ms, return_ms))
            }
            RevealPhase::Complete => {
                if self.plan.then_return.is_some() {
                    0.0
                } else {
                    1.0
                }
            }
            RevealPhase::Cancelled => self.last_amount,
        };

        self.last_amount = amount;
        RevealFrame {
            phase: self.phase,
            amount,
        }
    }

    pub fn next_deadline(&self) -> Option<f64> {
        let length = match self.phase {
            RevealPhase::Delaying => self.plan.delay_ms,
            RevealPhase::Transitioning => self.plan.transition_ms,
            RevealPhase::Holding => self.plan.then_return?.hold_ms,
            RevealPhase::Returning => self.plan.then_return?.return_ms,
            _ => return None,
        };
        Some(self.phase_started_at + length.max(0.0))
    }

    pub fn cancel(&mut self) {
        if self.phase != RevealPhase::Complete {
            self.phase = RevealPhase::Cancelled;
        }
    }

    pub fn finish_immediately(&mut self) {
        self.latch.fire();
        if self.phase != RevealPhase::Cancelled {
            self.phase = RevealPhase::Complete;
        }
    }

    fn enter(&mut self, phase: RevealPhase, at_ms: f64) {
        self.phase = phase;
        self.phase_started_at = at_ms;
    }

    fn phase_fraction(&self, now_ms: f64, length_ms: f64) -> f64 {
        if length_ms <= 0.0 {
            return 1.0;
        }
        clamp01((now_ms - self.phase_started_at) / length_ms)
    }

    // Each phase starts exactly when the previous one was due to end, not
    // when the frame happened to land, so late frames never stretch the run.
    fn settle(&mut self, now_ms: f64) {
        while let Some(deadline) = self.next_deadline() {
            if now_ms < deadline {
                break;
            }
            let next = match (self.phase, self.plan.then_return) {
                (RevealPhase::Delaying, _) => RevealPhase::Transitioning,
                (RevealPhase::Transitioning, Some(_)) => RevealPhase::Holding,
                (RevealPhase::Transitioning, None) => RevealPhase::Complete,
                (RevealPhase::Holding, _) => RevealPhase::Returning,
                (RevealPhase::Returning, _) => RevealPhase::Complete,
                (phase, _) => phase,
            };
            self.enter(next, deadline);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latch_fires_exactly_once() {
        let mut latch = OneShotLatch::default();
        assert!(latch.fire());
        assert!(!latch.fire());
        assert_eq!(latch.state(), LatchState::Triggered);
    }

    #[test]
    fn visible_invisible_visible_runs_the_sequence_once() {
        let mut sequence = RevealSequence::new(RevealPlan::fade_in(100.0));
        let mut starts = 0;

        for (visible, now) in [(true, 0.0), (false, 50.0), (true, 80.0), (false, 2_000.0), (true, 3_000.0)] {
            if sequence.on_visibility(visible, now) {
                starts += 1;
            }
        }

        assert_eq!(starts, 1);
        assert_eq!(sequence.update(3_000.0).phase, RevealPhase::Complete);
    }

    #[test]
    fn sequence_completes_after_element_leaves_viewport() {
        let mut sequence = RevealSequence::new(RevealPlan::fade_in(0.0));
        sequence.on_visibility(true, 0.0);
        sequence.on_visibility(false, 10.0);

        let mid = sequence.update(350.0);
        assert_eq!(mid.phase, RevealPhase::Transitioning);
        assert!(mid.amount > 0.0 && mid.amount < 1.0);

        let end = sequence.update(700.0);
        assert_eq!(end.phase, RevealPhase::Complete);
        assert_eq!(end.amount, 1.0);
    }

    #[test]
    fn flip_and_return_walks_every_phase() {
        let plan = RevealPlan::flip_and_return(200.0, 1_000.0);
        let mut sequence = RevealSequence::new(plan);
        sequence.on_visibility(true, 0.0);

        assert_eq!(sequence.update(100.0).phase, RevealPhase::Delaying);
        assert_eq!(sequence.update(500.0).phase, RevealPhase::Transitioning);
        let holding = sequence.update(1_000.0);
        assert_eq!(holding.phase, RevealPhase::Holding);
        assert_eq!(holding.amount, 1.0);
        assert_eq!(sequence.update(2_000.0).phase, RevealPhase::Returning);
        let done = sequence.update(2_400.0);
        assert_eq!(done.phase, RevealPhase::Complete);
        assert_eq!(done.amount, 0.0);
    }

    #[test]
    fn late_frame_skips_straight_to_the_right_phase() {
        let mut sequence = RevealSequence::new(RevealPlan::flip_and_return(200.0, 1_000.0));
        sequence.on_visibility(true, 0.0);

        // Delay ends at 200, flip at 800, hold at 1800.
        assert_eq!(sequence.update(1_900.0).phase, RevealPhase::Returning);
        assert_eq!(sequence.next_deadline(), Some(2_400.0));
    }

    #[test]
    fn cancelled_sequence_freezes_and_ignores_visibility() {
        let mut sequence = RevealSequence::new(RevealPlan::fade_in(0.0));
        sequence.on_visibility(true, 0.0);
        let before = sequence.update(200.0).amount;

        sequence.cancel();
        let after = sequence.update(5_000.0);

        assert_eq!(after.phase, RevealPhase::Cancelled);
        assert_eq!(after.amount, before);
        assert_eq!(sequence.next_deadline(), None);
        assert!(!sequence.on_visibility(true, 6_000.0));
    }

    #[test]
    fn cancel_before_trigger_prevents_any_start() {
        let mut sequence = RevealSequence::new(RevealPlan::fade_in(0.0));
        sequence.cancel();
        assert!(!sequence.on_visibility(true, 0.0));
        assert_eq!(sequence.latch_state(), LatchState::NotTriggered);
    }

    #[test]
    fn reduced_motion_finishes_without_running() {
        let mut sequence = RevealSequence::new(RevealPlan::fade_in(300.0));
        sequence.finish_immediately();

        assert!(!sequence.on_visibility(true, 0.0));
        assert_eq!(sequence.update(0.0).amount, 1.0);
    }
}
