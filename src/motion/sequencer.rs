use super::easing::clamp01;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum AutoplayState {
    Idle { index: usize },
    Advancing { index: usize, progress: f64 },
}

#[derive(Clone, Debug)]
pub struct Autoplay {
    len: usize,
    index: usize,
    elapsed_ms: f64,
    dwell_ms: f64,
    looping: bool,
    running: bool,
    finished: bool,
}

impl Autoplay {
    /// `None` for an empty list; the index must always point at an item.
    pub fn new(len: usize, dwell_ms: f64, looping: bool) -> Option<Self> {
        if len == 0 {
            return None;
        }
        Some(Self {
            len,
            index: 0,
            elapsed_ms: 0.0,
            dwell_ms: dwell_ms.max(1.0),
            looping,
            running: false,
            finished: false,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_running(&self) -> bool {
        self.running && !self.finished
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn progress(&self) -> f64 {
        clamp01(self.elapsed_ms / self.dwell_ms)
    }

    pub fn state(&self) -> AutoplayState {
        if !self.is_running() || self.elapsed_ms <= 0.0 {
            AutoplayState::Idle { index: self.index }
        } else {
            AutoplayState::Advancing {
                index: self.index,
                progress: self.progress(),
            }
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn tick(&mut self, dt_ms: f64) -> Option<usize> {
        if !self.is_running() || dt_ms <= 0.0 {
            return None;
        }

        let before = self.index;
        self.elapsed_ms += dt_ms;
        while self.elapsed_ms >= self.dwell_ms {
            if self.index + 1 < self.len {
                self.index += 1;
            } else if self.looping {
                self.index = 0;
            } else {
                self.finished = true;
                self.elapsed_ms = 0.0;
                break;
            }
            self.elapsed_ms -= self.dwell_ms;
        }

        (self.index != before).then_some(self.index)
    }

    /// Manual next: moves immediately and restarts the dwell. On the last
    /// item without looping this does nothing.
    pub fn advance(&mut self) -> Option<usize> {
        let next = if self.index + 1 < self.len {
            self.index + 1
        } else if self.looping {
            0
        } else {
            return None;
        };
        self.index = next;
        self.elapsed_ms = 0.0;
        Some(next)
    }

    pub fn go_to(&mut self, index: usize) -> Option<usize> {
        if index >= self.len {
            return None;
        }
        self.index = index;
        self.elapsed_ms = 0.0;
        self.finished = false;
        Some(index)
    }
}

pub fn ring_dash_offset(progress: f64, circumference: f64) -> f64 {
    circumference * (1.0 - clamp01(progress))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sequence_is_rejected() {
        assert!(Autoplay::new(0, 1_000.0, true).is_none());
    }

    #[test]
    fn dwell_advances_through_idle_and_advancing_states() {
        let mut autoplay = Autoplay::new(3, 1_000.0, true).expect("non-empty");
        assert_eq!(autoplay.state(), AutoplayState::Idle { index: 0 });
        assert_eq!(autoplay.tick(500.0), None, "paused autoplay ignores ticks");

        autoplay.start();
        assert_eq!(autoplay.tick(250.0), None);
        assert_eq!(
            autoplay.state(),
            AutoplayState::Advancing {
                index: 0,
                progress: 0.25
            }
        );
        assert_eq!(autoplay.tick(750.0), Some(1));
        assert_eq!(autoplay.state(), AutoplayState::Idle { index: 1 });
    }

    #[test]
    fn looping_wraps_to_the_first_item() {
        let mut autoplay = Autoplay::new(2, 100.0, true).expect("non-empty");
        autoplay.start();
        assert_eq!(autoplay.tick(100.0), Some(1));
        assert_eq!(autoplay.tick(100.0), Some(0));
        assert_eq!(autoplay.advance(), Some(1));
        assert_eq!(autoplay.advance(), Some(0));
    }

    #[test]
    fn without_looping_the_last_index_holds() {
        let mut autoplay = Autoplay::new(3, 100.0, false).expect("non-empty");
        autoplay.start();

        assert_eq!(autoplay.tick(250.0), Some(2));
        assert_eq!(autoplay.tick(100.0), None);
        assert!(autoplay.is_finished());

        for _ in 0..5 {
            assert_eq!(autoplay.tick(1_000.0), None);
            assert_eq!(autoplay.advance(), None);
            assert_eq!(autoplay.index(), 2);
        }
        assert_eq!(autoplay.state(), AutoplayState::Idle { index: 2 });
    }

    #[test]
    fn manual_advance_resets_progress() {
        let mut autoplay = Autoplay::new(4, 1_000.0, true).expect("non-empty");
        autoplay.start();
        autoplay.tick(900.0);

        assert_eq!(autoplay.advance(), Some(1));
        assert_eq!(autoplay.progress(), 0.0);
        // Full dwell needed again before the next automatic step.
        assert_eq!(autoplay.tick(900.0), None);
        assert_eq!(autoplay.tick(100.0), Some(2));
    }

    #[test]
    fn go_to_rejects_out_of_bounds_and_restarts_finished_runs() {
        let mut autoplay = Autoplay::new(2, 100.0, false).expect("non-empty");
        autoplay.start();
        autoplay.tick(500.0);
        assert!(autoplay.is_finished());

        assert_eq!(autoplay.go_to(7), None);
        assert_eq!(autoplay.go_to(0), Some(0));
        assert!(autoplay.is_running());
        assert_eq!(ring_dash_offset(autoplay.progress(), 100.0), 100.0);
    }
}
