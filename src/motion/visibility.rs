use super::geometry::Rect;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RootMarginError {
    #[error("root margin must have 1 to 4 components, got {0}")]
    ComponentCount(usize),
    #[error("root margin component {0:?} must be a number followed by px or %")]
    Component(String),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarginValue {
    Px(f64),
    Percent(f64),
}

impl Default for MarginValue {
    fn default() -> Self {
        Self::Px(0.0)
    }
}

impl MarginValue {
    fn parse(raw: &str) -> Result<Self, RootMarginError> {
        let invalid = || RootMarginError::Component(raw.to_string());

        if let Some(number) = raw.strip_suffix('%') {
            let value = number.parse::<f64>().map_err(|_| invalid())?;
            return Ok(Self::Percent(value));
        }
        if let Some(number) = raw.strip_suffix("px") {
            let value = number.parse::<f64>().map_err(|_| invalid())?;
            return Ok(Self::Px(value));
        }
        // A bare zero is valid CSS.
        if raw == "0" {
            return Ok(Self::Px(0.0));
        }

        Err(invalid())
    }

    fn resolve(self, reference: f64) -> f64 {
        match self {
            Self::Px(value) => value,
            Self::Percent(value) => reference * value / 100.0,
        }
    }
}

impl fmt::Display for MarginValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(value) => write!(f, "{value}px"),
            Self::Percent(value) => write!(f, "{value}%"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RootMargin {
    pub top: MarginValue,
    pub right: MarginValue,
    pub bottom: MarginValue,
    pub left: MarginValue,
}

impl RootMargin {
    pub fn parse(raw: &str) -> Result<Self, RootMarginError> {
        let parts = raw
            .split_whitespace()
            .map(MarginValue::parse)
            .collect::<Result<Vec<_>, _>>()?;

        let (top, right, bottom, left) = match parts.as_slice() {
            [all] => (*all, *all, *all, *all),
            [vertical, horizontal] => (*vertical, *horizontal, *vertical, *horizontal),
            [top, horizontal, bottom] => (*top, *horizontal, *bottom, *horizontal),
            [top, right, bottom, left] => (*top, *right, *bottom, *left),
            other => return Err(RootMarginError::ComponentCount(other.len())),
        };

        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }

    pub fn to_css(&self) -> String {
        format!("{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }

    /// Percentages resolve against the viewport height for top/bottom and
    /// the width for left/right.
    pub fn apply(&self, viewport: &Rect) -> Rect {
        viewport.expand(
            self.top.resolve(viewport.height),
            self.right.resolve(viewport.width),
            self.bottom.resolve(viewport.height),
            self.left.resolve(viewport.width),
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VisibilityConfig {
    pub threshold: f64,
    pub root_margin: RootMargin,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            root_margin: RootMargin::default(),
        }
    }
}

impl VisibilityConfig {
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            ..Self::default()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilitySample {
    pub intersecting: bool,
    pub ratio: f64,
}

impl VisibilitySample {
    pub fn measure(element: &Rect, viewport: &Rect, margin: &RootMargin) -> Self {
        let root = margin.apply(viewport);
        match element.intersection(&root) {
            None => Self {
                intersecting: false,
                ratio: 0.0,
            },
            Some(overlap) => {
                let ratio = if element.area() > 0.0 {
                    (overlap.area() / element.area()).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                Self {
                    intersecting: true,
                    ratio,
                }
            }
        }
    }

    pub fn passes(&self, threshold: f64) -> bool {
        if threshold <= 0.0 {
            self.intersecting
        } else {
            self.intersecting && self.ratio >= threshold
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ObserverState {
    AwaitingElement,
    Observing,
    TornDown,
}

#[derive(Clone, Debug)]
pub struct VisibilityObserver {
    config: VisibilityConfig,
    state: ObserverState,
    visible: bool,
}

impl VisibilityObserver {
    pub fn new(config: VisibilityConfig) -> Self {
        Self {
            config,
            state: ObserverState::AwaitingElement,
            visible: false,
        }
    }

    pub fn attach(&mut self) {
        if self.state == ObserverState::AwaitingElement {
            self.state = ObserverState::Observing;
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn observe(&mut self, sample: VisibilitySample) -> Option<bool> {
        if self.state != ObserverState::Observing {
            return None;
        }

        let next = sample.passes(self.config.threshold);
        if next == self.visible {
            return None;
        }

        self.visible = next;
        Some(next)
    }

    pub fn teardown(&mut self) {
        self.state = ObserverState::TornDown;
    }
}

/// Observer batches may arrive in any order; the first visible element is
/// recomputed from the whole set keyed by document order.
#[derive(Clone, Debug, Default)]
pub struct VisibilitySet {
    entries: BTreeMap<usize, bool>,
}

impl VisibilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update<I>(&mut self, batch: I) -> Option<usize>
    where
        I: IntoIterator<Item = (usize, bool)>,
    {
        for (order, visible) in batch {
            self.entries.insert(order, visible);
        }
        self.first_visible()
    }

    pub fn remove(&mut self, order: usize) {
        self.entries.remove(&order);
    }

    pub fn first_visible(&self) -> Option<usize> {
        self.entries
            .iter()
            .find_map(|(order, visible)| visible.then_some(*order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Rect {
        Rect::new(0.0, 0.0, 1200.0, 800.0)
    }

    #[test]
    fn root_margin_accepts_css_shorthand() {
        let margin = RootMargin::parse("10px 5%").expect("two components");
        assert_eq!(margin.top, MarginValue::Px(10.0));
        assert_eq!(margin.left, MarginValue::Percent(5.0));
        assert_eq!(margin.to_css(), "10px 5% 10px 5%");

        assert_eq!(
            RootMargin::parse("1px 2px 3px 4px 5px"),
            Err(RootMarginError::ComponentCount(5))
        );
        assert_eq!(
            RootMargin::parse("10em"),
            Err(RootMarginError::Component("10em".to_string()))
        );
        assert_eq!(RootMargin::parse(""), Err(RootMarginError::ComponentCount(0)));
    }

    #[test]
    fn negative_bottom_margin_delays_visibility() {
        let margin = RootMargin::parse("0px 0px -10% 0px").expect("valid");
        // Occupies 740..780: inside the viewport but below the shrunk root.
        let element = Rect::new(0.0, 740.0, 200.0, 40.0);

        let plain = VisibilitySample::measure(&element, &viewport(), &RootMargin::default());
        let shrunk = VisibilitySample::measure(&element, &viewport(), &margin);

        assert!(plain.passes(0.5));
        assert!(!shrunk.intersecting);
    }

    #[test]
    fn threshold_requires_enough_of_the_element() {
        let element = Rect::new(0.0, 700.0, 100.0, 400.0);
        let sample = VisibilitySample::measure(&element, &viewport(), &RootMargin::default());

        assert!((sample.ratio - 0.25).abs() < 1e-9);
        assert!(sample.passes(0.2));
        assert!(!sample.passes(0.3));
    }

    #[test]
    fn observer_ignores_samples_before_attach_and_after_teardown() {
        let mut observer = VisibilityObserver::new(VisibilityConfig::with_threshold(0.1));
        let seen = VisibilitySample {
            intersecting: true,
            ratio: 1.0,
        };

        assert_eq!(observer.observe(seen), None);
        observer.attach();
        assert_eq!(observer.observe(seen), Some(true));
        assert_eq!(observer.observe(seen), None);

        observer.teardown();
        let gone = VisibilitySample {
            intersecting: false,
            ratio: 0.0,
        };
        assert_eq!(observer.observe(gone), None);
        assert!(observer.is_visible());
    }

    #[test]
    fn first_visible_ignores_batch_arrival_order() {
        let mut set = VisibilitySet::new();
        assert_eq!(set.update([(3, true), (1, false), (2, true)]), Some(2));
        assert_eq!(set.update([(1, true)]), Some(1));
        assert_eq!(set.update([(1, false), (2, false)]), Some(3));
        set.remove(3);
        assert_eq!(set.first_visible(), None);
    }
}
