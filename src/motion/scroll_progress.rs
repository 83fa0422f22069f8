use super::easing::{clamp01, interpolate};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ScrollOffsetError {
    #[error("scroll offset {0:?} must be two words like \"start end\"")]
    Shape(String),
    #[error("unknown scroll edge {0:?}; use start, center, end or a fraction")]
    Edge(String),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Edge {
    Start,
    Center,
    End,
    Fraction(f64),
}

impl Edge {
    pub fn parse(raw: &str) -> Result<Self, ScrollOffsetError> {
        match raw {
            "start" => Ok(Self::Start),
            "center" => Ok(Self::Center),
            "end" => Ok(Self::End),
            other => other
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .map(Self::Fraction)
                .ok_or_else(|| ScrollOffsetError::Edge(other.to_string())),
        }
    }

    pub fn fraction(self) -> f64 {
        match self {
            Self::Start => 0.0,
            Self::Center => 0.5,
            Self::End => 1.0,
            Self::Fraction(value) => value,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollAnchor {
    pub element: Edge,
    pub viewport: Edge,
}

impl ScrollAnchor {
    pub fn parse(raw: &str) -> Result<Self, ScrollOffsetError> {
        let mut words = raw.split_whitespace();
        let (Some(element), Some(viewport), None) = (words.next(), words.next(), words.next()) else {
            return Err(ScrollOffsetError::Shape(raw.to_string()));
        };

        Ok(Self {
            element: Edge::parse(element)?,
            viewport: Edge::parse(viewport)?,
        })
    }

    /// Signed pixels left to scroll before this anchor lines up; positive
    /// while the anchor is still ahead.
    fn remaining(&self, element_top: f64, element_height: f64, viewport_height: f64) -> f64 {
        element_top + self.element.fraction() * element_height
            - self.viewport.fraction() * viewport_height
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollWindow {
    pub start: ScrollAnchor,
    pub end: ScrollAnchor,
}

impl ScrollWindow {
    pub fn parse(start: &str, end: &str) -> Result<Self, ScrollOffsetError> {
        Ok(Self {
            start: ScrollAnchor::parse(start)?,
            end: ScrollAnchor::parse(end)?,
        })
    }

    pub fn enter_to_center() -> Self {
        Self {
            start: ScrollAnchor {
                element: Edge::Start,
                viewport: Edge::End,
            },
            end: ScrollAnchor {
                element: Edge::Center,
                viewport: Edge::Center,
            },
        }
    }

    /// `element_top` is the element's top relative to the viewport top,
    /// i.e. `getBoundingClientRect().top`.
    pub fn progress(&self, element_top: f64, element_height: f64, viewport_height: f64) -> f64 {
        let to_start = self.start.remaining(element_top, element_height, viewport_height);
        let to_end = self.end.remaining(element_top, element_height, viewport_height);
        // Both distances shrink by the same amount per scrolled pixel, so
        // their difference is the window length (negative when forward).
        let span = to_start - to_end;

        if span >= 0.0 {
            return if to_end <= 0.0 { 1.0 } else { 0.0 };
        }

        clamp01(to_start / span)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollRunState {
    Idle,
    Animating,
    Complete,
}

#[derive(Clone, Debug)]
pub struct ScrollProgressTracker {
    window: ScrollWindow,
    progress: f64,
}

impl ScrollProgressTracker {
    pub fn new(window: ScrollWindow) -> Self {
        Self {
            window,
            progress: 0.0,
        }
    }

    pub fn measure(&mut self, element_top: f64, element_height: f64, viewport_height: f64) -> f64 {
        self.progress = self
            .window
            .progress(element_top, element_height, viewport_height);
        self.progress
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn state(&self) -> ScrollRunState {
        if self.progress <= 0.0 {
            ScrollRunState::Idle
        } else if self.progress >= 1.0 {
            ScrollRunState::Complete
        } else {
            ScrollRunState::Animating
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScrollKeyframes {
    pub stops: Vec<f64>,
    pub scale: Vec<f64>,
    pub opacity: Vec<f64>,
}

impl ScrollKeyframes {
    pub fn grow_in() -> Self {
        Self {
            stops: vec![0.0, 1.0],
            scale: vec![0.85, 1.0],
            opacity: vec![0.35, 1.0],
        }
    }

    pub fn at(&self, progress: f64) -> (f64, f64) {
        (
            interpolate(progress, &self.stops, &self.scale),
            interpolate(progress, &self.stops, &self.opacity),
        )
    }

    pub fn style(&self, progress: f64) -> String {
        let (scale, opacity) = self.at(progress);
        format!("transform: scale({scale:.4}); opacity: {opacity:.4};")
    }
}
