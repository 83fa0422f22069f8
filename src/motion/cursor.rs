use super::geometry::Point;
use super::spring::{Spring, SpringConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerCapability {
    pub fine: bool,
    pub hover: bool,
}

impl PointerCapability {
    pub const FINE_QUERY: &'static str = "(pointer: fine)";
    pub const HOVER_QUERY: &'static str = "(hover: hover)";

    pub fn supports_custom_cursor(self) -> bool {
        self.fine && self.hover
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorIcon {
    View,
    Previous,
    Next,
    Locked,
}

impl CursorIcon {
    pub fn label(self) -> &'static str {
        match self {
            Self::View => "View",
            Self::Previous => "←",
            Self::Next => "→",
            Self::Locked => "Locked",
        }
    }
}

#[derive(Clone, Debug)]
pub struct HoverCursor {
    enabled: bool,
    visible: bool,
    placed: bool,
    x: Spring,
    y: Spring,
}

impl HoverCursor {
    pub fn new(capability: PointerCapability) -> Self {
        Self {
            enabled: capability.supports_custom_cursor(),
            visible: false,
            placed: false,
            x: Spring::new(SpringConfig::cursor(), 0.0),
            y: Spring::new(SpringConfig::cursor(), 0.0),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_visible(&self) -> bool {
        self.enabled && self.visible
    }

    pub fn position(&self) -> Point {
        Point::new(self.x.value(), self.y.value())
    }

    /// First entry places the follower under the pointer instead of
    /// sweeping it in from the last exit point.
    pub fn enter(&mut self, local: Point) {
        if !self.enabled {
            return;
        }
        self.visible = true;
        if !self.placed {
            self.x.snap_to(local.x);
            self.y.snap_to(local.y);
            self.placed = true;
        } else {
            self.moved(local);
        }
    }

    pub fn moved(&mut self, local: Point) {
        if !self.enabled {
            return;
        }
        self.x.set_target(local.x);
        self.y.set_target(local.y);
    }

    pub fn leave(&mut self) {
        self.visible = false;
    }

    pub fn step(&mut self, dt_seconds: f64) {
        self.x.step(dt_seconds);
        self.y.step(dt_seconds);
    }

    pub fn is_settled(&self) -> bool {
        self.x.is_settled() && self.y.is_settled()
    }

    pub fn style(&self) -> String {
        let opacity = if self.is_visible() { 1.0 } else { 0.0 };
        format!(
            "pointer-events: none; transform: translate3d({:.2}px, {:.2}px, 0) translate(-50%, -50%); opacity: {opacity};",
            self.x.value(),
            self.y.value()
        )
    }
}
