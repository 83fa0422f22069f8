use super::geometry::{Point, Rect};
use super::spring::{Spring, SpringConfig};

const MAX_TILT_DEG: f64 = 10.0;

#[derive(Clone, Debug)]
pub struct Tilt {
    rotate_x: Spring,
    rotate_y: Spring,
}

impl Default for Tilt {
    fn default() -> Self {
        Self {
            rotate_x: Spring::new(SpringConfig::gentle(), 0.0),
            rotate_y: Spring::new(SpringConfig::gentle(), 0.0),
        }
    }
}

impl Tilt {
    pub fn aim(&mut self, card: &Rect, pointer: Point) {
        if card.width <= 0.0 || card.height <= 0.0 {
            return;
        }
        let local = card.local(pointer);
        let nx = (local.x / card.width * 2.0 - 1.0).clamp(-1.0, 1.0);
        let ny = (local.y / card.height * 2.0 - 1.0).clamp(-1.0, 1.0);

        self.rotate_x.set_target(-ny * MAX_TILT_DEG);
        self.rotate_y.set_target(nx * MAX_TILT_DEG);
    }

    pub fn release(&mut self) {
        self.rotate_x.set_target(0.0);
        self.rotate_y.set_target(0.0);
    }

    pub fn reset(&mut self) {
        self.rotate_x.snap_to(0.0);
        self.rotate_y.snap_to(0.0);
    }

    pub fn step(&mut self, dt_seconds: f64) {
        self.rotate_x.step(dt_seconds);
        self.rotate_y.step(dt_seconds);
    }

    pub fn angles(&self) -> (f64, f64) {
        (self.rotate_x.value(), self.rotate_y.value())
    }

    pub fn is_settled(&self) -> bool {
        self.rotate_x.is_settled() && self.rotate_y.is_settled()
    }
}

#[derive(Clone, Debug)]
pub struct InsightsCarousel {
    len: usize,
    active: usize,
    flipped: bool,
    desktop: bool,
    tilt: Tilt,
}

impl InsightsCarousel {
    pub fn new(len: usize, desktop: bool) -> Option<Self> {
        if len == 0 {
            return None;
        }
        Some(Self {
            len,
            active: 0,
            flipped: false,
            desktop,
            tilt: Tilt::default(),
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn back_visible(&self) -> bool {
        self.flipped
    }

    pub fn tilt_enabled(&self) -> bool {
        self.desktop && !self.flipped
    }

    pub fn set_desktop(&mut self, desktop: bool) {
        self.desktop = desktop;
        if !desktop {
            self.tilt.reset();
        }
    }

    pub fn flip(&mut self) -> bool {
        self.flipped = !self.flipped;
        if self.flipped {
            self.tilt.reset();
        }
        self.flipped
    }

    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.active = index;
        self.flipped = false;
        self.tilt.reset();
        true
    }

    pub fn next(&mut self) {
        self.go_to((self.active + 1) % self.len);
    }

    pub fn previous(&mut self) {
        self.go_to((self.active + self.len - 1) % self.len);
    }

    pub fn pointer_moved(&mut self, card: &Rect, pointer: Point) {
        if self.tilt_enabled() {
            self.tilt.aim(card, pointer);
        }
    }

    pub fn pointer_left(&mut self) {
        self.tilt.release();
    }

    pub fn step(&mut self, dt_seconds: f64) {
        self.tilt.step(dt_seconds);
    }

    pub fn card_style(&self) -> String {
        let (rx, ry) = self.tilt.angles();
        let flip = if self.flipped { 180.0 } else { 0.0 };
        format!("transform: perspective(1200px) rotateX({rx:.2}deg) rotateY({:.2}deg);", ry + flip)
    }

    pub fn tilt_angles(&self) -> (f64, f64) {
        self.tilt.angles()
    }

    pub fn is_settled(&self) -> bool {
        self.tilt.is_settled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> Rect {
        Rect::new(100.0, 100.0, 400.0, 300.0)
    }

    #[test]
    fn flip_toggles_and_navigation_restores_the_front() {
        let mut carousel = InsightsCarousel::new(4, true).expect("non-empty");
        assert_eq!(carousel.active(), 0);

        assert!(carousel.flip());
        assert!(carousel.is_flipped());
        assert!(carousel.back_visible());
        assert!(!carousel.tilt_enabled());

        assert!(!carousel.flip());
        assert!(!carousel.is_flipped());

        carousel.flip();
        assert!(carousel.go_to(3));
        assert_eq!(carousel.active(), 3);
        assert!(!carousel.is_flipped());
        assert!(carousel.tilt_enabled());
    }

    #[test]
    fn tilt_follows_pointer_only_on_the_front() {
        let mut carousel = InsightsCarousel::new(4, true).expect("non-empty");
        carousel.pointer_moved(&card(), Point::new(500.0, 100.0));
        for _ in 0..120 {
            carousel.step(1.0 / 60.0);
        }
        let (rx, ry) = carousel.tilt_angles();
        assert!(rx > 0.0 && ry > 0.0);

        carousel.flip();
        carousel.pointer_moved(&card(), Point::new(100.0, 400.0));
        carousel.step(0.5);
        assert_eq!(carousel.tilt_angles(), (0.0, 0.0));
    }

    #[test]
    fn mobile_cards_never_tilt() {
        let mut carousel = InsightsCarousel::new(4, false).expect("non-empty");
        carousel.pointer_moved(&card(), Point::new(500.0, 400.0));
        carousel.step(0.5);
        assert_eq!(carousel.tilt_angles(), (0.0, 0.0));
    }

    #[test]
    fn next_and_previous_wrap() {
        let mut carousel = InsightsCarousel::new(4, true).expect("non-empty");
        carousel.previous();
        assert_eq!(carousel.active(), 3);
        carousel.next();
        assert_eq!(carousel.active(), 0);
        assert!(!carousel.go_to(4));
    }
}
