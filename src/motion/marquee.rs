use super::easing::clamp01;

pub const MIN_COPIES: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocityCurve {
    /// Half-width fraction around the center where the pointer is ignored.
    pub dead_zone: f64,
    pub max_speed: f64,
    pub steepness: f64,
}

impl Default for VelocityCurve {
    fn default() -> Self {
        Self {
            dead_zone: 0.2,
            max_speed: 900.0,
            steepness: 3.0,
        }
    }
}

impl VelocityCurve {
    pub fn speed(&self, x: f64, width: f64) -> f64 {
        if width <= 0.0 {
            return 0.0;
        }
        let half = width / 2.0;
        let offset = ((x - half) / half).clamp(-1.0, 1.0);
        let magnitude = offset.abs();
        let dead_zone = self.dead_zone.clamp(0.0, 0.99);

        if magnitude <= dead_zone {
            return 0.0;
        }

        let t = clamp01((magnitude - dead_zone) / (1.0 - dead_zone));
        let shaped = if self.steepness.abs() < f64::EPSILON {
            t
        } else {
            (self.steepness * t).exp_m1() / self.steepness.exp_m1()
        };

        offset.signum() * self.max_speed * shaped
    }
}

/// Copies needed so a window of `container_width` starting anywhere in the
/// middle copy still ends inside the rendered content.
pub fn copies_to_cover(copy_width: f64, container_width: f64) -> usize {
    let copy_width = copy_width.max(1.0);
    let per_side = (container_width.max(0.0) / copy_width).ceil() as usize;
    (2 * per_side + 1).max(MIN_COPIES)
}

#[derive(Clone, Debug, PartialEq)]
pub struct InfiniteTrack {
    copy_width: f64,
    copies: usize,
    position: f64,
}

impl InfiniteTrack {
    pub fn new(copy_width: f64, container_width: f64) -> Self {
        let copy_width = copy_width.max(1.0);
        let copies = copies_to_cover(copy_width, container_width);
        Self {
            copy_width,
            copies,
            position: copy_width * middle_index(copies) as f64,
        }
    }

    pub fn copies(&self) -> usize {
        self.copies
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn rendered_width(&self) -> f64 {
        self.copy_width * self.copies as f64
    }

    pub fn visible_phase(&self) -> f64 {
        self.position.rem_euclid(self.copy_width)
    }

    pub fn translate_style(&self) -> String {
        format!("transform: translate3d({:.2}px, 0, 0);", -self.position)
    }

    pub fn advance(&mut self, delta: f64) {
        self.position += delta;
        self.renormalize();
    }

    pub fn resize(&mut self, copy_width: f64, container_width: f64) {
        let phase = self.visible_phase() / self.copy_width;
        self.copy_width = copy_width.max(1.0);
        self.copies = copies_to_cover(self.copy_width, container_width);
        self.position = self.copy_width * (middle_index(self.copies) as f64 + phase);
    }

    fn renormalize(&mut self) {
        let low = self.copy_width * middle_index(self.copies) as f64;
        let high = low + self.copy_width;
        while self.position >= high {
            self.position -= self.copy_width;
        }
        while self.position < low {
            self.position += self.copy_width;
        }
    }
}

fn middle_index(copies: usize) -> usize {
    copies / 2
}

#[derive(Clone, Debug)]
pub struct Marquee {
    track: InfiniteTrack,
    curve: VelocityCurve,
    idle_speed: f64,
    container_width: f64,
    pointer_x: Option<f64>,
}

impl Marquee {
    pub fn new(copy_width: f64, container_width: f64, curve: VelocityCurve, idle_speed: f64) -> Self {
        Self {
            track: InfiniteTrack::new(copy_width, container_width),
            curve,
            idle_speed,
            container_width,
            pointer_x: None,
        }
    }

    pub fn track(&self) -> &InfiniteTrack {
        &self.track
    }

    pub fn container_width(&self) -> f64 {
        self.container_width
    }

    pub fn relayout(&mut self, copy_width: f64, container_width: f64) {
        self.track.resize(copy_width, container_width);
        self.container_width = container_width;
    }

    pub fn pointer_moved(&mut self, local_x: f64) {
        self.pointer_x = Some(local_x);
    }

    pub fn pointer_left(&mut self) {
        self.pointer_x = None;
    }

    pub fn speed(&self) -> f64 {
        match self.pointer_x {
            Some(x) => self.curve.speed(x, self.container_width),
            None => self.idle_speed,
        }
    }

    pub fn tick(&mut self, dt_seconds: f64) {
        let dt = dt_seconds.clamp(0.0, 0.1);
        self.track.advance(self.speed() * dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dead_zone_maps_to_exactly_zero() {
        let curve = VelocityCurve::default();
        // 20% of the 500px half width around center 500.
        for x in [400.0, 450.0, 500.0, 550.0, 600.0] {
            assert_eq!(curve.speed(x, 1_000.0), 0.0);
        }
    }

    #[test]
    fn speed_is_monotonic_and_saturates_at_edges() {
        let curve = VelocityCurve::default();
        let mut last = f64::NEG_INFINITY;
        for x in 0..=1_000 {
            let speed = curve.speed(f64::from(x), 1_000.0);
            assert!(speed >= last);
            last = speed;
        }

        assert!((curve.speed(1_000.0, 1_000.0) - curve.max_speed).abs() < 1e-9);
        assert!((curve.speed(0.0, 1_000.0) + curve.max_speed).abs() < 1e-9);
        assert!((curve.speed(2_000.0, 1_000.0) - curve.max_speed).abs() < 1e-9);
    }

    #[test]
    fn speed_rises_slowly_just_past_the_dead_zone() {
        let curve = VelocityCurve::default();
        let near = curve.speed(620.0, 1_000.0);
        let far = curve.speed(960.0, 1_000.0);

        assert!(near > 0.0);
        assert!(near < curve.max_speed * 0.1);
        assert!(far > curve.max_speed * 0.7);
    }

    #[test]
    fn renormalization_is_invisible_and_shifts_by_one_copy() {
        let mut track = InfiniteTrack::new(300.0, 300.0);
        assert_eq!(track.copies(), 3);
        let mut raw = track.position();
        assert_eq!(raw, 300.0);

        for _ in 0..50 {
            track.advance(7.0);
            raw += 7.0;
            assert_eq!(track.visible_phase(), raw.rem_euclid(300.0));
            assert!(track.position() >= 300.0 && track.position() < 600.0);
        }

        // 350px travelled: one wrap.
        assert_eq!(raw - track.position(), 300.0);
    }

    #[test]
    fn backward_travel_wraps_the_other_way() {
        let mut track = InfiniteTrack::new(250.0, 200.0);
        let start = track.position();
        track.advance(-10.0);

        assert_eq!(track.position(), start + 240.0);
        assert_eq!(track.visible_phase(), 240.0);
    }

    #[test]
    fn copy_count_grows_with_the_container() {
        assert_eq!(copies_to_cover(100.0, 0.0), MIN_COPIES);
        assert_eq!(copies_to_cover(800.0, 800.0), 3);
        assert_eq!(copies_to_cover(700.0, 1_600.0), 7);
        assert_eq!(copies_to_cover(0.0, 10.0), 21);
    }

    #[test]
    fn visible_window_stays_inside_the_rendered_copies() {
        let curve = VelocityCurve::default();
        for (copy_width, container_width) in [(700.0, 1_600.0), (1_200.0, 900.0), (90.0, 2_560.0)] {
            let mut marquee = Marquee::new(copy_width, container_width, curve, 40.0);
            for (index, lean) in [None, Some(container_width), Some(0.0)].into_iter().enumerate() {
                match lean {
                    Some(x) => marquee.pointer_moved(x),
                    None => marquee.pointer_left(),
                }
                for _ in 0..200 {
                    marquee.tick(0.05);
                    let track = marquee.track();
                    assert!(track.position() >= copy_width, "pass {index}");
                    assert!(
                        track.position() + container_width <= track.rendered_width(),
                        "copy {copy_width} container {container_width} pass {index}"
                    );
                }
            }
        }
    }

    #[test]
    fn marquee_idles_without_pointer_and_stops_in_dead_zone() {
        let mut marquee = Marquee::new(400.0, 400.0, VelocityCurve::default(), 40.0);

        marquee.tick(0.05);
        assert_eq!(marquee.track().position(), 402.0);

        marquee.pointer_moved(200.0);
        marquee.tick(0.05);
        assert_eq!(marquee.track().position(), 402.0);

        marquee.pointer_left();
        assert_eq!(marquee.speed(), 40.0);
    }

    #[test]
    fn relayout_keeps_the_visible_phase_and_adds_copies() {
        let mut marquee = Marquee::new(400.0, 400.0, VelocityCurve::default(), 40.0);
        marquee.tick(0.05);
        assert_eq!(marquee.track().visible_phase(), 2.0);

        marquee.relayout(800.0, 1_200.0);
        assert_eq!(marquee.track().copies(), 5);
        assert_eq!(marquee.container_width(), 1_200.0);
        assert!((marquee.track().visible_phase() - 4.0).abs() < 1e-9);
        assert!((marquee.track().position() - 1_604.0).abs() < 1e-9);
        assert!(marquee.track().position() + 1_200.0 <= marquee.track().rendered_width());
    }
}
