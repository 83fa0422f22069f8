use super::easing::{clamp01, ease_out_cubic, lerp};
use super::geometry::{Point, Rect};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Falloff {
    Linear,
    Power(f64),
}

impl Falloff {
    /// 1 at zero distance, 0 at `max_distance` and beyond.
    pub fn scalar(self, distance: f64, max_distance: f64) -> f64 {
        if max_distance <= 0.0 {
            return 0.0;
        }
        let closeness = clamp01(1.0 - distance / max_distance);
        match self {
            Self::Linear => closeness,
            Self::Power(exponent) => closeness.powf(exponent.max(f64::EPSILON)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemTransform {
    pub scale: f64,
    pub lift: f64,
    pub rotation: f64,
}

impl ItemTransform {
    pub const REST: ItemTransform = ItemTransform {
        scale: 1.0,
        lift: 0.0,
        rotation: 0.0,
    };

    fn mix(self, other: ItemTransform, t: f64) -> ItemTransform {
        ItemTransform {
            scale: lerp(self.scale, other.scale, t),
            lift: lerp(self.lift, other.lift, t),
            rotation: lerp(self.rotation, other.rotation, t),
        }
    }

    pub fn style(&self) -> String {
        format!(
            "transform: translateY({:.2}px) scale({:.4}) rotate({:.2}deg);",
            self.lift, self.scale, self.rotation
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DockConfig {
    pub max_distance: f64,
    pub falloff: Falloff,
    pub max_scale: f64,
    pub max_lift: f64,
    pub max_rotation: f64,
    pub active_margin: f64,
    pub transition_ms: f64,
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            max_distance: 140.0,
            falloff: Falloff::Power(1.6),
            max_scale: 1.55,
            max_lift: -14.0,
            max_rotation: 8.0,
            active_margin: 12.0,
            transition_ms: 180.0,
        }
    }
}

impl DockConfig {
    fn active_region(&self, container: &Rect) -> Rect {
        let margin = self.active_margin;
        container.expand(margin, margin, margin, margin)
    }

    pub fn proximity(&self, container: &Rect, items: &[Point], pointer: Option<Point>) -> Vec<f64> {
        match pointer.filter(|point| self.active_region(container).contains(*point)) {
            None => vec![0.0; items.len()],
            Some(pointer) => items
                .iter()
                .map(|center| {
                    self.falloff
                        .scalar(center.distance_to(pointer), self.max_distance)
                })
                .collect(),
        }
    }

    pub fn transform_for(&self, proximity: f64, center: Point, pointer: Option<Point>) -> ItemTransform {
        if proximity <= 0.0 {
            return ItemTransform::REST;
        }
        let lean = pointer
            .map(|pointer| ((pointer.x - center.x) / self.max_distance).clamp(-1.0, 1.0))
            .unwrap_or(0.0);

        ItemTransform {
            scale: lerp(1.0, self.max_scale, proximity),
            lift: self.max_lift * proximity,
            rotation: self.max_rotation * lean * proximity,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Tween {
    from: ItemTransform,
    to: ItemTransform,
    started_at: f64,
}

impl Tween {
    fn at(&self, now_ms: f64, duration_ms: f64) -> ItemTransform {
        let t = if duration_ms <= 0.0 {
            1.0
        } else {
            clamp01((now_ms - self.started_at) / duration_ms)
        };
        self.from.mix(self.to, ease_out_cubic(t))
    }
}

#[derive(Clone, Debug)]
pub struct DockTracker {
    config: DockConfig,
    container: Rect,
    centers: Vec<Point>,
    tweens: Vec<Tween>,
}

impl DockTracker {
    pub fn new(config: DockConfig, container: Rect, centers: Vec<Point>) -> Self {
        let tweens = centers
            .iter()
            .map(|_| Tween {
                from: ItemTransform::REST,
                to: ItemTransform::REST,
                started_at: 0.0,
            })
            .collect();
        Self {
            config,
            container,
            centers,
            tweens,
        }
    }

    pub fn config(&self) -> &DockConfig {
        &self.config
    }

    pub fn relayout(&mut self, container: Rect, centers: Vec<Point>) {
        if centers.len() != self.centers.len() {
            *self = Self::new(self.config, container, centers);
            return;
        }
        self.container = container;
        self.centers = centers;
    }

    pub fn pointer_moved(&mut self, pointer: Point, now_ms: f64) {
        let proximity = self
            .config
            .proximity(&self.container, &self.centers, Some(pointer));
        let targets = proximity
            .iter()
            .zip(&self.centers)
            .map(|(amount, center)| self.config.transform_for(*amount, *center, Some(pointer)))
            .collect::<Vec<_>>();
        self.retarget(&targets, now_ms);
    }

    pub fn pointer_left(&mut self, now_ms: f64) {
        let targets = vec![ItemTransform::REST; self.centers.len()];
        self.retarget(&targets, now_ms);
    }

    pub fn frame(&self, now_ms: f64) -> Vec<ItemTransform> {
        self.tweens
            .iter()
            .map(|tween| tween.at(now_ms, self.config.transition_ms))
            .collect()
    }

    pub fn is_settled(&self, now_ms: f64) -> bool {
        self.tweens
            .iter()
            .all(|tween| now_ms - tween.started_at >= self.config.transition_ms)
    }

    fn retarget(&mut self, targets: &[ItemTransform], now_ms: f64) {
        let duration = self.config.transition_ms;
        for (tween, target) in self.tweens.iter_mut().zip(targets) {
            if tween.to == *target {
                continue;
            }
            let current = tween.at(now_ms, duration);
            *tween = Tween {
                from: current,
                to: *target,
                started_at: now_ms,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dock() -> DockTracker {
        let container = Rect::new(0.0, 0.0, 400.0, 80.0);
        let centers = (0..5)
            .map(|index| Point::new(40.0 + f64::from(index) * 80.0, 40.0))
            .collect();
        DockTracker::new(DockConfig::default(), container, centers)
    }

    #[test]
    fn falloff_is_one_at_center_and_zero_at_range() {
        for falloff in [Falloff::Linear, Falloff::Power(2.0)] {
            assert_eq!(falloff.scalar(0.0, 100.0), 1.0);
            assert_eq!(falloff.scalar(100.0, 100.0), 0.0);
            assert_eq!(falloff.scalar(250.0, 100.0), 0.0);
        }
        assert_eq!(Falloff::Linear.scalar(50.0, 100.0), 0.5);
        assert_eq!(Falloff::Power(2.0).scalar(50.0, 100.0), 0.25);
    }

    #[test]
    fn pointer_outside_active_region_has_no_effect() {
        let config = DockConfig::default();
        let container = Rect::new(0.0, 0.0, 400.0, 80.0);
        let centers = [Point::new(40.0, 40.0), Point::new(120.0, 40.0)];

        for pointer in [Point::new(40.0, 100.0), Point::new(-20.0, 40.0), Point::new(900.0, 900.0)] {
            assert_eq!(config.proximity(&container, &centers, Some(pointer)), vec![0.0, 0.0]);
        }
        assert_eq!(config.proximity(&container, &centers, None), vec![0.0, 0.0]);
    }

    #[test]
    fn nearest_item_grows_most_and_leans_toward_pointer() {
        let mut dock = dock();
        dock.pointer_moved(Point::new(130.0, 40.0), 0.0);
        let frame = dock.frame(1_000.0);

        assert!(frame[1].scale > frame[0].scale);
        assert!(frame[1].scale > frame[2].scale);
        assert!(frame[1].lift < 0.0);
        // Pointer is right of item 1's center.
        assert!(frame[1].rotation > 0.0);
        assert_eq!(frame[4], ItemTransform::REST);
    }

    #[test]
    fn leaving_uses_the_same_timing_as_entering() {
        let mut dock = dock();
        let duration = dock.config().transition_ms;

        dock.pointer_moved(Point::new(120.0, 40.0), 0.0);
        let entering_half = dock.frame(duration / 2.0)[1];
        let peak = dock.frame(duration)[1];

        dock.pointer_left(duration);
        let leaving_half = dock.frame(duration * 1.5)[1];
        let rest = dock.frame(duration * 2.0)[1];

        let entered = (entering_half.scale - 1.0) / (peak.scale - 1.0);
        let left = (peak.scale - leaving_half.scale) / (peak.scale - 1.0);
        assert!((entered - left).abs() < 1e-9);
        assert_eq!(rest, ItemTransform::REST);
        assert!(dock.is_settled(duration * 2.0));
    }
}
