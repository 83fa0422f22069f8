#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl SpringConfig {
    pub fn new(stiffness: f64, damping: f64, mass: f64) -> Self {
        Self {
            stiffness,
            damping,
            mass: mass.max(f64::EPSILON),
        }
    }

    pub fn cursor() -> Self {
        Self::new(500.0, 28.0, 0.5)
    }

    pub fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    pub fn critical_damping(&self) -> f64 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    pub fn is_underdamped(&self) -> bool {
        self.damping < self.critical_damping()
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::cursor()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    value: f64,
    velocity: f64,
    target: f64,
}

const REST_DISTANCE: f64 = 0.01;
const REST_VELOCITY: f64 = 0.01;
// Longest slice integrated in one go; larger steps are subdivided.
const MAX_STEP_SECONDS: f64 = 1.0 / 120.0;

impl Spring {
    pub fn new(config: SpringConfig, initial: f64) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    pub fn snap_to(&mut self, value: f64) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < REST_DISTANCE && self.velocity.abs() < REST_VELOCITY
    }

    pub fn step(&mut self, dt_seconds: f64) {
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
            return;
        }

        let mut remaining = dt_seconds.clamp(0.0, 0.25);
        while remaining > 0.0 {
            let dt = remaining.min(MAX_STEP_SECONDS);
            self.integrate(dt);
            remaining -= dt;
        }
    }

    fn acceleration(&self, value: f64, velocity: f64) -> f64 {
        let spring_force = -self.config.stiffness * (value - self.target);
        let damping_force = -self.config.damping * velocity;
        (spring_force + damping_force) / self.config.mass
    }

    fn integrate(&mut self, dt: f64) {
        let (x, v) = (self.value, self.velocity);

        let k1_v = self.acceleration(x, v);
        let k1_x = v;

        let k2_v = self.acceleration(x + k1_x * dt / 2.0, v + k1_v * dt / 2.0);
        let k2_x = v + k1_v * dt / 2.0;

        let k3_v = self.acceleration(x + k2_x * dt / 2.0, v + k2_v * dt / 2.0);
        let k3_x = v + k2_v * dt / 2.0;

        let k4_v = self.acceleration(x + k3_x * dt, v + k3_v * dt);
        let k4_x = v + k3_v * dt;

        self.value = x + (k1_x + 2.0 * k2_x + 2.0 * k3_x + k4_x) * dt / 6.0;
        self.velocity = v + (k1_v + 2.0 * k2_v + 2.0 * k3_v + k4_v) * dt / 6.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spring_settles_on_target() {
        let mut spring = Spring::new(SpringConfig::cursor(), 0.0);
        spring.set_target(100.0);

        for _ in 0..240 {
            spring.step(1.0 / 60.0);
        }

        assert!(spring.is_settled());
        assert!((spring.value() - 100.0).abs() < REST_DISTANCE);
    }

    #[test]
    fn spring_lags_behind_a_fresh_target() {
        let mut spring = Spring::new(SpringConfig::cursor(), 0.0);
        spring.set_target(100.0);
        spring.step(1.0 / 60.0);

        assert!(spring.value() > 0.0 && spring.value() < 100.0);
    }

    #[test]
    fn snap_drops_velocity() {
        let mut spring = Spring::new(SpringConfig::gentle(), 0.0);
        spring.set_target(50.0);
        spring.step(0.05);
        spring.snap_to(10.0);

        assert!(spring.is_settled());
        assert_eq!(spring.value(), 10.0);
        assert!(SpringConfig::gentle().is_underdamped());
    }
}
