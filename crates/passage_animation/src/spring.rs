//! Spring physics animation
//!
//! RK4-integrated spring physics for smooth, interruptible transitions.
//! Supports preset configurations, damping-ratio construction and custom
//! spring parameters.

/// Largest integration step; longer frames are split into sub-steps
const MAX_STEP: f32 = 1.0 / 240.0;

/// Longest simulated span per step; bounds the sub-step count at 240
const MAX_FRAME: f32 = 1.0;

/// Configuration for a spring animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    /// Distance from the target considered visually at rest
    pub visibility_threshold: f32,
}

impl SpringConfig {
    /// Create a new spring configuration
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
            visibility_threshold: 0.01,
        }
    }

    /// Create a unit-mass spring from a damping ratio (1.0 = critically damped)
    pub fn with_damping_ratio(damping_ratio: f32, stiffness: f32) -> Self {
        let stiffness = stiffness.max(f32::EPSILON);
        Self::new(stiffness, damping_ratio * 2.0 * stiffness.sqrt(), 1.0)
    }

    /// A critically damped spring, the default motion for screen transitions
    pub fn critically_damped(stiffness: f32) -> Self {
        Self::with_damping_ratio(1.0, stiffness)
    }

    /// Override the rest threshold
    pub fn threshold(mut self, visibility_threshold: f32) -> Self {
        self.visibility_threshold = visibility_threshold.abs();
        self
    }

    /// A gentle, slow spring (good for page transitions)
    pub fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// A wobbly spring with overshoot
    pub fn wobbly() -> Self {
        Self::new(180.0, 12.0, 1.0)
    }

    /// A stiff, snappy spring
    pub fn stiff() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    /// A very stiff spring with minimal oscillation
    pub fn snappy() -> Self {
        Self::new(600.0, 40.0, 1.0)
    }

    /// A slow spring with no overshoot
    pub fn molasses() -> Self {
        Self::new(100.0, 20.0, 1.0)
    }

    /// Calculate critical damping for this spring's stiffness and mass
    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Ratio of actual to critical damping
    pub fn damping_ratio(&self) -> f32 {
        let critical = self.critical_damping();
        if critical > 0.0 {
            self.damping / critical
        } else {
            0.0
        }
    }

    /// Check if the spring is underdamped (will oscillate)
    pub fn is_underdamped(&self) -> bool {
        self.damping < self.critical_damping()
    }

    /// Check if the spring is critically damped (no oscillation, fastest settling)
    pub fn is_critically_damped(&self) -> bool {
        (self.damping - self.critical_damping()).abs() < 0.01
    }

    /// Check if the spring is overdamped (slow settling, no oscillation)
    pub fn is_overdamped(&self) -> bool {
        self.damping > self.critical_damping()
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::stiff()
    }
}

/// A spring-based animator
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    /// Start from an existing value and velocity (used when a run is interrupted)
    pub fn with_velocity(config: SpringConfig, initial: f32, velocity: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity,
            target: initial,
        }
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Check if the spring has settled (within threshold of target with minimal velocity)
    pub fn is_settled(&self) -> bool {
        let threshold = self.config.visibility_threshold;
        // Velocity threshold scales with position threshold so unit-range values
        // (opacity) and pixel-range values (offsets) settle alike
        let velocity_threshold = threshold * 10.0;

        (self.value - self.target).abs() < threshold && self.velocity.abs() < velocity_threshold
    }

    /// Advance the simulation by `dt` seconds, snapping to target once settled
    pub fn step(&mut self, dt: f32) {
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
            return;
        }

        // NaN and negative deltas do nothing; huge ones (resume after suspend)
        // simulate at most MAX_FRAME
        let dt = if dt.is_nan() { 0.0 } else { dt.clamp(0.0, MAX_FRAME) };
        let substeps = (dt / MAX_STEP).ceil() as u32;
        if substeps > 0 {
            let h = dt / substeps as f32;
            for _ in 0..substeps {
                self.integrate(h);
            }
        }

        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }

    /// One RK4 integration step
    fn integrate(&mut self, dt: f32) {
        let k1_v = self.acceleration(self.value, self.velocity);
        let k1_x = self.velocity;

        let k2_v = self.acceleration(
            self.value + k1_x * dt * 0.5,
            self.velocity + k1_v * dt * 0.5,
        );
        let k2_x = self.velocity + k1_v * dt * 0.5;

        let k3_v = self.acceleration(
            self.value + k2_x * dt * 0.5,
            self.velocity + k2_v * dt * 0.5,
        );
        let k3_x = self.velocity + k2_v * dt * 0.5;

        let k4_v = self.acceleration(self.value + k3_x * dt, self.velocity + k3_v * dt);
        let k4_x = self.velocity + k3_v * dt;

        self.velocity += (k1_v + 2.0 * k2_v + 2.0 * k3_v + k4_v) * dt / 6.0;
        self.value += (k1_x + 2.0 * k2_x + 2.0 * k3_x + k4_x) * dt / 6.0;
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let spring_force = -self.config.stiffness * (x - self.target);
        let damping_force = -self.config.damping * v;
        (spring_force + damping_force) / self.config.mass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_huge_and_invalid_deltas_terminate() {
        let mut spring = Spring::new(SpringConfig::critically_damped(250.0), 0.0);
        spring.set_target(1000.0);

        spring.step(f32::NAN);
        assert_eq!(spring.value(), 0.0);
        spring.step(-1.0);
        assert_eq!(spring.value(), 0.0);

        // One long step lands on the target instead of looping forever
        spring.step(1e6);
        assert!(spring.value().is_finite());
        assert!(spring.is_settled());
        assert_eq!(spring.value(), 1000.0);

        spring.set_target(0.0);
        spring.step(f32::INFINITY);
        assert_eq!(spring.value(), 0.0);
    }

    #[test]
    fn test_spring_settles_to_target() {
        let mut spring = Spring::new(SpringConfig::stiff().threshold(0.5), 0.0);
        spring.set_target(100.0);

        // Simulate for 2 seconds at 60fps
        for _ in 0..120 {
            spring.step(1.0 / 60.0);
        }

        assert!(spring.is_settled());
        assert_eq!(spring.value(), 100.0);
    }

    #[test]
    fn test_spring_inherits_velocity() {
        let mut spring = Spring::new(SpringConfig::wobbly(), 0.0);
        spring.set_target(100.0);

        for _ in 0..10 {
            spring.step(1.0 / 60.0);
        }

        let velocity = spring.velocity();
        assert!(velocity > 0.0);

        // Change target mid-flight - velocity should continue
        spring.set_target(50.0);
        assert_eq!(spring.velocity(), velocity);
    }

    #[test]
    fn test_damping_ratio_construction() {
        let config = SpringConfig::critically_damped(225.0);
        assert!(config.is_critically_damped());
        assert!((config.damping - 30.0).abs() < 1e-4);
        assert!((config.damping_ratio() - 1.0).abs() < 1e-4);

        let bouncy = SpringConfig::with_damping_ratio(0.5, 400.0);
        assert!(bouncy.is_underdamped());
    }

    #[test]
    fn test_critically_damped_does_not_overshoot() {
        let mut spring = Spring::new(SpringConfig::critically_damped(2500.0), 0.0);
        spring.set_target(1.0);

        for _ in 0..120 {
            spring.step(1.0 / 60.0);
            assert!(spring.value() <= 1.0 + 1e-3);
        }
        assert_eq!(spring.value(), 1.0);
    }

    #[test]
    fn test_large_time_step_is_stable() {
        let mut spring = Spring::new(SpringConfig::critically_damped(2500.0), 0.0);
        spring.set_target(1000.0);

        for _ in 0..20 {
            spring.step(0.1);
            assert!(spring.value().is_finite());
            assert!(spring.value() < 1100.0);
            assert!(spring.value() > -100.0);
        }
        assert!(spring.is_settled());
    }

    #[test]
    fn test_spring_different_mass() {
        let config = SpringConfig::new(400.0, 25.0, 2.0).threshold(0.5);
        let mut spring = Spring::new(config, 0.0);
        spring.set_target(100.0);

        for _ in 0..240 {
            spring.step(1.0 / 60.0);
        }

        assert!(spring.value().is_finite());
        assert!(spring.is_settled());
    }
}
