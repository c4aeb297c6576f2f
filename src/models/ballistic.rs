//! Projectile motion without drag
//!
//! # Physical Model
//!
//! ```text
//! dx/dt = vx        dvx/dt = 0
//! dy/dt = vy        dvy/dt = -g
//! ```
//!
//! The state carries two vector quantities: `Position = [x, y]` and
//! `Velocity = [vx, vy]`. Integrated with the
//! [`EulerSolver`](crate::solver::EulerSolver), the height error against the
//! parabola grows like `g t dt / 2`: first order in `dt`.

use nalgebra::DVector;

use crate::models::STANDARD_GRAVITY;
use crate::physics::{PhysicalData, PhysicalModel, PhysicalQuantity, PhysicalState};

/// Point mass under uniform gravity
///
/// # Example
///
/// ```rust
/// use fdm_rs::models::Ballistic;
///
/// let projectile = Ballistic::new([0.0, 0.0], [3.0, 4.0]).with_gravity(10.0);
///
/// assert!((projectile.flight_time() - 0.8).abs() < 1e-12);
/// assert!((projectile.range() - 2.4).abs() < 1e-12);
/// assert!((projectile.analytical_height(0.4) - 0.8).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Ballistic {
    gravity: f64,
    position: [f64; 2],
    velocity: [f64; 2],
}

impl Ballistic {
    /// Projectile with an initial position and velocity, under standard gravity
    pub fn new(position: [f64; 2], velocity: [f64; 2]) -> Self {
        Self {
            gravity: STANDARD_GRAVITY,
            position,
            velocity,
        }
    }

    /// Projectile launched from the origin at `speed` and `angle_degrees` above the horizon
    pub fn from_launch(speed: f64, angle_degrees: f64) -> Self {
        let angle = angle_degrees.to_radians();
        Self::new([0.0, 0.0], [speed * angle.cos(), speed * angle.sin()])
    }

    /// Builder pattern: set the gravitational acceleration
    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    /// Gravitational acceleration `g`
    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    /// Initial position `[x, y]`
    pub fn initial_position(&self) -> [f64; 2] {
        self.position
    }

    /// Initial velocity `[vx, vy]`
    pub fn initial_velocity(&self) -> [f64; 2] {
        self.velocity
    }

    /// Exact position at time `t`
    pub fn analytical_position(&self, t: f64) -> [f64; 2] {
        [
            self.position[0] + self.velocity[0] * t,
            self.analytical_height(t),
        ]
    }

    /// Exact height at time `t`
    pub fn analytical_height(&self, t: f64) -> f64 {
        self.position[1] + self.velocity[1] * t - 0.5 * self.gravity * t * t
    }

    /// Time at which the projectile falls back to `y = 0`
    ///
    /// Positive root of the height parabola; `0` when there is none
    /// (projectile below ground, or no gravity and no upward speed).
    pub fn flight_time(&self) -> f64 {
        let [_, y0] = self.position;
        let [_, vy] = self.velocity;
        let g = self.gravity;

        if g == 0.0 {
            return if vy < 0.0 && y0 > 0.0 { -y0 / vy } else { 0.0 };
        }

        let discriminant = vy * vy + 2.0 * g * y0;
        if discriminant < 0.0 {
            return 0.0;
        }
        ((vy + discriminant.sqrt()) / g).max(0.0)
    }

    /// Horizontal distance covered during [`flight_time`](Self::flight_time)
    pub fn range(&self) -> f64 {
        self.velocity[0] * self.flight_time()
    }

    /// Highest point reached
    pub fn max_height(&self) -> f64 {
        let [_, vy] = self.velocity;
        if vy <= 0.0 || self.gravity <= 0.0 {
            self.position[1]
        } else {
            self.position[1] + vy * vy / (2.0 * self.gravity)
        }
    }
}

impl PhysicalModel for Ballistic {
    /// Two components per vector quantity
    fn points(&self) -> usize {
        2
    }

    fn compute_physics(&self, state: &PhysicalState) -> PhysicalState {
        let mut derivative = PhysicalState::empty();

        // d(position)/dt = velocity
        if let Some(velocity) = state.get(PhysicalQuantity::Velocity) {
            derivative.set(PhysicalQuantity::Position, velocity.clone());
        }

        // d(velocity)/dt = [0, -g]
        derivative.set(
            PhysicalQuantity::Velocity,
            PhysicalData::from_vector(DVector::from_vec(vec![0.0, -self.gravity])),
        );

        derivative
    }

    fn setup_initial_state(&self) -> PhysicalState {
        let mut state = PhysicalState::new(
            PhysicalQuantity::Position,
            PhysicalData::from_vec(self.position.to_vec()),
        );
        state.set(PhysicalQuantity::Velocity, PhysicalData::from_vec(self.velocity.to_vec()));
        state
    }

    fn name(&self) -> &str {
        "Ballistic"
    }

    fn description(&self) -> Option<&str> {
        Some("Point mass under uniform gravity, no drag")
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_launch_components() {
        let projectile = Ballistic::from_launch(10.0, 30.0);
        let [vx, vy] = projectile.initial_velocity();

        assert_relative_eq!(vx, 10.0 * 3f64.sqrt() / 2.0, epsilon = 1e-12);
        assert_relative_eq!(vy, 5.0, epsilon = 1e-12);
        assert_relative_eq!(projectile.gravity(), STANDARD_GRAVITY);
    }

    #[test]
    fn test_closed_form() {
        let projectile = Ballistic::new([0.0, 0.0], [6.0, 8.0]).with_gravity(10.0);

        assert_relative_eq!(projectile.flight_time(), 1.6, epsilon = 1e-12);
        assert_relative_eq!(projectile.range(), 9.6, epsilon = 1e-12);
        assert_relative_eq!(projectile.max_height(), 3.2, epsilon = 1e-12);

        let [x, y] = projectile.analytical_position(1.6);
        assert_relative_eq!(x, 9.6, epsilon = 1e-12);
        assert_relative_eq!(y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_flight_time_from_a_cliff() {
        // Dropped from 20 m with g = 10: t = 2 s
        let projectile = Ballistic::new([0.0, 20.0], [1.0, 0.0]).with_gravity(10.0);
        assert_relative_eq!(projectile.flight_time(), 2.0, epsilon = 1e-12);

        let weightless = Ballistic::new([0.0, 1.0], [1.0, 1.0]).with_gravity(0.0);
        assert_eq!(weightless.flight_time(), 0.0);
    }

    #[test]
    fn test_derivative() {
        let projectile = Ballistic::new([1.0, 2.0], [3.0, 4.0]).with_gravity(9.0);
        let state = projectile.setup_initial_state();

        let derivative = projectile.compute_physics(&state);

        assert_eq!(derivative.field(PhysicalQuantity::Position).unwrap().as_slice(), &[3.0, 4.0]);
        assert_eq!(derivative.field(PhysicalQuantity::Velocity).unwrap().as_slice(), &[0.0, -9.0]);
    }

    #[test]
    fn test_initial_state() {
        let projectile = Ballistic::new([1.0, 2.0], [3.0, 4.0]);
        let state = projectile.setup_initial_state();

        assert_eq!(state.len(), 2);
        assert_eq!(state.field(PhysicalQuantity::Position).unwrap().as_slice(), &[1.0, 2.0]);
        assert_eq!(projectile.points(), 2);
    }
}
