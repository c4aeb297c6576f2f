//! Simulation scenario definition
//!
//! A scenario combines a physical model with its initial and boundary conditions.
use crate::physics::traits::PhysicalModel;
use crate::solver::boundary::DomainBoundaries;

/// Simulation scenario
///
/// Defines a specific case to simulate:
/// - Physical model (equations)
/// - Boundary conditions (domain boundaries)
///
/// # Design
///
/// The same scenario can be solved with different numerical methods.
/// This is the "WHAT to solve" (not "HOW to solve").
///
/// # Examples
///
/// ```rust,ignore
/// let scenario = Scenario::new(model, boundaries);
///
/// // Same diffusion problem, explicit and implicit
/// let explicit = EulerSolver::new().solve(&scenario, &config)?;
/// let implicit = ImplicitSolver::backward_euler().solve(&scenario, &config)?;
/// ```
pub struct Scenario {
    /// Physical model (equations)
    pub model: Box<dyn PhysicalModel>,

    /// Conditions and boundaries
    pub conditions: DomainBoundaries,
}

impl Scenario {

    /// Create a scenario
    pub fn new(model: Box<dyn PhysicalModel>, conditions: DomainBoundaries) -> Self {
        Self { model, conditions }
    }

    /// Create a scenario whose initial condition comes from the model itself
    pub fn from_model(model: Box<dyn PhysicalModel>) -> Self {
        let conditions = DomainBoundaries::temporal(model.setup_initial_state());
        Self { model, conditions }
    }

    /// Verifying scenario content
    ///
    /// Boundaries must be valid and, for spatial problems, the field length
    /// must match the number of points of the model.
    pub fn validate(&self) -> Result<(), String> {
        self.conditions.validate()?;

        if let Some(spatial) = self.conditions.spatial()
            && self.model.setup_initial_state().get(spatial.quantity).is_none()
        {
            return Err(format!(
                "Model '{}' does not evolve {}, the quantity held by the boundary rules",
                self.model.name(),
                spatial.quantity
            ));
        }

        if let (Some(spatial), Some(initial)) =
            (self.conditions.spatial(), self.conditions.initial_condition())
        {
            let points = initial.field(spatial.quantity)?.len();
            if points != self.model.points() {
                return Err(format!(
                    "Initial {} has {} points but model '{}' expects {}",
                    spatial.quantity,
                    points,
                    self.model.name(),
                    self.model.points()
                ));
            }
        }

        Ok(())
    }

    /// Get model name
    pub fn get_model_name(&self) -> &str {
        self.model.name()
    }

    /// True when spatial boundary rules are present
    pub fn is_spatial(&self) -> bool {
        self.conditions.is_spatial()
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.get_model_name())
            .field("points", &self.model.points())
            .field("is spatial", &self.is_spatial())
            .field("Boundaries / conditions", &self.conditions)
            .finish()
    }
}

// ================================================================================================
// Tests
// ================================================================================================
