//! fdm-rs: Finite-Difference Methods for simple ODEs and PDEs
//!
//! A small library of finite-difference solutions to classic teaching
//! problems: derivative estimation, ballistic motion, shallow-water wave
//! propagation and 1-D diffusion (explicit and implicit).
//!
//! # Architecture
//!
//! fdm-rs is built on two core principles:
//!
//! 1. **Separation of Physics and Numerics**
//!    - Physical models define equations (what to solve)
//!    - Numerical solvers provide schemes (how to march in time)
//!
//! 2. **Frozen time levels**
//!    - Every update reads complete previous levels and writes a separate buffer
//!    - Boundary rules own the two end points of the grid
//!
//! Every problem follows the same pipeline:
//!
//! ```text
//! Grid Setup → Initial/Boundary Conditions → Time Stepping → Comparison → (external plotting)
//!  Grid1D        DomainBoundaries             Solver          analysis      output::export
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use fdm_rs::prelude::*;
//!
//! # fn main() -> Result<(), String> {
//! // 1. Grid and model: D = 1 on [0, 1], Gaussian bump in the middle
//! let grid = Grid1D::new(0.0, 1.0, 101)?;
//! let bump = grid.sample(|x| (-((x - 0.5) / 0.05).powi(2)).exp());
//! let model = Diffusion1D::from_grid(grid, 1.0)?.with_initial_profile(bump)?;
//!
//! // 2. Scenario: fixed zero ends
//! let initial = model.setup_initial_state();
//! let rules = SpatialBoundaries::dirichlet(PhysicalQuantity::Concentration, 0.0, 0.0);
//! let scenario = Scenario::new(Box::new(model), DomainBoundaries::space_time(rules, initial));
//!
//! // 3. Run: dx = 0.01, dt = 4e-5, alpha = 0.4
//! let config = SolverConfiguration::fixed_step(4.0e-5, 250)
//!     .with_snapshots(SnapshotSchedule::Every(50));
//! let result = EulerSolver::new().solve(&scenario, &config)?;
//!
//! // 4. Inspect
//! let last = result.final_state.field(PhysicalQuantity::Concentration)?;
//! assert!(last.iter().all(|&u| u >= 0.0));
//! assert_eq!(result.len(), 6);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: grid, state containers, `PhysicalModel` trait
//! - [`models`]: diffusion, shallow-water and ballistic models
//! - [`solver`]: boundaries, scenarios, explicit and implicit schemes
//! - [`analysis`]: derivative estimators and error norms
//! - [`output`]: CSV export
//!
//! # Features
//!
//! - `parallel`: run stencil loops and element-wise updates on large grids
//!   with rayon (see [`solver::set_parallel_threshold`])

// Core modules
pub mod physics;

pub mod analysis;
pub mod models;
pub mod output;
pub mod solver;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use fdm_rs::prelude::*;
    //! ```
    pub use crate::physics::{Grid1D,
                             PhysicalData,
                             PhysicalQuantity,
                             PhysicalState,
                             PhysicalModel};
    pub use crate::models::{Ballistic,
                            Diffusion1D,
                            ShallowWater1D};
    pub use crate::solver::{Solver,
                            SolverConfiguration,
                            SolverType,
                            Scenario,
                            SimulationResult,
                            DomainBoundaries,
                            SpatialBoundaries,
                            BoundaryCondition,
                            SnapshotSchedule,
                            EulerSolver,
                            WaveSolver,
                            ImplicitSolver};
}
