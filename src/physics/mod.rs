//! Physical models
//!
//! This module provides the grid, the state containers and the
//! `PhysicalModel` trait. A physical model encapsulates the equations of one
//! problem (diffusion, shallow-water waves, ballistics); numerical schemes
//! live in [`crate::solver`].
//!
//! # Core Concepts
//!
//! - **Grid**: immutable, evenly spaced sample points ([`Grid1D`])
//! - **Physical Model**: computes the right-hand side at a given state
//! - **Physical State**: container for all physical quantities at one time level
//! - **Physical Quantity**: type-safe identifier for physical variables
//!
//! # Implementing a New Physical Model
//!
//! ```rust
//! use fdm_rs::physics::{PhysicalModel, PhysicalState, PhysicalQuantity, PhysicalData};
//!
//! /// dy/dt = -y
//! struct Decay;
//!
//! impl PhysicalModel for Decay {
//!     fn points(&self) -> usize { 1 }
//!
//!     fn compute_physics(&self, state: &PhysicalState) -> PhysicalState {
//!         state.clone() * -1.0
//!     }
//!
//!     fn setup_initial_state(&self) -> PhysicalState {
//!         PhysicalState::new(PhysicalQuantity::Concentration, PhysicalData::from_vec(vec![1.0]))
//!     }
//!
//!     fn name(&self) -> &str { "Decay" }
//! }
//!
//! let rate = Decay.compute_physics(&Decay.setup_initial_state());
//! assert_eq!(rate.field(PhysicalQuantity::Concentration).unwrap()[0], -1.0);
//! ```

pub mod data;
pub mod grid;
pub mod traits;

pub use data::PhysicalData;
pub use grid::Grid1D;
pub use traits::{
    PhysicalModel,
    PhysicalQuantity,
    PhysicalState,
    StabilityEstimate,
};
