//! Common utilities for integration tests

#![allow(dead_code)]

pub mod mock_models;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_models::{SineModeDiffusion, StandingWave};
pub use test_helpers::{
    assert_fields_close,
    diffusion_scenario,
    gaussian_bump,
    relative_error,
    temporal_scenario,
};
