//! Application-level configuration.
//!
//! - [`ExecutionParams`]: orchestration loop control (iteration budget, model settings)

pub mod execution_params;

pub use execution_params::ExecutionParams;
