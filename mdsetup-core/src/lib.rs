//! mdsetup core library: domain types, environment lookup, project layout, errors.
//!
//! - [`types`]: simulation program, phase, selection, render request, parameters
//! - [`environment`]: per-program environment references (`AMBERHOME`)
//! - [`layout`]: empty project skeleton
//! - [`error`]: [`CoreError`]

pub mod environment;
pub mod error;
pub mod layout;
pub mod types;

pub use error::CoreError;
pub use types::{
    OutputSelection, Phase, RenderRequest, SimulationParameters, SimulationProgram,
    SolvationParameters, TemplateSetId,
};
