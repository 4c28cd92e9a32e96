//! # mdsetup-renderer
//!
//! Renders simulation input decks and driver scripts from Tera template sets.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use mdsetup_core::{OutputSelection, SimulationParameters, SimulationProgram};
//! use mdsetup_renderer::{pipeline, RenderOptions, TemplateLibrary, TeraEngine};
//!
//! fn create(outdir: &Path) -> Result<(), mdsetup_renderer::RenderError> {
//!     let request = SimulationParameters::default().to_render_request();
//!     let summary = pipeline::render_selection(
//!         &TemplateLibrary::embedded(),
//!         &TeraEngine,
//!         &request,
//!         outdir,
//!         SimulationProgram::Amber,
//!         OutputSelection::All,
//!         &RenderOptions::default(),
//!     )?;
//!     println!("{} files written", summary.files().count());
//!     Ok(())
//! }
//! ```

pub mod engine;
pub mod error;
pub mod library;
pub mod pipeline;
pub mod writer;

pub use engine::{TemplateEngine, TeraEngine};
pub use error::RenderError;
pub use library::{TemplateFile, TemplateLibrary, TemplateSet};
pub use pipeline::{PhaseOutput, RenderSummary};
pub use writer::{fix_script_permissions, render_template_set, RenderOptions};
