//! Domain types shared by the renderer, the runner and the CLI.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Simulation package the generated input decks target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SimulationProgram {
    #[default]
    Amber,
    Charmm,
    Gromacs,
}

impl SimulationProgram {
    /// All programs in a stable order.
    pub fn all() -> &'static [SimulationProgram] {
        &[
            SimulationProgram::Amber,
            SimulationProgram::Charmm,
            SimulationProgram::Gromacs,
        ]
    }

    /// Identifier used in template locations and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            SimulationProgram::Amber => "amber",
            SimulationProgram::Charmm => "charmm",
            SimulationProgram::Gromacs => "gromacs",
        }
    }

    /// Executable that neutralizes and solvates a structure for this program.
    pub fn solvation_command(&self) -> &'static str {
        match self {
            SimulationProgram::Amber => "tleap",
            SimulationProgram::Charmm => "charmm",
            SimulationProgram::Gromacs => "gmx",
        }
    }
}

impl fmt::Display for SimulationProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SimulationProgram {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "amber" => Ok(SimulationProgram::Amber),
            "charmm" => Ok(SimulationProgram::Charmm),
            "gromacs" | "gmx" => Ok(SimulationProgram::Gromacs),
            other => Err(format!(
                "unknown simulation program '{other}'; expected: amber, charmm, gromacs"
            )),
        }
    }
}

/// A category of generated files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Equil,
    Prod,
    Scripts,
    Solvate,
}

impl Phase {
    /// Segment naming the phase inside a template location.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Equil => "equil",
            Phase::Prod => "prod",
            Phase::Scripts => "scripts",
            Phase::Solvate => "solvate",
        }
    }

    /// Directory under the output root that receives this phase's files.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Phase::Equil => "Equil",
            Phase::Prod => "Prod",
            Phase::Scripts => "Scripts",
            Phase::Solvate => "Prep",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which phases a `create` run renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputSelection {
    Equil,
    Prod,
    Scripts,
    #[default]
    All,
}

impl OutputSelection {
    /// Phases covered by the selection, in rendering order.
    pub fn phases(&self) -> &'static [Phase] {
        match self {
            OutputSelection::Equil => &[Phase::Equil],
            OutputSelection::Prod => &[Phase::Prod],
            OutputSelection::Scripts => &[Phase::Scripts],
            OutputSelection::All => &[Phase::Equil, Phase::Prod, Phase::Scripts],
        }
    }

    /// Whether the script permission pass applies to this selection.
    pub fn includes_scripts(&self) -> bool {
        self.phases().contains(&Phase::Scripts)
    }
}

impl fmt::Display for OutputSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputSelection::Equil => write!(f, "equil"),
            OutputSelection::Prod => write!(f, "prod"),
            OutputSelection::Scripts => write!(f, "scripts"),
            OutputSelection::All => write!(f, "all"),
        }
    }
}

impl FromStr for OutputSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "equil" | "equilibration" => Ok(OutputSelection::Equil),
            "prod" | "production" => Ok(OutputSelection::Prod),
            "scripts" => Ok(OutputSelection::Scripts),
            "all" => Ok(OutputSelection::All),
            other => Err(format!(
                "unknown output type '{other}'; expected: equil, prod, scripts, all"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Template set identity
// ---------------------------------------------------------------------------

/// Key of a template set: one program/phase combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TemplateSetId {
    pub program: SimulationProgram,
    pub phase: Phase,
}

impl TemplateSetId {
    pub fn new(program: SimulationProgram, phase: Phase) -> Self {
        Self { program, phase }
    }

    /// `templates/<program>/<phase>`, the location the set is looked up under.
    pub fn location(&self) -> PathBuf {
        Path::new("templates")
            .join(self.program.as_str())
            .join(self.phase.as_str())
    }
}

impl fmt::Display for TemplateSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.program, self.phase)
    }
}

// ---------------------------------------------------------------------------
// RenderRequest
// ---------------------------------------------------------------------------

/// Opaque key → value record handed to every template as `data`.
///
/// Built up front with the `with*` methods; rendering only ever borrows it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderRequest(Map<String, Value>);

impl RenderRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a scalar entry.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Add or replace a path entry, stored as its display string.
    pub fn with_path(self, key: impl Into<String>, path: &Path) -> Self {
        self.with(key, path.display().to_string())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

}

// ---------------------------------------------------------------------------
// Parameter records
// ---------------------------------------------------------------------------

/// Lower bound applied to temperatures (K) and the restraint force.
pub const MIN_POSITIVE: f64 = 1.0;

/// Oldest CHARMM force-field release the templates understand.
pub const MIN_CHARMM_FF: i64 = 22;

/// Default location of the CHARMM topology/parameter directory.
pub const DEFAULT_TOPPAR: &str = "/opt/local/charmm/toppar";

/// Current year as a four-digit string.
pub fn current_year() -> String {
    chrono::Local::now().format("%Y").to_string()
}

/// Parameters for the equilibration/production/script input decks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    pub topology: PathBuf,
    pub simdir: PathBuf,
    pub prefix: String,
    /// Initial temperature (K).
    pub temp1: f64,
    /// Final temperature (K).
    pub temp2: f64,
    /// Positional restraint force (kcal/mol/Å²).
    pub force: f64,
    pub toppar: PathBuf,
    pub charmm_ff: i64,
    pub year: String,
    pub amberhome: Option<PathBuf>,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            topology: PathBuf::from("amber.parm7"),
            simdir: PathBuf::from("."),
            prefix: String::new(),
            temp1: 100.0,
            temp2: 300.0,
            force: 100.0,
            toppar: PathBuf::from(DEFAULT_TOPPAR),
            charmm_ff: 36,
            year: current_year(),
            amberhome: None,
        }
    }
}

impl SimulationParameters {
    /// Raise out-of-range numbers to their minimum instead of rejecting them.
    pub fn clamped(mut self) -> Self {
        self.temp1 = self.temp1.max(MIN_POSITIVE);
        self.temp2 = self.temp2.max(MIN_POSITIVE);
        self.force = self.force.max(MIN_POSITIVE);
        self.charmm_ff = self.charmm_ff.max(MIN_CHARMM_FF);
        self
    }

    pub fn to_render_request(&self) -> RenderRequest {
        let p = self.clone().clamped();
        let request = RenderRequest::new()
            .with_path("topology", &p.topology)
            .with_path("simdir", &p.simdir)
            .with("prefix", p.prefix)
            .with("temp1", p.temp1)
            .with("temp2", p.temp2)
            .with("force", p.force)
            .with_path("toppar", &p.toppar)
            .with("charmm_ff", p.charmm_ff)
            .with("year", p.year);
        match &p.amberhome {
            Some(home) => request.with_path("amberhome", home),
            None => request,
        }
    }
}

/// Parameters for the solvation input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolvationParameters {
    pub structure: PathBuf,
    pub topology: Option<PathBuf>,
    pub simdir: PathBuf,
    pub prefix: String,
    /// Minimum solute-to-box-edge distance (Å).
    pub padding: f64,
    pub toppar: PathBuf,
    pub charmm_ff: i64,
    pub year: String,
    pub amberhome: Option<PathBuf>,
}

impl Default for SolvationParameters {
    fn default() -> Self {
        Self {
            structure: PathBuf::from("input.pdb"),
            topology: None,
            simdir: PathBuf::from("."),
            prefix: "solvated".to_string(),
            padding: 10.0,
            toppar: PathBuf::from(DEFAULT_TOPPAR),
            charmm_ff: 36,
            year: current_year(),
            amberhome: None,
        }
    }
}

impl SolvationParameters {
    pub fn to_render_request(&self) -> RenderRequest {
        let mut request = RenderRequest::new()
            .with_path("structure", &self.structure)
            .with_path("simdir", &self.simdir)
            .with("prefix", self.prefix.clone())
            .with("padding", self.padding.max(MIN_POSITIVE))
            .with_path("toppar", &self.toppar)
            .with("charmm_ff", self.charmm_ff.max(MIN_CHARMM_FF))
            .with("year", self.year.clone());
        if let Some(topology) = &self.topology {
            request = request.with_path("topology", topology);
        }
        if let Some(home) = &self.amberhome {
            request = request.with_path("amberhome", home);
        }
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("amber", SimulationProgram::Amber)]
    #[case("CHARMM", SimulationProgram::Charmm)]
    #[case("gromacs", SimulationProgram::Gromacs)]
    #[case("gmx", SimulationProgram::Gromacs)]
    fn program_parses_case_insensitively(#[case] input: &str, #[case] expected: SimulationProgram) {
        assert_eq!(input.parse::<SimulationProgram>().unwrap(), expected);
    }

    #[test]
    fn unknown_program_is_rejected() {
        let err = "badprog".parse::<SimulationProgram>().unwrap_err();
        assert!(err.contains("badprog"), "got: {err}");
    }

    #[test]
    fn all_expands_to_every_phase_in_order() {
        assert_eq!(
            OutputSelection::All.phases(),
            &[Phase::Equil, Phase::Prod, Phase::Scripts]
        );
        assert!(OutputSelection::All.includes_scripts());
        assert!(OutputSelection::Scripts.includes_scripts());
        assert!(!OutputSelection::Prod.includes_scripts());
    }

    #[rstest]
    #[case("equilibration", OutputSelection::Equil)]
    #[case("PROD", OutputSelection::Prod)]
    #[case("all", OutputSelection::All)]
    fn selection_parses(#[case] input: &str, #[case] expected: OutputSelection) {
        assert_eq!(input.parse::<OutputSelection>().unwrap(), expected);
    }

    #[test]
    fn template_set_location_and_name() {
        let id = TemplateSetId::new(SimulationProgram::Amber, Phase::Scripts);
        assert_eq!(id.location(), PathBuf::from("templates/amber/scripts"));
        assert_eq!(id.to_string(), "amber/scripts");
    }

    #[test]
    fn parameters_are_clamped() {
        let params = SimulationParameters {
            temp1: -5.0,
            temp2: 0.5,
            force: 0.0,
            charmm_ff: 10,
            ..Default::default()
        }
        .clamped();
        assert_eq!(params.temp1, 1.0);
        assert_eq!(params.temp2, 1.0);
        assert_eq!(params.force, 1.0);
        assert_eq!(params.charmm_ff, 22);
    }

    #[test]
    fn negative_force_field_version_is_raised_to_minimum() {
        let request = SolvationParameters {
            charmm_ff: -5,
            ..Default::default()
        }
        .to_render_request();
        assert_eq!(request.get("charmm_ff"), Some(&Value::from(22)));
    }

    #[test]
    fn render_request_carries_every_key() {
        let params = SimulationParameters {
            prefix: "rnase2".to_string(),
            year: "2024".to_string(),
            amberhome: Some(PathBuf::from("/opt/amber")),
            ..Default::default()
        };
        let request = params.to_render_request();
        for key in [
            "topology", "simdir", "prefix", "temp1", "temp2", "force", "toppar", "charmm_ff",
            "year", "amberhome",
        ] {
            assert!(request.contains_key(key), "missing {key}");
        }
        assert_eq!(request.get("prefix"), Some(&Value::from("rnase2")));
        assert_eq!(request.get("temp2"), Some(&Value::from(300.0)));
    }

    #[test]
    fn amberhome_is_omitted_when_absent() {
        let request = SimulationParameters::default().to_render_request();
        assert!(!request.contains_key("amberhome"));
    }

    #[test]
    fn solvation_request_clamps_padding() {
        let request = SolvationParameters {
            padding: 0.0,
            ..Default::default()
        }
        .to_render_request();
        assert_eq!(request.get("padding"), Some(&Value::from(1.0)));
        assert_eq!(request.get("prefix"), Some(&Value::from("solvated")));
        assert!(!request.contains_key("topology"));
    }

    #[test]
    fn render_request_serializes_as_flat_object() {
        let request = RenderRequest::new().with("a", 1).with("b", "two");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"a": 1, "b": "two"}));
    }
}
