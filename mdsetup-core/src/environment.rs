//! Environment references required by individual simulation programs.
//!
//! Every lookup has two forms:
//! - `resolve_environment_with(program, lookup)`: explicit lookup, used in tests
//! - `resolve_environment(program)`: reads the process environment

use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::CoreError;
use crate::types::SimulationProgram;

/// Environment variable the program's templates depend on, if any.
pub fn environment_variable(program: SimulationProgram) -> Option<&'static str> {
    match program {
        SimulationProgram::Amber => Some("AMBERHOME"),
        SimulationProgram::Charmm | SimulationProgram::Gromacs => None,
    }
}

/// Resolve the program's environment reference through `lookup`.
///
/// Returns `Ok(None)` for programs that need no reference.
pub fn resolve_environment_with<F>(
    program: SimulationProgram,
    lookup: F,
) -> Result<Option<PathBuf>, CoreError>
where
    F: Fn(&str) -> Option<OsString>,
{
    let Some(variable) = environment_variable(program) else {
        return Ok(None);
    };
    match lookup(variable) {
        Some(value) if !value.is_empty() => {
            let path = PathBuf::from(value);
            tracing::debug!("{variable} = {}", path.display());
            Ok(Some(path))
        }
        _ => Err(CoreError::MissingEnvironmentReference { program, variable }),
    }
}

/// Resolve the program's environment reference from the process environment.
pub fn resolve_environment(program: SimulationProgram) -> Result<Option<PathBuf>, CoreError> {
    resolve_environment_with(program, |key| std::env::var_os(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amber_reads_amberhome() {
        let home = resolve_environment_with(SimulationProgram::Amber, |key| {
            (key == "AMBERHOME").then(|| OsString::from("/opt/amber22"))
        })
        .expect("resolve");
        assert_eq!(home, Some(PathBuf::from("/opt/amber22")));
    }

    #[test]
    fn amber_without_amberhome_fails() {
        let err = resolve_environment_with(SimulationProgram::Amber, |_| None).unwrap_err();
        assert!(matches!(
            err,
            CoreError::MissingEnvironmentReference { variable: "AMBERHOME", .. }
        ));
        assert!(err.to_string().contains("AMBERHOME"));
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let err = resolve_environment_with(SimulationProgram::Amber, |_| Some(OsString::new()))
            .unwrap_err();
        assert!(matches!(err, CoreError::MissingEnvironmentReference { .. }));
    }

    #[test]
    fn other_programs_need_nothing() {
        for program in [SimulationProgram::Charmm, SimulationProgram::Gromacs] {
            assert_eq!(resolve_environment_with(program, |_| None).unwrap(), None);
        }
    }
}
