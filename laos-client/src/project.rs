//! Default project resolution.
//!
//! Every route operation takes an optional project id. When the caller
//! passes `None`, the operation asks its [`ProjectResolver`] for the default
//! before building any path.

use laos_core::ProjectId;

use crate::config::PROJECT_ID_VAR;
use crate::ClientError;

/// Supplies the project id for calls that omit one.
pub trait ProjectResolver: Send + Sync {
    /// The project to use when none is given.
    ///
    /// # Errors
    /// Returns [`ClientError::MissingProject`] when no default exists.
    fn default_project(&self) -> Result<ProjectId, ClientError>;

    /// Use `explicit` when present, otherwise the default.
    ///
    /// # Errors
    /// Propagates [`ProjectResolver::default_project`] errors.
    fn resolve(&self, explicit: Option<&ProjectId>) -> Result<ProjectId, ClientError> {
        match explicit {
            Some(project) => Ok(project.clone()),
            None => self.default_project(),
        }
    }
}

/// A fixed default project.
impl ProjectResolver for ProjectId {
    fn default_project(&self) -> Result<ProjectId, ClientError> {
        Ok(self.clone())
    }
}

/// A default project that may not have been configured.
impl ProjectResolver for Option<ProjectId> {
    fn default_project(&self) -> Result<ProjectId, ClientError> {
        self.clone().ok_or(ClientError::MissingProject)
    }
}

/// No default: callers must always pass a project id.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDefaultProject;

impl ProjectResolver for NoDefaultProject {
    fn default_project(&self) -> Result<ProjectId, ClientError> {
        Err(ClientError::MissingProject)
    }
}

/// Reads the default project from an environment variable at call time.
#[derive(Debug, Clone)]
pub struct EnvProject {
    var: String,
}

impl EnvProject {
    /// Resolve from `OS_PROJECT_ID`.
    #[must_use]
    pub fn new() -> Self {
        Self::from_var(PROJECT_ID_VAR)
    }

    /// Resolve from the named variable.
    pub fn from_var(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvProject {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectResolver for EnvProject {
    fn default_project(&self) -> Result<ProjectId, ClientError> {
        std::env::var(&self.var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(ProjectId::from)
            .ok_or(ClientError::MissingProject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_project_wins_over_default() {
        let resolver = ProjectId::new("default");
        let explicit = ProjectId::new("explicit");
        let resolved = resolver.resolve(Some(&explicit));
        assert!(matches!(resolved, Ok(ref p) if p.as_str() == "explicit"));
    }

    #[test]
    fn missing_project_falls_back_to_default() {
        let resolver = ProjectId::new("default");
        assert!(matches!(resolver.resolve(None), Ok(ref p) if p.as_str() == "default"));
    }

    #[test]
    fn no_default_project_requires_explicit_id() {
        assert!(matches!(NoDefaultProject.resolve(None), Err(ClientError::MissingProject)));
        let explicit = ProjectId::new("p");
        assert!(NoDefaultProject.resolve(Some(&explicit)).is_ok());
    }

    #[test]
    fn optional_default_reports_missing() {
        let unset: Option<ProjectId> = None;
        assert!(matches!(unset.resolve(None), Err(ClientError::MissingProject)));
        let set = Some(ProjectId::new("p"));
        assert!(matches!(set.resolve(None), Ok(ref p) if p.as_str() == "p"));
    }

    #[test]
    fn env_project_unset_variable_is_missing() {
        let resolver = EnvProject::from_var("LAOS_TEST_PROJECT_VAR_THAT_IS_NEVER_SET");
        assert!(matches!(resolver.resolve(None), Err(ClientError::MissingProject)));
    }
}
