use thiserror::Error;

/// Exit status used when no GitHub token can be found.
pub const NO_TOKEN_EXIT_CODE: i32 = 1;

/// Failures raised by the release drafting logic itself.
///
/// Network and file system failures are not represented here; they travel
/// as `anyhow::Error` with context attached at the call site.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReleaseError {
    #[error("no GitHub token was provided")]
    MissingToken,

    #[error("repository '{0}' was specified without an owner and no --owner was given")]
    MissingOwner(String),

    #[error("repository must be in format 'owner/repo', got: '{0}'")]
    InvalidRepo(String),

    #[error("tag_name on release is invalid: '{0}'")]
    InvalidTag(String),

    #[error("unable to increment version value '{0}'")]
    InvalidVersion(String),

    #[error("unable to find selection '{0}' within the known choices")]
    NotFound(String),

    #[error("config file {0} does not contain a JSON object")]
    InvalidConfig(String),
}
