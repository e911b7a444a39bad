use crate::{cli::RunOptions, env::Environment, error::ReleaseError};

pub const TOKEN_ENV_VAR: &str = "RELEASE_PULL_REQUEST_TOKEN";

/// Picks the GitHub token from `--token`, falling back to
/// `RELEASE_PULL_REQUEST_TOKEN`.
pub fn resolve_token(opts: &RunOptions, env: &dyn Environment) -> Result<String, ReleaseError> {
    if let Some(token) = &opts.token {
        return Ok(token.clone());
    }

    env.var(TOKEN_ENV_VAR)
        .filter(|token| !token.is_empty())
        .ok_or(ReleaseError::MissingToken)
}

/// Instructions printed when no token could be found.
pub fn token_instructions() -> String {
    format!(
        "Please set up a GitHub token with the 'repo' scope (classic token) or\n\
         'Contents: read and write' plus 'Pull requests: read' (fine-grained token).\n\
         Once that is done, set the environment variable\n  {TOKEN_ENV_VAR}\n\
         to the value of that token, or pass it with --token."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::FixedEnvironment;

    #[test]
    fn explicit_token_wins() {
        let opts = RunOptions {
            token: Some("from-flag".into()),
            ..Default::default()
        };
        let env = FixedEnvironment::new().with_var(TOKEN_ENV_VAR, "from-env");

        assert_eq!(resolve_token(&opts, &env).unwrap(), "from-flag");
    }

    #[test]
    fn environment_is_the_fallback() {
        let env = FixedEnvironment::new().with_var(TOKEN_ENV_VAR, "from-env");

        assert_eq!(
            resolve_token(&RunOptions::default(), &env).unwrap(),
            "from-env"
        );
    }

    #[test]
    fn missing_or_empty_token_is_an_error() {
        assert_eq!(
            resolve_token(&RunOptions::default(), &FixedEnvironment::new()),
            Err(ReleaseError::MissingToken)
        );

        let env = FixedEnvironment::new().with_var(TOKEN_ENV_VAR, "");
        assert_eq!(
            resolve_token(&RunOptions::default(), &env),
            Err(ReleaseError::MissingToken)
        );
    }
}
