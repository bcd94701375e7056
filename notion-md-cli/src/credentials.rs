//! Integration token lookup.
//!
//! The token is an opaque bearer credential read from an environment variable
//! (`NOTION_TOKEN` unless configured otherwise). A missing token is fatal and
//! is checked before any file is read.

use std::env;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CredentialError {
    #[error("{var} environment variable is not set")]
    Missing { var: String },

    #[error("{var} environment variable is empty")]
    Empty { var: String },
}

impl CredentialError {
    fn var(&self) -> &str {
        match self {
            CredentialError::Missing { var } | CredentialError::Empty { var } => var,
        }
    }

    /// Instructions printed alongside the error.
    pub fn help(&self) -> String {
        let var = self.var();
        format!(
            "Please set your Notion API token:\n  \
            export {var}='ntn_your_token_here'\n\n\
            To get your token:\n  \
            1. Go to https://www.notion.so/my-integrations\n  \
            2. Create a new integration or use existing one\n  \
            3. Copy the 'Internal Integration Token'\n  \
            4. Share target pages with the integration"
        )
    }
}

/// Read the token from the process environment.
pub fn token_from_env(var: &str) -> Result<String, CredentialError> {
    token_from_lookup(var, |name| env::var(name).ok())
}

/// Read the token through `lookup`, which maps a variable name to its value.
pub fn token_from_lookup<F>(var: &str, lookup: F) -> Result<String, CredentialError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Err(CredentialError::Missing {
            var: var.to_string(),
        }),
        Some(value) if value.trim().is_empty() => Err(CredentialError::Empty {
            var: var.to_string(),
        }),
        Some(value) => Ok(value.trim().to_string()),
    }
}
