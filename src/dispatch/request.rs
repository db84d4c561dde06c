//! # Request Grammar
//!
//! Dynamic call tokens understood by the dispatcher:
//!
//! | Token           | Level    | Meaning                                   |
//! |-----------------|----------|-------------------------------------------|
//! | `<name>_all`    | bulk     | run `<name>` on every instance, silently  |
//! | `<name>_all!`   | bulk     | run `<name>!` on every instance           |
//! | `<action>!`     | instance | run `<action>` and print a status line    |
//! | `<name>`        | instance | run `<name>`                              |
//!
//! A reporting request for an action ending in `?` is unsupported: predicates
//! have no banged form.

use crate::error::{CommandError, CommandResult};
use std::fmt;
use std::str::FromStr;

const BULK_SUFFIX: &str = "_all";
const BANG: char = '!';
const PREDICATE: char = '?';

/// Owner name used in errors for requests made at the top level
pub(crate) const TOP_LEVEL: &str = "Godredis";

/// A parsed (name, reporting-flag) pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperationRequest {
    pub name: String,
    pub reporting: bool,
}

impl OperationRequest {
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reporting: false,
        }
    }

    pub fn reporting(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reporting: true,
        }
    }

    /// Parse a top-level `<name>_all` or `<name>_all!` token
    pub fn parse_bulk(token: &str) -> CommandResult<Self> {
        let (body, reporting) = match token.strip_suffix(BANG) {
            Some(body) => (body, true),
            None => (token, false),
        };

        match body.strip_suffix(BULK_SUFFIX) {
            Some(name) if !name.is_empty() => Ok(Self {
                name: name.to_string(),
                reporting,
            }),
            _ => Err(CommandError::unsupported(TOP_LEVEL, token)),
        }
    }

    /// Parse an instance-level token: `<action>!` or a plain name
    pub fn parse_instance(token: &str) -> CommandResult<Self> {
        if token.is_empty() {
            return Err(CommandError::unsupported(TOP_LEVEL, token));
        }

        match token.strip_suffix(BANG) {
            Some(action) if action.is_empty() || action.ends_with(PREDICATE) => {
                Err(CommandError::unsupported(TOP_LEVEL, token))
            }
            Some(action) => Ok(Self::reporting(action)),
            None => Ok(Self::plain(token)),
        }
    }

    /// The token each instance receives when this request is broadcast
    pub fn instance_token(&self) -> String {
        if self.reporting {
            format!("{}{}", self.name, BANG)
        } else {
            self.name.clone()
        }
    }

    /// Whether the operation is a predicate (`connected?`)
    pub fn is_predicate(&self) -> bool {
        self.name.ends_with(PREDICATE)
    }
}

impl FromStr for OperationRequest {
    type Err = CommandError;

    /// Parses the bulk form
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_bulk(s)
    }
}

impl fmt::Display for OperationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.instance_token())
    }
}
