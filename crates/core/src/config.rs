//! Gate configuration loader.
//!
//! File (every key optional):
//! ```toml
//! [gate]
//! draft_permission = "VIEW_DRAFT_CONTENT"
//! error_page_link = "/page-not-found"
//!
//! [columns]
//! embargo = "Embargo"
//! expiry = "Expiry"
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

pub const DEFAULT_DRAFT_PERMISSION: &str = "VIEW_DRAFT_CONTENT";

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    EmptyColumn(&'static str),
}

impl From<std::io::Error> for ConfigError { fn from(e: std::io::Error) -> Self { ConfigError::Io(e) } }
impl From<toml::de::Error> for ConfigError { fn from(e: toml::de::Error) -> Self { ConfigError::Toml(e) } }

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "reading config: {e}"),
            ConfigError::Toml(e) => write!(f, "parsing config: {e}"),
            ConfigError::EmptyColumn(which) => write!(f, "column name for {which} must not be empty"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Toml(e) => Some(e),
            ConfigError::EmptyColumn(_) => None,
        }
    }
}

/// Storage column names for the two instants.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub embargo: String,
    pub expiry: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self { embargo: "Embargo".to_string(), expiry: "Expiry".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
struct GateSection {
    draft_permission: String,
    error_page_link: Option<String>,
}

impl Default for GateSection {
    fn default() -> Self {
        Self { draft_permission: DEFAULT_DRAFT_PERMISSION.to_string(), error_page_link: None }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GateToml {
    gate: GateSection,
    columns: ColumnNames,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// Permission that bypasses embargo and expiry.
    pub draft_permission: String,
    /// Designated not-found page. `None` = synthesize a fallback target.
    pub error_page_link: Option<String>,
    pub columns: ColumnNames,
}

impl Default for GateConfig {
    fn default() -> Self {
        let GateToml { gate, columns } = GateToml::default();
        Self { draft_permission: gate.draft_permission, error_page_link: gate.error_page_link, columns }
    }
}

impl GateConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&s)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let parsed: GateToml = toml::from_str(s)?;
        if parsed.columns.embargo.trim().is_empty() {
            return Err(ConfigError::EmptyColumn("embargo"));
        }
        if parsed.columns.expiry.trim().is_empty() {
            return Err(ConfigError::EmptyColumn("expiry"));
        }
        Ok(Self {
            draft_permission: parsed.gate.draft_permission,
            error_page_link: parsed.gate.error_page_link.filter(|l| !l.trim().is_empty()),
            columns: parsed.columns,
        })
    }

    /// Does `principal` hold the bypass permission?
    pub fn is_privileged(&self, principal: &Principal) -> bool {
        principal.permissions.contains(&self.draft_permission)
    }
}

/// Current caller as seen by the authorization collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Principal {
    pub permissions: BTreeSet<String>,
}

impl Principal {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_permissions<I, S>(perms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { permissions: perms.into_iter().map(Into::into).collect() }
    }
}
