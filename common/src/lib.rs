//! Shared job posting model used by the client and the dev API server.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Number of jobs requested by the home page preview.
pub const HOME_LIMIT: usize = 3;

/// Server-assigned job identifier.
///
/// Backends disagree on whether ids are numbers or strings, so both are
/// accepted on the way in. It always serializes as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for JobId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for JobId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for JobId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Int(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => JobId(s),
            RawId::Int(n) => JobId(n.to_string()),
        })
    }
}

/// Hiring company attached to a posting.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Company {
    pub name: String,
    pub description: String,
    pub contact_email: String,
    pub contact_phone: String,
}

/// A job posting as the REST API stores it.
///
/// The client never validates postings. Missing fields decode as empty and
/// any field not listed here is kept in `extra` and written back untouched.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Job {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<JobId>,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub salary: String,
    pub location: String,
    pub company: Company,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Job {
    /// Returns a copy carrying the given id.
    pub fn with_id(mut self, id: impl Into<JobId>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Which slice of the job collection a listing shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListMode {
    /// Preview of the most recent few jobs.
    Home,
    /// Every job the API returns.
    #[default]
    Full,
}

impl ListMode {
    pub fn from_home_flag(is_home: bool) -> Self {
        if is_home { ListMode::Home } else { ListMode::Full }
    }

    /// Result-count constraint sent with the listing request, if any.
    pub fn limit(self) -> Option<usize> {
        match self {
            ListMode::Home => Some(HOME_LIMIT),
            ListMode::Full => None,
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            ListMode::Home => "Recent Jobs",
            ListMode::Full => "All Jobs",
        }
    }
}
