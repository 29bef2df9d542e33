//! Newtype identifiers and hierarchical resource names.
//!
//! Every identifier the service understands is represented as a distinct
//! newtype wrapping a `String`. This prevents accidentally interchanging, for
//! example, a [`ProjectId`] with a [`JobId`] even though both are strings.
//!
//! Resource names compose these identifiers:
//!
//! - [`ParentName`]: `projects/{project}/locations/{location}`
//! - [`JobName`]: `projects/{project}/locations/{location}/jobs/{job}`

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for resource-name segments.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! segment_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty,
            /// contains a `/`, or contains whitespace.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if is_valid_segment(&v) { Some(Self(v)) } else { None }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

fn is_valid_segment(value: &str) -> bool {
    !value.is_empty() && !value.contains('/') && !value.chars().any(char::is_whitespace)
}

// ---------------------------------------------------------------------------
// Identifiers — resource-name segments
// ---------------------------------------------------------------------------

segment_id! {
    /// Identifies the cloud project that owns a job (e.g. `"my-project"`).
    ProjectId
}

segment_id! {
    /// Identifies the service region a job runs in (e.g. `"us-central1"`).
    LocationId
}

segment_id! {
    /// Identifies a job within a project and location.
    ///
    /// Assigned by the service on creation; usually a UUID string.
    JobId
}

// ---------------------------------------------------------------------------
// Resource names
// ---------------------------------------------------------------------------

/// Why a resource name could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceNameError {
    /// The name does not follow `projects/{id}/locations/{loc}/jobs/{job}`.
    #[error("resource name '{name}' does not match '{expected}'")]
    Malformed {
        /// The rejected input.
        name: String,
        /// The expected pattern.
        expected: &'static str,
    },
}

/// The collection a job is created under: `projects/{project}/locations/{location}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParentName {
    project: ProjectId,
    location: LocationId,
}

impl ParentName {
    const PATTERN: &'static str = "projects/{project}/locations/{location}";

    /// Creates the parent name for `project` in `location`.
    pub fn new(project: ProjectId, location: LocationId) -> Self {
        Self { project, location }
    }

    /// Returns the project segment.
    pub fn project(&self) -> &ProjectId {
        &self.project
    }

    /// Returns the location segment.
    pub fn location(&self) -> &LocationId {
        &self.location
    }

    /// Returns the full name of job `job` under this parent.
    pub fn job(&self, job: JobId) -> JobName {
        JobName {
            parent: self.clone(),
            job,
        }
    }
}

impl std::fmt::Display for ParentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "projects/{}/locations/{}", self.project, self.location)
    }
}

impl FromStr for ParentName {
    type Err = ResourceNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ResourceNameError::Malformed {
            name: s.to_string(),
            expected: Self::PATTERN,
        };
        match s.split('/').collect::<Vec<_>>().as_slice() {
            ["projects", project, "locations", location] => Ok(Self::new(
                ProjectId::new(*project).ok_or_else(malformed)?,
                LocationId::new(*location).ok_or_else(malformed)?,
            )),
            _ => Err(malformed()),
        }
    }
}

/// The full name of a job: `projects/{project}/locations/{location}/jobs/{job}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobName {
    parent: ParentName,
    job: JobId,
}

impl JobName {
    const PATTERN: &'static str = "projects/{project}/locations/{location}/jobs/{job}";

    /// Returns the collection this job belongs to.
    pub fn parent(&self) -> &ParentName {
        &self.parent
    }

    /// Returns the job segment.
    pub fn job_id(&self) -> &JobId {
        &self.job
    }
}

impl std::fmt::Display for JobName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/jobs/{}", self.parent, self.job)
    }
}

impl FromStr for JobName {
    type Err = ResourceNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ResourceNameError::Malformed {
            name: s.to_string(),
            expected: Self::PATTERN,
        };
        match s.split('/').collect::<Vec<_>>().as_slice() {
            ["projects", project, "locations", location, "jobs", job] => {
                let parent = ParentName::new(
                    ProjectId::new(*project).ok_or_else(malformed)?,
                    LocationId::new(*location).ok_or_else(malformed)?,
                );
                Ok(parent.job(JobId::new(*job).ok_or_else(malformed)?))
            }
            _ => Err(malformed()),
        }
    }
}

// ---------------------------------------------------------------------------
// Storage locations
// ---------------------------------------------------------------------------

/// A scheme-qualified storage location such as `gs://bucket/input.mp4`.
///
/// Only the syntax is checked: a scheme (`[A-Za-z][A-Za-z0-9+.-]*`), the
/// `://` separator, and a non-empty remainder. Whether the object exists is
/// for the service to decide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StorageUri(String);

impl StorageUri {
    /// Creates a storage URI, returning `None` if `value` is not scheme-qualified.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let v = value.into();
        let (scheme, rest) = v.split_once("://")?;
        let mut chars = scheme.chars();
        let scheme_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if scheme_ok && !rest.is_empty() && !v.chars().any(char::is_whitespace) {
            Some(Self(v))
        } else {
            None
        }
    }

    /// Returns the URI scheme (e.g. `"gs"`).
    pub fn scheme(&self) -> &str {
        self.0.split_once("://").map_or("", |(scheme, _)| scheme)
    }

    /// Returns the URI as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StorageUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers — UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single CLI invocation.
///
/// Generated fresh for every run and recorded on the root span so all activity
/// from one invocation can be correlated in exported traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvocationId(Uuid);

impl InvocationId {
    /// Generates a new random invocation identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying [`Uuid`].
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for InvocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
