//! Snapshot-backed data store.
//!
//! Loads the member and job collections once from a static JSON snapshot and
//! serves case-insensitive substring searches and aggregate statistics over
//! them. The collections are read-only after construction.

use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{error, info, warn};

use crate::error::AppError;
use crate::models::{CommunityStats, JobPosting, Member, NOT_AVAILABLE};

/// Number of results returned by a search when the caller has no preference.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Raw shape of the snapshot file. Records stay loosely typed until indexed.
#[derive(Debug, Default, Deserialize)]
struct Snapshot {
    #[serde(default)]
    users: Vec<Value>,
    #[serde(default)]
    jobs: Vec<Value>,
}

/// A typed record together with the lower-cased text it can be matched on.
#[derive(Debug, Clone)]
struct Indexed<T> {
    record: T,
    haystacks: Vec<String>,
}

impl<T: Clone> Indexed<T> {
    fn matches(&self, needle: &str) -> bool {
        self.haystacks.iter().any(|h| h.contains(needle))
    }
}

/// In-memory store of community members and job postings.
#[derive(Debug, Clone, Default)]
pub struct DataStore {
    members: Vec<Indexed<Member>>,
    jobs: Vec<Indexed<JobPosting>>,
}

impl DataStore {
    /// Loads the snapshot at `path`.
    ///
    /// A missing or malformed file is logged and yields an empty store; this
    /// never fails.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(store) => store,
            Err(AppError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                warn!("Data file {} not found", path.display());
                Self::default()
            }
            Err(e) => {
                error!("Failed to load data file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Loads the snapshot at `path`, reporting why it could not be read.
    pub fn try_load(path: &Path) -> Result<Self, AppError> {
        let raw = fs::read_to_string(path)?;
        let store = Self::from_json_str(&raw)?;
        info!(
            "Loaded {} members and {} jobs from {}",
            store.members.len(),
            store.jobs.len(),
            path.display()
        );
        Ok(store)
    }

    /// Parses a snapshot document held in memory.
    pub fn from_json_str(raw: &str) -> Result<Self, AppError> {
        let snapshot: Snapshot = serde_json::from_str(raw)?;
        Ok(Self::from_records(snapshot.users, snapshot.jobs))
    }

    /// Builds a store from already-decoded snapshot records.
    pub fn from_records(users: Vec<Value>, jobs: Vec<Value>) -> Self {
        Self {
            members: users.iter().map(index_member).collect(),
            jobs: jobs.iter().map(index_job).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty() && self.jobs.is_empty()
    }

    /// All members, in snapshot order.
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().map(|m| &m.record)
    }

    /// Finds members whose name, email, role or city contains `query`,
    /// ignoring case.
    ///
    /// Scanning stops once `limit` matches are collected, so the result is
    /// the first `limit` matches in snapshot order.
    pub fn search_members(&self, query: &str, limit: usize) -> Vec<Member> {
        search(&self.members, query, limit)
    }

    /// Finds jobs whose designation, company, location or description
    /// contains `query`, ignoring case. An empty query matches every job.
    pub fn search_jobs(&self, query: &str, limit: usize) -> Vec<JobPosting> {
        search(&self.jobs, query, limit)
    }

    /// Computes the aggregate counters over the full collections.
    pub fn statistics(&self) -> CommunityStats {
        CommunityStats {
            total_members: self.members.len(),
            total_jobs: self.jobs.len(),
            members_with_photo: self.members().filter(|m| m.has_photo).count(),
            members_with_work_history: self.members().filter(|m| m.has_work_history).count(),
        }
    }
}

fn search<T: Clone>(entries: &[Indexed<T>], query: &str, limit: usize) -> Vec<T> {
    let needle = query.to_lowercase();
    entries
        .iter()
        .filter(|entry| entry.matches(&needle))
        .take(limit)
        .map(|entry| entry.record.clone())
        .collect()
}

fn index_member(record: &Value) -> Indexed<Member> {
    let name = text(record, "name");
    let email = text(record, "primary_email");
    let role = text(record, "role");
    let city = text(record, "current-city");

    let haystacks = [&name, &email, &role, &city]
        .iter()
        .map(|field| field.as_deref().unwrap_or_default().to_lowercase())
        .collect();

    let member = Member {
        id: text(record, "unique_profile_id").unwrap_or_default(),
        name: name.unwrap_or_else(not_available),
        email: email.unwrap_or_else(not_available),
        role: role_code(record),
        city: city.unwrap_or_else(not_available),
        state: text(record, "current-state").unwrap_or_else(not_available),
        country: text(record, "current-country").unwrap_or_else(not_available),
        phone: optional_text(record, "primary_phone_number"),
        linkedin: optional_text(record, "profile_url_linkedin"),
        designation: optional_text(record, "designation"),
        company: optional_text(record, "company"),
        has_photo: is_truthy(record.get("profile_pic")),
        has_work_history: is_truthy(record.get("work_experiences")),
    };

    Indexed {
        record: member,
        haystacks,
    }
}

fn index_job(record: &Value) -> Indexed<JobPosting> {
    let designation = text(record, "designation");
    let company = text(record, "company");
    let location = text(record, "location");
    let description = text(record, "description");

    let haystacks = [&designation, &company, &location, &description]
        .iter()
        .map(|field| field.as_deref().unwrap_or_default().to_lowercase())
        .collect();

    let job = JobPosting {
        designation: designation.unwrap_or_else(not_available),
        company: company.unwrap_or_else(not_available),
        location: location.unwrap_or_else(not_available),
        job_type: text(record, "job_type").unwrap_or_else(not_available),
        description: description.filter(|d| !d.is_empty()),
    };

    Indexed {
        record: job,
        haystacks,
    }
}

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

/// Reads `key` as text. Numbers and booleans are rendered, `null` is absent.
fn text(record: &Value, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn optional_text(record: &Value, key: &str) -> Option<String> {
    text(record, key).filter(|s| !s.trim().is_empty())
}

fn role_code(record: &Value) -> i64 {
    match record.get("role") {
        Some(Value::Number(n)) => n.as_i64().unwrap_or_default(),
        Some(Value::String(s)) => s.trim().parse().unwrap_or_default(),
        _ => 0,
    }
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}
