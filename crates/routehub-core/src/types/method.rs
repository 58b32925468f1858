//! Request methods and method sets used in route keys.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A request method a route can accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `HEAD`
    Head,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
    /// `OPTIONS`
    Options,
    /// `TRACE`
    Trace,
}

impl HttpMethod {
    /// Canonical upper-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "HEAD" => Ok(Self::Head),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            "OPTIONS" => Ok(Self::Options),
            "TRACE" => Ok(Self::Trace),
            other => Err(AppError::metadata_extraction(format!(
                "Unknown request method '{other}'"
            ))),
        }
    }
}

/// Set of accepted methods. An empty set accepts any method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MethodSet(BTreeSet<HttpMethod>);

impl MethodSet {
    /// The set that accepts any method.
    pub fn any() -> Self {
        Self(BTreeSet::new())
    }

    /// A set holding exactly one method.
    pub fn single(method: HttpMethod) -> Self {
        Self(BTreeSet::from([method]))
    }

    /// Returns `true` when a request with `method` is accepted.
    pub fn accepts(&self, method: HttpMethod) -> bool {
        self.0.is_empty() || self.0.contains(&method)
    }

    /// Returns `true` for the accept-any set.
    pub fn is_any(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the explicit methods in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &HttpMethod> {
        self.0.iter()
    }
}

impl FromIterator<HttpMethod> for MethodSet {
    fn from_iter<I: IntoIterator<Item = HttpMethod>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for MethodSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("*");
        }
        let names: Vec<&str> = self.0.iter().map(HttpMethod::as_str).collect();
        f.write_str(&names.join("|"))
    }
}
