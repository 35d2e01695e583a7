//! Resume records as produced by the external parsing backend, plus loading
//! from JSON, YAML or TOML files.
//!
//! The backend fills missing values with `""` and `[]`, so every field here
//! defaults and blank strings are treated as absent by the accessors.

use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{FolioError, Result};

/// Envelope returned by the parsing backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PortfolioData {
	pub resume: ResumeRecord,
	/// Enrichment payload from the backend. Kept opaque and never rendered.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub github: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResumeRecord {
	#[serde(deserialize_with = "null_as_default")]
	pub contact: Contact,
	pub summary: Option<String>,
	#[serde(deserialize_with = "null_as_default")]
	pub skills: Vec<String>,
	#[serde(deserialize_with = "null_as_default")]
	pub experience: Vec<Experience>,
	#[serde(deserialize_with = "null_as_default")]
	pub projects: Vec<Project>,
	#[serde(deserialize_with = "null_as_default")]
	pub education: Vec<Education>,
	#[serde(deserialize_with = "null_as_default")]
	pub certifications: Vec<String>,
	#[serde(deserialize_with = "null_as_default")]
	pub languages: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Contact {
	pub name: Option<String>,
	pub email: Option<String>,
	pub phone: Option<String>,
	pub location: Option<String>,
	pub github: Option<String>,
	pub linkedin: Option<String>,
	pub website: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Experience {
	pub role: String,
	pub company: String,
	pub duration: String,
	pub location: Option<String>,
	#[serde(deserialize_with = "null_as_default")]
	pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Project {
	pub name: String,
	pub description: Option<String>,
	pub url: Option<String>,
	pub github_url: Option<String>,
	#[serde(deserialize_with = "null_as_default")]
	pub tech_stack: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Education {
	pub degree: String,
	pub institution: String,
	pub field_of_study: Option<String>,
	#[serde(deserialize_with = "scalar_as_string")]
	pub graduation_year: Option<String>,
	#[serde(deserialize_with = "scalar_as_string")]
	pub gpa: Option<String>,
}

/// Returns the trimmed value when it is present and not blank.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
	value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Drops blank entries from a list field.
pub fn entries(values: &[String]) -> impl Iterator<Item = &str> {
	values.iter().map(|v| v.trim()).filter(|v| !v.is_empty())
}

impl Contact {
	pub fn name(&self) -> Option<&str> {
		non_blank(&self.name)
	}

	/// First character of the name, uppercased, or `?` when there is no name.
	pub fn initial(&self) -> String {
		self.name()
			.and_then(|n| n.chars().next())
			.map(|c| c.to_uppercase().collect())
			.unwrap_or_else(|| "?".to_string())
	}

	pub fn github_url(&self) -> Option<String> {
		non_blank(&self.github).and_then(|v| profile_url(v, "github.com", "https://github.com/"))
	}

	pub fn linkedin_url(&self) -> Option<String> {
		non_blank(&self.linkedin)
			.and_then(|v| profile_url(v, "linkedin.com", "https://linkedin.com/in/"))
	}

	pub fn website_url(&self) -> Option<String> {
		non_blank(&self.website).and_then(safe_href)
	}
}

impl Experience {
	pub fn is_empty(&self) -> bool {
		self.role.trim().is_empty()
			&& self.company.trim().is_empty()
			&& self.duration.trim().is_empty()
			&& entries(&self.highlights).next().is_none()
	}
}

impl Project {
	pub fn is_empty(&self) -> bool {
		self.name.trim().is_empty()
			&& non_blank(&self.description).is_none()
			&& non_blank(&self.url).is_none()
			&& non_blank(&self.github_url).is_none()
			&& entries(&self.tech_stack).next().is_none()
	}
}

impl Education {
	pub fn is_empty(&self) -> bool {
		self.degree.trim().is_empty()
			&& self.institution.trim().is_empty()
			&& non_blank(&self.field_of_study).is_none()
			&& non_blank(&self.graduation_year).is_none()
			&& non_blank(&self.gpa).is_none()
	}
}

impl ResumeRecord {
	/// The most recent (first) experience entry, when it names a role.
	pub fn headline(&self) -> Option<&Experience> {
		self.experience
			.iter()
			.find(|e| !e.is_empty())
			.filter(|e| !e.role.trim().is_empty())
	}

	pub fn has_summary(&self) -> bool {
		non_blank(&self.summary).is_some()
	}
}

/// The scheme of `value` when it starts with one, e.g. `javascript` in
/// `javascript:alert(1)`.
fn scheme(value: &str) -> Option<&str> {
	let (prefix, _) = value.split_once(':')?;
	let mut chars = prefix.chars();
	let is_scheme = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
		&& chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-'));
	is_scheme.then_some(prefix)
}

/// Turns a profile handle into a canonical URL. http and https URLs pass
/// through untouched; any other scheme yields `None`.
pub fn profile_url(value: &str, host: &str, base: &str) -> Option<String> {
	let value = value.trim();
	match scheme(value).map(str::to_ascii_lowercase).as_deref() {
		Some("http" | "https") => return Some(value.to_string()),
		Some(_) => return None,
		None => {}
	}
	let bare = value.strip_prefix("www.").unwrap_or(value);
	if bare.starts_with(&format!("{host}/")) {
		return Some(format!("https://{value}"));
	}
	Some(format!("{base}{}", value.trim_start_matches('@')))
}

/// Normalizes a free-form link for use in `href`. Scheme-less values get
/// `https://`; anything other than http, https or mailto yields `None`.
pub fn safe_href(value: &str) -> Option<String> {
	let value = value.trim();
	if value.is_empty() {
		return None;
	}
	match scheme(value).map(str::to_ascii_lowercase).as_deref() {
		Some("http" | "https" | "mailto") => Some(value.to_string()),
		Some(_) => None,
		None => Some(format!("https://{value}")),
	}
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
	Text(String),
	Integer(i64),
	Float(f64),
}

// Parsers emit years and GPAs as either strings or numbers.
fn scalar_as_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(Option::<Scalar>::deserialize(deserializer)?.map(|s| match s {
		Scalar::Text(t) => t,
		Scalar::Integer(i) => i.to_string(),
		Scalar::Float(f) => f.to_string(),
	}))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ResumeDocument {
	Envelope(PortfolioData),
	Bare(ResumeRecord),
}

impl From<ResumeDocument> for PortfolioData {
	fn from(doc: ResumeDocument) -> Self {
		match doc {
			ResumeDocument::Envelope(data) => data,
			ResumeDocument::Bare(resume) => PortfolioData {
				resume,
				github: None,
			},
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
	Json,
	Yaml,
	Toml,
}

impl ResumeFormat {
	pub fn from_path(path: &Path) -> Option<Self> {
		let ext = path.extension()?.to_str()?.to_ascii_lowercase();
		match ext.as_str() {
			"json" => Some(Self::Json),
			"yaml" | "yml" => Some(Self::Yaml),
			"toml" => Some(Self::Toml),
			_ => None,
		}
	}
}

/// Parses a resume document held in memory.
pub fn parse_portfolio(raw: &str, format: ResumeFormat, path: &Path) -> Result<PortfolioData> {
	let doc: ResumeDocument = match format {
		ResumeFormat::Json => serde_json::from_str(raw).map_err(|source| FolioError::Json {
			path: path.to_path_buf(),
			source,
		})?,
		ResumeFormat::Yaml => serde_yaml::from_str(raw).map_err(|source| FolioError::Yaml {
			path: path.to_path_buf(),
			source,
		})?,
		ResumeFormat::Toml => toml::from_str(raw).map_err(|source| FolioError::Toml {
			path: path.to_path_buf(),
			source,
		})?,
	};
	Ok(doc.into())
}

/// Reads a resume file, accepting either the backend envelope or a bare record.
pub fn load_portfolio(path: &Path) -> Result<PortfolioData> {
	let format = ResumeFormat::from_path(path).ok_or_else(|| FolioError::UnsupportedFormat {
		path: path.to_path_buf(),
	})?;
	let raw = fs::read_to_string(path).map_err(|source| FolioError::Read {
		path: path.to_path_buf(),
		source,
	})?;
	let data = parse_portfolio(&raw, format, path)?;
	tracing::debug!(
		path = %path.display(),
		name = data.resume.contact.name().unwrap_or("?"),
		"loaded resume"
	);
	Ok(data)
}
