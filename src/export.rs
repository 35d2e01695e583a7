use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{FolioError, Result};
use crate::resume::ResumeRecord;
use crate::templates::TemplateEngine;
use crate::theme::TemplateKind;

pub const DEFAULT_FILE_SUFFIX: &str = "-portfolio.html";

/// Renders `resume` with the named template. Unknown template ids use the
/// minimal theme. Pure: identical input gives byte-identical output.
pub fn render_portfolio(resume: &ResumeRecord, template: &str) -> String {
	TemplateEngine::new().render(resume, TemplateKind::resolve(template))
}

/// File name for a downloaded portfolio: the person's name lowercased with
/// whitespace runs turned into hyphens, then `suffix`.
pub fn portfolio_file_name(resume: &ResumeRecord, suffix: &str) -> String {
	let stem = resume
		.contact
		.name()
		.map(|name| {
			name.split_whitespace()
				.map(|word| {
					word.chars()
						.filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
						.flat_map(char::to_lowercase)
						.collect::<String>()
				})
				.filter(|word| !word.is_empty())
				.collect::<Vec<_>>()
				.join("-")
		})
		.map(|stem| stem.trim_start_matches('.').to_string())
		.filter(|stem| !stem.is_empty())
		.unwrap_or_else(|| "untitled".to_string());
	format!("{stem}{suffix}")
}

pub struct Exporter {
	output_dir: PathBuf,
	file_suffix: String,
	engine: TemplateEngine,
}

impl Exporter {
	pub fn new(output_dir: &Path) -> Self {
		Self {
			output_dir: output_dir.to_path_buf(),
			file_suffix: DEFAULT_FILE_SUFFIX.to_string(),
			engine: TemplateEngine::new(),
		}
	}

	pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
		self.file_suffix = suffix.into();
		self
	}

	pub fn output_dir(&self) -> &Path {
		&self.output_dir
	}

	pub fn file_name(&self, resume: &ResumeRecord) -> String {
		portfolio_file_name(resume, &self.file_suffix)
	}

	pub fn render(&self, resume: &ResumeRecord, kind: TemplateKind) -> String {
		self.engine.render(resume, kind)
	}

	/// Renders and writes the portfolio under the output directory, returning
	/// the written path.
	pub fn write(&self, resume: &ResumeRecord, kind: TemplateKind) -> Result<PathBuf> {
		let path = self.output_dir.join(self.file_name(resume));
		self.write_to(resume, kind, &path)?;
		Ok(path)
	}

	pub fn write_to(&self, resume: &ResumeRecord, kind: TemplateKind, path: &Path) -> Result<()> {
		let html = self.render(resume, kind);
		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent).map_err(|source| FolioError::Write {
				path: parent.to_path_buf(),
				source,
			})?;
		}
		fs::write(path, html).map_err(|source| FolioError::Write {
			path: path.to_path_buf(),
			source,
		})?;
		tracing::info!(path = %path.display(), template = %kind, "wrote portfolio");
		Ok(())
	}
}
