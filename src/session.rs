//! Short-lived context carried through load → pick template → export.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::export::{portfolio_file_name, DEFAULT_FILE_SUFFIX};
use crate::resume::{load_portfolio, PortfolioData, ResumeRecord};
use crate::templates::TemplateEngine;
use crate::theme::TemplateKind;

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioExport {
	pub file_name: String,
	pub html: String,
}

#[derive(Debug, Clone)]
pub struct PortfolioSession {
	data: PortfolioData,
	template: TemplateKind,
	source: Option<PathBuf>,
	file_suffix: String,
}

impl PortfolioSession {
	pub fn new(data: PortfolioData) -> Self {
		Self {
			data,
			template: TemplateKind::default(),
			source: None,
			file_suffix: DEFAULT_FILE_SUFFIX.to_string(),
		}
	}

	pub fn load(path: &Path) -> Result<Self> {
		let mut session = Self::new(load_portfolio(path)?);
		session.source = Some(path.to_path_buf());
		Ok(session)
	}

	pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
		self.file_suffix = suffix.into();
		self
	}

	/// Re-reads the source file. The selected template is kept; on error the
	/// current record stays in place.
	pub fn reload(&mut self) -> Result<()> {
		if let Some(path) = &self.source {
			self.data = load_portfolio(path)?;
		}
		Ok(())
	}

	pub fn select_template(&mut self, id: &str) -> TemplateKind {
		self.template = TemplateKind::resolve(id);
		self.template
	}

	pub fn template(&self) -> TemplateKind {
		self.template
	}

	pub fn resume(&self) -> &ResumeRecord {
		&self.data.resume
	}

	pub fn source(&self) -> Option<&Path> {
		self.source.as_deref()
	}

	pub fn export(&self) -> PortfolioExport {
		self.export_with(self.template)
	}

	pub fn export_with(&self, kind: TemplateKind) -> PortfolioExport {
		PortfolioExport {
			file_name: portfolio_file_name(&self.data.resume, &self.file_suffix),
			html: TemplateEngine::new().render(&self.data.resume, kind),
		}
	}
}
