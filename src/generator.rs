use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::export::Exporter;
use crate::resume::{load_portfolio, ResumeFormat, ResumeRecord};
use crate::theme::TemplateKind;

/// Batch export of one resume file or a directory of them.
pub struct Generator {
	input: PathBuf,
	config: Config,
	exporter: Exporter,
}

#[derive(Debug, Default)]
pub struct BuildReport {
	pub written: Vec<PathBuf>,
	pub skipped: Vec<PathBuf>,
}

impl Generator {
	pub fn new(
		input: PathBuf,
		output_dir: Option<PathBuf>,
		config_path: Option<PathBuf>,
	) -> Result<Self> {
		let config = Config::load(config_path.as_deref())?;
		Ok(Self::with_config(input, output_dir, config))
	}

	pub fn with_config(input: PathBuf, output_dir: Option<PathBuf>, config: Config) -> Self {
		let output_dir = output_dir.unwrap_or_else(|| config.export.output_dir.clone());
		let exporter = Exporter::new(&output_dir).with_suffix(config.export.file_suffix.clone());
		Self {
			input,
			config,
			exporter,
		}
	}

	/// Exports every resume found under the input. `template` overrides the
	/// configured default.
	pub fn build(&self, template: Option<&str>) -> Result<BuildReport> {
		let kind = TemplateKind::resolve(template.unwrap_or(&self.config.export.template));
		let sources = self.collect_sources()?;
		if sources.is_empty() {
			bail!("no resume files found in {}", self.input.display());
		}

		fs::create_dir_all(self.exporter.output_dir()).with_context(|| {
			format!(
				"Failed to create output directory: {}",
				self.exporter.output_dir().display()
			)
		})?;

		let mut report = BuildReport::default();
		let mut taken = HashSet::new();
		for source in sources {
			let data = match load_portfolio(&source) {
				Ok(data) => data,
				// A single explicit input has nothing to fall back to
				Err(e) if self.input.is_file() => return Err(e.into()),
				Err(e) => {
					tracing::warn!("skipping {}: {}", source.display(), e);
					report.skipped.push(source);
					continue;
				}
			};
			let path = self.unique_path(&data.resume, &mut taken);
			self.exporter.write_to(&data.resume, kind, &path)?;
			report.written.push(path);
		}

		tracing::info!(
			written = report.written.len(),
			skipped = report.skipped.len(),
			template = %kind,
			"build finished"
		);
		Ok(report)
	}

	fn collect_sources(&self) -> Result<Vec<PathBuf>> {
		if self.input.is_file() {
			return Ok(vec![self.input.clone()]);
		}
		if !self.input.exists() {
			bail!("input not found: {}", self.input.display());
		}

		let mut sources: Vec<PathBuf> = WalkDir::new(&self.input)
			.follow_links(true)
			.into_iter()
			.filter_map(|e| e.ok())
			.map(|e| e.into_path())
			.filter(|p| p.is_file())
			.filter(|p| ResumeFormat::from_path(p).is_some())
			.filter(|p| p.file_name().and_then(|n| n.to_str()) != Some(DEFAULT_CONFIG_FILE))
			.filter(|p| !p.starts_with(self.exporter.output_dir()))
			.collect();

		// Walk order is filesystem dependent
		sources.sort();
		Ok(sources)
	}

	fn unique_path(&self, resume: &ResumeRecord, taken: &mut HashSet<String>) -> PathBuf {
		let name = self.exporter.file_name(resume);
		let mut candidate = name.clone();
		let mut n = 2;
		while !taken.insert(candidate.clone()) {
			candidate = numbered(&name, n);
			n += 1;
		}
		self.exporter.output_dir().join(candidate)
	}
}

fn numbered(file_name: &str, n: usize) -> String {
	match Path::new(file_name).extension().and_then(|e| e.to_str()) {
		Some(ext) => {
			let stem = &file_name[..file_name.len() - ext.len() - 1];
			format!("{stem}-{n}.{ext}")
		}
		None => format!("{file_name}-{n}"),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_numbered() {
		assert_eq!(numbered("ada-portfolio.html", 2), "ada-portfolio-2.html");
		assert_eq!(numbered("ada", 3), "ada-3");
	}

	#[test]
	fn test_build_directory() {
		let dir = tempfile::tempdir().unwrap();
		let input = dir.path().join("resumes");
		fs::create_dir_all(input.join("team")).unwrap();
		fs::write(input.join("ada.json"), r#"{"contact": {"name": "Ada"}}"#).unwrap();
		fs::write(input.join("team/ada.yaml"), "contact:\n  name: Ada\n").unwrap();
		fs::write(input.join("broken.json"), "{").unwrap();
		fs::write(input.join("notes.txt"), "ignored").unwrap();
		fs::write(input.join(DEFAULT_CONFIG_FILE), "[export]\n").unwrap();

		let output = dir.path().join("dist");
		let generator = Generator::with_config(input, Some(output.clone()), Config::default());
		let report = generator.build(Some("bold")).unwrap();

		assert_eq!(report.written.len(), 2);
		assert_eq!(report.skipped.len(), 1);
		assert!(output.join("ada-portfolio.html").exists());
		assert!(output.join("ada-portfolio-2.html").exists());
		let html = fs::read_to_string(output.join("ada-portfolio.html")).unwrap();
		assert!(html.contains("--accent: #f59e0b;"));
	}

	#[test]
	fn test_build_empty_input_fails() {
		let dir = tempfile::tempdir().unwrap();
		let generator = Generator::with_config(
			dir.path().to_path_buf(),
			Some(dir.path().join("dist")),
			Config::default(),
		);
		assert!(generator.build(None).is_err());
	}

	#[test]
	fn test_broken_single_file_is_an_error() {
		let dir = tempfile::tempdir().unwrap();
		let input = dir.path().join("resume.json");
		fs::write(&input, "not json").unwrap();
		let generator =
			Generator::with_config(input, Some(dir.path().join("dist")), Config::default());
		assert!(generator.build(None).is_err());
	}
}
