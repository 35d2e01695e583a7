use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::generator::Generator;
use crate::server::DevServer;
use crate::theme::{catalog, TemplateKind};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Turn a structured resume into a self-contained static portfolio page")]
#[command(version)]
pub struct Cli {
	/// Verbose logging (overridden by RUST_LOG)
	#[arg(short, long, global = true)]
	pub verbose: bool,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Export portfolio pages
	Build {
		/// Resume file or directory of resume files
		#[arg(short, long, default_value = "resume.json")]
		input: PathBuf,

		/// Output directory (default: export.output_dir from config)
		#[arg(short, long)]
		output: Option<PathBuf>,

		/// Template (minimal, classic, bold)
		#[arg(short, long)]
		template: Option<String>,

		/// Configuration file
		#[arg(short, long)]
		config: Option<PathBuf>,
	},

	/// Start the preview server
	Dev {
		/// Resume file
		#[arg(short, long, default_value = "resume.json")]
		input: PathBuf,

		/// Port to serve on (default: server.port from config)
		#[arg(short, long)]
		port: Option<u16>,

		/// Template (minimal, classic, bold)
		#[arg(short, long)]
		template: Option<String>,

		/// Configuration file
		#[arg(short, long)]
		config: Option<PathBuf>,
	},

	/// Initialize a new project with a sample resume
	Init {
		/// Directory to initialize
		#[arg(default_value = ".")]
		dir: PathBuf,
	},

	/// List available templates
	Templates,
}

const SAMPLE_RESUME: &str = r#"{
  "resume": {
    "contact": {
      "name": "Ada Lovelace",
      "email": "ada@example.com",
      "location": "London",
      "github": "ada",
      "linkedin": "ada-lovelace",
      "website": "https://ada.example.com"
    },
    "summary": "Mathematician writing programs for machines that do not exist yet.",
    "skills": ["Rust", "Mathematics", "Technical writing"],
    "experience": [
      {
        "role": "Analyst",
        "company": "Analytical Engine Project",
        "duration": "1842 - 1843",
        "highlights": [
          "Translated and annotated Menabrea's paper on the engine",
          "Published the first algorithm intended for a machine"
        ]
      }
    ],
    "projects": [
      {
        "name": "Note G",
        "description": "Computes Bernoulli numbers on the Analytical Engine.",
        "github_url": "https://github.com/ada/note-g",
        "tech_stack": ["Punch cards"]
      }
    ],
    "education": [
      {
        "degree": "Private tutoring",
        "institution": "Augustus De Morgan",
        "field_of_study": "Mathematics"
      }
    ],
    "certifications": [],
    "languages": ["English", "French"]
  },
  "github": null
}
"#;

impl Cli {
	pub async fn run(self) -> Result<()> {
		match self.command {
			Commands::Build {
				input,
				output,
				template,
				config,
			} => {
				warn_unknown_template(template.as_deref());
				let generator = Generator::new(input, output, config)?;
				let report = generator.build(template.as_deref())?;
				for path in &report.written {
					println!("{}", path.display());
				}
				if !report.skipped.is_empty() {
					println!("Skipped {} file(s); see warnings above.", report.skipped.len());
				}
			}
			Commands::Dev {
				input,
				port,
				template,
				config,
			} => {
				warn_unknown_template(template.as_deref());
				let server = DevServer::new(input, port, template, config)?;
				server.serve().await?;
			}
			Commands::Init { dir } => init_project(&dir)?,
			Commands::Templates => {
				for theme in catalog() {
					println!(
						"{:<8} {:<8} {:<13} {}",
						theme.kind.id(),
						theme.accent_color,
						theme.tag,
						theme.description
					);
				}
			}
		}
		Ok(())
	}
}

fn warn_unknown_template(template: Option<&str>) {
	if let Some(id) = template {
		if TemplateKind::parse(id).is_none() {
			tracing::warn!("unknown template '{id}', using minimal");
		}
	}
}

fn init_project(dir: &Path) -> Result<()> {
	fs::create_dir_all(dir)
		.with_context(|| format!("Failed to create directory: {}", dir.display()))?;

	let resume_path = dir.join("resume.json");
	let config_path = dir.join(DEFAULT_CONFIG_FILE);
	for path in [&resume_path, &config_path] {
		if path.exists() {
			bail!("{} already exists", path.display());
		}
	}

	fs::write(&resume_path, SAMPLE_RESUME)
		.with_context(|| format!("Failed to write {}", resume_path.display()))?;
	Config::default().save(&config_path)?;

	println!("Initialized project in {}", dir.display());
	println!("Run `folio dev` to preview or `folio build` to export.");
	Ok(())
}
