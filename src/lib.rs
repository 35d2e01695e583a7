pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod logger;
pub mod resume;
pub mod server;
pub mod session;
pub mod templates;
pub mod theme;

pub use config::Config;
pub use error::{FolioError, Result};
pub use export::{portfolio_file_name, render_portfolio, Exporter};
pub use resume::{
	load_portfolio, Contact, Education, Experience, PortfolioData, Project, ResumeRecord,
};
pub use session::{PortfolioExport, PortfolioSession};
pub use theme::{TemplateKind, Theme};
