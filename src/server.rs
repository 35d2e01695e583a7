use anyhow::{Context, Result};
use axum::{
	extract::{Query, State},
	http::{header, StatusCode},
	response::{Html, IntoResponse, Response},
	routing::get,
	Json, Router,
};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::session::PortfolioSession;
use crate::theme::{catalog, TemplateKind};

pub type SharedSession = Arc<RwLock<PortfolioSession>>;

/// Local preview of a single resume, re-rendered on every request.
pub struct DevServer {
	input: PathBuf,
	config: Config,
	port: Option<u16>,
	template: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
	template: Option<String>,
}

impl DevServer {
	pub fn new(
		input: PathBuf,
		port: Option<u16>,
		template: Option<String>,
		config_path: Option<PathBuf>,
	) -> Result<Self> {
		let config = Config::load(config_path.as_deref())?;
		Ok(Self {
			input,
			config,
			port,
			template,
		})
	}

	pub async fn serve(&self) -> Result<()> {
		let mut session = PortfolioSession::load(&self.input)
			.with_context(|| format!("Failed to load resume: {}", self.input.display()))?
			.with_suffix(self.config.export.file_suffix.clone());
		session.select_template(self.template.as_deref().unwrap_or(&self.config.export.template));
		let session: SharedSession = Arc::new(RwLock::new(session));

		// Keep the watcher alive for as long as the server runs
		let _watcher = if self.config.server.watch {
			let watcher = self.watch(Arc::clone(&session))?;
			if let Some(source) = session.read().await.source() {
				tracing::info!("Watching {} for changes...", source.display());
			}
			Some(watcher)
		} else {
			None
		};

		let app = router(session).layer(TraceLayer::new_for_http());

		let port = self.port.unwrap_or(self.config.server.port);
		let addr: SocketAddr = format!("{}:{}", self.config.server.host, port)
			.parse()
			.context("server.host must be an IP address")?;
		let listener = tokio::net::TcpListener::bind(addr).await?;

		tracing::info!("Preview server running at http://{addr}");

		axum::serve(listener, app).await?;
		Ok(())
	}

	fn watch(&self, session: SharedSession) -> Result<RecommendedWatcher> {
		// The watcher callback runs on notify's thread
		let rt = tokio::runtime::Handle::current();
		// Editors often save by renaming over the file, so watch the directory
		let target = self.input.file_name().map(|n| n.to_os_string());
		let dir = match self.input.parent() {
			Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
			_ => PathBuf::from("."),
		};

		let mut watcher = notify::recommended_watcher(move |event: notify::Result<notify::Event>| {
			let event = match event {
				Ok(event) => event,
				Err(e) => {
					tracing::warn!("watch error: {e}");
					return;
				}
			};
			if !(event.kind.is_modify() || event.kind.is_create()) {
				return;
			}
			if !event.paths.iter().any(|p| p.file_name() == target.as_deref()) {
				return;
			}
			let session = Arc::clone(&session);
			rt.spawn(async move {
				let mut session = session.write().await;
				match session.reload() {
					Ok(()) => tracing::info!("reloaded resume"),
					Err(e) => tracing::error!("reload failed, keeping previous resume: {e}"),
				}
			});
		})?;

		watcher.watch(&dir, RecursiveMode::NonRecursive)?;
		Ok(watcher)
	}
}

pub fn router(session: SharedSession) -> Router {
	Router::new()
		.route("/", get(serve_preview))
		.route("/download", get(serve_download))
		.route("/templates", get(serve_templates))
		.route("/health", get(health))
		.with_state(session)
}

fn pick_template(session: &PortfolioSession, query: &PreviewQuery) -> TemplateKind {
	query
		.template
		.as_deref()
		.map(TemplateKind::resolve)
		.unwrap_or_else(|| session.template())
}

async fn serve_preview(
	State(session): State<SharedSession>,
	Query(query): Query<PreviewQuery>,
) -> Html<String> {
	let session = session.read().await;
	let kind = pick_template(&session, &query);
	Html(session.export_with(kind).html)
}

async fn serve_download(
	State(session): State<SharedSession>,
	Query(query): Query<PreviewQuery>,
) -> Response {
	let session = session.read().await;
	let kind = pick_template(&session, &query);
	let export = session.export_with(kind);
	let disposition = format!("attachment; filename=\"{}\"", export.file_name);

	(
		StatusCode::OK,
		[
			(header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
			(header::CONTENT_DISPOSITION, disposition),
		],
		export.html,
	)
		.into_response()
}

async fn serve_templates(State(session): State<SharedSession>) -> Json<Value> {
	let selected = session.read().await.template();
	Json(json!({
		"selected": selected,
		"templates": catalog().collect::<Vec<_>>(),
	}))
}

async fn health() -> Json<Value> {
	Json(json!({
		"status": "ok",
		"version": env!("CARGO_PKG_VERSION"),
		"service": "folio-preview"
	}))
}
