//! The fixed table of portfolio templates.
//!
//! All three templates share one renderer; a [`Theme`] only carries the
//! colors and layout switches that differ between them.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
	#[default]
	Minimal,
	Classic,
	Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
	/// Single column, sections stacked top to bottom.
	Stacked,
	/// Narrow sidebar with skills, languages, certifications and education.
	Sidebar,
}

#[derive(Debug, Clone, Serialize)]
pub struct Theme {
	pub kind: TemplateKind,
	pub name: &'static str,
	pub description: &'static str,
	pub tag: &'static str,
	pub accent_color: &'static str,
	pub background_color: &'static str,
	pub text_color: &'static str,
	pub card_color: &'static str,
	pub border_color: &'static str,
	pub muted_color: &'static str,
	pub font_family: &'static str,
	pub max_width: &'static str,
	pub section_gap: &'static str,
	pub layout: Layout,
	/// Sticky top bar with the name and in-page links.
	pub show_nav: bool,
	pub numbered_titles: bool,
	/// Render every word after the first in the accent color.
	pub split_name: bool,
	/// Shown in the hero when the resume has no role to headline.
	pub role_fallback: Option<&'static str>,
}

static MINIMAL: Theme = Theme {
	kind: TemplateKind::Minimal,
	name: "Minimal",
	description: "Clean and distraction-free. Let your work speak for itself.",
	tag: "Most Popular",
	accent_color: "#6366f1",
	background_color: "#0f0f0f",
	text_color: "#f5f5f5",
	card_color: "#1a1a1a",
	border_color: "#2a2a2a",
	muted_color: "#a1a1aa",
	font_family: "system-ui, sans-serif",
	max_width: "800px",
	section_gap: "4rem",
	layout: Layout::Stacked,
	show_nav: true,
	numbered_titles: false,
	split_name: false,
	role_fallback: None,
};

static CLASSIC: Theme = Theme {
	kind: TemplateKind::Classic,
	name: "Classic",
	description: "Professional two-column layout. Perfect for corporate roles.",
	tag: "Professional",
	accent_color: "#10b981",
	background_color: "#111827",
	text_color: "#f9fafb",
	card_color: "#1f2937",
	border_color: "#374151",
	muted_color: "#9ca3af",
	font_family: "Georgia, serif",
	max_width: "860px",
	section_gap: "2.5rem",
	layout: Layout::Sidebar,
	show_nav: false,
	numbered_titles: false,
	split_name: false,
	role_fallback: None,
};

static BOLD: Theme = Theme {
	kind: TemplateKind::Bold,
	name: "Bold",
	description: "High contrast and expressive. Stand out from the crowd.",
	tag: "Creative",
	accent_color: "#f59e0b",
	background_color: "#09090b",
	text_color: "#fafafa",
	card_color: "#18181b",
	border_color: "#27272a",
	muted_color: "#71717a",
	font_family: "system-ui, sans-serif",
	max_width: "900px",
	section_gap: "5rem",
	layout: Layout::Stacked,
	show_nav: false,
	numbered_titles: true,
	split_name: true,
	role_fallback: Some("Developer"),
};

impl TemplateKind {
	pub const ALL: [TemplateKind; 3] = [Self::Minimal, Self::Classic, Self::Bold];

	/// Resolves a template identifier. Unknown identifiers fall back to minimal.
	pub fn resolve(id: &str) -> Self {
		Self::parse(id).unwrap_or_else(|| {
			tracing::debug!(template = id, "unknown template, falling back to minimal");
			Self::Minimal
		})
	}

	/// Strict variant of [`TemplateKind::resolve`].
	pub fn parse(id: &str) -> Option<Self> {
		match id.trim().to_ascii_lowercase().as_str() {
			"minimal" => Some(Self::Minimal),
			"classic" => Some(Self::Classic),
			"bold" => Some(Self::Bold),
			_ => None,
		}
	}

	pub fn id(self) -> &'static str {
		match self {
			Self::Minimal => "minimal",
			Self::Classic => "classic",
			Self::Bold => "bold",
		}
	}

	pub fn theme(self) -> &'static Theme {
		match self {
			Self::Minimal => &MINIMAL,
			Self::Classic => &CLASSIC,
			Self::Bold => &BOLD,
		}
	}
}

impl fmt::Display for TemplateKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.id())
	}
}

/// Every theme in display order.
pub fn catalog() -> impl Iterator<Item = &'static Theme> {
	TemplateKind::ALL.into_iter().map(TemplateKind::theme)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_lookup_table() {
		assert_eq!(TemplateKind::resolve("minimal").theme().accent_color, "#6366f1");
		assert_eq!(TemplateKind::resolve("classic").theme().accent_color, "#10b981");
		assert_eq!(TemplateKind::resolve("bold").theme().accent_color, "#f59e0b");
		assert_eq!(TemplateKind::resolve("bold").theme().background_color, "#09090b");
	}

	#[test]
	fn test_unknown_falls_back_to_minimal() {
		assert_eq!(TemplateKind::resolve("fancy"), TemplateKind::Minimal);
		assert_eq!(TemplateKind::resolve(""), TemplateKind::Minimal);
		assert_eq!(TemplateKind::parse("fancy"), None);
	}

	#[test]
	fn test_resolve_ignores_case_and_whitespace() {
		assert_eq!(TemplateKind::resolve(" Bold "), TemplateKind::Bold);
		assert_eq!(TemplateKind::resolve("CLASSIC"), TemplateKind::Classic);
	}

	#[test]
	fn test_catalog_order() {
		let ids: Vec<_> = catalog().map(|t| t.kind.id()).collect();
		assert_eq!(ids, ["minimal", "classic", "bold"]);
	}
}
