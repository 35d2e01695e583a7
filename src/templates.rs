use maud::{html, Markup};
use regex::{Captures, Regex};
use std::cell::Cell;
use std::sync::LazyLock;

use crate::resume::{entries, non_blank, safe_href, Contact, ResumeRecord};
use crate::theme::{Layout, TemplateKind, Theme};

static PLACEHOLDER: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\{\{([A-Z_]+)\}\}").expect("placeholder pattern is valid"));

/// Fills `{{NAME}}` placeholders in one pass, so inserted values are never
/// scanned for further placeholders. Unknown names render as nothing.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
	PLACEHOLDER
		.replace_all(template, |caps: &Captures| {
			let key = &caps[1];
			values
				.iter()
				.find(|(name, _)| *name == key)
				.map(|(_, value)| value.to_string())
				.unwrap_or_default()
		})
		.into_owned()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
	Summary,
	Skills,
	Experience,
	Projects,
	Education,
	Languages,
	Certifications,
}

impl Section {
	fn anchor(self) -> &'static str {
		match self {
			Section::Summary => "summary",
			Section::Skills => "skills",
			Section::Experience => "experience",
			Section::Projects => "projects",
			Section::Education => "education",
			Section::Languages => "languages",
			Section::Certifications => "certifications",
		}
	}

	fn title(self) -> &'static str {
		match self {
			Section::Summary => "Profile",
			Section::Skills => "Skills",
			Section::Experience => "Experience",
			Section::Projects => "Projects",
			Section::Education => "Education",
			Section::Languages => "Languages",
			Section::Certifications => "Certifications",
		}
	}
}

pub struct TemplateEngine {
	base_template: &'static str,
	stylesheet: &'static str,
}

impl TemplateEngine {
	pub fn new() -> Self {
		Self {
			base_template: include_str!("../templates/base.html"),
			stylesheet: include_str!("../templates/portfolio.css"),
		}
	}

	/// Renders a complete standalone document. Never fails: absent fields are
	/// skipped and a missing name renders as `?`.
	pub fn render(&self, resume: &ResumeRecord, kind: TemplateKind) -> String {
		let theme = kind.theme();
		let page = Page {
			resume,
			theme,
			counter: Cell::new(0),
		};

		let page_title = match resume.contact.name() {
			Some(name) => format!("{name} | Portfolio"),
			None => "Portfolio".to_string(),
		};
		let page_title = html! { (page_title) }.into_string();
		let style = self.render_style(theme);
		let nav = if theme.show_nav {
			page.nav().into_string()
		} else {
			String::new()
		};
		let header = page.header().into_string();
		let body = match theme.layout {
			Layout::Stacked => page.stacked_body(),
			Layout::Sidebar => page.sidebar_body(),
		}
		.into_string();

		fill(
			self.base_template,
			&[
				("PAGE_TITLE", page_title.as_str()),
				("STYLE", style.as_str()),
				("TEMPLATE", kind.id()),
				("NAV", nav.as_str()),
				("HEADER", header.as_str()),
				("BODY", body.as_str()),
			],
		)
	}

	fn render_style(&self, theme: &Theme) -> String {
		fill(
			self.stylesheet,
			&[
				("ACCENT", theme.accent_color),
				("BACKGROUND", theme.background_color),
				("TEXT", theme.text_color),
				("CARD", theme.card_color),
				("BORDER", theme.border_color),
				("MUTED", theme.muted_color),
				("FONT", theme.font_family),
				("MAX_WIDTH", theme.max_width),
				("SECTION_GAP", theme.section_gap),
			],
		)
	}
}

impl Default for TemplateEngine {
	fn default() -> Self {
		Self::new()
	}
}

/// Per-render state. Sections are numbered in the order they are emitted.
struct Page<'a> {
	resume: &'a ResumeRecord,
	theme: &'static Theme,
	counter: Cell<usize>,
}

impl Page<'_> {
	fn is_present(&self, section: Section) -> bool {
		let r = self.resume;
		match section {
			Section::Summary => r.has_summary(),
			Section::Skills => entries(&r.skills).next().is_some(),
			Section::Experience => r.experience.iter().any(|e| !e.is_empty()),
			Section::Projects => r.projects.iter().any(|p| !p.is_empty()),
			Section::Education => r.education.iter().any(|e| !e.is_empty()),
			Section::Languages => entries(&r.languages).next().is_some(),
			Section::Certifications => entries(&r.certifications).next().is_some(),
		}
	}

	fn section(&self, section: Section) -> Option<Markup> {
		if !self.is_present(section) {
			return None;
		}
		let body = match section {
			Section::Summary => self.summary(),
			Section::Skills => self.pills(&self.resume.skills),
			Section::Experience => self.experience(),
			Section::Projects => self.projects(),
			Section::Education => self.education(),
			Section::Languages => self.pills(&self.resume.languages),
			Section::Certifications => self.bullets(&self.resume.certifications),
		};
		let number = self.counter.get() + 1;
		self.counter.set(number);

		Some(html! {
			section class="section" id=(section.anchor()) {
				div class="section-title" {
					@if self.theme.numbered_titles {
						span class="section-number" { (format!("{number:02}")) }
					}
					h2 { (section.title()) }
					@if self.theme.numbered_titles {
						div class="section-rule" {}
					}
				}
				(body)
			}
		})
	}

	fn sections(&self, list: &[Section]) -> Vec<Markup> {
		list.iter().filter_map(|s| self.section(*s)).collect()
	}

	fn nav(&self) -> Markup {
		let links: Vec<Section> = [Section::Experience, Section::Projects, Section::Education]
			.into_iter()
			.filter(|s| self.is_present(*s))
			.collect();
		html! {
			nav class="topnav" {
				span class="brand" { (self.resume.contact.name().unwrap_or_default()) }
				div class="links" {
					a href="#about" { "About" }
					@for section in &links {
						a href=(format!("#{}", section.anchor())) { (section.title()) }
					}
				}
			}
		}
	}

	fn header(&self) -> Markup {
		let contact = &self.resume.contact;
		let links = contact_links(contact);
		let name = contact.name().unwrap_or_default();
		let summary = match self.theme.layout {
			Layout::Stacked => non_blank(&self.resume.summary),
			Layout::Sidebar => None,
		};

		html! {
			header class="hero" id="about" {
				div class="hero-inner" {
					div class="identity" {
						div class="avatar" { (contact.initial()) }
						div {
							h1 class="name" {
								@if self.theme.split_name {
									@for (i, word) in name.split_whitespace().enumerate() {
										span class=(if i == 0 { "name-word" } else { "name-word accent" }) { (word) }
									}
								} @else {
									(name)
								}
							}
							@if let Some(role) = self.headline() {
								p class="role" { (role) }
							}
						}
					}
					@if !links.is_empty() {
						div class="contact" {
							@for link in &links { (link) }
						}
					}
					@if let Some(summary) = summary {
						p class="summary" id="summary" { (summary) }
					}
				}
			}
		}
	}

	fn headline(&self) -> Option<String> {
		match self.resume.headline() {
			Some(exp) => {
				let role = exp.role.trim();
				let company = exp.company.trim();
				if self.theme.layout == Layout::Sidebar && !company.is_empty() {
					Some(format!("{role} · {company}"))
				} else {
					Some(role.to_string())
				}
			}
			None => self.theme.role_fallback.map(str::to_string),
		}
	}

	fn stacked_body(&self) -> Markup {
		let main = self.sections(&[
			Section::Skills,
			Section::Experience,
			Section::Projects,
			Section::Education,
		]);
		let tail = self.sections(&[Section::Languages, Section::Certifications]);
		html! {
			main class="content" {
				@for section in &main { (section) }
				@if !tail.is_empty() {
					div class="split" {
						@for section in &tail { (section) }
					}
				}
			}
		}
	}

	fn sidebar_body(&self) -> Markup {
		let aside = self.sections(&[
			Section::Skills,
			Section::Languages,
			Section::Certifications,
			Section::Education,
		]);
		let main = self.sections(&[Section::Summary, Section::Experience, Section::Projects]);
		html! {
			div class="columns" {
				@if !aside.is_empty() {
					aside class="sidebar" {
						@for section in &aside { (section) }
					}
				}
				main class="content" {
					@for section in &main { (section) }
				}
			}
		}
	}

	fn summary(&self) -> Markup {
		html! {
			p class="summary" { (non_blank(&self.resume.summary).unwrap_or_default()) }
		}
	}

	fn pills(&self, values: &[String]) -> Markup {
		html! {
			div class="pills" {
				@for value in entries(values) {
					span class="pill" { (value) }
				}
			}
		}
	}

	fn bullets(&self, values: &[String]) -> Markup {
		html! {
			ul class="bullets" {
				@for value in entries(values) {
					li { (value) }
				}
			}
		}
	}

	fn experience(&self) -> Markup {
		html! {
			div class="entries" {
				@for exp in self.resume.experience.iter().filter(|e| !e.is_empty()) {
					article class="entry" {
						div class="entry-head" {
							div {
								h3 { (exp.role.trim()) }
								@if !exp.company.trim().is_empty() {
									p class="accent-text" { (exp.company.trim()) }
								}
							}
							@if !exp.duration.trim().is_empty() {
								span class="meta" { (exp.duration.trim()) }
							}
						}
						@if let Some(location) = non_blank(&exp.location) {
							p class="meta" { (location) }
						}
						@if entries(&exp.highlights).next().is_some() {
							ul class="highlights" {
								@for highlight in entries(&exp.highlights) {
									li { (highlight) }
								}
							}
						}
					}
				}
			}
		}
	}

	fn projects(&self) -> Markup {
		html! {
			div class="cards" {
				@for project in self.resume.projects.iter().filter(|p| !p.is_empty()) {
					@let source = non_blank(&project.github_url).and_then(safe_href);
					@let live = non_blank(&project.url).and_then(safe_href);
					div class="card" {
						div class="card-head" {
							@if !project.name.trim().is_empty() {
								h3 { (project.name.trim()) }
							}
							@if source.is_some() || live.is_some() {
								div class="card-links" {
									@if let Some(href) = &source {
										a href=(href) target="_blank" rel="noopener noreferrer" { "Code" }
									}
									@if let Some(href) = &live {
										a href=(href) target="_blank" rel="noopener noreferrer" { "Live ↗" }
									}
								}
							}
						}
						@if let Some(description) = non_blank(&project.description) {
							p { (description) }
						}
						@if entries(&project.tech_stack).next().is_some() {
							div class="tags" {
								@for tech in entries(&project.tech_stack) {
									span class="tag" { (tech) }
								}
							}
						}
					}
				}
			}
		}
	}

	fn education(&self) -> Markup {
		html! {
			div class="entries" {
				@for edu in self.resume.education.iter().filter(|e| !e.is_empty()) {
					article class="entry" {
						@if !edu.degree.trim().is_empty() {
							h3 { (edu.degree.trim()) }
						}
						@if !edu.institution.trim().is_empty() {
							p class="accent-text" { (edu.institution.trim()) }
						}
						@if let Some(field) = non_blank(&edu.field_of_study) {
							p class="meta" { (field) }
						}
						@if let Some(year) = non_blank(&edu.graduation_year) {
							p class="meta" { (year) }
						}
						@if let Some(gpa) = non_blank(&edu.gpa) {
							p class="meta" { "GPA: " (gpa) }
						}
					}
				}
			}
		}
	}
}

fn contact_links(contact: &Contact) -> Vec<Markup> {
	let mut links = Vec::new();
	if let Some(email) = non_blank(&contact.email) {
		links.push(html! {
			a class="contact-link" href=(format!("mailto:{email}")) { (email) }
		});
	}
	if let Some(phone) = non_blank(&contact.phone) {
		links.push(html! { span class="contact-link" { (phone) } });
	}
	if let Some(location) = non_blank(&contact.location) {
		links.push(html! { span class="contact-link" { (location) } });
	}
	if let Some(href) = contact.github_url() {
		links.push(external_link(&href, "GitHub"));
	}
	if let Some(href) = contact.linkedin_url() {
		links.push(external_link(&href, "LinkedIn"));
	}
	match (contact.website_url(), non_blank(&contact.website)) {
		(Some(href), _) => links.push(external_link(&href, "Website")),
		(None, Some(raw)) => links.push(html! { span class="contact-link" { (raw) } }),
		(None, None) => {}
	}
	links
}

fn external_link(href: &str, label: &str) -> Markup {
	html! {
		a class="contact-link" href=(href) target="_blank" rel="noopener noreferrer" { (label) }
	}
}
