use folio::{
	render_portfolio, Contact, Education, Experience, PortfolioSession, Project, ResumeRecord,
	TemplateKind,
};

fn name_only(name: &str) -> ResumeRecord {
	ResumeRecord {
		contact: Contact {
			name: Some(name.to_string()),
			..Default::default()
		},
		..Default::default()
	}
}

fn populated() -> ResumeRecord {
	ResumeRecord {
		contact: Contact {
			name: Some("Grace Hopper".into()),
			email: Some("grace@example.com".into()),
			phone: Some("+1 555 0100".into()),
			location: Some("Arlington, VA".into()),
			github: Some("grace".into()),
			linkedin: Some("https://www.linkedin.com/in/grace".into()),
			website: Some("grace.example.com".into()),
		},
		summary: Some("Compiler pioneer.".into()),
		skills: vec!["COBOL".into(), "FLOW-MATIC".into()],
		experience: vec![Experience {
			role: "Rear Admiral".into(),
			company: "US Navy".into(),
			duration: "1943 - 1986".into(),
			location: None,
			highlights: vec!["Found the first actual bug".into()],
		}],
		projects: vec![Project {
			name: "A-0".into(),
			description: Some("One of the first compilers.".into()),
			url: None,
			github_url: Some("https://github.com/grace/a0".into()),
			tech_stack: vec!["UNIVAC I".into()],
		}],
		education: vec![Education {
			degree: "PhD".into(),
			institution: "Yale".into(),
			field_of_study: Some("Mathematics".into()),
			graduation_year: Some("1934".into()),
			gpa: None,
		}],
		certifications: vec!["Defense Distinguished Service Medal".into()],
		languages: vec!["English".into()],
	}
}

#[test]
fn empty_skills_render_no_skills_section() {
	let mut resume = populated();
	resume.skills.clear();
	for kind in TemplateKind::ALL {
		let html = render_portfolio(&resume, kind.id());
		assert!(!html.contains("id=\"skills\""), "{kind} rendered skills");
		assert!(html.contains("id=\"experience\""));
	}
}

#[test]
fn accent_color_follows_lookup_table() {
	let resume = populated();
	let cases = [
		("minimal", "#6366f1"),
		("classic", "#10b981"),
		("bold", "#f59e0b"),
		("does-not-exist", "#6366f1"),
	];
	for (template, accent) in cases {
		let html = render_portfolio(&resume, template);
		assert!(
			html.contains(&format!("--accent: {accent};")),
			"{template} should use {accent}"
		);
	}
}

#[test]
fn rendering_is_deterministic() {
	let resume = populated();
	for kind in TemplateKind::ALL {
		assert_eq!(
			render_portfolio(&resume, kind.id()),
			render_portfolio(&resume, kind.id())
		);
	}
}

#[test]
fn github_handle_is_normalized() {
	let mut resume = name_only("Alice");
	resume.contact.github = Some("alice".into());
	let html = render_portfolio(&resume, "minimal");
	assert!(html.contains("href=\"https://github.com/alice\""));

	resume.contact.github = Some("https://github.com/alice".into());
	let html = render_portfolio(&resume, "minimal");
	assert!(html.contains("href=\"https://github.com/alice\""));
	assert!(!html.contains("https://github.com/https://"));
}

#[test]
fn linkedin_normalized_independently() {
	let html = render_portfolio(&populated(), "classic");
	assert!(html.contains("href=\"https://github.com/grace\""));
	assert!(html.contains("href=\"https://www.linkedin.com/in/grace\""));
	assert!(html.contains("href=\"https://grace.example.com\""));
}

#[test]
fn name_only_record_renders_no_sections() {
	for kind in TemplateKind::ALL {
		let html = render_portfolio(&name_only("Barbara Liskov"), kind.id());
		assert!(html.starts_with("<!DOCTYPE html>"));
		assert!(html.trim_end().ends_with("</html>"));
		assert!(html.contains("Barbara"));
		assert!(!html.contains("<section"), "{kind} rendered a section");
		assert!(!html.contains("id=\"summary\""));
		assert!(!html.contains("class=\"contact\""));
	}
}

#[test]
fn missing_name_uses_placeholder_initial() {
	for kind in TemplateKind::ALL {
		let html = render_portfolio(&ResumeRecord::default(), kind.id());
		assert!(html.contains("<div class=\"avatar\">?</div>"));
		assert!(html.contains("<h1 class=\"name\"></h1>"));
		assert!(html.contains("<title>Portfolio</title>"));
	}
}

#[test]
fn field_values_are_escaped() {
	let mut resume = name_only("<script>alert(1)</script>");
	resume.skills = vec!["\"><img src=x onerror=alert(1)>".into()];
	resume.contact.website = Some("javascript:alert(1)".into());
	let html = render_portfolio(&resume, "bold");
	assert!(!html.contains("<script>"));
	assert!(!html.contains("<img"));
	assert!(html.contains("&lt;script&gt;"));
	assert!(!html.contains("href=\"javascript:"));
}

#[test]
fn profile_links_with_foreign_schemes_are_dropped() {
	let mut resume = name_only("Mallory");
	resume.contact.github = Some("javascript://%0Aalert(document.cookie)".into());
	resume.contact.linkedin = Some("data://text/html,<b>x".into());
	for kind in TemplateKind::ALL {
		let html = render_portfolio(&resume, kind.id());
		assert!(!html.contains("href=\"javascript:"), "{kind} linked javascript");
		assert!(!html.contains("href=\"data:"), "{kind} linked data");
		assert!(!html.contains(">GitHub</a>"));
		assert!(!html.contains(">LinkedIn</a>"));
	}
}

#[test]
fn partial_entries_still_render() {
	let mut resume = name_only("Ada");
	resume.projects = vec![Project {
		github_url: Some("https://github.com/ada/engine".into()),
		..Default::default()
	}];
	resume.education = vec![Education {
		field_of_study: Some("Mathematics".into()),
		..Default::default()
	}];
	let html = render_portfolio(&resume, "minimal");
	assert!(html.contains("id=\"projects\""));
	assert!(html.contains("href=\"https://github.com/ada/engine\""));
	assert!(html.contains("id=\"education\""));
	assert!(html.contains("Mathematics"));
	assert!(!html.contains("<h3></h3>"));
}

#[test]
fn output_is_self_contained() {
	let html = render_portfolio(&populated(), "minimal");
	assert!(!html.contains("<link"));
	assert!(!html.contains("<script"));
	assert!(html.contains("<style>"));
}

#[test]
fn session_export_matches_direct_render() {
	let mut session = PortfolioSession::new(folio::PortfolioData {
		resume: populated(),
		github: None,
	});
	session.select_template("classic");
	let export = session.export();
	assert_eq!(export.file_name, "grace-hopper-portfolio.html");
	assert_eq!(export.html, render_portfolio(&populated(), "classic"));
}
