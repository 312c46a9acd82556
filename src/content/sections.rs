use crate::config::PortfolioConfig;
use serde::Serialize;

const ABOUT: &str = include_str!("../../data/sections/about.md");
const RESEARCH_FOCUS: &str = include_str!("../../data/sections/research_focus.md");
const EDUCATION: &str = include_str!("../../data/sections/education.md");
const TEACHING: &str = include_str!("../../data/sections/teaching.md");
const SKILLS: &str = include_str!("../../data/sections/skills.md");
const AWARDS: &str = include_str!("../../data/sections/awards.md");

/// One text tab of the page, as markdown for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSection {
    pub id: String,
    pub heading: String,
    pub body_markdown: String,
}

impl PageSection {
    fn new(id: &str, heading: &str, body: &str) -> Self {
        Self {
            id: id.to_string(),
            heading: heading.to_string(),
            body_markdown: body.trim().to_string(),
        }
    }
}

fn contact_markdown(config: &PortfolioConfig) -> String {
    let profile = &config.profile;
    let mut lines = Vec::new();
    if let Some(affiliation) = &profile.affiliation {
        lines.push(format!("📍 Department of Physics, {}", affiliation));
    }
    if let Some(email) = &profile.email {
        lines.push(format!("📧 **Email:** [{0}](mailto:{0})", email));
    }
    lines.join("\n\n")
}

/// Text tabs in display order. Publications, the spectrum and the map are
/// separate parts of the page model.
pub fn page_sections(config: &PortfolioConfig) -> Vec<PageSection> {
    vec![
        PageSection::new("about", "Biography", ABOUT),
        PageSection::new(
            "research_focus",
            "Electronic Materials & Semiconductor Physics",
            RESEARCH_FOCUS,
        ),
        PageSection::new("education", "Academic Background", EDUCATION),
        PageSection::new("teaching", "Teaching Experience", TEACHING),
        PageSection::new("skills", "Skills", SKILLS),
        PageSection::new("awards", "Awards & Recognition", AWARDS),
        PageSection::new("contact", "Get in Touch", &contact_markdown(config)),
    ]
}
