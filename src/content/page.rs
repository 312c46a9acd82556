use crate::config::PortfolioConfig;
use crate::content::archive::{archived_publications, scholar_search_url};
use crate::content::dlts::SpectrumSummary;
use crate::content::sections::{page_sections, PageSection};
use crate::domain::model::{FetchOutcome, MetricsStatus, ProfileMetrics, Publication};
use crate::utils::error::{PortfolioError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

const SCHOLAR_PROFILE_URL: &str = "https://scholar.google.com/citations?user=";
const LIVE_NOTICE: &str = "Fetched live data from Google Scholar.";
const ARCHIVED_NOTICE: &str =
    "Google Scholar is currently unreachable. Showing archived publication list.";

#[derive(Debug, Clone, Serialize)]
pub struct ProfileLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileCard {
    pub name: String,
    pub affiliation: Option<String>,
    pub location: Option<String>,
    pub links: Vec<ProfileLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationSource {
    Live,
    Archived,
}

#[derive(Debug, Clone, Serialize)]
pub struct PublicationEntry {
    pub heading: String,
    pub title: String,
    pub year: u32,
    pub authors: String,
    pub venue: String,
    pub search_url: Option<String>,
    pub author_pub_id: Option<String>,
    /// Filled for live entries when abstracts are fetched.
    pub abstract_text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PublicationSection {
    pub source: PublicationSource,
    pub notice: String,
    pub entries: Vec<PublicationEntry>,
}

/// Everything the rendering surface needs for the page body.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioPage {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub profile: ProfileCard,
    pub data_status: MetricsStatus,
    pub metrics: Vec<MetricCard>,
    pub publications: PublicationSection,
    pub spectrum: SpectrumSummary,
    pub sections: Vec<PageSection>,
}

#[derive(Serialize)]
struct PublicationRow<'a> {
    title: &'a str,
    year: u32,
    authors: &'a str,
    venue: &'a str,
}

impl PublicationEntry {
    fn from_publication(publication: Publication, with_search_link: bool) -> Self {
        let year = match publication.year {
            0 => "N/A".to_string(),
            year => year.to_string(),
        };
        Self {
            heading: format!("({}) {}", year, publication.title),
            search_url: with_search_link.then(|| scholar_search_url(&publication.title)),
            title: publication.title,
            year: publication.year,
            authors: publication.authors,
            venue: publication.source_venue,
            author_pub_id: publication.author_pub_id,
            abstract_text: None,
        }
    }
}

impl PublicationSection {
    /// Live list newest first when the index returned anything, otherwise the
    /// archived list with search links.
    pub fn from_metrics(metrics: &ProfileMetrics) -> Self {
        if metrics.publication_list.is_empty() {
            return Self {
                source: PublicationSource::Archived,
                notice: ARCHIVED_NOTICE.to_string(),
                entries: archived_publications()
                    .into_iter()
                    .map(|p| PublicationEntry::from_publication(p, true))
                    .collect(),
            };
        }

        let mut live = metrics.publication_list.clone();
        live.sort_by(|a, b| b.year.cmp(&a.year));

        Self {
            source: PublicationSource::Live,
            notice: LIVE_NOTICE.to_string(),
            entries: live
                .into_iter()
                .map(|p| PublicationEntry::from_publication(p, false))
                .collect(),
        }
    }

    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for entry in &self.entries {
            writer.serialize(PublicationRow {
                title: &entry.title,
                year: entry.year,
                authors: &entry.authors,
                venue: &entry.venue,
            })?;
        }
        if self.entries.is_empty() {
            writer.write_record(["title", "year", "authors", "venue"])?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| PortfolioError::IoError(e.into_error()))?;

        String::from_utf8(bytes).map_err(|e| PortfolioError::DatasetError {
            message: format!("publication CSV is not UTF-8: {}", e),
        })
    }
}

fn profile_card(config: &PortfolioConfig) -> ProfileCard {
    let profile = &config.profile;
    let mut links = vec![ProfileLink {
        label: "Google Scholar".to_string(),
        url: format!("{}{}", SCHOLAR_PROFILE_URL, config.scholar_id()),
    }];
    if let Some(url) = &profile.researchgate_url {
        links.push(ProfileLink {
            label: "ResearchGate".to_string(),
            url: url.clone(),
        });
    }
    if let Some(url) = &profile.orcid_url {
        links.push(ProfileLink {
            label: "ORCID iD".to_string(),
            url: url.clone(),
        });
    }
    if let Some(email) = &profile.email {
        links.push(ProfileLink {
            label: "Contact via Email".to_string(),
            url: format!("mailto:{}?subject=Research%20Collaboration%20Inquiry", email),
        });
    }

    ProfileCard {
        name: profile.name.clone(),
        affiliation: profile.affiliation.clone(),
        location: profile.location.clone(),
        links,
    }
}

fn metric_cards(metrics: &ProfileMetrics, research_interest: &str) -> Vec<MetricCard> {
    [
        ("Citations", metrics.total_citations.to_string()),
        ("h-index", metrics.h_index.to_string()),
        ("i10-index", metrics.i10_index.to_string()),
        ("RG Research Interest", research_interest.to_string()),
    ]
    .into_iter()
    .map(|(label, value)| MetricCard {
        label: label.to_string(),
        value,
    })
    .collect()
}

impl PortfolioPage {
    pub fn assemble(
        config: &PortfolioConfig,
        outcome: &FetchOutcome,
        spectrum: SpectrumSummary,
    ) -> Self {
        Self {
            title: config.site.title.clone(),
            generated_at: Utc::now(),
            profile: profile_card(config),
            data_status: outcome.status,
            metrics: metric_cards(&outcome.metrics, config.research_interest()),
            publications: PublicationSection::from_metrics(&outcome.metrics),
            spectrum,
            sections: page_sections(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::dlts::DltsSpectrum;
    use std::sync::Arc;

    fn publication(title: &str, year: u32) -> Publication {
        Publication {
            title: title.to_string(),
            year,
            authors: "K Nagessar".to_string(),
            source_venue: "Journal".to_string(),
            author_pub_id: None,
        }
    }

    fn spectrum() -> SpectrumSummary {
        DltsSpectrum::embedded().unwrap().summary("dlts_spectrum.tsv")
    }

    #[test]
    fn test_live_publications_sorted_newest_first() {
        let metrics = ProfileMetrics {
            total_citations: 42,
            h_index: 6,
            i10_index: 3,
            publication_list: vec![
                publication("Old", 2020),
                publication("Newest", 2025),
                publication("Undated", 0),
                publication("Also 2025", 2025),
            ],
        };

        let section = PublicationSection::from_metrics(&metrics);

        assert_eq!(section.source, PublicationSource::Live);
        let titles: Vec<&str> = section.entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Newest", "Also 2025", "Old", "Undated"]);
        assert_eq!(section.entries[0].heading, "(2025) Newest");
        assert!(section.entries.iter().all(|e| e.search_url.is_none()));
    }

    #[test]
    fn test_undated_publication_heading() {
        let metrics = ProfileMetrics {
            publication_list: vec![publication("Untitled", 0)],
            ..ProfileMetrics::placeholder()
        };

        let section = PublicationSection::from_metrics(&metrics);

        assert_eq!(section.entries[0].heading, "(N/A) Untitled");
        assert_eq!(section.entries[0].year, 0);
    }

    #[test]
    fn test_live_entry_keeps_publication_id() {
        let mut with_id = publication("Indexed", 2024);
        with_id.author_pub_id = Some("GIBw1REAAAAJ:u5HHmVD_uO8C".to_string());
        let metrics = ProfileMetrics {
            publication_list: vec![with_id],
            ..ProfileMetrics::placeholder()
        };

        let entry = &PublicationSection::from_metrics(&metrics).entries[0];

        assert_eq!(entry.author_pub_id.as_deref(), Some("GIBw1REAAAAJ:u5HHmVD_uO8C"));
        assert!(entry.abstract_text.is_none());
    }

    #[test]
    fn test_empty_list_shows_archive_with_links() {
        let section = PublicationSection::from_metrics(&ProfileMetrics::placeholder());

        assert_eq!(section.source, PublicationSource::Archived);
        assert_eq!(section.notice, ARCHIVED_NOTICE);
        assert_eq!(section.entries.len(), 5);
        assert_eq!(
            section.entries[3].search_url.as_deref(),
            Some("https://scholar.google.com/scholar?q=Applications+and+Topics+of+Physics+in+Surgery")
        );
    }

    #[test]
    fn test_assemble_fallback_page() {
        let config = PortfolioConfig::default();
        let outcome = FetchOutcome::fallback(Arc::new(ProfileMetrics::placeholder()));

        let page = PortfolioPage::assemble(&config, &outcome, spectrum());

        assert_eq!(page.data_status, MetricsStatus::Fallback);
        assert_eq!(
            page.metrics,
            vec![
                MetricCard {
                    label: "Citations".to_string(),
                    value: "5".to_string(),
                },
                MetricCard {
                    label: "h-index".to_string(),
                    value: "1".to_string(),
                },
                MetricCard {
                    label: "i10-index".to_string(),
                    value: "0".to_string(),
                },
                MetricCard {
                    label: "RG Research Interest".to_string(),
                    value: "15.7".to_string(),
                },
            ]
        );
        let headings: Vec<&str> = page.sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(
            headings,
            vec![
                "Biography",
                "Electronic Materials & Semiconductor Physics",
                "Academic Background",
                "Teaching Experience",
                "Skills",
                "Awards & Recognition",
                "Get in Touch"
            ]
        );
        assert!(page.sections[0]
            .body_markdown
            .starts_with("Kaveer Nagessar is a multidisciplinary"));
        assert!(page.sections[2]
            .body_markdown
            .contains("**Bachelor of Science Honours** | *Physics* *(Feb 2026 - Present)*"));
        assert!(page.sections[5]
            .body_markdown
            .contains("2nd National Winner (2025)"));
        assert!(page.sections[6]
            .body_markdown
            .contains("Department of Physics, University of Pretoria"));
        assert_eq!(page.publications.source, PublicationSource::Archived);
        assert_eq!(
            page.profile.links[0].url,
            "https://scholar.google.com/citations?user=GIBw1REAAAAJ"
        );
        assert!(page
            .profile
            .links
            .iter()
            .any(|l| l.url.starts_with("mailto:nagessar.kaveer@gmail.com?subject=")));
    }

    #[test]
    fn test_publication_csv_has_header() {
        let section = PublicationSection::from_metrics(&ProfileMetrics::placeholder());
        let csv = section.to_csv().unwrap();
        let mut lines = csv.lines();

        assert_eq!(lines.next(), Some("title,year,authors,venue"));
        assert_eq!(csv.lines().count(), 6);
    }

    #[test]
    fn test_page_serializes_status_in_snake_case() {
        let outcome = FetchOutcome::live(ProfileMetrics::placeholder());
        let page = PortfolioPage::assemble(&PortfolioConfig::default(), &outcome, spectrum());
        let json = serde_json::to_value(&page).unwrap();

        assert_eq!(json["data_status"], "live");
        assert_eq!(json["publications"]["source"], "archived");
        assert_eq!(json["spectrum"]["point_count"], 663);
    }
}
