use crate::domain::model::{AuthorHandle, ProfileMetrics, ProfileSection, Publication};
use crate::domain::ports::ScholarSource;
use crate::utils::error::{LookupError, LookupResult, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Scholarly index reached over HTTP through a JSON proxy.
///
/// Two calls per lookup: `GET {endpoint}/authors/{id}` resolves the author,
/// `GET {endpoint}/authors/{id}/fill?sections=...` returns indices, counts
/// and publications. Abstracts come one publication at a time from
/// `GET {endpoint}/publications/{author_pub_id}`.
pub struct HttpScholarSource {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct AuthorWire {
    scholar_id: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FilledAuthorWire {
    citedby: Option<u64>,
    hindex: Option<u32>,
    i10index: Option<u32>,
    #[serde(default)]
    publications: Vec<PublicationWire>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PublicationWire {
    author_pub_id: Option<String>,
    bib: BibWire,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PublicationDetailWire {
    bib: DetailBibWire,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DetailBibWire {
    #[serde(rename = "abstract")]
    abstract_text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BibWire {
    title: Option<String>,
    pub_year: Option<YearWire>,
    author: Option<String>,
    journal: Option<String>,
    venue: Option<String>,
    citation: Option<String>,
}

// The index reports years as numbers or as strings depending on the entry.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum YearWire {
    Number(u32),
    Text(String),
}

impl YearWire {
    fn value(&self) -> u32 {
        match self {
            YearWire::Number(year) => *year,
            YearWire::Text(text) => text.trim().parse().unwrap_or(0),
        }
    }
}

impl From<PublicationWire> for Publication {
    fn from(wire: PublicationWire) -> Self {
        let bib = wire.bib;
        Publication {
            title: bib.title.unwrap_or_else(|| "Untitled".to_string()),
            year: bib.pub_year.as_ref().map(YearWire::value).unwrap_or(0),
            authors: bib.author.unwrap_or_default(),
            source_venue: bib
                .journal
                .or(bib.venue)
                .or(bib.citation)
                .unwrap_or_else(|| "Publication".to_string()),
            author_pub_id: wire.author_pub_id,
        }
    }
}

impl HttpScholarSource {
    pub fn new(endpoint: &str, request_timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(request_timeout).build()?;
        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    fn author_url(&self, scholar_id: &str) -> String {
        format!("{}/authors/{}", self.endpoint, scholar_id)
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        scholar_id: &str,
    ) -> LookupResult<T> {
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("Scholar index response status: {}", status);

        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound(scholar_id.to_string()));
        }
        if !status.is_success() {
            return Err(LookupError::Status {
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                LookupError::Malformed(e.to_string())
            } else {
                LookupError::Network(e)
            }
        })
    }
}

#[async_trait]
impl ScholarSource for HttpScholarSource {
    async fn search_author_id(&self, scholar_id: &str) -> LookupResult<AuthorHandle> {
        let url = self.author_url(scholar_id);
        tracing::debug!("Searching author at: {}", url);

        let wire: AuthorWire = self.fetch_json(self.client.get(&url), scholar_id).await?;

        Ok(AuthorHandle {
            scholar_id: wire.scholar_id.unwrap_or_else(|| scholar_id.to_string()),
            name: wire.name,
        })
    }

    async fn fill(
        &self,
        author: &AuthorHandle,
        sections: &[ProfileSection],
    ) -> LookupResult<ProfileMetrics> {
        let url = format!("{}/fill", self.author_url(&author.scholar_id));
        let sections = sections
            .iter()
            .map(ProfileSection::as_str)
            .collect::<Vec<_>>()
            .join(",");
        tracing::debug!("Filling author sections [{}] at: {}", sections, url);

        let request = self.client.get(&url).query(&[("sections", sections.as_str())]);
        let wire: FilledAuthorWire = self.fetch_json(request, &author.scholar_id).await?;

        let total_citations = wire.citedby.ok_or(LookupError::MissingField("citedby"))?;
        let h_index = wire.hindex.ok_or(LookupError::MissingField("hindex"))?;
        let i10_index = wire.i10index.ok_or(LookupError::MissingField("i10index"))?;

        Ok(ProfileMetrics {
            total_citations,
            h_index,
            i10_index,
            publication_list: wire.publications.into_iter().map(Publication::from).collect(),
        })
    }

    async fn fill_publication(&self, author_pub_id: &str) -> LookupResult<Option<String>> {
        let url = format!("{}/publications/{}", self.endpoint, author_pub_id);
        tracing::debug!("Filling publication at: {}", url);

        let wire: PublicationDetailWire =
            self.fetch_json(self.client.get(&url), author_pub_id).await?;

        Ok(wire
            .bib
            .abstract_text
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty()))
    }
}
