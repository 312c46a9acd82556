use crate::domain::model::Publication;

const SCHOLAR_SEARCH_URL: &str = "https://scholar.google.com/scholar?q=";

/// Hand-maintained publication list shown when the index has nothing live.
pub fn archived_publications() -> Vec<Publication> {
    [
        (
            2025_u32,
            "Advanced thermal and magnetic materials for high-power and high-temperature applications: a comprehensive review",
            "WG Mengesha, K Nagessar",
            "Discover Materials 5",
        ),
        (
            2025,
            "A critical review on electronic materials properties and multifunctional applications",
            "WG Mengesha, K Nagessar",
            "Discover Materials 5 (1)",
        ),
        (
            2025,
            "Electrical Characterization of Defects in a Commercial Silicon Bipolar Junction Transistor Under Electron Irradiation",
            "K Nagessar",
            "University of Pretoria (Honours Thesis/Project)",
        ),
        (
            2023,
            "Applications and Topics of Physics in Surgery",
            "K Nagessar",
            "Alternate Horizons",
        ),
        (
            2020,
            "Importance of Astronomy in Our Education Systems",
            "K Nagessar",
            "CosmosNow Online Magazine",
        ),
    ]
    .into_iter()
    .map(|(year, title, authors, venue)| Publication {
        title: title.to_string(),
        year,
        authors: authors.to_string(),
        source_venue: venue.to_string(),
        author_pub_id: None,
    })
    .collect()
}

pub fn scholar_search_url(title: &str) -> String {
    format!("{}{}", SCHOLAR_SEARCH_URL, title.replace(' ', "+"))
}
