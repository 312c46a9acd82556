use serde::Serialize;

pub type Rgba = [u8; 4];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSite {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapArc {
    pub start_lat: f64,
    pub start_lon: f64,
    pub end_lat: f64,
    pub end_lon: f64,
    pub source_color: Rgba,
    pub target_color: Rgba,
    pub width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    pub pitch: f64,
}

/// Scatter + arc layers for a deck.gl style map. `map_style` stays `None`
/// so no tile provider token is needed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapScene {
    pub title: String,
    pub sites: Vec<MapSite>,
    pub arcs: Vec<MapArc>,
    pub site_radius_m: u32,
    pub view: ViewState,
    pub tooltip: String,
    pub map_style: Option<String>,
}

impl MapSite {
    fn new(name: &str, lat: f64, lon: f64, color: Rgba) -> Self {
        Self {
            name: name.to_string(),
            lat,
            lon,
            color,
        }
    }
}

impl MapArc {
    pub fn between(from: &MapSite, to: &MapSite) -> Self {
        Self {
            start_lat: from.lat,
            start_lon: from.lon,
            end_lat: to.lat,
            end_lon: to.lon,
            source_color: [from.color[0], from.color[1], from.color[2], 150],
            target_color: [to.color[0], to.color[1], to.color[2], 150],
            width: 5,
        }
    }
}

impl MapScene {
    pub fn research_visits() -> Self {
        let home = MapSite::new(
            "University of Pretoria (Gauteng, SA)",
            -25.7479,
            28.2293,
            [255, 0, 0, 200],
        );
        let visit = MapSite::new(
            "Woldia University (Ethiopia)",
            11.8288,
            39.5932,
            [0, 0, 255, 200],
        );
        let arc = MapArc::between(&home, &visit);

        Self {
            title: "Research Visits & Collaborations".to_string(),
            sites: vec![home, visit],
            arcs: vec![arc],
            site_radius_m: 150_000,
            view: ViewState {
                latitude: -7.0,
                longitude: 34.0,
                zoom: 3.0,
                pitch: 40.0,
            },
            tooltip: "{name}".to_string(),
            map_style: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arc_joins_the_two_sites() {
        let scene = MapScene::research_visits();
        assert_eq!(scene.sites.len(), 2);
        assert_eq!(scene.arcs.len(), 1);

        let arc = &scene.arcs[0];
        assert_eq!((arc.start_lat, arc.start_lon), (-25.7479, 28.2293));
        assert_eq!((arc.end_lat, arc.end_lon), (11.8288, 39.5932));
        assert_eq!(arc.source_color, [255, 0, 0, 150]);
        assert_eq!(arc.target_color, [0, 0, 255, 150]);
    }

    #[test]
    fn test_scene_serializes_without_map_style() {
        let json = serde_json::to_value(MapScene::research_visits()).unwrap();
        assert!(json["map_style"].is_null());
        assert_eq!(json["view"]["pitch"], 40.0);
        assert_eq!(json["sites"][1]["name"], "Woldia University (Ethiopia)");
    }
}
