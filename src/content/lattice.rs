//! Diamond-cubic silicon supercell with a substitutional boron atom and a
//! neighbouring vacancy, laid out for a 3D scatter plot.

use crate::utils::error::{PortfolioError, Result};
use serde::Serialize;

pub type Point3 = [f64; 3];
pub type Segment = [Point3; 2];

/// Fractional coordinates of the 8-atom diamond basis.
const DIAMOND_BASIS: [Point3; 8] = [
    [0.0, 0.0, 0.0],
    [0.0, 0.5, 0.5],
    [0.5, 0.0, 0.5],
    [0.5, 0.5, 0.0],
    [0.25, 0.25, 0.25],
    [0.25, 0.75, 0.75],
    [0.75, 0.25, 0.75],
    [0.75, 0.75, 0.25],
];

pub const SCENE_TITLE: &str = "Silicon Lattice with Boron-Vacancy Defect";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatticeParams {
    /// Cubic lattice constant in angstrom.
    pub lattice_constant: f64,
    /// Unit cells along each axis.
    pub cells: usize,
    /// Atoms closer than this are drawn bonded.
    pub bond_cutoff: f64,
}

impl Default for LatticeParams {
    fn default() -> Self {
        Self {
            lattice_constant: 5.43,
            cells: 2,
            bond_cutoff: 2.6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerStyle {
    pub size: u32,
    pub color: &'static str,
    pub symbol: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub width: u32,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneStyles {
    pub silicon: MarkerStyle,
    pub boron: MarkerStyle,
    pub vacancy: MarkerStyle,
    pub bond: LineStyle,
    pub unit_cell: LineStyle,
}

impl Default for SceneStyles {
    fn default() -> Self {
        Self {
            silicon: MarkerStyle {
                size: 9,
                color: "black",
                symbol: "circle",
            },
            boron: MarkerStyle {
                size: 10,
                color: "blue",
                symbol: "circle",
            },
            vacancy: MarkerStyle {
                size: 10,
                color: "red",
                symbol: "x",
            },
            bond: LineStyle {
                width: 4,
                color: "gray",
            },
            unit_cell: LineStyle {
                width: 2,
                color: "black",
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LatticeScene {
    pub title: String,
    pub params: LatticeParams,
    pub silicon: Vec<Point3>,
    pub boron: Point3,
    pub vacancy: Point3,
    pub bonds: Vec<Segment>,
    pub unit_cell_edges: Vec<Segment>,
    pub styles: SceneStyles,
}

fn distance(a: &Point3, b: &Point3) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Index of the point nearest to `target`, skipping `exclude`. First wins on ties.
fn nearest_index(points: &[Point3], target: &Point3, exclude: Option<usize>) -> Option<usize> {
    points
        .iter()
        .enumerate()
        .filter(|(index, _)| Some(*index) != exclude)
        .fold(None, |best: Option<(usize, f64)>, (index, point)| {
            let d = distance(point, target);
            match best {
                Some((_, best_d)) if best_d <= d => best,
                _ => Some((index, d)),
            }
        })
        .map(|(index, _)| index)
}

pub fn diamond_sites(params: &LatticeParams) -> Vec<Point3> {
    let a = params.lattice_constant;
    let n = params.cells;
    let mut sites = Vec::with_capacity(n * n * n * DIAMOND_BASIS.len());

    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                for basis in &DIAMOND_BASIS {
                    sites.push([
                        a * (basis[0] + i as f64),
                        a * (basis[1] + j as f64),
                        a * (basis[2] + k as f64),
                    ]);
                }
            }
        }
    }
    sites
}

pub fn unit_cell_edges(side: f64) -> Vec<Segment> {
    let l = side;
    vec![
        [[0.0, 0.0, 0.0], [l, 0.0, 0.0]],
        [[0.0, l, 0.0], [l, l, 0.0]],
        [[0.0, 0.0, l], [l, 0.0, l]],
        [[0.0, l, l], [l, l, l]],
        [[0.0, 0.0, 0.0], [0.0, l, 0.0]],
        [[l, 0.0, 0.0], [l, l, 0.0]],
        [[0.0, 0.0, l], [0.0, l, l]],
        [[l, 0.0, l], [l, l, l]],
        [[0.0, 0.0, 0.0], [0.0, 0.0, l]],
        [[l, 0.0, 0.0], [l, 0.0, l]],
        [[0.0, l, 0.0], [0.0, l, l]],
        [[l, l, 0.0], [l, l, l]],
    ]
}

impl LatticeScene {
    pub fn build(params: LatticeParams) -> Result<Self> {
        if params.cells == 0 {
            return Err(PortfolioError::DatasetError {
                message: "lattice needs at least one unit cell".to_string(),
            });
        }
        if !(params.lattice_constant > 0.0 && params.bond_cutoff > 0.0) {
            return Err(PortfolioError::DatasetError {
                message: format!(
                    "lattice constant ({}) and bond cutoff ({}) must be positive",
                    params.lattice_constant, params.bond_cutoff
                ),
            });
        }

        let sites = diamond_sites(&params);
        let count = sites.len() as f64;
        let mut centroid = [0.0; 3];
        for site in &sites {
            for axis in 0..3 {
                centroid[axis] += site[axis] / count;
            }
        }

        let not_enough_sites = || PortfolioError::DatasetError {
            message: "lattice has too few sites for a boron-vacancy pair".to_string(),
        };
        let boron_index = nearest_index(&sites, &centroid, None).ok_or_else(not_enough_sites)?;
        let boron = sites[boron_index];
        let vacancy_index =
            nearest_index(&sites, &boron, Some(boron_index)).ok_or_else(not_enough_sites)?;
        let vacancy = sites[vacancy_index];

        let silicon: Vec<Point3> = sites
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != boron_index && *index != vacancy_index)
            .map(|(_, site)| *site)
            .collect();

        // The vacancy is left out so no bond reaches the empty site.
        let bonded: Vec<Point3> = silicon.iter().copied().chain(std::iter::once(boron)).collect();
        let mut bonds = Vec::new();
        for (i, a) in bonded.iter().enumerate() {
            for b in &bonded[i + 1..] {
                if distance(a, b) < params.bond_cutoff {
                    bonds.push([*a, *b]);
                }
            }
        }

        tracing::debug!(
            "Built lattice: {} Si, {} bonds, boron at {:?}, vacancy at {:?}",
            silicon.len(),
            bonds.len(),
            boron,
            vacancy
        );

        Ok(Self {
            title: SCENE_TITLE.to_string(),
            params,
            silicon,
            boron,
            vacancy,
            bonds,
            unit_cell_edges: unit_cell_edges(params.cells as f64 * params.lattice_constant),
            styles: SceneStyles::default(),
        })
    }

    pub fn boron_bond_count(&self) -> usize {
        self.bonds
            .iter()
            .filter(|[a, b]| *a == self.boron || *b == self.boron)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: f64 = 5.43;

    #[test]
    fn test_site_count_scales_with_cells() {
        let params = LatticeParams {
            cells: 3,
            ..LatticeParams::default()
        };
        assert_eq!(diamond_sites(&LatticeParams::default()).len(), 64);
        assert_eq!(diamond_sites(&params).len(), 216);
    }

    #[test]
    fn test_boron_sits_nearest_the_centroid() {
        let scene = LatticeScene::build(LatticeParams::default()).unwrap();
        assert_eq!(scene.boron, [A, A, A]);
    }

    #[test]
    fn test_vacancy_is_a_nearest_neighbour_of_boron() {
        let scene = LatticeScene::build(LatticeParams::default()).unwrap();
        let nn = A * 3f64.sqrt() / 4.0;

        assert!((distance(&scene.vacancy, &scene.boron) - nn).abs() < 1e-9);
        assert!(!scene.silicon.contains(&scene.vacancy));
        assert!(!scene.silicon.contains(&scene.boron));
    }

    #[test]
    fn test_default_scene_counts() {
        let scene = LatticeScene::build(LatticeParams::default()).unwrap();

        assert_eq!(scene.silicon.len(), 62);
        assert_eq!(scene.bonds.len(), 82);
        assert_eq!(scene.boron_bond_count(), 3);
        assert_eq!(scene.unit_cell_edges.len(), 12);
        assert!(scene
            .bonds
            .iter()
            .all(|[a, b]| *a != scene.vacancy && *b != scene.vacancy));
    }

    #[test]
    fn test_unit_cell_edges_have_box_side() {
        let edges = unit_cell_edges(2.0 * A);
        assert!(edges
            .iter()
            .all(|[a, b]| (distance(a, b) - 2.0 * A).abs() < 1e-12));
    }

    #[test]
    fn test_zero_cells_rejected() {
        let params = LatticeParams {
            cells: 0,
            ..LatticeParams::default()
        };
        assert!(matches!(
            LatticeScene::build(params),
            Err(PortfolioError::DatasetError { .. })
        ));
    }

    #[test]
    fn test_non_positive_cutoff_rejected() {
        let params = LatticeParams {
            bond_cutoff: 0.0,
            ..LatticeParams::default()
        };
        assert!(LatticeScene::build(params).is_err());
    }

    #[test]
    fn test_nearest_index_prefers_first_on_ties() {
        let points = [[1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [0.0, 0.0, 0.0]];
        assert_eq!(nearest_index(&points, &[0.0, 0.0, 0.0], Some(2)), Some(0));
        assert_eq!(nearest_index(&points[..1], &[0.0; 3], Some(0)), None);
    }
}
