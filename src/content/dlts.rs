//! Deep Level Transient Spectroscopy measurement of an electron-irradiated
//! silicon BJT: the RW4 rate-window signal against temperature.

use crate::utils::error::{PortfolioError, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;

const EMBEDDED_TSV: &str = include_str!("../../data/dlts_rw4.tsv");

pub const CHART_TITLE: &str = "Final DLTS Spectrum of a Silicon BJT";
pub const X_LABEL: &str = "Temperature (K)";
pub const Y_LABEL: &str = "Capacitance (RW4)";
pub const SERIES_LABEL: &str = "RW4 Signal";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectrumPoint {
    #[serde(rename = "T")]
    pub temperature_k: f64,
    #[serde(rename = "RW4")]
    pub signal: f64,
}

/// Always holds at least one point.
#[derive(Debug, Clone)]
pub struct DltsSpectrum {
    points: Vec<SpectrumPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpectrumSummary {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series_label: String,
    pub point_count: usize,
    pub temperature_min_k: f64,
    pub temperature_max_k: f64,
    pub peak: SpectrumPoint,
    pub trough: SpectrumPoint,
    pub data_file: String,
}

impl DltsSpectrum {
    pub fn embedded() -> Result<Self> {
        Self::from_tsv(EMBEDDED_TSV.as_bytes())
    }

    pub fn from_tsv<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .trim(csv::Trim::All)
            .from_reader(reader);

        let points = reader
            .deserialize::<SpectrumPoint>()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        if points.is_empty() {
            return Err(PortfolioError::DatasetError {
                message: "DLTS spectrum has no data rows".to_string(),
            });
        }

        tracing::debug!("Loaded DLTS spectrum with {} points", points.len());
        Ok(Self { points })
    }

    pub fn points(&self) -> &[SpectrumPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn temperature_range(&self) -> (f64, f64) {
        self.points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.temperature_k), hi.max(p.temperature_k))
            })
    }

    pub fn peak(&self) -> SpectrumPoint {
        self.extreme(|candidate, best| candidate.signal > best.signal)
    }

    pub fn trough(&self) -> SpectrumPoint {
        self.extreme(|candidate, best| candidate.signal < best.signal)
    }

    fn extreme(&self, better: impl Fn(&SpectrumPoint, &SpectrumPoint) -> bool) -> SpectrumPoint {
        let first = self.points[0];
        self.points
            .iter()
            .skip(1)
            .fold(first, |best, p| if better(p, &best) { *p } else { best })
    }

    pub fn to_tsv(&self) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(Vec::new());
        for point in &self.points {
            writer.serialize(point)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| PortfolioError::IoError(e.into_error()))?;

        String::from_utf8(bytes).map_err(|e| PortfolioError::DatasetError {
            message: format!("spectrum TSV is not UTF-8: {}", e),
        })
    }

    pub fn summary(&self, data_file: &str) -> SpectrumSummary {
        let (temperature_min_k, temperature_max_k) = self.temperature_range();
        SpectrumSummary {
            title: CHART_TITLE.to_string(),
            x_label: X_LABEL.to_string(),
            y_label: Y_LABEL.to_string(),
            series_label: SERIES_LABEL.to_string(),
            point_count: self.len(),
            temperature_min_k,
            temperature_max_k,
            peak: self.peak(),
            trough: self.trough(),
            data_file: data_file.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_spectrum_loads() {
        let spectrum = DltsSpectrum::embedded().unwrap();

        assert_eq!(spectrum.len(), 663);
        assert_eq!(spectrum.points()[0].temperature_k, 349.81);
        assert!((spectrum.points()[0].signal - 2.73e-4).abs() < 1e-12);
        assert_eq!(spectrum.temperature_range(), (31.9125, 349.81));
    }

    #[test]
    fn test_embedded_spectrum_is_a_cooling_sweep() {
        let spectrum = DltsSpectrum::embedded().unwrap();
        assert!(spectrum
            .points()
            .windows(2)
            .all(|pair| pair[0].temperature_k > pair[1].temperature_k));
    }

    #[test]
    fn test_extremes() {
        let spectrum = DltsSpectrum::embedded().unwrap();

        let peak = spectrum.peak();
        assert_eq!(peak.temperature_k, 77.2175);
        assert!((peak.signal - 4.59e-3).abs() < 1e-12);

        let trough = spectrum.trough();
        assert_eq!(trough.temperature_k, 32.8085);
        assert!((trough.signal + 4.93e-3).abs() < 1e-12);
    }

    #[test]
    fn test_header_only_is_dataset_error() {
        let err = DltsSpectrum::from_tsv("T\tRW4\n".as_bytes()).unwrap_err();
        assert!(matches!(err, PortfolioError::DatasetError { .. }));
    }

    #[test]
    fn test_bad_number_is_csv_error() {
        let err = DltsSpectrum::from_tsv("T\tRW4\n300.0\tnot-a-number\n".as_bytes()).unwrap_err();
        assert!(matches!(err, PortfolioError::CsvError(_)));
    }

    #[test]
    fn test_to_tsv_keeps_header_and_rows() {
        let spectrum =
            DltsSpectrum::from_tsv("T\tRW4\n300.5\t-0.5\n299\t0.25\n".as_bytes()).unwrap();
        let tsv = spectrum.to_tsv().unwrap();
        let lines: Vec<&str> = tsv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "T\tRW4");
        assert_eq!(lines[1], "300.5\t-0.5");
    }

    #[test]
    fn test_summary_labels() {
        let spectrum = DltsSpectrum::embedded().unwrap();
        let summary = spectrum.summary("dlts_spectrum.tsv");

        assert_eq!(summary.title, CHART_TITLE);
        assert_eq!(summary.point_count, 663);
        assert_eq!(summary.data_file, "dlts_spectrum.tsv");
    }
}
