use super::profile::EnergyProfile;
use crate::core::utils::clamp_finite;
use serde::Serialize;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Number of entries in an energy sample: one per integer progress value `0..=100`.
pub const SAMPLE_COUNT: usize = 101;

const MAX_PROGRESS_INDEX: u32 = (SAMPLE_COUNT - 1) as u32;

#[derive(Debug, Error)]
pub enum SampleExportError {
    #[error("Failed to write energy sample as CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error while exporting energy sample: {0}")]
    Io(#[from] io::Error),
}

/// One `(progress, energy)` pair of the sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergyPoint {
    /// Integer progress in `0..=100`.
    pub progress: u32,
    /// Free energy in kJ/mol.
    pub energy: f64,
}

/// The immutable, precomputed energy curve.
///
/// Generated once from an [`EnergyProfile`] by evaluating it at every integer progress value.
/// All displayed energies are lookups into this table.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergySample {
    points: Vec<EnergyPoint>,
}

impl EnergySample {
    pub fn generate(profile: &EnergyProfile) -> Self {
        let points = (0..=MAX_PROGRESS_INDEX)
            .map(|progress| EnergyPoint {
                progress,
                energy: profile.evaluate(f64::from(progress) / f64::from(MAX_PROGRESS_INDEX)),
            })
            .collect();
        Self { points }
    }

    /// The full ordered series, consumed once by energy-diagram renderers.
    #[inline]
    pub fn series(&self) -> &[EnergyPoint] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Energy at an integer progress value; values above 100 are clamped to 100.
    pub fn energy_at(&self, progress: u32) -> f64 {
        let index = progress.min(MAX_PROGRESS_INDEX) as usize;
        self.points[index].energy
    }

    /// Energy displayed for a continuous progress value: the entry at `round(progress)`, with the
    /// index clamped into `0..=100`.
    pub fn energy_at_progress(&self, progress: f64) -> f64 {
        let rounded = clamp_finite(progress, 0.0, f64::from(MAX_PROGRESS_INDEX)).round();
        self.energy_at(rounded as u32)
    }

    /// The highest sampled point.
    pub fn peak(&self) -> EnergyPoint {
        self.points
            .iter()
            .copied()
            .fold(self.points[0], |best, point| {
                if point.energy > best.energy { point } else { best }
            })
    }

    /// Writes the series as CSV with a `progress,energy` header.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), SampleExportError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for point in &self.points {
            csv_writer.serialize(point)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    pub fn write_csv_to_path(&self, path: &Path) -> Result<(), SampleExportError> {
        let file = std::fs::File::create(path)?;
        self.write_csv(io::BufWriter::new(file))
    }
}

impl Default for EnergySample {
    fn default() -> Self {
        Self::generate(&EnergyProfile::REFERENCE)
    }
}
