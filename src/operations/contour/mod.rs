mod marching;
mod stitch;

use crate::error::{GeometryError, Result};
use crate::geometry::{Polyline, ScalarField};
use crate::math::point_2d::scalar_close;

/// Which levels to trace.
#[derive(Debug, Clone, PartialEq)]
pub enum ContourLevels {
    /// Explicit level values, traced in the given order.
    Values(Vec<f64>),
    /// `n` evenly spaced levels strictly between the field's minimum and
    /// maximum.
    Count(usize),
}

impl From<Vec<f64>> for ContourLevels {
    fn from(values: Vec<f64>) -> Self {
        Self::Values(values)
    }
}

impl From<&[f64]> for ContourLevels {
    fn from(values: &[f64]) -> Self {
        Self::Values(values.to_vec())
    }
}

impl ContourLevels {
    /// Resolves the levels against a field.
    #[allow(clippy::cast_precision_loss)]
    fn resolve(&self, field: &ScalarField) -> Vec<f64> {
        match self {
            Self::Values(values) => values.clone(),
            Self::Count(n) => match field.min_max() {
                Some((lo, hi)) if hi > lo => (1..=*n)
                    .map(|i| lo + (hi - lo) * i as f64 / (*n + 1) as f64)
                    .collect(),
                _ => Vec::new(),
            },
        }
    }
}

/// The polylines traced at one level.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelContours {
    pub level: f64,
    pub polylines: Vec<Polyline>,
}

/// Contours of a field, one entry per requested level in request order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContourSet {
    levels: Vec<LevelContours>,
}

impl ContourSet {
    #[must_use]
    pub fn levels(&self) -> &[LevelContours] {
        &self.levels
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelContours> {
        self.levels.iter()
    }

    /// Polylines traced at `level`, if it was requested.
    #[must_use]
    pub fn at(&self, level: f64) -> Option<&[Polyline]> {
        self.levels
            .iter()
            .find(|l| scalar_close(l.level, level))
            .map(|l| l.polylines.as_slice())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Traces isolines of a scalar field with marching squares.
///
/// Levels outside the range of the field produce no polylines rather than
/// an error.
#[derive(Debug, Clone)]
pub struct TraceContours {
    levels: ContourLevels,
}

impl TraceContours {
    #[must_use]
    pub fn new(levels: impl Into<ContourLevels>) -> Self {
        Self {
            levels: levels.into(),
        }
    }

    /// Executes the trace over `field`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if a requested level is not finite.
    pub fn execute(&self, field: &ScalarField) -> Result<ContourSet> {
        let levels = self.levels.resolve(field);
        if let Some(bad) = levels.iter().find(|l| !l.is_finite()) {
            return Err(GeometryError::Degenerate(format!("contour level {bad} is not finite")).into());
        }
        let range = field.min_max();
        let levels = levels
            .into_iter()
            .map(|level| {
                let polylines = match range {
                    Some((lo, hi)) if level >= lo && level <= hi => {
                        let (segments, crossings) = marching::march(field, level);
                        stitch::stitch(&segments, &crossings)
                    }
                    _ => Vec::new(),
                };
                LevelContours { level, polylines }
            })
            .collect();
        Ok(ContourSet { levels })
    }
}
