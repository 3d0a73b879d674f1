use crate::error::{GeometryError, Result};

/// Samples of a scalar function on an axis-aligned rectangular grid.
///
/// Values are stored row-major: row `r` follows `y[r]` and column `c`
/// follows `x[c]`. Both axes are strictly monotonic (either direction).
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
}

impl ScalarField {
    /// Creates a field from axis coordinates and rows of samples.
    ///
    /// `z[r][c]` is the value at `(x[c], y[r])`. Samples may be NaN to mark
    /// holes; axis coordinates may not.
    ///
    /// # Errors
    ///
    /// Returns an error if either axis has fewer than two coordinates, is
    /// not finite or not strictly monotonic, or the sample rows do not match
    /// the axes.
    pub fn new(x: Vec<f64>, y: Vec<f64>, z: Vec<Vec<f64>>) -> Result<Self> {
        check_axis("x", &x)?;
        check_axis("y", &y)?;
        if z.len() != y.len() {
            return Err(GeometryError::Degenerate(format!(
                "field has {} rows but {} y coordinates",
                z.len(),
                y.len()
            ))
            .into());
        }
        if let Some((r, row)) = z.iter().enumerate().find(|(_, row)| row.len() != x.len()) {
            return Err(GeometryError::Degenerate(format!(
                "field row {r} has {} values but {} x coordinates",
                row.len(),
                x.len()
            ))
            .into());
        }
        Ok(Self {
            z: z.into_iter().flatten().collect(),
            x,
            y,
        })
    }

    /// Samples `f(x, y)` at every grid node.
    ///
    /// # Errors
    ///
    /// Same axis checks as [`ScalarField::new`].
    pub fn from_fn<F>(x: Vec<f64>, y: Vec<f64>, f: F) -> Result<Self>
    where
        F: Fn(f64, f64) -> f64,
    {
        let z: Vec<Vec<f64>> = y.iter().map(|&yv| x.iter().map(|&xv| f(xv, yv)).collect()).collect();
        Self::new(x, y, z)
    }

    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Number of columns.
    #[must_use]
    pub fn nx(&self) -> usize {
        self.x.len()
    }

    /// Number of rows.
    #[must_use]
    pub fn ny(&self) -> usize {
        self.y.len()
    }

    /// Sample at row `r`, column `c`.
    #[must_use]
    pub fn value(&self, r: usize, c: usize) -> f64 {
        self.z[r * self.x.len() + c]
    }

    /// Smallest and largest finite samples, or `None` if there are none.
    #[must_use]
    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.z
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

fn check_axis(name: &str, axis: &[f64]) -> Result<()> {
    if axis.len() < 2 {
        return Err(GeometryError::Degenerate(format!("{name} axis needs at least two coordinates")).into());
    }
    if axis.iter().any(|v| !v.is_finite()) {
        return Err(GeometryError::Degenerate(format!("{name} axis is not finite")).into());
    }
    let increasing = axis.windows(2).all(|w| w[1] > w[0]);
    let decreasing = axis.windows(2).all(|w| w[1] < w[0]);
    if !increasing && !decreasing {
        return Err(GeometryError::Degenerate(format!("{name} axis is not strictly monotonic")).into());
    }
    Ok(())
}
