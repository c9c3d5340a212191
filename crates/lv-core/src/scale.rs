//! Domain-to-screen scales

/// Domain used when there is nothing to measure
pub const DEFAULT_DOMAIN: (f64, f64) = (0.0, 1.0);

/// Finite min/max of `values`, or `None` when no finite value exists
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Linear interpolation between a domain and a range.
///
/// A degenerate domain (min == max) maps every value to the middle of the
/// range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Build a scale over the finite extent of `values`
    pub fn from_values(values: impl IntoIterator<Item = f64>, range: (f64, f64)) -> Self {
        Self::new(extent(values).unwrap_or(DEFAULT_DOMAIN), range)
    }

    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return if value.is_nan() { f64::NAN } else { (r0 + r1) / 2.0 };
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    pub fn invert(&self, position: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return (d0 + d1) / 2.0;
        }
        d0 + (position - r0) / (r1 - r0) * (d1 - d0)
    }

    /// Evenly spaced domain values for axis labels, endpoints included
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.domain;
        match count {
            0 => Vec::new(),
            1 => vec![d0],
            _ if d0 == d1 => vec![d0],
            _ => (0..count)
                .map(|i| d0 + (d1 - d0) * i as f64 / (count - 1) as f64)
                .collect(),
        }
    }
}

/// Square-root scale, so that circle areas grow linearly with the input.
///
/// Negative inputs are handled symmetrically (`sign(x) * sqrt(|x|)`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    inner: LinearScale,
}

impl SqrtScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            inner: LinearScale::new((signed_sqrt(domain.0), signed_sqrt(domain.1)), range),
        }
    }

    pub fn from_values(values: impl IntoIterator<Item = f64>, range: (f64, f64)) -> Self {
        Self::new(extent(values).unwrap_or(DEFAULT_DOMAIN), range)
    }

    pub fn map(&self, value: f64) -> f64 {
        self.inner.map(signed_sqrt(value))
    }

    pub fn range(&self) -> (f64, f64) {
        self.inner.range
    }
}

fn signed_sqrt(value: f64) -> f64 {
    if value < 0.0 {
        -(-value).sqrt()
    } else {
        value.sqrt()
    }
}
