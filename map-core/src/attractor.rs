/// How an orbit's iteration ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttractorKind {
    /// The population died out; the attractor is `{0.0}`.
    Extinct,
    /// The population collapsed onto `1.0`.
    Saturated,
    /// A truncated value recurred exactly. A fixed point has period 1.
    Cycle { period: usize },
    /// The iteration cap was hit; the values are the whole visited orbit.
    Unresolved,
}

/// The long-run value set of the logistic map for one `r`.
#[derive(Clone, Debug, PartialEq)]
pub struct Attractor {
    pub r: f64,
    pub kind: AttractorKind,
    /// Settled values in orbit order. Never empty.
    pub values: Vec<f64>,
}

impl Attractor {
    pub fn extinct(r: f64) -> Self {
        Self {
            r,
            kind: AttractorKind::Extinct,
            values: vec![0.0],
        }
    }

    pub fn saturated(r: f64) -> Self {
        Self {
            r,
            kind: AttractorKind::Saturated,
            values: vec![1.0],
        }
    }

    /// Builds a cycle attractor from the repeating tail of an orbit.
    pub fn cycle(r: f64, values: Vec<f64>) -> Self {
        debug_assert!(!values.is_empty());
        Self {
            r,
            kind: AttractorKind::Cycle {
                period: values.len(),
            },
            values,
        }
    }

    pub fn unresolved(r: f64, values: Vec<f64>) -> Self {
        debug_assert!(!values.is_empty());
        Self {
            r,
            kind: AttractorKind::Unresolved,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; provided alongside [`Attractor::len`].
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Cycle length, if a recurrence was found.
    pub fn period(&self) -> Option<usize> {
        match self.kind {
            AttractorKind::Cycle { period } => Some(period),
            _ => None,
        }
    }
}
