//! Tunables for sampling, root finding and validation.

use crate::Real;
use serde::{Deserialize, Serialize};

/// Settings shared by the analysis operations.
///
/// Every field has a default, so a host can deserialize a partial settings object:
///
/// ```
/// use graph_eval::AnalysisConfig;
///
/// let config = AnalysisConfig {
///     sample_count: 401,
///     ..AnalysisConfig::default()
/// };
/// assert_eq!(config.max_iterations, 50);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Grid size used by root and extremum search.
    ///
    /// The default of 1001 puts the grid on exact multiples of a hundredth of the
    /// interval width, so round values such as 0 and ±2 on a `[-5, 5]` window are
    /// sampled exactly.
    pub sample_count: usize,

    /// Convergence tolerance for bisection and de-duplication distance for roots.
    pub tolerance: Real,

    /// Upper bound on bisection steps per bracket.
    pub max_iterations: usize,

    /// Lower bound reported for `ln(x)` and the other logarithms.
    pub log_epsilon: Real,

    /// Half-width of the window in which `tan(x)` poles are listed. At most
    /// [`crate::domain::MAX_TAN_POLES`] poles are listed on each side of zero.
    pub tan_exclusion_limit: Real,

    /// Values of the variable tried by [`crate::is_valid`]. An expression is valid
    /// when it evaluates finitely at one or more of them.
    pub probe_points: Vec<Real>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_count: 1001,
            tolerance: 1e-6,
            max_iterations: 50,
            log_epsilon: 1e-10,
            tan_exclusion_limit: 100.0,
            probe_points: vec![1.0, 0.5, 2.0, -1.0, 10.0, -10.0, 0.0, 100.0],
        }
    }
}
