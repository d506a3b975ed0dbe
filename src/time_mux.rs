//! Combinatorial statistics of a time-multiplexed heralded photon source.
//!
//! A single source pumps once per round trip of a recirculating delay
//! loop. Each pump pulse generates a thermally distributed number of
//! photon pairs with mean μ; the first herald click switches the stored
//! signal photons out of the loop, after which they see the static output
//! optics plus one delay-line pass per remaining recirculation. Summing
//! over the pair order k (truncated at `pair_truncation`) and over the
//! round trip that finally fires yields the probability of exactly M
//! photons leaving per clock cycle.

use crate::combinatorics::{binomial_coefficient, Grid};
use crate::error::MuxError;
use crate::params::TimeMuxParams;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Statistics engine for a delay-loop multiplexed source.
///
/// Holds one immutable parameter snapshot; every quantity below is a pure
/// function of that snapshot and its explicit arguments.
#[derive(Debug, Clone)]
pub struct TimeMuxModel {
    params: TimeMuxParams,
    mode_array: Vec<usize>,
}

impl TimeMuxModel {
    /// Validate `params` and build the model.
    pub fn new(params: TimeMuxParams) -> Result<Self, MuxError> {
        params.validate()?;
        Ok(Self::from_validated(params))
    }

    /// Replace the parameter snapshot wholesale. Equivalent to
    /// reconstruction; on error the previous snapshot is kept.
    pub fn update_parameters(&mut self, params: TimeMuxParams) -> Result<(), MuxError> {
        params.validate()?;
        *self = Self::from_validated(params);
        Ok(())
    }

    fn from_validated(params: TimeMuxParams) -> Self {
        Self {
            mode_array: (1..params.num_roundtrips).collect(),
            params,
        }
    }

    /// Current parameter snapshot.
    pub fn params(&self) -> &TimeMuxParams {
        &self.params
    }

    /// Round-trip counts the probability curve is evaluated over:
    /// 1 ..= num_roundtrips − 1.
    pub fn mode_array(&self) -> &[usize] {
        &self.mode_array
    }

    /// Thermal-like probability of generating exactly k photon pairs in
    /// one pump pulse: μ^k / (1+μ)^(k+1).
    pub fn down_conversion_prob(&self, k: usize) -> f64 {
        let mu = self.params.mean_photon_num;
        mu.powi(k as i32) / (1.0 + mu).powi(k as i32 + 1)
    }

    /// Herald click probability for each pair count k = 1..k_max, summed
    /// over the click order l.
    ///
    /// Builds the lower-triangular (k, l) grid of
    /// C(k,l) · η_t^l · (1−η_t)^(k−l) · (1/d)^(l−1) for l ≤ k and sums each
    /// row; entries above the diagonal stay zero. The 1/d discount models
    /// the finite click resolution of d = `num_trigger` herald channels.
    pub fn trigger_detection_prob(
        &self,
        k_max: usize,
        num_trigger: usize,
    ) -> Result<Vec<f64>, MuxError> {
        if num_trigger == 0 {
            return Err(MuxError::NumericDegeneracy {
                context: "click discount 1/num_trigger",
            });
        }
        let eta = self.params.trigger_eff;
        let inv_d = 1.0 / num_trigger as f64;
        let mut grid = Grid::zeros(k_max, k_max);
        for k in 1..=k_max {
            for l in 1..=k {
                let term = binomial_coefficient(k as f64, l as f64)
                    * eta.powi(l as i32)
                    * (1.0 - eta).powi((k - l) as i32)
                    * inv_d.powi(l as i32 - 1);
                grid.set(k - 1, l - 1, term);
            }
        }
        Ok(grid.row_sums())
    }

    /// M-photon emission grid over pair counts k = 1..k_max (rows) and
    /// round-trip positions j = 1..n (columns).
    ///
    /// Entry (k, j) is the binomial probability that exactly `m` of the k
    /// stored photons survive the transmission seen from round trip j;
    /// rows with k < m stay zero.
    pub fn m_photon_emission_prob(&self, m: usize, n: usize, k_max: usize) -> Grid {
        let mut grid = Grid::zeros(k_max, n);
        let transmissions: Vec<f64> = (1..=n).map(|j| self.roundtrip_transmission(n, j)).collect();
        for k in m..=k_max {
            let coeff = binomial_coefficient(k as f64, m as f64);
            for (j_idx, &t) in transmissions.iter().enumerate() {
                let value = coeff * t.powi(m as i32) * (1.0 - t).powi((k - m) as i32);
                grid.set(k - 1, j_idx, value);
            }
        }
        grid
    }

    /// Transmission seen by photons heralded at round trip j of n: the
    /// static output optics plus one delay-line pass per remaining
    /// recirculation. The pass count n − j − 1 is floored at zero, so the
    /// final round trip is attenuated by the optics alone.
    fn roundtrip_transmission(&self, n: usize, j: usize) -> f64 {
        let passes = n.saturating_sub(j + 1);
        self.params.optics_trans * self.params.delay_line_trans.powi(passes as i32)
    }

    /// Joint probability of generating k pairs and registering a herald,
    /// for k = 1..k_max. Zero pairs cannot herald, so k starts at 1.
    pub fn heralded_pair_prob(
        &self,
        k_max: usize,
        num_trigger: usize,
    ) -> Result<Vec<f64>, MuxError> {
        let clicks = self.trigger_detection_prob(k_max, num_trigger)?;
        Ok(clicks
            .iter()
            .enumerate()
            .map(|(idx, &click)| self.down_conversion_prob(idx + 1) * click)
            .collect())
    }

    /// Probability of at least one herald by round trip j, for j = 1..n.
    ///
    /// Diagnostic companion to the emission curve; nothing downstream
    /// consumes it.
    pub fn multiplex_herald_prob(
        &self,
        num_trigger: usize,
        n: usize,
    ) -> Result<Vec<f64>, MuxError> {
        let herald_sum: f64 = self
            .heralded_pair_prob(self.params.pair_truncation, num_trigger)?
            .iter()
            .sum();
        Ok((1..=n)
            .map(|j| 1.0 - (1.0 - herald_sum).powi((n - j) as i32))
            .collect())
    }

    /// Probability of emitting exactly `m` photons after multiplexing over
    /// `n` round trips, integrating over which round trip finally fires.
    pub fn multiplex_m_photon_prob(
        &self,
        num_trigger: usize,
        n: usize,
        m: usize,
        k_max: usize,
    ) -> Result<f64, MuxError> {
        let herald = self.heralded_pair_prob(k_max, num_trigger)?;
        self.multiplex_m_photon_from_herald(&herald, n, m, k_max)
    }

    fn multiplex_m_photon_from_herald(
        &self,
        herald: &[f64],
        n: usize,
        m: usize,
        k_max: usize,
    ) -> Result<f64, MuxError> {
        let herald_sum: f64 = herald.iter().sum();
        let emission = self.m_photon_emission_prob(m, n, k_max);
        let detect = emission.contract_rows(herald);
        let mut total = 0.0;
        for (j_idx, &detect_j) in detect.iter().enumerate() {
            let no_earlier_herald = (1.0 - herald_sum).powi((n - (j_idx + 1)) as i32);
            total += no_earlier_herald * detect_j;
        }
        if total.is_finite() {
            Ok(total)
        } else {
            Err(MuxError::Overflow {
                context: "multiplex_m_photon_prob",
                value: total,
            })
        }
    }

    /// Emission probability for every round-trip count in
    /// [`Self::mode_array`].
    ///
    /// The herald vector does not depend on the round-trip count, so it is
    /// evaluated once and shared across curve points.
    pub fn probability_curve(&self) -> Result<Vec<f64>, MuxError> {
        let k_max = self.params.pair_truncation;
        let m = self.params.m_photon_num;
        let herald = self.heralded_pair_prob(k_max, self.params.num_trigger)?;
        let evaluate = |&n: &usize| self.multiplex_m_photon_from_herald(&herald, n, m, k_max);
        #[cfg(feature = "parallel")]
        let curve = self.mode_array.par_iter().map(evaluate).collect();
        #[cfg(not(feature = "parallel"))]
        let curve = self.mode_array.iter().map(evaluate).collect();
        curve
    }
}
