//! Closed-form statistics of a spatially multiplexed array of heralded
//! single-photon sources.
//!
//! N identical two-mode squeezers each feed a herald detector on the idler
//! arm and a switch network on the signal arm; the network routes the first
//! heralded signal mode to the common output. With the collection
//! efficiency η_i lumped on the idler arm, the transmission η_s lumped on
//! the signal arm, and squeezing amplitude z, every per-source quantity
//! reduces to a closed form in sq² = |z|², the idler loss (1 − η_i) and the
//! signal loss (1 − η_s). Multiplexing over N arms then only exponentiates
//! the per-source no-trigger probability.

use crate::error::MuxError;
use crate::params::{NetworkType, SpatialMuxParams};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Statistics engine for a switch-network multiplexed source array.
///
/// Holds one immutable parameter snapshot plus the lumped loss terms
/// derived from it; every quantity below is a pure function of that
/// snapshot.
#[derive(Debug, Clone)]
pub struct SpatialMuxModel {
    params: SpatialMuxParams,
    sq_squared: f64,
    idler_loss: f64,
    signal_loss: f64,
    mode_array: Vec<usize>,
}

impl SpatialMuxModel {
    /// Validate `params` and build the model with its derived quantities.
    pub fn new(params: SpatialMuxParams) -> Result<Self, MuxError> {
        params.validate()?;
        Ok(Self::from_validated(params))
    }

    /// Replace the parameter snapshot wholesale and recompute the derived
    /// quantities. Equivalent to reconstruction; on error the previous
    /// snapshot is kept.
    pub fn update_parameters(&mut self, params: SpatialMuxParams) -> Result<(), MuxError> {
        params.validate()?;
        *self = Self::from_validated(params);
        Ok(())
    }

    fn from_validated(params: SpatialMuxParams) -> Self {
        Self {
            sq_squared: params.squeezing_param.norm_sqr(),
            idler_loss: 1.0 - params.eta_idler,
            signal_loss: 1.0 - params.eta_signal,
            mode_array: (1..params.num_sources).collect(),
            params,
        }
    }

    /// Current parameter snapshot.
    pub fn params(&self) -> &SpatialMuxParams {
        &self.params
    }

    /// Mode counts the probability curve is evaluated over:
    /// 1 ..= num_sources − 1.
    pub fn mode_array(&self) -> &[usize] {
        &self.mode_array
    }

    /// Probability per clock cycle that a single source registers a herald
    /// click, tracing out the signal mode.
    pub fn prob_trigger(&self) -> f64 {
        ((1.0 - self.sq_squared) * self.sq_squared * self.params.eta_idler)
            / (1.0 - self.idler_loss * self.sq_squared).powi(2)
    }

    /// Probability that the heralded state contains exactly one photon.
    pub fn prob_single_photon(&self) -> f64 {
        let a = self.idler_loss * self.sq_squared;
        let b = self.idler_loss * self.signal_loss * self.sq_squared;
        (1.0 - a).powi(2) * self.params.eta_signal * (1.0 + b) / (1.0 - b).powi(3)
    }

    /// Multi-photon contamination of the heralded state.
    ///
    /// Diagnostic companion to [`Self::prob_single_photon`]; the
    /// probability curve does not consume it.
    pub fn prob_multi_photon(&self) -> f64 {
        let b = self.sq_squared * self.signal_loss * self.idler_loss;
        self.params.eta_signal
            * (1.0 - self.signal_loss * (self.sq_squared * self.idler_loss).powi(2))
            / (1.0 - b).powi(2)
            - self.prob_single_photon()
    }

    /// Probability per clock cycle that at least one of `num_modes` arms
    /// triggers.
    pub fn prob_mux_trigger(&self, num_modes: usize) -> f64 {
        1.0 - (1.0 - self.prob_trigger()).powi(num_modes as i32)
    }

    /// Probability per clock cycle that at least one arm emits a triggered
    /// single photon.
    pub fn prob_mux_one(&self, num_modes: usize) -> f64 {
        self.prob_single_photon() * self.prob_mux_trigger(num_modes)
    }

    /// Transmission of the switch network routing `num_modes` arms.
    ///
    /// A log-tree pays one switch layer per doubling of the arm count; a
    /// generalized Mach-Zehnder pays a fixed splitter-switch-splitter
    /// stack however many arms it routes. Any other network is lossless.
    pub fn eta_network(&self, num_modes: usize) -> f64 {
        match self.params.network_type {
            NetworkType::LogTree => {
                self.params.eta_switch.powf((num_modes as f64).log2()) * self.params.eta_delay
            }
            NetworkType::Gmzi => {
                self.params.eta_delay * self.params.eta_switch * self.params.eta_splitter.powi(2)
            }
            NetworkType::None => 1.0,
        }
    }

    /// Probability per clock cycle that the multiplexed source emits a
    /// triggered single photon through the network.
    pub fn prob_mux_single(&self, num_modes: usize) -> f64 {
        self.prob_mux_one(num_modes) * self.prob_mux_trigger(num_modes) * self.eta_network(num_modes)
    }

    /// Emission probability for every mode count in [`Self::mode_array`].
    pub fn probability_curve(&self) -> Result<Vec<f64>, MuxError> {
        let evaluate = |&n: &usize| {
            let p = self.prob_mux_single(n);
            if p.is_finite() {
                Ok(p)
            } else {
                Err(MuxError::Overflow {
                    context: "prob_mux_single",
                    value: p,
                })
            }
        };
        #[cfg(feature = "parallel")]
        let curve = self.mode_array.par_iter().map(evaluate).collect();
        #[cfg(not(feature = "parallel"))]
        let curve = self.mode_array.iter().map(evaluate).collect();
        curve
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn lossless_pair(num_sources: usize, squeezing: f64) -> SpatialMuxParams {
        SpatialMuxParams {
            num_sources,
            eta_idler: 1.0,
            eta_signal: 1.0,
            squeezing_param: Complex64::new(squeezing, 0.0),
            eta_delay: 1.0,
            eta_switch: 1.0,
            eta_splitter: 1.0,
            network_type: NetworkType::Gmzi,
        }
    }

    #[test]
    fn zero_squeezing_gives_zero_curve() {
        let model = SpatialMuxModel::new(lossless_pair(10, 0.0)).unwrap();
        assert_eq!(model.prob_trigger(), 0.0);
        let curve = model.probability_curve().unwrap();
        assert_eq!(curve.len(), 9);
        for &p in &curve {
            assert_eq!(p, 0.0);
        }
    }

    #[test]
    fn lossless_gmzi_pair_closed_forms() {
        let model = SpatialMuxModel::new(lossless_pair(2, 0.5)).unwrap();
        // sq² = 0.25, no idler loss: p_trig = 0.75 · 0.25 / 1 = 0.1875
        assert!((model.prob_trigger() - 0.1875).abs() < 1e-12);
        // perfect collection: the heralded state is exactly one photon
        assert!((model.prob_single_photon() - 1.0).abs() < 1e-12);
        assert!(model.prob_multi_photon().abs() < 1e-12);
        assert!((model.prob_mux_trigger(1) - 0.1875).abs() < 1e-12);
        assert!((model.prob_mux_one(1) - 0.1875).abs() < 1e-12);
        assert!((model.eta_network(1) - 1.0).abs() < 1e-12);
        // emission needs the trigger twice: once to herald, once to route
        assert!((model.prob_mux_single(1) - 0.1875 * 0.1875).abs() < 1e-12);
    }

    #[test]
    fn mux_trigger_monotonic_and_matches_single_arm() {
        let model = SpatialMuxModel::new(SpatialMuxParams {
            num_sources: 50,
            eta_idler: 0.9,
            eta_signal: 0.8,
            squeezing_param: Complex64::new(0.6, 0.0),
            eta_delay: 0.9,
            eta_switch: 0.9,
            eta_splitter: 0.9,
            network_type: NetworkType::LogTree,
        })
        .unwrap();

        assert!((model.prob_mux_trigger(1) - model.prob_trigger()).abs() < 1e-12);
        let mut previous = 0.0;
        for n in 1..50 {
            let p = model.prob_mux_trigger(n);
            assert!(
                p >= previous,
                "prob_mux_trigger({}) = {} dropped below {}",
                n,
                p,
                previous
            );
            assert!((0.0..=1.0).contains(&p));
            previous = p;
        }
    }

    #[test]
    fn log_tree_network_pays_one_switch_layer_per_doubling() {
        let eta_delay = 0.9;
        let model = SpatialMuxModel::new(SpatialMuxParams {
            num_sources: 16,
            eta_idler: 0.9,
            eta_signal: 0.9,
            squeezing_param: Complex64::new(0.5, 0.0),
            eta_delay,
            eta_switch: 0.5,
            eta_splitter: 0.7,
            network_type: NetworkType::LogTree,
        })
        .unwrap();

        assert!((model.eta_network(2) - eta_delay * 0.5).abs() < 1e-12);
        assert!((model.eta_network(4) - eta_delay * 0.25).abs() < 1e-12);
        assert!((model.eta_network(8) - eta_delay * 0.125).abs() < 1e-12);
    }

    #[test]
    fn gmzi_network_independent_of_arm_count() {
        let model = SpatialMuxModel::new(SpatialMuxParams {
            num_sources: 32,
            eta_idler: 0.9,
            eta_signal: 0.9,
            squeezing_param: Complex64::new(0.5, 0.0),
            eta_delay: 0.83,
            eta_switch: 0.72,
            eta_splitter: 0.68,
            network_type: NetworkType::Gmzi,
        })
        .unwrap();

        let expected = 0.83 * 0.72 * 0.68 * 0.68;
        for n in [1, 2, 7, 31] {
            assert!((model.eta_network(n) - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn unspecified_network_is_lossless() {
        let model = SpatialMuxModel::new(SpatialMuxParams {
            network_type: NetworkType::None,
            ..lossless_pair(4, 0.5)
        })
        .unwrap();
        for n in [1, 2, 3] {
            assert_eq!(model.eta_network(n), 1.0);
        }
    }

    #[test]
    fn curve_length_matches_mode_array() {
        let model = SpatialMuxModel::new(lossless_pair(25, 0.4)).unwrap();
        let curve = model.probability_curve().unwrap();
        assert_eq!(curve.len(), model.mode_array().len());
        assert_eq!(curve.len(), 24);
        assert_eq!(model.mode_array()[0], 1);
        assert_eq!(*model.mode_array().last().unwrap(), 24);
    }

    #[test]
    fn update_parameters_matches_reconstruction() {
        let first = lossless_pair(10, 0.3);
        let second = SpatialMuxParams {
            num_sources: 20,
            eta_idler: 0.7,
            squeezing_param: Complex64::new(0.8, 0.0),
            network_type: NetworkType::LogTree,
            ..first
        };

        let mut updated = SpatialMuxModel::new(first).unwrap();
        updated.update_parameters(second).unwrap();
        let rebuilt = SpatialMuxModel::new(second).unwrap();

        assert_eq!(
            updated.probability_curve().unwrap(),
            rebuilt.probability_curve().unwrap()
        );
    }

    #[test]
    fn rejected_update_keeps_previous_snapshot() {
        let good = lossless_pair(10, 0.3);
        let mut model = SpatialMuxModel::new(good).unwrap();
        let bad = SpatialMuxParams {
            eta_idler: 2.0,
            ..good
        };
        assert!(model.update_parameters(bad).is_err());
        assert_eq!(*model.params(), good);
    }

    #[test]
    fn random_parameter_sets_produce_bounded_curves() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..25 {
            let network = match rng.gen_range(0..3) {
                0 => NetworkType::LogTree,
                1 => NetworkType::Gmzi,
                _ => NetworkType::None,
            };
            let params = SpatialMuxParams {
                num_sources: rng.gen_range(2..40),
                eta_idler: rng.gen_range(0.0..1.0),
                eta_signal: rng.gen_range(0.0..1.0),
                squeezing_param: Complex64::new(rng.gen_range(0.0..0.95), 0.0),
                eta_delay: rng.gen_range(0.0..1.0),
                eta_switch: rng.gen_range(0.0..1.0),
                eta_splitter: rng.gen_range(0.0..1.0),
                network_type: network,
            };
            let model = SpatialMuxModel::new(params).unwrap();
            let curve = model.probability_curve().unwrap();
            assert_eq!(curve.len(), model.mode_array().len());
            for &p in &curve {
                assert!(
                    p >= 0.0 && p <= 1.0 + 1e-9,
                    "curve value {} outside [0, 1] for {:?}",
                    p,
                    params
                );
            }
        }
    }
}
