//! Parameter snapshots for the two multiplexing engines.
//!
//! Each model owns one immutable snapshot plus quantities derived from it.
//! `update_parameters` swaps the whole snapshot, so there is never a
//! partially updated state visible to a curve evaluation.

use std::collections::HashMap;

use num_complex::Complex64;

use crate::error::MuxError;

/// Photon-pair order at which the heralding series is truncated.
///
/// The thermal pair distribution decays geometrically, so terms beyond
/// k ≈ 100 are below f64 resolution for any realistic mean pair number.
/// Raising the bound tightens the series tail at O(K²) cost per herald
/// vector.
pub const DEFAULT_PAIR_TRUNCATION: usize = 100;

/// Switch-network topology for a spatially multiplexed source array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkType {
    /// Binary-tree switch network: one switch layer per doubling of the
    /// arm count.
    LogTree,
    /// Generalized Mach-Zehnder interferometer: a fixed
    /// splitter-switch-splitter stack regardless of the arm count.
    Gmzi,
    /// Lossless placeholder network.
    None,
}

/// Label string for a network type (for output formatting).
pub fn network_label(network: NetworkType) -> &'static str {
    match network {
        NetworkType::LogTree => "log-tree",
        NetworkType::Gmzi => "gmzi",
        NetworkType::None => "none",
    }
}

/// Parameters of an array of switchable heralded single-photon sources.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialMuxParams {
    /// Number of switchable source arms (at least 2).
    pub num_sources: usize,
    /// Collection efficiency on the idler (herald) arm.
    pub eta_idler: f64,
    /// Overall transmission on the signal arm, including source and filter
    /// losses.
    pub eta_signal: f64,
    /// Parametric-gain amplitude; its squared modulus must stay below 1.
    pub squeezing_param: Complex64,
    /// Transmission of the delay matching the switch decision time.
    pub eta_delay: f64,
    /// Transmission of a single switch element.
    pub eta_switch: f64,
    /// Transmission of the NxN splitter.
    pub eta_splitter: f64,
    /// Switch-network topology.
    pub network_type: NetworkType,
}

impl SpatialMuxParams {
    /// Check every field against its physical range.
    pub fn validate(&self) -> Result<(), MuxError> {
        check_count("num_sources", self.num_sources, 2, "at least 2")?;
        check_efficiency("eta_idler", self.eta_idler)?;
        check_efficiency("eta_signal", self.eta_signal)?;
        check_efficiency("eta_delay", self.eta_delay)?;
        check_efficiency("eta_switch", self.eta_switch)?;
        check_efficiency("eta_splitter", self.eta_splitter)?;
        let sq_squared = self.squeezing_param.norm_sqr();
        if !sq_squared.is_finite() || sq_squared >= 1.0 {
            return Err(MuxError::ParameterRange {
                name: "squeezing_param",
                value: sq_squared,
                expected: "squared modulus below 1",
            });
        }
        Ok(())
    }

    /// Build a validated parameter set from a name → value mapping.
    ///
    /// The mapping carries the numeric fields only; the network topology is
    /// typed and passed alongside. The squeezing amplitude is taken as real.
    /// Integer-typed fields are rounded to the nearest integer.
    pub fn from_map(
        map: &HashMap<String, f64>,
        network_type: NetworkType,
    ) -> Result<Self, MuxError> {
        let params = Self {
            num_sources: require(map, "num_sources")?.round() as usize,
            eta_idler: require(map, "eta_idler")?,
            eta_signal: require(map, "eta_signal")?,
            squeezing_param: Complex64::new(require(map, "squeezing_param")?, 0.0),
            eta_delay: require(map, "eta_delay")?,
            eta_switch: require(map, "eta_switch")?,
            eta_splitter: require(map, "eta_splitter")?,
            network_type,
        };
        params.validate()?;
        Ok(params)
    }
}

/// Parameters of a single heralded source recirculated through a lossy
/// delay loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeMuxParams {
    /// Number of round trips available per clock cycle (at least 2).
    pub num_roundtrips: usize,
    /// Mean photon-pair number μ per pump pulse.
    pub mean_photon_num: f64,
    /// Probability the herald detector registers a photon that reaches it.
    pub trigger_eff: f64,
    /// Truncation bound on the summed click order (at least 1). Acts as a
    /// maximum click order, not a physical detector count.
    pub num_trigger: usize,
    /// Transmission of one pass through the delay line.
    pub delay_line_trans: f64,
    /// Transmission of the static output optics.
    pub optics_trans: f64,
    /// Target output multiplicity M (at least 1).
    pub m_photon_num: usize,
    /// Photon-pair order at which the heralding series is truncated.
    pub pair_truncation: usize,
}

impl TimeMuxParams {
    /// Check every field against its physical range.
    pub fn validate(&self) -> Result<(), MuxError> {
        check_count("num_roundtrips", self.num_roundtrips, 2, "at least 2")?;
        if !self.mean_photon_num.is_finite() || self.mean_photon_num < 0.0 {
            return Err(MuxError::ParameterRange {
                name: "mean_photon_num",
                value: self.mean_photon_num,
                expected: "finite and non-negative",
            });
        }
        check_efficiency("trigger_eff", self.trigger_eff)?;
        check_count("num_trigger", self.num_trigger, 1, "at least 1")?;
        check_efficiency("delay_line_trans", self.delay_line_trans)?;
        check_efficiency("optics_trans", self.optics_trans)?;
        check_count("m_photon_num", self.m_photon_num, 1, "at least 1")?;
        check_count("pair_truncation", self.pair_truncation, 1, "at least 1")?;
        Ok(())
    }

    /// Build a validated parameter set from a name → value mapping.
    ///
    /// `pair_truncation` may be omitted and defaults to
    /// [`DEFAULT_PAIR_TRUNCATION`]. Integer-typed fields are rounded to the
    /// nearest integer.
    pub fn from_map(map: &HashMap<String, f64>) -> Result<Self, MuxError> {
        let params = Self {
            num_roundtrips: require(map, "num_roundtrips")?.round() as usize,
            mean_photon_num: require(map, "mean_photon_num")?,
            trigger_eff: require(map, "trigger_eff")?,
            num_trigger: require(map, "num_trigger")?.round() as usize,
            delay_line_trans: require(map, "delay_line_trans")?,
            optics_trans: require(map, "optics_trans")?,
            m_photon_num: require(map, "m_photon_num")?.round() as usize,
            pair_truncation: match map.get("pair_truncation") {
                Some(v) => v.round() as usize,
                None => DEFAULT_PAIR_TRUNCATION,
            },
        };
        params.validate()?;
        Ok(params)
    }
}

fn require(map: &HashMap<String, f64>, name: &'static str) -> Result<f64, MuxError> {
    map.get(name)
        .copied()
        .ok_or(MuxError::MissingParameter { name })
}

fn check_efficiency(name: &'static str, value: f64) -> Result<(), MuxError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(MuxError::ParameterRange {
            name,
            value,
            expected: "within [0, 1]",
        })
    }
}

fn check_count(
    name: &'static str,
    value: usize,
    min: usize,
    expected: &'static str,
) -> Result<(), MuxError> {
    if value >= min {
        Ok(())
    } else {
        Err(MuxError::ParameterRange {
            name,
            value: value as f64,
            expected,
        })
    }
}
