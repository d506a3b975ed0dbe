//! # photon-mux-sim
//!
//! Output statistics of multiplexed heralded single/M-photon sources.
//!
//! Heralded sources are probabilistic: a parametric process emits photon
//! pairs, and detecting one photon of a pair (the idler) heralds its twin
//! on the signal arm. Multiplexing trades hardware for determinism by
//! giving every clock cycle several chances to herald:
//!
//! - [`spatial::SpatialMuxModel`] — N independent sources behind a switch
//!   network (log-tree or generalized Mach-Zehnder); closed-form
//!   per-source statistics exponentiated over the arms.
//! - [`time_mux::TimeMuxModel`] — one source recirculated through a lossy
//!   delay loop for up to N round trips; combinatorial click statistics
//!   summed over photon-pair orders.
//!
//! Both engines hold an immutable parameter snapshot and expose a pure
//! `probability_curve()` over an increasing mode count, paired with
//! `mode_array()` for plotting. The interactive layer converts slider
//! ticks through [`boundary`] and rebuilds parameters on every change;
//! the engines themselves never mutate.
//!
//! ```
//! use photon_mux_sim::prelude::*;
//! use num_complex::Complex64;
//!
//! let params = SpatialMuxParams {
//!     num_sources: 20,
//!     eta_idler: 0.98,
//!     eta_signal: 0.85,
//!     squeezing_param: Complex64::new(0.88, 0.0),
//!     eta_delay: 0.83,
//!     eta_switch: 0.72,
//!     eta_splitter: 0.68,
//!     network_type: NetworkType::Gmzi,
//! };
//! let model = SpatialMuxModel::new(params).unwrap();
//! let curve = model.probability_curve().unwrap();
//! assert_eq!(curve.len(), model.mode_array().len());
//! ```

pub mod boundary;
pub mod combinatorics;
pub mod error;
pub mod params;
pub mod spatial;
pub mod time_mux;

pub mod prelude {
    pub use crate::boundary::*;
    pub use crate::combinatorics::*;
    pub use crate::error::*;
    pub use crate::params::*;
    pub use crate::spatial::*;
    pub use crate::time_mux::*;
}
