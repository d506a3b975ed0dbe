//! Conversion table between UI slider ticks and engine parameter values.
//!
//! The interactive layer drives integer sliders; each engine field
//! declares its tick range and tick-to-value scale here. Converting a full
//! slider state yields exactly the construction mapping the parameter
//! structs consume, so the engine never sees UI units.

use std::collections::HashMap;

/// Tick range and scaling of one slider-driven parameter field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderSpec {
    /// Mapping key this slider drives.
    pub field: &'static str,
    /// Lowest tick the slider reports.
    pub min_tick: i64,
    /// Highest tick the slider reports.
    pub max_tick: i64,
    /// Physical value per tick.
    pub scale: f64,
}

impl SliderSpec {
    const fn count(field: &'static str) -> Self {
        Self {
            field,
            min_tick: 1,
            max_tick: 500,
            scale: 1.0,
        }
    }

    const fn fraction(field: &'static str) -> Self {
        Self {
            field,
            min_tick: 0,
            max_tick: 100,
            scale: 0.01,
        }
    }

    /// Convert a tick position to the field's physical value, clamping to
    /// the declared range.
    pub fn to_value(&self, tick: i64) -> f64 {
        tick.clamp(self.min_tick, self.max_tick) as f64 * self.scale
    }
}

/// Slider layout for the spatial model, one entry per mapping key.
pub const SPATIAL_SLIDER_TABLE: [SliderSpec; 7] = [
    SliderSpec::count("num_sources"),
    SliderSpec::fraction("eta_idler"),
    SliderSpec::fraction("eta_signal"),
    SliderSpec::fraction("squeezing_param"),
    SliderSpec::fraction("eta_delay"),
    SliderSpec::fraction("eta_switch"),
    SliderSpec::fraction("eta_splitter"),
];

/// Slider layout for the time model, one entry per mapping key.
pub const TIME_SLIDER_TABLE: [SliderSpec; 7] = [
    SliderSpec::count("num_roundtrips"),
    SliderSpec::fraction("mean_photon_num"),
    SliderSpec::fraction("trigger_eff"),
    SliderSpec::count("num_trigger"),
    SliderSpec::fraction("delay_line_trans"),
    SliderSpec::fraction("optics_trans"),
    SliderSpec::count("m_photon_num"),
];

/// Convert a full slider state into the construction mapping.
///
/// Fields absent from `ticks` are skipped, so a missing slider surfaces as
/// a missing-parameter error from the `from_map` constructors rather than
/// an invented value.
pub fn ticks_to_map(table: &[SliderSpec], ticks: &HashMap<String, i64>) -> HashMap<String, f64> {
    table
        .iter()
        .filter_map(|spec| {
            ticks
                .get(spec.field)
                .map(|&tick| (spec.field.to_string(), spec.to_value(tick)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{NetworkType, SpatialMuxParams, TimeMuxParams};

    #[test]
    fn ticks_clamp_to_declared_range() {
        let spec = SliderSpec::fraction("eta_idler");
        assert_eq!(spec.to_value(-5), 0.0);
        assert_eq!(spec.to_value(250), 1.0);
        assert!((spec.to_value(98) - 0.98).abs() < 1e-12);

        let spec = SliderSpec::count("num_sources");
        assert_eq!(spec.to_value(0), 1.0);
        assert_eq!(spec.to_value(100), 100.0);
    }

    #[test]
    fn spatial_slider_state_builds_params() {
        let ticks: HashMap<String, i64> = [
            ("num_sources", 100),
            ("eta_idler", 98),
            ("eta_signal", 85),
            ("squeezing_param", 88),
            ("eta_delay", 83),
            ("eta_switch", 72),
            ("eta_splitter", 68),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        let map = ticks_to_map(&SPATIAL_SLIDER_TABLE, &ticks);
        let params = SpatialMuxParams::from_map(&map, NetworkType::Gmzi).unwrap();
        assert_eq!(params.num_sources, 100);
        assert!((params.eta_idler - 0.98).abs() < 1e-12);
        assert!((params.squeezing_param.re - 0.88).abs() < 1e-12);
    }

    #[test]
    fn time_slider_state_builds_params() {
        let ticks: HashMap<String, i64> = [
            ("num_roundtrips", 100),
            ("mean_photon_num", 18),
            ("trigger_eff", 53),
            ("num_trigger", 4),
            ("delay_line_trans", 99),
            ("optics_trans", 83),
            ("m_photon_num", 1),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        let map = ticks_to_map(&TIME_SLIDER_TABLE, &ticks);
        let params = TimeMuxParams::from_map(&map).unwrap();
        assert_eq!(params.num_roundtrips, 100);
        assert_eq!(params.num_trigger, 4);
        assert_eq!(params.m_photon_num, 1);
        assert!((params.mean_photon_num - 0.18).abs() < 1e-12);
    }

    #[test]
    fn missing_slider_leaves_key_absent() {
        let ticks: HashMap<String, i64> =
            [("num_sources".to_string(), 10)].into_iter().collect();
        let map = ticks_to_map(&SPATIAL_SLIDER_TABLE, &ticks);
        assert_eq!(map.len(), 1);
        assert!(!map.contains_key("eta_idler"));
    }
}
