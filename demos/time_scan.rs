//! Time multiplexing scan: emission probability vs round-trip count.
//!
//! Outputs CSV: num_roundtrips,m_photon_prob
//!
//! Run with:
//!   cargo run --example time_scan

use photon_mux_sim::prelude::*;

fn main() {
    let params = TimeMuxParams {
        num_roundtrips: 100,
        mean_photon_num: 0.18,
        trigger_eff: 0.53,
        num_trigger: 10,
        delay_line_trans: 0.988,
        optics_trans: 0.83,
        m_photon_num: 1,
        pair_truncation: DEFAULT_PAIR_TRUNCATION,
    };

    let model = TimeMuxModel::new(params).expect("valid parameters");
    let curve = model.probability_curve().expect("finite curve");

    println!("num_roundtrips,m_photon_prob");
    for (n, p) in model.mode_array().iter().zip(&curve) {
        println!("{},{:.6}", n, p);
    }

    println!();
    println!("# herald channels: {}", params.num_trigger);
    println!("# target multiplicity: {}", params.m_photon_num);
    let herald = model
        .multiplex_herald_prob(params.num_trigger, 20)
        .expect("finite herald probabilities");
    println!(
        "# herald probability from the first of 20 round trips: {:.6}",
        herald[0]
    );
}
