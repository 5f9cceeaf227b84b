//! Default curves synthesized from boiler geometry.
//!
//! A locomotive definition may omit any of the calibration curves; these
//! builders produce a usable default from the geometry the definition does
//! carry. The shapes are curve fits against reference locomotive data, not
//! first-principles derivations, and their constants are kept as calibrated.

use crate::tables::TableGeometry;
use fp_core::Real;

/// Superheat temperature rise (K above saturation) against cylinder steam
/// flow as a fraction of maximum. Peak rise scales with the ratio of
/// superheater to evaporation heating area; 0.4 is the reference ratio of
/// the locomotives the fit was made against.
pub(crate) fn superheat_temp_rise(geom: &TableGeometry) -> Vec<(Real, Real)> {
    let area_ratio = if geom.evaporation_area_m2 > 0.0 {
        geom.superheat_area_m2 / geom.evaporation_area_m2
    } else {
        0.0
    };
    let peak_k = 170.0 * (area_ratio / 0.4).clamp(0.0, 1.2);
    vec![
        (0.0, 0.0),
        (0.1, 0.55 * peak_k),
        (0.25, 0.85 * peak_k),
        (0.5, peak_k),
        (0.75, 0.95 * peak_k),
        (1.0, 0.88 * peak_k),
    ]
}

/// Initial pressure drop between steam chest and cylinder, as a retained
/// fraction of chest pressure over wheel speed (rev/s) and cutoff. Ports
/// choke harder at speed, and a longer cutoff holds the valve open through
/// more of the stroke.
pub(crate) fn initial_pressure_drop_grid() -> (Vec<Real>, Vec<Real>, Vec<Vec<Real>>) {
    let revs: Vec<Real> = vec![0.0, 1.0, 2.0, 3.0, 4.0, 6.0, 8.0, 10.0, 12.0];
    let cutoffs: Vec<Real> = vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9];
    let zs = revs
        .iter()
        .map(|&r| {
            cutoffs
                .iter()
                .map(|&c| 1.0 / (1.0 + 0.18 * r * (1.2 - c)))
                .collect()
        })
        .collect();
    (revs, cutoffs, zs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geom() -> TableGeometry {
        TableGeometry {
            max_boiler_pressure_psi: 200.0,
            evaporation_area_m2: 250.0,
            superheat_area_m2: 100.0,
            grate_area_m2: 4.0,
        }
    }

    #[test]
    fn superheat_peak_scales_with_area_ratio() {
        let full = superheat_temp_rise(&geom());
        let mut small = geom();
        small.superheat_area_m2 = 25.0;
        let partial = superheat_temp_rise(&small);
        let peak_full = full.iter().map(|p| p.1).fold(0.0, Real::max);
        let peak_partial = partial.iter().map(|p| p.1).fold(0.0, Real::max);
        assert!(peak_full > peak_partial);
        assert!(peak_partial > 0.0);
    }

    #[test]
    fn superheat_zero_for_saturated_geometry() {
        let mut sat = geom();
        sat.superheat_area_m2 = 0.0;
        let curve = superheat_temp_rise(&sat);
        assert!(curve.iter().all(|p| p.1 == 0.0));
    }

    #[test]
    fn pressure_drop_grid_shape_and_trends() {
        let (revs, cutoffs, zs) = initial_pressure_drop_grid();
        assert_eq!(zs.len(), revs.len());
        assert_eq!(zs[0].len(), cutoffs.len());
        // stationary wheel passes full pressure
        assert!(zs[0].iter().all(|&z| (z - 1.0).abs() < 1e-12));
        // ratio falls with speed at fixed cutoff
        for j in 0..cutoffs.len() {
            for i in 1..revs.len() {
                assert!(zs[i][j] < zs[i - 1][j]);
            }
        }
        // ratio rises with cutoff at fixed nonzero speed
        for i in 1..revs.len() {
            for j in 1..cutoffs.len() {
                assert!(zs[i][j] > zs[i][j - 1]);
            }
        }
    }
}
