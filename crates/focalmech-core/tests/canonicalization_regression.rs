use focalmech_core::{EulerAngles, unique_euler};
use std::f64::consts::{FRAC_PI_2, PI};

const PI2: f64 = 2.0 * PI;

fn assert_canonical(angles: EulerAngles, context: &str) {
    assert!(
        (0.0..=FRAC_PI_2).contains(&angles.alpha),
        "{context}: alpha out of [0, pi/2]: {}",
        angles.alpha
    );
    assert!(
        (0.0..PI2).contains(&angles.beta),
        "{context}: beta out of [0, 2*pi): {}",
        angles.beta
    );
    assert!(
        (-PI..PI).contains(&angles.gamma),
        "{context}: gamma out of [-pi, pi): {}",
        angles.gamma
    );
    if angles.alpha == FRAC_PI_2 {
        assert!(
            angles.beta < PI,
            "{context}: beta must stay below pi at vertical dip, got {}",
            angles.beta
        );
    }
    if angles.alpha < 1.0e-7 {
        assert_eq!(
            angles.gamma, 0.0,
            "{context}: gamma must vanish at degenerate dip"
        );
    }
}

#[test]
fn canonical_range_holds_across_exact_eighth_turn_multiples() {
    for alpha_index in -16..=16 {
        for beta_index in -16..=16 {
            for gamma_index in -16..=16 {
                let angles = EulerAngles::new(
                    f64::from(alpha_index) * PI / 8.0,
                    f64::from(beta_index) * PI / 8.0,
                    f64::from(gamma_index) * PI / 8.0,
                );
                let context = format!("indices ({alpha_index}, {beta_index}, {gamma_index})");
                assert_canonical(unique_euler(angles), &context);
            }
        }
    }
}

#[test]
fn canonical_range_holds_under_tiny_offsets_from_the_landmarks() {
    let offsets = [4.2e-9, -3.7e-9, 1.3e-9];
    let mut step = 0;
    for alpha_index in -16..=16 {
        for beta_index in [-16, -11, -8, -4, -1, 0, 3, 8, 12, 16] {
            for gamma_index in [-16, -9, -5, 0, 2, 7, 8, 13, 16] {
                let offset = offsets[step % offsets.len()];
                step += 1;
                let angles = EulerAngles::new(
                    f64::from(alpha_index) * PI / 8.0 + offset,
                    f64::from(beta_index) * PI / 8.0 - offset,
                    f64::from(gamma_index) * PI / 8.0 + offset,
                );
                let context =
                    format!("indices ({alpha_index}, {beta_index}, {gamma_index}) offset {offset}");
                assert_canonical(unique_euler(angles), &context);
            }
        }
    }
}

#[test]
fn canonicalization_is_idempotent_across_the_sweep() {
    for alpha_index in -16..=16 {
        for beta_index in [-13, -8, -2, 0, 5, 8, 11, 16] {
            for gamma_index in [-16, -7, -3, 0, 4, 8, 9, 15] {
                let angles = EulerAngles::new(
                    f64::from(alpha_index) * PI / 8.0,
                    f64::from(beta_index) * PI / 8.0,
                    f64::from(gamma_index) * PI / 8.0,
                );
                let once = unique_euler(angles);
                let twice = unique_euler(once);
                let context = format!("indices ({alpha_index}, {beta_index}, {gamma_index})");
                assert!(
                    (twice.alpha - once.alpha).abs() <= 1.0e-12
                        && (twice.beta - once.beta).abs() <= 1.0e-12
                        && (twice.gamma - once.gamma).abs() <= 1.0e-12,
                    "{context}: canonicalization drifted from ({}, {}, {}) to ({}, {}, {})",
                    once.alpha,
                    once.beta,
                    once.gamma,
                    twice.alpha,
                    twice.beta,
                    twice.gamma
                );
            }
        }
    }
}

#[test]
fn vertical_dip_half_plane_choice_holds_for_every_strike() {
    for beta_index in -16..=16 {
        let angles = EulerAngles::new(FRAC_PI_2, f64::from(beta_index) * PI / 8.0, 0.6);
        let canonical = unique_euler(angles);
        assert_eq!(canonical.alpha, FRAC_PI_2);
        assert!(
            canonical.beta < PI,
            "strike index {beta_index} left beta at {}",
            canonical.beta
        );
    }
}

#[test]
fn degenerate_dip_folds_rake_for_every_strike() {
    for beta_index in -16..=16 {
        for gamma in [-2.9, -0.5, 0.0, 1.4, 3.0] {
            let angles = EulerAngles::new(0.0, f64::from(beta_index) * PI / 8.0, gamma);
            let canonical = unique_euler(angles);
            assert_eq!(canonical.gamma, 0.0);
            assert_canonical(canonical, "degenerate dip");
        }
    }
}
