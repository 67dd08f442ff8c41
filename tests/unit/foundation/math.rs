use super::*;

#[test]
fn interpolate_clamps_outside_input_range() {
    assert_eq!(interpolate_clamped(-5.0, 0.0, 10.0, 45.0, 0.0), 45.0);
    assert_eq!(interpolate_clamped(5.0, 0.0, 10.0, 45.0, 0.0), 22.5);
    assert_eq!(interpolate_clamped(50.0, 0.0, 10.0, 45.0, 0.0), 0.0);
}

#[test]
fn interpolate_degenerate_range_is_a_step() {
    assert_eq!(interpolate_clamped(0.0, 0.0, 0.0, 1.05, 1.0), 1.0);
    assert_eq!(interpolate_clamped(-1.0, 0.0, 0.0, 1.05, 1.0), 1.05);
}

#[test]
fn seeded_unit_is_stable_and_bounded() {
    assert_eq!(seeded_unit(0, 0.3), 0.5);
    for ordinal in 0..256u64 {
        for k in [0.1, 0.2, 0.3, 0.4, 0.5, 0.6] {
            let a = seeded_unit(ordinal, k);
            let b = seeded_unit(ordinal, k);
            assert_eq!(a.to_bits(), b.to_bits());
            assert!((0.0..1.0).contains(&a), "ordinal={ordinal} k={k} v={a}");
        }
    }
}

#[test]
fn seeded_range_respects_bounds() {
    for ordinal in 0..64u64 {
        let v = seeded_range(ordinal, 0.4, -60.0, 60.0);
        assert!((-60.0..=60.0).contains(&v));
    }
}

#[test]
fn mix64_spreads_neighbouring_inputs() {
    assert_ne!(mix64(0), mix64(1));
    assert_eq!(mix64(42), mix64(42));
}
