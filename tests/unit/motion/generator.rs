use super::*;

fn bits(m: MotionTransform) -> [u64; 4] {
    [
        m.pan.x.to_bits(),
        m.pan.y.to_bits(),
        m.scale.to_bits(),
        m.rotation_deg.to_bits(),
    ]
}

#[test]
fn directional_starts_offset_and_settles() {
    let cfg = MotionConfig::default();
    // ordinal 0 => bottom preset, 100 frames => 60 frame window.
    let first = motion_at(0, 0, 100, &cfg);
    assert_eq!(first.pan, Vec2::new(0.0, 45.0));
    assert_eq!(first.scale, 1.05);

    let mid = motion_at(0, 30, 100, &cfg);
    assert_eq!(mid.pan, Vec2::new(0.0, 22.5));

    for f in [60, 61, 99] {
        let held = motion_at(0, f, 100, &cfg);
        assert_eq!(held.pan, Vec2::ZERO);
        assert_eq!(held.scale, 1.0);
    }
}

#[test]
fn directional_window_uses_floor() {
    let cfg = MotionConfig::default();
    // floor(7 * 0.6) = 4
    let m = motion_at(2, 2, 7, &cfg);
    assert_eq!(m.pan, Vec2::new(-25.0, 0.0));
    assert_eq!(motion_at(2, 4, 7, &cfg).pan, Vec2::ZERO);
}

#[test]
fn directional_zero_window_is_end_state() {
    let cfg = MotionConfig::default();
    let m = motion_at(5, 0, 1, &cfg);
    assert_eq!(m.pan, Vec2::ZERO);
    assert_eq!(m.scale, 1.0);
}

#[test]
fn directional_values_stay_within_bounds_even_past_duration() {
    let cfg = MotionConfig::default();
    for ordinal in 0..16u64 {
        let preset = PanPreset::for_ordinal(ordinal);
        let (x_lo, x_hi) = min_max(preset.start.x, preset.end.x);
        let (y_lo, y_hi) = min_max(preset.start.y, preset.end.y);
        for local in 0..200u64 {
            let m = motion_at(ordinal, local, 50, &cfg);
            assert!((1.0..=1.05).contains(&m.scale), "scale {}", m.scale);
            assert!((x_lo..=x_hi).contains(&m.pan.x));
            assert!((y_lo..=y_hi).contains(&m.pan.y));
        }
    }
}

fn min_max(a: f64, b: f64) -> (f64, f64) {
    (a.min(b), a.max(b))
}

#[test]
fn motion_is_pure() {
    let cfg = MotionConfig {
        ken_burns: KenBurnsMode::seeded(),
        swirl: Some(SwirlConfig::default()),
    };
    for ordinal in [0u64, 1, 7, 31] {
        for local in [0u64, 3, 14, 15, 40] {
            let a = motion_at(ordinal, local, 48, &cfg);
            let b = motion_at(ordinal, local, 48, &cfg);
            assert_eq!(bits(a), bits(b));
        }
    }
}

#[test]
fn seeded_mode_stays_in_bounds_and_varies_by_ordinal() {
    let mode = KenBurnsMode::seeded();
    let cfg = MotionConfig {
        ken_burns: mode,
        swirl: None,
    };
    for ordinal in 0..32u64 {
        for local in [0u64, 10, 20, 100] {
            let m = motion_at(ordinal, local, 20, &cfg);
            assert!((1.0..=1.15).contains(&m.scale));
            assert!(m.pan.x.abs() <= 40.0 && m.pan.y.abs() <= 40.0);
        }
    }
    assert_ne!(motion_at(1, 0, 20, &cfg), motion_at(2, 0, 20, &cfg));
}

#[test]
fn seeded_mode_moves_across_the_whole_duration() {
    let cfg = MotionConfig {
        ken_burns: KenBurnsMode::seeded(),
        swirl: None,
    };
    // Directional mode would already hold at 80% of the duration.
    let at_80 = motion_at(3, 80, 100, &cfg);
    let at_100 = motion_at(3, 100, 100, &cfg);
    assert_ne!(at_80.pan, at_100.pan);
}

#[test]
fn jitter_depends_on_global_frame_and_ordinal() {
    let cfg = JitterConfig::default();
    let a = jitter_at(10, 0, &cfg);
    let b = jitter_at(10, 0, &cfg);
    assert_eq!(a.x.to_bits(), b.x.to_bits());
    assert_eq!(a.y.to_bits(), b.y.to_bits());
    assert_ne!(jitter_at(10, 0, &cfg), jitter_at(11, 0, &cfg));
    assert_ne!(jitter_at(10, 0, &cfg), jitter_at(10, 1, &cfg));
}

#[test]
fn jitter_is_bounded_by_intensity() {
    let cfg = JitterConfig {
        speed: 1.0,
        intensity: 8.0,
    };
    for f in 0..500u64 {
        let j = jitter_at(f, f % 7, &cfg);
        assert!(j.x.abs() <= 8.0 + 1e-9 && j.y.abs() <= 8.0 + 1e-9);
    }
    assert_eq!(jitter_at(0, 0, &cfg).x, 0.0);
}

#[test]
fn swirl_spins_in_then_releases() {
    let cfg = SwirlConfig::default();
    assert_eq!(swirl_at(0, &cfg), (720.0, 0.3));
    let (rot, scale) = swirl_at(14, &cfg);
    assert!(rot > 0.0 && rot < 720.0);
    assert!(scale > 0.3 && scale < 1.0);
    assert_eq!(swirl_at(15, &cfg), (0.0, 1.0));
    assert_eq!(swirl_at(400, &cfg), (0.0, 1.0));
}

#[test]
fn swirl_is_off_by_default() {
    let cfg = MotionConfig::default();
    assert!(cfg.swirl.is_none());
    assert_eq!(motion_at(0, 0, 30, &cfg).rotation_deg, 0.0);
}

#[test]
fn swirl_multiplies_base_scale() {
    let cfg = MotionConfig {
        ken_burns: KenBurnsMode::default(),
        swirl: Some(SwirlConfig::default()),
    };
    let m = motion_at(0, 0, 100, &cfg);
    assert_eq!(m.rotation_deg, 720.0);
    assert!((m.scale - 1.05 * 0.3).abs() < 1e-12);
}

#[test]
fn identity_transform_maps_to_identity_affine() {
    let a = MotionTransform::default().to_affine(Vec2::new(540.0, 960.0));
    let p = a * kurbo::Point::new(12.0, 34.0);
    assert!((p.x - 12.0).abs() < 1e-9 && (p.y - 34.0).abs() < 1e-9);
}

#[test]
fn scale_pivots_about_anchor() {
    let m = MotionTransform {
        pan: Vec2::new(5.0, 0.0),
        scale: 2.0,
        rotation_deg: 0.0,
    };
    let anchor = Vec2::new(10.0, 10.0);
    let p = m.to_affine(anchor) * kurbo::Point::new(10.0, 10.0);
    assert!((p.x - 15.0).abs() < 1e-9 && (p.y - 10.0).abs() < 1e-9);
}

#[test]
fn validate_rejects_bad_parameters() {
    let bad = KenBurnsMode::Directional {
        start_scale: 1.05,
        end_scale: 1.0,
        window_fraction: 1.5,
    };
    assert!(matches!(
        bad.validate().unwrap_err(),
        ReelError::InvalidConfig(_)
    ));
    let inverted = KenBurnsMode::Seeded {
        min_scale: 1.2,
        max_scale: 1.0,
        pan_distance: 10.0,
    };
    assert!(inverted.validate().is_err());
    assert!(
        JitterConfig {
            speed: f64::NAN,
            intensity: 1.0
        }
        .validate()
        .is_err()
    );
    assert!(KenBurnsMode::default().validate().is_ok());
    assert!(KenBurnsMode::seeded().validate().is_ok());
}

#[test]
fn ken_burns_mode_deserializes_with_defaults() {
    let m: KenBurnsMode = serde_json::from_str(r#"{"mode":"directional"}"#).unwrap();
    assert_eq!(m, KenBurnsMode::default());
    let s: KenBurnsMode = serde_json::from_str(r#"{"mode":"seeded","pan_distance":10}"#).unwrap();
    assert_eq!(
        s,
        KenBurnsMode::Seeded {
            min_scale: 1.0,
            max_scale: 1.15,
            pan_distance: 10.0
        }
    );
}
