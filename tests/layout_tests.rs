use vizflow::core::{SizeClass, classify};

#[test]
fn width_thresholds_map_to_size_classes() {
    assert_eq!(classify(320.0).size_class, SizeClass::Small);
    assert_eq!(classify(639.9).size_class, SizeClass::Small);
    assert_eq!(classify(640.0).size_class, SizeClass::Medium);
    assert_eq!(classify(1023.9).size_class, SizeClass::Medium);
    assert_eq!(classify(1024.0).size_class, SizeClass::Large);
    assert_eq!(classify(2560.0).size_class, SizeClass::Large);
}

#[test]
fn margins_and_fonts_grow_monotonically_with_size_class() {
    let small = classify(320.0);
    let medium = classify(800.0);
    let large = classify(1400.0);

    for (narrower, wider) in [(small, medium), (medium, large)] {
        assert!(narrower.margins.top <= wider.margins.top);
        assert!(narrower.margins.right <= wider.margins.right);
        assert!(narrower.margins.bottom <= wider.margins.bottom);
        assert!(narrower.margins.left <= wider.margins.left);
        assert!(narrower.font_size_px <= wider.font_size_px);
        assert!(narrower.height <= wider.height);
    }
}

#[test]
fn layout_tracks_the_observed_container_width() {
    let layout = classify(800.0);
    assert_eq!(layout.width, 800.0);
    assert!(layout.plot_width() < 800.0);
    assert!(layout.plot_height() < layout.height);
}

#[test]
fn degenerate_widths_stay_well_formed() {
    let zero = classify(0.0);
    assert_eq!(zero.size_class, SizeClass::Small);
    assert_eq!(zero.plot_width(), 0.0);

    let negative = classify(-50.0);
    assert_eq!(negative.width, 0.0);

    let non_finite = classify(f64::NAN);
    assert_eq!(non_finite.width, 0.0);
    assert_eq!(non_finite.size_class, SizeClass::Small);
}
