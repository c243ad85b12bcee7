// Host-side tests for options parsing and render presets.

use globe_core::constants::*;
use globe_core::{GlobeError, GlobeOptions, RenderConfig, SurfaceMetrics};

#[test]
fn default_options_match_landing_page() {
    let o = GlobeOptions::default();
    assert_eq!(o.size, 600);
    assert!(o.dark_mode);
}

#[test]
fn zero_size_is_rejected() {
    assert!(matches!(
        GlobeOptions::new(0, true),
        Err(GlobeError::InvalidOption { name: "size", .. })
    ));
    assert!(GlobeOptions::new(1, false).is_ok());
}

#[test]
fn attributes_parse_with_fallbacks() {
    assert_eq!(
        GlobeOptions::from_attrs(None, None).unwrap(),
        GlobeOptions::default()
    );
    let o = GlobeOptions::from_attrs(Some("480px"), Some("light")).unwrap();
    assert_eq!((o.size, o.dark_mode), (480, false));
    let o = GlobeOptions::from_attrs(Some(" 320 "), Some("TRUE")).unwrap();
    assert_eq!((o.size, o.dark_mode), (320, true));
    assert!(GlobeOptions::from_attrs(Some("big"), None).is_err());
    assert!(GlobeOptions::from_attrs(None, Some("maybe")).is_err());
    assert!(GlobeOptions::from_attrs(Some("0"), None).is_err());
}

#[test]
fn presets_carry_original_tuning() {
    let dark = RenderConfig::dark();
    assert_eq!(dark.device_pixel_ratio, DEFAULT_DEVICE_PIXEL_RATIO);
    assert_eq!(dark.tilt, 0.25);
    assert_eq!(dark.diffuse_strength, 1.8);
    assert_eq!(dark.map_sample_density, 20_000);
    assert_eq!(dark.map_brightness, 4.0);
    assert_eq!(dark.opacity, 0.85);
    assert_eq!(dark.base_color, [0.15, 0.22, 0.15]);

    let light = RenderConfig::light();
    assert_eq!(light.map_brightness, 6.0);
    assert_eq!(light.base_color, [0.9, 0.95, 0.9]);
    assert_eq!(light.marker_color, dark.marker_color);
    assert!(!light.dark_mode);
}

#[test]
fn options_select_preset_and_size() {
    let c = RenderConfig::from_options(&GlobeOptions::new(300, false).unwrap());
    assert_eq!(c.pixel_size, 300);
    assert!(!c.dark_mode);
    assert_eq!(c.backing_size(), 600);
}

#[test]
fn metrics_retarget_only_surface_fields() {
    let base = RenderConfig::dark();
    let c = base.with_metrics(&SurfaceMetrics::new(500.0, 420.5, 1.5));
    assert_eq!(c.pixel_size, 420);
    assert_eq!(c.device_pixel_ratio, 1.5);
    assert_eq!(c.backing_size(), 630);
    assert_eq!(c.base_color, base.base_color);
    assert_eq!(c.map_sample_density, base.map_sample_density);
}

#[test]
fn surface_metrics_validation() {
    assert!(SurfaceMetrics::new(10.0, 10.0, 1.0).is_laid_out());
    assert!(!SurfaceMetrics::new(0.0, 10.0, 1.0).is_laid_out());
    assert!(!SurfaceMetrics::new(f64::NAN, 10.0, 1.0).is_laid_out());
    assert_eq!(SurfaceMetrics::new(10.0, 10.0, 0.0).dpr(), 1.0);
    assert_eq!(SurfaceMetrics::new(10.0, 10.0, f64::NAN).dpr(), 1.0);
}

#[test]
fn brighter_map_means_more_opaque_land() {
    let dark = RenderConfig::dark();
    let light = RenderConfig::light();
    assert!(light.land_alpha() > dark.land_alpha());
    assert!(light.land_alpha() < light.opacity);
}

#[test]
fn oversized_surfaces_are_rejected_or_capped() {
    assert!(GlobeOptions::new(MAX_SIZE_PX, true).is_ok());
    assert!(matches!(
        GlobeOptions::new(MAX_SIZE_PX + 1, true),
        Err(GlobeError::InvalidOption { name: "size", .. })
    ));
    assert!(GlobeOptions::new(3_000_000_000, true).is_err());
    assert!(GlobeOptions::from_attrs(Some("3000000000"), None).is_err());

    // A measured layout larger than any accepted option is clamped
    let huge = SurfaceMetrics::new(1.0e9, 1.0e9, 3.0);
    let c = RenderConfig::dark().with_metrics(&huge);
    assert_eq!(c.pixel_size, MAX_SIZE_PX);
    assert_eq!(c.backing_size(), MAX_BACKING_PX);
    let c = RenderConfig {
        pixel_size: u32::MAX,
        device_pixel_ratio: 1.0e6,
        ..RenderConfig::dark()
    };
    assert_eq!(c.backing_size(), MAX_BACKING_PX);
}
