use std::thread;

use radial_nav::algorithms::geometry::{from_local_cartesian, to_local_cartesian};
use radial_nav::algorithms::projection::geodesic_distance;
use radial_nav::processing::codec::{to_distance, to_street_label};
use radial_nav::processing::streets::StreetBand;
use radial_nav::{
    format_address, parse_address, to_address, Calibration, CalibrationUpdates,
    ConfigurationManager, GeoCoordinate, NavError, SharedCalibration, StreetTable,
};

#[test]
fn test_gps_fix_to_text_and_back() {
    let calibration = Calibration::default();
    let origin = calibration.params.origin;

    for (dlat, dlon) in [(0.004, 0.002), (-0.006, 0.003), (-0.002, -0.009), (0.008, -0.001)] {
        let geo = GeoCoordinate::new(origin.latitude() + dlat, origin.longitude() + dlon).unwrap();
        let address = to_address(&geo, &calibration);
        assert!(address.hour() < 12);
        assert!(address.minute() < 60);

        let text = format_address(&address, &calibration);
        let parsed = parse_address(&text, &calibration).unwrap();
        assert_eq!((parsed.hour(), parsed.minute()), (address.hour(), address.minute()));

        // Text keeps the distance to within one block
        let geodesic = geodesic_distance(&geo, &origin);
        assert!((parsed.distance() - geodesic).abs() <= calibration.params.block_width);
    }
}

#[test]
fn test_local_plane_round_trip() {
    let calibration = Calibration::default();
    for (text, expected) in [
        ("1:10 & B", "1:10 & B"),
        ("5:55 & K", "5:55 & K"),
        ("8:30 & Esplanade", "8:30 & Esplanade"),
        ("11:05 & 6200.5'", "11:05 & 6200'"),
    ] {
        let address = parse_address(text, &calibration).unwrap();
        let back = from_local_cartesian(&to_local_cartesian(&address));
        assert_eq!(format_address(&back, &calibration), expected);
    }
}

#[test]
fn test_config_file_drives_conversion() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calibration.json");

    let mut manager = ConfigurationManager::new();
    manager.set_esplanade_distance(2500.0).unwrap();
    manager.set_block_width(200.0).unwrap();
    manager.save_to_file(&path).unwrap();

    let loaded = ConfigurationManager::from_file(&path).unwrap();
    let calibration = loaded.calibration();
    assert_eq!(to_street_label(2700.0, calibration), "A");
    assert_eq!(to_distance("B", calibration), 3000.0);
    assert_eq!(
        format_address(&parse_address("3:00 & B", calibration).unwrap(), calibration),
        "3:00 & B"
    );
}

#[test]
fn test_custom_street_table_from_config() {
    let mut manager = ConfigurationManager::new();
    let table = StreetTable::custom(
        vec![
            StreetBand::new(2600.0, "Esplanade"),
            StreetBand::new(2800.0, "Awe"),
            StreetBand::new(3100.0, "Bliss"),
        ],
        3400.0,
    )
    .unwrap();
    manager.set_street_table(table).unwrap();

    let calibration = manager.calibration();
    assert_eq!(to_street_label(2900.0, calibration), "Awe");
    assert_eq!(to_street_label(3500.0, calibration), "3500'");
    let address = parse_address("7:00 & bliss", calibration).unwrap();
    assert_eq!(address.distance(), 3250.0);
}

#[test]
fn test_errors_convert_into_nav_error() {
    let calibration = Calibration::default();
    let err: NavError = parse_address("7 & A", &calibration).unwrap_err().into();
    assert!(matches!(err, NavError::Parse(_)));

    let err: NavError = ConfigurationManager::from_file("/nonexistent/calibration.json")
        .unwrap_err()
        .into();
    assert!(matches!(err, NavError::Config(_)));
}

#[test]
fn test_conversions_during_recalibration() {
    let shared = SharedCalibration::default();
    let geo = GeoCoordinate::new(40.7790, -119.2065).unwrap();

    let converters: Vec<_> = (0..4)
        .map(|_| {
            let shared = shared.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    let calibration = shared.snapshot();
                    let address = to_address(&geo, &calibration);
                    let text = format_address(&address, &calibration);
                    assert!(parse_address(&text, &calibration).is_ok());
                }
            })
        })
        .collect();

    for width in [200.0, 220.0, 240.0, 260.0] {
        shared
            .apply(&CalibrationUpdates::new().with_block_width(width))
            .unwrap();
    }

    for converter in converters {
        converter.join().unwrap();
    }
    assert_eq!(shared.snapshot().params.block_width, 260.0);
}
