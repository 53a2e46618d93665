//! Property tests for the encode/decode pipeline.

use proptest::prelude::*;

use vertex_codec_core::{decode, encode, EncoderOptions, Point3, RecordFormat, VertexCodec};

fn arb_point(range: f32) -> impl Strategy<Value = Point3> {
    (-range..range, -range..range, -range..range).prop_map(|(x, y, z)| Point3::new(x, y, z))
}

fn arb_format() -> impl Strategy<Value = RecordFormat> {
    prop_oneof![Just(RecordFormat::Varint), Just(RecordFormat::Json)]
}

// Half a quantization step, plus what f32 arithmetic loses in the scale
// multiply and the reconstructing divide.
fn tolerance(value: f32, scale: u32) -> f32 {
    0.5 / scale as f32 + value.abs() * 4.0 * f32::EPSILON + 1e-6
}

fn assert_within_tolerance(original: &[Point3], restored: &[Point3], scale: u32) -> Result<(), TestCaseError> {
    prop_assert_eq!(original.len(), restored.len());
    for (i, (a, b)) in original.iter().zip(restored).enumerate() {
        for (axis, (va, vb)) in a.to_array().iter().zip(b.to_array()).enumerate() {
            prop_assert!(
                (va - vb).abs() <= tolerance(*va, scale),
                "point {} axis {}: {} restored as {}",
                i,
                axis,
                va,
                vb
            );
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn property_test_round_trip_within_half_step(points in prop::collection::vec(arb_point(1000.0), 0..64)) {
        let payload = encode(&points).unwrap();
        let restored = decode(&payload).unwrap();
        assert_within_tolerance(&points, &restored, 100)?;
    }

    #[test]
    fn property_test_custom_options_round_trip(
        points in prop::collection::vec(arb_point(100.0), 0..32),
        scale in 1u32..=10_000,
        format in arb_format(),
        level in 0u32..=9,
    ) {
        let options = EncoderOptions::new()
            .with_quantization_scale(scale)
            .with_record_format(format)
            .with_compression_level(level);
        let payload = VertexCodec::with_options(options).encode(&points).unwrap();

        // Scale and layout travel with the payload.
        let restored = decode(&payload).unwrap();
        assert_within_tolerance(&points, &restored, scale)?;
    }

    #[test]
    fn property_test_encode_is_deterministic(points in prop::collection::vec(arb_point(1000.0), 0..64)) {
        prop_assert_eq!(encode(&points).unwrap(), encode(&points).unwrap());
    }

    #[test]
    fn property_test_decode_is_stable(points in prop::collection::vec(arb_point(1000.0), 0..64)) {
        // Decoded points sit on the quantization grid, so a second pass
        // reproduces them exactly.
        let once = decode(&encode(&points).unwrap()).unwrap();
        let twice = decode(&encode(&once).unwrap()).unwrap();
        prop_assert_eq!(once, twice);
    }
}

#[test]
fn test_empty_input_round_trips() {
    let payload = encode(&[]).unwrap();
    assert!(!payload.is_empty());
    assert!(decode(&payload).unwrap().is_empty());
}

#[test]
fn test_large_cloud_round_trips() {
    let points: Vec<Point3> = (0..20_000)
        .map(|i| {
            let t = i as f32 * 0.01;
            Point3::new(t.sin() * 50.0, t.cos() * 50.0, t)
        })
        .collect();
    let payload = encode(&points).unwrap();
    let restored = decode(&payload).unwrap();
    assert_eq!(restored.len(), points.len());
    for (a, b) in points.iter().zip(&restored) {
        assert!(a.max_axis_distance(b) <= tolerance(200.0, 100));
    }
}
