//! Property-based tests for codec round-trips using the `proptest` crate.

use proptest::prelude::*;

use stl_codec::{decode, encode, EncodeOptions, Mesh, Triangle, Vec3};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// Any finite f32: normal, subnormal or zero, either sign.
fn arb_finite() -> impl Strategy<Value = f32> {
    use proptest::num::f32::{NEGATIVE, NORMAL, POSITIVE, SUBNORMAL, ZERO};
    POSITIVE | NEGATIVE | NORMAL | SUBNORMAL | ZERO
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (arb_finite(), arb_finite(), arb_finite()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn arb_triangle() -> impl Strategy<Value = Triangle> {
    (arb_vec3(), arb_vec3(), arb_vec3(), arb_vec3())
        .prop_map(|(n, a, b, c)| Triangle::new(n, a, b, c))
}

fn arb_mesh() -> impl Strategy<Value = Mesh> {
    prop::collection::vec(arb_triangle(), 0..40).prop_map(Mesh::from)
}

/// Solid names that keep the first line a single line.
fn arb_name() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_ .-]{0,40}"
}

// ---------------------------------------------------------------------------
// 1. Binary round-trip is bit-exact
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn binary_roundtrip_is_bit_exact(mesh in arb_mesh(), name in arb_name()) {
        let bytes = encode(&mesh, &EncodeOptions::binary(name)).unwrap();
        prop_assert_eq!(bytes.len(), 84 + mesh.len() * 50);
        let back = decode(&bytes).unwrap();
        prop_assert!(back.bits_eq(&mesh), "binary round-trip changed the mesh");
    }
}

// ---------------------------------------------------------------------------
// 2. ASCII round-trip is value-exact once both sides are f32
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn ascii_roundtrip_is_value_exact(mesh in arb_mesh(), name in arb_name()) {
        let bytes = encode(&mesh, &EncodeOptions::ascii(name)).unwrap();
        let back = decode(&bytes).unwrap();
        prop_assert_eq!(back, mesh);
    }
}

// ---------------------------------------------------------------------------
// 3. Bounding box equals an independent min/max scan
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn bounding_box_matches_manual_scan(
        mesh in prop::collection::vec(arb_triangle(), 1..40).prop_map(Mesh::from),
    ) {
        let bytes = encode(&mesh, &EncodeOptions::default()).unwrap();
        let decoded = decode(&bytes).unwrap();
        let bb = decoded.bounding_box().unwrap();

        let mut min = [f32::INFINITY; 3];
        let mut max = [f32::NEG_INFINITY; 3];
        for t in &mesh.triangles {
            for v in &t.vertices {
                for (axis, c) in v.to_array().into_iter().enumerate() {
                    min[axis] = min[axis].min(c);
                    max[axis] = max[axis].max(c);
                }
            }
        }
        prop_assert_eq!(bb.min.to_array(), min);
        prop_assert_eq!(bb.max.to_array(), max);
    }
}
