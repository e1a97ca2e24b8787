use engram_core::config::LocalityConfig;
use engram_retrieval::locality::{locality_key, mask_key, range_around};
use proptest::prelude::*;

/// Reference derivation: quantize and interleave into a full-width u128,
/// with no storage-width masking.
fn raw_interleaved(embedding: &[f32], bits: u8, max_dims: usize) -> u128 {
    let dims = embedding.len().min(max_dims);
    let levels = (1u32 << u32::from(bits)) - 1;
    let quantized: Vec<u32> = embedding[..dims]
        .iter()
        .map(|v| {
            let unit = f64::from(v.clamp(-1.0, 1.0)) / 2.0 + 0.5;
            (unit * f64::from(levels)).round() as u32
        })
        .collect();
    let mut raw: u128 = 0;
    for bit in (0..u32::from(bits)).rev() {
        for q in &quantized {
            raw = (raw << 1) | u128::from((q >> bit) & 1);
        }
    }
    raw
}

fn arb_embedding() -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.5f32..1.5, 0..24)
}

proptest! {
    #[test]
    fn key_is_deterministic(v in arb_embedding()) {
        let cfg = LocalityConfig::default();
        prop_assert_eq!(locality_key(&v, &cfg), locality_key(&v, &cfg));
    }

    #[test]
    fn key_never_exceeds_the_storage_width(
        v in arb_embedding(),
        bits in 1u8..=8,
        max_dims in 1usize..16,
        key_bits in 4u8..=63,
    ) {
        let cfg = LocalityConfig {
            bits_per_dimension: bits,
            max_dimensions: max_dims,
            key_bits,
            ..LocalityConfig::default()
        };
        let key = locality_key(&v, &cfg);
        prop_assert!(u128::from(key) < (1u128 << key_bits));
    }

    // The stored key is exactly the raw key's low-order bits — a bitwise
    // mask, not a clamp and not a remainder by an arbitrary bucket count.
    #[test]
    fn masked_key_equals_low_order_bits_of_the_raw_key(
        v in arb_embedding(),
        bits in 1u8..=8,
        max_dims in 1usize..16,
        key_bits in 4u8..=63,
    ) {
        let cfg = LocalityConfig {
            bits_per_dimension: bits,
            max_dimensions: max_dims,
            key_bits,
            ..LocalityConfig::default()
        };
        let raw = raw_interleaved(&v, bits, max_dims);
        let expected = (raw & ((1u128 << key_bits) - 1)) as u64;
        prop_assert_eq!(locality_key(&v, &cfg), expected);

        // And specifically not clamp-to-max when the raw key is wider.
        if raw >= (1u128 << key_bits) {
            prop_assert_eq!(expected, locality_key(&v, &cfg));
            prop_assert!(expected <= ((1u128 << key_bits) - 1) as u64);
        }
    }

    #[test]
    fn out_of_range_components_behave_as_clamped(v in arb_embedding()) {
        let cfg = LocalityConfig::default();
        let clamped: Vec<f32> = v.iter().map(|x| x.clamp(-1.0, 1.0)).collect();
        prop_assert_eq!(locality_key(&v, &cfg), locality_key(&clamped, &cfg));
    }

    #[test]
    fn range_brackets_the_key(key in 0u64..u32::MAX as u64, radius in 0u64..100_000) {
        let (low, high) = range_around(key, radius, 32);
        prop_assert!(low <= key);
        prop_assert!(high >= key.min((1u64 << 32) - 1));
        prop_assert!(high < (1u64 << 32));
    }
}
