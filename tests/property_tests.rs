//! Property-based tests for canonicalization and callback verification.

use proptest::prelude::*;
use rust_pay_interkassa::{
    canonicalize, compute_signature, PayError, ShopClient, ShopConfig, ShopOptions,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

// Lowercase keys of at most 8 chars never collide with `shopId` or `signature`.
fn field_map() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map("[a-z][a-z0-9_]{0,7}", "[ -~]{1,12}", 1..8)
}

fn shop(id: &str, secret: &str) -> ShopClient {
    let cfg = ShopConfig::new(ShopOptions::new(id, secret)).expect("valid shop");
    ShopClient::new(Arc::new(cfg))
}

fn flip_char(value: &str, pos: usize) -> String {
    let mut bytes = value.as_bytes().to_vec();
    let i = pos % bytes.len();
    bytes[i] = if bytes[i] == b'a' { b'b' } else { b'a' };
    String::from_utf8(bytes).expect("ascii stays utf-8")
}

proptest! {
    /// Insertion order never changes the canonical string.
    #[test]
    fn canonical_string_ignores_insertion_order(
        (map, shuffled) in field_map().prop_flat_map(|m| {
            let pairs: Vec<(String, String)> = m.clone().into_iter().collect();
            (Just(m), Just(pairs).prop_shuffle())
        })
    ) {
        let hashed: HashMap<String, String> = shuffled.iter().cloned().collect();
        let expected = canonicalize(&map);
        prop_assert_eq!(&canonicalize(shuffled.clone()), &expected);
        prop_assert_eq!(&canonicalize(shuffled.into_iter().rev()), &expected);
        prop_assert_eq!(&canonicalize(&hashed), &expected);
    }

    /// Recomputing a signature from the same inputs gives the same bytes.
    #[test]
    fn signature_is_a_pure_function(map in field_map(), secret in "[ -~]{1,32}") {
        let first = compute_signature(&map, &secret).expect("sign");
        let again = compute_signature(map.clone(), &secret).expect("sign");
        prop_assert_eq!(first.len(), 64);
        prop_assert_eq!(first, again);
    }

    /// A signed callback verifies; any one-character change to a signed value does not.
    #[test]
    fn single_character_tamper_is_detected(
        map in field_map(),
        pick in any::<usize>(),
        pos in any::<usize>(),
    ) {
        let client = shop("shop1", "s3cr3t");
        let signed = client.create_signed_payment(map.clone()).expect("sign");
        prop_assert!(client.receive_status(signed.fields().clone()).is_ok());

        let keys: Vec<&String> = map.keys().collect();
        let key = keys[pick % keys.len()];
        let mut tampered = signed.fields().clone();
        let flipped = flip_char(&tampered[key], pos);
        tampered.insert(key.clone(), flipped);

        prop_assert!(matches!(
            client.receive_status(tampered),
            Err(PayError::InvalidSignature)
        ));
    }

    /// A callback for one shop is refused by another shop on the id alone.
    #[test]
    fn other_shop_sees_mismatch(
        map in field_map(),
        id_a in "[a-z0-9]{1,10}",
        id_b in "[a-z0-9]{1,10}",
        secret_b in "[ -~]{1,16}",
    ) {
        prop_assume!(id_a != id_b);
        let a = shop(&id_a, "secret-a");
        let b = shop(&id_b, &secret_b);
        let signed = a.create_signed_payment(map).expect("sign");
        let shop_mismatch = matches!(
            b.receive_status(signed.into_fields()),
            Err(PayError::ShopMismatch { .. })
        );
        prop_assert!(shop_mismatch);
    }
}
