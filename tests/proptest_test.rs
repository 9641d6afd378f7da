use bencodec::{Dictionary, Integer, Value, encode, encoded_len, from_bytes, to_vec};
use bytes::Bytes;
use proptest::prelude::*;

fn arb_integer() -> impl Strategy<Value = Integer> {
    prop_oneof![
        any::<i64>().prop_map(Integer::Signed),
        any::<u64>().prop_map(Integer::Unsigned),
    ]
}

fn arb_bytes() -> impl Strategy<Value = Bytes> {
    prop::collection::vec(any::<u8>(), 0..16).prop_map(Bytes::from)
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        arb_integer().prop_map(Value::Integer),
        arb_bytes().prop_map(Value::Bytes),
    ];
    leaf.prop_recursive(6, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Value::List),
            prop::collection::vec((arb_bytes(), inner), 0..8)
                .prop_map(|entries| Value::Dict(entries.into_iter().collect())),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 512, ..ProptestConfig::default() })]

    #[test]
    fn roundtrip(value in arb_value()) {
        let dict: Dictionary = [("root", value)].into_iter().collect();
        let encoded = to_vec(&dict);
        prop_assert_eq!(from_bytes(encoded), Ok(dict));
    }

    #[test]
    fn encoded_len_is_exact(value in arb_value()) {
        prop_assert_eq!(encoded_len(&value), encode(&value).len());
    }

    #[test]
    fn insertion_order_does_not_change_bytes(
        entries in prop::collection::vec((arb_bytes(), arb_value()), 0..12)
    ) {
        let forward: Dictionary = entries.iter().cloned().collect();
        let backward: Dictionary = entries.iter().rev().cloned().collect();

        // Duplicate keys keep the last write, which differs between the two
        // orders; compare only when every key is distinct.
        let mut keys: Vec<_> = entries.iter().map(|(k, _)| k.clone()).collect();
        keys.sort();
        keys.dedup();
        prop_assume!(keys.len() == entries.len());

        prop_assert_eq!(to_vec(&forward), to_vec(&backward));
    }
}
