//! Property: `parse(encode(b)) == b` for every value free of NaN/±Inf.

use bric::{encode, encode_pretty, parse, Bric};
use indexmap::IndexMap;
use proptest::collection::vec;
use proptest::prelude::*;

fn arb_key() -> impl Strategy<Value = String> {
    // exercise escaping and non-ASCII keys
    prop_oneof![
        "[a-z_][a-z0-9_]{0,8}",
        Just("".to_string()),
        Just("sla/sh".to_string()),
        Just("ti~lde".to_string()),
        Just("quo\"te".to_string()),
        Just("héllo".to_string()),
    ]
}

fn arb_bric() -> impl Strategy<Value = Bric> {
    let leaf = prop_oneof![
        Just(Bric::Null),
        any::<bool>().prop_map(Bric::Bool),
        // finite doubles only; the round-trip law excludes NaN/±Inf
        prop_oneof![
            any::<i32>().prop_map(|n| Bric::Num(n as f64)),
            (-1.0e9f64..1.0e9).prop_map(Bric::Num),
            Just(Bric::Num(0.0)),
            Just(Bric::Num(-0.0)),
            Just(Bric::Num(1.23e-12)),
        ],
        "[ -~]{0,12}".prop_map(Bric::Str),
        Just(Bric::Str("new\nline\ttab\"quote\\slash".to_string())),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            vec(inner.clone(), 0..6).prop_map(Bric::Arr),
            vec((arb_key(), inner), 0..6).prop_map(|pairs| {
                let mut map = IndexMap::new();
                for (k, v) in pairs {
                    map.insert(k, v);
                }
                Bric::Obj(map)
            }),
        ]
    })
}

proptest! {
    #[test]
    fn parse_encode_round_trip(b in arb_bric()) {
        let text = encode(&b);
        let back = parse(&text).unwrap();
        prop_assert_eq!(back, b);
    }

    #[test]
    fn pretty_text_parses_to_the_same_value(b in arb_bric()) {
        let compact = parse(&encode(&b)).unwrap();
        let pretty = parse(&encode_pretty(&b)).unwrap();
        prop_assert_eq!(compact, pretty);
    }
}
