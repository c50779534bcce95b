//! Encode/decode round trips through text for nested, repeated and custom
//! fields.

use json_convert::codec::{self, StrEnum};
use json_convert::{field, Converter, DecodeError, Fields, JsonNode, JsonWrite, Record};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum Mode {
    #[default]
    None,
    One,
    Two,
}

const MODES: &[(&str, Mode)] = &[("1", Mode::One), ("2", Mode::Two)];

#[derive(Debug, Clone, PartialEq, Default)]
struct Scalars {
    int_value: i32,
    bool_value: bool,
    double_value: f64,
    int64_value: i64,
    string_value: String,
    uint_value: u32,
    uint64_value: u64,
    mode: Mode,
}

impl Record for Scalars {
    fn register(fields: &mut Fields<Self>) {
        fields.field("int_value", field!(Scalars, int_value));
        fields.field("bool_value", field!(Scalars, bool_value));
        fields.field("double_value", field!(Scalars, double_value));
        fields.field("int64_value", field!(Scalars, int64_value));
        fields.field("string_value", field!(Scalars, string_value));
        fields.field("uint_value", field!(Scalars, uint_value));
        fields.field("uint64_value", field!(Scalars, uint64_value));
        fields.add(
            "mode",
            field!(Scalars, mode),
            StrEnum::new(MODES).or_encode("3"),
        );
    }
}

/// An integer carried as a decimal string.
#[derive(Debug, Clone, PartialEq, Default)]
struct Decimal {
    value: i32,
}

fn decimal_from_json(node: &Value) -> json_convert::Result<Decimal> {
    let text = node
        .get_string()
        .ok_or_else(|| DecodeError::mismatch("string", node))?;
    let value = text
        .parse()
        .map_err(|_| DecodeError::custom(format!("not a decimal: {text:?}")))?;
    Ok(Decimal { value })
}

fn decimal_to_json(decimal: &Decimal, out: &mut dyn JsonWrite) {
    out.write_string(&decimal.value.to_string());
}

#[derive(Debug, PartialEq, Default)]
struct Tree {
    scalars: Scalars,
    ints: Vec<Box<i32>>,
    bools: Vec<Box<bool>>,
    doubles: Vec<Box<f64>>,
    strings: Vec<Box<String>>,
    uint64s: Vec<Box<u64>>,
    leaves: Vec<Box<Scalars>>,
    inline_leaves: Vec<Scalars>,
    children: Vec<Box<Tree>>,
    decimals: Vec<Box<Decimal>>,
    label: Decimal,
}

impl Record for Tree {
    fn register(fields: &mut Fields<Self>) {
        fields.nested("scalars", field!(Tree, scalars));
        fields.repeated_owned("ints", field!(Tree, ints), codec::primitive());
        fields.repeated_owned("bools", field!(Tree, bools), codec::primitive());
        fields.repeated_owned("doubles", field!(Tree, doubles), codec::primitive());
        fields.repeated_owned("strings", field!(Tree, strings), codec::primitive());
        fields.repeated_owned("uint64s", field!(Tree, uint64s), codec::primitive());
        fields.repeated_owned("leaves", field!(Tree, leaves), codec::nested());
        fields.repeated("inline_leaves", field!(Tree, inline_leaves), codec::nested());
        fields.repeated_owned("children", field!(Tree, children), codec::nested());
        fields.repeated_owned(
            "decimals",
            field!(Tree, decimals),
            codec::custom(decimal_from_json, decimal_to_json),
        );
        fields.custom("label", field!(Tree, label), decimal_from_json, decimal_to_json);
    }
}

fn scalars(seed: i32) -> Scalars {
    Scalars {
        int_value: -seed,
        bool_value: seed % 2 == 0,
        double_value: f64::from(seed) + 0.25,
        int64_value: i64::from(seed) * 1_000_000_007,
        string_value: format!("leaf-{seed}"),
        uint_value: seed as u32,
        uint64_value: u64::MAX - seed as u64,
        mode: if seed % 2 == 0 { Mode::One } else { Mode::Two },
    }
}

fn tree(seed: i32, depth: usize) -> Tree {
    Tree {
        scalars: scalars(seed),
        ints: vec![Box::new(seed), Box::new(-1), Box::new(i32::MAX)],
        bools: vec![Box::new(true), Box::new(false)],
        doubles: vec![Box::new(-0.5), Box::new(1e300)],
        strings: vec![Box::new("x\"y".into()), Box::new(String::new())],
        uint64s: vec![Box::new(0), Box::new(u64::MAX)],
        leaves: vec![Box::new(scalars(seed + 1)), Box::new(scalars(seed + 2))],
        inline_leaves: vec![scalars(seed + 3)],
        children: if depth == 0 {
            Vec::new()
        } else {
            vec![
                Box::new(tree(seed * 10 + 1, depth - 1)),
                Box::new(tree(seed * 10 + 2, depth - 1)),
            ]
        },
        decimals: vec![Box::new(Decimal { value: seed }), Box::new(Decimal { value: -7 })],
        label: Decimal { value: 42 },
    }
}

#[test]
fn nested_tree_round_trips_through_text() {
    let conv = Converter::<Tree>::get();
    let original = tree(1, 3);
    let text = conv.to_text(&original);
    let decoded = conv.from_text(&text).expect("decode");
    assert_eq!(decoded, original);

    // Re-encoding the decoded tree yields the same bytes.
    assert_eq!(conv.to_text(&decoded), text);
}

#[test]
fn nested_tree_round_trips_through_value() {
    let conv = Converter::<Tree>::get();
    let original = tree(2, 2);
    let value = conv.encode(&original);
    assert_eq!(conv.decode(&value), Ok(original));
}

#[test]
fn pretty_text_decodes_to_the_same_tree() {
    let original = tree(3, 1);
    let text = Converter::<Tree>::get().pretty().to_text(&original);
    assert!(text.contains("\n  \"scalars\": {\n"));
    assert_eq!(json_convert::from_str::<Tree>(&text), Ok(original));
}

#[test]
fn keys_follow_registration_order() {
    let value = json_convert::to_value(&tree(1, 0));
    let keys: Vec<&str> = value
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(
        keys,
        [
            "scalars",
            "ints",
            "bools",
            "doubles",
            "strings",
            "uint64s",
            "leaves",
            "inline_leaves",
            "children",
            "decimals",
            "label"
        ]
    );
}

#[test]
fn scalars_encode_to_expected_json() {
    let value = json_convert::to_value(&Scalars {
        int_value: -1,
        bool_value: true,
        double_value: 2.0,
        int64_value: -3,
        string_value: "s".into(),
        uint_value: 4,
        uint64_value: 5,
        mode: Mode::None,
    });
    assert_eq!(
        value,
        json!({
            "int_value": -1,
            "bool_value": true,
            "double_value": 2.0,
            "int64_value": -3,
            "string_value": "s",
            "uint_value": 4,
            "uint64_value": 5,
            "mode": "3"
        })
    );
}

#[test]
fn custom_fields_use_caller_encoding() {
    let text = json_convert::to_string(&tree(5, 0));
    assert!(text.contains(r#""decimals":["5","-7"]"#));
    assert!(text.ends_with(r#""label":"42"}"#));
}

#[test]
fn array_order_is_preserved_for_both_shapes() {
    let mut original = tree(0, 0);
    original.ints = (0..20).rev().map(Box::new).collect();
    original.inline_leaves = (0..5).map(scalars).collect();
    let decoded = json_convert::from_str::<Tree>(&json_convert::to_string(&original)).unwrap();
    let ints: Vec<i32> = decoded.ints.iter().map(|v| **v).collect();
    assert_eq!(ints, (0..20).rev().collect::<Vec<_>>());
    assert_eq!(decoded.inline_leaves, original.inline_leaves);
}

#[test]
fn empty_tree_round_trips() {
    // `Mode::None` encodes as "3", which is not a decodable literal.
    let mut original = Tree::default();
    original.scalars.mode = Mode::One;
    assert_eq!(
        json_convert::from_str::<Tree>(&json_convert::to_string(&original)),
        Ok(original)
    );
}
