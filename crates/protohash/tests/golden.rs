use protohash::dynamic::{DynamicMessage, Value};
use protohash::{Digest, Kind, ProtoHasher};

fn assert_digest(message: &DynamicMessage, expected: &str) {
    let digest = ProtoHasher::new().hash_message(message).unwrap();
    assert_eq!(digest, Digest::parse_hex(expected).unwrap(), "got {digest}");
}

fn with_list<V: Into<Value>>(
    kind: Kind,
    values: impl IntoIterator<Item = V>,
) -> DynamicMessage {
    let mut message = DynamicMessage::new();
    message.set_list(1, kind, values);
    message
}

fn with_field(value: impl Into<Value>) -> DynamicMessage {
    let mut message = DynamicMessage::new();
    message.set_explicit(1, value);
    message
}

#[test]
fn empty_message_digests_to_zero() {
    assert_digest(&DynamicMessage::new(), "0");
}

#[test]
fn string_lists() {
    assert_digest(&with_list(Kind::String, [""]), "bab48eecfa8cd51a");
    assert_digest(&with_list(Kind::String, ["foo"]), "e781d93648f4e29b");
    assert_digest(&with_list(Kind::String, ["foo", "bar"]), "5e398a810a1e8af7");
    assert_digest(
        &with_list(Kind::String, ["", "Test", "你好", "\u{03d3}"]),
        "ee1bfab42da1d7fe",
    );
}

#[test]
fn integer_lists() {
    assert_digest(&with_list(Kind::Uint, [0u64, 1, 2]), "cc2ab53c181c4329");
    assert_digest(&with_list(Kind::Int, [0i64, 1, 2]), "cc2ab53c181c4329");
    assert_digest(&with_list(Kind::Int, [-2i32, -1, 0, 1, 2]), "8e40d97221a0dba3");
    assert_digest(&with_list(Kind::Int, [0i64]), "88abed3eda001f87");
    assert_digest(
        &with_list(Kind::Int, [123456789012345i64, 678901234567890]),
        "e7c4423fe65d2f08",
    );
}

#[test]
fn floating_point_lists() {
    let doubles = [-2.0f64, -1.0, 0.0, 1.0, 2.0];
    let floats = [-2.0f32, -1.0, 0.0, 1.0, 2.0];
    assert_digest(&with_list(Kind::Double, doubles), "3df0da89a348c288");
    assert_digest(&with_list(Kind::Float, floats), "3df0da89a348c288");
    assert_digest(&with_list(Kind::Float, [0.0f32]), "88abed3eda001f87");
    assert_digest(&with_list(Kind::Double, [1.0f64, 2.0, 3.0]), "96c4f986cedc148");
    assert_digest(&with_list(Kind::Float, [1.0f32, 2.0, 3.0]), "96c4f986cedc148");
    assert_digest(
        &with_list(Kind::Double, [1.2345f64, -10.1234]),
        "d317c8afdac508cc",
    );
    assert_digest(
        &with_list(
            Kind::Double,
            [1.0f64, 1.5, 0.0001, 1000.9999999, 2.0, -23.1234, 2.32542],
        ),
        "ca0d702cfcb510b9",
    );
    assert_digest(
        &with_list(Kind::Double, [123456789012345.0f64, 678901234567890.0]),
        "66ed2a9a6f6b8684",
    );
}

#[test]
fn floats_equal_doubles_when_promotion_is_exact() {
    let doubles = [0.0078125f64, 7.888609052210118e-31];
    let floats = [0.0078125f32, 7.888609052210118e-31];
    assert_digest(&with_list(Kind::Double, doubles), "ad21263b80785c33");
    assert_digest(&with_list(Kind::Float, floats), "ad21263b80785c33");

    let doubles = [
        -1.0f64,
        1.5,
        1000.000244140625,
        1267650600228229401496703205376.0,
        32.0,
        13.0009765625,
    ];
    let floats = [
        -1.0f32,
        1.5,
        1000.000244140625,
        1267650600228229401496703205376.0,
        32.0,
        13.0009765625,
    ];
    assert_digest(&with_list(Kind::Double, doubles), "780f95ae6c09ac4f");
    assert_digest(&with_list(Kind::Float, floats), "780f95ae6c09ac4f");
}

#[test]
fn float_precision_is_not_rounded_away() {
    assert_digest(&with_field(0.1f64), "3703e1c494c5c8e9");
    assert_digest(&with_field(0.1f32), "4b12cde041073c56");
    assert_digest(&with_field(1.0000000149011612e-1f64), "4b12cde041073c56");
    assert_digest(&with_field(1e25f64), "b0c41f10e61fe56a");
    assert_digest(&with_field(1.2163543e25f32), "8cf0a1724e22238c");
}

#[test]
fn special_floating_point_values() {
    assert_digest(
        &with_field(f64::from_bits(0x7ff8_0000_0000_0001)),
        "e1ccffaf73d7415e",
    );
    assert_digest(&with_field(f32::NAN), "93d5337cc141c0de");
    assert_digest(&with_field(f64::INFINITY), "989db45457ac5739");
    assert_digest(&with_field(f32::INFINITY), "989db45457ac5739");
    assert_digest(&with_field(f64::NEG_INFINITY), "1057aef55fca7774");
    assert_digest(&with_field(f32::NEG_INFINITY), "1057aef55fca7774");
}

#[test]
fn scalars() {
    assert_digest(&with_field(true), "f7a206297de86dbe");
    assert_digest(&with_field(vec![0u8, 0, 0]), "cb59b0693719a410");
    assert_digest(&with_field(99i32), "7ad488431568d7ef");
    assert_digest(&with_field(99u64), "7ad488431568d7ef");
}

#[test]
fn enums_digest_as_integers() {
    assert_digest(&with_field(Value::Enum(-3)), "a6c0056b9c3155a2");
    assert_digest(&with_field(-3i64), "a6c0056b9c3155a2");
    assert_digest(&with_list(Kind::Enum, [Value::Enum(2)]), "4eb7b6bb74d6a3a8");

    let mut message = DynamicMessage::new();
    message.set(1, Value::Enum(0));
    assert_digest(&message, "0");
}

#[test]
fn strings_are_hashed_without_normalization() {
    assert_digest(&with_field("TEST!"), "6e388481a9f4259e");
    assert_digest(&with_field("你好"), "e2dd2a3d97f401ac");
    assert_digest(&with_field("\u{03d3}"), "889bf3c60923cb21");
    assert_digest(&with_field("\u{03d2}\u{0301}"), "6b17ebd06d7ba11d");
}

#[test]
fn string_maps() {
    let mut message = DynamicMessage::new();
    message.insert_entry(1, "foo", "bar");
    assert_digest(&message, "c5f3d4ac79aa224b");

    let mut message = DynamicMessage::new();
    message
        .insert_entry(1, "", "你好")
        .insert_entry(1, "你好", "\u{03d3}")
        .insert_entry(1, "\u{03d3}", "\u{03d2}\u{0301}");
    assert_digest(&message, "fd2644e21e9d8a32");
}

#[test]
fn bool_and_int_keyed_maps() {
    let mut message = DynamicMessage::new();
    message
        .insert_entry(1, true, "NOT FALSE")
        .insert_entry(1, false, "NOT TRUE");
    assert_digest(&message, "6f6b5869cdd9333");

    let mut message = DynamicMessage::new();
    message.insert_entry(1, 0i64, "ZERO");
    assert_digest(&message, "cb97c968692e8b24");
}

#[test]
fn map_of_messages() {
    let mut message = DynamicMessage::new();
    message.insert_entry(1, "foo", DynamicMessage::new());
    assert_digest(&message, "c76d7fcd4b54fd92");
}

#[test]
fn message_lists() {
    let mut a = DynamicMessage::new();
    a.set(1, -3i64);
    let b = DynamicMessage::new();

    let forward = with_list(Kind::Message, [a.clone(), b.clone()]);
    let backward = with_list(Kind::Message, [b, a]);
    assert_digest(&forward, "ac4f7d8b63538838");
    assert_digest(&backward, "bc261b3a23d804c3");
}

#[test]
fn oneof_members_with_default_values_are_present() {
    let mut message = DynamicMessage::new();
    message.set_oneof("singleton", 1, false);
    assert_digest(&message, "fc42f4d44454522d");

    let mut message = DynamicMessage::new();
    message.set_oneof("singleton", 2, "");
    assert_digest(&message, "5fd4b748b2f5442c");

    let mut message = DynamicMessage::new();
    message.set_oneof("singleton", 3, 0i32);
    assert_digest(&message, "cb720bf58a2c29ec");
}

#[test]
fn nested_empty_messages() {
    let mut message = DynamicMessage::new();
    message.set_oneof("singleton", 4, DynamicMessage::new());
    assert_digest(&message, "88201fb960ff6465");

    let mut inner = DynamicMessage::new();
    inner.set_oneof("singleton", 4, DynamicMessage::new());
    let mut outer = DynamicMessage::new();
    outer.set_oneof("singleton", 4, inner);
    assert_digest(&outer, "661a6df2c7688a1b");
}

#[test]
fn digests_serialize_as_padded_hex() {
    let digest = ProtoHasher::new().hash_message(&with_field(true)).unwrap();
    assert_eq!(
        serde_json::to_string(&digest).unwrap(),
        r#""f7a206297de86dbe""#
    );

    let mut message = DynamicMessage::new();
    message
        .insert_entry(1, true, "NOT FALSE")
        .insert_entry(1, false, "NOT TRUE");
    let digest = ProtoHasher::new().hash_message(&message).unwrap();
    assert_eq!(digest.to_string(), "06f6b5869cdd9333");
}
