// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decoding an emitted record gives back exactly the fields and message that went in.

use branchlog::context::Context;
use branchlog::field::resolve;
use branchlog::{Config, Field, InMemorySink, JsonEncoder, Level, LoggerFactory, Value};
use std::sync::Arc;

#[test]
fn emitted_records_decode_to_their_inputs() {
    let sink = Arc::new(InMemorySink::new());
    let factory = LoggerFactory::new(sink.clone());

    let context = Context::root()
        .branch([("service", "billing")])
        .branch([
            Field::new("attempt", 3),
            Field::new("retry", true),
            Field::new("owner", Value::Null),
        ]);
    let call = [
        Field::new("invoice", vec![Field::new("id", 991), Field::new("paid", false)]),
        Field::new("large", u64::MAX),
    ];
    factory
        .logger(&context)
        .emit(Level::Warn, &call, "charge retried")
        .unwrap();

    let record = branchlog::decode_line(sink.drain().as_bytes()).unwrap();
    assert_eq!(record.level(), Level::Warn);
    assert_eq!(record.message(), "charge retried");

    let mut expected: Vec<Field> = context.flatten().into_iter().cloned().collect();
    expected.extend(call.iter().cloned());
    assert_eq!(record.fields(), expected.as_slice());
}

#[test]
fn explicit_small_uint_round_trips() {
    let sink = Arc::new(InMemorySink::new());
    let call = [
        Field::new("n", Value::Uint(5)),
        Field::new("nested", vec![Field::new("m", Value::Uint(0))]),
    ];
    Context::root()
        .logger(sink.clone())
        .emit(Level::Info, &call, "m")
        .unwrap();

    let record = branchlog::decode_line(sink.drain().as_bytes()).unwrap();
    assert_eq!(record.fields(), call.as_slice());
    assert_eq!(record.get("n"), Some(&Value::Int(5)));
}

#[test]
fn duplicates_decode_as_last_wins() {
    let sink = Arc::new(InMemorySink::new());
    let context = Context::root()
        .branch([("k", 1), ("a", 0)])
        .branch([("k", 2)]);
    let call = [Field::new("k", 3)];
    context
        .logger(sink.clone())
        .emit(Level::Info, &call, "m")
        .unwrap();

    let record = branchlog::decode_line(sink.drain().as_bytes()).unwrap();
    let all: Vec<&Field> = context.flatten().into_iter().chain(call.iter()).collect();
    let expected: Vec<(&str, &Value)> = resolve(all);
    let decoded: Vec<(&str, &Value)> = record
        .fields()
        .iter()
        .map(|f| (f.name(), f.value()))
        .collect();
    assert_eq!(decoded, expected);
    assert_eq!(record.get("k"), Some(&Value::Int(3)));
}

#[test]
fn custom_keys_round_trip() {
    let config = Config::default()
        .with_level_key("severity")
        .with_message_key("text");
    let sink = Arc::new(InMemorySink::new());
    let factory = LoggerFactory::new(sink.clone())
        .with_config(config.clone())
        .unwrap();
    factory
        .logger(&Context::root().branch([("level", "shadowed")]))
        .error()
        .str("message", "also shadowed")
        .msg("real message")
        .unwrap();

    let line = sink.drain();
    let record = JsonEncoder::from_config(&config)
        .decode_line(line.as_bytes())
        .unwrap();
    assert_eq!(record.level(), Level::Error);
    assert_eq!(record.message(), "real message");
    // with custom keys, `level` and `message` are ordinary fields
    assert_eq!(record.names(), ["level", "message"]);
}
