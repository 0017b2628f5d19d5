use basic_struct::{json, CopyMode, Record, Schema, Value};

fn main() -> anyhow::Result<()> {
    let point = Schema::with_defaults("Point", [("x", Value::from(0)), ("y", Value::from(0))])?;

    let origin = Record::new(point.clone());
    let a = Record::from_positional(point.clone(), [Value::from(2), Value::from(5)])?;
    let b = Record::from_named(point, [("y", Value::from(5)), ("x", Value::from(2))])?;

    println!("{origin}");
    println!("{a} == {b}: {}", a == b);
    println!("{origin} < {a}: {:?}", origin.partial_cmp(&a));

    let encoded = json::encode(&a)?;
    println!("encoded: {encoded}");

    let decoded = json::decode(&encoded)?;
    println!("decoded: {decoded}");
    assert_eq!(
        decoded.to_ordered_map(CopyMode::Shared),
        a.to_ordered_map(CopyMode::Shared)
    );

    let state = a.capture();
    let restored = Record::from_state(decoded.schema().clone(), &state);
    println!("restored: {restored}");

    Ok(())
}
