//! Deserializing fsdb rows into structs and serializing a table to JSON.
//!
//! Run with: cargo run --example typed_rows

use serde::Deserialize;
use std::error::Error;

#[derive(Debug, Deserialize)]
struct Measurement<'a> {
    host: &'a str,
    rtt: f64,
    hops: Option<u32>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let doc = "#fsdb -F S host rtt:d hops\nexample.org  12.5  7\nexample.net  31.0\n";
    let table = fsdb::from_str(doc)?;

    let measurements: Vec<Measurement> = table.deserialize_rows()?;
    for m in &measurements {
        println!("{:?}", m);
    }

    println!("\nAs JSON:");
    println!("{}", serde_json::to_string_pretty(&table)?);

    Ok(())
}
