//! Counting and streaming large inputs without storing rows.
//!
//! Run with: cargo run --example streaming < data.fsdb
//! Without stdin input a generated document is used.

use fsdb::{RowReader, TableOptions};
use std::error::Error;
use std::io::{self, IsTerminal, Read};

fn generated() -> String {
    let mut doc = String::from("#fsdb -F t id:L value:d\n");
    for i in 0..100_000u64 {
        doc.push_str(&format!("{}\t{}\n", i, (i % 97) as f64 / 4.0));
    }
    doc
}

fn main() -> Result<(), Box<dyn Error>> {
    let input = if io::stdin().is_terminal() {
        generated()
    } else {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    };

    // Count only
    let counted = fsdb::from_reader_with_options(input.as_bytes(), TableOptions::count_only())?;
    println!("rows: {}", counted.row_count());

    // Stream and aggregate the last column
    let mut reader = RowReader::new(input.as_bytes())?;
    let last = reader.header().len().saturating_sub(1);
    let mut sum = 0.0;
    while let Some(row) = reader.next_row()? {
        sum += row.get(last).and_then(|cell| cell.as_f64()).unwrap_or_default();
    }
    println!(
        "sum of `{}`: {}",
        reader.header().columns().get(last).map(|c| c.name()).unwrap_or("?"),
        sum
    );

    Ok(())
}
