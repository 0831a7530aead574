//! Parsing an fsdb document and reading cells.
//!
//! Run with: cargo run --example simple

use fsdb::{Table, Value};
use std::error::Error;

const DOC: &str = "#fsdb -F t city country population:L area:d
Tokyo\tJapan\t13960000\t2194.07
Delhi\tIndia\t16787941\t1484
# estimate pending
Lagos\tNigeria\tunknown\t1171.28
";

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut table = Table::new();
    table.parse_str(DOC)?;

    println!("Header: {}", table.header().map(|h| h.line()).unwrap_or_default());
    println!("{} columns, {} rows\n", table.columns_len(), table.row_count());

    let population = table.column_index("population")?;
    for row in table.rows() {
        let city = row.get_by_name("city")?;
        let cell = row.get(population).ok_or("short row")?;
        match cell.value() {
            Value::UnsignedLong(0) => println!("{:<8} population unreadable ({:?})", city, cell.raw()),
            Value::UnsignedLong(n) => println!("{:<8} {:>10}", city, n),
            other => println!("{:<8} unexpected {:?}", city, other),
        }
    }

    Ok(())
}
