use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fsdb::{from_str, Header, RowReader, TableOptions};

fn document(rows: usize) -> String {
    let mut doc = String::from("#fsdb -F t host rtt:d hops:l seq:L note\n");
    for i in 0..rows {
        doc.push_str(&format!(
            "host{}.example.org\t{}.{}\t{}\t{}\tok\n",
            i,
            i % 200,
            i % 10,
            i % 30,
            i
        ));
        if i % 100 == 0 {
            doc.push_str("# checkpoint\n");
        }
    }
    doc
}

fn benchmark_parse_header(c: &mut Criterion) {
    let line = "#fsdb -F t host rtt:d hops:l seq:L note a b c d e f g h";

    c.bench_function("parse_header", |b| {
        b.iter(|| Header::parse(black_box(line)))
    });
}

fn benchmark_tokenize_row(c: &mut Criterion) {
    let header = Header::parse("#fsdb -F t host rtt:d hops:l seq:L note").unwrap();
    let line = "host1.example.org\t12.5\t7\t1\tok";

    c.bench_function("tokenize_row", |b| {
        b.iter(|| header.tokenize(black_box(line)))
    });
}

fn benchmark_parse_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_document");

    for size in [100, 1_000, 10_000].iter() {
        let doc = document(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| from_str(black_box(&doc)))
        });
    }
    group.finish();
}

fn benchmark_count_only(c: &mut Criterion) {
    let doc = document(10_000);

    c.bench_function("count_only_10000", |b| {
        b.iter(|| {
            fsdb::from_reader_with_options(black_box(doc.as_bytes()), TableOptions::count_only())
        })
    });
}

fn benchmark_streaming(c: &mut Criterion) {
    let doc = document(10_000);

    c.bench_function("stream_sum_10000", |b| {
        b.iter(|| {
            let mut reader = RowReader::new(black_box(doc.as_bytes())).unwrap();
            let mut total = 0.0;
            while let Some(row) = reader.next_row().unwrap() {
                total += row[1].as_f64().unwrap_or_default();
            }
            total
        })
    });
}

criterion_group!(
    benches,
    benchmark_parse_header,
    benchmark_tokenize_row,
    benchmark_parse_document,
    benchmark_count_only,
    benchmark_streaming
);
criterion_main!(benches);
