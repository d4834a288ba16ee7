use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use sample_ddl::{
    ColumnSpec, SampleValue, build,
    identifier::normalize,
    schema::{BuildOptions, QualifiedName, SchemaBuilder},
};

const LABELS: &[&str] = &[
    "Họ và tên",
    "Ngày sinh",
    "Điểm trung bình",
    "Số tiền (VNĐ) %",
    "Ngân hàng",
    "Ghi chú",
];

const SAMPLES: &[&str] = &["Nguyễn Văn A", "01/01/2000", "8.5", "1.000.000", "ACB", ""];

fn generate_columns(count: usize) -> Vec<ColumnSpec> {
    (0..count)
        .map(|i| {
            let label = format!("{} {i}", LABELS[i % LABELS.len()]);
            ColumnSpec::new(label, SampleValue::from_text(SAMPLES[i % SAMPLES.len()]))
        })
        .collect()
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    group.bench_function("vietnamese_labels", |b| {
        b.iter(|| {
            for label in LABELS {
                black_box(normalize(black_box(label)));
            }
        });
    });
    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let columns = generate_columns(500);
    let table = QualifiedName::new(None, Some("bench"));
    let coercing = SchemaBuilder::new(BuildOptions {
        coerce_numeric: true,
        ..BuildOptions::default()
    });

    let mut group = c.benchmark_group("create_table");
    group.bench_function("plain_500_columns", |b| {
        b.iter(|| black_box(build("public.bench", black_box(&columns))));
    });
    group.bench_function("coerced_500_columns", |b| {
        b.iter_batched(
            || columns.clone(),
            |cols| coercing.build(&table, &cols).expect("allow policy never fails"),
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_normalize, bench_build);
criterion_main!(benches);
