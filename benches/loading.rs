//! Load throughput for both table orientations.

use std::hint::black_box;

use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tinycsv::{convert_cell, load, load_vertically, FieldRef, DEFAULT_TIME_LAYOUT};

tinycsv::record! {
    #[derive(Debug, Default)]
    struct Person {
        id: i64,
        name: String,
        age: u8,
        height: f64,
        birth: NaiveDate,
    }
}

fn row_major(rows: usize) -> String {
    let mut csv = String::from("id,name,age,height,birth\n");
    for i in 0..rows {
        csv.push_str(&format!("{i},name{i},{},{}.5,2001.{}.{}\n", i % 90, 150 + i % 40, 1 + i % 12, 1 + i % 28));
    }
    csv
}

fn column_major(cols: usize) -> String {
    let mut lines = vec![
        String::from("header"),
        String::from("id"),
        String::from("name"),
        String::from("age"),
        String::from("height"),
        String::from("birth"),
    ];
    for i in 0..cols {
        lines[0].push(',');
        lines[1].push_str(&format!(",{i}"));
        lines[2].push_str(&format!(",name{i}"));
        lines[3].push_str(&format!(",{}", i % 90));
        lines[4].push_str(&format!(",{}.5", 150 + i % 40));
        lines[5].push_str(&format!(",2001.{}.{}", 1 + i % 12, 1 + i % 28));
    }
    lines.join("\n")
}

fn bench_horizontal(c: &mut Criterion) {
    let mut group = c.benchmark_group("horizontal");
    for rows in [100usize, 10_000] {
        let csv = row_major(rows);
        group.throughput(Throughput::Bytes(csv.len() as u64));
        group.bench_with_input(BenchmarkId::new("fresh_vec", rows), &csv, |b, csv| {
            b.iter(|| {
                let mut people: Vec<Person> = Vec::new();
                load(Some(csv.as_bytes()), 1, rows, &mut people).unwrap();
                black_box(people)
            });
        });
        group.bench_with_input(BenchmarkId::new("reused_boxes", rows), &csv, |b, csv| {
            let mut people: Vec<Box<Person>> = Vec::new();
            b.iter(|| {
                load(Some(csv.as_bytes()), 1, rows, &mut people).unwrap();
                black_box(people.len())
            });
        });
    }
    group.finish();
}

fn bench_vertical(c: &mut Criterion) {
    let mut group = c.benchmark_group("vertical");
    for cols in [100usize, 10_000] {
        let csv = column_major(cols);
        group.throughput(Throughput::Bytes(csv.len() as u64));
        group.bench_with_input(BenchmarkId::new("fresh_vec", cols), &csv, |b, csv| {
            b.iter(|| {
                let mut people: Vec<Person> = Vec::new();
                load_vertically(Some(csv.as_bytes()), 1, 1, cols, &mut people).unwrap();
                black_box(people)
            });
        });
    }
    group.finish();
}

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert_cell");

    group.bench_function("int", |b| {
        let mut slot = 0i64;
        b.iter(|| convert_cell(FieldRef::I64(&mut slot), DEFAULT_TIME_LAYOUT, black_box("123456")));
    });

    group.bench_function("text", |b| {
        let mut slot = String::new();
        b.iter(|| convert_cell(FieldRef::Text(&mut slot), DEFAULT_TIME_LAYOUT, black_box("  padded  ")));
    });

    group.bench_function("date", |b| {
        let mut slot = NaiveDate::default();
        b.iter(|| convert_cell(FieldRef::Date(&mut slot), DEFAULT_TIME_LAYOUT, black_box("2011.5.12")));
    });

    group.finish();
}

criterion_group!(benches, bench_horizontal, bench_vertical, bench_convert);
criterion_main!(benches);
