use std::fmt::Write as _;
use std::hint::black_box;

use bethyw::ingestion::{ColumnMapping, SourceColumn, SourceDataType, parse, populate};
use bethyw::processing::Filters;
use bethyw::types::Areas;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

const YEARS: std::ops::Range<u32> = 1991..2020;

fn area_codes(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("W{:08}", i)).collect()
}

fn areas_csv(codes: &[String]) -> String {
    let mut out = String::from("code,eng,cym\n");
    for (i, c) in codes.iter().enumerate() {
        let _ = writeln!(out, "{c},Area {i},Ardal {i}");
    }
    out
}

fn by_year_csv(codes: &[String]) -> String {
    let mut out = String::from("code");
    for y in YEARS {
        let _ = write!(out, ",{y}");
    }
    out.push('\n');
    for (i, c) in codes.iter().enumerate() {
        out.push_str(c);
        for y in YEARS {
            let _ = write!(out, ",{}.5", i as u32 + y);
        }
        out.push('\n');
    }
    out
}

fn stats_json(codes: &[String]) -> String {
    let mut out = String::from(r#"{"value":["#);
    let mut first = true;
    for (i, c) in codes.iter().enumerate() {
        for y in YEARS {
            if !first {
                out.push(',');
            }
            first = false;
            let _ = write!(
                out,
                r#"{{"code":"{c}","eng":"Area {i}","mcode":"pop","mname":"Population","year":"{y}","value":{}}}"#,
                i as u32 * y
            );
        }
    }
    out.push_str("]}");
    out
}

fn areas_cols() -> ColumnMapping {
    ColumnMapping::new()
        .with(SourceColumn::AuthCode, "code")
        .with(SourceColumn::AuthNameEng, "eng")
        .with(SourceColumn::AuthNameCym, "cym")
}

fn by_year_cols() -> ColumnMapping {
    ColumnMapping::new()
        .with(SourceColumn::AuthCode, "code")
        .with(SourceColumn::SingleMeasureCode, "dens")
        .with(SourceColumn::SingleMeasureName, "Population density")
}

fn json_cols() -> ColumnMapping {
    ColumnMapping::new()
        .with(SourceColumn::AuthCode, "code")
        .with(SourceColumn::AuthNameEng, "eng")
        .with(SourceColumn::MeasureCode, "mcode")
        .with(SourceColumn::MeasureName, "mname")
        .with(SourceColumn::Year, "year")
        .with(SourceColumn::Value, "value")
}

fn bench_parsers(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    let filters = Filters::none();

    for n in [22usize, 500] {
        let codes = area_codes(n);
        let csv = by_year_csv(&codes);
        let json = stats_json(&codes);

        group.throughput(Throughput::Bytes(csv.len() as u64));
        group.bench_with_input(BenchmarkId::new("by_year_csv", n), &csv, |b, input| {
            b.iter(|| {
                parse(
                    black_box(input.as_bytes()),
                    SourceDataType::AuthorityByYearCsv,
                    &by_year_cols(),
                    &filters,
                )
            })
        });

        group.throughput(Throughput::Bytes(json.len() as u64));
        group.bench_with_input(BenchmarkId::new("welsh_stats_json", n), &json, |b, input| {
            b.iter(|| {
                parse(
                    black_box(input.as_bytes()),
                    SourceDataType::WelshStatsJson,
                    &json_cols(),
                    &filters,
                )
            })
        });
    }
    group.finish();
}

fn bench_populate(c: &mut Criterion) {
    let codes = area_codes(500);
    let areas = areas_csv(&codes);
    let csv = by_year_csv(&codes);
    let json = stats_json(&codes);
    let filters = Filters::none();

    c.bench_function("populate/areas+by_year+json", |b| {
        b.iter(|| {
            let mut registry = Areas::new();
            for (input, data_type, cols) in [
                (&areas, SourceDataType::AuthorityCodeCsv, areas_cols()),
                (&csv, SourceDataType::AuthorityByYearCsv, by_year_cols()),
                (&json, SourceDataType::WelshStatsJson, json_cols()),
            ] {
                let _ = populate(&mut registry, input.as_bytes(), data_type, &cols, &filters);
            }
            black_box(registry.len())
        })
    });
}

criterion_group!(benches, bench_parsers, bench_populate);
criterion_main!(benches);
