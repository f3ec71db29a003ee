use cocoa_atlas::analyzers::VolumeAnalyzer;
use cocoa_atlas::filters;
use cocoa_atlas::models::{CompanyRecord, FilterCriteria};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const ROLES: [&str; 5] = ["Grower", "Trader", "Processor", "Manufacturer", "Retailer"];
const COUNTRIES: [&str; 6] = [
    "Ghana",
    "Ivory Coast",
    "Ecuador",
    "Belgium",
    "Switzerland",
    "Netherlands",
];

// Create test data for benchmarking
fn create_test_records(count: usize) -> Vec<CompanyRecord> {
    (0..count)
        .map(|i| {
            let mut record = CompanyRecord::new(
                format!("Company {}", i),
                ROLES[i % ROLES.len()].to_string(),
                COUNTRIES[i % COUNTRIES.len()].to_string(),
                format!("City {}", i % 40),
            );
            // Every seventh record has unknown volume
            if i % 7 != 0 {
                record.volume = Some((i as f64) * 13.5 % 60000.0);
            }
            record.is_customer = i % 3 == 0;
            record
        })
        .collect()
}

fn benchmark_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");

    for size in [100, 1_000, 10_000] {
        let records = create_test_records(size);
        let criteria = FilterCriteria::new()
            .with_roles(vec!["Trader".to_string(), "Processor".to_string()])
            .with_countries(vec!["Ghana".to_string(), "Belgium".to_string()])
            .with_min_volume(5000.0);

        group.bench_with_input(BenchmarkId::new("apply", size), &records, |b, records| {
            b.iter(|| filters::apply(black_box(records), black_box(&criteria)))
        });
    }

    group.finish();
}

fn benchmark_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregation");
    let analyzer = VolumeAnalyzer::new();

    for size in [100, 1_000, 10_000] {
        let records = create_test_records(size);

        group.bench_with_input(
            BenchmarkId::new("volume_by_country", size),
            &records,
            |b, records| b.iter(|| analyzer.volume_by_country(black_box(records))),
        );

        group.bench_with_input(
            BenchmarkId::new("top_companies", size),
            &records,
            |b, records| b.iter(|| analyzer.top_companies(black_box(records), 10)),
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_filter, benchmark_aggregation);
criterion_main!(benches);
