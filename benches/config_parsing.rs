//! Benchmark for config parsing and query URI rendering

use consul_healthcheck::config::{HealthcheckConfig, ServiceCheckConfig};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::path::Path;

fn bench_config_load_from_file(c: &mut Criterion) {
    let config_path = Path::new("consul-healthcheck.example.toml");

    c.bench_function("config_parse_from_file", |b| {
        b.iter(|| {
            let config = HealthcheckConfig::load(Some(black_box(config_path)));
            black_box(config)
        });
    });
}

fn bench_config_toml_parsing(c: &mut Criterion) {
    let mut toml_content = String::from("[consul]\ntimeout_seconds = 5\n");
    for i in 0..50 {
        toml_content.push_str(&format!(
            "\n[[consul.service_checks]]\nservice_name = \"service-{}\"\ndatacentres = [\"dc1\", \"dc2\", \"dc3\"]\n",
            i
        ));
    }

    c.bench_function("config_parse_50_service_checks", |b| {
        b.iter(|| {
            let config: HealthcheckConfig = toml::from_str(black_box(&toml_content)).unwrap();
            black_box(config)
        });
    });
}

fn bench_query_uri(c: &mut Criterion) {
    let check = ServiceCheckConfig::new("isit-kcom-xfer").with_registry("consul-vip", 8500);

    c.bench_function("query_uri_render", |b| {
        b.iter(|| black_box(check.query_uri(black_box("fast_cgzsdc01"))));
    });
}

criterion_group!(
    benches,
    bench_config_load_from_file,
    bench_config_toml_parsing,
    bench_query_uri
);
criterion_main!(benches);
