//! Validation pass benchmarks
//!
//! Measures full passes over records, maps and JSON objects, plus
//! single-value validation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;
use std::collections::HashMap;
use zvalid::{rule, Record, RuleSet, Validator};

#[derive(Record)]
#[zvalid(rename_all = "camelCase")]
struct Signup {
    name: String,
    email: String,
    password: String,
    re_password: Option<String>,
    age: u32,
    homepage: Option<String>,
}

fn signup() -> Signup {
    Signup {
        name: "zrcoder".to_string(),
        email: "zrcoder@example.com".to_string(),
        password: "123456789".to_string(),
        re_password: Some("123456789".to_string()),
        age: 30,
        homepage: Some("https://example.com/~zrcoder".to_string()),
    }
}

fn signup_rules() -> RuleSet {
    RuleSet::new()
        .add("name", |r| r.required().min_length(2).max_length(32))
        .add("email", |r| r.required().email())
        .add("password", |r| r.required().min_length(6).max_length(16))
        .add("rePassword", |r| r.required().equal_field("password"))
        .add("age", |r| r.min(18.0).max(120.0))
        .add("homepage", |r| r.url())
}

/// Benchmark a pass over a derived record
fn bench_record(c: &mut Criterion) {
    let mut group = c.benchmark_group("record");
    let validator = Validator::default();
    let rules = signup_rules();

    group.bench_function("valid", |b| {
        let target = signup();
        b.iter(|| validator.validate_record(black_box(&target), &rules))
    });

    group.bench_function("all_failing", |b| {
        let target = Signup {
            name: String::new(),
            email: "nope".to_string(),
            password: "123".to_string(),
            re_password: Some("456".to_string()),
            age: 3,
            homepage: Some("not a url".to_string()),
        };
        b.iter(|| validator.validate_record(black_box(&target), &rules))
    });

    group.finish();
}

/// Benchmark passes over string-keyed maps and JSON objects
fn bench_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("map");
    let validator = Validator::default();
    let rules = signup_rules();

    group.bench_function("hash_map", |b| {
        let target: HashMap<String, String> = [
            ("name", "zrcoder"),
            ("email", "zrcoder@example.com"),
            ("password", "123456789"),
            ("rePassword", "123456789"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        b.iter(|| validator.validate_map(black_box(&target), &rules))
    });

    group.bench_function("json_object", |b| {
        let target = json!({
            "name": "zrcoder",
            "email": "zrcoder@example.com",
            "password": "123456789",
            "rePassword": "123456789",
            "age": 30,
            "homepage": "https://example.com/~zrcoder",
        });
        b.iter(|| validator.validate_json(black_box(&target), &rules))
    });

    group.finish();
}

/// Benchmark rule set size scaling
fn bench_rule_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("rule_count");
    let validator = Validator::default();

    for count in [1usize, 10, 100] {
        let fields: Vec<String> = (0..count).map(|i| format!("field{i}")).collect();
        let rules: RuleSet = fields
            .iter()
            .map(|f| rule(f.as_str()).required().min_length(3).max_length(64))
            .collect();
        let target: HashMap<String, String> = fields
            .iter()
            .map(|f| (f.clone(), "some value".to_string()))
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(count), &target, |b, target| {
            b.iter(|| validator.validate_map(black_box(target), &rules))
        });
    }

    group.finish();
}

/// Benchmark single-value validation
fn bench_value(c: &mut Criterion) {
    let mut group = c.benchmark_group("value");

    let username = rule("username").required().min_length(6).max_length(16);
    group.bench_function("length_chain", |b| {
        b.iter(|| zvalid::validate_value(black_box("zrcoder123"), &username))
    });

    let code = rule("code").pattern("^[A-Z]{3}-[0-9]{4}$");
    group.bench_function("pattern", |b| {
        b.iter(|| zvalid::validate_value(black_box("ABC-1234"), &code))
    });

    let birthday = rule("birthday").date_format("%Y-%m-%d");
    group.bench_function("date_format", |b| {
        b.iter(|| zvalid::validate_value(black_box("1990-05-17"), &birthday))
    });

    group.finish();
}

criterion_group!(benches, bench_record, bench_map, bench_rule_count, bench_value);

criterion_main!(benches);
