use criterion::{black_box, criterion_group, criterion_main, Criterion};

use formsmith_core::name::parse_name;

fn bench_parse_name(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_name");

    let simple = "Ada Lovelace";
    let full = "Dr. Jane Q. Public Jr.";
    let particles = "Juan Carlos de la Cruz";
    let messy = "   prof.   Maria   Sofia    Anna   van    der   Berg ,  PhD.  ";

    group.bench_function("simple", |b| b.iter(|| parse_name(black_box(simple))));

    group.bench_function("all_components", |b| {
        b.iter(|| parse_name(black_box(full)))
    });

    group.bench_function("particles", |b| {
        b.iter(|| parse_name(black_box(particles)))
    });

    group.bench_function("messy_whitespace", |b| {
        b.iter(|| parse_name(black_box(messy)))
    });

    group.finish();
}

fn bench_form_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("form_parsing");

    let small_toml = generate_form_toml(5);
    let medium_toml = generate_form_toml(50);
    let large_toml = generate_form_toml(200);

    group.bench_function("5_questions", |b| {
        b.iter(|| {
            formsmith_core::schema::parse_form_str(
                black_box(&small_toml),
                black_box("bench.toml".as_ref()),
            )
        })
    });

    group.bench_function("50_questions", |b| {
        b.iter(|| {
            formsmith_core::schema::parse_form_str(
                black_box(&medium_toml),
                black_box("bench.toml".as_ref()),
            )
        })
    });

    group.bench_function("200_questions", |b| {
        b.iter(|| {
            formsmith_core::schema::parse_form_str(
                black_box(&large_toml),
                black_box("bench.toml".as_ref()),
            )
        })
    });

    group.finish();
}

fn generate_form_toml(n: usize) -> String {
    let mut s = String::new();
    s.push_str(
        r#"[form]
id = 1
title = "Benchmark"
"#,
    );
    for i in 0..n {
        s.push_str(&format!(
            r#"
[[fields]]
id = {}
type = "radio"
label = "Question {i}"
choices = [
    {{ text = "Yes", value = "<p>Answer {i} yes.</p>" }},
    {{ text = "No" }},
]
"#,
            i + 1
        ));
    }
    s.push_str(&format!("\n[[fields]]\nid = {}\ntype = \"assessment\"\n", n + 1));
    s
}

criterion_group!(benches, bench_parse_name, bench_form_parsing);
criterion_main!(benches);
