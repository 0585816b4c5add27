use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use search_query_lexer::sql::SqlRenderer;
use search_query_lexer::{Config, Lexer};
use std::hint::black_box;

fn test_cases() -> Vec<(&'static str, &'static str)> {
    vec![
        ("simple", "title=testing"),
        ("medium", r#"title =~ testing AND (name="Adam" OR name="Bob")"#),
        (
            "complex",
            r#"(title=~"test" AND age >= 30) OR (category != "bad") and name !~ "x \"y\" z" or age < 5"#,
        ),
    ]
}

fn create_config() -> Config {
    Config::with_field_names(["title", "name", "age", "category"])
}

// 基准测试：分词性能
fn benchmark_tokenize(c: &mut Criterion) {
    let lexer = Lexer::new(create_config()).expect("默认配置应该有效");

    let mut group = c.benchmark_group("tokenize");
    for (name, input) in test_cases() {
        group.bench_with_input(BenchmarkId::new("tokenize", name), &input, |b, &input| {
            b.iter(|| {
                let tokens = lexer.tokenize(black_box(input)).expect("分词应该成功");
                black_box(tokens)
            })
        });
    }
    group.finish();
}

// 基准测试：创建词法分析器（校验配置并排序符号表）
fn benchmark_new_lexer(c: &mut Criterion) {
    let config = create_config();
    c.bench_function("new_lexer", |b| {
        b.iter(|| black_box(Lexer::new(black_box(config.clone())).expect("默认配置应该有效")))
    });
}

// 基准测试：分词并生成SQL
fn benchmark_end_to_end(c: &mut Criterion) {
    let config = create_config();
    let renderer = SqlRenderer::new(&config);
    let lexer = Lexer::new(config).expect("默认配置应该有效");

    let mut group = c.benchmark_group("end_to_end");
    for (name, input) in test_cases() {
        group.bench_with_input(BenchmarkId::new("render_select", name), &input, |b, &input| {
            b.iter(|| {
                let tokens = lexer.tokenize(black_box(input)).expect("分词应该成功");
                let sql = renderer.render_select("records", &tokens).expect("SQL生成应该成功");
                black_box(sql)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_tokenize, benchmark_new_lexer, benchmark_end_to_end);
criterion_main!(benches);
