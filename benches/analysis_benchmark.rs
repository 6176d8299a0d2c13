use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use graph_eval::{AnalysisConfig, Expression, Interval, evaluate};

const FORMULAS: &[&str] = &[
    "x^2 - 4",
    "3x^3 - 2x^2 + x - 7",
    "sin(x) / x",
    "sqrt(abs(x)) * cos(2x) + ln(x^2 + 1)",
    "tan(x) - 1/x",
];

fn bench_parse_vs_compiled(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_vs_compiled");

    for formula in FORMULAS {
        group.bench_with_input(BenchmarkId::new("evaluate", formula), formula, |b, f| {
            b.iter(|| black_box(evaluate(f, black_box(1.5))))
        });

        let expr = Expression::parse(formula).unwrap();
        group.bench_with_input(BenchmarkId::new("compiled", formula), &expr, |b, e| {
            b.iter(|| black_box(e.eval(black_box(1.5))))
        });
    }

    group.finish();
}

fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling");
    let expr = Expression::parse("sin(x) / x").unwrap();
    let interval = Interval::new(-10.0, 10.0);

    for count in [100usize, 1000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| black_box(expr.sample(interval, count)))
        });
    }

    group.finish();
}

fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis");
    let config = AnalysisConfig::default();
    let interval = Interval::new(-10.0, 10.0);

    for formula in FORMULAS {
        let expr = Expression::parse(formula).unwrap();
        group.bench_with_input(BenchmarkId::new("x_intercepts", formula), &expr, |b, e| {
            b.iter(|| black_box(e.x_intercepts(interval, &config)))
        });
        group.bench_with_input(BenchmarkId::new("critical_points", formula), &expr, |b, e| {
            b.iter(|| black_box(e.critical_points(interval, &config)))
        });
        group.bench_with_input(BenchmarkId::new("analyze", formula), &expr, |b, e| {
            b.iter(|| black_box(e.analyze(interval, &config)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_vs_compiled, bench_sampling, bench_analysis);
criterion_main!(benches);
