use criterion::{black_box, criterion_group, criterion_main, Criterion};

use itemforge_core::generator::generate;
use itemforge_core::grader::grade;
use itemforge_core::model::Difficulty;
use itemforge_core::normalize::normalize_text;
use itemforge_core::validator::validate;

fn bench_grade(c: &mut Criterion) {
    let item = match generate("quad.solve.formula", Difficulty::Medium, 11) {
        Ok(item) => item,
        Err(e) => panic!("bench item failed to generate: {e}"),
    };

    c.bench_function("grade_correct", |b| {
        let id = item.solution_choice_id.as_str();
        b.iter(|| grade(black_box(&item), black_box(id)))
    });

    c.bench_function("grade_all_choices", |b| {
        b.iter(|| {
            for id in ["A", "B", "C", "D"] {
                let _ = grade(black_box(&item), id);
            }
        })
    });

    c.bench_function("validate", |b| b.iter(|| validate(black_box(&item))));
}

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize_text", |b| {
        b.iter(|| normalize_text(black_box("  X = −1.50 OR X = 2  ")))
    });
}

criterion_group!(benches, bench_grade, bench_normalize);
criterion_main!(benches);
