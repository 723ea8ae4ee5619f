use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nova_highlight::{tokenize_line, tokenize_text, LineState, LineStateCache};

const SMALL_JAVA: &str = include_str!(
    "../testdata/tokenize/corpus/atom-language-java-tokenizes-enums-with-class-body-1.java"
);
const MEDIUM_JAVA: &str = include_str!(
    "../testdata/tokenize/corpus/google-web-toolkit-user-test-gwt-junit-forwardingtestresult.java"
);

fn large_java_source() -> String {
    let mut out = String::from("package bench;\n\npublic class Large {\n");
    for i in 0..1000u32 {
        out.push_str(&format!(
            "  /* method {0} */ public int method{0}(int x) {{ int y = x + {0}; return y * 2; }}\n",
            i
        ));
    }
    out.push_str("}\n");
    out
}

fn bench_tokenize_text(c: &mut Criterion) {
    let large_java = large_java_source();

    let mut group = c.benchmark_group("highlight_tokenize_text");
    group.measurement_time(Duration::from_secs(2));
    group.warm_up_time(Duration::from_secs(1));
    group.sample_size(20);

    for (id, src) in [
        ("small", SMALL_JAVA),
        ("medium", MEDIUM_JAVA),
        ("large", large_java.as_str()),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(id), src, |b, src| {
            b.iter(|| black_box(tokenize_text(black_box(src), LineState::INITIAL)))
        });
    }

    group.finish();
}

fn bench_single_line(c: &mut Criterion) {
    let line = "    this.value = new ArrayList<String>(capacity); // grow lazily";
    c.bench_function("highlight_tokenize_line", |b| {
        b.iter(|| black_box(tokenize_line(black_box(line), LineState::INITIAL)))
    });
}

fn bench_incremental_edit(c: &mut Criterion) {
    let large_java = large_java_source();
    let lines: Vec<&str> = large_java.split('\n').collect();
    let mut edited = lines.clone();
    edited[10] = "  // edited";

    let mut base = LineStateCache::new();
    base.rebuild(lines.iter().copied())
        .expect("bench source must tokenize");

    c.bench_function("highlight_apply_edit", |b| {
        b.iter(|| {
            let mut cache = base.clone();
            black_box(cache.apply_edit(black_box(&edited), 10, 1, 1))
        })
    });
}

criterion_group!(
    benches,
    bench_tokenize_text,
    bench_single_line,
    bench_incremental_edit
);
criterion_main!(benches);
