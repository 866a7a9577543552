//! Response parsing and prompt building benchmarks.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use recast::{PromptBuilder, Row, parse_response};

/// A well-formed reply whose explanation wraps over `explanation_lines` lines.
fn generate_reply(explanation_lines: usize) -> String {
    let mut reply = String::from(
        "CORRECTED_QUESTION: Which Garhwali folk dance is performed in a circle at village fairs?\n\
         CORRECTED_OPTIONS:\n\
         1. Chanchari\n\
         2. Bhangra\n\
         3. Garba\n\
         4. Bihu\n\
         CORRECT_ANSWER: 1\n\
         EXPLANATION: Chanchari is the folk dance of Uttarakhand.\n",
    );
    for i in 0..explanation_lines {
        reply.push_str(&format!(
            "It is performed in Garhwal and Kumaon, line {} of the explanation.\n",
            i
        ));
    }
    reply.push_str("CITATIONS: https://en.wikipedia.org/wiki/Culture_of_Uttarakhand\n");
    reply
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_response");

    for lines in [0usize, 10, 100, 1000] {
        let reply = generate_reply(lines);
        group.throughput(Throughput::Bytes(reply.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(lines), &reply, |b, reply| {
            b.iter(|| parse_response(black_box(reply)))
        });
    }

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let candidate = parse_response(&generate_reply(0));
    c.bench_function("resolve_answer", |b| {
        b.iter(|| black_box(&candidate).resolve_answer())
    });
}

fn bench_prompt(c: &mut Criterion) {
    let row = Row::new(
        "Uttarakhand",
        "Dance",
        "Which dance is popular here?",
        ["Chanchari", "Bhangra", "Garba", "Bihu"],
    );
    let builder = PromptBuilder::new();
    c.bench_function("build_prompt", |b| b.iter(|| builder.build(black_box(&row))));
}

criterion_group!(benches, bench_parse, bench_resolve, bench_prompt);
criterion_main!(benches);
