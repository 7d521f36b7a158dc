use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use html::{Document, TreeWalker, inner_html, is_ignorable_element, parse_document, tokenize};

const SMALL_BLOCKS: usize = 64;
const LARGE_BLOCKS: usize = 20_000;

fn make_blocks(count: usize) -> String {
    let block = r#"<div class=box><span>hello</span> <b>world</b><script>var x = "<p>";</script></div>"#;
    let mut out = String::with_capacity(block.len() * count);
    for _ in 0..count {
        out.push_str(block);
    }
    out
}

fn bench_tokenize_small(c: &mut Criterion) {
    let input = make_blocks(SMALL_BLOCKS);
    c.bench_function("bench_tokenize_small", |b| {
        b.iter(|| {
            let tokens = tokenize(black_box(&input));
            black_box(tokens.len());
        });
    });
}

fn bench_tokenize_large(c: &mut Criterion) {
    let input = make_blocks(LARGE_BLOCKS);
    c.bench_function("bench_tokenize_large", |b| {
        b.iter(|| {
            let tokens = tokenize(black_box(&input));
            black_box(tokens.len());
        });
    });
}

fn bench_parse_large(c: &mut Criterion) {
    let input = make_blocks(LARGE_BLOCKS);
    c.bench_function("bench_parse_large", |b| {
        b.iter(|| {
            let doc = parse_document(black_box(&input));
            black_box(doc.slot_count());
        });
    });
}

fn bench_walk_large(c: &mut Criterion) {
    let doc = parse_document(&make_blocks(LARGE_BLOCKS));
    let first = doc.first_child(doc.root()).unwrap_or(doc.root());
    let last = doc.last_child(doc.root()).unwrap_or(doc.root());
    c.bench_function("bench_walk_large", |b| {
        b.iter(|| {
            let visited = TreeWalker::new(&doc, black_box(first), last, is_ignorable_element).count();
            black_box(visited);
        });
    });
}

fn bench_serialize_large(c: &mut Criterion) {
    let input = make_blocks(LARGE_BLOCKS);
    c.bench_function("bench_serialize_large", |b| {
        b.iter_batched(
            || parse_document(&input),
            |doc: Document| black_box(inner_html(&doc, doc.root()).len()),
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(
    benches,
    bench_tokenize_small,
    bench_tokenize_large,
    bench_parse_large,
    bench_walk_large,
    bench_serialize_large
);
criterion_main!(benches);
