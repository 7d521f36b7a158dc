use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use highlight::{DocumentAdapter, Highlighter, MemoryHost, Range, wrap_words};
use html::{NodeId, parse_document};

const SMALL_PARAGRAPHS: usize = 64;
const LARGE_PARAGRAPHS: usize = 2_000;

fn make_paragraphs(count: usize) -> String {
    let mut out = String::with_capacity(count * 96 + 16);
    out.push_str("<div>");
    for i in 0..count {
        out.push_str("<p>lorem ipsum <b>dolor</b> sit amet, <i>consectetur ");
        out.push_str(&i.to_string());
        out.push_str("</i> adipiscing elit</p>");
    }
    out.push_str("</div>");
    out
}

fn attached(markup: &str) -> Highlighter<MemoryHost> {
    let host = MemoryHost::from_markup(markup);
    match Highlighter::with_defaults(host, NodeId(1)) {
        Ok(hl) => hl,
        Err(err) => panic!("attach failed: {err}"),
    }
}

fn bench_wrap_words_large(c: &mut Criterion) {
    let input = make_paragraphs(LARGE_PARAGRAPHS);
    c.bench_function("bench_wrap_words_large", |b| {
        b.iter_batched(
            || parse_document(&input),
            |mut doc| {
                let words = wrap_words(&mut doc, NodeId(1), "touch");
                black_box(words.ok());
            },
            BatchSize::LargeInput,
        );
    });
}

fn bench_highlight_all(c: &mut Criterion, name: &str, paragraphs: usize) {
    let input = make_paragraphs(paragraphs);
    c.bench_function(name, |b| {
        b.iter_batched(
            || attached(&input),
            |mut hl| {
                let range = Range::select_node_contents(hl.host().document(), hl.context());
                let outcome = hl.highlight(Some(range));
                black_box(outcome.ok().flatten().map(|o| o.markers.len()));
            },
            BatchSize::LargeInput,
        );
    });
}

fn bench_highlight_small(c: &mut Criterion) {
    bench_highlight_all(c, "bench_highlight_small", SMALL_PARAGRAPHS);
}

fn bench_highlight_large(c: &mut Criterion) {
    bench_highlight_all(c, "bench_highlight_large", LARGE_PARAGRAPHS);
}

fn bench_remove_large(c: &mut Criterion) {
    let input = make_paragraphs(LARGE_PARAGRAPHS);
    c.bench_function("bench_remove_large", |b| {
        b.iter_batched(
            || {
                let mut hl = attached(&input);
                let range = Range::select_node_contents(hl.host().document(), hl.context());
                let _ = hl.highlight(Some(range));
                hl
            },
            |mut hl| {
                black_box(hl.remove_highlights(None).ok());
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(
    benches,
    bench_wrap_words_large,
    bench_highlight_small,
    bench_highlight_large,
    bench_remove_large
);
criterion_main!(benches);
