#![allow(
  clippy::expect_used,
  clippy::unwrap_used,
  reason = "Fine in benchmarks"
)]
use std::hint::black_box;

use blogmark_commonmark::{
  MarkdownRenderer,
  RenderOptions,
  passes::extract_toc,
  sanitize::sanitize_html,
  tree,
};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

const POST_PLAIN: &str = r"# Notes on a small blog

Some *emphasis*, some **strong** text and a [link](https://example.com).

## Lists

- one
- two
- [x] three

## A table

| Name | Value |
| ---- | ----- |
| a    | 1     |
| b    | 2     |

![A cat](cat.png)

*Figure 1: a cat*
";

const POST_RICH: &str = r#"# Writing a tokenizer

The cost grows as $O(n \log n)$ in the worst case.

$$
\sum_{i=1}^{n} i = \frac{n(n+1)}{2}
$$

## Code

```rust
fn tokenize(input: &str) -> Vec<&str> {
    input.split_whitespace().collect()
}
```

```js
const tokens = input.split(/\s+/);
console.log(tokens.length);
```

## Output

```
plain text block
```

<div class="note" onclick="alert(1)">Raw HTML gets sanitized.</div>
"#;

fn bench_render(c: &mut Criterion) {
  let mut group = c.benchmark_group("render");
  let renderer = MarkdownRenderer::new(RenderOptions::default());

  // Warm the extension registry so loading is not measured.
  renderer.render(POST_RICH).unwrap();

  for (name, source) in [("plain", POST_PLAIN), ("rich", POST_RICH)] {
    group.bench_with_input(BenchmarkId::new("full", name), &source, |b, src| {
      b.iter(|| renderer.render(black_box(src)).unwrap());
    });
  }

  group.finish();
}

fn bench_stages(c: &mut Criterion) {
  let mut group = c.benchmark_group("stages");
  let renderer = MarkdownRenderer::new(RenderOptions::default());
  let html = renderer.render(POST_RICH).unwrap().html;

  group.bench_function("parse_serialize", |b| {
    b.iter(|| {
      let root = tree::parse_fragment(black_box(&html));
      tree::serialize(&root).unwrap()
    });
  });

  group.bench_function("extract_toc", |b| {
    let root = tree::parse_fragment(&html);
    b.iter(|| extract_toc(black_box(&root)));
  });

  group.bench_function("sanitize", |b| {
    b.iter(|| sanitize_html(black_box(&html)));
  });

  group.finish();
}

criterion_group!(benches, bench_render, bench_stages);
criterion_main!(benches);
