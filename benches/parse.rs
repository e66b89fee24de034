//! Benchmarks for the full driver, exercised through the public
//! `Markdown` + `Render` API rather than any internal entry point.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use hoedown::renderer::html::{self, Html};
use hoedown::{Extension, Markdown};

mod samples {
    pub const TINY: &str = "Hello, **world**!";

    pub const SMALL: &str = r#"# Heading

This is a paragraph with *emphasis* and **strong** text.

- Item 1
- Item 2
- Item 3

`inline code` and [a link](https://example.com).
"#;

    pub const MEDIUM: &str = r#"# Project notes

This document demonstrates several Markdown features at once.

## Features

- Fenced code blocks
- Reference-style links
- Tables

### Example

```rust
fn main() {
    println!("Hello, world!");
}
```

## Table

|  a  |  b  |
| --- | --- |
|  1  |  2  |
|  3  |  4  |

> A blockquote with some *emphasized* text and a [reference link][ref].

[ref]: https://example.com "Example"
"#;

    /// A large document built by repeating a representative section, the
    /// way a long README or changelog accumulates content over time.
    pub fn large() -> String {
        let section = r#"
## Section

This paragraph contains various inline elements like *emphasis*, **strong**,
`code`, and [links](https://example.com).

- First bullet point with **bold** text
- Second bullet point with *italic* text
- Third point with `code`

> A blockquote that spans
> multiple lines.

```rust
fn example() {
    let x = 42;
    println!("{}", x);
}
```

Another paragraph, to give the block and inline scanners more to chew on
across a longer document.
"#;
        section.repeat(50)
    }

    /// Many overlapping emphasis markers: stresses `find_emph_char`'s
    /// code-span/link-bracket skipping.
    pub fn pathological_emphasis() -> String {
        "*a ".repeat(500) + &"b* ".repeat(500)
    }

    /// Blockquote nested past any reasonable `max_nesting`, exercising the
    /// recursion guard's literal-fallback path.
    pub fn pathological_nesting() -> String {
        "> ".repeat(64) + "deep\n"
    }
}

fn render(input: &str, extensions: Extension) -> String {
    let doc = Markdown::new(input.as_bytes()).extensions(extensions);
    let renderer = Html::new(html::Flags::empty(), 0);
    doc.render_to_buffer(renderer).to_str().unwrap().to_owned()
}

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    let extended = Extension::FENCED_CODE | Extension::TABLES | Extension::AUTOLINK;

    for (name, input) in [("tiny", samples::TINY), ("small", samples::SMALL), ("medium", samples::MEDIUM)] {
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), input, |b, input| {
            b.iter(|| render(black_box(input), extended));
        });
    }

    let large = samples::large();
    group.throughput(Throughput::Bytes(large.len() as u64));
    group.bench_function("large", |b| b.iter(|| render(black_box(&large), extended)));

    group.finish();
}

fn bench_pathological(c: &mut Criterion) {
    let mut group = c.benchmark_group("pathological");
    group.sample_size(20);

    let emphasis = samples::pathological_emphasis();
    group.throughput(Throughput::Bytes(emphasis.len() as u64));
    group.bench_function("emphasis_explosion", |b| {
        b.iter(|| render(black_box(&emphasis), Extension::empty()))
    });

    let nested = samples::pathological_nesting();
    group.throughput(Throughput::Bytes(nested.len() as u64));
    group.bench_function("deep_nesting", |b| b.iter(|| render(black_box(&nested), Extension::empty())));

    group.finish();
}

fn bench_inline_only(c: &mut Criterion) {
    let mut group = c.benchmark_group("inline_only");

    let input = "some _emphasis_, `code`, and a [link](https://example.com) in one line";
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("single_line", |b| {
        b.iter(|| {
            let doc = Markdown::new(black_box(input).as_bytes());
            let renderer = Html::new(html::Flags::empty(), 0);
            doc.render_inline_to_buffer(renderer)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_parsing, bench_pathological, bench_inline_only);
criterion_main!(benches);
