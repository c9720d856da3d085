use std::sync::Arc;

use async_trait::async_trait;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use evolweave::{CompletionError, Document, EvolPipeline, TextCompletion, extract_passages};

fn paragraphs(count: usize) -> String {
  (0..count)
    .map(|i| format!("Paragraph {i} describes a topic in enough detail to count as a passage."))
    .collect::<Vec<_>>()
    .join("\n\n")
}

fn short_lines(count: usize) -> String {
  (0..count)
    .map(|i| format!("line {i} of the list"))
    .collect::<Vec<_>>()
    .join("\n")
}

fn benchmark_passage_extraction(c: &mut Criterion) {
  let mut group = c.benchmark_group("passage_extraction");

  for size in [10, 100, 1000] {
    let text = paragraphs(size);
    group.bench_with_input(BenchmarkId::new("paragraphs", size), &text, |b, text| {
      b.iter(|| black_box(extract_passages("q", text)))
    });

    let text = short_lines(size);
    group.bench_with_input(BenchmarkId::new("line_chunks", size), &text, |b, text| {
      b.iter(|| black_box(extract_passages("q", text)))
    });
  }

  let text = "x".repeat(50_000);
  group.bench_function("fixed_slices_50k", |b| {
    b.iter(|| black_box(extract_passages("q", &text)))
  });

  group.finish();
}

struct EchoModel;

#[async_trait]
impl TextCompletion for EchoModel {
  async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
    if prompt.ends_with("Questions:") {
      Ok("What is it?\nWhy is it?\nHow is it?".to_string())
    } else {
      Ok("Evolved?".to_string())
    }
  }
}

fn benchmark_pipeline(c: &mut Criterion) {
  let runtime = tokio::runtime::Runtime::new().expect("runtime");
  let pipeline = EvolPipeline::new(Arc::new(EchoModel)).expect("graph");
  let mut group = c.benchmark_group("pipeline");

  for docs in [2, 8] {
    let documents: Vec<Document> = (0..docs).map(|_| Document::new(paragraphs(5))).collect();
    group.bench_with_input(BenchmarkId::new("run", docs), &documents, |b, documents| {
      b.to_async(&runtime)
        .iter(|| async { black_box(pipeline.run(documents.clone()).await) })
    });
  }

  group.finish();
}

criterion_group!(benches, benchmark_passage_extraction, benchmark_pipeline);
criterion_main!(benches);
