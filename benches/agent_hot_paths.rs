//! Benchmarks for the agent's hot paths
//!
//! This benchmark measures:
//! - Tool schema derivation from the registry
//! - Vega-Lite extraction from reply text
//! - Aggregate queries over synthetic dataset tables
//! - A full scripted chat loop without network

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use serde_json::json;

use sciscinet_agent::dataset::{Author, Authorship, DatasetStore, Paper};
use sciscinet_agent::service::{
    ReasoningService, RoundRequest, ServiceError, ServiceReply, StopCondition,
};
use sciscinet_agent::tools::catalog::dataset_registry;
use sciscinet_agent::types::ContentBlock;
use sciscinet_agent::Agent;

const FINAL_TEXT: &str = r#"The corpus peaked in 2023 with strong citation growth.

```vega-lite
{"$schema": "https://vega.github.io/schema/vega-lite/v5.json", "data": {"values": [{"year": 2023, "paper_count": 412}]}, "mark": "bar", "encoding": {"x": {"field": "year", "type": "ordinal"}, "y": {"field": "paper_count", "type": "quantitative"}}}
```
"#;

fn synthetic_store(paper_count: usize) -> DatasetStore {
    let author_count = (paper_count / 4).max(1);
    let papers: Vec<Paper> = (0..paper_count)
        .map(|i| Paper {
            paper_id: i as u64,
            year: 2000 + (i % 25) as i32,
            cited_by_count: (i * 7 % 400) as u64,
            patent_count: u64::from(i % 11 == 0),
        })
        .collect();
    let authors: Vec<Author> = (0..author_count)
        .map(|i| Author {
            author_id: i as u64,
            display_name: Some(format!("Author {}", i)),
            h_index: Some((i % 60) as f64),
            productivity: Some((i % 17) as f64 / 3.0),
        })
        .collect();
    let authorship: Vec<Authorship> = (0..paper_count)
        .flat_map(|p| {
            (0..3).map(move |k| Authorship {
                paper_id: p as u64,
                author_id: ((p * 3 + k) % author_count) as u64,
            })
        })
        .collect();
    DatasetStore::from_tables(papers, authors, authorship, Vec::new())
}

/// Requests one tool on the first round, finishes on the second.
struct TwoRoundService {
    served: AtomicUsize,
}

impl TwoRoundService {
    fn new() -> Self {
        Self {
            served: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ReasoningService for TwoRoundService {
    async fn round(&self, _request: RoundRequest<'_>) -> Result<ServiceReply, ServiceError> {
        if self.served.fetch_add(1, Ordering::Relaxed) == 0 {
            Ok(ServiceReply {
                stop: StopCondition::ToolUse,
                content: vec![ContentBlock::tool_use(
                    "toolu_01",
                    "citation-stats",
                    json!({}),
                )],
            })
        } else {
            Ok(ServiceReply {
                stop: StopCondition::Final,
                content: vec![ContentBlock::text(FINAL_TEXT)],
            })
        }
    }
}

fn bench_schema_derivation(c: &mut Criterion) {
    let registry = dataset_registry(Arc::new(synthetic_store(16)));

    c.bench_function("schema_derivation", |b| {
        b.iter(|| black_box(registry.schemas()))
    });
}

fn bench_viz_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("viz_extraction");

    let with_chart = FINAL_TEXT.to_string();
    let without_chart = "No chart here, just prose about citation counts. ".repeat(64);

    group.throughput(Throughput::Bytes(with_chart.len() as u64));
    group.bench_function("with_chart", |b| {
        b.iter(|| sciscinet_agent::viz::extract_visualization(black_box(&with_chart)))
    });

    group.throughput(Throughput::Bytes(without_chart.len() as u64));
    group.bench_function("without_chart", |b| {
        b.iter(|| sciscinet_agent::viz::extract_visualization(black_box(&without_chart)))
    });

    group.finish();
}

fn bench_dataset_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("dataset_queries");

    for size in [1_000usize, 10_000] {
        let store = synthetic_store(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("papers_by_year", size), &store, |b, s| {
            b.iter(|| s.papers_by_year(black_box(2000), black_box(2024)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("top_authors", size), &store, |b, s| {
            b.iter(|| {
                s.top_authors(
                    black_box(10),
                    sciscinet_agent::dataset::AuthorMetric::HIndex,
                )
                .unwrap()
            })
        });
    }

    group.finish();
}

fn bench_chat_loop(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = Arc::new(synthetic_store(1_000));

    c.bench_function("chat_two_rounds_scripted", |b| {
        b.to_async(&rt).iter_batched(
            || {
                Agent::builder()
                    .with_service(TwoRoundService::new())
                    .with_registry(dataset_registry(Arc::clone(&store)))
                    .build()
                    .unwrap()
            },
            |agent| async move { agent.chat("How cited is the corpus?").await.unwrap() },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_schema_derivation,
    bench_viz_extraction,
    bench_dataset_queries,
    bench_chat_loop
);
criterion_main!(benches);
