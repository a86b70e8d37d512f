use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tf_idf_similarity::{config::DEFAULT_DOCUMENTS, PipelineConfig, SimilarityPipeline};

// 参照コーパスを語順を入れ替えて増やしたもの
fn synthetic_documents(copies: usize) -> Vec<String> {
    let mut docs = Vec::with_capacity(DEFAULT_DOCUMENTS.len() * copies);
    for i in 0..copies {
        for doc in DEFAULT_DOCUMENTS {
            let mut words: Vec<&str> = doc.split_whitespace().collect();
            let len = words.len();
            words.rotate_left(i % len);
            docs.push(format!("{} doc{}", words.join(" "), i));
        }
    }
    docs
}

fn build_and_query_benchmark(c: &mut Criterion) {
    let config = PipelineConfig {
        documents: synthetic_documents(200),
        ..PipelineConfig::default()
    };

    c.bench_function("build_pipeline", |b| {
        b.iter(|| {
            let pipeline: SimilarityPipeline =
                SimilarityPipeline::build(black_box(&config)).expect("build");
            pipeline
        });
    });

    let pipeline: SimilarityPipeline = SimilarityPipeline::build(&config).expect("build");
    c.bench_function("query", |b| {
        b.iter(|| pipeline.query(black_box("Human computer interaction graph trees")));
    });
}

criterion_group!(benches, build_and_query_benchmark);
criterion_main!(benches);
