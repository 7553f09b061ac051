use catrag_core::config::{EmbeddingSettings, Settings};
use catrag_core::traits::Embedder;
use catrag_embed::{get_default_embedder, FakeEmbedder, OpenAiCompatEmbedder};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer, dim: usize) -> EmbeddingSettings {
    EmbeddingSettings { base_url: server.uri(), model: "gemini-embedding-001".into(), dimensions: dim, ..Default::default() }
}

#[tokio::test]
async fn fake_embedder_shapes_and_determinism() {
    std::env::set_var("APP_USE_FAKE_EMBEDDINGS", "1");
    let mut settings = Settings::default();
    settings.embedding.dimensions = 64;

    let embedder = get_default_embedder(&settings).expect("embedder");
    let texts = vec!["hello world".to_string(), "hello world".to_string()];
    let embs = embedder.embed_batch(&texts).await.expect("embed_batch");

    assert_eq!(embedder.dim(), 64);
    assert_eq!(embs[0].len(), 64);
    let norm: f32 = embs[0].iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() <= 1e-3, "vector is L2-normalized (norm={norm})");
    assert_eq!(embs[0], embs[1]);
}

#[tokio::test]
async fn hosted_embedder_posts_batch_and_orders_by_index() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "gemini-embedding-001",
            "input": ["first", "second"],
            "dimensions": 3
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "object": "list",
            "data": [
                {"object": "embedding", "index": 1, "embedding": [0.0, 1.0, 0.0]},
                {"object": "embedding", "index": 0, "embedding": [1.0, 0.0, 0.0]}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let embedder = OpenAiCompatEmbedder::new("test-key", &settings_for(&server, 3)).unwrap();
    let out = embedder.embed_batch(&["first".to_string(), "second".to_string()]).await.unwrap();

    assert_eq!(out, vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]]);
    assert_eq!(embedder.embedder_id(), "gemini-embedding-001:d3");
}

#[tokio::test]
async fn service_error_is_propagated_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&server)
        .await;

    let embedder = OpenAiCompatEmbedder::new("test-key", &settings_for(&server, 3)).unwrap();
    let err = embedder.embed_batch(&["q".to_string()]).await.unwrap_err().to_string();

    assert!(err.contains("429"), "{err}");
    assert!(err.contains("quota exceeded"), "{err}");
}

#[tokio::test]
async fn wrong_dimension_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{"index": 0, "embedding": [0.5, 0.5]}]
        })))
        .mount(&server)
        .await;

    let embedder = OpenAiCompatEmbedder::new("test-key", &settings_for(&server, 3)).unwrap();
    assert!(embedder.embed_batch(&["q".to_string()]).await.is_err());
}

#[tokio::test]
async fn empty_batch_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST")).respond_with(ResponseTemplate::new(500)).expect(0).mount(&server).await;

    let embedder = OpenAiCompatEmbedder::new("test-key", &settings_for(&server, 3)).unwrap();
    assert!(embedder.embed_batch(&[]).await.unwrap().is_empty());
    assert_eq!(FakeEmbedder::new(3).embed_batch(&[]).await.unwrap().len(), 0);
}

#[test]
fn blank_api_key_is_rejected() {
    assert!(OpenAiCompatEmbedder::new("  ", &EmbeddingSettings::default()).is_err());
}
