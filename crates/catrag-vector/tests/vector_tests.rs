use catrag_core::types::DocumentChunk;
use catrag_vector::{CategoryIndex, SourceRecord};

fn chunk(source: &str, i: usize, content: &str) -> DocumentChunk {
    DocumentChunk {
        id: format!("{source}#{i}"),
        source: source.to_string(),
        category: "hr".to_string(),
        content_type: "application/json".to_string(),
        content: content.to_string(),
        chunk_index: i,
        total_chunks: 1,
    }
}

fn unit(dim: usize, hot: usize) -> Vec<f32> {
    let mut v = vec![0.0; dim];
    v[hot] = 1.0;
    v
}

#[tokio::test]
async fn missing_or_empty_directory_is_not_an_index() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("index_hr");
    assert!(!CategoryIndex::exists(&path).await?);
    assert!(!path.exists(), "checking must not create the directory");

    std::fs::create_dir(&path)?;
    assert!(!CategoryIndex::exists(&path).await?, "a directory without a chunks table is not an index");
    Ok(())
}

#[tokio::test]
async fn append_search_and_delete() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("index_hr");
    let index = CategoryIndex::open(&path).await?;

    let chunks = vec![
        chunk("data/hr/a.json", 0, "Leave Policy India"),
        chunk("data/hr/a.json", 1, "Leave types and days"),
        chunk("data/hr/b.json", 0, "Payroll summary"),
    ];
    index.append(&chunks, &[unit(4, 0), unit(4, 1), unit(4, 2)]).await?;

    assert!(CategoryIndex::exists(&path).await?);
    assert_eq!(index.count_rows().await?, 3);

    let hits = index.search(&unit(4, 1), 2).await?;
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].content, "Leave types and days");
    assert!(hits[0].score >= hits[1].score);

    index.delete_source("data/hr/a.json").await?;
    assert_eq!(index.count_rows().await?, 1);
    let hits = index.search(&unit(4, 0), 10).await?;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].source, "data/hr/b.json");
    Ok(())
}

#[tokio::test]
async fn append_is_additive() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let index = CategoryIndex::open(&tmp.path().join("index_hr")).await?;
    let chunks = vec![chunk("data/hr/a.json", 0, "same text")];

    index.append(&chunks, &[unit(3, 0)]).await?;
    index.append(&chunks, &[unit(3, 0)]).await?;

    assert_eq!(index.count_rows().await?, 2, "identical chunks are appended again");
    assert!(index.append(&chunks, &[]).await.is_err(), "mismatched lengths are rejected");
    Ok(())
}

#[tokio::test]
async fn source_ledger_upserts_by_source() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let index = CategoryIndex::open(&tmp.path().join("index_hr")).await?;
    assert!(index.sources().await?.is_empty());

    let a = SourceRecord { source: "data/hr/a.json".into(), content_hash: "h1".into(), chunk_count: 2 };
    let b = SourceRecord { source: "data/hr/b.json".into(), content_hash: "h2".into(), chunk_count: 1 };
    index.record_sources(&[a.clone(), b.clone()]).await?;

    let a2 = SourceRecord { content_hash: "h3".into(), chunk_count: 4, ..a };
    index.record_sources(&[a2.clone()]).await?;

    let ledger = index.sources().await?;
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger["data/hr/a.json"], a2);
    assert_eq!(ledger["data/hr/b.json"], b);
    Ok(())
}

#[tokio::test]
async fn counts_beyond_int32_are_rejected() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("index_hr");
    let index = CategoryIndex::open(&path).await?;
    let too_big = i32::MAX as usize + 1;

    let mut oversized = chunk("a.json", 0, "Leave Policy India");
    oversized.total_chunks = too_big;
    let err = index.append(&[oversized], &[unit(4, 0)]).await.unwrap_err();
    assert!(format!("{err:#}").contains("total_chunks"));
    assert!(!CategoryIndex::exists(&path).await?, "nothing is written");

    let record = SourceRecord { source: "a.json".into(), content_hash: "h1".into(), chunk_count: too_big };
    assert!(index.record_sources(&[record]).await.is_err());
    assert!(index.sources().await?.is_empty());
    Ok(())
}
