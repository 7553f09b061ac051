use catrag_cli::{init_tracing, load_settings};
use catrag_rag::{BuildOutcome, IndexBuilder};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let settings = load_settings()?;
    let embedder = catrag_embed::get_default_embedder(&settings)?;
    let builder = IndexBuilder::new(&settings, embedder)?.with_progress(true);

    let reports = builder.build_all().await?;

    println!("\nCategory-Specific RAG Index Builder\n===================================");
    for r in &reports {
        let status = match r.outcome {
            BuildOutcome::NoDocuments => "skipped (no documents)",
            BuildOutcome::Created => "created",
            BuildOutcome::Updated => "updated",
            BuildOutcome::Unchanged => "up to date",
        };
        println!(
            "{:<16} {:<24} files={} loaded={} unsupported={} failed={} unchanged={} docs={} chunks +{} -{}",
            r.category.display_name(),
            status,
            r.files_seen,
            r.files_loaded,
            r.files_unsupported,
            r.files_failed,
            r.sources_skipped,
            r.documents,
            r.chunks_added,
            r.chunks_removed
        );
    }
    println!("\n💡 To ask a question, run: catrag-ask <category> \"<question>\"");
    Ok(())
}
