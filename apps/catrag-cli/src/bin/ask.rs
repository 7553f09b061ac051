use std::env;

use catrag_cli::{init_tracing, load_settings};
use catrag_core::Category;
use catrag_rag::{Clients, QueryService};

const USAGE: &str = "Usage: catrag-ask [--show-context] <category> <question...>";

fn parse_args() -> (bool, Vec<String>) {
    let mut show_context = false;
    let mut rest = Vec::new();
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--show-context" | "-c" => show_context = true,
            "--help" | "-h" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            _ => rest.push(arg),
        }
    }
    (show_context, rest)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let (show_context, args) = parse_args();
    if args.len() < 2 {
        eprintln!("{USAGE}");
        std::process::exit(2);
    }
    let category: Category = args[0].parse()?;
    let question = args[1..].join(" ");

    let settings = load_settings()?;
    let clients = Clients::from_settings(&settings)?;
    let service = QueryService::new(&settings, &clients)?;

    let outcome = service.ask(category, &question).await?;
    if show_context {
        for (i, chunk) in outcome.context.iter().enumerate() {
            println!("--- [{}] {} (score {:.3})", i + 1, chunk.source, chunk.score);
            println!("{}\n", chunk.content);
        }
    }
    println!("{}", outcome.answer);
    Ok(())
}
