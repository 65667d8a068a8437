//! scisci-cli — SciSciNet 数据问答命令行工具
//!
//! Usage:
//!   scisci-cli ask <question>     Run one question through the agent
//!   scisci-cli tools              List the registered dataset tools
//!   scisci-cli health             Check dataset and credential readiness

use std::sync::Arc;

use sciscinet_agent::tools::catalog::dataset_registry;
use sciscinet_agent::tools::normalize_type;
use sciscinet_agent::{Agent, AnthropicClient, DatasetStore, Settings};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    match args[1].as_str() {
        "ask" => cmd_ask(&args[2..]).await,
        "tools" => cmd_tools(),
        "health" => cmd_health(),
        "version" | "--version" | "-V" => cmd_version(),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!(
        r#"scisci-cli — SciSciNet UMD 数据问答命令行工具

USAGE:
    scisci-cli <COMMAND> [ARGS]

COMMANDS:
    ask <question>      Run one question through the tool-augmented agent
    tools               List the registered dataset tools and parameters
    health              Check dataset and credential readiness
    version             Show version information
    help                Show this help message

ENVIRONMENT:
    ANTHROPIC_API_KEY   Anthropic credential (OS keyring is checked first)
    SCISCI_DATA_DIR     Dataset directory (default: data)
    SCISCI_MODEL        Model identifier override
    SCISCI_MAX_ROUNDS   Tool-round cap per conversation (default: 8)"#
    );
}

fn cmd_version() {
    println!("scisci-cli {}", env!("CARGO_PKG_VERSION"));
}

async fn cmd_ask(args: &[String]) {
    if args.is_empty() {
        eprintln!("Usage: scisci-cli ask <question>");
        std::process::exit(1);
    }
    let question = args.join(" ");

    let agent = match Agent::builder().build() {
        Ok(agent) => agent,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    match agent.chat(question).await {
        Ok(outcome) => {
            println!("{}", outcome.text);

            if !outcome.tool_calls.is_empty() {
                println!("\n--- Tool calls ---");
                for record in &outcome.tool_calls {
                    println!("  {} {}", record.tool, record.args);
                }
            }

            if let Some(chart) = &outcome.visualization {
                println!("\n--- Vega-Lite spec ---");
                match serde_json::to_string_pretty(chart) {
                    Ok(pretty) => println!("{pretty}"),
                    Err(_) => println!("{chart}"),
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_tools() {
    let settings = Settings::from_env();
    let registry = dataset_registry(Arc::new(DatasetStore::new(settings.data_dir)));

    println!("{} tools registered:\n", registry.len());
    for descriptor in registry.descriptors() {
        println!("{}", descriptor.name);
        println!("  {}", descriptor.description);
        for param in &descriptor.parameters {
            let mut kind = normalize_type(&param.kind).to_string();
            if param.optional {
                kind.push_str(", optional");
            }
            if let Some(default) = &param.default {
                kind.push_str(&format!(", default {default}"));
            }
            println!("    {} ({kind}) - {}", param.name, param.description);
        }
        println!();
    }
}

fn cmd_health() {
    let settings = Settings::from_env();
    println!("model: {}", settings.model);
    println!("data directory: {}", settings.data_dir.display());

    let store = DatasetStore::new(&settings.data_dir);
    match store.preload() {
        Ok(()) => println!("dataset: ok"),
        Err(e) => {
            println!("dataset: FAIL ({e})");
            std::process::exit(1);
        }
    }

    if AnthropicClient::credential_available() {
        println!("credential: configured");
    } else {
        println!("credential: MISSING (set ANTHROPIC_API_KEY or use the OS keyring)");
        std::process::exit(1);
    }
}
