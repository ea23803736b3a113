use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use warda_core::{RuleTables, ValidationPipeline, DEFAULT_REPLY_DATA_DIR, REVIEW_NOTICE};
use warda_store::ReplyStore;

#[derive(Parser)]
#[command(name = "warda")]
#[command(about = "Warda clinic reply QA CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the validation pipeline over local text
    Validate {
        /// Classification label (e.g. "MRI + Period")
        classification: String,
        /// Read the reply text from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// List stored replies
    List,
    /// Print the CSV export to stdout
    Export,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Validate {
            classification,
            file,
        }) => {
            let raw_text = match file {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };

            let pipeline = ValidationPipeline::new(Arc::new(RuleTables::builtin()))?;
            let verdict = pipeline.validate(&raw_text, &classification);
            if verdict.passed {
                println!("PASSED");
            } else {
                println!("FAILED: {REVIEW_NOTICE}");
            }
            println!("{}", verdict.normalized_text);
        }
        Some(Commands::List) => {
            let store = reply_store();
            let replies = store.list_all();
            if replies.is_empty() {
                println!("No replies found.");
            } else {
                for reply in replies {
                    println!(
                        "ID: {}, Classification: {}, Created: {}, Feedback: {}",
                        reply.id.simple(),
                        reply.classification,
                        reply.created_at.to_rfc3339(),
                        reply.feedback.unwrap_or_else(|| "-".into())
                    );
                }
            }
        }
        Some(Commands::Export) => {
            println!("{}", reply_store().export_csv());
        }
        None => {
            println!("Use 'warda --help' for commands");
        }
    }

    Ok(())
}

fn reply_store() -> ReplyStore {
    let data_dir =
        std::env::var("REPLY_DATA_DIR").unwrap_or_else(|_| DEFAULT_REPLY_DATA_DIR.into());
    ReplyStore::new(PathBuf::from(data_dir))
}
