use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};
use std::sync::Arc;
use vaidya_core::{
    clean, config::ENV_API_KEY, intake, render, CoreConfig, FulfilmentService, Language,
};

#[derive(Parser)]
#[command(name = "vaidya")]
#[command(about = "Vaidya health-question relay CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the prompt that would be sent upstream
    Prompt(QueryArgs),
    /// Sanitise text the way model answers are sanitised
    Clean {
        /// Text to sanitise
        text: String,
    },
    /// Ask the configured upstream once and print the fulfillment text
    Ask(QueryArgs),
}

#[derive(Args)]
struct QueryArgs {
    /// Medicine, food item or free question
    item: String,
    /// Query type: medicine, food or general
    #[arg(long = "type", default_value = "general")]
    query_type: String,
    /// Language code: en or hi (defaults to the configured language)
    #[arg(long)]
    language: Option<String>,
    /// Age in years
    #[arg(long)]
    age: Option<u32>,
    /// Allergies (comma-separated)
    #[arg(long, value_delimiter = ',')]
    allergies: Vec<String>,
    /// Conditions (comma-separated)
    #[arg(long, value_delimiter = ',')]
    conditions: Vec<String>,
}

impl QueryArgs {
    /// The requested language code, if it is one the prompts do not support.
    fn unknown_language(&self) -> Option<&str> {
        self.language
            .as_deref()
            .filter(|code| Language::from_code(code).is_none())
    }

    fn warn_unknown_language(&self) {
        if let Some(code) = self.unknown_language() {
            eprintln!("Unknown language '{code}', using the configured default.");
        }
    }

    /// Build the same payload shape the agent platform posts to the webhook.
    fn to_payload(&self) -> Value {
        let mut parameters = json!({
            "type": self.query_type,
            "item": self.item,
        });
        if let Some(language) = &self.language {
            parameters["language"] = json!(language);
        }
        if let Some(age) = self.age {
            parameters["age"] = json!(age);
        }
        if !self.allergies.is_empty() {
            parameters["allergies"] = json!(self.allergies);
        }
        if !self.conditions.is_empty() {
            parameters["conditions"] = json!(self.conditions);
        }
        json!({ "queryResult": { "queryText": self.item, "parameters": parameters } })
    }
}

/// Configuration for commands that never reach the upstream, so no API key is needed.
fn offline_config() -> anyhow::Result<CoreConfig> {
    let lookup = |key: &str| match key {
        ENV_API_KEY => Some("offline".to_string()),
        _ => std::env::var(key).ok(),
    };
    Ok(CoreConfig::from_env_lookup(lookup)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Prompt(args) => {
            args.warn_unknown_language();
            let cfg = offline_config()?;
            let req = intake::extract(&args.to_payload(), &cfg);
            println!("{}", render(&req));
        }
        Commands::Clean { text } => {
            println!("{}", clean(&text));
        }
        Commands::Ask(args) => {
            args.warn_unknown_language();
            let cfg = Arc::new(CoreConfig::from_env_lookup(|key| std::env::var(key).ok())?);
            let service = FulfilmentService::with_gemini(cfg)?;
            let res = service.fulfil(&args.to_payload()).await;
            println!("{}", res.fulfillment_text);
        }
    }

    Ok(())
}
