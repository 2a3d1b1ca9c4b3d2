//! Summarize a short biography with the "two interesting facts" prompt. This
//! is the end-to-end flow: read `OPENAI_KEY`, render the template, invoke
//! once, print the returned text.
//!
//! ```bash
//! export OPENAI_KEY=sk-...
//! cargo run --example summarize
//! ```

use clap::Parser;
use promptly::{invoker::Config, Client, Invoker, Model, Template};

const TEMPLATE: &str = "given information {information} about a person I \
    want you to create:\n1. a short summary\n2. two interesting facts about \
    them";

const BIOGRAPHY: &str = "Ada Lovelace (10 December 1815 - 27 November 1852) \
    was an English mathematician chiefly known for her work on Charles \
    Babbage's proposed mechanical general-purpose computer, the Analytical \
    Engine. She was the first to recognise that the machine had applications \
    beyond pure calculation, and published the first algorithm intended to \
    be carried out by such a machine.";

/// Create a short summary of a person and two interesting facts about them
/// from a provided biography.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Biography text to summarize.
    #[arg(short, long, default_value = BIOGRAPHY)]
    information: String,

    /// Model to use.
    #[arg(short, long, value_enum, default_value = "gpt35-turbo")]
    model: ModelArg,
}

/// [`Model`] as a clap-friendly value enum.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ModelArg {
    Gpt35Turbo,
    Gpt4o,
    Gpt4oMini,
}

impl From<ModelArg> for Model {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::Gpt35Turbo => Model::Gpt35Turbo,
            ModelArg::Gpt4o => Model::Gpt4o,
            ModelArg::Gpt4oMini => Model::Gpt4oMini,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "log")]
    env_logger::init();

    // Read the command line arguments.
    let args = Args::parse();

    // The credential comes from the environment here, at the edge. The
    // library itself only ever takes an explicit key, and an empty or unset
    // one fails before any request is made.
    let key = std::env::var("OPENAI_KEY").unwrap_or_default();
    let client = Client::new(key)?;

    let invoker = Invoker::with_config(
        client,
        Config {
            model: args.model.into(),
            // Zero keeps the summary as deterministic as the backend allows.
            temperature: 0.0,
            max_tokens: None,
        },
    );

    let template = Template::new(TEMPLATE)?;
    let summary = invoker
        .invoke(&template, [("information", args.information.as_str())])
        .await?;

    println!("{}", summary);

    Ok(())
}
