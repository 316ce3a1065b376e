use std::io::{self, Write};
use std::process;
use std::sync::Arc;

use clap::Parser;
use colored::*;

use convo::api::OpenAiClient;
use convo::cli::Args;
use convo::config::Config;
use convo::conversation::{Conversation, ResponseMode, RunPoller};
use convo::{ConvoError, Result};

const DEFAULT_INSTRUCTION: &str = "You are a helpful assistant, be concise and to the point";
const EXIT_SENTINELS: &[&str] = &["exit", "quit"];

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match Config::from_env_and_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            process::exit(1);
        }
    };

    if let Err(e) = run(args, config).await {
        eprintln!("{} {}", "Error:".red(), e);
        process::exit(1);
    }
}

async fn run(args: Args, config: Config) -> Result<()> {
    let mode = if args.assistant {
        let assistant_id = config.assistant_id.clone().ok_or_else(|| {
            ConvoError::ConfigError(
                "assistant mode requires --assistant-id or AI_ASSISTANT_ID".to_string(),
            )
        })?;
        ResponseMode::Assistant { assistant_id }
    } else {
        ResponseMode::Completion
    };

    let instruction = config
        .system_prompt
        .clone()
        .unwrap_or_else(|| DEFAULT_INSTRUCTION.to_string());

    if config.verbose {
        eprintln!("{}", format!("[convo] Using model: {}", config.model).dimmed());
        eprintln!("{}", format!("[convo] Endpoint: {}", config.api_endpoint).dimmed());
        eprintln!(
            "{}",
            format!(
                "[convo] Mode: {}",
                if args.assistant { "assistant" } else { "completion" }
            )
            .dimmed()
        );
    }

    let client = Arc::new(OpenAiClient::new(&config.api_key, &config.api_endpoint)?);
    let mut conversation = Conversation::open(client, config.model.clone())
        .await?
        .with_poller(RunPoller::new(config.poll_interval, config.poll_timeout));

    if config.verbose {
        eprintln!(
            "{}",
            format!("[convo] Thread: {}", conversation.thread_id()).dimmed()
        );
    }

    if let Some(count) = args.questions {
        let questions = match &mode {
            ResponseMode::Completion => {
                conversation
                    .sample_questions(&instruction, count, args.max_words)
                    .await?
            }
            ResponseMode::Assistant { assistant_id } => {
                conversation
                    .sample_questions_via_assistant(&instruction, count, args.max_words, assistant_id)
                    .await?
            }
        };
        println!("{}", "Sample questions:".cyan());
        for question in &questions {
            println!("  {}", question);
        }
    }

    // One-shot prompt from argv, otherwise interactive until an exit sentinel.
    if !args.prompt.is_empty() {
        let question = args.prompt.join(" ");
        let reply = conversation.respond(&mode, &instruction, &question).await?;
        println!("{}", reply);
        if args.history {
            print_history(&conversation);
        }
        return Ok(());
    }

    let stdin = io::stdin();
    loop {
        print!("{} ", ">".cyan());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if EXIT_SENTINELS.contains(&question.to_lowercase().as_str()) {
            break;
        }

        match conversation.respond(&mode, &instruction, question).await {
            Ok(reply) => println!("{}", reply),
            Err(e) => eprintln!("{} {}", "Error:".red(), e),
        }

        if args.history {
            print_history(&conversation);
        }
    }

    Ok(())
}

fn print_history(conversation: &Conversation) {
    println!("{}", "Conversation history:".dimmed());
    for line in conversation.history() {
        println!("{}", line.dimmed());
    }
}
