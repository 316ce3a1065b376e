use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "convo")]
#[command(about = "Dual-mode conversation CLI over the OpenAI API", long_about = None)]
pub struct Args {
    #[arg(
        short = 'a',
        long = "assistant",
        help = "Answer through the assistant/thread API instead of chat completions"
    )]
    pub assistant: bool,

    #[arg(
        long = "assistant-id",
        help = "Assistant ID (asst_...) to run against, overrides AI_ASSISTANT_ID"
    )]
    pub assistant_id: Option<String>,

    #[arg(short = 'm', long = "model", help = "Model identifier to converse with")]
    pub model: Option<String>,

    #[arg(long = "system", help = "Instruction message sent with every turn")]
    pub system: Option<String>,

    #[arg(
        long = "questions",
        help = "Generate this many sample questions before the conversation starts"
    )]
    pub questions: Option<u32>,

    #[arg(
        long = "max-words",
        default_value_t = 10,
        help = "Word limit per generated sample question"
    )]
    pub max_words: u32,

    #[arg(long = "history", help = "Print the transcript after every turn")]
    pub history: bool,

    #[arg(
        short = 'v',
        long = "verbose",
        help = "Print diagnostic output on stderr"
    )]
    pub verbose: bool,

    #[arg(
        long = "api-endpoint",
        help = "Custom API base URL (e.g., http://localhost:11434/v1)"
    )]
    pub api_endpoint: Option<String>,

    #[arg(help = "One-shot prompt; omit to start the interactive loop")]
    pub prompt: Vec<String>,
}
