//! vertex-chat – terminal front end for the site's two visitor flows.
//!
//! `chat` drives a [`ChatSession`] against the completion API, the same way
//! the site's widget does; `submit` sends one contact form with the
//! low-privilege database credential.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};
use vertex_core::chat::session::QuickReply;
use vertex_core::{
    ChatSession, CompletionConfig, ContactForm, ContactFormClient, DatabaseConfig, HandoffConfig,
    HandoffDetails, Relay, Role,
};

#[derive(Parser)]
#[command(name = "vertex-chat")]
#[command(about = "Chat with the Vertex Engineering assistant or send a contact form", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat session
    Chat(ChatArgs),
    /// Send one contact form submission
    Submit(SubmitArgs),
}

#[derive(Args)]
struct ChatArgs {
    /// Name added to the WhatsApp greeting on handoff
    #[arg(long)]
    name: Option<String>,

    /// Email added to the WhatsApp greeting on handoff
    #[arg(long)]
    email: Option<String>,
}

#[derive(Args)]
struct SubmitArgs {
    #[arg(long)]
    first_name: String,

    #[arg(long)]
    last_name: String,

    #[arg(long)]
    email: String,

    /// Project description, at least 20 words
    #[arg(long)]
    message: String,
}

/// What one line of terminal input means.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Quit,
    Skip,
    Send(String),
}

fn parse_input(line: &str, quick_replies: &[QuickReply]) -> Input {
    let line = line.trim();
    match line {
        "" => Input::Skip,
        "/quit" | "/exit" => Input::Quit,
        _ => match line.parse::<usize>() {
            Ok(n) if (1..=quick_replies.len()).contains(&n) => {
                Input::Send(quick_replies[n - 1].message.to_owned())
            }
            _ => Input::Send(line.to_owned()),
        },
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_from_env("VERTEX_LOG"))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Chat(args) => run_chat(args).await,
        Commands::Submit(args) => run_submit(args).await,
    }
}

async fn run_chat(args: ChatArgs) -> Result<()> {
    let handoff = HandoffConfig::from_env();
    let number = handoff.whatsapp_number.as_deref();
    let relay = Relay::from_config(&CompletionConfig::from_env(), number);
    if !relay.is_configured() {
        info!("completion API key not set; replies will be configuration notices");
    }

    let mut session = ChatSession::new();
    session.set_handoff_details(HandoffDetails::new(
        args.name.unwrap_or_default(),
        args.email.unwrap_or_default(),
    ));

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut link_shown = false;

    for message in session.transcript() {
        print_message(&mut stdout, message.role, &message.content).await?;
    }

    loop {
        let quick_replies = session.quick_replies();
        for (i, reply) in quick_replies.iter().enumerate() {
            stdout
                .write_all(format!("  [{}] {}\n", i + 1, reply.label).as_bytes())
                .await?;
        }
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await.context("reading stdin")? else {
            break;
        };
        let text = match parse_input(&line, quick_replies) {
            Input::Quit => break,
            Input::Skip => continue,
            Input::Send(text) => text,
        };

        debug!(len = text.len(), "sending message");
        if let Some(reply) = session.send(&relay, &text).await {
            let content = reply.content.clone();
            print_message(&mut stdout, Role::Assistant, &content).await?;
        }

        if session.handoff() && !link_shown {
            let notice = match number {
                Some(number) => format!(
                    "\nContinue on WhatsApp: {}\n\n",
                    session.handoff_link(number)
                ),
                None => "\nUse the contact form on the site to reach the team.\n\n".to_owned(),
            };
            stdout.write_all(notice.as_bytes()).await?;
            link_shown = true;
        }
    }

    Ok(())
}

async fn print_message(stdout: &mut tokio::io::Stdout, role: Role, content: &str) -> Result<()> {
    let who = match role {
        Role::User => "you",
        Role::Assistant => "assistant",
    };
    stdout
        .write_all(format!("{who}: {content}\n\n").as_bytes())
        .await?;
    Ok(())
}

async fn run_submit(args: SubmitArgs) -> Result<()> {
    let store = DatabaseConfig::from_env().anon_store()?;
    let client = ContactFormClient::new(store);
    let form = ContactForm {
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
        message: args.message,
    };

    client.submit(&form).await?;
    println!("Thanks! Your message has been sent.");
    Ok(())
}
