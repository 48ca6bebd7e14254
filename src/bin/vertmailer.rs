#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! CLI for sending a single message through an SMTP server

use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vertmailer::{Mail, MailServer, sanitize_mail, validate_mail};

#[derive(Parser)]
#[command(name = "vertmailer")]
#[command(about = "Send one message through an SMTP server")]
#[command(group(ArgGroup::new("content").required(true).args(["body", "body_file"])))]
struct Args {
    /// Sender address
    #[arg(long)]
    from: String,

    /// Recipient address (repeat for several; the first is shown in To:)
    #[arg(long, required = true)]
    to: Vec<String>,

    /// Subject line
    #[arg(long)]
    subject: String,

    /// Message body (HTML allowed)
    #[arg(long)]
    body: Option<String>,

    /// Read the message body from a file
    #[arg(long)]
    body_file: Option<PathBuf>,

    /// Validate and print the sanitized message without sending
    #[arg(long)]
    dry_run: bool,

    /// Output as JSON (with --dry-run)
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let body = match (&args.body, &args.body_file) {
        (Some(body), _) => body.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => anyhow::bail!("either --body or --body-file is required"),
    };
    let mail = Mail::new(&args.from, &args.to, &args.subject, body);

    if args.dry_run {
        return cmd_preview(mail, args.json);
    }

    let server = MailServer::from_env()?;
    let recipients = mail.to.len();
    vertmailer::send(mail, server).await?;
    println!("Message sent to {recipients} recipient(s)");

    Ok(())
}

fn cmd_preview(mail: Mail, json: bool) -> anyhow::Result<()> {
    validate_mail(&mail)?;
    let mail = sanitize_mail(mail);

    if json {
        println!("{}", serde_json::to_string_pretty(&mail)?);
    } else {
        print!("{}", mail.to_wire());
        println!();
    }

    Ok(())
}
