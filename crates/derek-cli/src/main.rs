mod bootstrap_helpers;
mod cli_args;
mod command_input;
mod dry_run_handler;

use anyhow::{Context, Result};
use clap::Parser;
use derek_commands::{
    load_command_config, render_command_feedback, CommandContext, CommandDispatcher,
    DispatchOutcome, InterpretedCommand,
};
use serde::Serialize;

use crate::bootstrap_helpers::init_tracing;
use crate::cli_args::Cli;
use crate::command_input::{load_issue_snapshot, load_repo_policy, read_comment_body};
use crate::dry_run_handler::{DryRunHandler, PlannedCall};

#[derive(Debug, Serialize)]
struct DryRunReport {
    #[serde(flatten)]
    command: InterpretedCommand,
    outcome: DispatchOutcome,
    calls: Vec<PlannedCall>,
    feedback: String,
}

async fn run_cli(cli: Cli) -> Result<()> {
    let config = load_command_config(cli.config.as_deref())?.with_process_env();
    let dispatcher = CommandDispatcher::new(config).context("invalid command config")?;
    let snapshot = load_issue_snapshot(cli.snapshot.as_deref())?;
    let policy = load_repo_policy(cli.policy.as_deref())?;
    let body = read_comment_body(
        cli.comment.as_deref(),
        cli.comment_file.as_deref(),
        &mut std::io::stdin(),
    )?;
    let context = CommandContext {
        commenter_login: cli.commenter.clone(),
    };

    let command = dispatcher.interpret(&body, &snapshot, &context, policy.as_ref());
    let feedback = render_command_feedback(&body, &command.plan, &snapshot, &context);
    let handler = DryRunHandler::default();
    let outcome = dispatcher.execute(&command, &handler).await?;
    let report = DryRunReport {
        command,
        outcome,
        calls: handler.into_calls(),
        feedback,
    };

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("failed to render report")?
        );
        return Ok(());
    }
    println!("{}", report.feedback);
    for call in &report.calls {
        match &call.argument {
            Some(argument) => println!("would call {}({argument})", call.method),
            None => println!("would call {}()", call.method),
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    run_cli(Cli::parse()).await
}
