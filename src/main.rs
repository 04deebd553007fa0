use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{Generator, generate};
use colored::Colorize;
use metafix::cli::{Cli, Commands};
use metafix::{MetafixContext, commands, output};
use std::io;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.quiet {
        output::set_verbosity(output::Verbosity::Quiet);
    } else if cli.verbose {
        output::set_verbosity(output::Verbosity::Verbose);
    }

    // Completion and check need no config
    let context = match &cli.command {
        Commands::Completion { .. } | Commands::Check { .. } => None,
        _ => Some(MetafixContext::new()?),
    };

    if let Some(ctx) = &context
        && !ctx.config.output.color
    {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Apply {
            manifest,
            roots,
            dry_run,
            times,
        } => {
            let ctx = context.unwrap();
            commands::apply::execute(&ctx, &manifest, &roots, dry_run, times, cli.verbose)?;
        }
        Commands::Check { manifest } => {
            commands::check::execute(&manifest)?;
        }
        Commands::Scan { roots } => {
            let ctx = context.unwrap();
            commands::scan::execute(&ctx, &roots)?;
        }
        Commands::Completion { shell } => {
            print_completions(shell, &mut Cli::command());
        }
    }

    Ok(())
}

fn print_completions<G: Generator>(g: G, cmd: &mut clap::Command) {
    generate(g, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
