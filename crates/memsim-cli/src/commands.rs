use std::io::{self, BufRead, Write};

use anyhow::Context;
use colored::Colorize;
use memsim_core::{
    parse_line, parse_script, render_entry, render_table, run_op, run_script, AddressSpace,
    Memory, Outcome, SharedAddressSpace, SpaceConfig, Value,
};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let mut memory = build_memory(&cli.space)?;
    let format = cli.format;
    match cli.command {
        Command::List => cmd_list(memory.as_ref(), &format),
        Command::Run(args) => cmd_run(memory.as_mut(), args, &format),
        Command::Repl => cmd_repl(memory.as_mut(), &format),
        Command::Exec(args) => cmd_exec(memory.as_mut(), args, &format),
        Command::Resolve(args) => cmd_resolve(memory.as_mut(), args, &format),
    }
}

fn build_memory(args: &SpaceArgs) -> anyhow::Result<Box<dyn Memory>> {
    let mut config = match &args.config {
        Some(path) => SpaceConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SpaceConfig::default(),
    };
    if let Some(max_hops) = args.max_hops {
        config = config.with_max_hops(max_hops);
    }

    let default = Value::from_literal(&args.default_value);
    tracing::debug!(size = args.size, default = %default, shared = args.shared, "seeding memory");
    let space = AddressSpace::with_config(args.size, default, config)?;
    if args.shared {
        Ok(Box::new(SharedAddressSpace::from_space(space)))
    } else {
        Ok(Box::new(space))
    }
}

fn cmd_list(memory: &dyn Memory, format: &OutputFormat) -> anyhow::Result<()> {
    let entries = memory.list_all()?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Text => print!("{}", render_table(entries.iter().map(|(a, v)| (a, v)))),
    }
    Ok(())
}

fn cmd_run(memory: &mut dyn Memory, args: RunArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.script)
        .with_context(|| format!("reading script {}", args.script.display()))?;
    let ops = parse_script(&text)?;
    for op in &ops {
        let outcome = run_op(&mut *memory, op).with_context(|| format!("`{op}` failed"))?;
        print_outcome(&outcome, format)?;
    }
    if args.list {
        cmd_list(memory, format)?;
    }
    Ok(())
}

fn cmd_repl(memory: &mut dyn Memory, format: &OutputFormat) -> anyhow::Result<()> {
    let stdin = io::stdin();
    for (index, line) in stdin.lock().lines().enumerate() {
        let line = line?;
        let result = parse_line(&line, index + 1).and_then(|op| match op {
            Some(op) => run_op(&mut *memory, &op).map(Some),
            None => Ok(None),
        });
        match result {
            Ok(Some(outcome)) => print_outcome(&outcome, format)?,
            Ok(None) => {}
            Err(e) => eprintln!("{} {}", "✗".red().bold(), e),
        }
        io::stdout().flush()?;
    }
    Ok(())
}

fn cmd_exec(memory: &mut dyn Memory, args: ExecArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let line = args.op.join(" ");
    let op = parse_line(&line, 1)?.context("no operation given")?;
    let outcome = run_op(memory, &op)?;
    print_outcome(&outcome, format)
}

fn cmd_resolve(
    memory: &mut dyn Memory,
    args: ResolveArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    if let Some(path) = &args.script {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        run_script(&mut *memory, &parse_script(&text)?)?;
    }
    let resolution = memory.resolve(&args.address)?;
    let hops = resolution.hops();
    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "target": resolution.target,
                "path": resolution.path,
                "exists": resolution.exists,
                "hops": hops,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Text => {
            let path: Vec<String> = resolution.path.iter().map(|a| a.to_string()).collect();
            println!("{}", path.join(" → "));
            let state = if resolution.exists {
                "exists".green()
            } else {
                "absent".yellow()
            };
            println!(
                "  Target: {} ({}, {} hops)",
                resolution.target.to_string().bold(),
                state,
                hops
            );
        }
    }
    Ok(())
}

fn print_outcome(outcome: &Outcome, format: &OutputFormat) -> anyhow::Result<()> {
    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string(outcome)?);
        return Ok(());
    }
    match outcome {
        Outcome::Listed { entries } => {
            print!("{}", render_table(entries.iter().map(|(a, v)| (a, v))))
        }
        Outcome::Read { address, value } => {
            print!("{}", render_table([(address, value)]))
        }
        Outcome::Written { target } => {
            println!("{} Wrote {}", "✓".green(), target.to_string().yellow())
        }
        Outcome::Deleted { target } => {
            println!("{} Deleted {}", "✓".green(), target.to_string().yellow())
        }
        Outcome::RawWritten { address } => {
            println!("{} Raw wrote {}", "✓".green(), address.to_string().yellow())
        }
        Outcome::RawDeleted { address, value } => println!(
            "{} Raw deleted {}",
            "✓".green(),
            render_entry(address, value).yellow()
        ),
    }
    Ok(())
}
