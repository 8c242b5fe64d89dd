use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use vsp_machine::prelude::*;
use vsp_machine::DEFAULT_DICT_INDENT;
use vsp_types::render;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let type_arg = || {
        Arg::new("type")
            .required(true)
            .help("Declared type: int, int|str, List[int] or [\"list\",\"int\"]")
    };

    let cli = Command::new("vsp")
        .version(vsp_machine::VERSION)
        .about("Typed view-stage parameter editing")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("annotate")
                .about("Render the annotation of a declared type")
                .arg(type_arg()),
        )
        .subcommand(
            Command::new("check")
                .about("Validate, normalize and cast one value")
                .arg(type_arg())
                .arg(Arg::new("text").required(true).help("Text to check"))
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("replay")
                .about("Run an editing session from a list of events")
                .arg(type_arg())
                .arg(
                    Arg::new("events")
                        .num_args(0..)
                        .help("Events: edit, change=<text>, commit, cancel, clear-error, blur"),
                )
                .arg(Arg::new("value").long("value").help("Initial value"))
                .arg(
                    Arg::new("submitted")
                        .long("submitted")
                        .action(ArgAction::SetTrue)
                        .help("Treat the initial value as committed"),
                )
                .arg(
                    Arg::new("focus-on-init")
                        .long("focus-on-init")
                        .action(ArgAction::SetTrue)
                        .help("Start in edit mode"),
                )
                .arg(
                    Arg::new("indent")
                        .long("indent")
                        .default_value("2")
                        .value_parser(value_parser!(u8).range(..=16))
                        .help("Indent of pretty-printed dict values (at most 16)"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output notifications as JSON"),
                ),
        );

    let matches = cli.get_matches();

    match matches.subcommand() {
        Some(("annotate", args)) => {
            let signature = signature_arg(args)?;
            println!("{}", render(&signature));
        }
        Some(("check", args)) => {
            let signature = signature_arg(args)?;
            let text = args.get_one::<String>("text").context("missing text")?;
            let registry = HandlerRegistry::with_defaults();

            match registry.accept(&signature, Input::Text(text)) {
                Ok(accepted) if args.get_flag("json") => {
                    println!("{}", serde_json::to_string_pretty(&accepted)?);
                }
                Ok(accepted) => {
                    println!("member:  {}", accepted.member);
                    println!("display: {}", accepted.display);
                    println!("value:   {}", accepted.value.to_json());
                }
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            }
        }
        Some(("replay", args)) => replay(args)?,
        _ => unreachable!("subcommand required"),
    }

    Ok(())
}

fn signature_arg(args: &ArgMatches) -> Result<TypeSignature> {
    let text = args.get_one::<String>("type").context("missing type")?;
    let signature = if text.trim_start().starts_with('[') {
        serde_json::from_str::<TypeSignature>(text).with_context(|| format!("invalid type '{text}'"))?
    } else {
        text.parse::<TypeSignature>().with_context(|| format!("invalid type '{text}'"))?
    };
    Ok(signature)
}

fn replay(args: &ArgMatches) -> Result<()> {
    let signature = signature_arg(args)?;
    let indent = args
        .get_one::<u8>("indent")
        .map_or(DEFAULT_DICT_INDENT, |&n| usize::from(n));
    let json = args.get_flag("json");

    let events = args
        .get_many::<String>("events")
        .into_iter()
        .flatten()
        .map(|e| e.parse::<ParameterEvent>())
        .collect::<Result<Vec<_>, _>>()?;

    let mut context = ParameterContext::new("value", signature)
        .with_submitted(args.get_flag("submitted"))
        .with_focus_on_init(args.get_flag("focus-on-init"));
    if let Some(value) = args.get_one::<String>("value") {
        context = context.with_value(value.as_str());
    }

    let (mut machine, notification) = ParameterMachine::spawn(
        context,
        Arc::new(HandlerRegistry::with_defaults()),
        MachineConfig::new().with_dict_indent(indent),
        Arc::new(NoopFocus),
    );
    println!("spawn -> {}", machine.state());
    report(notification.as_ref(), json)?;

    for event in events {
        let label = format!("{event:?}");
        let notification = machine.send(event);
        let context = machine.context();
        println!(
            "{label} -> {} value={:?}{}",
            machine.state(),
            context.value,
            context
                .error
                .as_deref()
                .map(|e| format!(" error={e:?}"))
                .unwrap_or_default()
        );
        report(notification.as_ref(), json)?;
    }

    Ok(())
}

fn report(notification: Option<&Notification>, json: bool) -> Result<()> {
    let Some(notification) = notification else {
        return Ok(());
    };
    if json {
        println!("  {}", serde_json::to_string(notification)?);
        return Ok(());
    }
    match notification {
        Notification::Edit { context } => {
            println!("  PARAMETER.EDIT value={:?}", context.value);
        }
        Notification::Commit { parameter, value } => {
            println!(
                "  PARAMETER.COMMIT value={:?} cast={}",
                parameter.value,
                value.to_json()
            );
        }
    }
    Ok(())
}
