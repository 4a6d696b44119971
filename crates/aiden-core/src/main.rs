//! `aiden` command line: run pipeline steps against the sample treaty.
//!
//! Logs go to stderr (`RUST_LOG` overrides the level); results go to stdout.

use aiden_core::config::MAX_SEED;
use aiden_core::report::{render_structures, render_what_if, WalkthroughReport};
use aiden_core::sampler::sample_structures;
use aiden_core::selector::select_best;
use aiden_core::summary::{generate_summary, SAMPLE_TREATY};
use aiden_core::{AttachmentPoint, CoPilot, CoPilotConfig, Gating};
use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn cli() -> Command {
    let attachment = Arg::new("attachment")
        .long("attachment")
        .value_parser(value_parser!(u32))
        .help("Attachment point in millions (10-100)");

    Command::new("aiden")
        .version(aiden_core::VERSION)
        .about("Aiden - AI treaty co-pilot demo")
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .global(true)
                .value_parser(value_parser!(u64).range(..=MAX_SEED))
                .help("Random seed for reproducible sessions"),
        )
        .arg(
            Arg::new("lenient")
                .long("lenient")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Only require the artifacts each step reads"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Output as JSON"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging on stderr"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("summary")
                .about("Summarize the sample treaty")
                .arg(
                    Arg::new("show-treaty")
                        .long("show-treaty")
                        .action(ArgAction::SetTrue)
                        .help("Print the treaty wording first"),
                ),
        )
        .subcommand(
            Command::new("structures")
                .about("Sample and rank candidate structures")
                .arg(attachment.clone())
                .arg(
                    Arg::new("count")
                        .long("count")
                        .value_parser(value_parser!(usize))
                        .help("Number of candidates"),
                ),
        )
        .subcommand(
            Command::new("what-if")
                .about("Evaluate an attachment change")
                .arg(attachment.clone().required(true)),
        )
        .subcommand(
            Command::new("chat")
                .about("Ask Aiden about the summarized treaty")
                .arg(
                    Arg::new("message")
                        .long("message")
                        .short('m')
                        .required(true)
                        .action(ArgAction::Append)
                        .help("Question to ask (repeatable)"),
                ),
        )
        .subcommand(
            Command::new("walkthrough")
                .about("Run all five steps and print the final recommendation")
                .arg(attachment.default_value("75"))
                .arg(
                    Arg::new("ask")
                        .long("ask")
                        .action(ArgAction::Append)
                        .help("Question to ask in the chat step (repeatable)"),
                ),
        )
}

fn main() {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    if let Err(err) = run(&matches) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

/// Level used when `RUST_LOG` is unset
fn default_log_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(matches: &ArgMatches) -> anyhow::Result<CoPilotConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => CoPilotConfig::load(path)
            .with_context(|| format!("loading configuration from {path}"))?,
        None => CoPilotConfig::default(),
    };
    if let Some(seed) = matches.get_one::<u64>("seed") {
        config.seed = Some(*seed);
    }
    if matches.get_flag("lenient") {
        config.gating = Gating::Lenient;
    }
    Ok(config)
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let config = load_config(matches)?;
    let json = matches.get_flag("json");

    match matches.subcommand() {
        Some(("summary", args)) => {
            let summary = generate_summary();
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                if args.get_flag("show-treaty") {
                    println!("{SAMPLE_TREATY}");
                }
                println!("{summary}");
            }
        }
        Some(("structures", args)) => {
            let attachment = match args.get_one::<u32>("attachment") {
                Some(value) => AttachmentPoint::new(*value)?,
                None => config.default_attachment,
            };
            let count = args
                .get_one::<usize>("count")
                .copied()
                .unwrap_or(config.structure_count);
            let mut rng = match config.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };

            let structures = sample_structures(&mut rng, attachment, count);
            if json {
                println!("{}", serde_json::to_string_pretty(&structures)?);
            } else {
                print!("{}", render_structures(&structures));
                if let Ok(top) = select_best(&structures) {
                    println!("\nTop Candidate: {} ({}% ROI)", top.label, top.projected_roi_pct);
                }
            }
        }
        Some(("what-if", args)) => {
            let attachment = args
                .get_one::<u32>("attachment")
                .copied()
                .context("--attachment is required")?;
            let mut copilot = CoPilot::new(config)?;
            copilot.summarize()?;
            copilot.optimize()?;
            let outcome = copilot.what_if(attachment)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print!("{}", render_what_if(&outcome));
            }
        }
        Some(("chat", args)) => {
            let mut copilot = CoPilot::new(config)?;
            copilot.summarize()?;
            for message in args.get_many::<String>("message").into_iter().flatten() {
                copilot.chat(message)?;
            }

            let history = &copilot.state().chat_history;
            if json {
                println!("{}", serde_json::to_string_pretty(history)?);
            } else {
                for message in history {
                    println!("{:?}: {}", message.role, message.content);
                }
            }
        }
        Some(("walkthrough", args)) => {
            let attachment = args
                .get_one::<u32>("attachment")
                .copied()
                .context("--attachment has a default")?;
            let questions: Vec<String> = args
                .get_many::<String>("ask")
                .into_iter()
                .flatten()
                .cloned()
                .collect();

            let report = walkthrough(config, attachment, &questions)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report.generate_text());
            }
        }
        _ => {}
    }
    Ok(())
}

fn walkthrough(
    config: CoPilotConfig,
    attachment: u32,
    questions: &[String],
) -> anyhow::Result<WalkthroughReport> {
    let seed = config.seed;
    let mut copilot = CoPilot::new(config)?;

    let summary = copilot.summarize()?;
    let initial_structures = copilot.optimize()?;
    let what_if = copilot
        .what_if(attachment)
        .with_context(|| format!("what-if at {attachment}M"))?;

    let mut conversation = Vec::with_capacity(questions.len());
    for question in questions {
        let reply = copilot.chat(question)?;
        conversation.push((question.clone(), reply));
    }
    let context = copilot.context_panel();
    let recommendation = copilot.recommend()?;
    let heatmap = copilot.risk_heatmap();
    copilot.verify_journal()?;

    Ok(WalkthroughReport {
        seed,
        summary,
        initial_structures,
        what_if,
        conversation,
        recommendation,
        context,
        heatmap,
        journal: copilot.journal().entries().to_vec(),
    })
}
