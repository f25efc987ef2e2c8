use crate::config::{Config, Step};
use crate::demo::TodoList;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use tracing::{debug, info};
use trellis_core::{render, Event, Node, RenderRoot, UpdateQueue};
use trellis_dom::{Document, HtmlOptions, Mutation};

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Config file (defaults to trellis.config.json in the current directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the final HTML and every step's mutations as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the mutations performed by each step
    #[arg(long)]
    pub journal: bool,

    /// Disable pretty printing (overrides config)
    #[arg(long)]
    pub compact: bool,
}

#[derive(Debug, Serialize)]
struct StepReport {
    step: String,
    mutations: Vec<Mutation>,
}

#[derive(Debug, Serialize)]
struct RunReport {
    html: String,
    steps: Vec<StepReport>,
}

pub fn run(args: RunArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd, args.config.as_deref())?;
    let report = run_config(&config, args.compact)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "🌱 Rendering todo list...".bright_blue().bold());
    for step in &report.steps {
        println!(
            "  {} {} ({} mutations)",
            "✓".green(),
            step.step,
            step.mutations.len().to_string().cyan()
        );
        if args.journal {
            for mutation in &step.mutations {
                println!("      {}", mutation.to_string().dimmed());
            }
        }
    }
    println!();
    println!("{}", report.html);

    Ok(())
}

fn run_config(config: &Config, compact: bool) -> Result<RunReport> {
    let mut document = Document::new();
    let container = document.create_container(&config.container);
    let updates = UpdateQueue::new();

    let mut node = Node::composite(TodoList::new(updates.clone())).with_attr("title", config.title.as_str());
    if !config.items.is_empty() {
        let composite = node
            .as_composite_mut()
            .ok_or_else(|| anyhow!("Todo list is not a component"))?;
        composite.set_state(&mut document, json!({ "items": config.items }))?;
    }

    let mut root = render(node, container, &mut document)?;
    let mut steps = vec![StepReport {
        step: "initial render".to_string(),
        mutations: document.take_journal(),
    }];

    for step in &config.steps {
        apply_step(step, &mut root, &mut document, &updates)?;
        let mutations = document.take_journal();
        debug!(step = %describe(step), mutations = mutations.len(), "Applied step");
        steps.push(StepReport {
            step: describe(step),
            mutations,
        });
    }

    let options = HtmlOptions {
        pretty: config.pretty && !compact,
        ..HtmlOptions::default()
    };
    let html = document.inner_html(container, &options)?;
    info!(steps = steps.len(), nodes = document.len(), "Run complete");

    Ok(RunReport { html, steps })
}

fn apply_step(
    step: &Step,
    root: &mut RenderRoot,
    document: &mut Document,
    updates: &UpdateQueue,
) -> Result<()> {
    match step {
        Step::SetState(patch) => {
            root.set_state(document, patch.clone())?;
        }
        Step::Dispatch {
            target,
            event,
            detail,
        } => {
            let container = root.container();
            let node = document
                .find_by_attribute(container, "id", target)
                .ok_or_else(|| anyhow!("No element with id '{}'", target))?;
            document.dispatch(node, &Event::new(event.as_str()).with_detail(detail.clone()))?;
            updates.flush(root, document)?;
        }
    }
    Ok(())
}

fn describe(step: &Step) -> String {
    match step {
        Step::SetState(patch) => format!("setState {}", patch),
        Step::Dispatch { target, event, .. } => format!("dispatch {} on #{}", event, target),
    }
}
