// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap, hands the work to Layer 2 and prints the results.
// This is the only layer that writes to stdout.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;
pub mod report;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, PredictArgs, RulesArgs, TrainArgs};

use crate::domain::traits::TextClassifier;
use crate::ml::rules::RuleBasedClassifier;

#[derive(Parser, Debug)]
#[command(
    name = "sentiment-tree",
    version,
    about = "Learn positive/negative sentiment from word counts with a decision tree, \
             and compare it with a keyword rule."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the matching use case. Routes only, never computes.
    pub fn run(self) -> Result<()> {
        match &self.command {
            Commands::Train(args)   => run_train(args),
            Commands::Predict(args) => run_predict(args),
            Commands::Rules(args)   => run_rules(args),
        }
    }
}

fn run_train(args: &TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    let use_case = TrainUseCase::new(args.into());
    let outcome  = use_case.execute()?;

    if args.show_vocabulary {
        println!("Vocabulary:");
        for (term, index) in &outcome.vocabulary {
            println!("  {term:>12}: {index}");
        }
    }

    if args.show_vectors {
        println!("Training vectors:");
        for vector in &outcome.training_vectors {
            let row: Vec<String> = vector.iter().map(|v| v.to_string()).collect();
            println!("  [{}]", row.join(" "));
        }
    }

    println!("{}", report::predictions_report(&report::array_style(&outcome.tree_predictions)));

    if args.show_tree {
        print!("{}", outcome.tree_text);
    }
    println!("Tree drawn to '{}'", outcome.image_path.display());

    println!("{}", report::predictions_report(&report::list_style(&outcome.rule_predictions)));

    let m = &outcome.metrics;
    println!(
        "Tree: depth {}, {} leaves, {} features, training accuracy {:.1}%",
        m.depth,
        m.leaves,
        m.n_features,
        m.train_accuracy * 100.0
    );
    if let Some(a) = m.rule_agreement {
        println!("Tree and keyword rules agree on {:.1}% of test sentences", a * 100.0);
    }
    println!("Metrics appended to '{}'", outcome.metrics_path.display());
    Ok(())
}

fn run_predict(args: &PredictArgs) -> Result<()> {
    use crate::application::predict_use_case::PredictUseCase;

    let use_case = PredictUseCase::new(&args.checkpoint_dir)?;
    for p in use_case.predict(&args.texts) {
        let marker = if p.agrees() { "" } else { "   (disagree)" };
        println!("{:<40} tree={:<8} rules={}{}", p.text, p.tree, p.rules, marker);
    }
    Ok(())
}

fn run_rules(args: &RulesArgs) -> Result<()> {
    let labels = RuleBasedClassifier::new().classify_all(&args.texts);
    println!("{}", report::predictions_report(&report::list_style(&labels)));
    Ok(())
}
