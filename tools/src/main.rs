//! churn-runner: headless front end for the churn scoring pipeline.
//!
//! Usage:
//!   churn-runner predict --model model.json --price 20 --payment 200 --review 4.5 --state gujarat
//!   churn-runner predict --model model.json --request request.json
//!   churn-runner batch   --model model.json --input customers.csv --output scored.csv

use anyhow::{bail, Context, Result};
use churn_core::{batch, CustomerInput, PredictionPipeline};
use std::env;
use std::fs;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mode = match args.get(1).map(String::as_str) {
        Some(mode @ ("predict" | "batch")) => mode,
        _ => {
            eprintln!("usage: churn-runner <predict|batch> --model model.json [options]");
            eprintln!("  predict: --price N --payment N --review N --state NAME");
            eprintln!("           (or --request request.json)");
            eprintln!("  batch:   --input in.csv --output out.csv");
            bail!("no mode given");
        }
    };

    // The artifact is process-wide, read-only state; a load failure aborts
    // startup with no partial service.
    let model_path = str_arg(&args, "--model").unwrap_or("data/model.json");
    let pipeline = PredictionPipeline::load(model_path)
        .with_context(|| format!("loading model artifact from {model_path}"))?;

    match mode {
        "predict" => run_predict(&args, &pipeline),
        _ => run_batch(&args, &pipeline),
    }
}

fn run_predict(args: &[String], pipeline: &PredictionPipeline) -> Result<()> {
    let input = if let Some(request_path) = str_arg(args, "--request") {
        let content = fs::read_to_string(request_path)
            .with_context(|| format!("reading request file {request_path}"))?;
        serde_json::from_str::<CustomerInput>(&content)
            .with_context(|| format!("parsing request file {request_path}"))?
    } else {
        let state = match str_arg(args, "--state") {
            Some(s) => s.to_string(),
            None => bail!("--state is required (or pass --request request.json)"),
        };
        CustomerInput {
            mean_price:     parse_arg(args, "--price", 0.0),
            payment_value:  parse_arg(args, "--payment", 0.0),
            review_score:   parse_arg(args, "--review", 3.0),
            customer_state: state,
        }
    };

    let prediction = pipeline.predict(&input)?;
    println!("{}", serde_json::to_string_pretty(&prediction)?);
    Ok(())
}

fn run_batch(args: &[String], pipeline: &PredictionPipeline) -> Result<()> {
    let input_path = match str_arg(args, "--input") {
        Some(p) => p,
        None => bail!("--input is required for batch mode"),
    };
    let output_path = match str_arg(args, "--output") {
        Some(p) => p,
        None => bail!("--output is required for batch mode"),
    };

    let summary = batch::predict_batch_file(pipeline.bundle(), input_path, output_path)
        .with_context(|| format!("scoring batch {input_path}"))?;

    println!("=== BATCH SUMMARY ===");
    println!("  input:       {input_path}");
    println!("  output:      {output_path}");
    println!("  rows scored: {}", summary.rows_scored);
    println!("  high risk:   {}", summary.high_risk);
    println!("  medium risk: {}", summary.medium_risk);
    println!("  low risk:    {}", summary.low_risk);
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn str_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
