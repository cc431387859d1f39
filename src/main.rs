use clap::Parser;
use expression_operators::{operators::Registry, Evaluator, Value, Variables};
use tracing::{debug, Level};

/// Apply one operator of the formula language to JSON operands.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Operator symbol, e.g. `+`, `@`, `EXISTS`
    #[arg(required_unless_present = "list")]
    symbol: Option<String>,
    /// Operands as JSON; anything that is not valid JSON is taken as text
    #[arg(allow_hyphen_values = true)]
    operands: Vec<String>,
    /// Context variable as name=<json> (repeatable)
    #[arg(long = "var", value_name = "NAME=JSON")]
    vars: Vec<String>,
    /// Print the operator catalog and exit
    #[arg(long)]
    list: bool,
    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn parse_operand(raw: &str) -> Result<Value, String> {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(json) => Value::try_from(json).map_err(|e| e.to_string()),
        Err(_) => Ok(Value::Text(raw.to_string())),
    }
}

fn run(args: Args) -> Result<(), String> {
    let evaluator = Evaluator::new(Registry::with_builtins());
    if args.list {
        for op in evaluator.registry().operators() {
            println!(
                "{:<8} arity={} {:<5} precedence={}",
                op.symbol(),
                op.arity(),
                op.associativity(),
                op.precedence()
            );
        }
        return Ok(());
    }

    let mut vars = Variables::new();
    for assignment in &args.vars {
        let (name, value) = Variables::parse_assignment(assignment).map_err(|e| e.to_string())?;
        vars.set(name, value);
    }
    let operands = args
        .operands
        .iter()
        .map(|raw| parse_operand(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let symbol = args.symbol.unwrap_or_default();
    debug!(%symbol, operands = operands.len(), variables = vars.len(), "evaluating");
    let out = evaluator
        .apply(&symbol, operands, &vars)
        .map_err(|e| e.to_string())?;

    let json = out.map(serde_json::Value::from).unwrap_or(serde_json::Value::Null);
    let text = serde_json::to_string_pretty(&json).map_err(|e| e.to_string())?;
    println!("{text}");
    Ok(())
}

fn main() {
    // Parse CLI arguments.
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    if let Err(e) = run(args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
