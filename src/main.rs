use anyhow::Result;
use clap::Parser;
use symdiff::{ExprPool, Style};
use tracing_subscriber::EnvFilter;

/// Symbolic differentiator for polynomials.
#[derive(Parser, Debug)]
#[command(about)]
struct Args {
    /// Polynomial coefficients, highest degree first.
    #[arg(required = true, allow_negative_numbers = true)]
    coefficients: Vec<f64>,

    /// Variable of the polynomial.
    #[arg(short, long, default_value = "x")]
    var: String,

    /// Number of times to differentiate.
    #[arg(short = 'n', long, default_value_t = 1)]
    order: usize,

    /// Print the debug form instead of infix text.
    #[arg(short, long)]
    debug: bool,
}

fn run(args: &Args) -> Result<String> {
    let mut pool = ExprPool::new();
    let polynomial = pool.polynomial(&args.var, &args.coefficients)?;
    let derivative = pool.nth_derivative(polynomial, &args.var, args.order)?;
    let style = if args.debug { Style::Debug } else { Style::Text };
    Ok(pool.print(derivative, style)?)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(text) => println!("{}", text),
        Err(err) => println!("Error: {}", err),
    }
}
