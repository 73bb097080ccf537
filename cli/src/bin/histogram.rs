use clap::Parser;
use dice_engine::stats::{chi_square, expected_d20, expected_distribution, Histogram};
use dice_engine::{parse, roll, roll_d20, AdMode, Dice, Limits};
use std::collections::BTreeMap;

// count * sides above this makes the exact convolution too slow to bother.
const MAX_EXACT_SPAN: u64 = 5_000;

#[derive(Parser)]
#[command(name = "dice-histogram")]
#[command(about = "Monte Carlo sim: observed vs exact roll distribution")]
struct Args {
    /// Dice expression to sample (ignored when --adv is given)
    #[arg(long, default_value = "1d20")]
    expr: String,

    /// Sample a d20 check instead: normal | advantage | disadvantage
    #[arg(long)]
    adv: Option<String>,

    /// Number of trials
    #[arg(long, default_value_t = 1000)]
    trials: u32,

    /// RNG seed
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Width of the widest bar
    #[arg(long, default_value_t = 40)]
    width: usize,
}

fn to_mode(s: &str) -> anyhow::Result<AdMode> {
    match s.to_lowercase().as_str() {
        "normal" => Ok(AdMode::Normal),
        "advantage" | "adv" => Ok(AdMode::Advantage),
        "disadvantage" | "dis" => Ok(AdMode::Disadvantage),
        other => anyhow::bail!("unknown advantage mode: {}", other),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if args.trials == 0 {
        anyhow::bail!("--trials must be at least 1");
    }
    let mut dice = Dice::from_seed(args.seed);

    let (label, observed, expected): (String, Histogram, BTreeMap<i64, f64>) =
        if let Some(ref adv) = args.adv {
            let mode = to_mode(adv)?;
            let observed = (0..args.trials)
                .map(|_| roll_d20(mode, &mut dice).total())
                .collect();
            (format!("d20 ({:?})", mode), observed, expected_d20(mode))
        } else {
            let expr = parse(args.expr.trim())?;
            Limits::default().check(&expr)?;
            if u64::from(expr.count) * u64::from(expr.sides) > MAX_EXACT_SPAN {
                anyhow::bail!("{} has too many outcomes for an exact comparison", expr);
            }
            let mut observed = Histogram::new();
            for _ in 0..args.trials {
                observed.record(roll(&expr, &mut dice)?.total());
            }
            (expr.to_string(), observed, expected_distribution(&expr))
        };

    let n = observed.trials() as f64;
    let peak = expected
        .values()
        .copied()
        .fold(0.0_f64, f64::max)
        .max(observed.iter().map(|(_, c)| c as f64 / n).fold(0.0, f64::max));
    let exact_mean: f64 = expected.iter().map(|(&t, &p)| t as f64 * p).sum();

    println!("dice-histogram results");
    println!("----------------------");
    println!("roll:               {}", label);
    println!("trials:             {}", args.trials);
    println!("seed:               {}", args.seed);
    println!();
    println!("{:>6} {:>8} {:>8}", "total", "observed", "expected");
    for (&total, &p) in &expected {
        let seen = observed.count(total) as f64 / n;
        let bar = if peak > 0.0 {
            (seen / peak * args.width as f64).round() as usize
        } else {
            0
        };
        println!(
            "{:>6} {:>7.2}% {:>7.2}% {}",
            total,
            seen * 100.0,
            p * 100.0,
            "#".repeat(bar)
        );
    }
    println!();
    println!("mean (observed):    {:.3}", observed.mean());
    println!("mean (exact):       {:.3}", exact_mean);
    println!(
        "chi-square:         {:.2} ({} degrees of freedom)",
        chi_square(&observed, &expected),
        expected.len().saturating_sub(1)
    );

    Ok(())
}
