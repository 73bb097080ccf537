use clap::{Parser, Subcommand, ValueEnum};
use dice_engine::{AdMode, Die, RollResult, Roller, RollerConfig, SessionCode};
use encoding_rs::Encoding;
use std::{
    fs,
    io::{self, BufRead},
    path::{Path, PathBuf},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Copy, Clone, ValueEnum)]
enum Adv {
    Normal,
    Advantage,
    Disadvantage,
}

#[derive(Copy, Clone, ValueEnum)]
enum DieArg {
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
    D100,
}

#[derive(Subcommand)]
enum Cmd {
    /// Roll a dice expression such as 3d6+2 or 1d20-1
    Roll {
        /// Dice expression: [count]d<sides>[+|-modifier]
        expr: String,
        /// Number of times to roll it
        #[arg(long, default_value_t = 1)]
        times: u32,
        /// Note attached to each result
        #[arg(long)]
        note: Option<String>,
    },
    /// Roll a single standard die
    Quick {
        #[arg(value_enum)]
        die: DieArg,
    },
    /// Roll a d20 with optional advantage/disadvantage
    D20 {
        /// Advantage mode
        #[arg(long, value_enum, default_value_t = Adv::Normal)]
        adv: Adv,
    },
    /// Generate a six-character session join code
    SessionCode,
    /// Read one roll per line from stdin and keep a running history.
    ///
    /// Lines may be expressions (2d6+1), die names (d20), `adv`, `dis`,
    /// `history` or `clear`.
    Tray,
}

#[derive(Parser)]
#[command(name = "dice")]
#[command(about = "Dice roller for the tabletop companion")]
struct Cli {
    /// RNG seed for determinism (entropy when omitted)
    #[arg(long, global = true)]
    seed: Option<u64>,
    /// Print results as JSON
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    /// Roller config file (.json, .yaml or .yml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Cmd,
}

fn to_mode(a: Adv) -> AdMode {
    match a {
        Adv::Normal => AdMode::Normal,
        Adv::Advantage => AdMode::Advantage,
        Adv::Disadvantage => AdMode::Disadvantage,
    }
}

fn to_die(d: DieArg) -> Die {
    match d {
        DieArg::D4 => Die::D4,
        DieArg::D6 => Die::D6,
        DieArg::D8 => Die::D8,
        DieArg::D10 => Die::D10,
        DieArg::D12 => Die::D12,
        DieArg::D20 => Die::D20,
        DieArg::D100 => Die::D100,
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn read_text_auto(path: &Path) -> anyhow::Result<String> {
    let bytes = fs::read(path)?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}

fn load_config(path: Option<&Path>, seed: Option<u64>) -> anyhow::Result<RollerConfig> {
    let mut cfg = match path {
        Some(p) => {
            let text = read_text_auto(p)
                .map_err(|e| e.context(format!("failed to read config: {}", p.display())))?;
            let ext = p.extension().and_then(|e| e.to_str());
            RollerConfig::from_text(&text, ext)?
        }
        None => RollerConfig::default(),
    };
    if seed.is_some() {
        cfg.seed = seed;
    }
    Ok(cfg)
}

fn emit(result: &RollResult, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(result)?);
    } else if result.description().is_empty() {
        println!("{}", result);
    } else {
        println!("{}  ({})", result, result.description());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let cfg = load_config(cli.config.as_deref(), cli.seed)?;
    let mut roller = Roller::from_config(&cfg);

    match cli.cmd {
        Cmd::Roll { expr, times, note } => {
            for _ in 0..times {
                let mut res = roller.roll_text(&expr)?;
                if let Some(note) = &note {
                    res = res.with_description(note.clone());
                }
                emit(&res, cli.json)?;
            }
        }
        Cmd::Quick { die } => {
            let res = roller.quick(to_die(die));
            emit(&res, cli.json)?;
        }
        Cmd::D20 { adv } => {
            let res = roller.d20(to_mode(adv));
            emit(&res, cli.json)?;
        }
        Cmd::SessionCode => {
            let code = SessionCode::generate(roller.source_mut());
            if cli.json {
                println!("{}", serde_json::json!({ "code": code }));
            } else {
                println!("{}", code);
            }
        }
        Cmd::Tray => run_tray(&mut roller, cli.json)?,
    }
    Ok(())
}

fn run_tray(roller: &mut Roller, json: bool) -> anyhow::Result<()> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        match input.to_ascii_lowercase().as_str() {
            "adv" => emit(&roller.d20(AdMode::Advantage), json)?,
            "dis" => emit(&roller.d20(AdMode::Disadvantage), json)?,
            "clear" => {
                roller.clear_history();
                println!("history cleared");
            }
            "history" => {
                if json {
                    println!("{}", serde_json::to_string(roller.history())?);
                } else {
                    for (i, r) in roller.history().iter().enumerate() {
                        println!("{:>2}. {}", i + 1, r);
                    }
                }
            }
            other => {
                // only bare names like `d20` are quick rolls; `1d20` is an expression
                let quick = other
                    .strip_prefix('d')
                    .and_then(|_| other.parse::<Die>().ok());
                match quick {
                    Some(die) => emit(&roller.quick(die), json)?,
                    None => match roller.roll_text(input) {
                        Ok(res) => emit(&res, json)?,
                        // keep the tray open; a bad line is not fatal
                        Err(e) => eprintln!("error: {}", e),
                    },
                }
            }
        }
    }
    Ok(())
}
