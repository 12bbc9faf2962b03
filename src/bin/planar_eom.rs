use std::path::PathBuf;

use clap::Parser;
use planar_eom::prelude::symbolic::{render, MathSyntax};
use planar_eom::prelude::*;

#[derive(Parser)]
#[command(version, propagate_version = true)]
#[command(about = "Derive planar arm equations of motion and emit them as code", long_about = None)]
struct Args {
    /// Arm model file (JSON). Defaults to two links with a grasped mass.
    #[arg(short, long)]
    model: Option<PathBuf>,
    /// Output language.
    #[arg(short, long, value_enum, default_value_t = Target::OCaml)]
    target: Target,
    /// Also emit the velocity and gravity terms.
    #[arg(long)]
    all_terms: bool,
    /// Log the collected equations of motion.
    #[arg(long)]
    show_equations: bool,
    /// Keep unclassified terms aside instead of failing.
    #[arg(long)]
    lenient: bool,
    /// Level of verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut log_config = simplelog::ConfigBuilder::new();
    log_config.set_time_level(log::LevelFilter::Off);
    log_config.set_thread_level(log::LevelFilter::Off);
    log_config.set_target_level(log::LevelFilter::Off);
    log_config.set_location_level(log::LevelFilter::Off);

    let log_level = match args.verbose {
        0 if args.show_equations => log::LevelFilter::Info,
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    // stdout carries the generated code only
    simplelog::TermLogger::init(
        log_level,
        log_config.build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let model = match &args.model {
        Some(path) => {
            log::debug!("Loading model from {}", path.display());
            ArmModel::from_path(path)?
        }
        None => ArmModel::default(),
    };

    let policy = if args.lenient {
        Exhaustiveness::Lenient
    } else {
        Exhaustiveness::Strict
    };
    let derivation = Derivation::run_with(&model, policy)?;

    if args.show_equations {
        for (coordinate, equation) in model
            .coordinates()
            .iter()
            .zip(derivation.collected_equations())
        {
            log::info!("{}: {} = tau", coordinate, render(&equation, &MathSyntax));
        }
    }

    let generator = CodeGenerator::new(&derivation.dynamics, &model, args.target);
    let code = if args.all_terms {
        generator.all_terms()
    } else {
        generator.mass_matrix()
    };
    log::debug!("Emitting {} bindings for {}", code.statements.len(), args.target);

    print!("{}", code);

    Ok(())
}
