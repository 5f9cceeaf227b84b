use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use fp_core::{N_PER_LBF, mps_to_mph};
use fp_sim::{CabControls, Powerplant, PowerplantSnapshot, TrainSnapshot};
use tracing::info;

#[derive(Parser)]
#[command(name = "fp-cli")]
#[command(about = "Footplate CLI - steam locomotive powerplant simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a locomotive definition and report normalization warnings
    Validate {
        /// Path to the locomotive YAML file
        config_path: PathBuf,
    },
    /// Run a scripted driving scenario
    Run {
        /// Path to the locomotive YAML file
        config_path: PathBuf,
        /// Simulated duration in seconds
        #[arg(long, default_value_t = 600.0)]
        duration: f64,
        /// Time step in seconds
        #[arg(long, default_value_t = 0.25)]
        dt: f64,
        /// Write per-tick telemetry to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Scripted scenario to drive
        #[arg(long, value_enum, default_value_t = Scenario::Acceleration)]
        scenario: Scenario,
        /// Resume from a snapshot file instead of a cold start
        #[arg(long)]
        resume: Option<PathBuf>,
        /// Save the final state as a snapshot file
        #[arg(long)]
        snapshot_out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Scenario {
    /// Full-regulator start from rest with a heavy train
    Acceleration,
    /// Alternating flat-out and drifting to work the automatic fireman
    FiremanStress,
}

type CliResult<T> = Result<T, CliError>;

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] fp_config::ConfigError),

    #[error(transparent)]
    Sim(#[from] fp_sim::SimError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Run {
            config_path,
            duration,
            dt,
            csv,
            scenario,
            resume,
            snapshot_out,
        } => cmd_run(
            &config_path,
            duration,
            dt,
            csv.as_deref(),
            scenario,
            resume.as_deref(),
            snapshot_out.as_deref(),
        ),
    }
}

fn cmd_validate(config_path: &Path) -> CliResult<()> {
    println!("Validating locomotive: {}", config_path.display());
    let (config, warnings) = fp_config::load_and_normalize(config_path)?;

    for warning in &warnings {
        println!("  warning: {warning}");
    }
    println!("✓ {} is valid ({} warnings)", config.name, warnings.len());
    println!("  Engine:          {:?}, {} cylinders", config.engine_kind, config.cylinder_count);
    println!("  Boiler:          {:?}, {:.0} psi", config.boiler_kind, config.max_pressure_psi);
    println!("  Max evaporation: {:.0} lb/h", config.max_evaporation_lb_per_h);
    println!("  Grate area:      {:.1} m²", config.grate_area_m2);
    println!("  Drivers:         {:.3} m", config.drive_wheel_diameter_m);
    Ok(())
}

fn cmd_run(
    config_path: &Path,
    duration: f64,
    dt: f64,
    csv: Option<&Path>,
    scenario: Scenario,
    resume: Option<&Path>,
    snapshot_out: Option<&Path>,
) -> CliResult<()> {
    let (config, warnings) = fp_config::load_and_normalize(config_path)?;
    if !warnings.is_empty() {
        info!(count = warnings.len(), "configuration normalized with warnings");
    }
    println!("Running {:?} for {}", scenario, config.name);
    println!("  duration = {:.0} s, dt = {:.3} s", duration, dt);

    let mut plant = Powerplant::new(config, true)?;
    if let Some(path) = resume {
        let snap = PowerplantSnapshot::from_json(&fs::read_to_string(path)?)?;
        plant.restore(&snap);
        println!("✓ Resumed from {} (t = {:.0} s)", path.display(), snap.elapsed_s);
    }

    let mut csv_writer = match csv {
        Some(path) => {
            let mut w = BufWriter::new(fs::File::create(path)?);
            writeln!(
                w,
                "time_s,speed_mph,pressure_psi,water_gauge,tractive_effort_lbf,\
                 indicated_hp,drawbar_pull_lbf,fire_mass_kg,burn_rate_kg_per_s,\
                 total_steam_lb_per_s,mep_psi,superheat_k,wheel_slip_mps"
            )?;
            Some(w)
        }
        None => None,
    };

    println!(
        "{:>7} {:>6} {:>6} {:>6} {:>8} {:>6} {:>7} {:>6}",
        "t [s]", "mph", "psi", "gauge", "TE lbf", "IHP", "fire kg", "stm/s"
    );

    let script = Script::new(scenario);
    let mut speed_m_per_s: f64 = 0.0;
    let mut water_gauge: f64 = 0.5;
    let mut next_row = 0.0;
    let mut t = 0.0;

    while t < duration {
        let controls = script.controls(t, mps_to_mph(speed_m_per_s), water_gauge);
        let train = TrainSnapshot {
            speed_m_per_s,
            train_resistance_lbf: script.resistance_lbf(speed_m_per_s),
            ..TrainSnapshot::default()
        };
        let out = plant.update(dt, &controls, &train)?;
        t += dt;
        water_gauge = out.water_gauge;

        // Crude longitudinal dynamics, enough to drive the scenario.
        let accel = out.drawbar_pull_lbf * N_PER_LBF / script.train_mass_kg();
        speed_m_per_s = (speed_m_per_s + accel * dt).max(0.0);

        for event in &out.events {
            println!("  [{t:7.1}] {event:?}");
        }

        if t >= next_row {
            println!(
                "{:>7.1} {:>6.1} {:>6.1} {:>6.2} {:>8.0} {:>6.0} {:>7.1} {:>6.2}",
                t,
                mps_to_mph(speed_m_per_s),
                out.pressure_psi,
                out.water_gauge,
                out.tractive_effort_lbf,
                out.indicated_hp,
                out.fire_mass_kg,
                out.total_steam_lb_per_s,
            );
            next_row += 30.0;
        }

        if let Some(w) = csv_writer.as_mut() {
            writeln!(
                w,
                "{:.2},{:.3},{:.3},{:.4},{:.1},{:.1},{:.1},{:.2},{:.4},{:.4},{:.2},{:.2},{:.3}",
                t,
                mps_to_mph(speed_m_per_s),
                out.pressure_psi,
                out.water_gauge,
                out.tractive_effort_lbf,
                out.indicated_hp,
                out.drawbar_pull_lbf,
                out.fire_mass_kg,
                out.burn_rate_kg_per_s,
                out.total_steam_lb_per_s,
                out.mep_psi,
                out.superheat_k,
                out.wheel_slip_mps,
            )?;
        }
    }

    if let Some(w) = csv_writer.as_mut() {
        w.flush()?;
    }

    let st = plant.state();
    println!("✓ Scenario complete at t = {:.0} s", st.elapsed_s);
    println!("  Final speed:    {:.1} mph", mps_to_mph(speed_m_per_s));
    println!("  Boiler:         {:.1} psi, gauge {:.2}", st.boiler.pressure_psi, water_gauge);
    println!("  Tender:         {:.0} kg coal, {:.0} lb water", st.tender.coal_kg, st.tender.water_lb);

    if let Some(path) = snapshot_out {
        fs::write(path, plant.snapshot().to_json()?)?;
        println!("✓ Snapshot written to {}", path.display());
    }
    Ok(())
}

/// The scripted driver and the train behind the drawbar.
struct Script {
    scenario: Scenario,
}

impl Script {
    fn new(scenario: Scenario) -> Self {
        Self { scenario }
    }

    fn train_mass_kg(&self) -> f64 {
        match self.scenario {
            Scenario::Acceleration => 420_000.0,
            Scenario::FiremanStress => 180_000.0,
        }
    }

    /// Rolling plus flange resistance for the whole train, lbf.
    fn resistance_lbf(&self, speed_m_per_s: f64) -> f64 {
        let mph = mps_to_mph(speed_m_per_s);
        let tons = self.train_mass_kg() / 1_000.0;
        2.5 * tons + 12.0 * mph + 0.9 * mph * mph
    }

    fn controls(&self, t: f64, mph: f64, water_gauge: f64) -> CabControls {
        let mut c = match self.scenario {
            Scenario::Acceleration => CabControls {
                // Regulator opened over ten seconds, cutoff wound back as
                // the engine gets away, cocks open until clear of the yard.
                throttle: (t / 10.0).min(1.0),
                cutoff: (0.75 - 0.008 * mph).max(0.25),
                cylinder_cocks_open: t < 20.0,
                compressor_on: true,
                ..CabControls::default()
            },
            Scenario::FiremanStress => {
                let flat_out = (t / 180.0) as u64 % 2 == 0;
                CabControls {
                    throttle: if flat_out { 1.0 } else { 0.05 },
                    cutoff: if flat_out { 0.65 } else { 0.15 },
                    large_ejector_on: flat_out,
                    steam_heat_on: true,
                    ..CabControls::default()
                }
            }
        };
        // Single injector held on below half a glass.
        if water_gauge < 0.5 {
            c.injector_on[0] = true;
            c.injector_fraction[0] = 1.0;
        }
        c.blower = if mph < 5.0 { 0.5 } else { 0.1 };
        c
    }
}
