use clap::Parser;
use tracing_subscriber::EnvFilter;

use firewatch_core::{
    CellCoord, HandoffSlot, IgnitionField, ScenarioConfig, Session, VillageStatus, WindVector,
};

/// Wildfire-spread prediction demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "firewatch-demo")]
#[command(about = "District wildfire-spread prediction demo", long_about = None)]
struct Args {
    /// Cells per side of the lattice
    #[arg(long, default_value_t = 10)]
    grid_size: usize,

    /// Session seed (grid and spread variance derive from it)
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Ignition origin row (defaults to the scenario's default origin)
    #[arg(long)]
    origin_row: Option<usize>,

    /// Ignition origin column
    #[arg(long)]
    origin_col: Option<usize>,

    /// Wind bearing in degrees (0 = north, 90 = east)
    #[arg(long, default_value_t = 45.0)]
    wind_degrees: f32,

    /// Wind speed in km/h
    #[arg(short, long, default_value_t = 18.0)]
    wind_speed: f32,

    /// Simulation horizon in hours
    #[arg(long, default_value_t = 6.0)]
    horizon: f32,

    /// Scrubber step in hours
    #[arg(long, default_value_t = 1.0)]
    step: f32,

    /// Raw origin-handoff JSON payload to adopt before scrubbing,
    /// e.g. '{"startCell":{"row":3,"col":7}}'
    #[arg(long)]
    handoff: Option<String>,

    /// Print the static risk map before scrubbing
    #[arg(long)]
    risk_map: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(error) = run(Args::parse()) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = ScenarioConfig {
        grid_size: args.grid_size,
        ..ScenarioConfig::chamoli()
    };
    let region = config.name.clone();
    let mut session = Session::new(config, args.seed)?;

    println!("=== Firewatch Spread Prediction Demo ===\n");
    println!(
        "Region: {} ({}x{} cells, {} km/cell), seed {}",
        region,
        args.grid_size,
        args.grid_size,
        session.grid().cell_size_km(),
        args.seed
    );

    session.set_wind(WindVector::new(args.wind_degrees, args.wind_speed))?;
    println!(
        "Wind: {:.0} km/h toward {:.0} deg",
        session.wind().speed_kmh,
        session.wind().direction_degrees
    );

    if let Some(payload) = &args.handoff {
        let mut slot = HandoffSlot::default();
        slot.post(payload.clone());
        let adopted = session.adopt_handoff(&mut slot)?;
        println!("Adopted handoff origin: ({}, {})", adopted.row, adopted.col);
    } else if let (Some(row), Some(col)) = (args.origin_row, args.origin_col) {
        session.set_origin(CellCoord::new(row, col))?;
    }
    println!(
        "Origin: ({}, {})\n",
        session.origin().row,
        session.origin().col
    );

    if args.risk_map {
        print_risk_map(&session);
    }

    // Cooperative scrubber: each step recomputes the field in full for the
    // new horizon.
    let step = args.step.max(0.1);
    let steps = (args.horizon / step).ceil().max(0.0) as usize;
    for i in 0..=steps {
        let hour = (i as f32 * step).min(args.horizon);
        session.set_horizon(hour)?;
        let statuses = session.assess_villages(hour);
        print_frame(&session, hour, &statuses);
        if hour >= args.horizon {
            break;
        }
    }

    println!("=== Scrub Complete ===");
    let stats = session.burn_stats(args.horizon);
    println!(
        "Cells burning: {} | Burned area: {:.1} km2 | Burn rate: {:.1} cells/h",
        stats.active_cells, stats.burned_area_km2, stats.burn_rate_per_hour
    );
    Ok(())
}

fn print_risk_map(session: &Session) {
    println!("Static risk map (H = high, M = moderate, L = low):");
    let grid = session.grid();
    for row in 0..grid.size() {
        let mut line = String::with_capacity(grid.size() * 2);
        for col in 0..grid.size() {
            let badge = grid
                .cell(CellCoord::new(row, col))
                .map_or('?', |cell| match cell.risk_bucket().label() {
                    "HIGH" => 'H',
                    "MODERATE" => 'M',
                    _ => 'L',
                });
            line.push(badge);
            line.push(' ');
        }
        println!("  {line}");
    }
    println!();
}

/// Glyph for a cell, bucketed by ignition hour like the map shading.
fn glyph(field: &IgnitionField, coord: CellCoord) -> char {
    match field.get(coord) {
        None => '.',
        Some(record) => {
            if record.ignition_hour == 0.0 {
                '@'
            } else if record.ignition_hour <= 1.0 {
                '#'
            } else if record.ignition_hour <= 2.0 {
                'X'
            } else if record.ignition_hour <= 3.0 {
                'x'
            } else if record.ignition_hour <= 4.0 {
                '+'
            } else {
                ':'
            }
        }
    }
}

fn print_frame(session: &Session, hour: f32, statuses: &[VillageStatus]) {
    let grid = session.grid();
    let field = session.field();
    let stats = session.burn_stats(hour);

    println!(
        "t = {hour:.1} h | burning {} | area {:.1} km2 | containment {:.0}%",
        stats.active_cells, stats.burned_area_km2, stats.containment_pct
    );
    for row in 0..grid.size() {
        let mut line = String::with_capacity(grid.size() * 2);
        for col in 0..grid.size() {
            line.push(glyph(field, CellCoord::new(row, col)));
            line.push(' ');
        }
        println!("  {line}");
    }

    println!("  Villages:");
    for status in statuses {
        println!(
            "    {:<12} pop {:>5} | {:6.1} km | ETA {:>5.1} h | {:<8} | {}",
            status.name,
            status.population,
            status.distance_km,
            status.eta_hours,
            status.alert_level.label(),
            status.status.label()
        );
    }
    println!();
}
