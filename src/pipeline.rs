//! Fix pair in, motion summary out.

use std::fs;
use std::path::Path;

use anyhow::{Context, bail};
use pathfix_kinematics::{MotionCommand, Odometry, Wheel};
use pathfix_navigation::{GridCell, OccupancyGrid, Planner};
use pathfix_ubx::{ChecksumPolicy, Decoder, GeodeticFix, parse_hex_line};
use tracing::{debug, info, warn};

use crate::settings::Settings;
use crate::mapper::GridMapper;

/// Decodes one input line, falling back to the sentinel fix on failure.
fn decode_line(label: &str, line: &str, checksum_fallback: bool) -> GeodeticFix {
    let bytes = match parse_hex_line(line) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to read {} line: {}", label, e);
            return GeodeticFix::SENTINEL;
        }
    };

    match Decoder::new(ChecksumPolicy::Enforce).decode(&bytes) {
        Ok(fix) => fix,
        Err(e) if checksum_fallback => {
            warn!("Strict decode of {} line failed ({}), retrying without checksum", label, e);
            Decoder::new(ChecksumPolicy::Skip).decode(&bytes).unwrap_or_else(|e| {
                warn!("Failed to decode {} line: {}", label, e);
                GeodeticFix::SENTINEL
            })
        }
        Err(e) => {
            warn!("Failed to decode {} line: {}", label, e);
            GeodeticFix::SENTINEL
        }
    }
}

/// Reads the start and goal fixes from the first two lines of `input`.
pub fn read_fix_pair(input: &Path, checksum_fallback: bool) -> anyhow::Result<(GeodeticFix, GeodeticFix)> {
    let text = fs::read_to_string(input).with_context(|| format!("cannot open file {}", input.display()))?;
    let mut lines = text.lines();
    let (Some(raw_start), Some(raw_goal)) = (lines.next(), lines.next()) else {
        bail!("{} must hold a start line and a goal line", input.display());
    };
    debug!("Raw start line: {}", raw_start);
    debug!("Raw goal line: {}", raw_goal);

    let start = decode_line("start", raw_start, checksum_fallback);
    let goal = decode_line("goal", raw_goal, checksum_fallback);
    Ok((start, goal))
}

/// Fixed four decimals with trailing zeros and a bare dot removed.
pub fn format_elapsed(seconds: f64) -> String {
    let fixed = format!("{seconds:.4}");
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Two output lines: elapsed seconds and the rounded heading change.
pub fn format_command(command: &MotionCommand) -> String {
    format!(
        "{}\n{}\n",
        format_elapsed(command.elapsed_seconds),
        command.heading_change_degrees.round() as i64
    )
}

fn build_grid(settings: &Settings) -> anyhow::Result<OccupancyGrid> {
    let mut grid = OccupancyGrid::new(settings.rows, settings.cols).context("invalid grid dimensions")?;
    for &[row, col] in &settings.obstacles {
        grid.set_blocked(GridCell::new(row, col), true)
            .with_context(|| format!("obstacle ({},{}) is outside the grid", row, col))?;
    }
    Ok(grid)
}

/// Runs the whole pipeline and writes the summary to `output`.
pub fn run(settings: &Settings, input: &Path, output: &Path) -> anyhow::Result<MotionCommand> {
    let (start_fix, goal_fix) = read_fix_pair(input, settings.checksum_fallback)?;
    if start_fix.is_sentinel() || goal_fix.is_sentinel() {
        bail!("invalid GPS coordinates");
    }
    info!("Start fix: {}", start_fix);
    info!("Goal fix: {}", goal_fix);

    let mapper = GridMapper::new(start_fix, settings.cell_size_m, settings.rows, settings.cols)?;
    let start = mapper.to_grid_cell(&start_fix).context("start fix")?;
    let goal = mapper.to_grid_cell(&goal_fix).context("goal fix")?;
    info!("Start cell: {}, goal cell: {}", start, goal);

    let grid = build_grid(settings)?;
    debug!("Occupancy grid:\n{}", grid);

    let result = Planner::new(settings.connectivity).plan_detailed(&grid, start, goal);
    if result.is_success() {
        let cells: Vec<String> = result.path.iter().map(ToString::to_string).collect();
        info!(
            "Planned path ({} cells, {} explored): {}",
            result.path_length(),
            result.nodes_explored,
            cells.join(" ")
        );
    } else {
        warn!("No path from {} to {} ({} cells explored)", start, goal, result.nodes_explored);
    }

    let wheel = Wheel::new(settings.wheel_radius_m, settings.wheel_rpm).context("invalid wheel parameters")?;
    let command = Odometry::new(wheel, settings.heading_policy).summarize(&result.path);
    info!("Motion command: {}", command);

    fs::write(output, format_command(&command))
        .with_context(|| format!("cannot write file {}", output.display()))?;
    info!("Wrote {}", output.display());
    Ok(command)
}
