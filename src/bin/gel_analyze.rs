use gel_analyzer::config::{load_config, RuntimeConfig};
use gel_analyzer::image::io::write_json_file;
use gel_analyzer::{
    AnalysisReport, AnalysisSession, AnalyzerParams, ComparisonResult, IntensityGrid, LaneParams,
};
use std::env;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(|| {
        let program = env::args().next().unwrap_or_else(|| "gel_analyze".into());
        format!("usage: {program} <config.json>")
    })?;
    let config = load_config(config_path.as_ref())?;

    let grid = IntensityGrid::from_path(&config.input_path).map_err(|e| e.to_string())?;
    let params = AnalyzerParams {
        lane: LaneParams {
            num_lanes: config.num_lanes,
            ..Default::default()
        },
        ..Default::default()
    };
    let session = AnalysisSession::analyze(grid, &params);

    let comparison = match config.compare_lanes {
        Some((lane1, lane2)) => {
            Some(compare(&config, &session, lane1, lane2).map_err(|e| e.to_string())?)
        }
        None => None,
    };

    print_text_summary(&session, comparison.as_ref());

    let report = AnalysisReport::from_session(&session, config.ladder_lane, comparison);
    if let Some(path) = &config.output.json_out {
        write_json_file(path, &report)?;
        println!("JSON report written to {}", path.display());
    }

    Ok(())
}

fn compare(
    config: &RuntimeConfig,
    session: &AnalysisSession,
    lane1: u32,
    lane2: u32,
) -> Result<ComparisonResult, gel_analyzer::AnalysisError> {
    session.compare(lane1, lane2, config.tolerance_pixels)
}

fn print_text_summary(session: &AnalysisSession, comparison: Option<&ComparisonResult>) {
    println!("Analysis summary");
    println!("  lanes: {}", session.lanes().len());
    println!("  bands: {}", session.total_bands());
    for (lane_id, bands) in session.bands_by_lane() {
        println!("    lane {lane_id}: {} bands", bands.len());
    }
    if let Some(cmp) = comparison {
        println!(
            "  lanes {} vs {}: {:.2}% similar ({} matched, {} / {} unique)",
            cmp.lane1_id,
            cmp.lane2_id,
            cmp.similarity_score,
            cmp.matched_bands,
            cmp.unique_lane1.len(),
            cmp.unique_lane2.len()
        );
    }
}
