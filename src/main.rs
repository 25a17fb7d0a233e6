use gel_analyzer::image::ImageU8;
use gel_analyzer::{AnalysisSession, AnalyzerParams, IntensityGrid};

fn main() {
    // Demo stub: creates a blank intensity grid and runs the full pipeline
    let w = 800usize;
    let h = 600usize;
    let gray = vec![128u8; w * h];
    let img = ImageU8 {
        w,
        h,
        stride: w,
        data: &gray,
    };

    let grid = match IntensityGrid::from_gray(img) {
        Ok(grid) => grid,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };
    let session = AnalysisSession::analyze(grid, &AnalyzerParams::default());
    println!(
        "lanes={} bands={}",
        session.lanes().len(),
        session.total_bands()
    );
}
