//! Live capture demo: prints smoothed spectrum bars for a few seconds.
//!
//! Run with `RUST_LOG=debug cargo run --example live`.

use std::time::{Duration, Instant};

use spectrum_analyzer::{AnalyzerConfig, SpectrumProcessor};

fn main() {
    env_logger::init();

    let mut processor = SpectrumProcessor::new(AnalyzerConfig::default());
    let device = match processor.start() {
        Ok(name) => name,
        Err(e) => {
            eprintln!("failed to start capture: {e}");
            return;
        }
    };
    println!("capturing from: {device}");

    let started = Instant::now();
    while started.elapsed() < Duration::from_secs(5) {
        let frame = processor.snapshot();
        if frame.num_bins() > 0 {
            let line: String = frame
                .log_scale_bins()
                .iter()
                .map(|&bin| bar_glyph(frame.mean[bin]))
                .collect();
            println!("{line}");
        }
        std::thread::sleep(Duration::from_millis(100));
    }

    processor.stop();
}

fn bar_glyph(point: u16) -> char {
    // Display points run 0..=240 (quarter-dB steps over a 60 dB range)
    const GLYPHS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
    let idx = (usize::from(point) * (GLYPHS.len() - 1)) / 240;
    GLYPHS[idx.min(GLYPHS.len() - 1)]
}
