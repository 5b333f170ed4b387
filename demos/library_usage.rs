//! Example: Analyze frame lists using framegap as a library
//! Run with: cargo run --example library_usage

use framegap::{FrameDetective, Panel, ResultView};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let detective = FrameDetective::new();

    // Example 1: One-off analysis without panel state
    let result = detective.analyze(Panel::Advanced, "1,2,5,8,9,15")?;
    println!("{}", ResultView::new(&result, detective.grid_limit()));

    // Example 2: Panel state keeps the previous result on bad input
    let mut state = detective.panel_state(Panel::Professional);
    println!("\n{}", state.analyze());
    state.set_input("not, a, frame");
    println!("{}", state.analyze());
    if let Some(result) = &state.result {
        println!("Still showing {} missing frames", result.total_missing());
    }

    // Example 3: JSON output
    let json = serde_json::to_string_pretty(&detective.analyze(Panel::Basic, "1,2,3,5,6")?)?;
    println!("\n{}", json);

    Ok(())
}
