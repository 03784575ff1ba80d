//! Example: load a survey and print its geometry and headers
//!
//! Run with: cargo run --example load_survey -- path/to/survey.sgy [--normalize]

use anyhow::Context;
use seisvol::{extract_slice, get_headers, load, volume, volume_range_info, LineType};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .context("usage: load_survey <survey.sgy|survey.npy> [--normalize]")?;
    let normalize = args.any(|a| a == "--normalize");

    let cube = load(&path, normalize).with_context(|| format!("loading {}", path))?;
    println!("Volume: {}", volume::summary(&cube));

    let info = volume_range_info(&cube);
    println!("  xline range:  {:?}", info.xline_range);
    println!("  inline range: {:?}", info.inline_range);
    println!("  depth range:  {:?}", info.depth_sample_range);

    let middle = info.inline_range.last / 2;
    let section = extract_slice(&cube, LineType::Inline, middle)?;
    println!("  inline {} section: {:?} (depth x xline)", middle, section.dim());

    let headers = get_headers(&path, 0)?;
    match headers.headers() {
        Some(bundle) => {
            println!("\nTextual header:");
            for card in bundle.textual_header.as_bytes().chunks(80).take(5) {
                println!("  {}", String::from_utf8_lossy(card).trim_end());
            }
            println!("Binary header: {}", serde_json::to_string(&bundle.binary_header)?);
        }
        None => println!("\n{}", headers.message()),
    }

    Ok(())
}
