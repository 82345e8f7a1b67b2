//! Tool to analyze a saved Gaia TAP sample
//!
//! Reads a TAP JSON response (or a plain JSON array of sources) and prints
//! magnitude, declination and distance statistics about it.

use std::path::PathBuf;

use clap::Parser;
use log::info;

use starcat::{SourceCatalog, StarCatalog};

/// Distance beyond which the scene pipeline clamps sources (pc)
const SCENE_DISTANCE_CAP_PC: f64 = 10_000.0;

#[derive(Parser, Debug)]
#[command(author, version, about = "Print statistics about a star catalog sample")]
struct Args {
    /// Catalog file to read
    catalog: PathBuf,

    /// Treat the file as a JSON array of sources instead of a TAP response
    #[arg(long, default_value_t = false)]
    plain: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let catalog = if args.plain {
        SourceCatalog::from_json_file(&args.catalog)?
    } else {
        SourceCatalog::from_tap_file(&args.catalog)?
    };
    info!("Loaded {} sources from {}", catalog.len(), args.catalog.display());

    println!("Star Catalog Statistics");
    println!("=======================");
    println!("Total sources: {}", catalog.len());

    if catalog.is_empty() {
        return Ok(());
    }

    let total = catalog.len() as f64;

    let mag_ranges = [
        (f64::NEG_INFINITY, 6.0, "Naked eye (G < 6)"),
        (6.0, 12.0, "Bright (6 <= G < 12)"),
        (12.0, 17.0, "Intermediate (12 <= G < 17)"),
        (17.0, 19.0, "Faint (17 <= G < 19)"),
        (19.0, 20.7, "Very faint (19 <= G < 20.7)"),
        (20.7, f64::INFINITY, "Beyond survey limit (G >= 20.7)"),
    ];

    println!("\nMagnitude Distribution:");
    for (min, max, desc) in mag_ranges {
        let count = catalog
            .filter(|s| s.phot_g_mean_mag >= min && s.phot_g_mean_mag < max)
            .len();
        println!(
            "  {}: {} sources ({:.1}%)",
            desc,
            count,
            count as f64 / total * 100.0
        );
    }

    let dec_bands = [
        (-90.0, -30.0, "South (dec -90° to -30°)"),
        (-30.0, 30.0, "Equatorial (dec -30° to 30°)"),
        (30.0, 90.1, "North (dec 30° to 90°)"),
    ];

    println!("\nSpatial Distribution (by declination):");
    for (min, max, desc) in dec_bands {
        let count = catalog.filter(|s| s.dec >= min && s.dec < max).len();
        println!(
            "  {}: {} sources ({:.1}%)",
            desc,
            count,
            count as f64 / total * 100.0
        );
    }

    let distances: Vec<f64> = catalog.stars().filter_map(|s| s.distance_pc()).collect();
    let invalid = catalog.len() - distances.len();
    let beyond_cap = distances
        .iter()
        .filter(|d| **d > SCENE_DISTANCE_CAP_PC)
        .count();

    println!("\nParallax:");
    println!(
        "  Usable parallax: {} ({:.1}%)",
        distances.len(),
        distances.len() as f64 / total * 100.0
    );
    println!("  Missing or non-positive: {}", invalid);
    println!(
        "  Beyond {:.0} pc (rendered at the cap): {}",
        SCENE_DISTANCE_CAP_PC, beyond_cap
    );

    if !distances.is_empty() {
        let nearest = distances.iter().copied().fold(f64::INFINITY, f64::min);
        let farthest = distances.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = distances.iter().sum::<f64>() / distances.len() as f64;
        println!(
            "  Distance range: {:.2} pc to {:.2} pc (mean {:.2} pc)",
            nearest, farthest, mean
        );
    }

    let with_color = catalog.filter(|s| s.bp_rp.is_some()).len();
    let with_pm = catalog
        .filter(|s| s.pmra.is_some() && s.pmdec.is_some())
        .len();
    println!("\nCompleteness:");
    println!("  BP-RP color: {} sources", with_color);
    println!("  Proper motion: {} sources", with_pm);

    Ok(())
}
