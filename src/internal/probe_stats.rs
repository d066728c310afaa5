#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::cast_precision_loss)]

//! Fills a `HashTable` with random keys, records how many slots lookups inspect as the load
//! factor moves through resizes, and plots the results.

use std::error::Error;

use plotters::prelude::*;
use primehash::{HashTable, TableExtensions};
use rand::{Rng, distr::Alphanumeric};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Number of random keys inserted
const NUM_KEYS: usize = 5_000;
/// Keys inserted between two measurements
const SAMPLE_EVERY: usize = 50;
/// Length of each random key
const KEY_LEN: usize = 12;
/// Font used for every chart
const FONT: &str = "sans-serif";

/// Probe statistics taken after a batch of inserts
#[derive(Debug, Clone, Copy)]
struct Sample {
    /// Keys inserted so far
    inserted: usize,
    /// Slot count of the table
    size: usize,
    /// Load factor of the table
    load_factor: f64,
    /// Mean slots inspected when looking up a present key
    avg_hit_probes: f64,
    /// Most slots inspected when looking up a present key
    worst_hit_probes: usize,
    /// Mean slots inspected when looking up an absent key
    avg_miss_probes: f64,
}

/// Generates `count` random alphanumeric keys.
fn random_keys(count: usize) -> Vec<String> {
    let mut rng = rand::rng();
    (0..count)
        .map(|_| (&mut rng).sample_iter(Alphanumeric).take(KEY_LEN).map(char::from).collect())
        .collect()
}

/// Mean of `total` over `n` observations.
fn mean(total: usize, n: usize) -> f64 {
    if n == 0 { 0.0 } else { total as f64 / n as f64 }
}

/// Measures lookups of every key in `present` and `absent`.
fn measure(table: &HashTable, present: &[String], absent: &[String]) -> Sample {
    let hits: Vec<usize> = present.iter().map(|key| table.probe_count(key)).collect();
    let misses: usize = absent.iter().map(|key| table.probe_count(key)).sum();

    Sample {
        inserted: present.len(),
        size: table.size(),
        load_factor: table.load_factor(),
        avg_hit_probes: mean(hits.iter().sum(), hits.len()),
        worst_hit_probes: hits.iter().copied().max().unwrap_or(0),
        avg_miss_probes: mean(misses, absent.len()),
    }
}

/// Plots probe lengths against the number of keys inserted.
fn plot_probes(samples: &[Sample], path: &str) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_x = samples.last().map_or(1, |sample| sample.inserted);
    let max_y = samples.iter().map(|sample| sample.worst_hit_probes as f64).fold(1.0, f64::max) *
        1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption("Probe Length While Filling the Table", (FONT, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0..max_x, 0.0..max_y)?;

    chart
        .configure_mesh()
        .x_desc("Number of Keys Inserted")
        .y_desc("Slots Inspected per Lookup")
        .axis_desc_style((FONT, 16))
        .draw()?;

    let series: [(&str, RGBColor, fn(&Sample) -> f64); 3] = [
        ("Average hit", RGBColor(50, 90, 220), |sample| sample.avg_hit_probes),
        ("Worst hit", RGBColor(220, 50, 50), |sample| sample.worst_hit_probes as f64),
        ("Average miss", RGBColor(50, 180, 50), |sample| sample.avg_miss_probes),
    ];

    for (label, color, metric) in series {
        let style = ShapeStyle::from(&color).stroke_width(2);
        chart
            .draw_series(LineSeries::new(
                samples.iter().map(|sample| (sample.inserted, metric(sample))),
                style,
            ))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Plots the load factor against the number of keys inserted, with the grow threshold.
fn plot_load_factor(
    samples: &[Sample],
    grow_threshold: f64,
    path: &str,
) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_x = samples.last().map_or(1, |sample| sample.inserted);

    let mut chart = ChartBuilder::on(&root)
        .caption("Load Factor Across Resizes", (FONT, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0..max_x, 0.0..1.0)?;

    chart
        .configure_mesh()
        .x_desc("Number of Keys Inserted")
        .y_desc("Load Factor")
        .axis_desc_style((FONT, 16))
        .draw()?;

    let threshold_style = ShapeStyle::from(&BLACK.mix(0.3)).stroke_width(1);
    chart
        .draw_series(LineSeries::new(
            vec![(0, grow_threshold), (max_x, grow_threshold)],
            threshold_style,
        ))?
        .label("Grow threshold")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], threshold_style));

    let line_style = ShapeStyle::from(&RGBColor(50, 90, 220)).stroke_width(2);
    chart
        .draw_series(LineSeries::new(
            samples.iter().map(|sample| (sample.inserted, sample.load_factor)),
            line_style,
        ))?
        .label("Load factor")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let keys = random_keys(NUM_KEYS);
    // '-' is not alphanumeric, so none of these were inserted
    let absent: Vec<String> = (0..SAMPLE_EVERY).map(|i| format!("miss-{i}")).collect();

    let mut table = HashTable::new();
    let mut samples = Vec::with_capacity(NUM_KEYS / SAMPLE_EVERY);

    for (i, key) in keys.iter().enumerate() {
        table.insert(key.as_str(), i.to_string())?;

        let inserted = i + 1;
        if inserted % SAMPLE_EVERY == 0 {
            let sample = measure(&table, keys.get(..inserted).unwrap_or_default(), &absent);
            info!(
                inserted,
                size = sample.size,
                load_factor = sample.load_factor,
                avg_hit_probes = sample.avg_hit_probes,
                "sampled"
            );
            samples.push(sample);
        }
    }

    // Tombstones left by deletes lengthen misses until a rebuild drops them
    let (removed, kept) = keys.split_at(keys.len() / 2);
    for key in removed {
        table.delete(key)?;
    }
    let stale = measure(&table, kept, &absent);
    info!(
        tombstones = table.tombstones(),
        size = stale.size,
        avg_miss_probes = stale.avg_miss_probes,
        "deleted half of the keys"
    );

    table.compact()?;
    let compacted = measure(&table, kept, &absent);
    let missing = kept.iter().filter(|key| !table.contains_key(key)).count();
    info!(
        tombstones = table.tombstones(),
        size = compacted.size,
        avg_miss_probes = compacted.avg_miss_probes,
        missing,
        "compacted"
    );

    let grow_threshold = table.config().grow_threshold() as f64 / 100.0;
    plot_probes(&samples, "probe_length.png")?;
    plot_load_factor(&samples, grow_threshold, "load_factor.png")?;

    info!("Generated plot images: probe_length.png, load_factor.png");
    Ok(())
}
