use cc_ingest::catalog::transform;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::time::{Duration, Instant};

const ITERATIONS: usize = 5;

fn count_xml_events(xml: &str) -> usize {
    let mut reader = Reader::from_str(xml);
    let mut count = 0;
    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(_) => count += 1,
            Err(e) => panic!("XML error at position {}: {:?}", reader.error_position(), e),
        }
    }
    count
}

/// Returns (avg, min) in seconds.
fn stats(durations: &[Duration]) -> (f64, f64) {
    let secs = durations.iter().map(Duration::as_secs_f64);
    let avg = secs.clone().sum::<f64>() / durations.len() as f64;
    let min = secs.fold(f64::INFINITY, f64::min);
    (avg, min)
}

fn main() {
    let path = std::env::args().nth(1).expect("Usage: bench_parser <catalog.xml>");
    let xml = std::fs::read_to_string(&path).expect("Failed to read catalog file");

    let _ = count_xml_events(&xml);
    let mut baseline = Vec::with_capacity(ITERATIONS);
    for i in 0..ITERATIONS {
        let start = Instant::now();
        let events = count_xml_events(&xml);
        let elapsed = start.elapsed();
        baseline.push(elapsed);
        println!("Baseline {}: {:.3}s ({} XML events)", i + 1, elapsed.as_secs_f64(), events);
    }
    let (baseline_avg, baseline_min) = stats(&baseline);
    println!("Baseline avg: {:.3}s, min: {:.3}s\n", baseline_avg, baseline_min);

    let _ = transform(&xml).expect("Catalog transform failed");
    let mut durations = Vec::with_capacity(ITERATIONS);
    for i in 0..ITERATIONS {
        let start = Instant::now();
        let output = transform(&xml).expect("Catalog transform failed");
        let elapsed = start.elapsed();
        durations.push(elapsed);
        println!(
            "Iteration {}: {:.3}s ({} records, {} list items)",
            i + 1,
            elapsed.as_secs_f64(),
            output.records.len(),
            output.element_lists.len(),
        );
    }

    let (avg, min) = stats(&durations);
    println!("\nTransform avg: {:.3}s, min: {:.3}s", avg, min);
    println!("Overhead vs baseline: {:.1}x", avg / baseline_avg);
}
