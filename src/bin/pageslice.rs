//! Dataset builder CLI.
//!
//! Walks a directory of PAGE XML annotation files, segments each page into
//! training slices, and writes the cropped images plus JSONL metadata into a
//! split-per-directory dataset.
//!
//! # Usage
//!
//! ```bash
//! pageslice pages/ --image-dir raw_images --output dataset
//! pageslice pages/ --target-len 120 --seed 7 --max-threads 4
//! ```
//!
//! One malformed annotation file never aborts the run: failures are logged,
//! counted, and the next page is processed.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{info, warn};

use pageslice::dataset::{crop_slice, MetadataWriter, SliceRecord, SplitSampler};
use pageslice::io::load_page;
use pageslice::pipeline::{PageSegmenter, PageSegmenterConfig, StatsManager};
use pageslice::utils::init_tracing;

#[derive(Parser)]
#[command(name = "pageslice")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Build a training dataset from PAGE XML annotated handwriting pages")]
struct Cli {
    /// Directory containing the PAGE XML annotation files
    xml_dir: PathBuf,

    /// Directory containing the page images referenced by the annotations
    #[arg(long, default_value = "raw_images")]
    image_dir: PathBuf,

    /// Output dataset root
    #[arg(long, default_value = "dataset")]
    output: PathBuf,

    /// Target transcription length per slice, in characters
    #[arg(long)]
    target_len: Option<usize>,

    /// Seed for slice-band jitter and split sampling
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Maximum number of worker threads (defaults to the number of cores)
    #[arg(long)]
    max_threads: Option<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = PageSegmenterConfig {
        seed: cli.seed,
        ..Default::default()
    };
    if let Some(target_len) = cli.target_len {
        config.planner.target_len = target_len;
    }
    config.parallel.max_threads = cli.max_threads;
    config.parallel.install_global_thread_pool()?;

    let segmenter = PageSegmenter::new(config)?;
    let writer = MetadataWriter::new(&cli.output)?;
    let mut sampler = SplitSampler::with_default_weights(cli.seed);
    let stats = StatsManager::new();

    let mut annotations: Vec<PathBuf> = std::fs::read_dir(&cli.xml_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension() == Some(OsStr::new("xml")))
        .collect();
    annotations.sort();

    info!(files = annotations.len(), "processing annotation directory");

    for path in &annotations {
        match process_page(path, &cli.image_dir, &segmenter, &mut sampler, &writer) {
            Ok(slice_count) => {
                stats.record_page(slice_count);
                info!(file = %path.display(), slices = slice_count, "processed page");
            }
            Err(err) => {
                stats.record_failure();
                warn!(file = %path.display(), error = %err, "skipping page");
            }
        }
    }

    let totals = stats.get_stats();
    info!(
        pages = totals.pages_processed,
        failed = totals.pages_failed,
        slices = totals.slices_emitted,
        "dataset build complete"
    );

    Ok(())
}

/// Segments one page and writes its slices into the dataset.
///
/// Returns the number of slices written. Any error discards the page as a
/// whole.
fn process_page(
    path: &Path,
    image_dir: &Path,
    segmenter: &PageSegmenter,
    sampler: &mut SplitSampler,
    writer: &MetadataWriter,
) -> pageslice::core::SegResult<usize> {
    let page = load_page(path)?;
    let slices = segmenter.segment(&page)?;

    let image = image::open(image_dir.join(page.image_file()))?.to_rgb8();
    let stem = Path::new(page.image_file())
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or("page");

    for (index, slice) in slices.iter().enumerate() {
        let cropped = crop_slice(&image, slice)?;
        let split = sampler.sample();
        let file_name = format!("{}_{}.jpg", stem, index);

        cropped.save(writer.image_path(split, &file_name))?;
        writer.append(split, &SliceRecord::new(file_name, &slice.ground_truth))?;
    }

    Ok(slices.len())
}
