use std::path::PathBuf;

use anyhow::{Context, bail};
use letter_recognizer_rs::letter_pipeline::{LetterNormalizer, NormalizationConfig, load_canvas, pack, save_preview};
use letter_recognizer_rs::logger;

use tracing::{error, info};

const USAGE: &str = "usage: letter-prep <drawing.png> [tensor.bin] [preview.png]";

fn main() -> anyhow::Result<()> {
    logger::init();

    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let Some(input) = args.next() else {
        bail!(USAGE);
    };
    let tensor_path = args.next();
    let preview_path = args.next();

    info!("Starting letter-prep...");

    let config = NormalizationConfig::builder().build();
    let normalizer = LetterNormalizer::new(config)?;
    info!(
        "Normalizer initialized: target {}x{}, padding {:.2}, blur radius {}",
        normalizer.config().target_size,
        normalizer.config().target_size,
        normalizer.config().padding_ratio,
        normalizer.config().blur_radius
    );

    let canvas = load_canvas(&input).with_context(|| format!("loading {}", input.display()))?;

    let (prepared, mut timings) = match normalizer.prepare_with_timings(&canvas) {
        Ok(output) => output,
        Err(e) => {
            error!("Normalization failed: {}", e);
            return Err(e.into());
        }
    };
    let tensor = timings.record("pack_tensor", || Ok(pack(&prepared)))?;
    info!("Normalized {} into {} values", input.display(), tensor.len());
    println!("{timings}");

    if let Some(path) = tensor_path {
        let mut file = std::fs::File::create(&path)
            .with_context(|| format!("creating {}", path.display()))?;
        tensor.write_to(&mut file)?;
        info!("Tensor written to {}", path.display());
    }

    if let Some(path) = preview_path {
        save_preview(&prepared, &path)?;
        info!("Preview written to {}", path.display());
    }

    Ok(())
}
