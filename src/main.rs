use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use huruf::{BuiltinModel, Classifier, ModelAssets, UNRECOGNIZED_LABEL};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Image files to classify
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// Directory holding the model assets (defaults to the installed bundle)
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Report "Unrecognized" when the top class scores below this floor
    #[arg(long)]
    min_confidence: Option<f32>,
}

fn build_classifier(args: &Args) -> Result<Classifier> {
    let mut builder = Classifier::builder();

    if let Some(threshold) = args.min_confidence {
        builder = builder.with_min_confidence(threshold)?;
    }

    let builder = match &args.assets {
        Some(dir) => {
            let assets = ModelAssets::new(dir)
                .with_context(|| format!("opening assets directory {}", dir.display()))?;
            let model = BuiltinModel::JawiLetterNet;
            builder.with_model_files(assets.model_path(model), assets.labels_path(model))?
        }
        None => builder.with_model(BuiltinModel::JawiLetterNet)?,
    };

    Ok(builder.build()?)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    info!("=== Jawi Letterform Classifier ===");
    let start_time = std::time::Instant::now();
    let classifier = build_classifier(&args)?;
    info!("Classifier ready (took {:.2?})", start_time.elapsed());

    let info = classifier.info()?;
    info!(
        "Model: {} ({} classes, {}x{} input)",
        info.model_path, info.num_classes, info.input_shape.0, info.input_shape.1
    );

    for path in &args.images {
        let bytes = std::fs::read(path)
            .with_context(|| format!("reading image {}", path.display()))?;
        match classifier.classify(&bytes) {
            Ok(result) => match result.confidence {
                Some(confidence) => println!(
                    "{}: {} ({:.1}%)",
                    path.display(),
                    result.label,
                    confidence * 100.0
                ),
                None => println!("{}: {}", path.display(), UNRECOGNIZED_LABEL),
            },
            Err(e) => {
                eprintln!("{}: error: {}", path.display(), e);
                eprintln!("Consider:");
                eprintln!("  - Checking that the file is a valid JPEG or PNG image");
                eprintln!("  - Re-capturing or re-selecting the image");
            }
        }
    }

    Ok(())
}
