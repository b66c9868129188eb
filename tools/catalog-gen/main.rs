use clap::Parser;
use otoyai::catalog::{CatalogSnapshot, Endpoint, EndpointCatalog};
use otoyai::schema::infer_schema;
use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::IndexedRandom;
use std::fs;

/// A CLI tool to generate random endpoint catalogs for testing
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the catalog to. A `.bin` extension writes a snapshot.
    #[arg(short, long, default_value = "generated_catalog.json")]
    output: String,

    /// Number of endpoints to generate
    #[arg(short, long, default_value_t = 50)]
    count: usize,
}

const VENDORS: &[&str] = &["fal-ai", "replicate", "stability", "kling", "openai", "elevenlabs"];

const CATEGORIES: &[&str] = &[
    "text-to-image",
    "image-to-image",
    "image-to-video",
    "text-to-video",
    "video-to-video",
    "text-to-speech",
    "speech-to-text",
    "audio-to-audio",
    "lipsync",
    "edit",
    "upscale",
    "llm",
    "vision",
    "training",
];

const MODEL_NAMES: &[&str] = &[
    "Flux", "Kling", "Sora", "Whisper", "Aurora", "Nebula", "Quartz", "Echo", "Prism", "Drift",
];

const EDITIONS: &[&str] = &["Dev", "Pro", "Standard", "o1", "Turbo", "Lite", "Max"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.count == 0 {
        eprintln!("Error: --count must be at least 1");
        std::process::exit(1);
    }

    println!("Generating {} random endpoints...", cli.count);
    let endpoints: Vec<Endpoint> = (0..cli.count)
        .map(|i| generate_endpoint(&mut rng, i))
        .collect();

    let total_inputs: usize = endpoints.iter().map(|e| infer_schema(e).inputs.len()).sum();
    let catalog = EndpointCatalog::new(endpoints);

    if cli.output.ends_with(".bin") {
        CatalogSnapshot::new("catalog-gen", &catalog).save(&cli.output)?;
    } else {
        fs::write(&cli.output, serde_json::to_string_pretty(&catalog)?)?;
    }

    println!(
        "Successfully saved {} endpoints ({} inferred inputs) to '{}'",
        catalog.len(),
        total_inputs,
        cli.output
    );
    Ok(())
}

fn generate_endpoint(rng: &mut ThreadRng, index: usize) -> Endpoint {
    let vendor = pick(rng, VENDORS);
    let category = pick(rng, CATEGORIES);
    let model = pick(rng, MODEL_NAMES);
    let edition = pick(rng, EDITIONS);
    let version = rng.random_range(1..=3);

    let mut categories = vec![category.to_string()];
    if rng.random_bool(0.3) {
        categories.push(pick(rng, CATEGORIES).to_string());
    }

    Endpoint {
        id: format!("{}/{}-{}/{}", vendor, model.to_lowercase(), index, edition.to_lowercase()),
        title: format!("{} {}.{} {}", model, version, rng.random_range(0..10), edition),
        vendor: vendor.to_string(),
        category: categories,
        description: format!("Generated {} endpoint", category),
    }
}

fn pick<'a>(rng: &mut ThreadRng, options: &[&'a str]) -> &'a str {
    options.choose(rng).copied().unwrap_or("unknown")
}
