use clap::Parser;
use serde_json::json;
use videovec::cli::commands::{Cli, Commands};
use videovec::cli::input::{parse_batch, parse_record};
use videovec::config::AppConfig;
use videovec::domain::ports::vector_store::{SearchFilter, SearchOptions};
use videovec::domain::values::vector_type::VectorType;
use videovec::logger::setup_console_logging;
use videovec::VideoVec;

fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading configuration: {e}");
            std::process::exit(1);
        }
    };
    setup_console_logging(&config.log_level);

    let vv = match VideoVec::new(&config) {
        Ok(vv) => vv,
        Err(e) => {
            eprintln!("Error initializing store: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(vv, cli.command) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_command(vv: VideoVec, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Add { json } => {
            let data: serde_json::Value = serde_json::from_str(&json)?;
            let record = parse_record(&data)?;
            let id = record.metadata.vector_id.clone();
            vv.add(&id, &record.vector, record.metadata)?;
            print_json(&json!({ "id": id }))?;
        }
        Commands::AddBatch { json } => {
            let data: serde_json::Value = serde_json::from_str(&json)?;
            let count = vv.add_batch(parse_batch(&data)?)?;
            print_json(&json!({ "added": count }))?;
        }
        Commands::Get { id } => {
            let record = vv.get(&id)?;
            print_json(&record)?;
        }
        Commands::Delete { id } => {
            vv.delete(&id)?;
            print_json(&json!({ "deleted": id }))?;
        }
        Commands::DeleteSource { source_id } => {
            let count = vv.delete_source(&source_id)?;
            print_json(&json!({ "source_id": source_id, "deleted": count }))?;
        }
        Commands::Search {
            vector,
            top_k,
            threshold,
            source,
            vector_type,
        } => {
            let query: Vec<f32> = serde_json::from_str(&vector)?;
            let vector_type: Option<VectorType> = vector_type
                .map(|t| t.parse())
                .transpose()
                .map_err(|e: String| e)?;
            let options = SearchOptions {
                top_k,
                threshold,
                filter: SearchFilter {
                    source_id: source,
                    vector_type,
                },
            };
            let hits = vv.search(&query, &options)?;
            print_json(&hits)?;
        }
        Commands::Similar { id, top_k, threshold } => {
            let options = SearchOptions {
                top_k,
                threshold,
                ..SearchOptions::default()
            };
            let hits = vv.similar_to(&id, &options)?;
            print_json(&hits)?;
        }
        Commands::Clear => {
            vv.clear()?;
            print_json(&json!({ "cleared": true }))?;
        }
        Commands::Size => {
            print_json(&json!({ "size": vv.size()? }))?;
        }
        Commands::Stats => {
            let stats = vv.stats()?;
            print_json(&stats)?;
        }
        Commands::Export => {
            let snapshot = vv.export()?;
            print_json(&snapshot)?;
        }
        Commands::Import { path } => {
            let count = vv.import_file(std::path::Path::new(&path))?;
            print_json(&json!({ "imported": count, "path": path }))?;
        }
        Commands::Backends => {
            print_json(&vv.backends())?;
        }
    }
    Ok(())
}

fn print_json(value: &impl serde::Serialize) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
