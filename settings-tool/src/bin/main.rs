use std::path::PathBuf;

use clap::{
    Parser,
    Subcommand,
};
use settings_tool::{
    Field,
    SettingsDocument,
};

#[derive(Parser)]
#[command(name = "settings-tool")]
#[command(about = "Crosspoint settings file parser and generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a settings file from a CSV file
    Generate {
        /// Input CSV file path
        input: PathBuf,

        /// Output settings file path
        output: PathBuf,
    },
    /// Parse a settings file to a CSV file
    Parse {
        /// Input settings file path
        input: PathBuf,

        /// Output CSV file path
        output: PathBuf,
    },
}

fn field_names(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|field| field.name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { input, output } => {
            println!("Parsing CSV file: {}", input.display());
            let document = SettingsDocument::from_csv_file(&input)?;

            println!("Generating settings file...");
            let data = document.generate();
            std::fs::write(&output, &data)?;

            println!("Successfully generated settings file: {}", output.display());
            println!("Size: {} bytes", data.len());

            Ok(())
        }
        Commands::Parse { input, output } => {
            println!("Parsing settings file: {}", input.display());
            let document = SettingsDocument::parse_file(&input)?;

            if let Some(diagnostics) = &document.diagnostics {
                println!(
                    "Read {} of {} stored fields",
                    diagnostics.fields_read, diagnostics.stored_field_count
                );
                if !diagnostics.rejected.is_empty() {
                    println!(
                        "Out of range, kept default: {}",
                        field_names(&diagnostics.rejected)
                    );
                }
                if let Some(field) = diagnostics.truncated {
                    println!("File ends inside {}, following fields kept default", field.name());
                }
                println!("Front button mapping: {:?}", diagnostics.mapping);
            }

            println!("Writing CSV file...");
            document.to_csv_file(&output)?;

            println!("Successfully parsed settings file to: {}", output.display());

            Ok(())
        }
    }
}
