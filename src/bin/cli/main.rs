use anyhow::Context;
use clap::{Parser, Subcommand};

use envseal::{config, fingerprint, generate_key_material, open, seal, PASSPHRASE_ENV};

#[derive(Parser)]
#[command(name = "envseal-cli", about = "Seal and open workspace secrets", version)]
struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Generate fresh key material for initial setup
    Keygen,

    /// Encrypt a value into an envelope string
    Seal {
        /// Value to seal (use "-" or omit to read from stdin)
        value: Option<String>,
    },

    /// Decrypt an envelope string back to its value
    Open {
        /// Envelope to open (use "-" or omit to read from stdin)
        envelope: Option<String>,
    },

    /// Print the one-way fingerprint of a value
    Fingerprint {
        /// Value to fingerprint (use "-" or omit to read from stdin)
        value: Option<String>,
    },
}

/// Resolve an argument that may come from stdin instead.
///
/// Reading from stdin keeps secrets out of shell history and process
/// listings; a trailing newline from the pipe is stripped.
fn resolve_value(value: Option<String>) -> anyhow::Result<String> {
    match value.as_deref() {
        Some("-") | None => {
            let mut buf = String::new();
            std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf)
                .context("failed to read value from stdin")?;
            if buf.ends_with('\n') {
                buf.pop();
                if buf.ends_with('\r') {
                    buf.pop();
                }
            }
            Ok(buf)
        }
        Some(_) => Ok(value.unwrap()),
    }
}

fn emit(format: &OutputFormat, field: &str, output: &str) {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ field: output }));
        }
        OutputFormat::Plain => {
            println!("{}", output);
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Keygen => {
            let material = generate_key_material();
            match cli.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::json!({ "keyMaterial": material }));
                }
                OutputFormat::Plain => {
                    println!("{}", material);
                    eprintln!("Store this key safely and export it as {}.", PASSPHRASE_ENV);
                }
            }
        }
        Command::Seal { value } => {
            let passphrase = config::passphrase_from_env()
                .with_context(|| format!("export {} before sealing values", PASSPHRASE_ENV))?;
            let plaintext = resolve_value(value)?;
            let envelope = seal(&plaintext, passphrase.as_str())?;
            emit(&cli.format, "envelope", &envelope);
        }
        Command::Open { envelope } => {
            let passphrase = config::passphrase_from_env()
                .with_context(|| format!("export {} before opening envelopes", PASSPHRASE_ENV))?;
            let envelope = resolve_value(envelope)?;
            let plaintext = open(&envelope, passphrase.as_str())
                .context("could not decrypt value - check your key")?;
            emit(&cli.format, "value", &plaintext);
        }
        Command::Fingerprint { value } => {
            let value = resolve_value(value)?;
            emit(&cli.format, "fingerprint", &fingerprint(&value));
        }
    }

    Ok(())
}
