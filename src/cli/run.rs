use std::{path::Path, process};

use clap::Parser;
use folio::{Config, Report, Scenario};
use tracing::{info, instrument};

use super::terminal::Colorize;

#[derive(Debug, Parser, Default)]
#[command(about = "Create, comment on and clone a document, then verify the result")]
pub struct Run {
    /// Number of clones to make (overrides the configuration)
    #[arg(long, value_name = "N")]
    clones: Option<usize>,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "pretty")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl Run {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, path: &Path) -> anyhow::Result<()> {
        let config = load_or_default(path)?;

        let mut scenario = Scenario::new(config);
        if let Some(clones) = self.clones {
            scenario = scenario.with_clones(clones);
        }

        let report = scenario.run()?;
        let verification = report.verify();

        match self.output {
            OutputFormat::Pretty => Self::output_pretty(&report),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        }

        if let Err(e) = verification {
            eprintln!("{} {e}", "Verification failed:".warning());
            process::exit(1);
        }

        if matches!(self.output, OutputFormat::Pretty) {
            println!("{}", "All clone properties hold".success());
        }

        Ok(())
    }

    fn output_pretty(report: &Report) {
        println!("{} {}", "Original ->".info(), report.original);
        for clone in &report.clones {
            println!("{} {}", "Copy ->".info(), clone);
        }
        println!(
            "{} {}",
            "Author documents count:".info(),
            report.author.documents
        );
        println!("{}", report.author.to_string().dim());
    }
}

/// Loads the configuration at `path`, or the built-in defaults if there is no
/// file there.
fn load_or_default(path: &Path) -> anyhow::Result<Config> {
    if path.exists() {
        Config::load(path).map_err(|e| anyhow::anyhow!(e))
    } else {
        info!(path = %path.display(), "no configuration found, using defaults");
        Ok(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn missing_file_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("folio.toml");

        let config = load_or_default(&missing).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn existing_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nclones = 5\n").unwrap();

        let config = load_or_default(file.path()).unwrap();

        assert_eq!(config.clones, 5);
        assert_eq!(config.title, Config::default().title);
    }

    #[test]
    fn invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nclones = \"many\"\n")
            .unwrap();

        let error = load_or_default(file.path()).unwrap_err();

        assert!(error.to_string().starts_with("Failed to parse config file:"));
    }
}
