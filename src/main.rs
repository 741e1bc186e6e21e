use std::path::PathBuf;

use anyhow::Result;
use clap::{App, Arg};
use tracing_subscriber::EnvFilter;

use folio::build::build_site;
use folio::config::Config;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let matches = App::new("folio")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Builds a portfolio site from a content directory")
        .arg(
            Arg::with_name("source")
                .help("The project directory (searched upward for `folio.yaml`)")
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .help("The output directory for the generated site")
                .takes_value(true)
                .required(true),
        )
        .get_matches();

    let source = PathBuf::from(matches.value_of("source").unwrap_or("."));
    let output = PathBuf::from(matches.value_of("output").unwrap());

    let config = Config::from_directory(&source, &output)?;
    build_site(config)?;
    Ok(())
}
