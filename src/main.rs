use anyhow::Context;
use reliefcarve::{init_logging, run_job, CarveConfig, BUILD_DATE, VERSION};
use std::path::PathBuf;
use tracing::info;

const USAGE: &str = concat!(
    "Usage: reliefcarve <job.toml|job.json>\n",
    "       reliefcarve --write-default <job.toml|job.json>"
);

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.as_slice() {
        [flag] if flag == "--version" || flag == "-V" => {
            println!("reliefcarve {} (built {})", VERSION, BUILD_DATE);
            Ok(())
        }
        [flag] if flag == "--help" || flag == "-h" => {
            println!("{}", USAGE);
            Ok(())
        }
        [flag, path] if flag == "--write-default" => {
            let path = PathBuf::from(path);
            CarveConfig::new()
                .save_to_file(&path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote default job to {}", path.display());
            Ok(())
        }
        [path] => {
            init_logging()?;
            let path = PathBuf::from(path);
            info!("ReliefCarve {} loading job {}", VERSION, path.display());
            let config = CarveConfig::load_from_file(&path)
                .with_context(|| format!("Failed to load job {}", path.display()))?;
            run_job(&config)?;
            Ok(())
        }
        _ => anyhow::bail!("{}", USAGE),
    }
}
