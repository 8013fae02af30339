use anyhow::Context;
use s3_basic_ops::utils::log_utils::Logger;
use s3_basic_ops::{LabConfig, StorageFacade, demo};

fn main() {
    if let Err(e) = run() {
        eprintln!("Application error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = LabConfig::from_env()?;
    let logger = Logger::new(config.verbosity);

    println!("Starting AWS S3 lab...");
    let facade = StorageFacade::connect(&config.region, logger)
        .context("Could not create the S3 client; configure credentials with `aws configure`")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    demo::run_demo(&facade, &config.work_dir, &mut out)?;
    demo::print_reference_notes(&mut out)?;
    Ok(())
}
