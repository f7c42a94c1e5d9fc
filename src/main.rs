use std::{io, process};

use env_logger::Env;
use vkinfo::VulkanDriver;

fn run() -> anyhow::Result<()> {
    let mut driver = VulkanDriver::load()?;
    let mut out = io::stdout().lock();
    let mut diagnostics = io::stderr().lock();
    vkinfo::report(&mut driver, &mut out, &mut diagnostics)?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    if let Err(err) = run() {
        eprintln!("{err}");
        process::exit(1);
    }
}
