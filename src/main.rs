use anyhow::Result;
use logpane::cli;

fn main() -> Result<()> {
    // Parse arguments before the logger exists so usage errors stay clean
    let options = cli::process_cli();

    let result = cli::run(options);
    if let Err(ref e) = result {
        eprintln!("logpane: error: {e:#}");
    }
    result
}
