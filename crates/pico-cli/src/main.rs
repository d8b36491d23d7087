use clap::Parser;
use miette::IntoDiagnostic;
use pico_runtime::exec;
use pico_runtime::heap::Heap;
use pico_runtime::value::Value;

/// Decodes a tagged word the way the runtime does after a compiled pico
/// scheme program returns, printing the raw word and its rendering.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Tagged word to decode, in hexadecimal.
    word: String,
}

fn main() -> miette::Result<()> {
    bupropion::install(|| {
        // Build the bupropion handler options, for specific
        // error presenting.
        bupropion::BupropionHandlerOpts::new()
    })
    .into_diagnostic()?;

    let args = Args::parse();

    let digits = args.word.trim_start_matches("0x");
    let word = u64::from_str_radix(digits, 16).into_diagnostic()?;

    // A fresh arena: immediates decode on their own, pointer words into a
    // heap this process never ran render as malformed references.
    let heap = Heap::new();

    exec::report(&mut std::io::stdout(), Value::new(word), &heap).into_diagnostic()?;

    Ok(())
}
