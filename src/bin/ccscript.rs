use anyhow::{bail, Context, Result};
use ccscript::{describe_input_script, describe_output_script, format_script, Network};
use clap::Parser as ClapParser;
use log::debug;
use std::io::Read;

#[derive(ClapParser, Debug)]
#[command(version, about = "Decode a script given as hex", long_about = None)]
struct Args {
    /// Script hex, or `-` to read it from stdin
    script: String,

    /// Treat the script as an input script and label signature hash types
    #[arg(short, long)]
    input: bool,

    /// Encode addresses for testnet
    #[arg(short, long)]
    testnet: bool,

    #[arg(long)]
    no_hex: bool,

    #[arg(long)]
    no_asm: bool,

    /// Print the compact script format instead of JSON
    #[arg(short, long, conflicts_with = "input")]
    format: bool,
}

fn read_script(arg: &str) -> Result<Vec<u8>> {
    let text = if arg == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).context("reading script from stdin")?;
        buf
    } else {
        arg.to_string()
    };
    let text = text.trim();
    if text.len() % 2 != 0 {
        bail!("script hex has odd length {}", text.len());
    }
    hex::decode(text).context("script is not valid hex")
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let script = read_script(&args.script)?;
    debug!("Read {} script bytes", script.len());

    if args.format {
        println!("{}", format_script(&script));
        return Ok(());
    }

    let network = if args.testnet { Network::Testnet } else { Network::Mainnet };
    let json = if args.input {
        describe_input_script(&script)
    } else {
        describe_output_script(&script, network, !args.no_hex, !args.no_asm)
    };
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
