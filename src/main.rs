use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use flow_dae2obj::{CompositionOrder, ConvertOptions};

/// Convert a single-mesh COLLADA file into OBJ/MTL.
#[derive(Parser, Debug)]
#[command(name = "dae2obj", version, about)]
struct Args {
    /// COLLADA (.dae) file to convert
    input: PathBuf,

    /// Output path without extension; `.obj` and `.mtl` are appended
    output_base: PathBuf,

    /// Apply parent transforms before the node's own (standard scene-graph
    /// order) instead of the legacy order
    #[arg(long)]
    hierarchical: bool,
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let args = Args::parse();
    let options = ConvertOptions {
        composition: if args.hierarchical {
            CompositionOrder::Hierarchical
        } else {
            CompositionOrder::Legacy
        },
    };

    flow_dae2obj::convert_with(&args.input, &args.output_base, &options)
        .with_context(|| format!("failed to convert {}", args.input.display()))?;
    Ok(())
}
