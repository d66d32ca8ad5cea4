use anyhow::Context;
use clap::Parser;
use mousemover::{
    banner, init_tracing, shutdown_signal, version_text, Args, Config, EnigoPointer, MouseMover,
};

fn main() {
    let args = Args::parse();

    if args.version {
        println!("{}", version_text());
        return;
    }

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(config: Config) -> anyhow::Result<()> {
    print!("{}", banner(&config));
    println!();
    init_tracing(config.verbose());

    let pointer = EnigoPointer::connect().context("cannot start mouse mover")?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("cannot start async runtime")?;

    runtime.block_on(MouseMover::new(config, pointer).main_loop(shutdown_signal()))?;
    Ok(())
}
