use clap::Parser;

use swaggerui_cli::Args;

fn main() {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = swaggerui_cli::run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
