use clap::Parser;
use ffi_dispatch_bench::cli::{execute_benchmark, Cli};

fn main() {
    let cli = Cli::parse();

    if let Err(error) = execute_benchmark(cli) {
        eprintln!("❌ エラー: {error:#}");
        std::process::exit(1);
    }
}
