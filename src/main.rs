use clap::Parser;
use tracing::error;

#[tokio::main]
async fn main() {
    colorfreq_lib::init_tracing();

    let cli = colorfreq_lib::Cli::parse();
    if let Err(err) = colorfreq_lib::run(cli).await {
        error!(error = %err, "Run aborted");
        std::process::exit(1);
    }
}
