use clap::Parser;

#[tokio::main]
async fn main() {
    // A missing .env is normal in containers; real env vars still apply.
    dotenvy::dotenv().ok();

    let cli = clash_proxy::cli::Cli::parse();
    if let Err(e) = clash_proxy::cmd::dispatch(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
