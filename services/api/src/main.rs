use fleet_inspect_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("fleet-inspect-api error: {err}");
        std::process::exit(1);
    }
}
