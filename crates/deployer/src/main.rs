#[tokio::main]
async fn main() {
    let code = deployer::start(std::env::args()).await;
    std::process::exit(code);
}
