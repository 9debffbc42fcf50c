#[tokio::main]
async fn main() {
    apex_studio::start_server().await;
}
