#[tokio::main]
async fn main() {
    guestlist::start_server().await;
}
