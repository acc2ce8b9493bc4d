#[actix_web::main]
async fn main() -> std::io::Result<()> {
    report_card_server::run().await
}
