use std::process::exit;

#[tokio::main]
async fn main() {
    exit(s3_eraser::main_rs().await);
}
