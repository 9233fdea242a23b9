#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = exam_admin::run().await {
        eprintln!("exam-admin fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
