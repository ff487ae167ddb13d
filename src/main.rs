#[tokio::main]
async fn main() -> anyhow::Result<()> {
    qiaoqiao_scan::run().await
}
