use std::path::Path;

const USAGE: &str = "usage: courier-get http://host[:port]/path";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(url), None) = (args.next(), args.next()) else {
        anyhow::bail!(USAGE);
    };

    let saved = courier::client::fetch(&url, Path::new(".")).await?;
    let name = saved
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    println!("Saved to {name}");

    Ok(())
}
