/// Smoke-test for `ChromiumLauncher`.
///
/// Launches a headless Chromium, renders <https://example.com> after the
/// network settles, and verifies the HTML contains the expected `<h1>`.
///
/// Run with:
///   cargo run -p prerender-browser --example browser_smoke
use prerender_browser::ChromiumLauncher;
use prerender_core::RenderService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let service = RenderService::new(ChromiumLauncher::new());

    let url = "https://example.com";
    println!("Rendering {url} …");
    let html = service.render(url).await?;

    assert!(
        html.contains("<h1>Example Domain</h1>"),
        "Expected <h1> not found in rendered HTML"
    );
    assert!(
        html.starts_with("<!DOCTYPE html>") || html.starts_with("<html"),
        "Rendered output is not a full document"
    );

    println!("OK — got {} bytes of rendered HTML", html.len());
    println!("First 300 chars:\n{}", &html[..html.len().min(300)]);
    Ok(())
}
