//! Nattramn demo site
//!
//! This demo shows:
//! - Two pages sharing one template: `/` and `/users/:id`
//! - Partial-content navigation via the client bundle at `/nattramn-client.js`
//! - Static assets served from `public/`
//! - Server settings resolved from `nattramn.toml` and `NT_*` env vars
//!
//! Run it from this directory so `public/` resolves, then open
//! `http://127.0.0.1:5000/`.

use anyhow::Result;
use clap::Parser;
use nattramn_core::prelude::*;

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <link rel="stylesheet" href="/style.css">
    <script src="/nattramn-client.js" defer></script>
</head>
<body>
    <nav><a href="/">Nattramn demo</a></nav>
    <main><nattramn-router></nattramn-router></main>
    <footer>rendered server-side</footer>
</body>
</html>"#;

#[derive(Parser, Debug)]
#[command(name = "site", about = "Nattramn demo site")]
struct Args {
    /// Override the configured listening port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = env_logger::Builder::from_default_env()
        .format_timestamp_millis()
        .format_module_path(false)
        .try_init();

    let args = Args::parse();

    let router = RouterConfig::builder()
        .page("/", TEMPLATE, page_fn(home))
        .page("/users/:id", TEMPLATE, page_fn(user))
        .build()?;

    let mut config = NattramnConfig::load(router)?;
    config.server.serve_static.get_or_insert_with(|| "public".to_string());
    if let Some(port) = args.port {
        config.server.port = port;
    }

    log::info!("demo site starting with {} pages", config.router.pages.len());
    start_server(config).await
}

async fn home(_req: PageRequest) -> Result<PageData> {
    Ok(PageData::new(
        "<h1>Nattramn</h1>\
         <p>Pick a user - with the client bundle loaded, navigation swaps only\
         the fragment below.</p>\
         <ul>\
           <li><a href=\"/users/1\">First user</a></li>\
           <li><a href=\"/users/2\">Second user</a></li>\
         </ul>",
    )
    .with_head("<title>Home</title>"))
}

async fn user(req: PageRequest) -> Result<PageData> {
    let id = &req.params["id"];
    Ok(PageData::new(format!(
        "<article><h1>User {id}</h1><p><a href=\"/\">Back home</a></p></article>"
    ))
    .with_head(format!("<title>User {id}</title>")))
}
