use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use osclient::{Client, Domain, ResourceRecord, FLAVORS, IMAGES};

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "osclient=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = cli::Cli::parse();
    let client = Client::from_env().context("failed to build HTTP client")?;

    let result = run(&client, args.command).await;
    if let Err(ref e) = result {
        tracing::error!("{:#}", e);
    }
    result
}

async fn run(client: &Client, command: cli::Commands) -> anyhow::Result<()> {
    match command {
        cli::Commands::Image { name } => {
            let id = client
                .get_image_id_by_name(&name)
                .await
                .with_context(|| format!("image lookup for '{}'", name))?;
            println!("{}", id);
        }
        cli::Commands::Flavor { name } => {
            let id = client
                .get_flavor_id_by_name(&name)
                .await
                .with_context(|| format!("flavor lookup for '{}'", name))?;
            println!("{}", id);
        }
        cli::Commands::Images => print_records(&client.list(&IMAGES).await?),
        cli::Commands::Flavors => print_records(&client.list(&FLAVORS).await?),
        cli::Commands::Endpoint { service, domain } => {
            let domain: Domain = domain.parse()?;
            let conn = client.get_connection(&service, domain).await?;
            if conn.is_anonymous() {
                anyhow::bail!("credentials are not configured; cannot read the service catalog");
            }
            println!("{}", conn.base_url);
        }
        cli::Commands::Status => {
            let creds = client.credentials();
            if client.is_authenticated() {
                println!(
                    "configured: tenant={} user={} auth_url={}",
                    creds.tenant_name, creds.username, creds.auth_url
                );
            } else {
                println!("unconfigured: missing {}", creds.missing_vars().join(", "));
            }
        }
    }
    Ok(())
}

fn print_records(records: &[ResourceRecord]) {
    for record in records {
        println!("{}\t{}", record.id, record.name.as_deref().unwrap_or(""));
    }
}
