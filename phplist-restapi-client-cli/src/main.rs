use clap::{Parser, Subcommand};
use phplist_restapi_client::Client;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser, Clone)]
#[command(name = "phplist-restapi-client")]
#[command(about = "A CLI tool for managing phpList subscribers and lists")]
struct Cli {
    #[arg(short, long, env = "PHPLIST_API_URL")]
    url: String,
    #[arg(short, long, env = "PHPLIST_LOGIN")]
    login: String,
    #[arg(short, long, env = "PHPLIST_PASSWORD")]
    password: String,
    #[arg(short, long, env = "PHPLIST_SECRET")]
    secret: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand, Clone)]
enum Commands {
    #[command(about = "Checks that the configured credentials are accepted")]
    Login,
    #[command(about = "Prints all lists")]
    Lists,
    #[command(about = "Creates a list")]
    ListAdd { name: String, description: String },
    #[command(about = "Subscribes an email address to lists (comma-separated ids)")]
    Subscribe { email: String, lists: String },
    #[command(about = "Adds a confirmed subscriber")]
    SubscriberAdd { email: String },
    #[command(about = "Finds a subscriber id by email address")]
    SubscriberFind { email: String },
    #[command(about = "Fetches a subscriber by id")]
    SubscriberGet { id: u64 },
    #[command(about = "Fetches a subscriber by foreign key")]
    SubscriberByForeignkey { foreignkey: String },
    #[command(about = "Updates a subscriber's email address")]
    SubscriberUpdate { id: u64, email: String },
    #[command(about = "Deletes a subscriber")]
    SubscriberDelete { id: u64 },
    #[command(about = "Prints the total number of subscribers")]
    SubscriberCount,
    #[command(about = "Adds a subscriber to a list")]
    ListSubscriberAdd { list_id: u64, subscriber_id: u64 },
    #[command(about = "Prints the lists a subscriber is a member of")]
    ListsSubscriber { subscriber_id: u64 },
    #[command(about = "Removes a subscriber from a list")]
    ListSubscriberDelete { list_id: u64, subscriber_id: u64 },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Cli::parse();

    let mut client = Client::new(&args.url, &args.login, &args.password);
    if let Some(secret) = args.secret {
        client = client.with_secret(secret);
    }

    match args.command {
        Commands::Login => {
            if client.login().await? {
                println!("login ok");
            } else {
                anyhow::bail!("login failed");
            }
        }
        Commands::Lists => print_data(client.lists_get().await?)?,
        Commands::ListAdd { name, description } => {
            print_id(client.list_add(&name, &description).await?)?
        }
        Commands::Subscribe { email, lists } => {
            print_id(client.subscribe(&email, &lists).await?)?
        }
        Commands::SubscriberAdd { email } => print_id(client.subscriber_add(&email).await?)?,
        Commands::SubscriberFind { email } => {
            print_id(client.subscriber_find_by_email(&email).await?)?
        }
        Commands::SubscriberGet { id } => print_data(client.subscriber_get(id).await?)?,
        Commands::SubscriberByForeignkey { foreignkey } => {
            print_data(client.subscriber_get_by_foreignkey(&foreignkey).await?)?
        }
        Commands::SubscriberUpdate { id, email } => {
            print_id(client.subscriber_update(id, &email).await?)?
        }
        Commands::SubscriberDelete { id } => {
            if client.subscriber_delete(id).await? {
                println!("deleted subscriber {id}");
            } else {
                anyhow::bail!("the API reported an error");
            }
        }
        Commands::SubscriberCount => print_id(client.subscriber_count().await?)?,
        Commands::ListSubscriberAdd {
            list_id,
            subscriber_id,
        } => print_data(client.list_subscriber_add(list_id, subscriber_id).await?)?,
        Commands::ListsSubscriber { subscriber_id } => {
            print_data(client.lists_subscriber(subscriber_id).await?)?
        }
        Commands::ListSubscriberDelete {
            list_id,
            subscriber_id,
        } => print_data(client.list_subscriber_delete(list_id, subscriber_id).await?)?,
    }

    Ok(())
}

fn print_data(data: Option<Value>) -> Result<(), anyhow::Error> {
    match data {
        Some(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        None => anyhow::bail!("the API reported an error"),
    }
}

fn print_id(id: Option<u64>) -> Result<(), anyhow::Error> {
    match id {
        Some(id) => {
            println!("{id}");
            Ok(())
        }
        None => anyhow::bail!("the API reported an error"),
    }
}
