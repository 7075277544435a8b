use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use client_core::{AddressBookClient, BookEvent, SortField, ViewSnapshot};
use shared::domain::AddressDraft;
use storage::{AddressBookStore, InMemoryAddressBook};

mod config;

#[derive(Parser, Debug)]
#[command(name = "addressbook", about = "Address book grid client (in-memory demo)")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the derived grid view: filtered, sorted, paged.
    List {
        /// Case-insensitive substring matched against name and surname.
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_enum)]
        sort_by: Option<SortColumn>,
        #[arg(long, value_enum, default_value_t = Direction::Asc)]
        order: Direction,
        #[arg(long, default_value_t = 0)]
        page: usize,
        /// Overrides the configured page size.
        #[arg(long)]
        page_size: Option<usize>,
        /// Emit the full view snapshot as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Scripted create/update/delete walkthrough over the seeded store.
    Demo,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortColumn {
    Name,
    Surname,
}

impl From<SortColumn> for SortField {
    fn from(value: SortColumn) -> Self {
        match value {
            SortColumn::Name => Self::Name,
            SortColumn::Surname => Self::Surname,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Direction {
    Asc,
    Desc,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();
    let settings = config::load_settings();

    let store: Arc<dyn AddressBookStore> = if settings.seed_demo_data {
        Arc::new(InMemoryAddressBook::with_seed_entries())
    } else {
        Arc::new(InMemoryAddressBook::new())
    };

    match args.command {
        Command::List {
            search,
            sort_by,
            order,
            page,
            page_size,
            json,
        } => {
            let client =
                AddressBookClient::new(store, page_size.unwrap_or(settings.page_size));
            client.refresh().await?;

            if let Some(search) = search {
                client.set_search(search).await;
            }
            if let Some(column) = sort_by {
                let field = SortField::from(column);
                client.toggle_sort(field).await;
                if order == Direction::Desc {
                    client.toggle_sort(field).await;
                }
            }
            let snapshot = client.set_page(page).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print_table(&snapshot);
            }
        }
        Command::Demo => {
            let client = AddressBookClient::new(store, settings.page_size);
            let mut events = client.subscribe_events();
            client.refresh().await?;
            drain_events(&mut events);

            println!("== seeded view ==");
            print_table(&client.snapshot().await);

            println!("== cancelled edit dialog: nothing happens ==");
            let outcome = client.submit_edit(None).await?;
            println!("outcome: {outcome:?}");

            println!("== adding Korra ==");
            let outcome = client
                .submit_edit(Some(AddressDraft {
                    id: None,
                    name: "Korra".into(),
                    surname: "Avatar".into(),
                    phone_number: Some("4455667788".into()),
                }))
                .await?;
            println!("outcome: {outcome:?}");
            drain_events(&mut events);
            print_table(&client.snapshot().await);

            println!("== searching for 'ar' sorted by surname ==");
            client.set_search("ar").await;
            let snapshot = client.toggle_sort(SortField::Surname).await;
            drain_events(&mut events);
            print_table(&snapshot);

            println!("== a draft with a bad phone number is rejected ==");
            let rejected = client
                .submit_edit(Some(AddressDraft {
                    id: None,
                    name: "Bogus".into(),
                    surname: "Entry".into(),
                    phone_number: Some("not-a-number".into()),
                }))
                .await;
            println!("outcome: {rejected:?}");
            drain_events(&mut events);

            println!("== deleting the first visible entry ==");
            if let Some(first) = client.snapshot().await.rows.first().cloned() {
                client.delete_address(first.id).await?;
                println!("deleted {} {}", first.name, first.surname);
            }
            drain_events(&mut events);
            print_table(&client.snapshot().await);
        }
    }

    Ok(())
}

fn drain_events(events: &mut tokio::sync::broadcast::Receiver<BookEvent>) {
    while let Ok(event) = events.try_recv() {
        match event {
            BookEvent::ViewRefreshed(snapshot) => {
                println!("[event] view refreshed: {} visible entries", snapshot.total);
            }
            BookEvent::MutationFailed { message } => {
                println!("[event] mutation failed: {message}");
            }
        }
    }
}

fn print_table(snapshot: &ViewSnapshot) {
    println!("{:<14} {:<24} {:<14}", "Name", "Surname", "Phone Number");
    for row in snapshot.page_rows() {
        println!(
            "{:<14} {:<24} {:<14}",
            row.name,
            row.surname,
            row.phone_number.as_deref().unwrap_or("-")
        );
    }
    let pages = snapshot.total.div_ceil(snapshot.page_size).max(1);
    println!(
        "-- page {}/{} ({} entries total)",
        snapshot.page_index + 1,
        pages,
        snapshot.total
    );
}
