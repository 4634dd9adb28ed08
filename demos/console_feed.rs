//! Console Feed
//!
//! Wires the full pipeline together: a record loader behind a loading action,
//! the state machine, and a bare-bones console "presentation layer" that
//! renders loaded records grouped by inspection date.
//!
//! Run with: cargo run --example console_feed
//! Pass --live to fetch real records from the Chicago open-data endpoint
//! instead of using synthetic fixtures.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use foodwatch::{
    AppInput, AppMachine, AppState, FakeLoader, LoaderAction, LoadingAction, Record,
    RecordsLoader, SodaLoader,
};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

fn render(records: &[Record]) {
    let mut groups: BTreeMap<Option<NaiveDate>, Vec<&Record>> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.inspection_date.map(|d| d.date()))
            .or_default()
            .push(record);
    }
    // Newest day first, undated rows last.
    for (day, rows) in groups.iter().rev() {
        match day {
            Some(day) => println!("{day}"),
            None => println!("(no inspection date)"),
        }
        for record in rows {
            println!("  {} - {}", record.title, record.address);
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let live = std::env::args().any(|arg| arg == "--live");
    let loader: Arc<dyn RecordsLoader> = if live {
        Arc::new(SodaLoader::chicago().expect("loader construction"))
    } else {
        Arc::new(FakeLoader::new())
    };

    let (tx, mut rx) = mpsc::unbounded_channel();
    let machine = AppMachine::new(vec![
        Arc::new(LoaderAction::new(loader)) as Arc<dyn LoadingAction>
    ]);
    let _sub = machine.subscribe(move |transition| {
        let _ = tx.send(transition.clone());
    });

    let mut refreshed = false;
    while let Some(transition) = rx.recv().await {
        match &transition.state {
            AppState::Loading => println!("loading inspections..."),
            AppState::Loaded(records) => {
                println!("loaded {} inspections\n", records.len());
                render(records);
                if refreshed {
                    break;
                }
                // Demonstrate the manual refresh cycle once.
                refreshed = true;
                println!("\nrefreshing...\n");
                machine.send(AppInput::Refresh);
            }
            AppState::Failed(error) => {
                eprintln!("load failed: {error}");
                break;
            }
        }
    }
}
