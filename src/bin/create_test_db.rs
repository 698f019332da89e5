use std::error::Error;
use std::path::Path;
use std::process::exit;
use std::sync::{Arc, Mutex};

use clap::Parser;
use rusqlite::Connection;

use transaction_service::{
    SQLiteTransactionStore, Transaction, create_transaction, initialize_db,
};

/// A utility for creating a test database for the transaction service.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    let store = SQLiteTransactionStore::new(Arc::new(Mutex::new(conn)));

    println!("Creating test transactions...");

    for transaction in [
        Transaction::build(1, 100.0, "purchase").finalize(),
        Transaction::build(2, 50.0, "refund").parent_id(Some(1)).finalize(),
        Transaction::build(3, 20.0, "refund").parent_id(Some(2)).finalize(),
    ] {
        create_transaction(transaction, &store)?;
    }

    println!("Success!");

    Ok(())
}
