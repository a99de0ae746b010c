use clap::Parser;
use hotelsql::cli::Args;
use hotelsql::console::Console;
use hotelsql::core::db::{schema, BackendKind, ConnectionManager};
use hotelsql::{config, menu, operations::HotelOperations};
use std::io;
use tracing::{error, info, Level};

fn main() {
    let args = Args::parse();

    let config = match config::resolve_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };
    let level = match args.log_level(&config) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };
    init_logging(level);

    info!("Starting hotelsql...");
    greeting();

    let settings = args.settings(&config);
    print!("Connecting to database...");
    println!("Connection URL: {}\n", settings.url());

    let mut db = match ConnectionManager::connect(&settings) {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Error - Unable to Connect to Database: {}", e);
            if settings.backend == BackendKind::Postgres {
                println!("Make sure you started postgres on this machine");
            }
            std::process::exit(-1);
        }
    };
    println!("Done");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());

    let outcome = if args.init_schema {
        schema::apply_schema(&mut db).and_then(|()| console.println("Hotel tables are ready."))
    } else {
        Ok(())
    };
    let outcome = outcome.and_then(|()| {
        let mut handler = HotelOperations::new(&mut db);
        menu::run_menu(&mut console, &mut handler)
    });
    drop(console);

    if let Err(e) = outcome {
        error!("Session ended with an error: {}", e);
        eprintln!("{}", e);
    }

    print!("Disconnecting from database...");
    db.cleanup();
    println!("Done\n\nBye !");
}

/// Logs go to stderr so they never interleave with menu output.
fn init_logging(level: Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn greeting() {
    println!(
        "\n\n*******************************************************\n\
         {:^55}\n\
         *******************************************************\n",
        "Hotel Management User Interface"
    );
}
