use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utah_housing::cities::SUPPORTED_CITIES;
use utah_housing::domain::{Cell, TableRow};
use utah_housing::scraper::{HttpListingSource, ListingSource, RecordedSource, SourceError};
use utah_housing::summary::describe;
use utah_housing::{
    cleaned_static_data, data_no_scrape, output, Config, Emitted, FetchOutcome, FetchRequest,
    Listing, ListingTable, Output, Pipeline, RawListing, COLUMNS,
};

const HEAD_ROWS: usize = 10;

#[derive(Parser)]
#[command(name = "utah-housing")]
#[command(about = "Collect and clean Utah housing listings")]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch raw listings
    Fetch(FetchArgs),

    /// Fetch listings, then clean and sanitize them
    Clean(FetchArgs),

    /// Load the bundled static datasets instead of fetching
    Static {
        /// Clean and sanitize the loaded rows
        #[arg(long)]
        cleaned: bool,

        /// Dataset to load; repeat to stack several (defaults to the configured set)
        #[arg(long = "dataset")]
        datasets: Vec<PathBuf>,

        #[command(flatten)]
        sink: SinkArgs,
    },

    /// Load the demo dataset and print an overview
    Demo,

    /// List supported cities
    Cities,
}

#[derive(clap::Args)]
struct FetchArgs {
    /// Listings per city
    #[arg(long, default_value_t = utah_housing::config::DEFAULT_MAX_LISTINGS)]
    max_listings: usize,

    /// City slug; repeat for several (defaults to every supported city)
    #[arg(long = "city")]
    cities: Vec<String>,

    /// Replay `<city>.csv` recordings from this directory instead of fetching live
    #[arg(long)]
    recordings: Option<PathBuf>,

    /// Cities fetched at the same time
    #[arg(long)]
    concurrency: Option<usize>,

    #[command(flatten)]
    sink: SinkArgs,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputKind {
    Table,
    Csv,
    Xlsx,
    Sqlite,
}

#[derive(clap::Args)]
struct SinkArgs {
    #[arg(long, value_enum, default_value = "table")]
    output: OutputKind,

    /// File written for csv/xlsx/sqlite output
    #[arg(long)]
    path: Option<PathBuf>,
}

impl SinkArgs {
    fn to_output(&self) -> Output {
        let path = |default: &str| self.path.clone().unwrap_or_else(|| PathBuf::from(default));
        match self.output {
            OutputKind::Table => Output::Table,
            OutputKind::Csv => Output::Csv(path("listings.csv")),
            OutputKind::Xlsx => Output::Xlsx(path("listings.xlsx")),
            OutputKind::Sqlite => Output::Sqlite(path("listings.sqlite3")),
        }
    }
}

/// Live site or recorded files, picked at startup.
enum CliSource {
    Live(HttpListingSource),
    Recorded(RecordedSource),
}

impl ListingSource for CliSource {
    fn fetch(&self, city: &str, limit: usize) -> Result<Vec<RawListing>, SourceError> {
        match self {
            CliSource::Live(source) => source.fetch(city, limit),
            CliSource::Recorded(source) => source.fetch(city, limit),
        }
    }
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(command: Commands) -> CliResult<()> {
    let config = Config::from_env()?;

    match command {
        Commands::Fetch(args) => {
            let pipeline = build_pipeline(&args, &config)?;
            let outcome = pipeline.get_data(&fetch_request(&args), &args.sink.to_output())?;
            report(&outcome);
            print_emitted(outcome.data);
        }
        Commands::Clean(args) => {
            let pipeline = build_pipeline(&args, &config)?;
            let outcome =
                pipeline.get_cleaned_data(&fetch_request(&args), &args.sink.to_output())?;
            report(&outcome);
            print_emitted(outcome.data);
        }
        Commands::Static {
            cleaned,
            datasets,
            sink,
        } => {
            let datasets = if datasets.is_empty() {
                config.static_datasets.clone()
            } else {
                datasets
            };
            if cleaned {
                print_emitted(cleaned_static_data(&datasets, &sink.to_output())?);
            } else {
                let raw = data_no_scrape(&datasets)?;
                print_emitted(output::emit(raw, &sink.to_output())?);
            }
        }
        Commands::Demo => demo(&config)?,
        Commands::Cities => {
            for city in SUPPORTED_CITIES {
                println!(
                    "{:<20}{:<20}{}",
                    city.slug,
                    city.display_name,
                    city.county.name()
                );
            }
        }
    }

    Ok(())
}

fn build_pipeline(args: &FetchArgs, config: &Config) -> CliResult<Pipeline<CliSource>> {
    let source = match args.recordings.as_ref().or(config.recordings_dir.as_ref()) {
        Some(dir) => CliSource::Recorded(RecordedSource::new(dir)),
        None => CliSource::Live(HttpListingSource::new(config)?),
    };

    let pipeline = Pipeline::from_config(source, config);
    Ok(match args.concurrency {
        Some(concurrency) => pipeline.with_concurrency(concurrency),
        None => pipeline,
    })
}

fn fetch_request(args: &FetchArgs) -> FetchRequest {
    if args.cities.is_empty() {
        FetchRequest::all_cities(args.max_listings)
    } else {
        FetchRequest::new(args.max_listings, args.cities.clone())
    }
}

fn report<T>(outcome: &FetchOutcome<T>) {
    if !outcome.rejected_cities.is_empty() {
        eprintln!("Unsupported cities: {}", outcome.rejected_cities.join(", "));
    }
    for failure in &outcome.failures {
        eprintln!("Failed {}: {}", failure.city, failure.message);
    }
}

fn demo(config: &Config) -> CliResult<()> {
    let table = cleaned_static_data(&[&config.demo_dataset], &Output::Table)?
        .into_table()
        .unwrap_or_default();

    println!("First rows:");
    print_table(&table, 5);

    let (rows, columns) = table.shape();
    println!("\nShape: {rows} rows x {columns} columns\n");

    println!("Column types:");
    for (name, ty) in COLUMNS.iter().zip(Listing::SQL_TYPES) {
        println!("  {name:<12}{ty}");
    }

    println!("\nSummary statistics:");
    print!("{}", describe(&table));
    Ok(())
}

fn print_emitted<R: TableRow>(emitted: Emitted<R>) {
    match emitted {
        Emitted::Table(table) => {
            print_table(&table, HEAD_ROWS);
            let (rows, columns) = table.shape();
            println!("[{rows} rows x {columns} columns]");
        }
        Emitted::File(path) => println!("Wrote {}", path.display()),
    }
}

fn cell_text(cell: Cell) -> String {
    match cell {
        Cell::Empty => String::new(),
        Cell::Text(text) => text,
        Cell::Number(n) => n.to_string(),
        Cell::Integer(n) => n.to_string(),
    }
}

fn print_table<R: TableRow>(table: &ListingTable<R>, limit: usize) {
    println!("{}", COLUMNS.join(" | "));
    for row in table.head(limit) {
        let cells: Vec<String> = row.cells().into_iter().map(cell_text).collect();
        println!("{}", cells.join(" | "));
    }
}
