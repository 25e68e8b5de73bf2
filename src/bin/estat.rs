use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use estat_rs::config::{ConfigLayer, SettingsBuilder, load_config, series_from_id_list};
use estat_rs::models::{Flag, Lang};
use estat_rs::{Client, EstatError};
use estat_rs::{pipeline, storage, summary};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "estat",
    version,
    about = "Fetch municipal statistics from the e-Stat API and summarize the latest values"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch all configured series (and save raw, latest and summary files).
    Get(GetArgs),
}

#[derive(Args, Debug)]
struct GetArgs {
    /// e-Stat application id
    #[arg(short, long)]
    app_id: Option<String>,
    /// Municipality / area code (e.g., 13101)
    #[arg(short = 'm', long, visible_alias = "municipality-id")]
    area: Option<String>,
    /// Config file (JSON). Defaults to ./estat.config.json when present.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Base directory for output folders (default ./output)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Statistics table ids separated by comma or semicolon; replaces the config file's list
    #[arg(long)]
    stats_id: Option<String>,
    /// Category code (cdCat01) applied to every --stats-id
    #[arg(long, requires = "stats_id")]
    category: Option<String>,
    /// Lower time bound (cdTimeFrom) applied to every --stats-id, e.g. 2000100000
    #[arg(long, requires = "stats_id")]
    time_from: Option<String>,
    /// Response language (J or E)
    #[arg(long, value_enum)]
    lang: Option<Lang>,
    /// Request metadata (Y or N)
    #[arg(long, value_enum)]
    meta: Option<Flag>,
    /// Request counts only (Y or N)
    #[arg(long, value_enum)]
    count: Option<Flag>,
    /// Total request timeout in seconds (default: none)
    #[arg(long)]
    timeout: Option<u64>,
    /// Print results without writing any files.
    #[arg(long, default_value_t = false)]
    no_save: bool,
}

fn cli_layer(args: &GetArgs) -> ConfigLayer {
    let stats_data = args.stats_id.as_deref().map(|ids| {
        series_from_id_list(ids, args.category.as_deref(), args.time_from.as_deref())
    });
    ConfigLayer {
        app_id: args.app_id.clone(),
        area_code: args.area.clone(),
        lang: args.lang,
        meta_get_flg: args.meta,
        cnt_get_flg: args.count,
        base_url: None,
        output: args.output.clone(),
        stats_data,
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Get(args) => cmd_get(args),
    }
}

fn cmd_get(args: GetArgs) -> Result<()> {
    let settings = SettingsBuilder::new()
        .merge(load_config(args.config.as_deref())?)
        .merge(cli_layer(&args))
        .build()?;

    eprintln!(
        "Fetching {} series for area {}",
        settings.series().len(),
        settings.area_code()
    );

    let client = Client::with_timeout(args.timeout.map(Duration::from_secs))?;
    let out = match pipeline::run(&client, &settings) {
        Ok(out) => out,
        Err(e) => {
            if let Some(body) = e.response_body() {
                eprintln!("Response body: {}", body);
            }
            if let EstatError::ApiStatus { code, .. } = &e {
                eprintln!("The e-Stat service rejected the request (status {code}).");
            }
            return Err(e.into());
        }
    };

    print!("{}", summary::render_overview(&out.raw));
    println!();
    print!("{}", out.summary);

    if !args.no_save {
        let dir = storage::create_timestamp_folder(settings.output_dir())?;
        storage::write_outputs(&dir, &out)?;
        eprintln!("Saved {} datasets to {}", out.raw.len(), dir.display());
    }

    Ok(())
}
