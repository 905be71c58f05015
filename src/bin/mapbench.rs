use clap::arg_enum;
use log::LevelFilter;
use log::{error, info};
use mapbench::{
    ConcurrentMap, Config, Harness, LockFreeMap, MapBenchError, Result, ShardedMap, SweepPoint,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "mapbench")]
struct Opt {
    #[structopt(
        name = "CONFIG",
        help = "File holding putters, getters, trials, puts per trial and mean",
        parse(from_os_str)
    )]
    config: Option<PathBuf>,
    #[structopt(
        long = "map",
        help = "Map to measure, repeatable; defaults to every map",
        value_name = "MAP",
        possible_values = &Map::variants(),
        case_insensitive = true,
        number_of_values = 1
    )]
    maps: Vec<Map>,
    #[structopt(
        long,
        help = "Directory receiving the report files",
        value_name = "DIR",
        default_value = ".",
        parse(from_os_str)
    )]
    output_dir: PathBuf,
    #[structopt(long, help = "Base seed for key generation", value_name = "SEED")]
    seed: Option<u64>,
    #[structopt(long, help = "Smallest reader count of the sweep", value_name = "N")]
    min_readers: Option<usize>,
    #[structopt(long, help = "Largest reader count of the sweep", value_name = "N")]
    max_readers: Option<usize>,
    #[structopt(long, help = "Full traversals per getter thread", value_name = "N")]
    scans: Option<usize>,
    #[structopt(long, help = "Also write each report as JSON")]
    json: bool,
}

arg_enum! {
    #[allow(non_camel_case_types)]
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    enum Map {
        papaya,
        dashmap
    }
}

fn main() {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .init();
    let opt = Opt::from_args();
    // failures are logged; the exit status stays zero
    if let Err(e) = run(opt) {
        error!("{}", e);
    }
}

fn run(opt: Opt) -> Result<()> {
    let path = match opt.config {
        Some(path) => path,
        None => prompt_config_path()?,
    };
    let mut config = Config::from_file(&path)?;
    config.output_dir = opt.output_dir;
    config.seed = opt.seed;
    config.write_json = opt.json;
    if let Some(n) = opt.min_readers {
        config.min_readers = n;
    }
    if let Some(n) = opt.max_readers {
        config.max_readers = n;
    }
    if let Some(n) = opt.scans {
        config.scans_per_getter = n;
    }

    info!("mapbench {}", env!("CARGO_PKG_VERSION"));
    info!("Configuration read from {}", path.display());
    let harness = Harness::new(config);
    info!("Seed: {}", harness.seed());

    let maps = if opt.maps.is_empty() {
        vec![Map::papaya, Map::dashmap]
    } else {
        opt.maps
    };
    for map in maps {
        match map {
            Map::papaya => run_with::<LockFreeMap>(&harness)?,
            Map::dashmap => run_with::<ShardedMap>(&harness)?,
        }
    }
    Ok(())
}

fn run_with<M: ConcurrentMap>(harness: &Harness) -> Result<()> {
    println!("{}:", M::NAME);
    harness.run::<M, _>(|point: &SweepPoint| {
        println!(
            "readers = {:>2}  average time: {:.6}",
            point.readers, point.average_secs
        )
    })?;
    Ok(())
}

fn prompt_config_path() -> Result<PathBuf> {
    print!("Enter the input file name: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let name = line.trim();
    if name.is_empty() {
        return Err(MapBenchError::StringError(
            "no configuration file given".to_owned(),
        ));
    }
    Ok(PathBuf::from(name))
}
