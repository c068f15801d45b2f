use std::error::Error;
use std::fs;

use log::debug;

use radial_nav::algorithms::geometry::{distance, CompassRose};
use radial_nav::api::OutputFormat;
use radial_nav::processing::codec::{format_address, format_export, parse_address, to_address};
use radial_nav::processing::parser::RecordParser;
use radial_nav::{
    Calibration, ConfigurationManager, Directions, GeoCoordinate, JsonFormatter, Landmark, LandmarkIndex,
    NavError,
};

const USAGE: &str = "\
Usage: radial-nav [--config <file.json>] <command>

Commands:
  address <lat> <lon>              GPS fix to clock address
  locate <address>                 clock address to plane coordinates
  directions <from> <to> [--fine] [--json]
                                   distance and heading between two addresses
  nearest <records-file> <address> closest named record to an address
  search <records-file> <term>     record names containing a term ('*' for all)";

struct Options {
    config: Option<String>,
    fine: bool,
    format: OutputFormat,
    positional: Vec<String>,
}

fn parse_options(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        config: None,
        fine: false,
        format: OutputFormat::Text,
        positional: Vec::new(),
    };
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter.next().ok_or("--config needs a file path")?;
                options.config = Some(path.clone());
            }
            "--fine" => options.fine = true,
            "--json" => options.format = OutputFormat::Json,
            _ => options.positional.push(arg.clone()),
        }
    }
    Ok(options)
}

fn load_calibration(path: Option<&str>) -> Result<Calibration, NavError> {
    match path {
        Some(path) => Ok(ConfigurationManager::from_file(path)?.calibration().clone()),
        None => Ok(Calibration::default()),
    }
}

fn load_index(path: &str, calibration: &Calibration) -> Result<LandmarkIndex, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    let parsed = RecordParser::named().parse_str(&text);
    for error in &parsed.errors {
        eprintln!("{}: {}", path, error);
    }

    let mut index = LandmarkIndex::new();
    for record in &parsed.records {
        let Some(name) = &record.name else { continue };
        match record.resolve(calibration) {
            Ok(address) => {
                let mut landmark = Landmark::new(name.clone(), address);
                if let Some(description) = &record.description {
                    landmark = landmark.with_description(description.clone());
                }
                index.insert_landmark(landmark);
            }
            Err(e) => eprintln!("{}: '{}': {}", path, name, e),
        }
    }
    debug!("{} landmark(s) loaded from {}", index.len(), path);
    Ok(index)
}

fn run(options: &Options) -> Result<(), Box<dyn Error>> {
    let calibration = load_calibration(options.config.as_deref())?;
    let args: Vec<&str> = options.positional.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["address", lat, lon] => {
            let geo = GeoCoordinate::new(lat.parse()?, lon.parse()?)?;
            let address = to_address(&geo, &calibration);
            println!("{}", format_address(&address, &calibration));
            println!("export: {}", format_export(&address, &calibration));
        }
        ["locate", address] => {
            let address = parse_address(address, &calibration)?;
            let point = radial_nav::algorithms::to_local_cartesian(&address);
            println!("{}", format_address(&address, &calibration));
            println!("x={:.1} ft, y={:.1} ft, {}", point.x, point.y, address.to_csv());
        }
        ["directions", from, to] => {
            let from = parse_address(from, &calibration)?;
            let to = parse_address(to, &calibration)?;
            let rose = if options.fine {
                CompassRose::Sixteen
            } else {
                CompassRose::Eight
            };
            let directions = Directions::between(&from, &to, None, &calibration, rose);
            match options.format {
                OutputFormat::Text => println!("{}", directions),
                OutputFormat::Json => println!("{}", JsonFormatter::new().format_json(&directions)?),
            }
        }
        ["nearest", path, address] => {
            let index = load_index(path, &calibration)?;
            let current = parse_address(address, &calibration)?;
            match index.nearest(&current) {
                Some(landmark) => println!(
                    "{} ({}')",
                    landmark.to_row(&calibration),
                    distance(&current, landmark.address())
                ),
                None => println!("no landmarks"),
            }
        }
        ["search", path, term] => {
            let index = load_index(path, &calibration)?;
            for name in index.search(term) {
                if let Some(landmark) = index.get(name) {
                    println!("{}", landmark.to_row(&calibration));
                }
            }
        }
        _ => return Err(USAGE.into()),
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_options(&args)?;
    run(&options)
}
