use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use geocore::{
    Datum, GeoPoint, Heading, Hemisphere, UtmCoordinate, UtmProjection, compute_cone_with,
    from_utm, to_utm,
};
use session::{FieldSession, LocationPolicy, SessionConfig};
use tools::{
    cone_feature, cone_options, cone_record, inverse_record, replay, to_json_line, utm_record,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Heading cone and UTM ED50 conversions")]
struct Args {
    /// Cone radius in meters (default: $FIELDVIEW_RADIUS_M or 100)
    #[arg(long, global = true)]
    radius: Option<f64>,

    /// Cone field of view in degrees (default: $FIELDVIEW_FOV_DEG or 60)
    #[arg(long, global = true)]
    fov: Option<f64>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Direction cone for a position and heading
    Cone {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Degrees clockwise from true north
        #[arg(long, allow_negative_numbers = true)]
        heading: f64,

        /// Emit a GeoJSON Feature instead of the plain record
        #[arg(long)]
        geojson: bool,
    },

    /// Convert a WGS84 point to UTM
    Utm {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        #[arg(long, value_enum, default_value_t = DatumArg::Ed50)]
        datum: DatumArg,
    },

    /// Convert a UTM position back to WGS84
    Inverse {
        #[arg(long)]
        zone: u8,

        /// N or S
        #[arg(long)]
        hemisphere: Hemisphere,

        #[arg(long)]
        easting: f64,

        #[arg(long)]
        northing: f64,

        #[arg(long, value_enum, default_value_t = DatumArg::Ed50)]
        datum: DatumArg,
    },

    /// Replay JSON-lines location/heading/tap events (stdin when no file)
    Replay {
        input: Option<PathBuf>,

        /// Abort on the first malformed line
        #[arg(long)]
        strict: bool,

        /// Minimum time between accepted fixes
        #[arg(long, default_value_t = 0)]
        min_interval_ms: u64,

        /// Minimum movement between accepted fixes
        #[arg(long, default_value_t = 0.0)]
        min_distance_m: f64,

        /// Drop fixes with a worse accuracy radius
        #[arg(long)]
        max_accuracy_m: Option<f64>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DatumArg {
    Ed50,
    Wgs84,
}

impl DatumArg {
    fn datum(self) -> Datum {
        match self {
            DatumArg::Ed50 => Datum::ED50,
            DatumArg::Wgs84 => Datum::WGS84,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(e) = real_main(Args::parse()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let cone = cone_options(args.radius, args.fov)?;
    let pretty = args.pretty;

    match args.command {
        Command::Cone {
            lat,
            lon,
            heading,
            geojson,
        } => {
            let center = GeoPoint::try_new(lat, lon)?;
            let heading = Heading::new(heading)?;
            let polygon = compute_cone_with(center, heading, &cone)?;
            let value = if geojson {
                cone_feature(&polygon, heading, &cone)
            } else {
                cone_record(&polygon, heading, &cone)
            };
            println!("{}", to_json_line(&value, pretty)?);
        }
        Command::Utm { lat, lon, datum } => {
            let point = GeoPoint::try_new(lat, lon)?;
            let datum = datum.datum();
            let utm = to_utm(point, &datum)?;
            let projection = UtmProjection::for_point(point, datum);
            info!(%projection, "converted");
            println!(
                "{}",
                to_json_line(&utm_record(point, &utm, &projection), pretty)?
            );
        }
        Command::Inverse {
            zone,
            hemisphere,
            easting,
            northing,
            datum,
        } => {
            let utm = UtmCoordinate {
                easting,
                northing,
                zone,
                hemisphere,
            };
            let point = from_utm(utm, &datum.datum())?;
            println!("{}", to_json_line(&inverse_record(&utm, point), pretty)?);
        }
        Command::Replay {
            input,
            strict,
            min_interval_ms,
            min_distance_m,
            max_accuracy_m,
        } => {
            let mut session = FieldSession::new(SessionConfig {
                cone,
                location: LocationPolicy {
                    min_interval_ms,
                    min_distance_m,
                    max_accuracy_m,
                },
            })?;
            let stdout = io::stdout();
            let out = stdout.lock();
            let summary = match &input {
                Some(path) => {
                    let file =
                        File::open(path).map_err(|e| format!("open {}: {e}", path.display()))?;
                    replay(&mut session, BufReader::new(file), out, strict)?
                }
                None => replay(&mut session, io::stdin().lock(), out, strict)?,
            };
            info!(
                events = summary.events,
                rejected = summary.rejected,
                skipped = summary.skipped_lines,
                "replay finished"
            );
        }
    }

    Ok(())
}
