#![deny(unsafe_code)]
//! CLI binary for the icon-machine procedural icon generator.
//!
//! Subcommands:
//! - `render` — render a sheet of icons, write PNG
//! - `tiles` — print the seed and class of every tile
//! - `list` — print icon classes and generator style parameters

mod error;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use icon_machine_core::{IconClass, IconGenerator, IconSpec};
use icon_machine_icons::IconKind;
use rand::Rng;
use std::path::{Path, PathBuf};
use std::process;

/// Length of seeds generated when none is given.
const RANDOM_SEED_LEN: usize = 12;
const RANDOM_SEED_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

#[derive(Parser)]
#[command(name = "icon-machine", about = "Procedural pixel-art icon generator")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Raise log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

/// Options that build an [`IconSpec`]. Flags override a `--spec` file.
#[derive(Args)]
struct SpecArgs {
    /// Master seed; a random one is generated when neither this nor a spec
    /// file provides one.
    #[arg(long)]
    seed: Option<String>,

    /// Tile edge length in pixels.
    #[arg(short, long)]
    dimension: Option<usize>,

    /// Number of tiles per side.
    #[arg(short, long)]
    tiles: Option<usize>,

    /// Icon class (potions, blades, spears, any, anyweapon).
    #[arg(short, long)]
    class: Option<String>,

    /// Style overrides as a JSON object.
    #[arg(long)]
    params: Option<String>,

    /// JSON spec file to start from.
    #[arg(long)]
    spec: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Render a sheet of icons and write a PNG.
    Render {
        #[command(flatten)]
        spec: SpecArgs,

        /// Output pixels per icon pixel.
        #[arg(short, long, default_value_t = 1)]
        scale: usize,

        /// Output file path.
        #[arg(short, long, default_value = "icons.png")]
        output: PathBuf,
    },
    /// Print the seed and class chosen for every tile.
    Tiles {
        #[command(flatten)]
        spec: SpecArgs,
    },
    /// List icon classes and generator style parameters.
    List,
}

fn random_seed() -> String {
    let mut rng = rand::rng();
    (0..RANDOM_SEED_LEN)
        .map(|_| char::from(RANDOM_SEED_ALPHABET[rng.random_range(0..RANDOM_SEED_ALPHABET.len())]))
        .collect()
}

fn read_spec_file(path: &Path) -> Result<IconSpec, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::ReadSpec {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|e| CliError::SpecDocument {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Builds and validates the spec. The flag is true when the seed was
/// generated.
fn resolve_spec(args: &SpecArgs) -> Result<(IconSpec, bool), CliError> {
    let mut generated = false;
    let mut spec = match (&args.spec, &args.seed) {
        (Some(path), _) => read_spec_file(path)?,
        (None, Some(seed)) => IconSpec::new(seed),
        (None, None) => {
            generated = true;
            IconSpec::new(&random_seed())
        }
    };
    if let Some(seed) = &args.seed {
        spec.seed.clone_from(seed);
    }
    if let Some(dimension) = args.dimension {
        spec.dimension = dimension;
    }
    if let Some(tiles) = args.tiles {
        spec.tile_dimension = tiles;
    }
    if let Some(class) = &args.class {
        spec.icon_class = class
            .parse::<IconClass>()
            .map_err(|_| CliError::UnknownClass { given: class.clone() })?;
    }
    if let Some(params) = &args.params {
        spec.params = serde_json::from_str(params).map_err(|e| CliError::Params(e.to_string()))?;
        if !spec.params.is_object() {
            return Err(CliError::Params("expected a JSON object".into()));
        }
    }
    spec.validate()?;
    log::debug!("resolved spec: {spec:?}");
    Ok((spec, generated))
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let classes = IconClass::list_names();
            let mut generators = serde_json::Map::new();
            for name in IconKind::list_generators() {
                let generator = IconKind::from_name(name, &serde_json::json!({}))?;
                generators.insert(name.to_string(), generator.param_schema());
            }
            if cli.json {
                let info = serde_json::json!({
                    "classes": classes,
                    "generators": generators,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Classes:");
                println!("  {}", classes.join(", "));
                println!("Style parameters:");
                for (name, schema) in &generators {
                    println!("  {name}");
                    if let Some(params) = schema.as_object() {
                        for (key, entry) in params {
                            println!(
                                "    {key:<16} {} (default {})",
                                entry["description"].as_str().unwrap_or(""),
                                entry["default"]
                            );
                        }
                    }
                }
            }
        }
        Command::Tiles { spec } => {
            let (spec, _) = resolve_spec(&spec)?;
            let plans = icon_machine_icons::plan_tiles(&spec);
            if cli.json {
                let info = serde_json::json!({
                    "seed": spec.seed,
                    "tiles": plans,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("seed {}", spec.seed);
                for plan in &plans {
                    println!(
                        "  [{}] ({}, {}) {:<8} {}",
                        plan.index, plan.column, plan.row, plan.class, plan.seed
                    );
                }
            }
        }
        Command::Render {
            spec,
            scale,
            output,
        } => {
            let (spec, generated) = resolve_spec(&spec)?;
            let canvas = icon_machine_icons::render(&spec)?;
            icon_machine_icons::snapshot::write_png(&canvas, scale, &output)
                .map_err(|e| CliError::png(output.clone(), e))?;

            if cli.json {
                let info = serde_json::json!({
                    "spec": spec,
                    "seed_generated": generated,
                    "scale": scale,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                let side = spec.dimension * spec.tile_dimension * scale.max(1);
                eprintln!(
                    "rendered {} ({}x{} tiles of {}px, seed {}{}) -> {} ({side}x{side})",
                    spec.icon_class,
                    spec.tile_dimension,
                    spec.tile_dimension,
                    spec.dimension,
                    spec.seed,
                    if generated { ", generated" } else { "" },
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> SpecArgs {
        SpecArgs {
            seed: None,
            dimension: None,
            tiles: None,
            class: None,
            params: None,
            spec: None,
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn missing_seed_is_generated() {
        let (spec, generated) = resolve_spec(&args()).unwrap();
        assert!(generated);
        assert_eq!(spec.seed.len(), RANDOM_SEED_LEN);
        assert!(spec.seed.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn flags_build_the_spec() {
        let (spec, generated) = resolve_spec(&SpecArgs {
            seed: Some("flags".into()),
            dimension: Some(16),
            tiles: Some(2),
            class: Some("AnyWeapon".into()),
            params: Some(r#"{"pommel": false}"#.into()),
            spec: None,
        })
        .unwrap();
        assert!(!generated);
        assert_eq!(spec.seed, "flags");
        assert_eq!(spec.dimension, 16);
        assert_eq!(spec.tile_dimension, 2);
        assert_eq!(spec.icon_class, IconClass::AnyWeapon);
        assert_eq!(spec.params["pommel"], false);
    }

    #[test]
    fn flags_override_a_spec_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spec.json");
        std::fs::write(&path, r#"{"seed":"file","dimension":64,"icon_class":"spears"}"#).unwrap();
        let (spec, generated) = resolve_spec(&SpecArgs {
            dimension: Some(24),
            spec: Some(path),
            ..args()
        })
        .unwrap();
        assert!(!generated);
        assert_eq!(spec.seed, "file");
        assert_eq!(spec.dimension, 24);
        assert_eq!(spec.icon_class, IconClass::Spears);
    }

    fn exit_code_of(args: &[&str]) -> Option<i32> {
        let cli = Cli::try_parse_from(std::iter::once("icon-machine").chain(args.iter().copied())).unwrap();
        run(cli).err().map(|e| e.exit_code())
    }

    #[test]
    fn failing_commands_exit_with_their_codes() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("icons.png");
        let out = out.to_str().unwrap();
        let missing_dir = dir.path().join("missing").join("icons.png");
        let broken_spec = dir.path().join("broken.json");
        std::fs::write(&broken_spec, "{\"seed\": ").unwrap();

        // sheet out of range
        assert_eq!(exit_code_of(&["render", "--seed", "s", "-d", "2", "-o", out]), Some(10));
        assert_eq!(exit_code_of(&["tiles", "--seed", "s", "-t", "0"]), Some(10));
        assert_eq!(exit_code_of(&["tiles", "--seed", "s", "-t", "17"]), Some(10));

        // unreadable spec file, unwritable PNG
        assert_eq!(exit_code_of(&["tiles", "--spec", "/nonexistent/spec.json"]), Some(11));
        assert_eq!(
            exit_code_of(&["render", "--seed", "s", "-d", "8", "-o", missing_dir.to_str().unwrap()]),
            Some(11)
        );

        // flags and documents that do not parse
        assert_eq!(exit_code_of(&["render", "--seed", "s", "-c", "wands", "-o", out]), Some(12));
        assert_eq!(exit_code_of(&["tiles", "--seed", "s", "--params", "[1, 2]"]), Some(12));
        assert_eq!(exit_code_of(&["tiles", "--seed", "s", "--params", "{pommel"]), Some(12));
        assert_eq!(exit_code_of(&["tiles", "--spec", broken_spec.to_str().unwrap()]), Some(12));

        // a sheet too large to encode
        let huge = (usize::MAX / 4).to_string();
        assert_eq!(
            exit_code_of(&["render", "--seed", "s", "-d", "8", "-s", &huge, "-o", out]),
            Some(14)
        );
        assert!(!std::path::Path::new(out).exists());
    }

    #[test]
    fn wildcard_class_flag_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("icons.png");
        let out = out.to_str().unwrap();
        assert_eq!(exit_code_of(&["render", "--seed", "s", "-d", "8", "-t", "2", "-c", "any", "-o", out]), None);
        assert!(std::path::Path::new(out).exists());
    }
}
