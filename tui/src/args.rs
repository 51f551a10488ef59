//! Parsing command-line arguments.

use anyhow::{bail, Context, Result};
use clap::{crate_description, crate_name, crate_version, value_parser, Arg, ArgMatches, Command};
use rhrot_lib::{BoundingBox, Config, RuleConfig, Simulate};
use std::{fs, path::Path};
use tracing::info;

/// A struct to store the parse results.
pub(crate) struct Args {
    pub(crate) world: Box<dyn Simulate>,
    pub(crate) generations: u64,
    #[cfg(feature = "tui")]
    pub(crate) no_tui: bool,
}

fn command() -> Command {
    let command = Command::new(crate_name!())
        .version(crate_version!())
        .about(crate_description!())
        .long_about(
            "Steps higher-range outer-totalistic and Larger than Life cellular automata.\n\
             \n\
             The world is described by a configuration file in TOML, YAML or JSON format, \
             chosen by the file extension. Without a pattern, the world starts from a \
             random soup.\n\
             \n\
             The result is printed in RLE format, without run-length compression.\n\
             * Dead cells are represented by `.`;\n\
             * Living cells are represented by `o` for rules with 2 states, \
             `A` for rules with more states;\n\
             * Dying cells are represented by uppercase letters starting from `B`;\n\
             * Each line is ended with `$`;\n\
             * The whole pattern is ended with `!`\n",
        )
        .allow_negative_numbers(true)
        .arg(
            Arg::new("CONFIG")
                .help("Configuration file")
                .index(1),
        )
        .arg(
            Arg::new("RULE")
                .help("Rule of the cellular automaton")
                .long_help(
                    "Rule of the cellular automaton\n\
                     Supports Life-like and Generations rule strings, and the names of \
                     some well-known rules: life, brians-brain, bosco, waffle, majority, globe.\n\
                     Overrides the rule in the configuration file.\n",
                )
                .short('r')
                .long("rule")
                .value_parser(|rule: &str| {
                    rule.parse::<RuleConfig>().map_err(|e| e.to_string())
                }),
        )
        .arg(
            Arg::new("PATTERN")
                .help("Pattern file in RLE format")
                .short('p')
                .long("pattern"),
        )
        .arg(
            Arg::new("DENSITY")
                .help("Density of the random soup")
                .long_help(
                    "Density of the random soup\n\
                     Defaults to 0.5 when no pattern is given.\n",
                )
                .short('d')
                .long("density")
                .value_parser(|d: &str| match d.parse::<f64>() {
                    Ok(d) if (0.0..=1.0).contains(&d) => Ok(d),
                    Ok(_) => Err(String::from("density must be between 0 and 1")),
                    Err(e) => Err(e.to_string()),
                }),
        )
        .arg(
            Arg::new("SOUP")
                .help("Side of the square random soup")
                .long("soup")
                .default_value("32")
                .value_parser(value_parser!(i32).range(1..)),
        )
        .arg(
            Arg::new("SEED")
                .help("Seed of the random soup")
                .long("seed")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("GENS")
                .help("Number of generations to run without the TUI")
                .short('g')
                .long("generations")
                .default_value("100")
                .value_parser(value_parser!(u64)),
        );

    #[cfg(feature = "tui")]
    let command = command.arg(
        Arg::new("NOTUI")
            .help("Runs immediately and prints the result, without entering the TUI")
            .short('n')
            .long("no-tui")
            .action(clap::ArgAction::SetTrue),
    );

    command
}

/// Reads a configuration file, in the format given by its extension.
fn read_config(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Unable to read {}", path.display()))?;
    let config: Config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&text)?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&text)?,
        Some("json") => serde_json::from_str(&text)?,
        _ => bail!("Unknown configuration format: {}", path.display()),
    };
    Ok(config)
}

impl Args {
    /// Parses the command-line arguments, and builds the world.
    pub(crate) fn parse() -> Result<Self> {
        Args::from_matches(&command().get_matches())
    }

    fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let mut config = match matches.get_one::<String>("CONFIG") {
            Some(path) => read_config(Path::new(path))
                .with_context(|| format!("Invalid configuration file {}", path))?,
            None => Config::default(),
        };
        if let Some(rule) = matches.get_one::<RuleConfig>("RULE") {
            config = config.set_rule(rule.clone());
        }

        let mut world = config.world().context("Unable to create the world")?;
        info!(rule = %world.rule_string(), "World created");

        let pattern = matches.get_one::<String>("PATTERN");
        if let Some(path) = pattern {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Unable to read {}", path))?;
            world
                .read_rle(&text)
                .with_context(|| format!("Unable to load the pattern {}", path))?;
        }

        let density = matches.get_one::<f64>("DENSITY").copied();
        if pattern.is_none() || density.is_some() {
            let size = matches.get_one::<i32>("SOUP").copied().unwrap_or(32);
            let seed = matches.get_one::<u64>("SEED").copied();
            let soup = BoundingBox::with_size(-size / 2, -size / 2, size, size);
            world
                .randomize(soup, density.unwrap_or(0.5), seed)
                .context("Unable to fill the random soup")?;
        }

        Ok(Args {
            world,
            generations: matches.get_one::<u64>("GENS").copied().unwrap_or(100),
            #[cfg(feature = "tui")]
            no_tui: matches.get_flag("NOTUI"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_command() {
        command().debug_assert();
    }

    #[test]
    fn rule_and_soup() -> Result<()> {
        let matches = command().try_get_matches_from([
            "rhrot", "-r", "bosco", "-d", "0.3", "--soup", "20", "--seed", "5",
        ])?;
        let args = Args::from_matches(&matches)?;
        assert_eq!(args.world.rule_string(), "R5,C0,M1,S34..58,B34..45,NM");
        assert_eq!(args.generations, 100);
        let live = args.world.live_box().context("empty soup")?;
        assert!(live.min_x >= -10 && live.max_x < 10);
        Ok(())
    }

    #[cfg(feature = "tui")]
    #[test]
    fn no_tui_flag() -> Result<()> {
        let matches = command().try_get_matches_from(["rhrot", "-n", "-g", "7"])?;
        let args = Args::from_matches(&matches)?;
        assert!(args.no_tui);
        assert_eq!(args.generations, 7);
        let matches = command().try_get_matches_from(["rhrot"])?;
        assert!(!Args::from_matches(&matches)?.no_tui);
        Ok(())
    }

    #[test]
    fn invalid_args() {
        assert!(command()
            .try_get_matches_from(["rhrot", "-d", "1.5"])
            .is_err());
        assert!(command()
            .try_get_matches_from(["rhrot", "-r", "B3/S23/Q"])
            .is_err());
    }
}
