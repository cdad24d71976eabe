//! # Passage Height CLI
//!
//! Command-line front end for the passage height calculator. Values are
//! passed through the same form validation a web form would use, then the
//! result is printed as a short report or as the JSON output contract.
//!
//! ```text
//! passage_cli wall-profile --depth 3 --height 2700
//! passage_cli gutter-height --depth 2.5 --slope 50 --rail-system --height 1800 --json
//! passage_cli form submission.json
//! passage_cli ranges --form-type wall-profile
//! ```

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};
use passage_core::ranges::eligible_ranges;
use passage_core::{calculate, CalcError, CalculationConfig, CalculationResult, FormType, FormValues};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Veranda passage height calculator", long_about = None)]
struct Cli {
    /// Calculation table to use instead of the built-in one (TOML or JSON)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Print only the JSON output
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Passage height from a wall-profile height
    WallProfile(MeasurementArgs),
    /// Wall-profile height needed for a target bottom-gutter height
    GutterHeight(MeasurementArgs),
    /// Calculate from a JSON form submission (`-` for stdin)
    Form {
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
    },
    /// List the passage bands a form type can match
    Ranges {
        #[arg(long, value_enum, default_value_t = FormTypeArg::WallProfile)]
        form_type: FormTypeArg,
    },
}

#[derive(Args, Debug)]
struct MeasurementArgs {
    /// Veranda depth in meters
    #[arg(long)]
    depth: Option<String>,

    /// Terrace slope in millimeters
    #[arg(long, allow_hyphen_values = true)]
    slope: Option<String>,

    /// Recessed (sloped) rail system installed
    #[arg(long, action = ArgAction::SetTrue)]
    rail_system: bool,

    /// Main input in millimeters (wall-profile or bottom-gutter height)
    #[arg(long, allow_hyphen_values = true)]
    height: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormTypeArg {
    WallProfile,
    GutterHeight,
}

impl From<FormTypeArg> for FormType {
    fn from(arg: FormTypeArg) -> Self {
        match arg {
            FormTypeArg::WallProfile => FormType::WallProfile,
            FormTypeArg::GutterHeight => FormType::GutterHeight,
        }
    }
}

impl MeasurementArgs {
    fn into_form(self, form_type: FormType) -> FormValues {
        let mut values = FormValues::new(form_type);
        values.depth = self.depth;
        values.slope = self.slope;
        values.rail_system_slope = Some(if self.rail_system { "checked" } else { "unchecked" }.to_string());
        match form_type {
            FormType::WallProfile => values.wall_profile_height = self.height,
            FormType::GutterHeight => values.height_bottom_gutter = self.height,
        }
        values
    }
}

/// Exit status for a form that fails validation.
const EXIT_INVALID_INPUT: u8 = 2;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let code = run(cli, &mut io::stdout().lock())?;
    Ok(ExitCode::from(code))
}

fn run<W: Write>(cli: Cli, out: &mut W) -> Result<u8> {
    let config = match &cli.config {
        Some(path) => CalculationConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => CalculationConfig::default(),
    };

    let values = match cli.command {
        Command::WallProfile(args) => args.into_form(FormType::WallProfile),
        Command::GutterHeight(args) => args.into_form(FormType::GutterHeight),
        Command::Form { input } => read_form(&input)?,
        Command::Ranges { form_type } => {
            print_ranges(out, &config, form_type.into(), cli.json)?;
            return Ok(0);
        }
    };

    let errors = values.errors(&config);
    if !errors.is_empty() {
        report_errors(out, &errors, cli.json)?;
        return Ok(EXIT_INVALID_INPUT);
    }

    let request = values.into_request(&config)?;
    debug!(?request, "validated form");
    let result = calculate(&config, &request)?;
    info!(output = result.output, in_range = result.in_range, "calculation complete");

    if cli.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
    } else {
        print_report(out, &result, request.main_input())?;
    }
    Ok(0)
}

fn read_form(input: &Path) -> Result<FormValues> {
    let contents = if input.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read form from stdin")?;
        buf
    } else {
        fs::read_to_string(input).with_context(|| format!("failed to read {}", input.display()))?
    };
    serde_json::from_str(&contents).context("form is not valid JSON")
}

/// The error list always goes to stdout as JSON; the readable form goes to
/// stderr unless `--json` is set.
fn report_errors<W: Write>(out: &mut W, errors: &[CalcError], json: bool) -> Result<()> {
    if !json {
        eprintln!("Input is incomplete or invalid:");
        for error in errors {
            eprintln!("  - {}", error);
        }
    }
    writeln!(out, "{}", serde_json::to_string_pretty(errors)?)?;
    Ok(())
}

fn print_ranges<W: Write>(out: &mut W, config: &CalculationConfig, form_type: FormType, json: bool) -> Result<()> {
    let ranges: Vec<_> = eligible_ranges(config, form_type).copied().collect();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&ranges)?)?;
        return Ok(());
    }

    writeln!(out, "{} form - passage bands:", form_type)?;
    for range in &ranges {
        writeln!(out, "  {}", range)?;
    }
    if form_type == FormType::WallProfile {
        writeln!(out, "  (capped at {} mm)", config.limits.max_passage_height)?;
    }
    Ok(())
}

fn print_report<W: Write>(out: &mut W, result: &CalculationResult, input: i32) -> Result<()> {
    let (input_label, output_label) = match result.form_type {
        FormType::WallProfile => ("Wall profile", "Passage height"),
        FormType::GutterHeight => ("Gutter height", "Wall profile"),
    };

    writeln!(out, "═══════════════════════════════════════")?;
    writeln!(out, "  PASSAGE HEIGHT CALCULATION")?;
    writeln!(out, "═══════════════════════════════════════")?;
    writeln!(out)?;
    writeln!(out, "Dimensions:")?;
    writeln!(out, "  Inside depth:        {:.1} mm", result.dimensions.inside_depth)?;
    writeln!(out, "  Wall-to-gutter diff: {:.1} mm", result.dimensions.wall_to_gutter_diff)?;
    writeln!(out, "  Slope drop:          {:.1} mm", result.dimensions.slope_drop)?;
    writeln!(out)?;
    writeln!(out, "  {:<15} {} mm", format!("{}:", input_label), input)?;
    writeln!(out, "  {:<15} {} mm", format!("{}:", output_label), result.output)?;
    writeln!(out)?;

    match (result.in_range, result.range) {
        (true, Some(range)) => writeln!(out, "  RESULT: [OK] within {}", range)?,
        (_, Some(range)) => writeln!(out, "  RESULT: [OUT OF RANGE] closest band {}", range)?,
        (_, None) => writeln!(out, "  RESULT: [OUT OF RANGE] no band available")?,
    }

    if let Some(rec) = &result.recommendation {
        writeln!(
            out,
            "  Suggestion: use {} {} mm to land within {}",
            input_label.to_lowercase(),
            rec.recommended_input,
            rec.new_output_range
        )?;
    } else if !result.in_range {
        writeln!(out, "  No adjustment within the allowed input range reaches a band.")?;
    }
    writeln!(out, "═══════════════════════════════════════")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use passage_core::RailSystem;
    use serde_json::Value;

    fn run_args(args: &[&str]) -> (u8, String) {
        let cli = Cli::try_parse_from(std::iter::once("passage_cli").chain(args.iter().copied())).unwrap();
        let mut out = Vec::new();
        let code = run(cli, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    fn measurement(rail_system: bool) -> MeasurementArgs {
        MeasurementArgs {
            depth: Some("2.5".to_string()),
            slope: Some("50".to_string()),
            rail_system,
            height: Some("1800".to_string()),
        }
    }

    #[test]
    fn test_rail_flag_maps_to_checkbox_value() {
        let values = measurement(true).into_form(FormType::GutterHeight);
        assert_eq!(values.rail_system_slope.as_deref(), Some("checked"));
        assert_eq!(values.height_bottom_gutter.as_deref(), Some("1800"));
        assert_eq!(values.wall_profile_height, None);

        let values = measurement(false).into_form(FormType::WallProfile);
        assert_eq!(values.rail_system_slope.as_deref(), Some("unchecked"));
        assert_eq!(values.wall_profile_height.as_deref(), Some("1800"));
        assert_eq!(values.height_bottom_gutter, None);
    }

    #[test]
    fn test_rail_flag_reaches_request() {
        let request = measurement(true)
            .into_form(FormType::GutterHeight)
            .into_request(&CalculationConfig::default())
            .unwrap();
        assert_eq!(request.site().rail_system_slope, RailSystem::Recessed);
    }

    #[test]
    fn test_json_output() {
        let (code, out) = run_args(&["wall-profile", "--depth", "3", "--height", "2700", "--json"]);
        assert_eq!(code, 0);
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["output"], 2281);
        assert_eq!(value["inRange"], true);
        assert_eq!(value["range"], serde_json::json!([2280, 2320]));
    }

    #[test]
    fn test_invalid_input_exits_with_json_errors() {
        let (code, out) = run_args(&["wall-profile", "--depth", "3", "--height", "abc"]);
        assert_eq!(code, EXIT_INVALID_INPUT);

        let errors: Value = serde_json::from_str(&out).unwrap();
        let errors = errors.as_array().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0]["type"], "InvalidInput");
        assert_eq!(errors[0]["details"]["field"], "wall_profile_height");
    }

    #[test]
    fn test_missing_fields_listed_with_json_flag() {
        let (code, out) = run_args(&["gutter-height", "--json"]);
        assert_eq!(code, EXIT_INVALID_INPUT);

        let errors: Vec<CalcError> = serde_json::from_str(&out).unwrap();
        let fields: Vec<_> = errors.iter().filter_map(|e| e.field()).collect();
        assert_eq!(fields, vec!["depth", "height_bottom_gutter"]);
    }

    #[test]
    fn test_report_shows_recommendation() {
        let (code, out) = run_args(&["wall-profile", "--depth", "3", "--height", "2870"]);
        assert_eq!(code, 0);
        assert!(out.contains("[OUT OF RANGE] closest band 2480-2520 mm"));
        assert!(out.contains("wall profile 2899 mm"));
    }

    #[test]
    fn test_ranges_json() {
        let (code, out) = run_args(&["ranges", "--form-type", "gutter-height", "--json"]);
        assert_eq!(code, 0);
        let ranges: Vec<[i32; 2]> = serde_json::from_str(&out).unwrap();
        assert_eq!(ranges.len(), 12);
        assert_eq!(ranges[0], [1980, 2020]);
    }
}
