use std::error::Error;

use clap::{error::ErrorKind, Parser};

use crate::config::PipelineConfig;
use crate::constants::defaults;
use crate::data::VariableRecord;
use crate::metrics::{group_coverage, rows_per_group, unused_rules};
use crate::pipeline::Pipeline;

#[derive(Debug, Parser)]
#[command(
    name = "standardize_demo",
    disable_help_subcommand = true,
    about = "Standardize the bundled sample corpus",
    long_about = "Run the full standardization pipeline over a bundled multi-wave sample corpus and print the label table, coverage summary, and (optionally) the audit."
)]
struct StandardizeDemoCli {
    #[arg(
        long = "min-wave-support",
        default_value_t = defaults::MIN_WAVE_SUPPORT,
        value_parser = parse_positive_usize,
        help = "Minimum distinct-wave support a keyword needs to survive"
    )]
    min_wave_support: usize,
    #[arg(long, help = "Emit JSON lines instead of the text report")]
    json: bool,
    #[arg(
        long = "show-audit",
        help = "Print exclusion, ambiguity, and keyword-drop rows"
    )]
    show_audit: bool,
}

#[derive(Debug, Parser)]
#[command(
    name = "scale_report",
    disable_help_subcommand = true,
    about = "Classify response scales of the bundled sample corpus",
    long_about = "Run the pipeline over the bundled sample corpus and print each variable's classified response-scale archetype with per-archetype counts."
)]
struct ScaleReportCli {
    #[arg(long, help = "Emit JSON lines instead of the text report")]
    json: bool,
}

/// Standardization demo over the bundled sample corpus.
pub fn run_standardize_demo<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let Some(cli) = parse_cli::<StandardizeDemoCli, _>(
        std::iter::once("standardize_demo".to_string()).chain(args_iter),
    )?
    else {
        return Ok(());
    };

    let config = PipelineConfig {
        min_wave_support: cli.min_wave_support,
        ..PipelineConfig::default()
    };
    let pipeline = Pipeline::new(config)?;
    let output = pipeline.run(&sample_corpus());

    if cli.json {
        for row in &output.labels {
            println!("{}", serde_json::to_string(row)?);
        }
        if cli.show_audit {
            println!("{}", serde_json::to_string(&output.audit)?);
        }
        return Ok(());
    }

    println!("=== standardized labels ===");
    println!("min wave support: {}", cli.min_wave_support);
    for row in &output.labels {
        println!(
            "  {} [{}] => {}",
            row.variable_id, row.group_tag, row.var_label_std
        );
    }
    println!();

    println!("--- rows by group ---");
    let counts = rows_per_group(&output);
    if let Some(coverage) = group_coverage(&counts) {
        for entry in &coverage.per_group {
            println!(
                "{}: count={} share={:.2}",
                entry.group, entry.count, entry.share
            );
        }
        println!(
            "coverage: groups={} total={} min={} max={} mean={:.2}",
            coverage.groups, coverage.total, coverage.min, coverage.max, coverage.mean
        );
    } else {
        println!("no rows survived filtering");
    }
    println!();

    let silent = unused_rules(pipeline.rules(), &output.rule_usage);
    println!(
        "dictionary rules never fired: {} of {}",
        silent.len(),
        pipeline.rules().len()
    );

    if cli.show_audit {
        println!();
        println!("=== audit ===");
        for exclusion in &output.audit.exclusions {
            println!(
                "  excluded {} reason={}",
                exclusion.variable_id,
                exclusion.reason.tag()
            );
        }
        for flag in &output.audit.ambiguities {
            println!(
                "  ambiguous {} token={} resolved_to={} (also: {})",
                flag.variable_id, flag.token, flag.resolved_to, flag.alternate_reading
            );
        }
        for drop in &output.audit.keyword_drops {
            println!(
                "  dropped keyword '{}' in group '{}' wave_support={} (needs {})",
                drop.keyword, drop.group_tag, drop.wave_support, drop.min_wave_support
            );
        }
    }

    Ok(())
}

/// Value-scale classification report over the bundled sample corpus.
pub fn run_scale_report<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let Some(cli) =
        parse_cli::<ScaleReportCli, _>(std::iter::once("scale_report".to_string()).chain(args_iter))?
    else {
        return Ok(());
    };

    let pipeline = Pipeline::new(PipelineConfig::default())?;
    let output = pipeline.run(&sample_corpus());

    if cli.json {
        for row in &output.scales {
            println!("{}", serde_json::to_string(row)?);
        }
        return Ok(());
    }

    println!("=== value scales ===");
    for row in &output.scales {
        println!("  {} => {}", row.variable_id, row.values_type);
    }
    println!();

    println!("--- rows by archetype ---");
    let mut counts: Vec<(String, usize)> = Vec::new();
    for row in &output.scales {
        let tag = row.values_type.to_string();
        match counts.iter_mut().find(|(existing, _)| *existing == tag) {
            Some((_, count)) => *count += 1,
            None => counts.push((tag, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    for (tag, count) in counts {
        println!("{tag}: count={count}");
    }

    Ok(())
}

/// Bundled sample corpus: six survey waves of trust, satisfaction, and
/// membership metadata, phrased the inconsistent way real wave files are.
///
/// The corpus deliberately includes a structural weighting variable, an
/// ungrouped variable, a low-support topic present in only two waves, and
/// the ambiguous "dk" token, so the demos show every audit path.
pub fn sample_corpus() -> Vec<VariableRecord> {
    let waves = ["za0987", "za1036", "za1209", "za1321", "za1525", "za1715"];
    let mut records = Vec::new();
    for (index, wave) in waves.iter().enumerate() {
        let trust_label = if index % 2 == 0 {
            "q5_trust_nat_parl"
        } else {
            "trust_in_national_parliament"
        };
        records.push(record(
            wave,
            "v10",
            trust_label,
            Some("trust in institutions"),
            Some("Tend to trust, tend not to trust"),
        ));
        records.push(record(
            wave,
            "v11",
            "qa7_trust_european_commission",
            Some("trust in institutions"),
            Some("Tend to trust, tend not to trust"),
        ));
        let satisfaction_label = if index % 2 == 0 {
            "d2_life_satisf"
        } else {
            "d2_satisf_life"
        };
        records.push(record(
            wave,
            "v20",
            satisfaction_label,
            Some("life satisfaction"),
            Some("Very satisfied, fairly satisfied, not very satisfied, not at all satisfied"),
        ));
        let placement_label = if index < 5 {
            "d1_left_right_scale_4_cat"
        } else {
            "d1_left_right_scale"
        };
        records.push(record(
            wave,
            "v30",
            placement_label,
            Some("ideology"),
            Some("Left-right self-placement 1 to 10"),
        ));
        if index < 5 {
            records.push(record(
                wave,
                "v50",
                "q8_dk_eu_membership_opinion",
                Some("membership"),
                Some("A good thing, bad thing, neither nor"),
            ));
        }
        if index < 2 {
            records.push(record(
                wave,
                "v40",
                "qa12_biotechnology_information",
                Some("science"),
                None,
            ));
        }
    }
    records.push(record(
        "za0987",
        "w1",
        "weighting_factor_europe",
        Some("protocol"),
        None,
    ));
    records.push(record("za1036", "x1", "country_of_interview", None, None));
    records
}

fn record(
    wave: &str,
    name: &str,
    label: &str,
    group: Option<&str>,
    values: Option<&str>,
) -> VariableRecord {
    VariableRecord {
        wave_id: wave.to_string(),
        variable_name: name.to_string(),
        raw_label: label.to_uppercase().replace('_', " "),
        normalized_label: label.to_string(),
        group_tag: group.map(|tag| tag.to_string()),
        value_range_text: values.map(|text| text.to_string()),
    }
}

fn parse_positive_usize(raw: &str) -> Result<usize, String> {
    let parsed = raw.parse::<usize>().map_err(|_| {
        format!(
            "Could not parse --min-wave-support value '{}' as a positive integer",
            raw
        )
    })?;
    if parsed == 0 {
        return Err("--min-wave-support must be greater than zero".to_string());
    }
    Ok(parsed)
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}
