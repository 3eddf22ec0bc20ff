//! glance - lunar date labels and widget geometry from the command line.
//!
//! This is the main binary; the work happens in the `glance-lunar`,
//! `glance-metrics` and `glance-config` crates.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use glance_config::{Config, DisplayConfig};
use glance_lunar::{LunarDate, LunarDateLabels, LunarTable};
use glance_metrics::{
    CropPosition, CropRect, DeviceMetricsTable, LookupOptions, MatchSource, Resolution,
    SizeRecord, WidgetFamily,
};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "glance", version)]
#[command(about = "Lunar calendar labels and home-screen widget geometry", long_about = None)]
struct Cli {
    /// Configuration file to use instead of the default search
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the lunar date of a Gregorian date (today by default)
    Lunar {
        /// Date as YYYY-MM-DD
        date: Option<NaiveDate>,
    },
    /// Show the widget sizes for a screen height
    Metrics(MetricsArgs),
    /// List the known devices
    Devices,
    /// Show where a widget sits on a home-screen screenshot
    Crop {
        #[command(flatten)]
        metrics: MetricsArgs,
        /// small, medium, large or extra_large
        family: WidgetFamily,
        /// e.g. top_left, middle, bottom
        position: CropPosition,
    },
}

#[derive(Args, Debug)]
struct MetricsArgs {
    /// Screen height in pixels
    height: u32,

    /// Look up as the host app's preview rather than a home-screen widget
    #[arg(long, conflicts_with = "widget")]
    preview: bool,

    /// Look up as a home-screen widget, even if the configuration says preview
    #[arg(long)]
    widget: bool,

    /// Pixels per point, overriding the configured scale
    #[arg(long)]
    scale: Option<u32>,
}

impl MetricsArgs {
    fn lookup_options(&self, display: DisplayConfig) -> anyhow::Result<LookupOptions> {
        let display = DisplayConfig {
            running_as_extension: match (self.preview, self.widget) {
                (true, _) => false,
                (_, true) => true,
                _ => display.running_as_extension,
            },
            scale: self.scale.unwrap_or(display.scale),
        };
        display.validate()?;
        Ok(LookupOptions {
            running_as_extension: display.running_as_extension,
            scale: display.scale,
        })
    }
}

#[derive(Debug, Serialize)]
struct LunarReport {
    date: NaiveDate,
    lunar: LunarDate,
    labels: LunarDateLabels,
    zodiac: &'static str,
}

#[derive(Debug, Serialize)]
struct MetricsReport<'a> {
    height: u32,
    device: Option<&'a str>,
    source: MatchSource,
    record: SizeRecord,
}

#[derive(Debug, Serialize)]
struct DeviceReport<'a> {
    height: u32,
    name: &'a str,
    record: SizeRecord,
}

#[derive(Debug, Serialize)]
struct CropReport {
    height: u32,
    family: WidgetFamily,
    position: CropPosition,
    source: MatchSource,
    rect: CropRect,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), |name| std::env::var(name).ok())?;
    debug!(?config, "effective configuration");

    let output = match &cli.command {
        Command::Lunar { date } => {
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            lunar(date, cli.json)?
        }
        Command::Metrics(args) => {
            let table = device_table(&config)?;
            metrics(&table, args, config.display, cli.json)?
        }
        Command::Devices => {
            let table = device_table(&config)?;
            devices(&table, cli.json)?
        }
        Command::Crop {
            metrics: args,
            family,
            position,
        } => {
            let table = device_table(&config)?;
            crop(&table, args, *family, *position, config.display, cli.json)?
        }
    };

    println!("{output}");
    Ok(())
}

/// Loads the configuration from `path`, or from the default search when none
/// is given. Environment overrides from `env` apply on top of an explicit file.
fn load_config(
    path: Option<&Path>,
    env: impl Fn(&'static str) -> Option<String>,
) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Config::load().context("failed to load configuration");
    };
    let config = Config::load_from(path)
        .with_context(|| format!("failed to load configuration from {}", path.display()))?
        .with_env_overrides(env)?;
    config.validate()?;
    Ok(config)
}

/// Returns the builtin table, extended with the configured device file if any.
fn device_table(config: &Config) -> anyhow::Result<Cow<'static, DeviceMetricsTable>> {
    let Some(path) = &config.device_table else {
        return Ok(Cow::Borrowed(DeviceMetricsTable::shared()));
    };
    let extra = DeviceMetricsTable::load_from(path)
        .with_context(|| format!("failed to load device table from {}", path.display()))?;
    let mut table = DeviceMetricsTable::builtin();
    table.merge(extra);
    Ok(Cow::Owned(table))
}

fn lunar(date: NaiveDate, json: bool) -> anyhow::Result<String> {
    let lunar = LunarTable::builtin()
        .lunar_date(date)
        .with_context(|| format!("cannot convert {date}"))?;
    let report = LunarReport {
        date,
        lunar,
        labels: lunar.labels(),
        zodiac: lunar.zodiac(),
    };

    if json {
        return Ok(serde_json::to_string_pretty(&report)?);
    }
    let LunarDateLabels { year, month, day } = &report.labels;
    Ok(format!(
        "{date}  {year}({zodiac})年 {month}{day}",
        zodiac = report.zodiac
    ))
}

fn metrics(
    table: &DeviceMetricsTable,
    args: &MetricsArgs,
    display: DisplayConfig,
    json: bool,
) -> anyhow::Result<String> {
    let Resolution { source, record } = table.resolve(args.height, args.lookup_options(display)?);
    let report = MetricsReport {
        height: args.height,
        device: table.get(args.height).map(|d| d.name.as_str()),
        source,
        record,
    };

    if json {
        return Ok(serde_json::to_string_pretty(&report)?);
    }
    let mut lines = vec![format!(
        "{}px: {}",
        report.height,
        report.device.unwrap_or(source_description(source))
    )];
    for family in WidgetFamily::ALL {
        if let Some((width, height)) = record.widget_size(family) {
            lines.push(format!("  {family:<11} {width} x {height}"));
        }
    }
    Ok(lines.join("\n"))
}

fn devices(table: &DeviceMetricsTable, json: bool) -> anyhow::Result<String> {
    let reports: Vec<DeviceReport<'_>> = table
        .iter()
        .map(|(height, device)| DeviceReport {
            height,
            name: &device.name,
            record: device.record,
        })
        .collect();

    if json {
        return Ok(serde_json::to_string_pretty(&reports)?);
    }
    Ok(reports
        .iter()
        .map(|d| format!("{:>5}px  {}", d.height, d.name))
        .collect::<Vec<_>>()
        .join("\n"))
}

fn crop(
    table: &DeviceMetricsTable,
    args: &MetricsArgs,
    family: WidgetFamily,
    position: CropPosition,
    display: DisplayConfig,
    json: bool,
) -> anyhow::Result<String> {
    let Resolution { source, record } = table.resolve(args.height, args.lookup_options(display)?);
    let Some(rect) = record.crop(family, position) else {
        if record.anchors.is_none() {
            bail!("no widget grid offsets known for screen height {}", args.height);
        }
        bail!("a {family} widget cannot sit at {position:?}");
    };
    let report = CropReport {
        height: args.height,
        family,
        position,
        source,
        rect,
    };

    if json {
        return Ok(serde_json::to_string_pretty(&report)?);
    }
    Ok(format!(
        "x={} y={} width={} height={}",
        rect.x, rect.y, rect.width, rect.height
    ))
}

fn source_description(source: MatchSource) -> &'static str {
    match source {
        MatchSource::Exact => "known device",
        MatchSource::ExtensionFallback => "unknown device, scaled generic sizes",
        MatchSource::DesignFallback => "unknown device, design reference sizes",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn args(height: u32) -> MetricsArgs {
        MetricsArgs {
            height,
            preview: false,
            widget: false,
            scale: None,
        }
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_crop_command() {
        let cli = Cli::try_parse_from([
            "glance", "crop", "2532", "medium", "middle", "--scale", "2", "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Command::Crop {
                metrics,
                family,
                position,
            } => {
                assert_eq!(metrics.height, 2532);
                assert_eq!(metrics.scale, Some(2));
                assert_eq!(family, WidgetFamily::Medium);
                assert_eq!(position, CropPosition::Middle);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn preview_and_widget_conflict() {
        assert!(Cli::try_parse_from(["glance", "metrics", "2532", "--preview", "--widget"]).is_err());
        assert!(Cli::try_parse_from(["glance", "metrics", "2532", "--widget"]).is_ok());
    }

    #[test]
    fn explicit_config_file_with_env_layering() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("custom.json5");
        std::fs::write(
            &path,
            r#"{ display: { running_as_extension: false, scale: 2 }, device_table: "devices.json5" }"#,
        )
        .unwrap();

        let config = load_config(Some(path.as_path()), |_| None).unwrap();
        assert!(!config.display.running_as_extension);
        assert_eq!(config.display.scale, 2);
        assert_eq!(config.device_table, Some(dir.path().join("devices.json5")));

        let config = load_config(Some(path.as_path()), |name| {
            (name == glance_config::ENV_SCALE).then(|| "4".to_string())
        })
        .unwrap();
        assert_eq!(config.display.scale, 4);

        let err = load_config(Some(path.as_path()), |name| {
            (name == glance_config::ENV_SCALE).then(|| "9".to_string())
        })
        .unwrap_err();
        assert!(err.to_string().contains("scale"));
    }

    #[test]
    fn explicit_config_file_missing() {
        let err = load_config(Some(Path::new("/nonexistent/glance.json5")), |_| None).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/glance.json5"));
    }

    #[test]
    fn configured_device_table_feeds_devices_listing() {
        let dir = tempfile::TempDir::new().unwrap();
        let table_path = dir.path().join("devices.json5");
        std::fs::write(
            &table_path,
            r#"{ devices: { "3000": { name: "Test phone", small: 520, medium: 1100, large: 1160 } } }"#,
        )
        .unwrap();
        let config = Config {
            device_table: Some(table_path),
            ..Config::default()
        };

        let table = device_table(&config).unwrap();
        let out = devices(&table, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let list = value.as_array().unwrap();
        assert_eq!(list.len(), DeviceMetricsTable::builtin().len() + 1);
        assert_eq!(list.last().unwrap()["name"], "Test phone");
        assert_eq!(list.first().unwrap()["height"], 1136);
    }

    #[test]
    fn devices_text_listing() {
        let out = devices(DeviceMetricsTable::shared(), false).unwrap();
        let first = out.lines().next().unwrap();
        assert_eq!(first, " 1136px  iPhone 5 / SE (1st gen)");
    }

    #[test]
    fn rejects_bad_date() {
        assert!(Cli::try_parse_from(["glance", "lunar", "2023-02-30"]).is_err());
    }

    #[test]
    fn lunar_text_output() {
        let date = NaiveDate::from_ymd_opt(2023, 3, 22).unwrap();
        assert_eq!(lunar(date, false).unwrap(), "2023-03-22  癸卯(兔)年 闰二月初一");
    }

    #[test]
    fn lunar_json_output() {
        let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let value: serde_json::Value = serde_json::from_str(&lunar(date, true).unwrap()).unwrap();
        assert_eq!(value["labels"]["year"], "己卯");
        assert_eq!(value["labels"]["month"], "冬月");
        assert_eq!(value["labels"]["day"], "廿五");
        assert_eq!(value["lunar"]["year"], 1999);
    }

    #[test]
    fn lunar_out_of_range_fails() {
        let date = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap();
        assert!(lunar(date, false).is_err());
    }

    #[test]
    fn flags_override_display_config() {
        let display = DisplayConfig::with_scale(3);
        let mut a = args(1000);
        a.scale = Some(2);
        assert_eq!(a.lookup_options(display).unwrap(), LookupOptions::extension(2));

        a.preview = true;
        assert!(!a.lookup_options(display).unwrap().running_as_extension);

        // --widget restores widget lookups over a preview configuration.
        let mut b = args(1000);
        b.widget = true;
        let options = b.lookup_options(DisplayConfig::preview()).unwrap();
        assert!(options.running_as_extension);
        assert!(!args(1000).lookup_options(DisplayConfig::preview()).unwrap().running_as_extension);

        a.scale = Some(0);
        assert!(a.lookup_options(display).is_err());
    }

    #[test]
    fn metrics_for_unknown_device() {
        let table = DeviceMetricsTable::builtin();
        let out = metrics(&table, &args(1000), DisplayConfig::with_scale(2), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["source"], "extension_fallback");
        assert_eq!(value["record"]["small"], 310);
        assert!(value["device"].is_null());
    }

    #[test]
    fn metrics_text_aligns_family_names() {
        let table = DeviceMetricsTable::builtin();
        let out = metrics(&table, &args(2532), DisplayConfig::default(), false).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("2532px: iPhone 12"));
        assert_eq!(&lines[1][..14], "  small       ");
        assert!(lines[1].ends_with("474 x 474"));
    }

    #[test]
    fn crop_known_device() {
        let table = DeviceMetricsTable::builtin();
        let out = crop(
            &table,
            &args(2532),
            WidgetFamily::Small,
            CropPosition::TopLeft,
            DisplayConfig::default(),
            false,
        )
        .unwrap();
        assert_eq!(out, "x=78 y=231 width=474 height=474");
    }

    #[test]
    fn crop_without_anchors_fails() {
        let table = DeviceMetricsTable::builtin();
        let err = crop(
            &table,
            &args(1000),
            WidgetFamily::Small,
            CropPosition::TopLeft,
            DisplayConfig::default(),
            false,
        )
        .unwrap_err();
        assert!(err.to_string().contains("no widget grid offsets"));
    }
}
