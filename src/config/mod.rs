pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, OutputFormat};

#[cfg(feature = "cli")]
mod cli {
    use crate::config::toml_config::TomlConfig;
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
    use clap::{Parser, ValueEnum};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
    pub enum OutputFormat {
        Text,
        Json,
    }

    fn parse_date(value: &str) -> Result<NaiveDate, String> {
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
    }

    fn parse_time(value: &str) -> Result<NaiveTime, String> {
        NaiveTime::parse_from_str(value, "%H:%M").map_err(|e| format!("expected HH:MM: {}", e))
    }

    #[derive(Debug, Clone, Parser)]
    #[command(name = "qimen")]
    #[command(about = "Qimen Dunjia plate, fortune judgment and interpretation")]
    pub struct CliConfig {
        /// Question to divine
        #[arg(short, long)]
        pub question: String,

        /// Date of the plate (YYYY-MM-DD), defaults to today
        #[arg(long, value_parser = parse_date)]
        pub date: Option<NaiveDate>,

        /// Time of the plate (HH:MM), defaults to now
        #[arg(long, value_parser = parse_time)]
        pub time: Option<NaiveTime>,

        /// Path to TOML configuration file
        #[arg(short, long)]
        pub config: Option<String>,

        /// Override llm.endpoint from config
        #[arg(long)]
        pub endpoint: Option<String>,

        /// Override llm.model from config
        #[arg(long)]
        pub model: Option<String>,

        /// Skip the model call and use the local interpretation
        #[arg(long)]
        pub offline: bool,

        /// Seed the judgment draws for reproducible output
        #[arg(long)]
        pub seed: Option<u64>,

        #[arg(long, value_enum, default_value = "text")]
        pub format: OutputFormat,

        /// Enable verbose output
        #[arg(short, long)]
        pub verbose: bool,
    }

    impl CliConfig {
        /// Plate time: `--date`/`--time` where given, `now` for the rest.
        pub fn resolve_time(&self, now: NaiveDateTime) -> NaiveDateTime {
            let date = self.date.unwrap_or_else(|| now.date());
            let time = self.time.unwrap_or_else(|| now.time());
            date.and_time(time)
        }

        /// 套用命令列覆蓋設定
        pub fn apply_overrides(&self, config: &mut TomlConfig) {
            if let Some(endpoint) = &self.endpoint {
                tracing::info!("🔧 Endpoint overridden to: {}", endpoint);
                config.llm.endpoint = endpoint.clone();
            }
            if let Some(model) = &self.model {
                tracing::info!("🔧 Model overridden to: {}", model);
                config.llm.model = model.clone();
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_date_and_time() {
            let config = CliConfig::try_parse_from([
                "qimen",
                "--question",
                "How is my career this month?",
                "--date",
                "2024-03-15",
                "--time",
                "09:30",
            ])
            .unwrap();

            let now = NaiveDate::from_ymd_opt(2030, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap();
            let resolved = config.resolve_time(now);
            assert_eq!(resolved.format("%Y-%m-%d %H:%M").to_string(), "2024-03-15 09:30");
            assert_eq!(config.format, OutputFormat::Text);
            assert!(!config.offline);
        }

        #[test]
        fn test_missing_parts_default_to_now() {
            let config =
                CliConfig::try_parse_from(["qimen", "-q", "q", "--time", "21:05"]).unwrap();
            let now = NaiveDate::from_ymd_opt(2024, 7, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap();

            let resolved = config.resolve_time(now);
            assert_eq!(resolved.format("%Y-%m-%d %H:%M").to_string(), "2024-07-01 21:05");
        }

        #[test]
        fn test_rejects_malformed_date() {
            assert!(CliConfig::try_parse_from(["qimen", "-q", "q", "--date", "15/03/2024"]).is_err());
        }

        #[test]
        fn test_overrides_apply_to_config() {
            let cli = CliConfig::try_parse_from([
                "qimen", "-q", "q", "--model", "qwen-max", "--format", "json",
            ])
            .unwrap();
            let mut config = TomlConfig::default();

            cli.apply_overrides(&mut config);
            assert_eq!(config.llm.model, "qwen-max");
            assert_eq!(cli.format, OutputFormat::Json);
        }
    }
}
