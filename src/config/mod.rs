use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, Validate,
};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "survey-calc")]
#[command(about = "Boundary survey cost calculator for cadastral land parcels")]
pub struct CliConfig {
    /// Cadastral number of the parcel, e.g. 77:09:0005004:1234
    pub cadastral_number: String,

    #[arg(long, default_value = crate::adapters::nspd::DEFAULT_ENDPOINT)]
    pub endpoint: String,

    #[arg(long, help = "Use fabricated demo data instead of the NSPD registry")]
    pub demo: bool,

    #[arg(long, default_value = "10")]
    pub timeout_secs: u64,

    #[arg(long, help = "Print the parcel record as JSON")]
    pub json: bool,

    #[arg(long, short, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    fn demo_mode(&self) -> bool {
        self.demo
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        // The grammar of the cadastral number itself is checked by the
        // session controller; here only argument plumbing is validated.
        validate_non_empty_string("cadastral_number", &self.cadastral_number)?;
        validate_url("endpoint", &self.endpoint)?;
        validate_positive_number("timeout_secs", self.timeout_secs, 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliConfig {
        CliConfig::try_parse_from(args).expect("args parse")
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["survey-calc", "77:09:0005004:1234"]);
        assert_eq!(config.endpoint, "https://nspd.gov.ru");
        assert_eq!(config.timeout_secs, 10);
        assert!(!config.demo);
        assert!(!config.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_endpoint() {
        let config = parse(&[
            "survey-calc",
            "77:09:0005004:1234",
            "--endpoint",
            "ftp://nspd.gov.ru",
        ]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let config = parse(&[
            "survey-calc",
            "77:09:0005004:1234",
            "--timeout-secs",
            "0",
        ]);
        assert!(config.validate().is_err());
    }
}
