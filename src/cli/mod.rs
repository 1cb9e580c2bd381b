pub mod generate;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "rooflink",
    version,
    about = "Render a contractor insurance estimate from JSON into a print-ready PDF."
)]
pub struct Cli {
    /// Base name of the estimate JSON in the data directory (default from settings)
    #[arg(long)]
    pub data: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_flag_is_optional() {
        let cli = Cli::try_parse_from(["rooflink"]).unwrap();
        assert!(cli.data.is_none());
        let cli = Cli::try_parse_from(["rooflink", "--data", "jane-doe"]).unwrap();
        assert_eq!(cli.data.as_deref(), Some("jane-doe"));
    }

    #[test]
    fn test_rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["rooflink", "--output", "x"]).is_err());
    }
}
