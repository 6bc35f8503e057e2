use clap::{Args as ClapArgs, Parser, Subcommand};
use finora_core::api::BUDGET_CATEGORIES;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "finora", version, about = "Finora personal finance client")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Override the API base address for this invocation.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct SignupArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,

    /// Must match `--password`.
    #[arg(long)]
    pub confirm_password: String,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct VerifyArgs {
    /// Token to check. Without it the stored session is verified and
    /// cleared if the server rejects it.
    #[arg(long)]
    pub token: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct OnboardArgs {
    /// Print the option catalogue and exit.
    #[arg(long)]
    pub list: bool,

    /// Option id from the catalogue. Can be specified multiple times.
    #[arg(long = "id", action = clap::ArgAction::Append)]
    pub ids: Vec<u32>,

    /// Option name, case-insensitive. Can be specified multiple times.
    #[arg(long = "select", action = clap::ArgAction::Append)]
    pub names: Vec<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct PeriodArgs {
    /// Defaults to the current year.
    #[arg(long)]
    pub year: Option<i32>,

    /// 1-12, defaults to the current month.
    #[arg(long)]
    pub month: Option<u32>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct BudgetAddArgs {
    #[arg(long, value_parser = parse_category)]
    pub category: String,

    #[arg(long)]
    pub target: f64,

    #[command(flatten)]
    pub period: PeriodArgs,
}

#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// Show category targets for a month.
    List(PeriodArgs),
    /// Add a category target for a month.
    Add(BudgetAddArgs),
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Login(LoginArgs),
    Signup(SignupArgs),
    /// Verify a token, or the stored session when none is given.
    Verify(VerifyArgs),
    Logout,
    /// Print the stored session.
    Status,
    /// Send the income and expense sources picked after signup.
    Onboard(OnboardArgs),
    #[command(subcommand)]
    Budget(BudgetCommands),
    /// Monthly spending summary.
    Report,
}

/// Accepts a known budget category in any letter case.
pub fn parse_category(value: &str) -> Result<String, String> {
    BUDGET_CATEGORIES
        .iter()
        .find(|c| c.eq_ignore_ascii_case(value.trim()))
        .map(|c| c.to_string())
        .ok_or_else(|| {
            format!(
                "unknown category, expected one of: {}",
                BUDGET_CATEGORIES.join(", ")
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category(" food ").unwrap(), "Food");
        assert!(parse_category("Rent").unwrap_err().contains("Healthcare"));
    }

    #[test]
    fn test_budget_add_args() {
        let args = Args::try_parse_from([
            "finora", "budget", "add", "--category", "bills", "--target", "120.5", "--month", "3",
        ])
        .unwrap();
        match args.command {
            Commands::Budget(BudgetCommands::Add(add)) => {
                assert_eq!(add.category, "Bills");
                assert_eq!(add.target, 120.5);
                assert_eq!(add.period.month, Some(3));
                assert_eq!(add.period.year, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_global_format_after_subcommand() {
        let args = Args::try_parse_from(["finora", "status", "--format", "json"]).unwrap();
        assert_eq!(args.format, OutputFormat::Json);
    }
}
