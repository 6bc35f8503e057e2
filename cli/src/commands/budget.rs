//! Budget and dashboard report commands.
use crate::commands::cli::{BudgetAddArgs, BudgetCommands, OutputFormat, PeriodArgs};
use crate::commands::{print_json, require_session};
use chrono::{Datelike, Local};
use finora_core::api::{BudgetPeriod, CliError, NewBudget};
use finora_plugins::FinoraServices;

pub fn resolve_period(args: &PeriodArgs) -> BudgetPeriod {
    let today = Local::now().date_naive();
    BudgetPeriod {
        year: args.year.unwrap_or_else(|| today.year()),
        month: args.month.unwrap_or_else(|| today.month()),
    }
}

pub async fn handle_budget(
    cmd: BudgetCommands,
    services: &FinoraServices,
    format: OutputFormat,
) -> Result<(), CliError> {
    require_session(services).await?;
    match cmd {
        BudgetCommands::List(period) => list(resolve_period(&period), services, format).await,
        BudgetCommands::Add(args) => add(args, services, format).await,
    }
}

async fn list(
    period: BudgetPeriod,
    services: &FinoraServices,
    format: OutputFormat,
) -> Result<(), CliError> {
    let sheet = services.budgets.list(period).await?;
    if format == OutputFormat::Json {
        return print_json(&sheet);
    }

    match sheet {
        Some(sheet) if !sheet.categories.is_empty() => {
            println!("Budget {}-{:02}", period.year, period.month);
            for category in &sheet.categories {
                println!("  {:<16} {:>10.2}", category.name, category.target);
            }
            println!("  {:<16} {:>10.2}", "Total", sheet.total_target());
        }
        _ => println!("No budget set for {}-{:02}", period.year, period.month),
    }
    Ok(())
}

async fn add(
    args: BudgetAddArgs,
    services: &FinoraServices,
    format: OutputFormat,
) -> Result<(), CliError> {
    let period = resolve_period(&args.period);
    let body = services
        .budgets
        .add(NewBudget::single(period, args.category.clone(), args.target))
        .await?;
    match format {
        OutputFormat::Json => print_json(&body)?,
        OutputFormat::Text => println!(
            "Set {} to {:.2} for {}-{:02}",
            args.category, args.target, period.year, period.month
        ),
    }
    Ok(())
}

pub async fn handle_report(
    services: &FinoraServices,
    format: OutputFormat,
) -> Result<(), CliError> {
    require_session(services).await?;
    let report = services.reports.monthly().await?;
    if format == OutputFormat::Json {
        return print_json(&report);
    }

    let Some(report) = report else {
        println!("No expenses recorded this month");
        return Ok(());
    };
    println!("Spent this month: {:.2}", report.total_amount);
    for (category, total) in report.totals_by_category() {
        println!("  {:<16} {:>10.2}", category, total);
    }
    if !report.expenses.is_empty() {
        println!();
        for expense in &report.expenses {
            println!(
                "  {}  {:<16} {:>10.2}  {}",
                expense.date, expense.category, expense.amount, expense.description
            );
        }
    }
    Ok(())
}
