use crate::commands::cli::{OnboardArgs, OutputFormat};
use crate::commands::{print_json, require_session};
use finora_core::api::{ApiError, CliError, OnboardingSelection, ONBOARDING_STEPS};
use finora_plugins::FinoraServices;

fn print_catalogue() {
    for step in ONBOARDING_STEPS.iter() {
        println!("{}", step.title);
        println!("  {}", step.subtitle);
        for opt in step.options {
            println!("  [{:>2}] {}", opt.id, opt.name);
        }
        println!();
    }
}

pub fn build_selection(args: &OnboardArgs) -> Result<OnboardingSelection, ApiError> {
    let mut selection = OnboardingSelection::new();
    for id in &args.ids {
        if !selection.is_selected(*id) {
            selection.toggle(*id).map_err(|e| ApiError::Validation(e.into()))?;
        }
    }
    for name in &args.names {
        selection
            .select_by_name(name)
            .map_err(|e| ApiError::Validation(e.into()))?;
    }
    Ok(selection)
}

pub async fn handle_onboard(
    args: OnboardArgs,
    services: &FinoraServices,
    format: OutputFormat,
) -> Result<(), CliError> {
    if args.list {
        print_catalogue();
        return Ok(());
    }

    let payload = build_selection(&args)?.to_payload();
    if payload.income_sources.is_empty() && payload.expense_sources.is_empty() {
        return Err(CliError::Command(
            "select at least one option with --id or --select (see --list)".to_string(),
        ));
    }
    require_session(services).await?;

    let body = services
        .auth
        .update_income_and_expense_sources(payload.clone())
        .await?;
    match format {
        OutputFormat::Json => print_json(&body)?,
        OutputFormat::Text => {
            println!("Income sources:  {}", payload.income_sources.join(", "));
            println!("Expense sources: {}", payload.expense_sources.join(", "));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_selection_merges_ids_and_names() {
        let args = OnboardArgs {
            list: false,
            ids: vec![1, 1, 12],
            names: vec!["rental income".to_string()],
        };
        let payload = build_selection(&args).unwrap().to_payload();
        assert_eq!(
            payload.income_sources,
            vec!["Full-time Employment", "Rental Income"]
        );
        assert_eq!(payload.expense_sources, vec!["Shopping"]);
    }

    #[test]
    fn test_build_selection_rejects_unknown() {
        let args = OnboardArgs {
            list: false,
            ids: vec![42],
            names: vec![],
        };
        assert!(matches!(
            build_selection(&args),
            Err(ApiError::Validation(_))
        ));
    }
}
