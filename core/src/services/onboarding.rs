//! Onboarding catalogue: income and expense sources picked after signup.

use std::collections::BTreeSet;

use super::models::IncomeExpenseSources;
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Income,
    Expense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnboardingOption {
    pub id: u32,
    pub name: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct OnboardingStep {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub kind: SourceKind,
    pub options: &'static [OnboardingOption],
}

pub const ONBOARDING_STEPS: [OnboardingStep; 3] = [
    OnboardingStep {
        title: "What's your main income?",
        subtitle: "Select your primary source of income",
        kind: SourceKind::Income,
        options: &[
            OnboardingOption { id: 1, name: "Full-time Employment" },
            OnboardingOption { id: 2, name: "Business Owner" },
            OnboardingOption { id: 3, name: "Freelancer" },
            OnboardingOption { id: 4, name: "Student" },
        ],
    },
    OnboardingStep {
        title: "Any additional income?",
        subtitle: "Select other sources of income (optional)",
        kind: SourceKind::Income,
        options: &[
            OnboardingOption { id: 5, name: "Investments" },
            OnboardingOption { id: 6, name: "Rental Income" },
            OnboardingOption { id: 7, name: "Part-time Work" },
            OnboardingOption { id: 8, name: "Other" },
        ],
    },
    OnboardingStep {
        title: "What do you spend on?",
        subtitle: "Select your main expense categories",
        kind: SourceKind::Expense,
        options: &[
            OnboardingOption { id: 9, name: "Housing" },
            OnboardingOption { id: 10, name: "Transportation" },
            OnboardingOption { id: 11, name: "Food & Dining" },
            OnboardingOption { id: 12, name: "Shopping" },
            OnboardingOption { id: 13, name: "Entertainment" },
            OnboardingOption { id: 14, name: "Bills & Utilities" },
        ],
    },
];

fn find(id: u32) -> Option<(SourceKind, &'static OnboardingOption)> {
    ONBOARDING_STEPS.iter().find_map(|step| {
        step.options
            .iter()
            .find(|opt| opt.id == id)
            .map(|opt| (step.kind, opt))
    })
}

/// Option ids picked across all steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnboardingSelection {
    selected: BTreeSet<u32>,
}

impl OnboardingSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip an option; returns whether it is now selected.
    pub fn toggle(&mut self, id: u32) -> Result<bool, ValidationError> {
        if find(id).is_none() {
            return Err(ValidationError::UnknownOption(id.to_string()));
        }
        if self.selected.remove(&id) {
            Ok(false)
        } else {
            self.selected.insert(id);
            Ok(true)
        }
    }

    /// Select an option by its display name, ignoring case.
    pub fn select_by_name(&mut self, name: &str) -> Result<(), ValidationError> {
        let wanted = name.trim();
        let id = ONBOARDING_STEPS
            .iter()
            .flat_map(|step| step.options.iter())
            .find(|opt| opt.name.eq_ignore_ascii_case(wanted))
            .map(|opt| opt.id)
            .ok_or_else(|| ValidationError::UnknownOption(wanted.to_string()))?;
        self.selected.insert(id);
        Ok(())
    }

    pub fn is_selected(&self, id: u32) -> bool {
        self.selected.contains(&id)
    }

    /// Names grouped by kind, in option id order.
    pub fn to_payload(&self) -> IncomeExpenseSources {
        let mut payload = IncomeExpenseSources::default();
        for (kind, opt) in self.selected.iter().filter_map(|id| find(*id)) {
            match kind {
                SourceKind::Income => payload.income_sources.push(opt.name.to_string()),
                SourceKind::Expense => payload.expense_sources.push(opt.name.to_string()),
            }
        }
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_payload_groups_by_kind() {
        let mut selection = OnboardingSelection::new();
        selection.toggle(11).unwrap();
        selection.toggle(5).unwrap();
        selection.toggle(3).unwrap();
        selection.toggle(9).unwrap();

        let payload = selection.to_payload();
        assert_eq!(payload.income_sources, vec!["Freelancer", "Investments"]);
        assert_eq!(payload.expense_sources, vec!["Housing", "Food & Dining"]);
    }

    #[test]
    fn test_toggle_twice_deselects() {
        let mut selection = OnboardingSelection::new();
        assert!(selection.toggle(2).unwrap());
        assert!(!selection.toggle(2).unwrap());
        assert!(!selection.is_selected(2));
    }

    #[test]
    fn test_unknown_options_are_rejected() {
        let mut selection = OnboardingSelection::new();
        assert_eq!(
            selection.toggle(99),
            Err(ValidationError::UnknownOption("99".to_string()))
        );
        assert!(selection.select_by_name("lottery").is_err());
        selection.select_by_name("bills & utilities").unwrap();
        assert!(selection.is_selected(14));
    }
}
