use std::sync::Arc;

use super::models::{MonthlyReport, ReportEnvelope};
use super::paths;
use crate::error::ApiError;
use crate::transport::{decode_body, ApiRequest, ApiTransport};

/// Dashboard aggregate: monthly total plus the expense list.
#[derive(Clone)]
pub struct ReportService {
    transport: Arc<dyn ApiTransport>,
}

impl ReportService {
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self { transport }
    }

    /// `Ok(None)` when the server has no report (`null` body or `data: null`).
    /// A body without the `data` envelope is a decode error.
    pub async fn monthly(&self) -> Result<Option<MonthlyReport>, ApiError> {
        let body = self
            .transport
            .send(ApiRequest::get(paths::EXPENSE_REPORT))
            .await?;
        if body.is_null() {
            return Ok(None);
        }
        if body.get("data").is_none() {
            return Err(ApiError::Decode {
                status: None,
                url: paths::EXPENSE_REPORT.to_string(),
                message: "missing `data` envelope in report response".to_string(),
            });
        }
        let envelope: ReportEnvelope = decode_body(paths::EXPENSE_REPORT, body)?;
        let Some(report) = envelope.data else {
            return Ok(None);
        };
        tracing::debug!(
            target: "finora.report",
            stage = "report.monthly.out",
            expenses = report.expenses.len(),
            total = report.total_amount
        );
        Ok(Some(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedTransport;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_monthly_report_decodes_data_envelope() {
        let transport = ScriptedTransport::new(vec![Ok(json!({
            "data": {
                "totalAmount": 42.5,
                "expenses": [
                    {"_id": "e1", "category": "Food", "description": "lunch", "amount": 42.5, "date": "2026-10-01"}
                ]
            }
        }))]);
        let reports = ReportService::new(transport.clone());

        let report = reports.monthly().await.unwrap().unwrap();
        assert_eq!(report.total_amount, 42.5);
        assert_eq!(report.expenses[0].category, "Food");
        assert_eq!(transport.requests()[0].path, "/expenses/report");
    }

    #[tokio::test]
    async fn test_monthly_report_null_data_is_none() {
        let transport = ScriptedTransport::new(vec![Ok(json!({"data": null})), Ok(Value::Null)]);
        let reports = ReportService::new(transport);
        assert!(reports.monthly().await.unwrap().is_none());
        assert!(reports.monthly().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unwrapped_report_is_not_read_as_zero() {
        let transport = ScriptedTransport::new(vec![Ok(json!({
            "totalAmount": 42.5,
            "expenses": []
        }))]);
        let reports = ReportService::new(transport);
        let err = reports.monthly().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn test_monthly_report_decode_error() {
        let transport = ScriptedTransport::new(vec![Ok(json!({"data": {"expenses": "nope"}}))]);
        let reports = ReportService::new(transport);
        let err = reports.monthly().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }
}
