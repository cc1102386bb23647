//! Bank account routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use chrono::{Datelike, NaiveDate, Utc};
use copro_core::ledger::{
    AccountBalance, BankAccount, LedgerService, MonthlyGrid, Operation, OperationKind, Statement,
};
use copro_core::store::find;
use copro_shared::types::{BankAccountId, OperationId, lenient};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use crate::{ApiResult, AppState};

/// Creates the bank account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route("/accounts/{account_id}/statement", get(statement))
        .route("/accounts/{account_id}/grid", get(grid))
        .route("/accounts/{account_id}/operations", post(record_operation))
        .route("/operations/{operation_id}", delete(delete_operation))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// An account with its current balance.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account record.
    #[serde(flatten)]
    pub account: BankAccount,
    /// Balance over every operation.
    pub balance: AccountBalance,
}

/// Request body for recording an operation.
#[derive(Debug, Deserialize)]
pub struct OperationRequest {
    /// Income or expense.
    pub kind: OperationKind,
    /// Positive amount.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub amount: Decimal,
    /// Accounting category code.
    #[serde(default)]
    pub category_code: String,
    /// Value date.
    pub date: NaiveDate,
    /// Free label.
    #[serde(default)]
    pub label: String,
}

/// Query string of the monthly grid.
#[derive(Debug, Deserialize)]
pub struct GridQuery {
    /// Calendar year, the current one by default.
    pub year: Option<i32>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/accounts` - List accounts with balances.
async fn list_accounts(State(state): State<AppState>) -> Json<Value> {
    let data = state.store.read().await;
    let accounts: Vec<AccountResponse> = data
        .accounts
        .iter()
        .map(|account| AccountResponse {
            balance: LedgerService::balance(account, &data.operations),
            account: account.clone(),
        })
        .collect();

    Json(json!({ "accounts": accounts }))
}

/// POST `/accounts` - Create a bank account.
async fn create_account(
    State(state): State<AppState>,
    Json(payload): Json<BankAccount>,
) -> ApiResult<(StatusCode, Json<BankAccount>)> {
    let account = BankAccount {
        id: BankAccountId::new(),
        ..payload
    };
    let account_id = account.id;
    let data = state.update(|d| d.with_account(account)).await;

    info!(%account_id, "Bank account created");
    Ok((StatusCode::CREATED, Json(find(&data.accounts, account_id)?.clone())))
}

/// GET `/accounts/{account_id}/statement` - Dated statement with running balance.
async fn statement(
    State(state): State<AppState>,
    Path(account_id): Path<BankAccountId>,
) -> ApiResult<Json<Statement>> {
    let data = state.store.read().await;
    Ok(Json(data.statement(account_id)?))
}

/// GET `/accounts/{account_id}/grid?year=` - Monthly sums per category code.
async fn grid(
    State(state): State<AppState>,
    Path(account_id): Path<BankAccountId>,
    Query(query): Query<GridQuery>,
) -> ApiResult<Json<MonthlyGrid>> {
    let year = query.year.unwrap_or_else(|| Utc::now().year());
    let data = state.store.read().await;
    Ok(Json(data.monthly_grid(account_id, year)?))
}

/// POST `/accounts/{account_id}/operations` - Record an operation.
async fn record_operation(
    State(state): State<AppState>,
    Path(account_id): Path<BankAccountId>,
    Json(payload): Json<OperationRequest>,
) -> ApiResult<(StatusCode, Json<Operation>)> {
    let operation = Operation {
        label: payload.label,
        ..Operation::new(
            account_id,
            payload.kind,
            payload.amount,
            payload.category_code,
            payload.date,
        )
    };
    let operation_id = operation.id;
    let data = state
        .apply(|d| d.record_operation(operation))
        .await?;

    info!(%account_id, %operation_id, "Operation recorded");
    Ok((StatusCode::CREATED, Json(find(&data.operations, operation_id)?.clone())))
}

/// DELETE `/operations/{operation_id}` - Delete an operation.
async fn delete_operation(
    State(state): State<AppState>,
    Path(operation_id): Path<OperationId>,
) -> ApiResult<StatusCode> {
    state.commit(|d| d.delete_operation(operation_id)).await?;

    info!(%operation_id, "Operation deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use copro_core::store::Dataset;
    use serde_json::json;

    use crate::test_support::{app, send};

    #[tokio::test]
    async fn test_account_flow() {
        let (_, app) = app(Dataset::default());

        let (status, account) = send(
            &app,
            "POST",
            "/api/v1/accounts",
            Some(json!({ "name": "Compte courant", "initial_balance": "1 000" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let account_id = account["id"].as_str().unwrap().to_string();
        let ops_uri = format!("/api/v1/accounts/{account_id}/operations");

        let (status, _) = send(
            &app,
            "POST",
            &ops_uri,
            Some(json!({ "kind": "expense", "amount": "250", "category_code": "601", "date": "2024-03-10" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let (_, income) = send(
            &app,
            "POST",
            &ops_uri,
            Some(json!({ "kind": "income", "amount": 400, "category_code": "701", "date": "2024-01-05" })),
        )
        .await;

        let (status, statement) = send(&app, "GET", &format!("/api/v1/accounts/{account_id}/statement"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(statement["lines"][0]["operation"]["kind"], "income");
        assert_eq!(statement["lines"][1]["running"]["current_balance"], "1150");
        assert_eq!(statement["balance"]["balance"], "1150");

        let (_, grid) = send(&app, "GET", &format!("/api/v1/accounts/{account_id}/grid?year=2024"), None).await;
        assert_eq!(grid["expense"]["months"][2], "250");
        assert_eq!(grid["net"]["total"], "150");

        let (status, _) = send(
            &app,
            "DELETE",
            &format!("/api/v1/operations/{}", income["id"].as_str().unwrap()),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, list) = send(&app, "GET", "/api/v1/accounts", None).await;
        assert_eq!(list["accounts"][0]["balance"]["balance"], "750");
    }

    #[tokio::test]
    async fn test_rejected_operations() {
        let (_, app) = app(Dataset::default());
        let (_, account) = send(&app, "POST", "/api/v1/accounts", Some(json!({ "name": "Livret" }))).await;
        let ops_uri = format!("/api/v1/accounts/{}/operations", account["id"].as_str().unwrap());

        let (status, body) = send(
            &app,
            "POST",
            &ops_uri,
            Some(json!({ "kind": "income", "amount": "0", "date": "2024-01-05" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");

        let (status, _) = send(
            &app,
            "POST",
            "/api/v1/accounts/0191c3a0-0000-7000-8000-000000000000/operations",
            Some(json!({ "kind": "income", "amount": "10", "date": "2024-01-05" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
