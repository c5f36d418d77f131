use crate::export::{paginate, to_csv_string, ReportPage};
use crate::models::{
    DebtReport, DebtSummary, DebtTotals, ProjectKind, ProjectRef, SortDirection, SortField,
};
use crate::service::{sort_summaries, DebtService};
use axum::{
    extract::{Json, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 共享状态
#[derive(Clone)]
pub struct AppState {
    pub debts: Arc<DebtService>,
    pub page_size: usize,
}

/// 查询参数: 项目范围 + 排序 (+ 分页)
#[derive(Debug, Default, Deserialize)]
pub struct DebtQuery {
    pub project_id: Option<i64>,
    pub project_kind: Option<ProjectKind>,
    pub sort: Option<SortField>,
    pub order: Option<SortDirection>,
    pub page: Option<usize>,
}

impl DebtQuery {
    pub fn project(&self) -> Option<ProjectRef> {
        self.project_id.map(|id| ProjectRef {
            kind: self.project_kind.unwrap_or_default(),
            id,
        })
    }
}

/// 响应体
#[derive(Debug, Serialize)]
pub struct DebtResponse {
    pub success: bool,
    pub message: String,
    pub rows: Option<Vec<DebtSummary>>,
    pub totals: Option<DebtTotals>,
}

#[derive(Debug, Serialize)]
pub struct PageResponse {
    pub success: bool,
    pub message: String,
    pub page: Option<ReportPage>,
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

async fn load_sorted(state: &AppState, query: &DebtQuery) -> Result<DebtReport, String> {
    match state.debts.supplier_debts(query.project()).await {
        Ok(mut report) => {
            sort_summaries(
                &mut report.rows,
                query.sort.unwrap_or_default(),
                query.order.unwrap_or_default(),
            );
            Ok(report)
        }
        Err(e) => {
            tracing::error!("Supplier debt rollup failed: {}", e);
            Err(format!("Error: {}", e))
        }
    }
}

/// 供应商债务汇总
pub async fn supplier_debts(
    State(state): State<AppState>,
    Query(query): Query<DebtQuery>,
) -> Response {
    match load_sorted(&state, &query).await {
        Ok(report) => {
            let response = DebtResponse {
                success: true,
                message: format!(
                    "{} suppliers, {} with outstanding debt",
                    report.totals.supplier_count, report.totals.suppliers_with_debt
                ),
                rows: Some(report.rows),
                totals: Some(report.totals),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(message) => {
            let response = DebtResponse {
                success: false,
                message,
                rows: None,
                totals: None,
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response()
        }
    }
}

/// CSV 导出
pub async fn export_csv(
    State(state): State<AppState>,
    Query(query): Query<DebtQuery>,
) -> Response {
    let csv = load_sorted(&state, &query)
        .await
        .and_then(|report| to_csv_string(&report).map_err(|e| format!("Error: {}", e)));

    match csv {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(message) => (StatusCode::INTERNAL_SERVER_ERROR, message).into_response(),
    }
}

/// 分页报表 (page 从 1 开始)
pub async fn report_page(
    State(state): State<AppState>,
    Query(query): Query<DebtQuery>,
) -> Response {
    let report = match load_sorted(&state, &query).await {
        Ok(report) => report,
        Err(message) => {
            let response = PageResponse {
                success: false,
                message,
                page: None,
            };
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response();
        }
    };

    let number = query.page.unwrap_or(1);
    let pages = paginate(&report.rows, state.page_size);
    let total_pages = pages.len();

    match number.checked_sub(1).and_then(|idx| pages.into_iter().nth(idx)) {
        Some(page) => {
            let response = PageResponse {
                success: true,
                message: format!("Page {} of {}", number, total_pages),
                page: Some(page),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        None => {
            let response = PageResponse {
                success: false,
                message: format!("Page {} out of range (1..={})", number, total_pages),
                page: None,
            };
            (StatusCode::NOT_FOUND, Json(response)).into_response()
        }
    }
}
