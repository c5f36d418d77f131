use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};
use crate::models::{ProjectRef, SupplierKind, SupplierType};
use serde::{Deserialize, Serialize};

/// 供应商债务汇总行 (按显示名称分组, 每次查询重新计算, 不落库)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtSummary {
    pub supplier_name: String,
    pub supplier_type: SupplierType,
    /// 合并进该行的供应商种类 (有序)
    pub supplier_kinds: Vec<SupplierKind>,
    pub total_unpaid: BigDecimal,
    pub total_paid: BigDecimal,
    pub invoice_count: usize,
}

/// 汇总标量, 只从汇总行推导
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtTotals {
    pub total_unpaid: BigDecimal,
    pub total_paid: BigDecimal,
    pub supplier_count: usize,
    /// total_unpaid > 0 的行数
    pub suppliers_with_debt: usize,
}

impl DebtTotals {
    pub fn from_rows(rows: &[DebtSummary]) -> Self {
        let mut totals = Self::default();
        for row in rows {
            totals.total_unpaid += &row.total_unpaid;
            totals.total_paid += &row.total_paid;
            if row.total_unpaid > BigDecimal::zero() {
                totals.suppliers_with_debt += 1;
            }
        }
        totals.supplier_count = rows.len();
        totals
    }
}

impl Default for DebtTotals {
    fn default() -> Self {
        Self {
            total_unpaid: BigDecimal::zero(),
            total_paid: BigDecimal::zero(),
            supplier_count: 0,
            suppliers_with_debt: 0,
        }
    }
}

/// 一次汇总的完整结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtReport {
    pub project: Option<ProjectRef>,
    pub generated_at: DateTime<Utc>,
    pub rows: Vec<DebtSummary>,
    pub totals: DebtTotals,
}

impl DebtReport {
    pub fn new(project: Option<ProjectRef>, rows: Vec<DebtSummary>) -> Self {
        let totals = DebtTotals::from_rows(&rows);
        Self {
            project,
            generated_at: Utc::now(),
            rows,
            totals,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    #[default]
    TotalUnpaid,
    TotalPaid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}
