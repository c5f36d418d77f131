use bigdecimal::BigDecimal;
use crate::error::LedgerError;
use crate::models::{ContractRef, SupplierKind, SupplierRef};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// 发票状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    Unpaid,
    PartiallyPaid,
    Paid,
}

/// 参与债务汇总的状态白名单
pub const TRACKED_STATUSES: [InvoiceStatus; 3] = [
    InvoiceStatus::Unpaid,
    InvoiceStatus::PartiallyPaid,
    InvoiceStatus::Paid,
];

impl InvoiceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unpaid => "UNPAID",
            Self::PartiallyPaid => "PARTIALLY_PAID",
            Self::Paid => "PAID",
        }
    }

    /// 是否计入未付金额 (PAID 不计, 不管 remaining_amount 存的是什么)
    pub fn is_outstanding(self) -> bool {
        matches!(self, Self::Unpaid | Self::PartiallyPaid)
    }

    pub fn is_tracked(self) -> bool {
        TRACKED_STATUSES.contains(&self)
    }
}

impl FromStr for InvoiceStatus {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UNPAID" => Ok(Self::Unpaid),
            "PARTIALLY_PAID" => Ok(Self::PartiallyPaid),
            "PAID" => Ok(Self::Paid),
            other => Err(LedgerError::InvalidStatus(other.to_string())),
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// invoices 表原始行 (三个互斥的供应商外键, 两个互斥的合同外键)
#[derive(Debug, Clone, FromRow)]
pub struct InvoiceRow {
    pub id: i64,
    pub subcontractor_id: Option<i64>,
    pub retail_supplier_id: Option<i64>,
    pub office_supplier_id: Option<i64>,
    pub contract_id: Option<i64>,
    pub retail_contract_id: Option<i64>,
    pub remaining_amount: BigDecimal,
    pub paid_amount: BigDecimal,
    pub status: String,
}

/// 发票 (供应商/合同引用已折叠为 tagged union)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: i64,
    pub supplier: Option<SupplierRef>,
    pub contract: Option<ContractRef>,
    pub remaining_amount: BigDecimal,
    pub paid_amount: BigDecimal,
    pub status: InvoiceStatus,
}

impl TryFrom<InvoiceRow> for Invoice {
    type Error = LedgerError;

    fn try_from(row: InvoiceRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<InvoiceStatus>()?;

        let populated: Vec<SupplierRef> = [
            (SupplierKind::Subcontractor, row.subcontractor_id),
            (SupplierKind::RetailSupplier, row.retail_supplier_id),
            (SupplierKind::OfficeSupplier, row.office_supplier_id),
        ]
        .into_iter()
        .filter_map(|(kind, id)| id.map(|id| SupplierRef::new(kind, id)))
        .collect();

        if populated.len() > 1 {
            tracing::warn!(
                "Invoice {} has {} supplier references, using {}",
                row.id,
                populated.len(),
                populated[0].kind
            );
        }

        let contract = match (row.contract_id, row.retail_contract_id) {
            (Some(id), Some(retail_id)) => {
                tracing::warn!(
                    "Invoice {} references contract {} and retail contract {}, using contract {}",
                    row.id,
                    id,
                    retail_id,
                    id
                );
                Some(ContractRef::standard(id))
            }
            (Some(id), None) => Some(ContractRef::standard(id)),
            (None, Some(id)) => Some(ContractRef::retail(id)),
            (None, None) => None,
        };

        Ok(Self {
            id: row.id,
            supplier: populated.first().copied(),
            contract,
            remaining_amount: row.remaining_amount,
            paid_amount: row.paid_amount,
            status,
        })
    }
}
