use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// 供应商种类 (三张互不相交的表)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplierKind {
    Subcontractor,
    RetailSupplier,
    OfficeSupplier,
}

impl SupplierKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Subcontractor => "subcontractor",
            Self::RetailSupplier => "retail_supplier",
            Self::OfficeSupplier => "office_supplier",
        }
    }

    /// 对应的查找表
    pub fn table(self) -> &'static str {
        match self {
            Self::Subcontractor => "subcontractors",
            Self::RetailSupplier => "retail_suppliers",
            Self::OfficeSupplier => "office_suppliers",
        }
    }
}

impl fmt::Display for SupplierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 发票上的供应商引用 (kind + id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SupplierRef {
    pub kind: SupplierKind,
    pub id: i64,
}

impl SupplierRef {
    pub fn new(kind: SupplierKind, id: i64) -> Self {
        Self { kind, id }
    }
}

/// 供应商查找表行 (三种表共有字段)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
}

/// 汇总行上的供应商类型: 同名合并且种类不止一种时为 mixed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplierType {
    Subcontractor,
    RetailSupplier,
    OfficeSupplier,
    Mixed,
}

impl SupplierType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Subcontractor => "subcontractor",
            Self::RetailSupplier => "retail_supplier",
            Self::OfficeSupplier => "office_supplier",
            Self::Mixed => "mixed",
        }
    }
}

impl From<SupplierKind> for SupplierType {
    fn from(kind: SupplierKind) -> Self {
        match kind {
            SupplierKind::Subcontractor => Self::Subcontractor,
            SupplierKind::RetailSupplier => Self::RetailSupplier,
            SupplierKind::OfficeSupplier => Self::OfficeSupplier,
        }
    }
}

impl fmt::Display for SupplierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
