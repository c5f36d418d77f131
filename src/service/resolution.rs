use crate::db::LedgerStore;
use crate::error::LedgerResult;
use crate::models::{Invoice, Supplier, SupplierKind, SupplierRef};
use indexmap::IndexSet;
use std::collections::HashMap;

/// 供应商查找表: kind -> (id -> 显示名称)
#[derive(Debug, Clone, Default)]
pub struct SupplierDirectory {
    tables: HashMap<SupplierKind, HashMap<i64, String>>,
}

/// 解析后的供应商
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSupplier {
    pub kind: SupplierKind,
    pub name: String,
}

/// 已解析出供应商的发票
#[derive(Debug, Clone)]
pub struct ResolvedInvoice {
    pub supplier: ResolvedSupplier,
    pub invoice: Invoice,
}

impl SupplierDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: SupplierKind, suppliers: impl IntoIterator<Item = Supplier>) {
        let table = self.tables.entry(kind).or_default();
        for s in suppliers {
            table.insert(s.id, s.name);
        }
    }

    pub fn with(mut self, kind: SupplierKind, suppliers: impl IntoIterator<Item = Supplier>) -> Self {
        self.insert(kind, suppliers);
        self
    }

    pub fn resolve(&self, supplier: &SupplierRef) -> Option<ResolvedSupplier> {
        self.tables
            .get(&supplier.kind)
            .and_then(|table| table.get(&supplier.id))
            .map(|name| ResolvedSupplier {
                kind: supplier.kind,
                name: name.clone(),
            })
    }

    /// 一次查询各种类被引用到的供应商, 三种类并发
    pub async fn load(store: &dyn LedgerStore, invoices: &[Invoice]) -> LedgerResult<Self> {
        let wanted = referenced_ids(invoices);
        let ids_for = |kind: SupplierKind| -> Vec<i64> {
            wanted
                .get(&kind)
                .map(|ids| ids.iter().copied().collect())
                .unwrap_or_default()
        };

        let sub_ids = ids_for(SupplierKind::Subcontractor);
        let retail_ids = ids_for(SupplierKind::RetailSupplier);
        let office_ids = ids_for(SupplierKind::OfficeSupplier);

        let (subcontractors, retail_suppliers, office_suppliers) = futures::try_join!(
            fetch_kind(store, SupplierKind::Subcontractor, &sub_ids),
            fetch_kind(store, SupplierKind::RetailSupplier, &retail_ids),
            fetch_kind(store, SupplierKind::OfficeSupplier, &office_ids),
        )?;

        Ok(Self::new()
            .with(SupplierKind::Subcontractor, subcontractors)
            .with(SupplierKind::RetailSupplier, retail_suppliers)
            .with(SupplierKind::OfficeSupplier, office_suppliers))
    }
}

async fn fetch_kind(
    store: &dyn LedgerStore,
    kind: SupplierKind,
    ids: &[i64],
) -> LedgerResult<Vec<Supplier>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let suppliers = store.suppliers(kind, ids).await?;
    tracing::debug!("Fetched {}/{} {} records", suppliers.len(), ids.len(), kind);
    Ok(suppliers)
}

/// 按种类收集发票引用到的供应商ID (保序去重)
fn referenced_ids(invoices: &[Invoice]) -> HashMap<SupplierKind, IndexSet<i64>> {
    let mut wanted: HashMap<SupplierKind, IndexSet<i64>> = HashMap::new();
    for supplier in invoices.iter().filter_map(|inv| inv.supplier.as_ref()) {
        wanted.entry(supplier.kind).or_default().insert(supplier.id);
    }
    wanted
}

/// 解析每张发票的供应商
///
/// 没有供应商引用或引用找不到的发票被丢弃 (不报错), 返回值第二项是丢弃数量。
pub fn resolve_invoices(
    invoices: Vec<Invoice>,
    directory: &SupplierDirectory,
) -> (Vec<ResolvedInvoice>, usize) {
    let mut resolved = Vec::with_capacity(invoices.len());
    let mut orphaned = 0usize;

    for invoice in invoices {
        match invoice.supplier.as_ref().and_then(|s| directory.resolve(s)) {
            Some(supplier) => resolved.push(ResolvedInvoice { supplier, invoice }),
            None => orphaned += 1,
        }
    }

    if orphaned > 0 {
        tracing::debug!("Dropped {} invoices with unresolved suppliers", orphaned);
    }

    (resolved, orphaned)
}
