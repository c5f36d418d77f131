#![allow(dead_code)]

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use supplier_ledger::models::{
    ContractRef, Invoice, InvoiceStatus, Supplier, SupplierKind, SupplierRef,
};
use supplier_ledger::{DebtService, LedgerError, LedgerResult, LedgerStore};

/// 可注入失败的查询
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fetch {
    Invoices,
    StandardContracts,
    RetailPhases,
    RetailContracts,
    Suppliers(SupplierKind),
}

/// 内存数据源
#[derive(Default)]
pub struct MemoryStore {
    pub invoices: Vec<Invoice>,
    /// (contract_id, project_id)
    pub contracts: Vec<(i64, i64)>,
    /// (phase_id, project_id)
    pub phases: Vec<(i64, i64)>,
    /// (retail_contract_id, phase_id)
    pub retail_contracts: Vec<(i64, i64)>,
    pub suppliers: HashMap<SupplierKind, Vec<Supplier>>,
    pub fail_on: Option<Fetch>,
    pub supplier_calls: AtomicUsize,
    pub retail_contract_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn supplier(mut self, kind: SupplierKind, id: i64, name: &str) -> Self {
        self.suppliers.entry(kind).or_default().push(Supplier {
            id,
            name: name.to_string(),
        });
        self
    }

    pub fn invoice(mut self, invoice: Invoice) -> Self {
        self.invoices.push(invoice);
        self
    }

    pub fn contract(mut self, contract_id: i64, project_id: i64) -> Self {
        self.contracts.push((contract_id, project_id));
        self
    }

    pub fn phase(mut self, phase_id: i64, project_id: i64) -> Self {
        self.phases.push((phase_id, project_id));
        self
    }

    pub fn retail_contract(mut self, contract_id: i64, phase_id: i64) -> Self {
        self.retail_contracts.push((contract_id, phase_id));
        self
    }

    pub fn failing(mut self, fetch: Fetch) -> Self {
        self.fail_on = Some(fetch);
        self
    }

    fn check(&self, fetch: Fetch) -> LedgerResult<()> {
        if self.fail_on == Some(fetch) {
            return Err(LedgerError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn tracked_invoices(&self) -> LedgerResult<Vec<Invoice>> {
        self.check(Fetch::Invoices)?;
        Ok(self.invoices.clone())
    }

    async fn standard_contract_ids(&self, project_id: i64) -> LedgerResult<Vec<i64>> {
        self.check(Fetch::StandardContracts)?;
        Ok(self
            .contracts
            .iter()
            .filter(|(_, p)| *p == project_id)
            .map(|(id, _)| *id)
            .collect())
    }

    async fn retail_phase_ids(&self, project_id: i64) -> LedgerResult<Vec<i64>> {
        self.check(Fetch::RetailPhases)?;
        Ok(self
            .phases
            .iter()
            .filter(|(_, p)| *p == project_id)
            .map(|(id, _)| *id)
            .collect())
    }

    async fn retail_contract_ids(&self, phase_ids: &[i64]) -> LedgerResult<Vec<i64>> {
        self.retail_contract_calls.fetch_add(1, Ordering::SeqCst);
        self.check(Fetch::RetailContracts)?;
        Ok(self
            .retail_contracts
            .iter()
            .filter(|(_, phase)| phase_ids.contains(phase))
            .map(|(id, _)| *id)
            .collect())
    }

    async fn suppliers(&self, kind: SupplierKind, ids: &[i64]) -> LedgerResult<Vec<Supplier>> {
        self.supplier_calls.fetch_add(1, Ordering::SeqCst);
        self.check(Fetch::Suppliers(kind))?;
        Ok(self
            .suppliers
            .get(&kind)
            .map(|all| all.iter().filter(|s| ids.contains(&s.id)).cloned().collect())
            .unwrap_or_default())
    }
}

pub fn invoice(
    id: i64,
    supplier: Option<SupplierRef>,
    contract: Option<ContractRef>,
    status: InvoiceStatus,
    remaining: i64,
    paid: i64,
) -> Invoice {
    Invoice {
        id,
        supplier,
        contract,
        remaining_amount: BigDecimal::from(remaining),
        paid_amount: BigDecimal::from(paid),
        status,
    }
}

pub fn sub(id: i64) -> Option<SupplierRef> {
    Some(SupplierRef::new(SupplierKind::Subcontractor, id))
}

pub fn retail(id: i64) -> Option<SupplierRef> {
    Some(SupplierRef::new(SupplierKind::RetailSupplier, id))
}

pub fn office(id: i64) -> Option<SupplierRef> {
    Some(SupplierRef::new(SupplierKind::OfficeSupplier, id))
}

pub fn service(store: MemoryStore) -> (DebtService, Arc<MemoryStore>) {
    let store = Arc::new(store);
    (DebtService::new(store.clone()), store)
}
