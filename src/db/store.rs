use async_trait::async_trait;
use crate::db::queries;
use crate::error::LedgerResult;
use crate::models::{Invoice, Supplier, SupplierKind, TRACKED_STATUSES};
use sqlx::PgPool;

/// 后端数据源 (只读)
///
/// 汇总流程只依赖这几个查询: 发票、项目范围 (合同/阶段)、三种供应商表。
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// 状态在白名单内的全部发票
    async fn tracked_invoices(&self) -> LedgerResult<Vec<Invoice>>;

    async fn standard_contract_ids(&self, project_id: i64) -> LedgerResult<Vec<i64>>;

    async fn retail_phase_ids(&self, project_id: i64) -> LedgerResult<Vec<i64>>;

    async fn retail_contract_ids(&self, phase_ids: &[i64]) -> LedgerResult<Vec<i64>>;

    /// 按ID查询某一种供应商; 查不到的ID不报错, 直接缺失
    async fn suppliers(&self, kind: SupplierKind, ids: &[i64]) -> LedgerResult<Vec<Supplier>>;
}

/// Postgres 实现
#[derive(Clone)]
pub struct PgLedgerStore {
    pool: PgPool,
}

impl PgLedgerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerStore for PgLedgerStore {
    async fn tracked_invoices(&self) -> LedgerResult<Vec<Invoice>> {
        let rows = queries::list_invoices_by_status(&self.pool, &TRACKED_STATUSES).await?;
        tracing::debug!("Fetched {} invoice rows", rows.len());

        rows.into_iter().map(Invoice::try_from).collect()
    }

    async fn standard_contract_ids(&self, project_id: i64) -> LedgerResult<Vec<i64>> {
        Ok(queries::list_contract_ids_for_project(&self.pool, project_id).await?)
    }

    async fn retail_phase_ids(&self, project_id: i64) -> LedgerResult<Vec<i64>> {
        Ok(queries::list_phase_ids_for_retail_project(&self.pool, project_id).await?)
    }

    async fn retail_contract_ids(&self, phase_ids: &[i64]) -> LedgerResult<Vec<i64>> {
        Ok(queries::list_retail_contract_ids_for_phases(&self.pool, phase_ids).await?)
    }

    async fn suppliers(&self, kind: SupplierKind, ids: &[i64]) -> LedgerResult<Vec<Supplier>> {
        Ok(queries::list_suppliers_by_ids(&self.pool, kind, ids).await?)
    }
}
