use crate::db::LedgerStore;
use crate::error::LedgerResult;
use crate::models::{ContractScope, DebtReport, ProjectRef};
use crate::service::filter::{filter_invoices, load_scope};
use crate::service::resolution::{resolve_invoices, SupplierDirectory};
use crate::service::rollup::rollup;
use std::sync::Arc;
use std::time::Instant;

/// 供应商债务服务
///
/// 每次调用独立: 拉取发票/项目范围 -> 过滤 -> 拉取供应商 -> 解析 -> 汇总。
/// 任一查询失败则整体失败, 不返回部分结果。
#[derive(Clone)]
pub struct DebtService {
    store: Arc<dyn LedgerStore>,
}

impl DebtService {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    pub async fn supplier_debts(&self, project: Option<ProjectRef>) -> LedgerResult<DebtReport> {
        let start = Instant::now();
        let store = self.store.as_ref();

        // Phase 1: 发票和项目范围互不依赖, 并发查询
        let (invoices, scope) = futures::try_join!(store.tracked_invoices(), async {
            match project {
                Some(project) => load_scope(store, project).await.map(Some),
                None => Ok::<Option<ContractScope>, _>(None),
            }
        })?;
        let fetched = invoices.len();

        // Phase 2: 过滤
        let invoices = filter_invoices(invoices, scope.as_ref());

        // Phase 3: 供应商解析
        let directory = SupplierDirectory::load(store, &invoices).await?;
        let (resolved, orphaned) = resolve_invoices(invoices, &directory);

        // Phase 4: 汇总
        let rows = rollup(&resolved);
        let report = DebtReport::new(project, rows);

        tracing::info!(
            "Supplier debts for {:?}: {} invoices fetched, {} resolved, {} orphaned, {} suppliers, elapsed {:?}",
            project,
            fetched,
            resolved.len(),
            orphaned,
            report.rows.len(),
            start.elapsed()
        );

        Ok(report)
    }
}
