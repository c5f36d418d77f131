use crate::db::LedgerStore;
use crate::error::LedgerResult;
use crate::models::{ContractScope, Invoice, ProjectKind, ProjectRef};

/// 把项目ID翻译成可达合同集合
///
/// 普通项目: contracts.project_id = 项目;
/// 零售项目: retail_project_phases.project_id = 项目, 再取这些阶段下的 retail_contracts。
pub async fn load_scope(store: &dyn LedgerStore, project: ProjectRef) -> LedgerResult<ContractScope> {
    let scope = match project.kind {
        ProjectKind::Standard => {
            let ids = store.standard_contract_ids(project.id).await?;
            ContractScope::from_ids(ProjectKind::Standard, ids)
        }
        ProjectKind::Retail => {
            let phase_ids = store.retail_phase_ids(project.id).await?;
            if phase_ids.is_empty() {
                tracing::debug!("Retail project {} has no phases", project.id);
                ContractScope::new()
            } else {
                let ids = store.retail_contract_ids(&phase_ids).await?;
                ContractScope::from_ids(ProjectKind::Retail, ids)
            }
        }
    };

    tracing::debug!(
        "Project {:?} {} resolves to {} contracts",
        project.kind,
        project.id,
        scope.len()
    );
    Ok(scope)
}

/// 发票过滤: 状态白名单 + (可选) 项目范围
///
/// 有范围时, 没有合同引用的发票一律排除。
pub fn filter_invoices(invoices: Vec<Invoice>, scope: Option<&ContractScope>) -> Vec<Invoice> {
    if scope.is_some_and(|s| s.is_empty()) {
        tracing::debug!("Project scope has no contracts, skipping {} invoices", invoices.len());
        return Vec::new();
    }

    invoices
        .into_iter()
        .filter(|inv| inv.status.is_tracked())
        .filter(|inv| match scope {
            None => true,
            Some(scope) => inv.contract.as_ref().is_some_and(|c| scope.contains(c)),
        })
        .collect()
}
