use crate::models::{InvoiceRow, InvoiceStatus, Supplier, SupplierKind};
use sqlx::PgPool;

/// 查询状态在白名单内的全部发票
pub async fn list_invoices_by_status(
    pool: &PgPool,
    statuses: &[InvoiceStatus],
) -> Result<Vec<InvoiceRow>, sqlx::Error> {
    let statuses: Vec<&str> = statuses.iter().map(|s| s.as_str()).collect();

    sqlx::query_as::<_, InvoiceRow>(
        r#"
        SELECT id,
               subcontractor_id,
               retail_supplier_id,
               office_supplier_id,
               contract_id,
               retail_contract_id,
               remaining_amount,
               paid_amount,
               status
        FROM invoices
        WHERE status = ANY($1)
        ORDER BY id
        "#
    )
    .bind(statuses)
    .fetch_all(pool)
    .await
}

/// 普通项目: 合同直接挂在项目上
pub async fn list_contract_ids_for_project(
    pool: &PgPool,
    project_id: i64,
) -> Result<Vec<i64>, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT id
        FROM contracts
        WHERE project_id = $1
        ORDER BY id
        "#
    )
    .bind(project_id)
    .fetch_all(pool)
    .await
}

/// 零售项目: 先查阶段
pub async fn list_phase_ids_for_retail_project(
    pool: &PgPool,
    project_id: i64,
) -> Result<Vec<i64>, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT id
        FROM retail_project_phases
        WHERE project_id = $1
        ORDER BY id
        "#
    )
    .bind(project_id)
    .fetch_all(pool)
    .await
}

/// 零售项目: 再按阶段查合同
pub async fn list_retail_contract_ids_for_phases(
    pool: &PgPool,
    phase_ids: &[i64],
) -> Result<Vec<i64>, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT id
        FROM retail_contracts
        WHERE phase_id = ANY($1)
        ORDER BY id
        "#
    )
    .bind(phase_ids)
    .fetch_all(pool)
    .await
}

/// 按ID列表查询某一种供应商
pub async fn list_suppliers_by_ids(
    pool: &PgPool,
    kind: SupplierKind,
    ids: &[i64],
) -> Result<Vec<Supplier>, sqlx::Error> {
    // 表名来自固定枚举, 不是用户输入
    let sql = format!(
        "SELECT id, name FROM {} WHERE id = ANY($1) ORDER BY id",
        kind.table()
    );

    sqlx::query_as::<_, Supplier>(&sql)
        .bind(ids)
        .fetch_all(pool)
        .await
}
