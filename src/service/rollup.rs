//! 供应商债务汇总
//!
//! 按供应商**显示名称**分组, 不按ID。两个不同供应商记录重名时会被合并成一行,
//! 种类不止一种时该行类型为 `mixed`。这很可能是历史上基于显示字符串实现的副作用,
//! 但下游报表可能依赖这个合并行为, 所以保持不变。

use bigdecimal::{BigDecimal, Zero};
use crate::models::{DebtSummary, SortDirection, SortField, SupplierKind, SupplierType};
use crate::service::resolution::ResolvedInvoice;
use indexmap::IndexMap;
use std::collections::BTreeSet;

/// 单个供应商名称下的累加器
#[derive(Debug)]
struct SupplierAccumulator {
    kinds: BTreeSet<SupplierKind>,
    total_unpaid: BigDecimal,
    total_paid: BigDecimal,
    invoice_count: usize,
}

impl SupplierAccumulator {
    fn new() -> Self {
        Self {
            kinds: BTreeSet::new(),
            total_unpaid: BigDecimal::zero(),
            total_paid: BigDecimal::zero(),
            invoice_count: 0,
        }
    }

    fn is_empty(&self) -> bool {
        self.total_unpaid.is_zero() && self.total_paid.is_zero()
    }

    fn supplier_type(&self) -> SupplierType {
        let mut kinds = self.kinds.iter();
        match (kinds.next(), kinds.next()) {
            (Some(&kind), None) => kind.into(),
            _ => SupplierType::Mixed,
        }
    }

    fn into_summary(self, supplier_name: String) -> DebtSummary {
        DebtSummary {
            supplier_type: self.supplier_type(),
            supplier_name,
            supplier_kinds: self.kinds.into_iter().collect(),
            total_unpaid: self.total_unpaid,
            total_paid: self.total_paid,
            invoice_count: self.invoice_count,
        }
    }
}

/// 汇总: 单次遍历, 按名称首次出现的顺序输出, 丢弃已付/未付都为 0 的行
///
/// - total_paid: 全部发票的 paid_amount 之和
/// - total_unpaid: 仅 UNPAID / PARTIALLY_PAID 发票的 remaining_amount 之和
/// - invoice_count: 全部发票 (含 PAID)
pub fn rollup(invoices: &[ResolvedInvoice]) -> Vec<DebtSummary> {
    let mut groups: IndexMap<&str, SupplierAccumulator> = IndexMap::new();

    for resolved in invoices {
        let acc = groups
            .entry(resolved.supplier.name.as_str())
            .or_insert_with(SupplierAccumulator::new);

        acc.kinds.insert(resolved.supplier.kind);
        acc.total_paid += &resolved.invoice.paid_amount;
        if resolved.invoice.status.is_outstanding() {
            acc.total_unpaid += &resolved.invoice.remaining_amount;
        }
        acc.invoice_count += 1;
    }

    let group_count = groups.len();
    let rows: Vec<DebtSummary> = groups
        .into_iter()
        .filter(|(_, acc)| !acc.is_empty())
        .map(|(name, acc)| acc.into_summary(name.to_string()))
        .collect();

    tracing::debug!(
        "Rolled up {} invoices into {} suppliers ({} without activity)",
        invoices.len(),
        rows.len(),
        group_count - rows.len()
    );

    rows
}

/// 展示层排序; 相等键的先后顺序不做保证
pub fn sort_summaries(rows: &mut [DebtSummary], field: SortField, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let ord = match field {
            SortField::Name => a.supplier_name.cmp(&b.supplier_name),
            SortField::TotalUnpaid => a.total_unpaid.cmp(&b.total_unpaid),
            SortField::TotalPaid => a.total_paid.cmp(&b.total_paid),
        };
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Invoice, InvoiceStatus, SupplierRef};
    use crate::service::resolution::ResolvedSupplier;

    fn resolved(
        name: &str,
        kind: SupplierKind,
        status: InvoiceStatus,
        remaining: i64,
        paid: i64,
    ) -> ResolvedInvoice {
        ResolvedInvoice {
            supplier: ResolvedSupplier {
                kind,
                name: name.to_string(),
            },
            invoice: Invoice {
                id: 0,
                supplier: Some(SupplierRef::new(kind, 0)),
                contract: None,
                remaining_amount: BigDecimal::from(remaining),
                paid_amount: BigDecimal::from(paid),
                status,
            },
        }
    }

    #[test]
    fn acme_collision_scenario() {
        let invoices = vec![
            resolved("Acme", SupplierKind::Subcontractor, InvoiceStatus::Paid, 100, 500),
            resolved("Acme", SupplierKind::Subcontractor, InvoiceStatus::Unpaid, 300, 0),
            resolved("Acme", SupplierKind::RetailSupplier, InvoiceStatus::PartiallyPaid, 150, 150),
        ];

        let rows = rollup(&invoices);
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(row.supplier_name, "Acme");
        assert_eq!(row.supplier_type, SupplierType::Mixed);
        assert_eq!(
            row.supplier_kinds,
            vec![SupplierKind::Subcontractor, SupplierKind::RetailSupplier]
        );
        assert_eq!(row.total_unpaid, BigDecimal::from(450));
        assert_eq!(row.total_paid, BigDecimal::from(650));
        assert_eq!(row.invoice_count, 3);
    }

    #[test]
    fn single_kind_keeps_its_type() {
        let invoices = vec![
            resolved("Beton", SupplierKind::OfficeSupplier, InvoiceStatus::Unpaid, 10, 0),
            resolved("Beton", SupplierKind::OfficeSupplier, InvoiceStatus::Unpaid, 5, 0),
        ];
        let rows = rollup(&invoices);
        assert_eq!(rows[0].supplier_type, SupplierType::OfficeSupplier);
        assert_eq!(rows[0].total_unpaid, BigDecimal::from(15));
    }

    #[test]
    fn paid_invoice_ignores_stored_remaining() {
        let invoices = vec![resolved("X", SupplierKind::Subcontractor, InvoiceStatus::Paid, 999, 1)];
        let rows = rollup(&invoices);
        assert!(rows[0].total_unpaid.is_zero());
        assert_eq!(rows[0].total_paid, BigDecimal::from(1));
    }

    #[test]
    fn zero_activity_rows_are_dropped() {
        let invoices = vec![
            resolved("Idle", SupplierKind::Subcontractor, InvoiceStatus::Unpaid, 0, 0),
            // PAID 且 paid_amount 为 0: 剩余金额不计, 整行无活动
            resolved("Ghost", SupplierKind::Subcontractor, InvoiceStatus::Paid, 70, 0),
            resolved("Busy", SupplierKind::Subcontractor, InvoiceStatus::Unpaid, 1, 0),
        ];
        let rows = rollup(&invoices);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].supplier_name, "Busy");
        for row in &rows {
            assert!(&row.total_unpaid + &row.total_paid > BigDecimal::zero());
        }
    }

    #[test]
    fn rows_follow_first_seen_order() {
        let invoices = vec![
            resolved("B", SupplierKind::Subcontractor, InvoiceStatus::Unpaid, 1, 0),
            resolved("A", SupplierKind::Subcontractor, InvoiceStatus::Unpaid, 1, 0),
            resolved("B", SupplierKind::Subcontractor, InvoiceStatus::Unpaid, 1, 0),
        ];
        let names: Vec<_> = rollup(&invoices).into_iter().map(|r| r.supplier_name).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn empty_input_gives_no_rows() {
        assert!(rollup(&[]).is_empty());
    }

    #[test]
    fn sorts_by_each_field() {
        let invoices = vec![
            resolved("Beta", SupplierKind::Subcontractor, InvoiceStatus::Unpaid, 300, 10),
            resolved("Alpha", SupplierKind::Subcontractor, InvoiceStatus::Unpaid, 100, 30),
            resolved("Gamma", SupplierKind::Subcontractor, InvoiceStatus::Unpaid, 200, 20),
        ];
        let mut rows = rollup(&invoices);
        let names = |rows: &[DebtSummary]| -> Vec<String> {
            rows.iter().map(|r| r.supplier_name.clone()).collect()
        };

        sort_summaries(&mut rows, SortField::Name, SortDirection::Asc);
        assert_eq!(names(&rows), vec!["Alpha", "Beta", "Gamma"]);

        sort_summaries(&mut rows, SortField::TotalUnpaid, SortDirection::Desc);
        assert_eq!(names(&rows), vec!["Beta", "Gamma", "Alpha"]);

        sort_summaries(&mut rows, SortField::TotalPaid, SortDirection::Asc);
        assert_eq!(names(&rows), vec!["Beta", "Gamma", "Alpha"]);

        sort_summaries(&mut rows, SortField::Name, SortDirection::Desc);
        assert_eq!(names(&rows), vec!["Gamma", "Beta", "Alpha"]);
    }
}
