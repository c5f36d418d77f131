use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 项目种类: 普通项目 (合同直接挂项目) / 零售项目 (合同挂阶段, 阶段挂项目)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectKind {
    #[default]
    Standard,
    Retail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectRef {
    pub kind: ProjectKind,
    pub id: i64,
}

impl ProjectRef {
    pub fn standard(id: i64) -> Self {
        Self { kind: ProjectKind::Standard, id }
    }

    pub fn retail(id: i64) -> Self {
        Self { kind: ProjectKind::Retail, id }
    }
}

/// 发票上的合同引用, 合同种类与项目种类一一对应
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractRef {
    pub kind: ProjectKind,
    pub id: i64,
}

impl ContractRef {
    pub fn standard(id: i64) -> Self {
        Self { kind: ProjectKind::Standard, id }
    }

    pub fn retail(id: i64) -> Self {
        Self { kind: ProjectKind::Retail, id }
    }
}

/// 某项目可达的全部合同
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractScope {
    contracts: HashSet<ContractRef>,
}

impl ContractScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids(kind: ProjectKind, ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            contracts: ids.into_iter().map(|id| ContractRef { kind, id }).collect(),
        }
    }

    pub fn contains(&self, contract: &ContractRef) -> bool {
        self.contracts.contains(contract)
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}
