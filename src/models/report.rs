use bigdecimal::BigDecimal;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::collections::BTreeMap;

/// 分组键: (产品组, 品牌, 城市)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AggregationKey {
    pub product_group: String,
    pub brand: String,
    pub location: String,
}

/// 单个城市的 YTD / MTD 成本, None 表示该侧无数据 (渲染为空白)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LocationCost {
    pub ytd: Option<BigDecimal>,
    pub mtd: Option<BigDecimal>,
}

/// 某产品组下某品牌的成本表 (城市升序)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandReport {
    pub brand: String,
    pub locations: BTreeMap<String, LocationCost>,
}

/// 产品组, 品牌按首次出现顺序
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupReport {
    pub product_group: String,
    pub brands: Vec<BrandReport>,
}

impl GroupReport {
    pub fn brand(&self, brand: &str) -> Option<&BrandReport> {
        self.brands.iter().find(|b| b.brand == brand)
    }
}

/// 完整报表
#[derive(Debug, Clone, Serialize)]
pub struct CostReport {
    /// 生成时间 (UTC+05:30)
    pub generated_at: DateTime<FixedOffset>,
    pub groups: Vec<GroupReport>,
}

impl CostReport {
    pub fn group(&self, product_group: &str) -> Option<&GroupReport> {
        self.groups.iter().find(|g| g.product_group == product_group)
    }

    /// 按 (组, 品牌, 城市) 查找
    pub fn lookup(&self, key: &AggregationKey) -> Option<&LocationCost> {
        self.group(&key.product_group)?
            .brand(&key.brand)?
            .locations
            .get(&key.location)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// 一次运行的结果摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub fetched_rows: usize,
    pub reported_rows: usize,
    pub groups: usize,
    pub subject: String,
}
