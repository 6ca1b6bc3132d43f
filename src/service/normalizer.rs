use crate::models::InvoiceRecord;
use crate::rules::{RenameRule, ReportRules};
use std::collections::{HashMap, HashSet};

/// 标签规范化: 公司改名 -> 门店改名 -> 产品组过滤
pub struct Normalizer {
    company_renames: HashMap<String, String>,
    location_renames: HashMap<String, String>,
    product_groups: HashSet<String>,
}

impl Normalizer {
    pub fn new(rules: &ReportRules) -> Self {
        Self {
            company_renames: to_map(&rules.company_renames),
            location_renames: to_map(&rules.location_renames),
            product_groups: rules.product_groups.iter().cloned().collect(),
        }
    }

    /// 公司名映射, 未配置的原样返回
    pub fn rename_company(&self, name: Option<String>) -> Option<String> {
        rename(&self.company_renames, name)
    }

    /// 门店名映射, 未配置的原样返回
    pub fn rename_location(&self, name: Option<String>) -> Option<String> {
        rename(&self.location_renames, name)
    }

    /// 产品组是否在白名单内 (None 不匹配)
    pub fn is_reported_group(&self, group: Option<&str>) -> bool {
        group.is_some_and(|g| self.product_groups.contains(g))
    }

    pub fn normalize(&self, records: Vec<InvoiceRecord>) -> Vec<InvoiceRecord> {
        let total = records.len();

        let kept: Vec<InvoiceRecord> = records
            .into_iter()
            .map(|mut record| {
                record.company_name = self.rename_company(record.company_name.take());
                record.location_name = self.rename_location(record.location_name.take());
                record
            })
            .filter(|record| self.is_reported_group(record.group_name.as_deref()))
            .collect();

        tracing::info!("规范化完成: 保留 {}/{} 行", kept.len(), total);
        kept
    }
}

fn to_map(rules: &[RenameRule]) -> HashMap<String, String> {
    rules
        .iter()
        .map(|rule| (rule.from.clone(), rule.to.clone()))
        .collect()
}

// 单次查表, 不做链式替换
fn rename(table: &HashMap<String, String>, name: Option<String>) -> Option<String> {
    name.map(|n| match table.get(&n) {
        Some(mapped) => mapped.clone(),
        None => n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(company: Option<&str>, location: Option<&str>, group: Option<&str>) -> InvoiceRecord {
        InvoiceRecord {
            company_name: company.map(str::to_string),
            location_name: location.map(str::to_string),
            group_name: group.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn renames_known_labels() {
        let normalizer = Normalizer::new(&ReportRules::default());
        let out = normalizer.normalize(vec![
            record(Some("Landmark Select - AMPL"), Some("Thaltej"), Some("LGA")),
            record(Some("Motorone India Private Limited"), Some("VILE PARLE ( WEST )"), Some("M1")),
        ]);

        assert_eq!(out[0].company_name.as_deref(), Some("VW"));
        assert_eq!(out[0].location_name.as_deref(), Some("Ahmedabad"));
        assert_eq!(out[1].company_name.as_deref(), Some("Honda"));
        assert_eq!(out[1].location_name.as_deref(), Some("Mumbai"));
    }

    #[test]
    fn unmapped_and_missing_labels_pass_through() {
        let normalizer = Normalizer::new(&ReportRules::default());
        let out = normalizer.normalize(vec![
            record(Some("Some Dealer"), Some("Pune"), Some("LGA")),
            record(None, None, Some("M1")),
        ]);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].company_name.as_deref(), Some("Some Dealer"));
        assert_eq!(out[0].location_name.as_deref(), Some("Pune"));
        assert_eq!(out[1].company_name, None);
        assert_eq!(out[1].location_name, None);
    }

    #[test]
    fn drops_groups_outside_allow_list() {
        let normalizer = Normalizer::new(&ReportRules::default());
        let out = normalizer.normalize(vec![
            record(Some("WCPL-A"), Some("Udhna"), Some("Other")),
            record(Some("WCPL-A"), Some("Udhna"), None),
            record(Some("WCPL-A"), Some("Udhna"), Some("lga")),
            record(Some("WCPL-A"), Some("Udhna"), Some("M1")),
        ]);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].group_name.as_deref(), Some("M1"));
    }

    #[test]
    fn configured_rules_replace_defaults() {
        let rules = ReportRules {
            company_renames: vec![RenameRule {
                from: "Acme Motors".to_string(),
                to: "Acme".to_string(),
            }],
            location_renames: Vec::new(),
            product_groups: vec!["OIL".to_string()],
        };
        let normalizer = Normalizer::new(&rules);
        let out = normalizer.normalize(vec![
            record(Some("Acme Motors"), Some("Thaltej"), Some("OIL")),
            record(Some("Acme Motors"), Some("Thaltej"), Some("LGA")),
        ]);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].company_name.as_deref(), Some("Acme"));
        assert_eq!(out[0].location_name.as_deref(), Some("Thaltej"));
    }

    fn label() -> impl Strategy<Value = Option<String>> {
        let known: Vec<String> = crate::rules::COMPANY_RENAMES
            .iter()
            .chain(crate::rules::LOCATION_RENAMES.iter())
            .flat_map(|(from, to)| [from.to_string(), to.to_string()])
            .collect();
        prop_oneof![
            Just(None),
            proptest::sample::select(known).prop_map(Some),
            "[A-Za-z -]{0,12}".prop_map(Some),
        ]
    }

    fn group() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            Just(Some("LGA".to_string())),
            Just(Some("M1".to_string())),
            Just(Some("Other".to_string())),
            "[A-Z0-9]{1,4}".prop_map(Some),
        ]
    }

    proptest! {
        #[test]
        fn only_allowed_groups_survive(groups in proptest::collection::vec(group(), 0..40)) {
            let normalizer = Normalizer::new(&ReportRules::default());
            let records = groups
                .iter()
                .map(|g| record(Some("WCPL-A"), Some("Sola"), g.as_deref()))
                .collect();

            for r in normalizer.normalize(records) {
                let g = r.group_name.unwrap();
                prop_assert!(g == "LGA" || g == "M1");
            }
        }

        #[test]
        fn renaming_is_a_pure_idempotent_lookup(company in label(), location in label()) {
            let normalizer = Normalizer::new(&ReportRules::default());

            let once = normalizer.rename_company(company.clone());
            let expected = company.clone().map(|c| {
                crate::rules::COMPANY_RENAMES
                    .iter()
                    .find(|(from, _)| *from == c)
                    .map(|(_, to)| to.to_string())
                    .unwrap_or(c)
            });
            prop_assert_eq!(&once, &expected);
            prop_assert_eq!(normalizer.rename_company(once.clone()), once);

            let once = normalizer.rename_location(location);
            prop_assert_eq!(normalizer.rename_location(once.clone()), once);
        }
    }
}
