use serde::{Deserialize, Serialize};

/// 公司名 -> 品牌
pub const COMPANY_RENAMES: &[(&str, &str)] = &[
    ("Landmark Select - AMPL", "VW"),
    ("WCPL-A", "Honda"),
    ("Motorone India Private Limited", "Honda"),
];

/// 站点 -> 城市
pub const LOCATION_RENAMES: &[(&str, &str)] = &[
    ("AH-SARKHEJ", "Ahmedabad"),
    ("Ambli", "Ahmedabad"),
    ("Andheri WORKSHOP", "Mumbai"),
    ("Indore Workshop", "Indore"),
    ("Isanpur", "Ahmedabad"),
    ("MULUND WEST", "Mumbai"),
    ("NAROL-WORKSHOP", "Ahmedabad"),
    ("Navsari", "Ahmedabad"),
    ("Nerul Workshop", "Mumbai"),
    ("PANJIM WS", "Goa"),
    ("Sola", "Ahmedabad"),
    ("Surat Workshop", "Surat"),
    ("Thaltej", "Ahmedabad"),
    ("Thane Workshop", "Mumbai"),
    ("Udhna", "Surat"),
    ("Vapi", "Ahmedabad"),
    ("VILE PARLE ( WEST )", "Mumbai"),
];

/// 参与报表的产品组
pub const PRODUCT_GROUPS: &[&str] = &["LGA", "M1"];

/// 单条改名规则
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameRule {
    pub from: String,
    pub to: String,
}

/// 报表业务规则, 可由配置覆盖
///
/// 用列表而不是 map 表达改名, 配置层会把 map 的键转成小写.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportRules {
    pub company_renames: Vec<RenameRule>,
    pub location_renames: Vec<RenameRule>,
    pub product_groups: Vec<String>,
}

impl Default for ReportRules {
    fn default() -> Self {
        Self {
            company_renames: to_rules(COMPANY_RENAMES),
            location_renames: to_rules(LOCATION_RENAMES),
            product_groups: PRODUCT_GROUPS.iter().map(|g| g.to_string()).collect(),
        }
    }
}

fn to_rules(pairs: &[(&str, &str)]) -> Vec<RenameRule> {
    pairs
        .iter()
        .map(|(from, to)| RenameRule {
            from: from.to_string(),
            to: to.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules_mirror_static_tables() {
        let rules = ReportRules::default();
        assert_eq!(rules.company_renames.len(), COMPANY_RENAMES.len());
        assert_eq!(rules.location_renames.len(), LOCATION_RENAMES.len());
        assert_eq!(rules.product_groups, vec!["LGA", "M1"]);
    }

    #[test]
    fn rename_targets_are_never_sources() {
        for table in [COMPANY_RENAMES, LOCATION_RENAMES] {
            for (_, to) in table {
                assert!(table.iter().all(|(from, _)| from != to), "{} is chained", to);
            }
        }
    }
}
