use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path};
use tracing::debug;

/// The roles a benchmark-table column can play. Aggregation only consumes
/// `Label`, `Average` and `EmployerCost`; the rest exist so a config file can
/// describe the whole schema the prompt asks the model for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    /// Component name, e.g. "שכר בסיס".
    Label,
    /// Min–max range for the component.
    Range,
    /// Market-average value; the "gross" total sums this column.
    Average,
    /// Payout mechanism free text.
    Mechanism,
    /// Average monthly cost to the employer.
    EmployerCost,
    /// Share of the total compensation cost.
    SharePercent,
}

// Roles with generic synonyms resolve last: "עלות מעסיק ממוצעת" must be
// claimed as employer cost even though it also contains "ממוצע".
const RESOLUTION_ORDER: [ColumnRole; 6] = [
    ColumnRole::Label,
    ColumnRole::Range,
    ColumnRole::Mechanism,
    ColumnRole::EmployerCost,
    ColumnRole::SharePercent,
    ColumnRole::Average,
];

/// Header synonyms per role, matched by substring against the parsed header
/// row. Loadable from YAML so a deployment can track prompt wording without a
/// rebuild.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleMap {
    synonyms: BTreeMap<ColumnRole, Vec<String>>,
}

impl Default for RoleMap {
    fn default() -> Self {
        let entries: [(ColumnRole, &[&str]); 6] = [
            (ColumnRole::Label, &["רכיב", "שם הרכיב"]),
            (ColumnRole::Range, &["טווח"]),
            (ColumnRole::Average, &["ממוצע", "שוק"]),
            (ColumnRole::Mechanism, &["מנגנון"]),
            (ColumnRole::EmployerCost, &["עלות"]),
            (ColumnRole::SharePercent, &["אחוז", "%"]),
        ];
        let synonyms = entries
            .into_iter()
            .map(|(role, names)| (role, names.iter().map(|s| s.to_string()).collect()))
            .collect();
        RoleMap { synonyms }
    }
}

impl RoleMap {
    /// A two-role map for callers that only know the gross and cost header
    /// substrings. The label column falls back to column 0 downstream.
    pub fn with_hints(gross_hint: &str, cost_hint: &str) -> Self {
        let mut synonyms = BTreeMap::new();
        synonyms.insert(ColumnRole::Average, vec![gross_hint.to_string()]);
        synonyms.insert(ColumnRole::EmployerCost, vec![cost_hint.to_string()]);
        RoleMap { synonyms }
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("parsing role map YAML")
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading role map `{}`", path.display()))?;
        Self::from_yaml(&text)
    }

    /// Match roles against `headers`, once per parsed table. Each column is
    /// claimed by at most one role; within a role the first matching
    /// unclaimed header wins.
    pub fn resolve(&self, headers: &[String]) -> ResolvedColumns {
        let mut assigned = BTreeMap::new();
        let mut claimed = vec![false; headers.len()];

        for role in RESOLUTION_ORDER {
            let names = match self.synonyms.get(&role) {
                Some(names) => names,
                None => continue,
            };
            let hit = headers.iter().enumerate().find(|(i, header)| {
                !claimed[*i] && names.iter().any(|name| header.contains(name.as_str()))
            });
            if let Some((i, header)) = hit {
                debug!(?role, column = i, header = %header, "resolved column role");
                claimed[i] = true;
                assigned.insert(role, i);
            }
        }

        ResolvedColumns { assigned }
    }
}

/// Role → column index for one specific table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedColumns {
    assigned: BTreeMap<ColumnRole, usize>,
}

impl ResolvedColumns {
    pub fn index_of(&self, role: ColumnRole) -> Option<usize> {
        self.assigned.get(&role).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn full_schema_headers() -> Vec<String> {
        [
            "רכיב",
            "טווח (₪ / %)",
            "ממוצע שוק",
            "מנגנון תגמול",
            "עלות מעסיק ממוצעת (₪)",
            "אחוז מעלות השכר הכוללת (%)",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    #[test]
    fn default_map_resolves_full_schema() {
        let resolved = RoleMap::default().resolve(&full_schema_headers());
        assert_eq!(resolved.index_of(ColumnRole::Label), Some(0));
        assert_eq!(resolved.index_of(ColumnRole::Range), Some(1));
        assert_eq!(resolved.index_of(ColumnRole::Average), Some(2));
        assert_eq!(resolved.index_of(ColumnRole::Mechanism), Some(3));
        assert_eq!(resolved.index_of(ColumnRole::EmployerCost), Some(4));
        assert_eq!(resolved.index_of(ColumnRole::SharePercent), Some(5));
    }

    #[test]
    fn employer_cost_wins_ambiguous_header() {
        // Only one monetary column, and its header contains both "עלות" and
        // "ממוצע". It must resolve as employer cost, with average unresolved.
        let headers = vec!["רכיב".to_string(), "עלות מעסיק ממוצעת (₪)".to_string()];
        let resolved = RoleMap::default().resolve(&headers);
        assert_eq!(resolved.index_of(ColumnRole::EmployerCost), Some(1));
        assert_eq!(resolved.index_of(ColumnRole::Average), None);
    }

    #[test]
    fn each_column_claimed_once() {
        let headers = vec!["ממוצע שוק".to_string()];
        let mut synonyms = BTreeMap::new();
        synonyms.insert(ColumnRole::Average, vec!["ממוצע".to_string()]);
        synonyms.insert(ColumnRole::EmployerCost, vec!["שוק".to_string()]);
        let resolved = RoleMap { synonyms }.resolve(&headers);
        // EmployerCost resolves first and takes the only column.
        assert_eq!(resolved.index_of(ColumnRole::EmployerCost), Some(0));
        assert_eq!(resolved.index_of(ColumnRole::Average), None);
    }

    #[test]
    fn unresolved_when_nothing_matches() {
        let resolved = RoleMap::default().resolve(&["Alpha".to_string(), "Beta".to_string()]);
        assert_eq!(resolved.index_of(ColumnRole::Average), None);
        assert_eq!(resolved.index_of(ColumnRole::EmployerCost), None);
    }

    #[test]
    fn yaml_synonyms_replace_defaults() -> Result<()> {
        let yaml = "average: [\"ממוצע\", \"חציון\"]\nemployer_cost: [\"עלות\"]\n";
        let map = RoleMap::from_yaml(yaml)?;
        let headers = vec!["חציון שוק".to_string(), "עלות מעסיק".to_string()];
        let resolved = map.resolve(&headers);
        assert_eq!(resolved.index_of(ColumnRole::Average), Some(0));
        assert_eq!(resolved.index_of(ColumnRole::EmployerCost), Some(1));
        Ok(())
    }

    #[test]
    fn yaml_file_loading() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all("label: [\"רכיב\"]\naverage: [\"ממוצע\"]\n".as_bytes())?;
        let map = RoleMap::from_yaml_file(file.path())?;
        let resolved = map.resolve(&["רכיב".to_string(), "ממוצע".to_string()]);
        assert_eq!(resolved.index_of(ColumnRole::Label), Some(0));
        assert_eq!(resolved.index_of(ColumnRole::Average), Some(1));
        Ok(())
    }

    #[test]
    fn bad_yaml_is_an_error() {
        assert!(RoleMap::from_yaml("average: {not: a list}").is_err());
    }
}
