use serde::{Deserialize, Serialize};

/// Deserialize graduation year from string or int (form posts and query
/// strings send text). Blank strings read as absent.
pub(crate) fn deserialize_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum YearValue {
        Int(i32),
        String(String),
        Null,
    }

    match YearValue::deserialize(deserializer)? {
        YearValue::Int(i) => Ok(Some(i)),
        YearValue::String(s) if s.trim().is_empty() => Ok(None),
        YearValue::String(s) => s
            .trim()
            .parse::<i32>()
            .map(Some)
            .map_err(|_| Error::custom(format!("Invalid graduation year: {}", s))),
        YearValue::Null => Ok(None),
    }
}

/// Deserialize the verification flag from a bool or a 0/1 integer
/// (TINYINT exports).
pub(crate) fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FlagValue {
        Bool(bool),
        Int(i64),
        Null,
    }

    match FlagValue::deserialize(deserializer)? {
        FlagValue::Bool(b) => Ok(Some(b)),
        FlagValue::Int(0) => Ok(Some(false)),
        FlagValue::Int(1) => Ok(Some(true)),
        FlagValue::Int(i) => Err(Error::custom(format!("Invalid verified flag: {}", i))),
        FlagValue::Null => Ok(None),
    }
}

/// An alumni record considered for matching against a search query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Candidate {
    /// Alumni id (only required field)
    #[serde(rename = "alumni_id")]
    pub id: i64,

    #[serde(default)]
    pub name: Option<String>,

    /// Field of study (CSE, ECE, ME, CV, ...)
    #[serde(default)]
    pub branch: Option<String>,

    #[serde(default, deserialize_with = "deserialize_year")]
    pub graduation_year: Option<i32>,

    #[serde(default)]
    pub company: Option<String>,

    /// Field of work / specialization
    #[serde(default)]
    pub field: Option<String>,

    #[serde(default, deserialize_with = "deserialize_flag")]
    pub verified: Option<bool>,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub state: Option<String>,

    #[serde(default)]
    pub country: Option<String>,
}

impl Candidate {
    /// Create a candidate with only an id and a name
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.graduation_year = Some(year);
        self
    }

    pub fn with_location(
        mut self,
        city: impl Into<String>,
        state: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        self.city = Some(city.into());
        self.state = Some(state.into());
        self.country = Some(country.into());
        self
    }

    pub fn verified(mut self, verified: bool) -> Self {
        self.verified = Some(verified);
        self
    }

    /// Lowercase match surface: name, field, company, branch, city, state and
    /// country joined by single spaces. Absent or empty fields are skipped.
    pub fn searchable_text(&self) -> String {
        [
            &self.name,
            &self.field,
            &self.company,
            &self.branch,
            &self.city,
            &self.state,
            &self.country,
        ]
        .into_iter()
        .filter_map(|f| f.as_deref())
        .filter(|f| !f.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
    }

    /// City, state and country joined by ", ", or None when all are empty
    pub fn location(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.city, &self.state, &self.country]
            .into_iter()
            .filter_map(|f| f.as_deref())
            .filter(|f| !f.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }

    /// Get display name (for logging/CLI)
    pub fn display_name(&self) -> String {
        let name = self.name.as_deref().unwrap_or("(unnamed)");
        match (&self.branch, self.graduation_year) {
            (Some(branch), Some(year)) => format!("{} ({}, {})", name, branch, year),
            (None, Some(year)) => format!("{} ({})", name, year),
            _ => name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_searchable_text_skips_missing_fields() {
        let candidate = Candidate::new(1, "Asha Rao")
            .with_field("VLSI Design")
            .with_branch("ECE");

        assert_eq!(candidate.searchable_text(), "asha rao vlsi design ece");
        assert!(!candidate.searchable_text().contains("null"));
    }

    #[test]
    fn test_searchable_text_order_and_empty_fields() {
        let candidate = Candidate::new(2, "Ravi")
            .with_company("Intel")
            .with_field("Firmware")
            .with_branch("EEE")
            .with_location("Bengaluru", "", "India");

        assert_eq!(candidate.searchable_text(), "ravi firmware intel eee bengaluru india");
    }

    #[test]
    fn test_searchable_text_without_any_fields() {
        let candidate = Candidate { id: 3, ..Candidate::default() };
        assert_eq!(candidate.searchable_text(), "");
    }

    #[test]
    fn test_location() {
        let candidate = Candidate::new(1, "A").with_location("Pune", "Maharashtra", "India");
        assert_eq!(candidate.location().as_deref(), Some("Pune, Maharashtra, India"));
        assert_eq!(Candidate::new(2, "B").location(), None);
    }

    #[test]
    fn test_deserialize_wire_names() {
        let json = r#"{
            "alumni_id": 42,
            "name": "Meera",
            "branch": "CSE",
            "graduation_year": "2019",
            "company": null,
            "verified": true,
            "city": "Mysuru"
        }"#;

        let candidate: Candidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.id, 42);
        assert_eq!(candidate.graduation_year, Some(2019));
        assert_eq!(candidate.company, None);
        assert_eq!(candidate.verified, Some(true));
        assert_eq!(candidate.country, None);
    }

    #[test]
    fn test_deserialize_rejects_bad_year() {
        let json = r#"{"alumni_id": 1, "graduation_year": "twenty"}"#;
        assert!(serde_json::from_str::<Candidate>(json).is_err());
    }

    #[test]
    fn test_deserialize_integer_verified_flag() {
        let verified: Candidate = serde_json::from_str(r#"{"alumni_id": 1, "verified": 1}"#).unwrap();
        assert_eq!(verified.verified, Some(true));

        let pending: Candidate = serde_json::from_str(r#"{"alumni_id": 2, "verified": 0}"#).unwrap();
        assert_eq!(pending.verified, Some(false));

        let unset: Candidate = serde_json::from_str(r#"{"alumni_id": 3, "verified": null}"#).unwrap();
        assert_eq!(unset.verified, None);

        assert!(serde_json::from_str::<Candidate>(r#"{"alumni_id": 4, "verified": 7}"#).is_err());
    }

    #[test]
    fn test_serialize_uses_alumni_id() {
        let value = serde_json::to_value(Candidate::new(9, "X")).unwrap();
        assert_eq!(value["alumni_id"], 9);
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_display_name() {
        let candidate = Candidate::new(1, "Kiran").with_branch("ME").with_year(2015);
        assert_eq!(candidate.display_name(), "Kiran (ME, 2015)");
    }
}
