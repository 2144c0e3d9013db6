//! Paragraph roles and role sets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Semantic role of a detected paragraph.
///
/// Body text carries no role at all. Role strings the service may add in
/// later versions are preserved as [`ParagraphRole::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParagraphRole {
    /// Document title
    Title,
    /// Section heading
    SectionHeading,
    /// Footnote
    Footnote,
    /// Running page header
    PageHeader,
    /// Running page footer
    PageFooter,
    /// Page number
    PageNumber,
    /// Any role not known to this crate, verbatim
    Other(String),
}

impl ParagraphRole {
    /// All roles with a fixed identifier.
    pub const KNOWN: [ParagraphRole; 6] = [
        ParagraphRole::Title,
        ParagraphRole::SectionHeading,
        ParagraphRole::Footnote,
        ParagraphRole::PageHeader,
        ParagraphRole::PageFooter,
        ParagraphRole::PageNumber,
    ];

    /// The identifier used by the analysis service.
    pub fn as_str(&self) -> &str {
        match self {
            ParagraphRole::Title => "title",
            ParagraphRole::SectionHeading => "sectionHeading",
            ParagraphRole::Footnote => "footnote",
            ParagraphRole::PageHeader => "pageHeader",
            ParagraphRole::PageFooter => "pageFooter",
            ParagraphRole::PageNumber => "pageNumber",
            ParagraphRole::Other(name) => name,
        }
    }

    /// Whether this role marks page furniture (header, footer, page number).
    pub fn is_boilerplate(&self) -> bool {
        matches!(
            self,
            ParagraphRole::PageHeader | ParagraphRole::PageFooter | ParagraphRole::PageNumber
        )
    }

    fn bit(&self) -> Option<u8> {
        match self {
            ParagraphRole::Title => Some(1 << 0),
            ParagraphRole::SectionHeading => Some(1 << 1),
            ParagraphRole::Footnote => Some(1 << 2),
            ParagraphRole::PageHeader => Some(1 << 3),
            ParagraphRole::PageFooter => Some(1 << 4),
            ParagraphRole::PageNumber => Some(1 << 5),
            ParagraphRole::Other(_) => None,
        }
    }

    /// Bit of the known role this value names, also for an `Other` carrying
    /// a known identifier such as `Other("pageHeader")`.
    fn canonical_bit(&self) -> Option<u8> {
        match self {
            ParagraphRole::Other(name) => ParagraphRole::from(name.clone()).bit(),
            known => known.bit(),
        }
    }
}

impl From<String> for ParagraphRole {
    fn from(value: String) -> Self {
        // Accepts "pageHeader", "page-header", "page_header", "PAGEHEADER".
        let key: String = value
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "title" => ParagraphRole::Title,
            "sectionheading" => ParagraphRole::SectionHeading,
            "footnote" => ParagraphRole::Footnote,
            "pageheader" => ParagraphRole::PageHeader,
            "pagefooter" => ParagraphRole::PageFooter,
            "pagenumber" => ParagraphRole::PageNumber,
            _ => ParagraphRole::Other(value),
        }
    }
}

impl From<ParagraphRole> for String {
    fn from(role: ParagraphRole) -> Self {
        match role {
            ParagraphRole::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for ParagraphRole {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(ParagraphRole::from(s.to_string()))
    }
}

impl fmt::Display for ParagraphRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of paragraph roles, used as the discard set during reconstruction.
///
/// Known roles are tracked in a bitmask; unknown role names are matched by
/// exact string comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet {
    mask: u8,
    others: Vec<String>,
}

impl RoleSet {
    /// Create an empty role set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Page header, page footer and page number.
    pub fn boilerplate() -> Self {
        [
            ParagraphRole::PageHeader,
            ParagraphRole::PageFooter,
            ParagraphRole::PageNumber,
        ]
        .into_iter()
        .collect()
    }

    /// Add a role to the set.
    pub fn insert(&mut self, role: ParagraphRole) {
        match role.canonical_bit() {
            Some(bit) => self.mask |= bit,
            None => {
                if let ParagraphRole::Other(name) = role {
                    if !self.others.contains(&name) {
                        self.others.push(name);
                    }
                }
            }
        }
    }

    /// Add a role and return self.
    pub fn with(mut self, role: ParagraphRole) -> Self {
        self.insert(role);
        self
    }

    /// Check whether a role is a member of this set.
    pub fn contains(&self, role: &ParagraphRole) -> bool {
        match role.canonical_bit() {
            Some(bit) => self.mask & bit != 0,
            None => self.others.iter().any(|name| name == role.as_str()),
        }
    }

    /// Check if the set has no members.
    pub fn is_empty(&self) -> bool {
        self.mask == 0 && self.others.is_empty()
    }

    /// Number of roles in the set.
    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize + self.others.len()
    }

    /// Iterate over the members, known roles first.
    pub fn iter(&self) -> impl Iterator<Item = ParagraphRole> + '_ {
        ParagraphRole::KNOWN
            .into_iter()
            .filter(move |role| self.contains(role))
            .chain(self.others.iter().cloned().map(ParagraphRole::Other))
    }

    /// Parse a comma-separated role list (e.g., "pageHeader,pageFooter").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(RoleSet::new());
        }

        let mut set = RoleSet::new();
        for part in s.split(',') {
            let part = part.trim();
            if part.is_empty() {
                return Err(Error::InvalidRoleList(format!("empty role name in {:?}", s)));
            }
            set.insert(ParagraphRole::from(part.to_string()));
        }
        Ok(set)
    }
}

impl FromIterator<ParagraphRole> for RoleSet {
    fn from_iter<I: IntoIterator<Item = ParagraphRole>>(iter: I) -> Self {
        let mut set = RoleSet::new();
        for role in iter {
            set.insert(role);
        }
        set
    }
}

impl Extend<ParagraphRole> for RoleSet {
    fn extend<I: IntoIterator<Item = ParagraphRole>>(&mut self, iter: I) {
        for role in iter {
            self.insert(role);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_service_identifier() {
        assert_eq!(ParagraphRole::from("pageHeader".to_string()), ParagraphRole::PageHeader);
        assert_eq!(ParagraphRole::from("page-footer".to_string()), ParagraphRole::PageFooter);
        assert_eq!(ParagraphRole::from("PAGE_NUMBER".to_string()), ParagraphRole::PageNumber);
        assert_eq!(
            ParagraphRole::from("formulaBlock".to_string()),
            ParagraphRole::Other("formulaBlock".to_string())
        );
    }

    #[test]
    fn test_role_serde_round_trip_identifier() {
        let json = serde_json::to_string(&ParagraphRole::SectionHeading).unwrap();
        assert_eq!(json, "\"sectionHeading\"");

        let role: ParagraphRole = serde_json::from_str("\"watermark\"").unwrap();
        assert_eq!(role, ParagraphRole::Other("watermark".to_string()));
        assert_eq!(role.to_string(), "watermark");
    }

    #[test]
    fn test_boilerplate_set() {
        let set = RoleSet::boilerplate();
        assert_eq!(set.len(), 3);
        assert!(set.contains(&ParagraphRole::PageHeader));
        assert!(set.contains(&ParagraphRole::PageFooter));
        assert!(set.contains(&ParagraphRole::PageNumber));
        assert!(!set.contains(&ParagraphRole::Title));
        assert!(ParagraphRole::KNOWN.iter().filter(|r| r.is_boilerplate()).all(|r| set.contains(r)));
    }

    #[test]
    fn test_unknown_roles_match_exactly() {
        let set = RoleSet::new().with(ParagraphRole::Other("watermark".to_string()));
        assert!(set.contains(&ParagraphRole::Other("watermark".to_string())));
        assert!(!set.contains(&ParagraphRole::Other("Watermark".to_string())));
        assert!(!set.contains(&ParagraphRole::PageHeader));
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut set = RoleSet::new();
        set.insert(ParagraphRole::Footnote);
        set.insert(ParagraphRole::Footnote);
        set.insert(ParagraphRole::Other("x".to_string()));
        set.insert(ParagraphRole::Other("x".to_string()));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_unnormalized_other_matches_known_role() {
        let set = RoleSet::new().with(ParagraphRole::Other("pageHeader".to_string()));
        assert!(set.contains(&ParagraphRole::PageHeader));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![ParagraphRole::PageHeader]);

        let set = RoleSet::new().with(ParagraphRole::PageFooter);
        assert!(set.contains(&ParagraphRole::Other("page_footer".to_string())));
        assert!(!set.contains(&ParagraphRole::Other("watermark".to_string())));
    }

    #[test]
    fn test_parse_role_list() {
        let set = RoleSet::parse("pageHeader, page-footer,watermark").unwrap();
        let roles: Vec<_> = set.iter().collect();
        assert_eq!(
            roles,
            vec![
                ParagraphRole::PageHeader,
                ParagraphRole::PageFooter,
                ParagraphRole::Other("watermark".to_string()),
            ]
        );

        assert!(RoleSet::parse("").unwrap().is_empty());
        assert!(matches!(
            RoleSet::parse("pageHeader,,pageFooter"),
            Err(Error::InvalidRoleList(_))
        ));
    }
}
