//! Shipping-address region state: the three cascading option lists
//! (province → district → ward), the customer's picks, and the tickets that
//! guard lookup completions against stale parents.

use serde::{Deserialize, Serialize};

/// Region identifier as the lookup provider returned it. Providers disagree on
/// whether ids are numbers or strings, so both are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RegionId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegionId::Number(n) => write!(f, "{n}"),
            RegionId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RegionId {
    fn from(value: i64) -> Self {
        RegionId::Number(value)
    }
}

impl From<&str> for RegionId {
    fn from(value: &str) -> Self {
        RegionId::Text(value.to_string())
    }
}

impl RegionId {
    /// Parse user input: all-digit strings without a leading zero become
    /// numbers, anything else is kept as text.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let numeric = !trimmed.starts_with('0') || trimmed == "0";
        match trimmed.parse::<i64>() {
            Ok(n) if numeric => RegionId::Number(n),
            _ => RegionId::Text(trimmed.to_string()),
        }
    }

    /// Loose equality: `1` matches `"1"`. Selected ids typed by a user are
    /// compared against provider ids with this.
    #[must_use]
    pub fn matches(&self, other: &RegionId) -> bool {
        self == other || self.to_string() == other.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionEntry {
    pub id: RegionId,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionLevel {
    Province,
    District,
    Ward,
}

impl std::fmt::Display for RegionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegionLevel::Province => write!(f, "province"),
            RegionLevel::District => write!(f, "district"),
            RegionLevel::Ward => write!(f, "ward"),
        }
    }
}

/// Which endpoint family produced a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionSource {
    Primary,
    Fallback,
}

/// Options for one level, all from a single endpoint. An empty list with no
/// source means both endpoints failed (or nothing was loaded yet).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionList {
    pub source: Option<RegionSource>,
    pub entries: Vec<RegionEntry>,
}

impl RegionList {
    #[must_use]
    pub fn from_source(source: RegionSource, entries: Vec<RegionEntry>) -> Self {
        Self {
            source: Some(source),
            entries,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn name_of(&self, id: &RegionId) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.id.matches(id))
            .map(|entry| entry.name.as_str())
    }
}

/// Issued when a lookup is dispatched; the completion is accepted only if the
/// ticket still matches the address book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupTicket {
    pub level: RegionLevel,
    /// Parent id current at dispatch time (`None` for provinces).
    pub parent: Option<RegionId>,
    /// Endpoint family the parent id came from. Child lookups stay on it.
    pub family: Option<RegionSource>,
    generation: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressBook {
    provinces: RegionList,
    districts: RegionList,
    wards: RegionList,
    province: Option<RegionId>,
    district: Option<RegionId>,
    ward: Option<RegionId>,
    generations: [u64; 3],
}

impl AddressBook {
    #[must_use]
    pub fn provinces(&self) -> &RegionList {
        &self.provinces
    }

    #[must_use]
    pub fn districts(&self) -> &RegionList {
        &self.districts
    }

    #[must_use]
    pub fn wards(&self) -> &RegionList {
        &self.wards
    }

    #[must_use]
    pub fn province(&self) -> Option<&RegionId> {
        self.province.as_ref()
    }

    #[must_use]
    pub fn district(&self) -> Option<&RegionId> {
        self.district.as_ref()
    }

    #[must_use]
    pub fn ward(&self) -> Option<&RegionId> {
        self.ward.as_ref()
    }

    /// Ticket for (re)loading the province list.
    pub fn request_provinces(&mut self) -> LookupTicket {
        self.issue(RegionLevel::Province, None, None)
    }

    /// Pick a province. District and ward picks and their lists are cleared
    /// before the returned district lookup may be dispatched; clearing the
    /// province returns no ticket.
    pub fn select_province(&mut self, id: Option<RegionId>) -> Option<LookupTicket> {
        self.province = id;
        self.district = None;
        self.ward = None;
        self.districts = RegionList::default();
        self.wards = RegionList::default();
        self.bump(RegionLevel::Ward);

        match self.province.clone() {
            Some(parent) => {
                let family = self.provinces.source;
                Some(self.issue(RegionLevel::District, Some(parent), family))
            }
            None => {
                self.bump(RegionLevel::District);
                None
            }
        }
    }

    /// Pick a district. The ward pick and list are cleared before the returned
    /// ward lookup may be dispatched.
    pub fn select_district(&mut self, id: Option<RegionId>) -> Option<LookupTicket> {
        self.district = id;
        self.ward = None;
        self.wards = RegionList::default();

        match self.district.clone() {
            Some(parent) => {
                let family = self.districts.source;
                Some(self.issue(RegionLevel::Ward, Some(parent), family))
            }
            None => {
                self.bump(RegionLevel::Ward);
                None
            }
        }
    }

    pub fn select_ward(&mut self, id: Option<RegionId>) {
        self.ward = id;
    }

    /// Apply a finished lookup. Returns `false` (and changes nothing) when the
    /// ticket was superseded by a later lookup or parent change.
    pub fn complete(&mut self, ticket: &LookupTicket, list: RegionList) -> bool {
        if ticket.generation != self.generation(ticket.level) {
            return false;
        }

        let current_parent = match ticket.level {
            RegionLevel::Province => None,
            RegionLevel::District => self.province.as_ref(),
            RegionLevel::Ward => self.district.as_ref(),
        };
        if current_parent != ticket.parent.as_ref() {
            return false;
        }

        match ticket.level {
            RegionLevel::Province => self.provinces = list,
            RegionLevel::District => self.districts = list,
            RegionLevel::Ward => self.wards = list,
        }
        true
    }

    #[must_use]
    pub fn province_name(&self) -> Option<&str> {
        self.province
            .as_ref()
            .and_then(|id| self.provinces.name_of(id))
    }

    #[must_use]
    pub fn district_name(&self) -> Option<&str> {
        self.district
            .as_ref()
            .and_then(|id| self.districts.name_of(id))
    }

    #[must_use]
    pub fn ward_name(&self) -> Option<&str> {
        self.ward.as_ref().and_then(|id| self.wards.name_of(id))
    }

    fn issue(
        &mut self,
        level: RegionLevel,
        parent: Option<RegionId>,
        family: Option<RegionSource>,
    ) -> LookupTicket {
        let generation = self.bump(level);
        LookupTicket {
            level,
            parent,
            family,
            generation,
        }
    }

    fn bump(&mut self, level: RegionLevel) -> u64 {
        let slot = &mut self.generations[level_index(level)];
        *slot = slot.wrapping_add(1);
        *slot
    }

    fn generation(&self, level: RegionLevel) -> u64 {
        self.generations[level_index(level)]
    }
}

fn level_index(level: RegionLevel) -> usize {
    match level {
        RegionLevel::Province => 0,
        RegionLevel::District => 1,
        RegionLevel::Ward => 2,
    }
}

#[cfg(test)]
#[path = "region_test.rs"]
mod tests;
