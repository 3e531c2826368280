//! Multi-label binary encoding for delimited treatment-type and
//! embryo-purpose fields.
//!
//! Each field has a fixed, ordered set of flag names. A token sets a flag when
//! it *contains* the flag's keyword, so one token can set several flags
//! (`"ICSI-AH"` sets both `is_ICSI` and `has_AH`). Flags are only ever
//! switched on.

/// Treatment-type flags, in output column order.
pub const TREATMENT_FLAGS: [&str; 11] = [
    "is_IVF",
    "is_ICSI",
    "is_IUI",
    "is_ICI",
    "is_GIFT",
    "is_FER",
    "is_Generic_DI",
    "is_IVI",
    "has_BLASTOCYST",
    "has_AH",
    "is_Unknown",
];

/// Embryo-purpose flags, in output column order.
pub const PURPOSE_FLAGS: [&str; 5] = [
    "is_donation_purpose",
    "is_egg_storage_purpose",
    "is_embryo_storage_purpose",
    "is_research_purpose",
    "is_current_treatment_purpose",
];

/// Keyword for each treatment flag except `is_Unknown`, in the same order as
/// [`TREATMENT_FLAGS`].
const TREATMENT_KEYWORDS: [&str; 10] = [
    "IVF",
    "ICSI",
    "IUI",
    "ICI",
    "GIFT",
    "FER",
    "Generic DI",
    "IVI",
    "BLASTOCYST",
    "AH",
];

/// Keyword for each purpose flag, in the same order as [`PURPOSE_FLAGS`].
const PURPOSE_KEYWORDS: [&str; 5] = ["기증용", "난자 저장용", "배아 저장용", "연구용", "현재 시술용"];

const TREATMENT_UNKNOWN_SENTINEL: &str = "Unknown";
const TREATMENT_GROUP_DELIMITER: char = ':';
const TREATMENT_ALTERNATIVE_DELIMITER: char = '/';
const PURPOSE_DELIMITER: char = ',';

/// A fixed set of named binary flags produced by one encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelFlags {
    names: &'static [&'static str],
    values: Vec<bool>,
}

impl LabelFlags {
    /// All flags cleared.
    pub fn cleared(names: &'static [&'static str]) -> Self {
        Self {
            names,
            values: vec![false; names.len()],
        }
    }

    /// Flag names in output order.
    pub fn names(&self) -> &'static [&'static str] {
        self.names
    }

    /// `Some(0 | 1)` for a known flag name, `None` otherwise.
    pub fn get(&self, name: &str) -> Option<u8> {
        self.index_of(name)
            .and_then(|idx| self.values.get(idx))
            .map(|set| u8::from(*set))
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.get(name) == Some(1)
    }

    /// Number of flags switched on.
    pub fn set_count(&self) -> usize {
        self.values.iter().filter(|v| **v).count()
    }

    /// `(name, 0 | 1)` pairs in output order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u8)> + '_ {
        self.names
            .iter()
            .copied()
            .zip(self.values.iter().map(|v| u8::from(*v)))
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| *n == name)
    }

    fn raise(&mut self, idx: usize) {
        if let Some(slot) = self.values.get_mut(idx) {
            *slot = true;
        }
    }

    fn raise_matching(&mut self, token: &str, keywords: &[&str]) {
        for (idx, keyword) in keywords.iter().enumerate() {
            if token.contains(keyword) {
                self.raise(idx);
            }
        }
    }
}

/// Encodes a `:`/`/` delimited treatment-type string into
/// [`TREATMENT_FLAGS`].
///
/// A missing value or the literal `Unknown` sets only `is_Unknown`.
pub fn encode_treatment_type(raw: Option<&str>) -> LabelFlags {
    let mut flags = LabelFlags::cleared(&TREATMENT_FLAGS);

    let Some(raw) = raw.filter(|s| *s != TREATMENT_UNKNOWN_SENTINEL) else {
        flags.raise(TREATMENT_KEYWORDS.len());
        return flags;
    };

    raw.split(TREATMENT_GROUP_DELIMITER)
        .flat_map(|group| group.split(TREATMENT_ALTERNATIVE_DELIMITER))
        .map(str::trim)
        .for_each(|token| flags.raise_matching(token, &TREATMENT_KEYWORDS));

    flags
}

/// Encodes a comma separated embryo-purpose string into [`PURPOSE_FLAGS`].
///
/// A missing value leaves every flag cleared; there is no unknown flag.
pub fn encode_embryo_purpose(raw: Option<&str>) -> LabelFlags {
    let mut flags = LabelFlags::cleared(&PURPOSE_FLAGS);

    if let Some(raw) = raw {
        raw.split(PURPOSE_DELIMITER)
            .map(str::trim)
            .for_each(|token| flags.raise_matching(token, &PURPOSE_KEYWORDS));
    }

    flags
}
