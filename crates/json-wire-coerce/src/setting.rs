//! `PropertySetting` — immutable per-call configuration.

/// Translation between declared field names and wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamingPolicy {
    /// Wire names are the declared names, verbatim.
    #[default]
    AsDeclared,
    /// Declared `snake_case` names appear as `camelCase` on the wire.
    CamelCase,
    /// Declared `camelCase` names appear as `snake_case` on the wire.
    SnakeCase,
}

impl NamingPolicy {
    /// The wire name for a declared field name. Decode matches document
    /// fields against this; encode emits it.
    pub fn wire_name(&self, declared: &str) -> String {
        match self {
            NamingPolicy::AsDeclared => declared.to_string(),
            NamingPolicy::CamelCase => {
                let mut out = String::with_capacity(declared.len());
                let mut upper_next = false;
                for c in declared.chars() {
                    if c == '_' {
                        upper_next = true;
                    } else if upper_next {
                        out.extend(c.to_uppercase());
                        upper_next = false;
                    } else {
                        out.push(c);
                    }
                }
                out
            }
            NamingPolicy::SnakeCase => {
                let mut out = String::with_capacity(declared.len() + 4);
                for c in declared.chars() {
                    if c.is_uppercase() {
                        out.push('_');
                        out.extend(c.to_lowercase());
                    } else {
                        out.push(c);
                    }
                }
                out
            }
        }
    }
}

/// Treatment of null-valued object and bean entries on encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullPolicy {
    /// Omit the entry entirely.
    #[default]
    SkipNulls,
    /// Emit the entry with an explicit `null`.
    EmitNulls,
}

/// Treatment of a repeated key while decoding a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateKeyPolicy {
    /// A repeated key is an error.
    #[default]
    Fail,
    /// The later value silently replaces the earlier one.
    LastWins,
}

/// Per-call decode/encode configuration. Construct once and pass by
/// reference; nothing in the engine mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PropertySetting {
    pub naming: NamingPolicy,
    pub nulls: NullPolicy,
    pub duplicates: DuplicateKeyPolicy,
    /// Permit precision-losing numeric narrowing (for example a
    /// fractional value requested as an integer) instead of failing.
    pub lossy_narrowing: bool,
}

impl PropertySetting {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn naming(mut self, naming: NamingPolicy) -> Self {
        self.naming = naming;
        self
    }

    pub fn nulls(mut self, nulls: NullPolicy) -> Self {
        self.nulls = nulls;
        self
    }

    pub fn duplicates(mut self, duplicates: DuplicateKeyPolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    pub fn lossy_narrowing(mut self, lossy: bool) -> Self {
        self.lossy_narrowing = lossy;
        self
    }
}
