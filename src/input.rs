//! Physical input code database and validation.
//!
//! Bindings store a [`InputCode`]: a virtual-key style code in the range the
//! host injection backend understands. The database maps codes to display
//! names and categories, with lookup in both directions and substring search
//! for the CLI picker.

use std::collections::HashMap;
use std::fmt;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// A physical input code (virtual-key style).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputCode(pub u16);

impl InputCode {
    /// Wraps a raw code.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// The raw code value.
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl fmt::Display for InputCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Well-known input codes referenced by the default bindings.
pub mod codes {
    use super::InputCode;

    /// Left mouse button.
    pub const LMBUTTON: InputCode = InputCode::new(0x01);
    /// Tab key.
    pub const TAB: InputCode = InputCode::new(0x09);
    /// Enter key.
    pub const ENTER: InputCode = InputCode::new(0x0D);
    /// Shift key.
    pub const SHIFT: InputCode = InputCode::new(0x10);
    /// Control key.
    pub const CTRL: InputCode = InputCode::new(0x11);
    /// Alt (menu) key.
    pub const ALT: InputCode = InputCode::new(0x12);
    /// Page down key.
    pub const PAGE_DOWN: InputCode = InputCode::new(0x22);
    /// Left arrow.
    pub const LEFT: InputCode = InputCode::new(0x25);
    /// Up arrow.
    pub const UP: InputCode = InputCode::new(0x26);
    /// Right arrow.
    pub const RIGHT: InputCode = InputCode::new(0x27);
    /// Down arrow.
    pub const DOWN: InputCode = InputCode::new(0x28);
    /// Letter A.
    pub const KEY_A: InputCode = InputCode::new(0x41);
    /// Letter B.
    pub const KEY_B: InputCode = InputCode::new(0x42);
    /// Letter D.
    pub const KEY_D: InputCode = InputCode::new(0x44);
    /// Letter S.
    pub const KEY_S: InputCode = InputCode::new(0x53);
    /// Letter W.
    pub const KEY_W: InputCode = InputCode::new(0x57);
}

/// Category of input codes for organization in the CLI listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputCategory {
    /// Category ID (e.g., "mouse", "navigation")
    pub id: String,
    /// Display name (e.g., "Mouse Buttons")
    pub name: String,
    /// Description of what codes are in this category
    pub description: String,
}

/// Individual input code definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputCodeDef {
    /// The raw code value
    pub code: u16,
    /// Display name (e.g., "ENTER", "PageDOWN")
    pub name: String,
    /// Category ID
    pub category: String,
    /// Alternative names (e.g., "RETURN" for "ENTER")
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Database schema from input_codes.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct InputCodeTable {
    version: String,
    categories: Vec<InputCategory>,
    codes: Vec<InputCodeDef>,
}

/// Input code database with fast lookup in both directions.
///
/// The table is embedded in the binary at compile time and loaded once at
/// startup. A malformed or self-contradictory table (duplicate codes or
/// names) is a schema-authoring bug and fails the load, not a runtime error.
#[derive(Debug, Clone)]
pub struct InputCodeDb {
    /// All code definitions
    defs: Vec<InputCodeDef>,
    /// Category definitions
    categories: Vec<InputCategory>,
    /// Fast lookup by raw code
    by_code: HashMap<u16, usize>,
    /// Fast lookup by uppercased name or alias
    by_name: HashMap<String, usize>,
}

impl InputCodeDb {
    /// Loads the input code database from the embedded JSON table.
    pub fn load() -> Result<Self> {
        let json_data = include_str!("input_codes.json");
        let table: InputCodeTable =
            serde_json::from_str(json_data).context("Failed to parse embedded input_codes.json")?;

        let mut by_code = HashMap::new();
        let mut by_name = HashMap::new();

        for (idx, def) in table.codes.iter().enumerate() {
            if by_code.insert(def.code, idx).is_some() {
                bail!("input code table defines code {} twice", def.code);
            }
            if by_name.insert(def.name.to_uppercase(), idx).is_some() {
                bail!("input code table defines name {} twice", def.name);
            }
            for alias in &def.aliases {
                if by_name.insert(alias.to_uppercase(), idx).is_some() {
                    bail!("input code table defines name {} twice", alias);
                }
            }
        }

        Ok(Self {
            defs: table.codes,
            categories: table.categories,
            by_code,
            by_name,
        })
    }

    /// Returns true if the code is a recognized physical input.
    #[must_use]
    pub fn is_valid(&self, code: InputCode) -> bool {
        self.by_code.contains_key(&code.value())
    }

    /// Resolves a display name or alias (case-insensitive) to its code.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<InputCode> {
        let idx = self.by_name.get(&name.to_uppercase())?;
        self.defs.get(*idx).map(|def| InputCode::new(def.code))
    }

    /// Gets the definition for a code.
    #[must_use]
    pub fn get(&self, code: InputCode) -> Option<&InputCodeDef> {
        let idx = self.by_code.get(&code.value())?;
        self.defs.get(*idx)
    }

    /// Gets the display name for a code, if the code is recognized.
    #[must_use]
    pub fn name_of(&self, code: InputCode) -> Option<&str> {
        self.get(code).map(|def| def.name.as_str())
    }

    /// Returns true if the code is a mouse button rather than a key.
    ///
    /// Consumers inject mouse-button codes as mouse events instead of key
    /// presses.
    #[must_use]
    pub fn is_mouse_button(&self, code: InputCode) -> bool {
        self.get(code).is_some_and(|def| def.category == "mouse")
    }

    /// Searches for codes by fuzzy matching the name or aliases.
    ///
    /// Returns definitions where the query appears as a substring
    /// (case-insensitive). Results are sorted by relevance.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&InputCodeDef> {
        if query.is_empty() {
            return self.defs.iter().collect();
        }

        let query_upper = query.to_uppercase();
        let mut results: Vec<(&InputCodeDef, i32)> = self
            .defs
            .iter()
            .filter_map(|def| {
                let name_upper = def.name.to_uppercase();

                // Exact match (highest priority)
                if name_upper == query_upper
                    || def.aliases.iter().any(|a| a.to_uppercase() == query_upper)
                {
                    return Some((def, 100));
                }

                // Starts with query (high priority)
                if name_upper.starts_with(&query_upper) {
                    return Some((def, 50));
                }

                // Contains query in name or alias (medium priority)
                if name_upper.contains(&query_upper)
                    || def
                        .aliases
                        .iter()
                        .any(|a| a.to_uppercase().contains(&query_upper))
                {
                    return Some((def, 10));
                }

                None
            })
            .collect();

        // Sort by relevance (descending)
        results.sort_by(|a, b| b.1.cmp(&a.1));

        results.into_iter().map(|(def, _)| def).collect()
    }

    /// Gets all definitions in a category.
    #[must_use]
    pub fn category_codes(&self, category_id: &str) -> Vec<&InputCodeDef> {
        self.defs
            .iter()
            .filter(|def| def.category == category_id)
            .collect()
    }

    /// Gets all categories.
    #[must_use]
    pub fn categories(&self) -> &[InputCategory] {
        &self.categories
    }

    /// Gets all code definitions.
    #[must_use]
    pub fn defs(&self) -> &[InputCodeDef] {
        &self.defs
    }

    /// Gets the total number of defined codes.
    #[must_use]
    pub fn code_count(&self) -> usize {
        self.defs.len()
    }
}
