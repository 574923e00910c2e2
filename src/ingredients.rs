use serde::Serialize;

/// Seed shown on first load so the list is never blank.
pub const DEFAULT_INGREDIENTS: [&str; 3] = ["Tomato", "Onion", "Garlic"];

/// Ordered, case-insensitively unique list of trimmed ingredient names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IngredientList {
    items: Vec<String>,
}

impl Default for IngredientList {
    fn default() -> Self {
        Self {
            items: DEFAULT_INGREDIENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl IngredientList {
    pub fn empty() -> Self {
        Self { items: Vec::new() }
    }

    /// Append `raw` trimmed. Blank input and case-insensitive duplicates are
    /// ignored without error; the return value says whether the list changed.
    pub fn add(&mut self, raw: &str) -> bool {
        let name = raw.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.items.push(name.to_string());
        true
    }

    /// Remove the first exact match. Absent names are a no-op.
    pub fn remove(&mut self, ingredient: &str) -> bool {
        match self.items.iter().position(|i| i == ingredient) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Case-insensitive membership.
    pub fn contains(&self, name: &str) -> bool {
        let needle = name.trim().to_lowercase();
        self.items.iter().any(|i| i.to_lowercase() == needle)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for IngredientList {
    /// Collects through `add`, so the usual trimming and dedup rules apply.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = Self::empty();
        for raw in iter {
            list.add(raw.as_ref());
        }
        list
    }
}
