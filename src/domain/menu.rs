/// A purchasable dish as cached locally.
///
/// Items are immutable once fetched; a refresh replaces the whole set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub image_url: String,
    pub category: String,
}

impl MenuItem {
    pub fn new(
        id: i64,
        title: impl Into<String>,
        description: impl Into<String>,
        price: i64,
        image_url: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            price,
            image_url: image_url.into(),
            category: category.into(),
        }
    }

    /// Case-insensitive exact match on the category.
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }
}

/// Result of looking up a menu item by id in the currently loaded set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItemLookup {
    Found(MenuItem),
    NotFound(i64),
}

impl MenuItemLookup {
    pub fn find(items: &[MenuItem], id: i64) -> Self {
        items
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .map_or(Self::NotFound(id), Self::Found)
    }
}

/// Search phrase plus optional category used to narrow the visible menu.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuQuery {
    pub search_phrase: String,
    pub category: Option<String>,
}

impl MenuQuery {
    pub fn matches(&self, item: &MenuItem) -> bool {
        let phrase = self.search_phrase.trim().to_lowercase();
        let phrase_ok = phrase.is_empty()
            || item.title.to_lowercase().contains(&phrase)
            || item.description.to_lowercase().contains(&phrase);

        let category_ok = self
            .category
            .as_deref()
            .map_or(true, |category| item.in_category(category));

        phrase_ok && category_ok
    }

    pub fn apply(&self, items: &[MenuItem]) -> Vec<MenuItem> {
        items.iter().filter(|item| self.matches(item)).cloned().collect()
    }
}

/// Distinct categories in first-seen order, with the first character upper-cased
/// for display.
pub fn display_categories(items: &[MenuItem]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for item in items {
        let display = capitalize(&item.category);
        if !seen.contains(&display) {
            seen.push(display);
        }
    }
    seen
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
