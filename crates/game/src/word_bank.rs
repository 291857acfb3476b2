use shared::{domain::CategorySummary, error::GameError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    pub icon: &'static str,
    pub words: &'static [&'static str],
}

impl Category {
    pub fn summary(&self) -> CategorySummary {
        CategorySummary {
            name: self.name.to_string(),
            icon: self.icon.to_string(),
        }
    }
}

const BUILTIN_CATEGORIES: &[Category] = &[
    Category {
        name: "Vegetables",
        icon: "🥦",
        words: &["tomato", "carrot", "potato", "onion", "spinach"],
    },
    Category {
        name: "Animals",
        icon: "🐶",
        words: &["tiger", "elephant", "giraffe", "monkey", "zebra"],
    },
    Category {
        name: "Fruits",
        icon: "🍎",
        words: &["banana", "apple", "mango", "cherry", "grape"],
    },
    Category {
        name: "Countries",
        icon: "🌍",
        words: &["canada", "germany", "brazil", "india", "france"],
    },
    Category {
        name: "Colors",
        icon: "🎨",
        words: &["red", "blue", "green", "yellow", "purple"],
    },
    Category {
        name: "Sports",
        icon: "⚽",
        words: &["football", "tennis", "cricket", "hockey", "golf"],
    },
    Category {
        name: "Body Parts",
        icon: "🦵",
        words: &["heart", "liver", "brain", "stomach", "lungs"],
    },
    Category {
        name: "Clothes",
        icon: "👕",
        words: &["shirt", "jeans", "jacket", "socks", "scarf"],
    },
    Category {
        name: "Professions",
        icon: "👩‍⚕️",
        words: &["doctor", "engineer", "teacher", "artist", "lawyer"],
    },
];

static BUILTIN: WordBank = WordBank::new(BUILTIN_CATEGORIES);

/// Read-only category table shared by every session.
#[derive(Debug, Clone, Copy)]
pub struct WordBank {
    categories: &'static [Category],
}

impl WordBank {
    pub const fn new(categories: &'static [Category]) -> Self {
        Self { categories }
    }

    pub fn builtin() -> &'static WordBank {
        &BUILTIN
    }

    /// Categories in menu order.
    pub fn categories(&self) -> &'static [Category] {
        self.categories
    }

    pub fn list_categories(&self) -> Vec<CategorySummary> {
        self.categories.iter().map(Category::summary).collect()
    }

    pub fn category(&self, name: &str) -> Result<&'static Category, GameError> {
        self.categories
            .iter()
            .find(|category| category.name == name)
            .ok_or_else(|| GameError::UnknownCategory(name.to_string()))
    }

    pub fn words_for(&self, name: &str) -> Result<&'static [&'static str], GameError> {
        self.category(name).map(|category| category.words)
    }

    /// Resolves a name typed by a person: exact match first, then ASCII
    /// case-insensitive.
    pub fn find_category_loose(&self, name: &str) -> Option<&'static Category> {
        let name = name.trim();
        self.category(name).ok().or_else(|| {
            self.categories
                .iter()
                .find(|category| category.name.eq_ignore_ascii_case(name))
        })
    }

    /// Problems that make the table unusable for play. Empty when healthy.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        for (index, category) in self.categories.iter().enumerate() {
            if self.categories[..index]
                .iter()
                .any(|earlier| earlier.name == category.name)
            {
                problems.push(format!("duplicate category name '{}'", category.name));
            }
            if category.words.is_empty() {
                problems.push(format!("category '{}' has no words", category.name));
            }
            for word in category.words {
                if word.is_empty() || !word.chars().all(|c| c.is_ascii_lowercase()) {
                    problems.push(format!(
                        "category '{}' has non-lowercase-alphabetic word '{word}'",
                        category.name
                    ));
                }
            }
        }
        problems
    }
}
