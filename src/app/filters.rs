// src/app/filters.rs

/// The six user-adjustable filter dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterField {
    Search,
    Platforms,
    Genres,
    Tags,
    Developers,
    Dates,
}

impl FilterField {
    pub const ALL: [Self; 6] = [
        Self::Search,
        Self::Platforms,
        Self::Genres,
        Self::Tags,
        Self::Developers,
        Self::Dates,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Platforms => "platforms",
            Self::Genres => "genres",
            Self::Tags => "tags",
            Self::Developers => "developers",
            Self::Dates => "dates",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "search" | "q" => Some(Self::Search),
            "platforms" | "platform" => Some(Self::Platforms),
            "genres" | "genre" => Some(Self::Genres),
            "tags" | "tag" => Some(Self::Tags),
            "developers" | "developer" => Some(Self::Developers),
            "dates" | "year" => Some(Self::Dates),
            _ => None,
        }
    }

    /// Free text is debounced; every other field is a discrete facet.
    pub const fn is_facet(self) -> bool {
        !matches!(self, Self::Search)
    }
}

/// Current filter snapshot. Every field is always present; an unset facet is
/// the empty string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search: String,
    pub platforms: String,
    pub genres: String,
    pub tags: String,
    pub developers: String,
    /// "YYYY-MM-DD,YYYY-MM-DD" or empty.
    pub dates: String,
}

impl FilterState {
    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Search => &self.search,
            FilterField::Platforms => &self.platforms,
            FilterField::Genres => &self.genres,
            FilterField::Tags => &self.tags,
            FilterField::Developers => &self.developers,
            FilterField::Dates => &self.dates,
        }
    }

    /// Copy-on-write update: a new snapshot with only `field` replaced.
    #[must_use]
    pub fn with(&self, field: FilterField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let value = value.into();
        match field {
            FilterField::Search => next.search = value,
            FilterField::Platforms => next.platforms = value,
            FilterField::Genres => next.genres = value,
            FilterField::Tags => next.tags = value,
            FilterField::Developers => next.developers = value,
            FilterField::Dates => next.dates = value,
        }
        next
    }

    pub fn is_empty(&self) -> bool {
        FilterField::ALL.iter().all(|f| self.get(*f).is_empty())
    }
}
