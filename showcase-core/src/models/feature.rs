//! Feature cards shown on the landing page

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{required_text, ValidationError};
use crate::query::{FieldConstraint, Record, RecordFilter, SortField, SortSpec};

/// Stored feature record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public rendering of a feature, `id` as a string
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicFeature {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Feature> for PublicFeature {
    fn from(f: Feature) -> Self {
        Self {
            id: f.id.to_string(),
            title: f.title,
            description: f.description,
            icon: f.icon,
            color: f.color,
            created_at: f.created_at,
            updated_at: f.updated_at,
        }
    }
}

/// Validated input for creating a feature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeature {
    title: String,
    description: String,
    icon: String,
    color: String,
}

impl NewFeature {
    /// All four fields are required and must not be blank.
    pub fn new(
        title: &str,
        description: &str,
        icon: &str,
        color: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            title: required_text("title", title)?,
            description: required_text("description", description)?,
            icon: required_text("icon", icon)?,
            color: required_text("color", color)?,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn color(&self) -> &str {
        &self.color
    }
}

/// Validated partial update; at least one field is set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeaturePatch {
    title: Option<String>,
    description: Option<String>,
    icon: Option<String>,
    color: Option<String>,
}

impl FeaturePatch {
    pub fn new(
        title: Option<&str>,
        description: Option<&str>,
        icon: Option<&str>,
        color: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let patch = Self {
            title: title.map(|v| required_text("title", v)).transpose()?,
            description: description
                .map(|v| required_text("description", v))
                .transpose()?,
            icon: icon.map(|v| required_text("icon", v)).transpose()?,
            color: color.map(|v| required_text("color", v)).transpose()?,
        };

        if patch.title.is_none()
            && patch.description.is_none()
            && patch.icon.is_none()
            && patch.color.is_none()
        {
            return Err(ValidationError::NothingToUpdate);
        }

        Ok(patch)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Apply the present fields to `feature` and stamp `updated_at`.
    pub fn apply_to(&self, feature: &mut Feature, now: DateTime<Utc>) {
        if let Some(title) = &self.title {
            feature.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            feature.description.clone_from(description);
        }
        if let Some(icon) = &self.icon {
            feature.icon.clone_from(icon);
        }
        if let Some(color) = &self.color {
            feature.color.clone_from(color);
        }
        feature.updated_at = now;
    }
}

/// Sortable feature columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureField {
    Id,
    Title,
    Description,
    Icon,
    Color,
    CreatedAt,
    UpdatedAt,
}

impl SortField for FeatureField {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "id" => Some(Self::Id),
            "title" => Some(Self::Title),
            "description" => Some(Self::Description),
            "icon" => Some(Self::Icon),
            "color" => Some(Self::Color),
            "createdAt" => Some(Self::CreatedAt),
            "updatedAt" => Some(Self::UpdatedAt),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Description => "description",
            Self::Icon => "icon",
            Self::Color => "color",
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
        }
    }

    fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Description => "description",
            Self::Icon => "icon",
            Self::Color => "color",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

/// Admin list filter (exact match on title)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FeatureFilter {
    pub title: Option<String>,
}

impl RecordFilter<Feature> for FeatureFilter {
    fn matches(&self, record: &Feature) -> bool {
        self.title.as_deref().map_or(true, |t| t == record.title)
    }

    fn constraints(&self) -> Vec<FieldConstraint> {
        self.title
            .iter()
            .map(|t| FieldConstraint {
                column: FeatureField::Title.column(),
                value: t.clone(),
            })
            .collect()
    }
}

impl Record for Feature {
    type Field = FeatureField;
    type Filter = FeatureFilter;

    fn id(&self) -> i64 {
        self.id
    }

    fn compare_field(&self, other: &Self, field: FeatureField) -> Ordering {
        match field {
            FeatureField::Id => self.id.cmp(&other.id),
            FeatureField::Title => self.title.cmp(&other.title),
            FeatureField::Description => self.description.cmp(&other.description),
            FeatureField::Icon => self.icon.cmp(&other.icon),
            FeatureField::Color => self.color.cmp(&other.color),
            FeatureField::CreatedAt => self.created_at.cmp(&other.created_at),
            FeatureField::UpdatedAt => self.updated_at.cmp(&other.updated_at),
        }
    }

    /// Insertion order. Submissions default to newest first; features never
    /// had a default sort and keep store order.
    fn default_sort() -> Option<SortSpec<FeatureField>> {
        None
    }
}
