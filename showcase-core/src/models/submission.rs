//! Contact form submissions

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{bounded_text, email, ValidationError};
use crate::query::{
    FieldConstraint, Record, RecordFilter, SortDirection, SortField, SortSpec,
};

const MAX_NAME_LEN: usize = 100;
const MAX_SUBJECT_LEN: usize = 200;
const MAX_MESSAGE_LEN: usize = 2000;

/// Largest page size the admin list accepts
pub const MAX_SUBMISSION_PAGE_SIZE: u32 = 100;

/// Stored submission record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Validated contact form input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    name: String,
    email: String,
    subject: String,
    message: String,
}

impl NewSubmission {
    /// Validate a contact form.
    ///
    /// # Rules
    /// - name: 1..=100 characters after trimming
    /// - email: valid address
    /// - subject: 1..=200 characters after trimming
    /// - message: 1..=2000 characters after trimming
    pub fn new(
        name: &str,
        email_addr: &str,
        subject: &str,
        message: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: bounded_text("name", name, MAX_NAME_LEN)?,
            email: email("email", email_addr)?,
            subject: bounded_text("subject", subject, MAX_SUBJECT_LEN)?,
            message: bounded_text("message", message, MAX_MESSAGE_LEN)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Sortable submission columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionField {
    Id,
    Name,
    Email,
    Subject,
    Message,
    CreatedAt,
}

impl SortField for SubmissionField {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "id" => Some(Self::Id),
            "name" => Some(Self::Name),
            "email" => Some(Self::Email),
            "subject" => Some(Self::Subject),
            "message" => Some(Self::Message),
            "createdAt" => Some(Self::CreatedAt),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
            Self::CreatedAt => "createdAt",
        }
    }

    fn column(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            other => other.name(),
        }
    }
}

/// Admin list filter (exact match on name, email, subject)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SubmissionFilter {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
}

impl SubmissionFilter {
    /// Reject a malformed `email` filter the same way the form does.
    pub fn validate(self) -> Result<Self, ValidationError> {
        if let Some(addr) = &self.email {
            email("email", addr)?;
        }
        Ok(self)
    }
}

impl RecordFilter<Submission> for SubmissionFilter {
    fn matches(&self, record: &Submission) -> bool {
        self.name.as_deref().map_or(true, |v| v == record.name)
            && self.email.as_deref().map_or(true, |v| v == record.email)
            && self.subject.as_deref().map_or(true, |v| v == record.subject)
    }

    fn constraints(&self) -> Vec<FieldConstraint> {
        [
            (SubmissionField::Name, &self.name),
            (SubmissionField::Email, &self.email),
            (SubmissionField::Subject, &self.subject),
        ]
        .into_iter()
        .filter_map(|(field, value)| {
            value.as_ref().map(|v| FieldConstraint {
                column: field.column(),
                value: v.clone(),
            })
        })
        .collect()
    }
}

impl Record for Submission {
    type Field = SubmissionField;
    type Filter = SubmissionFilter;

    fn id(&self) -> i64 {
        self.id
    }

    fn compare_field(&self, other: &Self, field: SubmissionField) -> Ordering {
        match field {
            SubmissionField::Id => self.id.cmp(&other.id),
            SubmissionField::Name => self.name.cmp(&other.name),
            SubmissionField::Email => self.email.cmp(&other.email),
            SubmissionField::Subject => self.subject.cmp(&other.subject),
            SubmissionField::Message => self.message.cmp(&other.message),
            SubmissionField::CreatedAt => self.created_at.cmp(&other.created_at),
        }
    }

    /// Newest first.
    fn default_sort() -> Option<SortSpec<SubmissionField>> {
        Some(SortSpec::new(SubmissionField::CreatedAt, SortDirection::Desc))
    }
}
