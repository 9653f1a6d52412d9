//! Sample content for local development and demo databases

use crate::models::{NewFeature, NewSubmission, ValidationError};

/// (title, description, icon, color)
const SAMPLE_FEATURES: &[(&str, &str, &str, &str)] = &[
    (
        "Fast Performance",
        "Lightning fast application performance",
        "zap",
        "blue",
    ),
    (
        "Secure",
        "Enterprise-grade security features",
        "shield",
        "green",
    ),
    (
        "Scalable",
        "Built to scale with your business needs",
        "trending-up",
        "purple",
    ),
    (
        "Easy to Use",
        "Intuitive interface designed for everyone",
        "heart",
        "red",
    ),
];

/// (name, email, subject, message)
const SAMPLE_SUBMISSIONS: &[(&str, &str, &str, &str)] = &[
    (
        "John Doe",
        "john.doe@example.com",
        "Question about features",
        "I would like to know more about your features and pricing.",
    ),
    (
        "Jane Smith",
        "jane.smith@example.com",
        "Support request",
        "I need help with setting up my account.",
    ),
    (
        "Bob Johnson",
        "bob.johnson@example.com",
        "Partnership inquiry",
        "I am interested in exploring partnership opportunities.",
    ),
];

/// Landing page features, validated.
pub fn sample_features() -> Result<Vec<NewFeature>, ValidationError> {
    SAMPLE_FEATURES
        .iter()
        .map(|(title, description, icon, color)| NewFeature::new(title, description, icon, color))
        .collect()
}

/// Demo contact form submissions, validated.
pub fn sample_submissions() -> Result<Vec<NewSubmission>, ValidationError> {
    SAMPLE_SUBMISSIONS
        .iter()
        .map(|(name, email, subject, message)| NewSubmission::new(name, email, subject, message))
        .collect()
}
