//! Draft validation, run before any create/update request is sent.
//!
//! A draft that fails validation never reaches the record store; the
//! failure is surfaced to the caller as a `ValidationError`.

use crate::{AccountDraft, ContactDraft, DealDraft, LeadDraft, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

fn require(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::RequiredFieldMissing {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validate a monetary amount: finite and non-negative.
pub fn validate_non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            reason: "must be a non-negative number".to_string(),
        });
    }
    Ok(())
}

/// Validate an email address shape.
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if EMAIL_RE.is_match(value.trim()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail {
            value: value.to_string(),
        })
    }
}

/// Validate a deal draft: title present, value non-negative.
pub fn validate_deal_draft(draft: &DealDraft) -> Result<(), ValidationError> {
    require("title", &draft.title)?;
    require("stage", &draft.stage)?;
    validate_non_negative("value", draft.value)?;
    Ok(())
}

/// Validate a lead draft: name and a well-formed email are required,
/// score stays in 0-100, estimated value non-negative.
pub fn validate_lead_draft(draft: &LeadDraft) -> Result<(), ValidationError> {
    require("name", &draft.name)?;
    require("email", &draft.email)?;
    validate_email(&draft.email)?;
    if !(0..=100).contains(&draft.score) {
        return Err(ValidationError::InvalidValue {
            field: "score".to_string(),
            reason: "must be between 0 and 100".to_string(),
        });
    }
    validate_non_negative("estimated_value", draft.estimated_value)?;
    Ok(())
}

/// Validate a contact draft: name and a well-formed email are required.
pub fn validate_contact_draft(draft: &ContactDraft) -> Result<(), ValidationError> {
    require("name", &draft.name)?;
    require("email", &draft.email)?;
    validate_email(&draft.email)?;
    Ok(())
}

/// Validate an account draft: name required, revenue non-negative.
pub fn validate_account_draft(draft: &AccountDraft) -> Result<(), ValidationError> {
    require("name", &draft.name)?;
    validate_non_negative("total_revenue", draft.total_revenue)?;
    if draft.employees < 0 {
        return Err(ValidationError::InvalidValue {
            field: "employees".to_string(),
            reason: "must not be negative".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AccountHealth, LeadSource, LeadStatus, Priority};

    fn lead_draft() -> LeadDraft {
        LeadDraft {
            name: "Sarah Johnson".to_string(),
            email: "sarah@techflow.example".to_string(),
            phone: None,
            company: Some("TechFlow Solutions".to_string()),
            title: None,
            source: LeadSource::Website,
            status: LeadStatus::New,
            score: 75,
            estimated_value: 25_000.0,
            notes: None,
        }
    }

    #[test]
    fn test_valid_lead_draft_passes() {
        assert!(validate_lead_draft(&lead_draft()).is_ok());
    }

    #[test]
    fn test_missing_name_rejected() {
        let mut draft = lead_draft();
        draft.name = "   ".to_string();
        let err = validate_lead_draft(&draft).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::RequiredFieldMissing { ref field } if field == "name"
        ));
    }

    #[test]
    fn test_malformed_email_rejected() {
        for bad in ["plainaddress", "missing@tld", "@nodomain.com", "a b@c.com"] {
            let mut draft = lead_draft();
            draft.email = bad.to_string();
            assert!(
                validate_lead_draft(&draft).is_err(),
                "expected {:?} to be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_valid_email_shapes_accepted() {
        for good in ["a@b.co", "first.last@sub.domain.example", "x+tag@y.org"] {
            assert!(validate_email(good).is_ok(), "expected {:?} to pass", good);
        }
    }

    #[test]
    fn test_score_out_of_range_rejected() {
        let mut draft = lead_draft();
        draft.score = 101;
        assert!(validate_lead_draft(&draft).is_err());
        draft.score = -1;
        assert!(validate_lead_draft(&draft).is_err());
    }

    #[test]
    fn test_negative_deal_value_rejected() {
        let draft = DealDraft {
            title: "Pilot".to_string(),
            value: -10.0,
            stage: "cold-lead".to_string(),
            priority: Priority::Low,
            contact_name: None,
            company: None,
            assigned_to: None,
        };
        let err = validate_deal_draft(&draft).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidValue { ref field, .. } if field == "value"
        ));
    }

    #[test]
    fn test_nan_deal_value_rejected() {
        let draft = DealDraft {
            title: "Pilot".to_string(),
            value: f64::NAN,
            stage: "cold-lead".to_string(),
            priority: Priority::Low,
            contact_name: None,
            company: None,
            assigned_to: None,
        };
        assert!(validate_deal_draft(&draft).is_err());
    }

    #[test]
    fn test_account_draft_negative_employees_rejected() {
        let draft = AccountDraft {
            name: "DataDriven Analytics".to_string(),
            industry: None,
            website: None,
            location: None,
            account_type: None,
            employees: -3,
            health: AccountHealth::Good,
            contact_count: 0,
            total_revenue: 0.0,
            notes: None,
        };
        assert!(validate_account_draft(&draft).is_err());
    }
}
