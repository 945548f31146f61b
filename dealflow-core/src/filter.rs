//! Client-side list filters.
//!
//! The record store returns whole collections; narrowing by search text or
//! facet happens in memory on every render, never server-side.

use crate::{Account, AccountHealth, Contact, Lead, LeadSource, LeadStatus};

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn opt_contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| contains_ci(h, needle))
}

/// Filter over the leads collection: free-text search across name, email
/// and company, plus optional status and source facets. An unset facet
/// matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadFilter {
    pub search: Option<String>,
    pub status: Option<LeadStatus>,
    pub source: Option<LeadSource>,
}

impl LeadFilter {
    pub fn matches(&self, lead: &Lead) -> bool {
        let matches_search = match self.search.as_deref() {
            None => true,
            Some(term) => {
                let term = term.trim().to_lowercase();
                term.is_empty()
                    || contains_ci(&lead.name, &term)
                    || contains_ci(&lead.email, &term)
                    || opt_contains_ci(lead.company.as_deref(), &term)
            }
        };
        matches_search
            && self.status.is_none_or(|s| lead.status == s)
            && self.source.is_none_or(|s| lead.source == s)
    }

    pub fn apply<'a>(&self, leads: &'a [Lead]) -> Vec<&'a Lead> {
        leads.iter().filter(|l| self.matches(l)).collect()
    }
}

/// Filter over the contacts collection: free-text search only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactFilter {
    pub search: Option<String>,
}

impl ContactFilter {
    pub fn matches(&self, contact: &Contact) -> bool {
        match self.search.as_deref() {
            None => true,
            Some(term) => {
                let term = term.trim().to_lowercase();
                term.is_empty()
                    || contains_ci(&contact.name, &term)
                    || contains_ci(&contact.email, &term)
                    || opt_contains_ci(contact.company.as_deref(), &term)
            }
        }
    }

    pub fn apply<'a>(&self, contacts: &'a [Contact]) -> Vec<&'a Contact> {
        contacts.iter().filter(|c| self.matches(c)).collect()
    }
}

/// Filter over the accounts collection: free-text search across name,
/// industry and website, plus optional type and health facets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountFilter {
    pub search: Option<String>,
    pub account_type: Option<String>,
    pub health: Option<AccountHealth>,
}

impl AccountFilter {
    pub fn matches(&self, account: &Account) -> bool {
        let matches_search = match self.search.as_deref() {
            None => true,
            Some(term) => {
                let term = term.trim().to_lowercase();
                term.is_empty()
                    || contains_ci(&account.name, &term)
                    || opt_contains_ci(account.industry.as_deref(), &term)
                    || opt_contains_ci(account.website.as_deref(), &term)
            }
        };
        let matches_type = match self.account_type.as_deref() {
            None => true,
            Some(t) => account
                .account_type
                .as_deref()
                .is_some_and(|a| a.eq_ignore_ascii_case(t)),
        };
        matches_search && matches_type && self.health.is_none_or(|h| account.health == h)
    }

    pub fn apply<'a>(&self, accounts: &'a [Account]) -> Vec<&'a Account> {
        accounts.iter().filter(|a| self.matches(a)).collect()
    }
}
