//! Per-field value generation.
//!
//! A [`FieldGenerator`] is the generation context of one worker: it owns its
//! random source and any uniqueness bookkeeping. Uniqueness therefore holds
//! only within the values a single generator has produced. Two generators
//! running in different workers can emit the same email; callers that need
//! globally unique emails must run a single worker or deduplicate afterwards.

use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::FreeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::fmt;

use crate::error::{Error, Result};
use crate::schema::field;

/// Smallest generated id (inclusive)
pub const ID_MIN: u64 = 1000;
/// Upper bound for generated ids (exclusive)
pub const ID_MAX: u64 = 9_999_999_999_999;
/// Redraws allowed per unique value before giving up
pub const DEFAULT_MAX_UNIQUE_ATTEMPTS: usize = 1000;

/// Semantic category of a generated value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Id,
    FirstName,
    LastName,
    Email,
    Company,
    PhoneNumber,
}

impl FieldKind {
    pub fn column_name(&self) -> &'static str {
        match self {
            FieldKind::Id => field::ID,
            FieldKind::FirstName => field::FIRST_NAME,
            FieldKind::LastName => field::LAST_NAME,
            FieldKind::Email => field::EMAIL,
            FieldKind::Company => field::COMPANY,
            FieldKind::PhoneNumber => field::PHONE_NUMBER,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Source of plausible random values, one call per field per record.
pub trait FieldGenerator {
    /// Draw an id in `[ID_MIN, ID_MAX)`.
    fn id(&mut self) -> Result<u64>;

    /// Draw a text value for `kind`.
    fn text(&mut self, kind: FieldKind) -> Result<String>;
}

/// Set of values already handed out by one generation context.
#[derive(Debug)]
pub struct UniquePool {
    seen: HashSet<String>,
    max_attempts: usize,
}

impl UniquePool {
    pub fn new(max_attempts: usize) -> Self {
        Self {
            seen: HashSet::new(),
            max_attempts,
        }
    }

    /// Call `draw` until it yields a value not seen before.
    ///
    /// Fails with [`Error::GenerationExhausted`] after `max_attempts` collisions.
    pub fn draw<F>(&mut self, kind: FieldKind, mut draw: F) -> Result<String>
    where
        F: FnMut() -> String,
    {
        for _ in 0..self.max_attempts {
            let value = draw();
            if !self.seen.contains(&value) {
                self.seen.insert(value.clone());
                return Ok(value);
            }
        }

        Err(Error::GenerationExhausted {
            field: kind,
            attempts: self.max_attempts,
        })
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// [`FieldGenerator`] backed by the `fake` crate's English locale.
///
/// Emails are unique within one instance.
pub struct FakeFieldGenerator<R = StdRng> {
    rng: R,
    emails: UniquePool,
}

impl FakeFieldGenerator<StdRng> {
    /// Create a generator seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for FakeFieldGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> FakeFieldGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            emails: UniquePool::new(DEFAULT_MAX_UNIQUE_ATTEMPTS),
        }
    }

    pub fn with_max_unique_attempts(mut self, max_attempts: usize) -> Self {
        self.emails = UniquePool::new(max_attempts);
        self
    }
}

impl<R: Rng> FieldGenerator for FakeFieldGenerator<R> {
    fn id(&mut self) -> Result<u64> {
        Ok(self.rng.gen_range(ID_MIN..ID_MAX))
    }

    fn text(&mut self, kind: FieldKind) -> Result<String> {
        let rng = &mut self.rng;
        let value = match kind {
            FieldKind::Id => rng.gen_range(ID_MIN..ID_MAX).to_string(),
            FieldKind::FirstName => FirstName().fake_with_rng(rng),
            FieldKind::LastName => LastName().fake_with_rng(rng),
            FieldKind::Email => self
                .emails
                .draw(kind, || FreeEmail().fake_with_rng(&mut *rng))?,
            FieldKind::Company => CompanyName().fake_with_rng(rng),
            FieldKind::PhoneNumber => PhoneNumber().fake_with_rng(rng),
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_in_range() {
        let mut generator = FakeFieldGenerator::new();
        for _ in 0..10_000 {
            let id = generator.id().unwrap();
            assert!((ID_MIN..ID_MAX).contains(&id), "id {} out of range", id);
        }
    }

    #[test]
    fn test_text_fields_are_non_empty() {
        let mut generator = FakeFieldGenerator::with_rng(StdRng::seed_from_u64(7));
        for kind in [
            FieldKind::FirstName,
            FieldKind::LastName,
            FieldKind::Email,
            FieldKind::Company,
            FieldKind::PhoneNumber,
        ] {
            let value = generator.text(kind).unwrap();
            assert!(!value.is_empty(), "{} produced an empty value", kind);
        }
    }

    #[test]
    fn test_emails_unique_within_generator() {
        let mut generator = FakeFieldGenerator::new();
        let mut seen = HashSet::new();
        for _ in 0..2_000 {
            let email = generator.text(FieldKind::Email).unwrap();
            assert!(email.contains('@'));
            assert!(seen.insert(email), "duplicate email from one generator");
        }
    }

    #[test]
    fn test_unique_pool_exhausts() {
        let mut pool = UniquePool::new(3);
        let mut calls = 0;

        let first = pool
            .draw(FieldKind::Email, || "same@example.com".to_string())
            .unwrap();
        assert_eq!(first, "same@example.com");

        let err = pool
            .draw(FieldKind::Email, || {
                calls += 1;
                "same@example.com".to_string()
            })
            .unwrap_err();

        assert_eq!(calls, 3);
        assert_eq!(pool.len(), 1);
        match err {
            Error::GenerationExhausted { field, attempts } => {
                assert_eq!(field, FieldKind::Email);
                assert_eq!(attempts, 3);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unique_pool_retries_collisions() {
        let mut pool = UniquePool::new(5);
        pool.draw(FieldKind::Email, || "a".to_string()).unwrap();

        let mut values = ["a", "a", "a", "b"].into_iter();
        let next = pool
            .draw(FieldKind::Email, || values.next().unwrap_or("z").to_string())
            .unwrap();
        assert_eq!(next, "b");
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_field_kind_display_matches_columns() {
        assert_eq!(FieldKind::PhoneNumber.to_string(), "phone_number");
        assert_eq!(FieldKind::Email.to_string(), "email");
    }
}
