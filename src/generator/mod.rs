//! Synthetic value generation.
//!
//! Every configured column value is replaced with a freshly generated
//! substitute; the original value is never consulted, so repeated inputs
//! become independently random outputs.

use crate::batch::Value;
use fake::faker::address::en::{CityName, CountryName, StreetName, ZipCode};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The 50 US state abbreviations used by the `state` kind
pub const US_STATES: [&str; 50] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY",
];

/// Supported generator kinds.
///
/// Tags in the config file are matched by [`GeneratorKind::parse`];
/// anything unrecognized yields no generator and the column passes
/// through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    Company,
    FirstName,
    LastName,
    Address,
    City,
    State,
    Country,
    PostalCode,
    Email,
    Phone,
    Date,
    Blank,
    Float,
    Check,
    Gender,
}

impl GeneratorKind {
    /// Parse a config tag into a kind, or None for unrecognized tags
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "company" => Some(GeneratorKind::Company),
            "first_name" => Some(GeneratorKind::FirstName),
            "last_name" => Some(GeneratorKind::LastName),
            "address" => Some(GeneratorKind::Address),
            "city" => Some(GeneratorKind::City),
            "state" => Some(GeneratorKind::State),
            "country" => Some(GeneratorKind::Country),
            "postal_code" => Some(GeneratorKind::PostalCode),
            "email" => Some(GeneratorKind::Email),
            "phone" => Some(GeneratorKind::Phone),
            "date" => Some(GeneratorKind::Date),
            "blank" => Some(GeneratorKind::Blank),
            "float" => Some(GeneratorKind::Float),
            "check" => Some(GeneratorKind::Check),
            "gender" => Some(GeneratorKind::Gender),
            _ => None,
        }
    }

    /// The config tag for this kind
    pub fn tag(&self) -> &'static str {
        match self {
            GeneratorKind::Company => "company",
            GeneratorKind::FirstName => "first_name",
            GeneratorKind::LastName => "last_name",
            GeneratorKind::Address => "address",
            GeneratorKind::City => "city",
            GeneratorKind::State => "state",
            GeneratorKind::Country => "country",
            GeneratorKind::PostalCode => "postal_code",
            GeneratorKind::Email => "email",
            GeneratorKind::Phone => "phone",
            GeneratorKind::Date => "date",
            GeneratorKind::Blank => "blank",
            GeneratorKind::Float => "float",
            GeneratorKind::Check => "check",
            GeneratorKind::Gender => "gender",
        }
    }

    /// All supported kinds, for the `generators` listing
    pub fn all() -> &'static [GeneratorKind] {
        &[
            GeneratorKind::Company,
            GeneratorKind::FirstName,
            GeneratorKind::LastName,
            GeneratorKind::Address,
            GeneratorKind::City,
            GeneratorKind::State,
            GeneratorKind::Country,
            GeneratorKind::PostalCode,
            GeneratorKind::Email,
            GeneratorKind::Phone,
            GeneratorKind::Date,
            GeneratorKind::Blank,
            GeneratorKind::Float,
            GeneratorKind::Check,
            GeneratorKind::Gender,
        ]
    }
}

/// Generator with its own RNG; seedable for reproducible runs
pub struct Generator {
    rng: StdRng,
}

impl Generator {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }

    /// Produce one fresh value for the given kind
    pub fn generate(&mut self, kind: GeneratorKind) -> Value {
        let rng = &mut self.rng;
        match kind {
            GeneratorKind::Company => Value::Text(CompanyName().fake_with_rng(rng)),
            GeneratorKind::FirstName => Value::Text(FirstName().fake_with_rng(rng)),
            GeneratorKind::LastName => Value::Text(LastName().fake_with_rng(rng)),
            GeneratorKind::Address => {
                let number = rng.random_range(1..9999);
                let street: String = StreetName().fake_with_rng(rng);
                Value::Text(format!("{} {}", number, street))
            }
            GeneratorKind::City => Value::Text(CityName().fake_with_rng(rng)),
            GeneratorKind::State => {
                let idx = rng.random_range(0..US_STATES.len());
                Value::Text(US_STATES[idx].to_string())
            }
            GeneratorKind::Country => Value::Text(CountryName().fake_with_rng(rng)),
            GeneratorKind::PostalCode => Value::Text(ZipCode().fake_with_rng(rng)),
            GeneratorKind::Email => Value::Text(SafeEmail().fake_with_rng(rng)),
            GeneratorKind::Phone => Value::Text(PhoneNumber().fake_with_rng(rng)),
            GeneratorKind::Date => {
                let year = rng.random_range(1970..2024);
                let month = rng.random_range(1..=12);
                let day = rng.random_range(1..=28);
                Value::Text(format!("{:04}-{:02}-{:02}", year, month, day))
            }
            GeneratorKind::Blank => Value::Text(String::new()),
            // 4-digit integer divided by 100 gives two fractional digits
            GeneratorKind::Float => Value::Float(rng.random_range(1000..10000) as f64 / 100.0),
            GeneratorKind::Check => {
                let letters: String = (0..2)
                    .map(|_| (b'A' + rng.random_range(0..26u8)) as char)
                    .collect();
                Value::Text(format!("{}{:06}", letters, rng.random_range(0..1_000_000)))
            }
            GeneratorKind::Gender => {
                let g = if rng.random_range(0..2) == 0 { "M" } else { "F" };
                Value::Text(g.to_string())
            }
        }
    }
}
