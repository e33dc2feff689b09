//! Permit record data model.
//!
//! `PermitRecord` is the canonical entity served by every endpoint. Field
//! names serialize in camelCase to stay wire-compatible with the back-office
//! clients; everything except the identity fields is optional because
//! upstream sources populate records unevenly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a permit/certificate document.
///
/// Serialized as the official display string (e.g. `"Permanent Residence"`).
/// Unrecognized strings round-trip through [`DocumentType::Other`] so records
/// from upstream sources never fail to parse on type alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocumentType {
    PermanentResidence,
    GeneralWorkPermit,
    RelativesPermit,
    BirthCertificate,
    NaturalizationCertificate,
    RefugeeStatus,
    Other(String),
}

impl DocumentType {
    pub fn as_str(&self) -> &str {
        match self {
            DocumentType::PermanentResidence => "Permanent Residence",
            DocumentType::GeneralWorkPermit => "General Work Permit",
            DocumentType::RelativesPermit => "Relative's Permit",
            DocumentType::BirthCertificate => "Birth Certificate",
            DocumentType::NaturalizationCertificate => "Naturalization Certificate",
            DocumentType::RefugeeStatus => "Refugee Status (Section 24)",
            DocumentType::Other(s) => s,
        }
    }
}

impl Default for DocumentType {
    fn default() -> Self {
        DocumentType::Other(String::new())
    }
}

impl From<String> for DocumentType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Permanent Residence" => DocumentType::PermanentResidence,
            "General Work Permit" => DocumentType::GeneralWorkPermit,
            "Relative's Permit" => DocumentType::RelativesPermit,
            "Birth Certificate" => DocumentType::BirthCertificate,
            "Naturalization Certificate" => DocumentType::NaturalizationCertificate,
            "Refugee Status (Section 24)" => DocumentType::RefugeeStatus,
            _ => DocumentType::Other(s),
        }
    }
}

impl From<DocumentType> for String {
    fn from(t: DocumentType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the currently served record set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// At least one configured upstream source contributed records.
    External,
    /// The static seed set is being served.
    Fallback,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::External => "external",
            Provenance::Fallback => "fallback",
        }
    }
}

/// Computed document validity, derived from the expiry date at view time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidityStatus {
    Valid,
    Expired,
}

impl ValidityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidityStatus::Valid => "VALID",
            ValidityStatus::Expired => "EXPIRED",
        }
    }
}

/// Parent name block on birth registrations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParentName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParentInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mother: Option<ParentName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub father: Option<ParentName>,
}

/// A single permit/certificate entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PermitRecord {
    pub id: u64,
    #[serde(rename = "type")]
    pub document_type: DocumentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maiden_surname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passport: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permit_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    pub issue_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub officer_name: Option<String>,
    #[serde(rename = "officerID", skip_serializing_if = "Option::is_none")]
    pub officer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuing_office: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_email: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_info: Option<ParentInfo>,
}

/// Expiry strings that mean "this document never expires".
const NON_EXPIRING: &[&str] = &["Indefinite", "Permanent", "N/A"];

impl PermitRecord {
    /// First non-empty identifier among permit, reference and file number.
    pub fn primary_reference(&self) -> Option<&str> {
        [&self.permit_number, &self.reference_number, &self.file_number]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.is_empty())
    }

    /// Holder name: the full `name` field, or surname/forename joined.
    pub fn full_name(&self) -> String {
        if let Some(name) = &self.name {
            if !name.is_empty() {
                return name.clone();
            }
        }
        let forename = self.forename.as_deref().unwrap_or("");
        let surname = self.surname.as_deref().unwrap_or("");
        format!("{forename} {surname}").trim().to_string()
    }

    /// Validity as of `today`. Non-expiring sentinels and unparseable expiry
    /// strings count as valid; a document stays valid through its expiry day.
    pub fn validity_status(&self, today: NaiveDate) -> ValidityStatus {
        let Some(expiry) = self.expiry_date.as_deref() else {
            return ValidityStatus::Valid;
        };
        if expiry.is_empty() || NON_EXPIRING.contains(&expiry) {
            return ValidityStatus::Valid;
        }
        match NaiveDate::parse_from_str(expiry, "%Y-%m-%d") {
            Ok(date) if date < today => ValidityStatus::Expired,
            _ => ValidityStatus::Valid,
        }
    }

    /// Ordered label/value pairs of every present field, for the generic
    /// document layout. Internal bookkeeping (id, type) is excluded.
    pub fn display_fields(&self) -> Vec<(&'static str, String)> {
        fn push(fields: &mut Vec<(&'static str, String)>, label: &'static str, value: &Option<String>) {
            if let Some(v) = value {
                if !v.is_empty() {
                    fields.push((label, v.clone()));
                }
            }
        }
        let mut fields = Vec::new();
        push(&mut fields, "NAME", &self.name);
        push(&mut fields, "SURNAME", &self.surname);
        push(&mut fields, "FORENAME", &self.forename);
        push(&mut fields, "PASSPORT", &self.passport);
        push(&mut fields, "IDENTITY NUMBER", &self.identity_number);
        push(&mut fields, "ID NUMBER", &self.id_number);
        push(&mut fields, "PERMIT NUMBER", &self.permit_number);
        push(&mut fields, "REFERENCE NUMBER", &self.reference_number);
        push(&mut fields, "FILE NUMBER", &self.file_number);
        push(&mut fields, "CONTROL NUMBER", &self.control_number);
        push(&mut fields, "CERTIFICATE NUMBER", &self.certificate_number);
        push(&mut fields, "NATIONALITY", &self.nationality);
        push(&mut fields, "DATE OF BIRTH", &self.date_of_birth);
        push(&mut fields, "GENDER", &self.gender);
        push(&mut fields, "PLACE OF BIRTH", &self.place_of_birth);
        push(&mut fields, "COUNTRY OF BIRTH", &self.country_of_birth);
        push(&mut fields, "EDUCATION", &self.education);
        if !self.issue_date.is_empty() {
            fields.push(("ISSUE DATE", self.issue_date.clone()));
        }
        push(&mut fields, "EXPIRY DATE", &self.expiry_date);
        push(&mut fields, "STATUS", &self.status);
        push(&mut fields, "CATEGORY", &self.category);
        push(&mut fields, "OFFICER", &self.officer_name);
        push(&mut fields, "OFFICER ID", &self.officer_id);
        push(&mut fields, "ISSUING OFFICE", &self.issuing_office);
        if !self.conditions.is_empty() {
            fields.push(("CONDITIONS", self.conditions.join("; ")));
        }
        fields
    }
}
